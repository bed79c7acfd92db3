// =============================================================================
// BRANDING & MAP
// =============================================================================

pub const APP_NAME: &str = "Conecta Rua";

pub const APP_CITY: &str = "Ponta Grossa - PR";

/// Centro de Ponta Grossa
pub const DEFAULT_CENTER_LAT: f64 = -25.0916;
pub const DEFAULT_CENTER_LON: f64 = -50.1668;

pub const DEFAULT_MAP_ZOOM: u8 = 13;

pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

// =============================================================================
// STORAGE & UPLOAD LIMITS
// =============================================================================

pub const REPORT_IMAGES_BUCKET: &str = "report-images";

/// Maximum photo size in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

pub const MAX_IMAGES_PER_REPORT: usize = 5;

// =============================================================================
// DISPLAY FALLBACKS
// =============================================================================

pub const ANONYMOUS_USER_NAME: &str = "Usuário anônimo";

pub const DEFAULT_USER_LABEL: &str = "Usuário";

pub const LOGIN_LABEL: &str = "Entrar";

pub const ALL_CATEGORIES_LABEL: &str = "Todas as categorias";

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const REQUIRED_FIELDS_MESSAGE: &str = "Por favor, preencha todos os campos obrigatórios";

pub const LOGIN_TO_REPORT_MESSAGE: &str = "Você precisa estar logado para criar um reporte";

pub const UPLOADING_IMAGES_MESSAGE: &str = "Fazendo upload das imagens...";

pub const REPORT_CREATED_MESSAGE: &str = "Reporte criado com sucesso!";

pub const REPORT_CREATE_FAILED_PREFIX: &str = "Erro ao criar reporte: ";

pub const UNEXPECTED_REPORT_ERROR_MESSAGE: &str = "Erro inesperado ao criar reporte";

pub const REPORT_NOT_FOUND_MESSAGE: &str = "Reporte não encontrado";

pub const INVALID_CATEGORY_MESSAGE: &str = "Categoria inválida";

pub const INVALID_COORDINATES_MESSAGE: &str = "Coordenadas inválidas";

pub const LOGIN_TO_COMMENT_MESSAGE: &str = "Você precisa estar logado para comentar";

pub const EMPTY_COMMENT_MESSAGE: &str = "Digite um comentário";

pub const COMMENT_ADDED_MESSAGE: &str = "Comentário adicionado!";

pub const COMMENT_FAILED_MESSAGE: &str = "Erro ao adicionar comentário";

pub const COMMENTS_READ_ONLY_MESSAGE: &str = "Faça login para adicionar comentários";

pub const LOCATION_FOUND_MESSAGE: &str = "Localização obtida com sucesso!";

pub const LOCATION_FALLBACK_MESSAGE: &str =
    "Erro ao obter localização. Usando localização padrão de Ponta Grossa.";

pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str =
    "Geolocalização não suportada pelo seu navegador";

pub const DATABASE_ERROR_MESSAGE: &str = "Erro ao acessar o banco de dados";
