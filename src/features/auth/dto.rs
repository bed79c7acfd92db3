use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Everything the page header needs to render
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionHeaderDto {
    pub app_name: String,
    pub city: String,
    pub authenticated: bool,
    /// Present when signed in
    pub user: Option<HeaderUserDto>,
    /// Identity provider endpoint that ends the session; present when signed in
    pub sign_out_url: Option<String>,
    /// Label of the login affordance; present when signed out
    pub login_label: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeaderUserDto {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub avatar_initial: String,
}
