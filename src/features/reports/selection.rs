use crate::shared::constants::{MAX_IMAGES_PER_REPORT, MAX_IMAGE_SIZE};
use crate::shared::types::Notice;
use crate::shared::validation::FILE_EXTENSION_REGEX;

/// A file picked by the user, held in memory until the report is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Lowercased extension for the storage key.
    ///
    /// Taken from the file name when it has a sane one, else from the
    /// content subtype, else "bin".
    pub fn extension(&self) -> String {
        let from_name = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| FILE_EXTENSION_REGEX.is_match(ext));

        let from_type = || {
            self.content_type
                .split_once('/')
                .map(|(_, subtype)| subtype.split(['+', ';']).next().unwrap_or(subtype))
                .filter(|ext| FILE_EXTENSION_REGEX.is_match(ext))
        };

        from_name
            .or_else(from_type)
            .map(str::to_lowercase)
            .unwrap_or_else(|| "bin".to_string())
    }
}

/// Photos staged for a report before submission.
///
/// Holds at most five images, each an `image/*` of at most 10MB.
#[derive(Debug, Clone, Default)]
pub struct ImageSelection {
    files: Vec<SelectedFile>,
}

impl ImageSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends `files`, returning an error notice per rejected file.
    /// Accepted files beyond the fifth are dropped.
    pub fn add_files(&mut self, files: Vec<SelectedFile>) -> Vec<Notice> {
        let mut notices = Vec::new();

        for file in files {
            if !file.is_image() {
                notices.push(Notice::error(format!(
                    "{} não é uma imagem válida",
                    file.name
                )));
                continue;
            }
            if file.size() > MAX_IMAGE_SIZE {
                notices.push(Notice::error(format!(
                    "{} é muito grande (máximo 10MB)",
                    file.name
                )));
                continue;
            }
            self.files.push(file);
        }

        if self.files.len() > MAX_IMAGES_PER_REPORT {
            tracing::debug!(
                "Dropping {} selected images over the limit",
                self.files.len() - MAX_IMAGES_PER_REPORT
            );
            self.files.truncate(MAX_IMAGES_PER_REPORT);
        }

        notices
    }

    /// Removes the file at `index`; out of range does nothing
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
