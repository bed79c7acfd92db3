use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::Session;
use crate::features::reports::form::ReportForm;
use crate::features::reports::models::{NewReport, Report};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::selection::{ImageSelection, SelectedFile};
use crate::features::users::ProfileRepository;
use crate::modules::storage::ObjectStorage;
use crate::shared::constants::{
    LOGIN_TO_REPORT_MESSAGE, REPORT_CREATED_MESSAGE, REPORT_CREATE_FAILED_PREFIX,
    UNEXPECTED_REPORT_ERROR_MESSAGE, UPLOADING_IMAGES_MESSAGE,
};
use crate::shared::types::Notice;

/// Where a submission currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    UploadingImages,
    InsertingRow,
}

/// Result of a successful submission. The caller refetches the list and
/// closes the create dialog when it receives this.
#[derive(Debug, Clone)]
pub struct CreationOutcome {
    pub report: Report,
    pub notices: Vec<Notice>,
}

/// Storage key for the `index`-th photo of a submission
pub fn image_path(user_id: &str, timestamp_millis: i64, index: usize, file: &SelectedFile) -> String {
    format!("{}/{}-{}.{}", user_id, timestamp_millis, index, file.extension())
}

pub struct ReportCreationService {
    storage: Arc<dyn ObjectStorage>,
    reports: Arc<dyn ReportRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ReportCreationService {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        reports: Arc<dyn ReportRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            storage,
            reports,
            profiles,
        }
    }

    /// Validates the draft, uploads its photos and inserts the report.
    ///
    /// Nothing is inserted unless every photo uploaded. Photos uploaded before
    /// a failing sibling are left in the bucket.
    pub async fn submit(
        &self,
        session: &Session,
        form: &ReportForm,
        images: &ImageSelection,
    ) -> Result<CreationOutcome> {
        let mut phase = SubmissionPhase::Validating;
        tracing::debug!("Report submission phase: {:?}", phase);

        let category = match form.check() {
            Ok(category) => category,
            Err(e) => {
                tracing::debug!(
                    "Report submission phase: {:?} (invalid form)",
                    SubmissionPhase::Idle
                );
                return Err(e);
            }
        };
        let user = session.require_user(LOGIN_TO_REPORT_MESSAGE)?;

        let mut notices = Vec::new();

        phase = SubmissionPhase::UploadingImages;
        tracing::debug!(
            "Report submission phase: {:?} ({} images)",
            phase,
            images.len()
        );
        if !images.is_empty() {
            notices.push(Notice::info(UPLOADING_IMAGES_MESSAGE));
        }
        let image_urls = self.upload_images(&user.sub, images).await?;

        phase = SubmissionPhase::InsertingRow;
        tracing::debug!("Report submission phase: {:?}", phase);

        let new_report = NewReport {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            category,
            latitude: form.latitude,
            longitude: form.longitude,
            image_urls,
            user_id: user.sub.clone(),
        };

        let inserted = match self.profiles.upsert(user).await {
            Ok(()) => self.reports.insert(&new_report).await,
            Err(e) => Err(e),
        };
        let report = inserted.map_err(|e| {
            tracing::error!("Report insert failed for user {}: {}", user.sub, e);
            AppError::ExternalServiceError(format!(
                "{}{}",
                REPORT_CREATE_FAILED_PREFIX,
                e.upstream_message()
            ))
        })?;

        tracing::info!(
            "Report {} created with {} images",
            report.id,
            report.image_urls.len()
        );
        notices.push(Notice::success(REPORT_CREATED_MESSAGE));

        Ok(CreationOutcome { report, notices })
    }

    /// Uploads every photo concurrently and waits for all of them to settle.
    /// Returns the public URLs in selection order.
    async fn upload_images(&self, user_id: &str, images: &ImageSelection) -> Result<Vec<String>> {
        let timestamp = Utc::now().timestamp_millis();
        let paths: Vec<String> = images
            .files()
            .iter()
            .enumerate()
            .map(|(index, file)| image_path(user_id, timestamp, index, file))
            .collect();

        let uploads = images.files().iter().zip(&paths).map(|(file, path)| {
            self.storage
                .upload(path, &file.data, &file.content_type)
        });
        let results = join_all(uploads).await;

        let mut uploaded = Vec::new();
        let mut failed = 0usize;
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(()) => uploaded.push(path.as_str()),
                Err(e) => {
                    failed += 1;
                    tracing::error!("Image upload failed: {}", e);
                }
            }
        }

        if failed > 0 {
            if !uploaded.is_empty() {
                tracing::warn!(
                    "Orphaned report images left in storage: {}",
                    uploaded.join(", ")
                );
            }
            return Err(AppError::Storage(UNEXPECTED_REPORT_ERROR_MESSAGE.to_string()));
        }

        Ok(paths.iter().map(|path| self.storage.public_url(path)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportCategory;
    use crate::shared::constants::REQUIRED_FIELDS_MESSAGE;
    use crate::shared::test_helpers::{
        authenticated_session, sample_user, FakeStorage, InMemoryProfileRepository,
        InMemoryReportRepository,
    };
    use crate::shared::types::NoticeLevel;

    struct Fixture {
        storage: Arc<FakeStorage>,
        reports: Arc<InMemoryReportRepository>,
        profiles: Arc<InMemoryProfileRepository>,
        service: ReportCreationService,
    }

    fn fixture(storage: FakeStorage) -> Fixture {
        let storage = Arc::new(storage);
        let reports = Arc::new(InMemoryReportRepository::default());
        let profiles = Arc::new(InMemoryProfileRepository::default());
        let service = ReportCreationService::new(storage.clone(), reports.clone(), profiles.clone());
        Fixture {
            storage,
            reports,
            profiles,
            service,
        }
    }

    fn form() -> ReportForm {
        ReportForm {
            title: "  Buraco enorme  ".to_string(),
            description: " Na esquina da escola ".to_string(),
            category: Some(ReportCategory::Pothole),
            ..Default::default()
        }
    }

    fn images(count: usize) -> ImageSelection {
        let mut selection = ImageSelection::new();
        let files = (0..count)
            .map(|i| SelectedFile::new(format!("foto{i}.png"), "image/png", vec![i as u8; 8]))
            .collect();
        selection.add_files(files);
        selection
    }

    #[tokio::test]
    async fn test_submit_uploads_then_inserts() {
        let f = fixture(FakeStorage::default());
        let user = sample_user();

        let outcome = f
            .service
            .submit(&authenticated_session(), &form(), &images(3))
            .await
            .unwrap();

        assert_eq!(outcome.report.title, "Buraco enorme");
        assert_eq!(outcome.report.description, "Na esquina da escola");
        assert_eq!(outcome.report.category, "buraco");
        assert_eq!(outcome.report.user_id, user.sub);
        assert_eq!(outcome.report.image_urls.len(), 3);

        let paths = f.storage.uploaded_paths();
        assert_eq!(paths.len(), 3);
        for (i, path) in paths.iter().enumerate() {
            assert!(path.starts_with(&format!("{}/", user.sub)));
            assert!(path.ends_with(&format!("-{i}.png")));
            assert_eq!(outcome.report.image_urls[i], f.storage.public_url(path));
        }

        assert_eq!(f.reports.insert_calls(), 1);
        assert_eq!(f.profiles.upserted(), vec![user.sub.clone()]);
        let last = outcome.notices.last().unwrap();
        assert_eq!(last.level, NoticeLevel::Success);
        assert_eq!(last.message, "Reporte criado com sucesso!");
    }

    #[tokio::test]
    async fn test_submit_without_images() {
        let f = fixture(FakeStorage::default());
        let outcome = f
            .service
            .submit(&authenticated_session(), &form(), &ImageSelection::new())
            .await
            .unwrap();

        assert!(outcome.report.image_urls.is_empty());
        assert_eq!(outcome.notices.len(), 1);
        assert!(f.storage.uploaded_paths().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_checked_before_session() {
        let f = fixture(FakeStorage::default());
        let blank = ReportForm {
            title: " ".to_string(),
            ..form()
        };

        let err = f
            .service
            .submit(&Session::Anonymous, &blank, &images(1))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref msg) if msg == REQUIRED_FIELDS_MESSAGE));
        assert!(f.storage.uploaded_paths().is_empty());
        assert_eq!(f.reports.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_submission_makes_no_calls() {
        let f = fixture(FakeStorage::default());

        let err = f
            .service
            .submit(&Session::Anonymous, &form(), &images(2))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Unauthorized(ref msg) if msg == "Você precisa estar logado para criar um reporte"
        ));
        assert!(f.storage.uploaded_paths().is_empty());
        assert_eq!(f.reports.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_upload_skips_insert() {
        let f = fixture(FakeStorage::failing_at(&[1]));

        let err = f
            .service
            .submit(&authenticated_session(), &form(), &images(3))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(ref msg) if msg == "Erro inesperado ao criar reporte"));
        // siblings still settled; their objects stay orphaned
        assert_eq!(f.storage.uploaded_paths().len(), 2);
        assert_eq!(f.reports.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_insert_failure_surfaces_upstream_message() {
        let f = fixture(FakeStorage::default());
        f.reports.fail_insert(true);

        let err = f
            .service
            .submit(&authenticated_session(), &form(), &images(1))
            .await
            .unwrap_err();

        match err {
            AppError::ExternalServiceError(msg) => {
                assert!(msg.starts_with("Erro ao criar reporte: "));
                assert!(msg.len() > "Erro ao criar reporte: ".len());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_image_path_format() {
        let file = SelectedFile::new("Rua.JPEG", "image/jpeg", vec![]);
        assert_eq!(image_path("abc", 1700000000000, 2, &file), "abc/1700000000000-2.jpeg");
    }
}
