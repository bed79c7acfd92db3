mod creation_service;
mod report_service;

pub use creation_service::{
    image_path, CreationOutcome, ReportCreationService, SubmissionPhase,
};
pub use report_service::ReportService;
