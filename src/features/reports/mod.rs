pub mod dtos;
pub mod form;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod selection;
pub mod services;
pub mod store;

pub use repository::{PgReportRepository, ReportRepository};
pub use services::{ReportCreationService, ReportService};
