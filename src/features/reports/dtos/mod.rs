mod report_dto;

pub use report_dto::{CreateReportForm, ListReportsQuery, ReportResponseDto};
