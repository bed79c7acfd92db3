mod category;
mod report;

pub use category::{CategoryFilter, ReportCategory};
pub use report::{resolve_author_name, NewReport, Report, ReportRow};
