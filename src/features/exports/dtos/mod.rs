mod report_dto;

pub use report_dto::{ReportDocument, ReportFormat, ReportGroup, ReportQuery, ReportRow};
