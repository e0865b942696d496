use std::sync::Arc;

use chrono::Utc;

use crate::core::error::Result;
use crate::features::exports::dtos::{ReportDocument, ReportFormat};
use crate::features::exports::renderers;
use crate::features::rankings::dtos::RankingQuery;
use crate::features::rankings::RankingService;

pub struct ExportService {
    rankings: Arc<RankingService>,
}

impl ExportService {
    pub fn new(rankings: Arc<RankingService>) -> Self {
        Self { rankings }
    }

    /// Build the toppers report from the filtered ranking view
    pub async fn toppers_report(&self, filters: RankingQuery) -> Result<ReportDocument> {
        let groups = self.rankings.toppers(filters).await?;
        let title = format!("Toppers Report ({})", Utc::now().format("%d-%m-%Y"));
        Ok(ReportDocument::from_groups(title, groups))
    }

    /// Serialize a report into the requested download format
    pub fn render(&self, report: &ReportDocument, format: ReportFormat) -> Result<Vec<u8>> {
        match format {
            ReportFormat::Pdf => renderers::pdf::render(report),
            ReportFormat::Docx => renderers::docx::render(report),
            ReportFormat::Xlsx => renderers::xlsx::render(report),
        }
    }

    pub fn attachment_filename(&self, format: ReportFormat) -> String {
        format!(
            "toppers-report-{}.{}",
            Utc::now().format("%Y%m%d"),
            format.extension()
        )
    }
}
