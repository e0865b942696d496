use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

use crate::core::error::{AppError, Result};
use crate::features::exports::dtos::ReportDocument;

/// Render the report as a DOCX: title paragraph, then a heading and a
/// five-column table per standard group.
pub fn render(report: &ReportDocument) -> Result<Vec<u8>> {
    let mut docx = Docx::new().add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(report.title.as_str()).bold().size(32)),
    );

    for group in &report.groups {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(group.standard.as_str()).bold().size(26)),
        );

        let mut rows = vec![header_row()];
        for row in &group.rows {
            rows.push(TableRow::new(vec![
                text_cell(&row.rank.to_string()),
                text_cell(&row.student_name),
                text_cell(&format!("{:.2}", row.percentage)),
                text_cell(&row.village_name),
                text_cell(&row.contact_number),
            ]));
        }
        docx = docx
            .add_table(Table::new(rows))
            .add_paragraph(Paragraph::new());
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| AppError::Render(format!("Failed to serialize DOCX: {}", e)))?;
    Ok(buffer.into_inner())
}

fn header_row() -> TableRow {
    TableRow::new(vec![
        bold_cell("Rank"),
        bold_cell("Student"),
        bold_cell("Percentage"),
        bold_cell("Village"),
        bold_cell("Contact"),
    ])
}

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

fn bold_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::exports::dtos::{ReportGroup, ReportRow};
    use rust_decimal_macros::dec;

    #[test]
    fn rendered_docx_is_a_zip_container() {
        let report = ReportDocument {
            title: "Award List".to_string(),
            groups: vec![ReportGroup {
                standard: "Standard 9".to_string(),
                rows: vec![ReportRow {
                    rank: 1,
                    student_name: "Ravi Dave".to_string(),
                    percentage: dec!(88.00),
                    village_name: "Savarkundla".to_string(),
                    contact_number: "9123456780".to_string(),
                }],
            }],
        };

        let bytes = render(&report).unwrap();
        // DOCX is an OOXML zip archive
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_report_still_renders() {
        let report = ReportDocument {
            title: "Empty".to_string(),
            groups: vec![],
        };
        assert!(!render(&report).unwrap().is_empty());
    }
}
