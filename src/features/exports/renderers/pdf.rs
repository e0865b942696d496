use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::core::error::{AppError, Result};
use crate::features::exports::dtos::ReportDocument;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const LINE_HEIGHT_MM: f32 = 7.0;

// x positions of the table columns (A4, left margin 18mm)
const COL_RANK: f32 = MARGIN_MM;
const COL_NAME: f32 = 32.0;
const COL_PERCENT: f32 = 104.0;
const COL_VILLAGE: f32 = 130.0;
const COL_CONTACT: f32 = 168.0;

/// Render the report as a single PDF: title, then one table per
/// standard group, flowing onto new pages as needed.
pub fn render(report: &ReportDocument) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        &report.title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(format!("Failed to load PDF font: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Render(format!("Failed to load PDF font: {}", e)))?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    current.use_text(&report.title, 16.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= 2.0 * LINE_HEIGHT_MM;

    for group in &report.groups {
        // Heading plus header row must fit together
        if y < MARGIN_MM + 3.0 * LINE_HEIGHT_MM {
            (current, y) = new_page(&doc);
        }

        current.use_text(&group.standard, 13.0, Mm(MARGIN_MM), Mm(y), &bold);
        y -= LINE_HEIGHT_MM;
        write_header(&current, y, &bold);
        y -= LINE_HEIGHT_MM;

        for row in &group.rows {
            if y < MARGIN_MM {
                (current, y) = new_page(&doc);
                write_header(&current, y, &bold);
                y -= LINE_HEIGHT_MM;
            }
            current.use_text(row.rank.to_string(), 11.0, Mm(COL_RANK), Mm(y), &regular);
            current.use_text(&row.student_name, 11.0, Mm(COL_NAME), Mm(y), &regular);
            current.use_text(
                format!("{:.2}", row.percentage),
                11.0,
                Mm(COL_PERCENT),
                Mm(y),
                &regular,
            );
            current.use_text(&row.village_name, 11.0, Mm(COL_VILLAGE), Mm(y), &regular);
            current.use_text(&row.contact_number, 11.0, Mm(COL_CONTACT), Mm(y), &regular);
            y -= LINE_HEIGHT_MM;
        }
        y -= LINE_HEIGHT_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Render(format!("Failed to serialize PDF: {}", e)))
}

fn new_page(doc: &printpdf::PdfDocumentReference) -> (PdfLayerReference, f32) {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
    (
        doc.get_page(page).get_layer(layer),
        PAGE_HEIGHT_MM - MARGIN_MM,
    )
}

fn write_header(layer: &PdfLayerReference, y: f32, font: &IndirectFontRef) {
    layer.use_text("Rank", 11.0, Mm(COL_RANK), Mm(y), font);
    layer.use_text("Student", 11.0, Mm(COL_NAME), Mm(y), font);
    layer.use_text("Percentage", 11.0, Mm(COL_PERCENT), Mm(y), font);
    layer.use_text("Village", 11.0, Mm(COL_VILLAGE), Mm(y), font);
    layer.use_text("Contact", 11.0, Mm(COL_CONTACT), Mm(y), font);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::exports::dtos::{ReportGroup, ReportRow};
    use rust_decimal_macros::dec;

    #[test]
    fn rendered_pdf_has_pdf_magic_bytes() {
        let report = ReportDocument {
            title: "Top Three Results 2026".to_string(),
            groups: vec![ReportGroup {
                standard: "Standard 10".to_string(),
                rows: vec![ReportRow {
                    rank: 1,
                    student_name: "Asha Patel".to_string(),
                    percentage: dec!(92.40),
                    village_name: "Amreli".to_string(),
                    contact_number: "9876543210".to_string(),
                }],
            }],
        };

        let bytes = render(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn many_rows_spill_onto_additional_pages() {
        let rows: Vec<ReportRow> = (1..=120)
            .map(|i| ReportRow {
                rank: i,
                student_name: format!("Student {}", i),
                percentage: dec!(75.00),
                village_name: "Rajula".to_string(),
                contact_number: "9000000000".to_string(),
            })
            .collect();
        let report = ReportDocument {
            title: "Full List".to_string(),
            groups: vec![ReportGroup {
                standard: "Standard 12".to_string(),
                rows,
            }],
        };

        let bytes = render(&report).unwrap();
        assert!(!bytes.is_empty());
    }
}
