use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::core::error::{AppError, Result};
use crate::features::exports::dtos::ReportDocument;

/// Render the report as a single-sheet XLSX: title row, then a header
/// and data block per standard group with a blank row between groups.
pub fn render(report: &ReportDocument) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Toppers")
        .map_err(|e| AppError::Render(format!("Failed to build workbook: {}", e)))?;

    let mut line: u32 = 0;
    write(sheet.write_string_with_format(line, 0, &report.title, &bold))?;
    line += 2;

    for group in &report.groups {
        write(sheet.write_string_with_format(line, 0, &group.standard, &bold))?;
        line += 1;

        for (col, header) in ["Rank", "Student", "Percentage", "Village", "Contact"]
            .iter()
            .enumerate()
        {
            write(sheet.write_string_with_format(line, col as u16, *header, &bold))?;
        }
        line += 1;

        for row in &group.rows {
            write(sheet.write_number(line, 0, row.rank as f64))?;
            write(sheet.write_string(line, 1, &row.student_name))?;
            write(sheet.write_number(line, 2, row.percentage.to_f64().unwrap_or(0.0)))?;
            write(sheet.write_string(line, 3, &row.village_name))?;
            write(sheet.write_string(line, 4, &row.contact_number))?;
            line += 1;
        }
        line += 1;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| AppError::Render(format!("Failed to serialize XLSX: {}", e)))
}

fn write<T>(result: std::result::Result<T, rust_xlsxwriter::XlsxError>) -> Result<()> {
    result
        .map(|_| ())
        .map_err(|e| AppError::Render(format!("Failed to write workbook cell: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::exports::dtos::{ReportGroup, ReportRow};
    use rust_decimal_macros::dec;

    #[test]
    fn rendered_workbook_is_a_zip_container() {
        let report = ReportDocument {
            title: "Top Three Results".to_string(),
            groups: vec![ReportGroup {
                standard: "Standard 11".to_string(),
                rows: vec![
                    ReportRow {
                        rank: 1,
                        student_name: "Meera Joshi".to_string(),
                        percentage: dec!(96.20),
                        village_name: "Jafrabad".to_string(),
                        contact_number: "9765432100".to_string(),
                    },
                    ReportRow {
                        rank: 2,
                        student_name: "Kiran Vala".to_string(),
                        percentage: dec!(93.00),
                        village_name: "Rajula".to_string(),
                        contact_number: "9765432101".to_string(),
                    },
                ],
            }],
        };

        let bytes = render(&report).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
