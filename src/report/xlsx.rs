// ABOUTME: Spreadsheet document writer backed by rust_xlsxwriter
// ABOUTME: Writes a bold header row followed by one row per record

use super::{write_atomically, Cell, DocumentWriter, Table};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Writes tables as `.xlsx` workbooks with a single worksheet
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    fn build(table: &Table) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();

        for (col, name) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name.as_str(), &header)?;
        }

        for (i, cells) in table.rows.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Integer(n) => {
                        worksheet.write_number(row, col, *n as f64)?;
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(row, col, s.as_str())?;
                    }
                }
            }
        }

        worksheet.autofit();

        Ok(workbook)
    }
}

impl DocumentWriter for XlsxWriter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let mut workbook = Self::build(table)
            .with_context(|| format!("Failed to build workbook '{}'", table.title))?;

        write_atomically(path, |file| {
            workbook
                .save_to_writer(file)
                .with_context(|| format!("Excel save error for {}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.xlsx");
        let table = Table {
            title: "Projects".to_string(),
            columns: vec!["ID".to_string(), "Name".to_string()],
            rows: vec![vec![Cell::Integer(1), Cell::Text("Mobile API Gateway".to_string())]],
        };

        XlsxWriter.write(&table, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }
}
