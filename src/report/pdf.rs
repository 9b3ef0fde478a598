// ABOUTME: PDF document writer backed by printpdf
// ABOUTME: Lays out a titled, bordered table on A4 pages using built-in Helvetica

use super::{write_atomically, DocumentWriter, Table};
use anyhow::{anyhow, Context, Result};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use std::io::{BufWriter, Write};
use std::path::Path;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 20.0;
const CELL_WIDTH: f32 = 40.0;
const ROW_HEIGHT: f32 = 10.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const LAYER: &str = "Layer 1";

/// Writes tables as A4 portrait PDFs
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

struct Fonts {
    bold: IndirectFontRef,
    regular: IndirectFontRef,
}

/// Cursor over the page currently being filled; `y` is the top edge of the
/// next row, measured from the bottom of the page.
struct PageCursor {
    layer: PdfLayerReference,
    y: f32,
}

impl PdfWriter {
    fn render(table: &Table) -> Result<PdfDocumentReference> {
        let (doc, page, layer) =
            PdfDocument::new(table.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let fonts = Fonts {
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| anyhow!("Failed to load Helvetica-Bold: {}", e))?,
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| anyhow!("Failed to load Helvetica: {}", e))?,
        };

        let layer = doc.get_page(page).get_layer(layer);
        let title_baseline = PAGE_HEIGHT - MARGIN - 7.0;
        layer.use_text(
            table.title.as_str(),
            TITLE_SIZE,
            Mm(MARGIN),
            Mm(title_baseline),
            &fonts.bold,
        );

        let mut cursor = PageCursor {
            layer,
            y: PAGE_HEIGHT - MARGIN - 12.0,
        };

        let header: Vec<String> = table.columns.clone();
        draw_row(&cursor, &header, &fonts.bold);
        cursor.y -= ROW_HEIGHT;

        for cells in &table.rows {
            if cursor.y - ROW_HEIGHT < BOTTOM_MARGIN {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
                cursor = PageCursor {
                    layer: doc.get_page(page).get_layer(layer),
                    y: PAGE_HEIGHT - MARGIN,
                };
                draw_row(&cursor, &header, &fonts.bold);
                cursor.y -= ROW_HEIGHT;
            }

            let values: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
            draw_row(&cursor, &values, &fonts.regular);
            cursor.y -= ROW_HEIGHT;
        }

        Ok(doc)
    }
}

fn draw_row(cursor: &PageCursor, values: &[String], font: &IndirectFontRef) {
    let top = cursor.y;
    let bottom = top - ROW_HEIGHT;

    for (i, value) in values.iter().enumerate() {
        let left = MARGIN + i as f32 * CELL_WIDTH;
        let right = left + CELL_WIDTH;

        cursor.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(left), Mm(top)), false),
                (Point::new(Mm(right), Mm(top)), false),
                (Point::new(Mm(right), Mm(bottom)), false),
                (Point::new(Mm(left), Mm(bottom)), false),
            ],
            is_closed: true,
        });
        cursor
            .layer
            .use_text(value.as_str(), BODY_SIZE, Mm(left + 1.5), Mm(bottom + 3.5), font);
    }
}

impl DocumentWriter for PdfWriter {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let doc = Self::render(table)
            .with_context(|| format!("Failed to render PDF '{}'", table.title))?;

        write_atomically(path, |file| {
            let mut out = BufWriter::new(file);
            doc.save(&mut out)
                .map_err(|e| anyhow!("Failed to save PDF {}: {}", path.display(), e))?;
            out.flush()
                .with_context(|| format!("Failed to flush {}", path.display()))
        })
    }
}
