use lopdf::{Document, Object, Stream, dictionary};

const LEFT: f64 = 72.0;
const TOP: f64 = 760.0;
const LINE_HEIGHT: f64 = 20.0;
const COLUMN_WIDTH: f64 = 150.0;
const ROW_HEIGHT: f64 = 24.0;

/// Something drawn on a fixture page, top to bottom.
pub enum Block<'a> {
    /// A free-standing line of text.
    Text(&'a str),
    /// A table ruled on every cell edge; the first row is the header.
    Grid(&'a [&'a [&'a str]]),
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

fn page_content(blocks: &[Block<'_>]) -> String {
    let mut content = String::from("1 w\n");
    let mut y = TOP;

    for block in blocks {
        match block {
            Block::Text(text) => {
                content.push_str(&format!(
                    "BT /F1 10 Tf {LEFT} {y} Td ({}) Tj ET\n",
                    escape(text)
                ));
                y -= LINE_HEIGHT;
            }
            Block::Grid(rows) => {
                let columns = rows.iter().map(|row| row.len()).max().unwrap_or(0);
                let right = LEFT + COLUMN_WIDTH * columns as f64;
                let bottom = y - ROW_HEIGHT * rows.len() as f64;

                for row in 0..=rows.len() {
                    let line_y = y - ROW_HEIGHT * row as f64;
                    content.push_str(&format!("{LEFT} {line_y} m {right} {line_y} l S\n"));
                }
                for column in 0..=columns {
                    let line_x = LEFT + COLUMN_WIDTH * column as f64;
                    content.push_str(&format!("{line_x} {y} m {line_x} {bottom} l S\n"));
                }
                for (row_index, row) in rows.iter().enumerate() {
                    for (column_index, cell) in row.iter().enumerate() {
                        if cell.is_empty() {
                            continue;
                        }
                        let text_x = LEFT + COLUMN_WIDTH * column_index as f64 + 5.0;
                        let text_y = y - ROW_HEIGHT * row_index as f64 - 16.0;
                        content.push_str(&format!(
                            "BT /F1 10 Tf {text_x} {text_y} Td ({}) Tj ET\n",
                            escape(cell)
                        ));
                    }
                }
                y = bottom - LINE_HEIGHT;
            }
        }
    }

    content
}

/// Builds a PDF with one page per entry of `pages`.
pub fn build_pdf(pages: &[&[Block<'_>]]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for blocks in pages {
        let stream = Stream::new(dictionary! {}, page_content(blocks).into_bytes());
        let content_id = doc.add_object(stream);
        kids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
            },
        }));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids.iter().map(|id| Object::from(*id)).collect::<Vec<_>>(),
            "Count" => i64::try_from(kids.len())?,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Three pages; only page 2 carries a table, and it mentions the keyword.
pub fn sewing_document() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    build_pdf(&[
        &[Block::Text("Cover page.")],
        &[
            Block::Text("Operation breakdown"),
            Block::Grid(&[&["Op", "Desc"], &["10", "Sewing Operation"]]),
        ],
        &[Block::Text("End of document.")],
    ])
}
