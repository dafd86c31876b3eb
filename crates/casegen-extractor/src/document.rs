//! Plain text extraction from uploaded documents
//!
//! Dispatches on the file extension alone. Document structure (pages,
//! paragraphs, tables) is flattened into one text blob; formatting, headings
//! and images are dropped. Files are read, never deleted.

use crate::error::GenerationError;
use casegen_domain::DocumentFormat;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const UTF8_BOM: &str = "\u{feff}";

/// Extract the full text of the document at `path`
///
/// `extension` is matched case-insensitively, with or without a leading dot.
/// An unsupported extension fails before the file is touched.
///
/// # Errors
///
/// - `UnsupportedFormat` naming the rejected extension
/// - `DocumentRead` if the file cannot be read or decoded
/// - `InvalidEncoding` if a `.txt` file is not UTF-8
/// - `EmptyDocument` if no text could be extracted
pub async fn extract(path: &Path, extension: &str) -> Result<String, GenerationError> {
    let format = DocumentFormat::from_extension(extension)
        .ok_or_else(|| GenerationError::UnsupportedFormat(extension.to_string()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| read_error(path, e))?;

    debug!("Read {} bytes from {} ({})", bytes.len(), path.display(), format);

    let text = match format {
        DocumentFormat::Txt => decode_utf8(path, bytes)?,
        DocumentFormat::Pdf => decode_blocking(path, bytes, pdf_text).await?,
        DocumentFormat::Docx => decode_blocking(path, bytes, docx_text).await?,
    };

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyDocument(path.to_path_buf()));
    }

    info!(
        "Extracted {} chars from {} document {}",
        text.chars().count(),
        format,
        path.display()
    );

    Ok(text)
}

fn read_error(path: &Path, reason: impl std::fmt::Display) -> GenerationError {
    GenerationError::DocumentRead {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn decode_utf8(path: &Path, bytes: Vec<u8>) -> Result<String, GenerationError> {
    let text = String::from_utf8(bytes)
        .map_err(|_| GenerationError::InvalidEncoding(path.to_path_buf()))?;

    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Run a CPU-bound decoder off the async worker threads
async fn decode_blocking(
    path: &Path,
    bytes: Vec<u8>,
    decoder: fn(&[u8]) -> Result<String, String>,
) -> Result<String, GenerationError> {
    let owned: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || decoder(&bytes))
        .await
        .map_err(|e| read_error(&owned, format!("decoder task failed: {}", e)))?
        .map_err(|reason| read_error(&owned, reason))
}

/// Concatenated text of every page, one page per block
fn pdf_text(bytes: &[u8]) -> Result<String, String> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| format!("Failed to load PDF: {}", e))?;

    if document.is_encrypted() {
        return Err("PDF is encrypted".to_string());
    }

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    pages.push(trimmed.to_string());
                }
            }
            Err(e) => warn!("Skipping PDF page {}: {}", page_number, e),
        }
    }

    Ok(pages.join("\n\n"))
}

/// Raw text of a `.docx`: paragraphs separated by blank lines, table rows
/// flattened to `cell | cell`
fn docx_text(bytes: &[u8]) -> Result<String, String> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| format!("Failed to parse DOCX: {}", e))?;

    let mut blocks = Vec::new();
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(paragraph) => {
                let text = paragraph_text(paragraph);
                if !text.trim().is_empty() {
                    blocks.push(text);
                }
            }
            docx_rs::DocumentChild::Table(table) => table_rows(table, &mut blocks),
            _ => {}
        }
    }

    Ok(blocks.join("\n\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        paragraph_child_text(child, &mut buffer);
    }
    buffer
}

fn paragraph_child_text(child: &docx_rs::ParagraphChild, buffer: &mut String) {
    match child {
        docx_rs::ParagraphChild::Run(run) => run_text(run, buffer),
        docx_rs::ParagraphChild::Hyperlink(link) => {
            for link_child in &link.children {
                paragraph_child_text(link_child, buffer);
            }
        }
        docx_rs::ParagraphChild::Insert(insert) => {
            for insert_child in &insert.children {
                if let docx_rs::InsertChild::Run(run) = insert_child {
                    run_text(run, buffer);
                }
            }
        }
        _ => {}
    }
}

fn run_text(run: &docx_rs::Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text) => buffer.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => buffer.push('\t'),
            docx_rs::RunChild::Break(_) => buffer.push('\n'),
            _ => {}
        }
    }
}

fn table_rows(table: &docx_rs::Table, blocks: &mut Vec<String>) {
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row;
        let mut cells = Vec::new();
        for cell in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell;
            let text = cell_text(cell);
            if !text.trim().is_empty() {
                cells.push(text);
            }
        }
        if !cells.is_empty() {
            blocks.push(cells.join(" | "));
        }
    }
}

fn cell_text(cell: &docx_rs::TableCell) -> String {
    let mut parts = Vec::new();
    for content in &cell.children {
        match content {
            docx_rs::TableCellContent::Paragraph(paragraph) => {
                let text = paragraph_text(paragraph);
                if !text.trim().is_empty() {
                    parts.push(text);
                }
            }
            docx_rs::TableCellContent::Table(table) => {
                let mut nested = Vec::new();
                table_rows(table, &mut nested);
                if !nested.is_empty() {
                    parts.push(nested.join(" "));
                }
            }
            _ => {}
        }
    }
    parts.join(" ")
}


#[cfg(test)]
mod tests {
    use super::fixtures::{write_docx, write_pdf};
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_extract_txt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stories.txt");
        std::fs::write(&path, "As a user, I want to log in.").unwrap();

        let text = extract(&path, ".txt").await.unwrap();
        assert_eq!(text, "As a user, I want to log in.");
    }

    #[tokio::test]
    async fn test_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("STORIES.TXT");
        std::fs::write(&path, "As an admin, I want reports.").unwrap();

        let text = extract(&path, ".TXT").await.unwrap();
        assert!(text.contains("admin"));
    }

    #[tokio::test]
    async fn test_txt_bom_is_stripped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.txt");
        std::fs::write(&path, "\u{feff}Story text").unwrap();

        assert_eq!(extract(&path, "txt").await.unwrap(), "Story text");
    }

    #[tokio::test]
    async fn test_unsupported_extension_does_not_read_file() {
        // The file does not exist; the extension check must fail first
        let result = extract(Path::new("/nonexistent/upload.xyz"), ".xyz").await;
        match result {
            Err(GenerationError::UnsupportedFormat(ext)) => assert_eq!(ext, ".xyz"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_legacy_doc_is_unsupported() {
        let result = extract(Path::new("/nonexistent/spec.doc"), ".doc").await;
        assert!(matches!(result, Err(GenerationError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = extract(Path::new("/nonexistent/stories.txt"), ".txt").await;
        assert!(matches!(result, Err(GenerationError::DocumentRead { .. })));
    }

    #[tokio::test]
    async fn test_empty_txt_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\t\n").unwrap();

        let result = extract(&path, ".txt").await;
        assert!(matches!(result, Err(GenerationError::EmptyDocument(_))));
    }

    #[tokio::test]
    async fn test_invalid_utf8_txt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe, 0x6f]).unwrap();

        let result = extract(&path, ".txt").await;
        assert!(matches!(result, Err(GenerationError::InvalidEncoding(_))));
    }

    #[tokio::test]
    async fn test_extract_docx() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stories.docx");
        write_docx(
            &path,
            &[
                "As a user, I want to reset my password.",
                "As an admin, I want to lock accounts.",
            ],
        );

        let text = extract(&path, ".docx").await.unwrap();
        assert!(text.contains("reset my password"));
        assert!(text.contains("lock accounts"));
        assert!(text.find("reset").unwrap() < text.find("lock").unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_docx() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let result = extract(&path, ".docx").await;
        assert!(matches!(result, Err(GenerationError::DocumentRead { .. })));
    }

    #[tokio::test]
    async fn test_extract_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stories.pdf");
        write_pdf(&path, "As a user I want a password reset");

        let text = extract(&path, ".pdf").await.unwrap();
        assert!(text.contains("password reset"));
    }

    #[tokio::test]
    async fn test_corrupt_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4 truncated").unwrap();

        let result = extract(&path, ".pdf").await;
        assert!(matches!(
            result,
            Err(GenerationError::DocumentRead { .. }) | Err(GenerationError::EmptyDocument(_))
        ));
    }
}
