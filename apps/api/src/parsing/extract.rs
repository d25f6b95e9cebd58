//! Raw text extraction from uploaded documents.
//!
//! Plain text is decoded as lossy UTF-8. Word documents are read from the
//! `word/document.xml` part of the OOXML package, one output line per paragraph.
//! PDF extraction is gated: when disabled the upload yields a fixed advisory text.

use std::io::{Cursor, Read};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const PDF_ADVISORY: &str = "PDF parsing is currently under maintenance. Please upload a Word document or text file for best results. If you need to use a PDF, please convert it to a Word document first.";

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),

    #[error("document package could not be opened: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("document body could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf text extraction failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Dispatches on the text after the last `.` of the file name, case-insensitive.
    pub fn from_file_name(file_name: &str) -> Result<Self, ParseError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "doc" => Ok(DocumentFormat::Doc),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(ParseError::UnsupportedFormat(extension)),
        }
    }
}

/// Extracts the raw text of an uploaded document.
pub fn extract_text(
    file_name: &str,
    bytes: &[u8],
    pdf_extraction: bool,
) -> Result<String, ParseError> {
    match DocumentFormat::from_file_name(file_name)? {
        DocumentFormat::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DocumentFormat::Docx | DocumentFormat::Doc => extract_word_text(bytes),
        DocumentFormat::Pdf if pdf_extraction => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ParseError::Pdf(e.to_string())),
        DocumentFormat::Pdf => Ok(PDF_ADVISORY.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Word (OOXML)
// ────────────────────────────────────────────────────────────────────────────

lazy_static! {
    static ref XML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#(x[0-9A-Fa-f]+|[0-9]+);").unwrap();
}

fn extract_word_text(bytes: &[u8]) -> Result<String, ParseError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    Ok(document_xml_to_text(&xml))
}

/// Flattens WordprocessingML into text. Runs are concatenated inside a paragraph,
/// tabs and breaks keep their meaning, every paragraph ends a line.
pub fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    let mut in_run_text = false;
    let mut cursor = 0;

    for tag in XML_TAG.find_iter(xml) {
        if in_run_text {
            text.push_str(&decode_entities(&xml[cursor..tag.start()]));
        }
        cursor = tag.end();

        let raw = tag.as_str();
        let closing = raw.starts_with("</");
        let self_closing = raw.ends_with("/>");
        match (tag_name(raw), closing, self_closing) {
            ("w:t", false, false) => in_run_text = true,
            ("w:t", true, _) => in_run_text = false,
            ("w:tab", false, _) => text.push('\t'),
            ("w:br" | "w:cr", false, _) => text.push('\n'),
            ("w:p", true, _) | ("w:p", false, true) => text.push('\n'),
            _ => {}
        }
    }

    text.trim_end_matches('\n').to_string()
}

fn tag_name(tag: &str) -> &str {
    let inner = tag.trim_start_matches('<').trim_start_matches('/');
    let end = inner
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    &inner[..end]
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let decoded = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    decoded
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_file_name("CV.DOCX").unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_file_name("my.resume.txt").unwrap(),
            DocumentFormat::Txt
        );
        assert!(matches!(
            DocumentFormat::from_file_name("resume.rtf"),
            Err(ParseError::UnsupportedFormat(ext)) if ext == "rtf"
        ));
        assert!(matches!(
            DocumentFormat::from_file_name("resume"),
            Err(ParseError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_plain_text_is_lossy_utf8() {
        let text = extract_text("cv.txt", b"Jane Doe\n\xffDesigner", false).unwrap();
        assert_eq!(text, "Jane Doe\n\u{FFFD}Designer");
    }

    #[test]
    fn test_pdf_returns_advisory_when_extraction_disabled() {
        let text = extract_text("cv.pdf", b"%PDF-1.4 not really", false).unwrap();
        assert_eq!(text, PDF_ADVISORY);
    }

    #[test]
    fn test_garbage_pdf_fails_when_extraction_enabled() {
        let result = extract_text("cv.pdf", b"definitely not a pdf", true);
        assert!(matches!(result, Err(ParseError::Pdf(_))));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let bytes = docx_with_body(
            r#"<w:p><w:r><w:t>Jane </w:t></w:r><w:r><w:t xml:space="preserve">Doe</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Design &amp; Layout</w:t></w:r></w:p>"#,
        );
        let text = extract_text("cv.docx", &bytes, false).unwrap();
        assert_eq!(text, "Jane Doe\n\nSkills\tDesign & Layout");
    }

    #[test]
    fn test_table_tags_are_not_run_text() {
        let xml = r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#;
        assert_eq!(document_xml_to_text(xml), "Cell");
    }

    #[test]
    fn test_numeric_entities_decode() {
        let xml = r#"<w:p><w:r><w:t>Caf&#233; &#x2013; Bar</w:t></w:r></w:p>"#;
        assert_eq!(document_xml_to_text(xml), "Café – Bar");
    }

    #[test]
    fn test_line_breaks_inside_paragraph() {
        let xml = r#"<w:p><w:r><w:t>One</w:t><w:br/><w:t>Two</w:t></w:r></w:p>"#;
        assert_eq!(document_xml_to_text(xml), "One\nTwo");
    }

    #[test]
    fn test_unreadable_docx_fails() {
        let result = extract_text("cv.docx", b"not a zip archive", false);
        assert!(matches!(result, Err(ParseError::Package(_))));
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file("other.xml", options).unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(extract_text("cv.docx", &bytes, false).is_err());
    }
}
