//! Request inputs: user stories and uploaded documents

use std::fmt;
use std::path::{Path, PathBuf};

/// Document formats the extractor can turn into plain text
///
/// Dispatch is purely on the file extension, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format (`.pdf`)
    Pdf,

    /// Office Open XML word processing document (`.docx`)
    Docx,

    /// UTF-8 plain text (`.txt`)
    Txt,
}

impl DocumentFormat {
    /// All supported formats, in the order they are advertised
    pub const ALL: [DocumentFormat; 3] = [DocumentFormat::Pdf, DocumentFormat::Docx, DocumentFormat::Txt];

    /// Canonical extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }

    /// Resolve a format from an extension such as `".PDF"`, `"docx"` or `"txt"`
    ///
    /// # Examples
    ///
    /// ```
    /// use casegen_domain::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_extension(".PDF"), Some(DocumentFormat::Pdf));
    /// assert_eq!(DocumentFormat::from_extension("docx"), Some(DocumentFormat::Docx));
    /// assert_eq!(DocumentFormat::from_extension(".xyz"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim().trim_start_matches('.');
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }

    /// Comma-separated list of supported extensions, for error messages
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| format!(".{}", f.extension()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Extension of a path including the leading dot, or an empty string
///
/// Mirrors how the upload boundary reports extensions: `report.PDF` gives `".PDF"`.
pub fn extension_of(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

/// What a single generation request starts from
///
/// Created per request and discarded once the pipeline completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    /// A natural-language user story
    UserStory(String),

    /// A document already persisted by the upload collaborator
    DocumentFile {
        /// Location of the file on disk
        path: PathBuf,
        /// Extension as reported by the uploader (e.g. `".pdf"`)
        extension: String,
    },
}

impl SourceInput {
    /// Build a `DocumentFile` input, taking the extension from the path itself
    pub fn document(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        SourceInput::DocumentFile { path, extension }
    }

    /// Build a `UserStory` input
    pub fn story(text: impl Into<String>) -> Self {
        SourceInput::UserStory(text.into())
    }
}
