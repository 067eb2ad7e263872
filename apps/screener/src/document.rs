//! Document text extraction for resumes and job descriptions.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extracted text shorter than this (after trimming) is treated as unreadable.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to extract PDF text: {0}")]
    Pdf(String),

    #[error("unsupported document type: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("extracted text too short ({chars} chars)")]
    TooShort { chars: usize },

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Reads text from a `.pdf`, `.txt` or `.md` file and checks it is long enough.
pub fn text_from_document(path: &Path) -> Result<String, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let text = match extension.as_deref() {
        Some("pdf") => pdf_extract::extract_text(path)
            .map_err(|e| DocumentError::Pdf(format!("{}: {e}", path.display())))?,
        Some("txt") | Some("md") => {
            std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => return Err(DocumentError::Unsupported(path.to_path_buf())),
    };

    ensure_viable(&text)?;
    Ok(text)
}

/// Extracts text from an in-memory PDF, e.g. an uploaded file.
pub fn text_from_pdf_bytes(bytes: &[u8]) -> Result<String, DocumentError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?;
    ensure_viable(&text)?;
    Ok(text)
}

/// Async wrapper that keeps PDF parsing off the runtime threads.
/// A panic inside the extractor surfaces as `DocumentError::Task`.
pub async fn read_document(path: PathBuf) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || text_from_document(&path))
        .await
        .map_err(|e| DocumentError::Task(e.to_string()))?
}

pub async fn read_pdf_bytes(bytes: Vec<u8>) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || text_from_pdf_bytes(&bytes))
        .await
        .map_err(|e| DocumentError::Task(e.to_string()))?
}

/// Rejects text too short to be a real document.
pub fn ensure_viable(text: &str) -> Result<&str, DocumentError> {
    let chars = text.trim().chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(DocumentError::TooShort { chars });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RESUME_TEXT: &str = "Alex Kim\nSenior Data Engineer\nSkills: Python, SQL, Airflow, dbt, GCP\n\
        Built batch pipelines processing 2TB/day.";

    fn temp_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_reads_plain_text() {
        let file = temp_file(".txt", RESUME_TEXT.as_bytes());
        assert_eq!(text_from_document(file.path()).unwrap(), RESUME_TEXT);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let file = temp_file(".TXT", RESUME_TEXT.as_bytes());
        assert!(text_from_document(file.path()).is_ok());
    }

    #[test]
    fn test_short_text_is_rejected() {
        let file = temp_file(".txt", b"  Alex Kim, engineer  ");
        let err = text_from_document(file.path()).unwrap_err();
        assert!(matches!(err, DocumentError::TooShort { chars: 18 }));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = temp_file(".docx", RESUME_TEXT.as_bytes());
        assert!(matches!(
            text_from_document(file.path()),
            Err(DocumentError::Unsupported(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = text_from_document(Path::new("/nonexistent/resume.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/resume.txt"));
    }

    #[test]
    fn test_ensure_viable_boundary() {
        let exactly = "a".repeat(MIN_TEXT_CHARS);
        assert!(ensure_viable(&exactly).is_ok());
        let short = "a".repeat(MIN_TEXT_CHARS - 1);
        assert!(ensure_viable(&short).is_err());
        assert!(ensure_viable("").is_err());
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_an_error() {
        let file = temp_file(".pdf", b"%PDF-1.4 this is not really a pdf");
        assert!(read_document(file.path().to_path_buf()).await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_pdf_bytes_is_an_error() {
        assert!(read_pdf_bytes(b"not a pdf at all".to_vec()).await.is_err());
    }
}
