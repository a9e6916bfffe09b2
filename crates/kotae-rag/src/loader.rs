// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document loading for the retrieval corpus.
//!
//! PDF files are extracted via `pdf-extract`; everything else is read as
//! UTF-8 plain text.

use std::path::Path;

use kotae_core::KotaeError;
use tracing::info;

/// Reads the full text of a corpus document.
pub fn load_document(path: &Path) -> Result<String, KotaeError> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        pdf_extract::extract_text(path).map_err(|e| {
            KotaeError::provider(format!(
                "failed to extract PDF text from {}: {e}",
                path.display()
            ))
        })?
    } else {
        std::fs::read_to_string(path).map_err(|e| KotaeError::Provider {
            message: format!("failed to read document {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })?
    };

    info!(
        path = %path.display(),
        chars = text.chars().count(),
        "loaded corpus document"
    );

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_plain_text_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        write!(file, "Bitcoin: A Peer-to-Peer Electronic Cash System").unwrap();

        let text = load_document(file.path()).unwrap();
        assert!(text.contains("Peer-to-Peer"));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        // A .TXT path must not be routed through the PDF extractor.
        let mut file = tempfile::NamedTempFile::with_suffix(".TXT").unwrap();
        write!(file, "plain text").unwrap();
        assert_eq!(load_document(file.path()).unwrap(), "plain text");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_document(Path::new("/nonexistent/corpus.txt")).unwrap_err();
        assert!(matches!(err, KotaeError::Provider { .. }));
    }
}
