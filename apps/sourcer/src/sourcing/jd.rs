//! Job description loading and chunking.
//!
//! Chunks are written out as an inspection artifact only; nothing in the
//! pipeline reads them back.

use std::path::Path;

use crate::errors::AppError;

/// Default chunk window, in characters.
pub const CHUNK_SIZE: usize = 500;
/// Overlap carried between consecutive chunks, in characters.
pub const CHUNK_OVERLAP: usize = 50;

/// Loads the job description text from a file.
pub fn load_jd(path: &Path) -> Result<String, AppError> {
    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Job description file '{}' is empty",
            path.display()
        )));
    }
    Ok(text)
}

/// Splits the job description into overlapping character windows.
/// Boundaries are character-based, so multi-byte text never splits mid-char.
pub fn split_jd(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_short_text_is_single_chunk() {
        let chunks = split_jd("short text", CHUNK_SIZE, CHUNK_OVERLAP);
        assert_eq!(chunks, vec!["short text".to_string()]);
    }

    #[test]
    fn test_split_empty_text_yields_no_chunks() {
        assert!(split_jd("", CHUNK_SIZE, CHUNK_OVERLAP).is_empty());
    }

    #[test]
    fn test_split_chunks_overlap() {
        let text = "abcdefghij";
        let chunks = split_jd(text, 4, 2);
        assert_eq!(chunks[0], "abcd");
        assert_eq!(chunks[1], "cdef");
        // Every chunk except possibly the last is full-size
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 4);
        }
        // Last chunk ends at the end of the text
        assert!(text.ends_with(chunks.last().unwrap().as_str()));
    }

    #[test]
    fn test_split_handles_multibyte_text() {
        let text = "héllo wörld — ünïcode".repeat(50);
        let chunks = split_jd(&text, CHUNK_SIZE, CHUNK_OVERLAP);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= CHUNK_SIZE);
        }
    }

    #[test]
    fn test_load_jd_rejects_missing_file() {
        let err = load_jd(Path::new("/nonexistent/jd.txt"));
        assert!(matches!(err, Err(AppError::Io(_))));
    }
}
