//! File name canonicalisation
//!
//! Storage keys and the source names returned by the RAG API disagree on
//! casing, separators and whether the `.pdf` extension is present. Both sides
//! are reduced to the same canonical form before they are compared.

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_\s]+").unwrap());

const PDF_EXTENSION: &str = ".pdf";

/// Canonicalise a file name for fuzzy matching.
///
/// Lowercases, removes every run of `-`, `_` and whitespace, and strips a
/// trailing `.pdf`. Total over all strings and idempotent.
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut canonical = SEPARATORS.replace_all(&lowered, "").into_owned();

    // Stripping repeatedly keeps the function idempotent for names like "a.pdf.pdf".
    while let Some(stripped) = canonical.strip_suffix(PDF_EXTENSION) {
        canonical.truncate(stripped.len());
    }

    canonical.trim().to_string()
}

/// Bidirectional containment check between two already-normalised names
pub fn names_match(normalized_file: &str, normalized_source: &str) -> bool {
    normalized_file.contains(normalized_source) || normalized_source.contains(normalized_file)
}

/// Last path component of a storage key
pub fn base_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// File name without directories or extension, as the RAG API expects it.
///
/// `"folder/sub/Exam Review.pdf"` becomes `"Exam Review"`. The extension is
/// the last `.` followed by at least one character, so `"archive."` is kept
/// whole and `".hidden"` becomes `""`. A key ending in `/` is returned as is.
pub fn extract_file_name(key: &str) -> String {
    let file_name = match base_name(key) {
        "" => key,
        name => name,
    };
    match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() && !file_name[idx..].contains('/') => {
            file_name[..idx].to_string()
        }
        _ => file_name.to_string(),
    }
}
