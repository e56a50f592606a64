//! Text normalization used for search and logo matching

use deunicode::deunicode;

/// Fold a name into its accent-free, lowercase, trimmed form.
///
/// "Rai Sport HD " and "RAI SPÓRT hd" normalize to the same key.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    deunicode(text).to_lowercase().trim().to_string()
}
