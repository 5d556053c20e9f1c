//! Catalog model, enumeration, and per-section component extraction.
//!
//! Page reads happen through small injected scripts that return plain JSON;
//! everything shape-sensitive (count parsing, policy decisions, ordering)
//! happens in Rust where it can be unit tested.

pub mod enumerate;
pub mod extract;
pub mod types;

pub use enumerate::enumerate_sections;
pub use extract::extract_components;
pub use types::{ComponentRecord, RunResult, SectionDescriptor, Variant};

/// Encode a string as a JavaScript string literal for script embedding.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s).expect("strings always encode as JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string(r#"a "b" \c"#), r#""a \"b\" \\c""#);
    }
}
