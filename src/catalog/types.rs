//! Data model for the harvested catalog.
//!
//! These structs serialize verbatim into the output payload, so field
//! renames here are the output contract.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Code flavor captured for every component in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Plain markup.
    Html,
    /// React component syntax.
    React,
    /// Vue component syntax.
    Vue,
}

impl Variant {
    /// Lowercase token used in selectors, output keys, and file names.
    pub fn token(&self) -> &'static str {
        match self {
            Variant::Html => "html",
            Variant::React => "react",
            Variant::Vue => "vue",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// One extracted component: its display title and snippet text keyed by
/// variant token. Exactly one key per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub title: String,
    pub codeblocks: BTreeMap<String, String>,
}

impl ComponentRecord {
    pub fn new(title: impl Into<String>, variant: Variant, code: impl Into<String>) -> Self {
        let mut codeblocks = BTreeMap::new();
        codeblocks.insert(variant.token().to_string(), code.into());
        Self {
            title: title.into(),
            codeblocks,
        }
    }
}

/// One catalog section: created by enumeration, filled in once by the
/// driver after extraction. Identity is `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub title: String,
    #[serde(rename = "componentsCount")]
    pub components_count: u32,
    pub url: String,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

impl SectionDescriptor {
    pub fn new(title: impl Into<String>, components_count: u32, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            components_count,
            url: url.into(),
            components: Vec::new(),
        }
    }
}

/// The terminal artifact: sections in enumeration order, written verbatim.
pub type RunResult = Vec<SectionDescriptor>;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;

    #[test]
    fn test_variant_tokens() {
        assert_eq!(Variant::Html.token(), "html");
        assert_eq!(Variant::React.to_string(), "react");
        assert_eq!(Variant::Vue.token(), "vue");
    }

    #[test]
    fn test_component_record_single_key() {
        let rec = ComponentRecord::new("Simple card", Variant::React, "<Card />");
        assert_eq!(rec.codeblocks.len(), 1);
        assert_eq!(rec.codeblocks.get("react").unwrap(), "<Card />");
    }

    #[test]
    fn test_section_serializes_with_camel_case_count() {
        let mut section = SectionDescriptor::new("Buttons", 12, "https://x.test/c/buttons");
        section
            .components
            .push(ComponentRecord::new("Primary", Variant::Html, "<button>"));

        let json = serde_json::to_value(&section).unwrap();
        assert_json_eq!(
            json,
            serde_json::json!({
                "title": "Buttons",
                "componentsCount": 12,
                "url": "https://x.test/c/buttons",
                "components": [
                    { "title": "Primary", "codeblocks": { "html": "<button>" } }
                ]
            })
        );
    }

    #[test]
    fn test_run_result_round_trip() {
        let result: RunResult = vec![
            SectionDescriptor::new("Buttons", 12, "https://x.test/c/buttons"),
            SectionDescriptor::new("Forms", 8, "https://x.test/c/forms"),
        ];
        let text = serde_json::to_string(&result).unwrap();
        let parsed: RunResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(parsed[0].components_count, 12);
        assert_eq!(parsed[1].components_count, 8);
    }
}
