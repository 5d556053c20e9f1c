//! Catalog Enumerator: read the landing page into section descriptors.

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

use crate::catalog::js_string;
use crate::catalog::types::SectionDescriptor;
use crate::renderer::RenderContext;
use crate::site::SiteProfile;

const NAV_TIMEOUT_MS: u64 = 30_000;

/// Raw catalog entry as collected from the page.
#[derive(Debug, Deserialize)]
struct RawSection {
    title: String,
    #[serde(rename = "countText")]
    count_text: String,
    url: String,
}

/// Enumerate the catalog's sections in DOM order.
///
/// Either the whole listing parses or the call fails; an empty catalog is a
/// valid empty result. A count cell with no leading integer is a defect in
/// the source page and propagates as an error.
pub async fn enumerate_sections(
    ctx: &mut dyn RenderContext,
    site: &SiteProfile,
) -> Result<Vec<SectionDescriptor>> {
    ctx.navigate(&site.base_url, NAV_TIMEOUT_MS)
        .await
        .context("opening catalog root")?;

    let value = ctx
        .execute_js(&collect_sections_script(site))
        .await
        .context("collecting catalog entries")?;
    debug!("catalog listing returned {value}");

    parse_sections(value)
}

/// Script returning `[{title, countText, url}]` for every catalog entry.
fn collect_sections_script(site: &SiteProfile) -> String {
    format!(
        r#"(() => {{
            const __harvest_sections = [];
            document.querySelectorAll({entry}).forEach((el) => {{
                const title = el.querySelector("p:nth-child(1)");
                const count = el.querySelector("p:nth-child(2)");
                __harvest_sections.push({{
                    title: title ? title.innerText : "",
                    countText: count ? count.innerText : "",
                    url: el.href,
                }});
            }});
            return __harvest_sections;
        }})()"#,
        entry = js_string(&site.section_entry_selector),
    )
}

/// Parse the collected JSON into ordered descriptors.
fn parse_sections(value: serde_json::Value) -> Result<Vec<SectionDescriptor>> {
    let raw: Vec<RawSection> =
        serde_json::from_value(value).context("catalog listing has unexpected shape")?;

    raw.into_iter()
        .map(|entry| {
            let count = leading_int(&entry.count_text).with_context(|| {
                format!(
                    "section \"{}\" has a non-numeric component count: {:?}",
                    entry.title, entry.count_text
                )
            })?;
            Ok(SectionDescriptor::new(entry.title, count, entry.url))
        })
        .collect()
}

/// Parse the leading integer of a text like `"12 components"`.
fn leading_int(text: &str) -> Result<u32> {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    let re = LEADING.get_or_init(|| Regex::new(r"^\s*(\d+)").expect("count regex is valid"));

    let Some(caps) = re.captures(text) else {
        bail!("no leading integer in {text:?}");
    };
    caps[1]
        .parse::<u32>()
        .with_context(|| format!("component count out of range in {text:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("12 components").unwrap(), 12);
        assert_eq!(leading_int("  8 components").unwrap(), 8);
        assert_eq!(leading_int("0").unwrap(), 0);
        assert!(leading_int("a dozen components").is_err());
        assert!(leading_int("").is_err());
    }

    #[test]
    fn test_parse_sections_preserves_order() {
        let value = json!([
            { "title": "Buttons", "countText": "12 components", "url": "https://x.test/c/buttons" },
            { "title": "Forms", "countText": "8 components", "url": "https://x.test/c/forms" },
        ]);

        let sections = parse_sections(value).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Buttons");
        assert_eq!(sections[0].components_count, 12);
        assert_eq!(sections[0].url, "https://x.test/c/buttons");
        assert!(sections[0].components.is_empty());
        assert_eq!(sections[1].title, "Forms");
        assert_eq!(sections[1].components_count, 8);
    }

    #[test]
    fn test_parse_sections_empty_catalog_is_valid() {
        let sections = parse_sections(json!([])).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_parse_sections_bad_count_fails_whole_listing() {
        let value = json!([
            { "title": "Buttons", "countText": "12 components", "url": "https://x.test/c/buttons" },
            { "title": "Forms", "countText": "soon", "url": "https://x.test/c/forms" },
        ]);

        let err = parse_sections(value).unwrap_err();
        assert!(err.to_string().contains("Forms"));
    }

    #[test]
    fn test_collect_script_embeds_selector() {
        let site = crate::site::SiteProfile::tailwind();
        let script = collect_sections_script(&site);
        assert!(script.contains("__harvest_sections"));
        assert!(script.contains(r#"#components [href^=\"/components\"]"#));
    }
}
