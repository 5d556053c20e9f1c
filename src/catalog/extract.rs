//! Component Extractor: walk one section page into component records.
//!
//! The page hides snippet text behind a variant selector and per-component
//! code toggles; extraction drives both before reading anything. A section
//! the account has no entitlement to simply never shows the variant
//! selector and is skipped, not failed.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::js_string;
use crate::catalog::types::{ComponentRecord, Variant};
use crate::config::MissingPolicy;
use crate::renderer::RenderContext;
use crate::site::SiteProfile;

const NAV_TIMEOUT_MS: u64 = 30_000;

/// Bounded wait for the variant selector; its absence is the legitimate
/// "no entitlement" signal, so this is the only deadline in extraction.
const ENTITLEMENT_PROBE_MS: u64 = 10_000;

/// Raw component as collected from the page; `code` is null when the
/// variant's code block is absent for that component.
#[derive(Debug, Deserialize)]
struct RawComponent {
    title: String,
    code: Option<String>,
}

/// Result of clicking the per-component code toggles.
#[derive(Debug, Deserialize)]
struct ToggleOutcome {
    toggled: u32,
    missing: u32,
}

/// Extract one section's components for the requested variant.
///
/// Returns an empty list when the account has no access to the section.
/// Leaves the context back at the catalog root on success.
pub async fn extract_components(
    ctx: &mut dyn RenderContext,
    site: &SiteProfile,
    section_url: &str,
    variant: Variant,
    missing_policy: MissingPolicy,
) -> Result<Vec<ComponentRecord>> {
    ctx.navigate(section_url, NAV_TIMEOUT_MS)
        .await
        .context("opening section page")?;

    // Entitlement probe: the selector control never renders for sections
    // the account did not purchase.
    let entitled = ctx
        .wait_for_selector(&site.variant_control_selector, Some(ENTITLEMENT_PROBE_MS))
        .await
        .context("probing for variant selector")?;
    if !entitled {
        warn!("no access to this section's components: {section_url}");
        return Ok(Vec::new());
    }

    // Switch every selector control to the requested variant and let the
    // page's own change handling re-render the dependent elements.
    ctx.execute_js(&set_variant_script(site, variant))
        .await
        .context("selecting variant")?;

    // Snippet text is empty until its code toggle has been activated.
    ctx.wait_for_selector(&site.code_toggle_selector, None)
        .await
        .context("waiting for code toggles")?;
    let toggles: ToggleOutcome = serde_json::from_value(
        ctx.execute_js(&toggle_code_script(site))
            .await
            .context("revealing code blocks")?,
    )
    .context("toggle outcome has unexpected shape")?;
    debug!(
        "revealed {} code blocks ({} components without a toggle)",
        toggles.toggled, toggles.missing
    );
    if toggles.missing > 0 && missing_policy == MissingPolicy::Fail {
        bail!(
            "{} component(s) have no code toggle at {section_url}",
            toggles.missing
        );
    }

    // Rendering is complete once the variant's code block exists somewhere
    // on the page.
    ctx.wait_for_selector(&site.code_block_selector(variant.token()), None)
        .await
        .context("waiting for variant code block")?;

    let value = ctx
        .execute_js(&collect_components_script(site, variant))
        .await
        .context("collecting components")?;
    let records = parse_components(value, variant, missing_policy)?;

    // Restore a known state for the next section's navigation.
    ctx.navigate(&site.base_url, NAV_TIMEOUT_MS)
        .await
        .context("returning to catalog root")?;

    Ok(records)
}

/// Script setting every variant selector control and dispatching `change`.
fn set_variant_script(site: &SiteProfile, variant: Variant) -> String {
    format!(
        r#"(() => {{
            document.querySelectorAll({control}).forEach((el) => {{
                el.value = {token};
                el.dispatchEvent(new Event("change", {{ bubbles: true }}));
            }});
            return true;
        }})()"#,
        control = js_string(&site.variant_control_selector),
        token = js_string(variant.token()),
    )
}

/// Script clicking each component's code toggle; counts components that
/// have no toggle instead of failing inside the page.
fn toggle_code_script(site: &SiteProfile) -> String {
    format!(
        r#"(() => {{
            const __harvest_toggles = {{ toggled: 0, missing: 0 }};
            document.querySelectorAll({component}).forEach((el) => {{
                const toggle = el.querySelector({toggle});
                if (toggle === null) {{
                    __harvest_toggles.missing += 1;
                    return;
                }}
                toggle.click();
                __harvest_toggles.toggled += 1;
            }});
            return __harvest_toggles;
        }})()"#,
        component = js_string(&site.component_selector),
        toggle = js_string(&site.code_toggle_selector),
    )
}

/// Script returning `[{title, code}]` per component in DOM order; `code`
/// is null when the variant's block is absent for that component.
fn collect_components_script(site: &SiteProfile, variant: Variant) -> String {
    format!(
        r#"(() => {{
            const __harvest_components = [];
            document.querySelectorAll({component}).forEach((el) => {{
                const title = el.querySelector({title});
                const block = el.querySelector({block});
                __harvest_components.push({{
                    title: title ? title.innerText : "",
                    code: block ? block.innerText : null,
                }});
            }});
            return __harvest_components;
        }})()"#,
        component = js_string(&site.component_selector),
        title = js_string(&site.component_title_selector),
        block = js_string(&site.code_block_selector(variant.token())),
    )
}

/// Apply the missing-code policy and build records in page order.
fn parse_components(
    value: serde_json::Value,
    variant: Variant,
    missing_policy: MissingPolicy,
) -> Result<Vec<ComponentRecord>> {
    let raw: Vec<RawComponent> =
        serde_json::from_value(value).context("component listing has unexpected shape")?;

    let mut records = Vec::with_capacity(raw.len());
    for entry in raw {
        match entry.code {
            Some(code) => records.push(ComponentRecord::new(entry.title, variant, code)),
            None if missing_policy == MissingPolicy::Fail => {
                bail!("component \"{}\" has no {variant} code block", entry.title)
            }
            None => debug!("skipping component \"{}\": no {variant} code block", entry.title),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_components_keeps_order_and_single_key() {
        let value = json!([
            { "title": "Primary button", "code": "<button>Go</button>" },
            { "title": "Ghost button", "code": "<button class=\"ghost\">" },
        ]);

        let records = parse_components(value, Variant::Html, MissingPolicy::Skip).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Primary button");
        assert_eq!(records[1].title, "Ghost button");
        for rec in &records {
            assert_eq!(rec.codeblocks.len(), 1);
            assert!(rec.codeblocks.contains_key("html"));
        }
    }

    #[test]
    fn test_parse_components_skips_missing_block_silently() {
        let value = json!([
            { "title": "Primary", "code": "<Button />" },
            { "title": "Locked", "code": null },
            { "title": "Ghost", "code": "<Ghost />" },
        ]);

        let records = parse_components(value, Variant::React, MissingPolicy::Skip).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Primary");
        assert_eq!(records[1].title, "Ghost");
    }

    #[test]
    fn test_parse_components_fail_policy_names_component() {
        let value = json!([
            { "title": "Locked", "code": null },
        ]);

        let err = parse_components(value, Variant::Vue, MissingPolicy::Fail).unwrap_err();
        assert!(err.to_string().contains("Locked"));
        assert!(err.to_string().contains("vue"));
    }

    #[test]
    fn test_scripts_embed_variant_token() {
        let site = crate::site::SiteProfile::tailwind();
        let set = set_variant_script(&site, Variant::React);
        assert!(set.contains(r#""react""#));
        let collect = collect_components_script(&site, Variant::React);
        assert!(collect.contains("codeBlockreact"));
        assert!(collect.contains("__harvest_components"));
    }
}
