//! Site profile: every selector and marker the harvester touches, in one
//! place, so the catalog logic stays free of literal strings and tests can
//! point the pipeline at fixture pages.

/// Selectors and URLs describing one component-catalog site.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Root of the site; also the known state the extractor returns to
    /// between sections.
    pub base_url: String,
    /// Path of the login form page, relative to `base_url`.
    pub login_path: String,
    /// Selector of the login identifier input.
    pub login_email_selector: String,
    /// Selector of the login secret input.
    pub login_password_selector: String,
    /// Selector of the login submit control.
    pub login_submit_selector: String,
    /// Text the login page shows when credentials are rejected.
    pub login_rejected_marker: String,
    /// Selector matching every catalog entry on the landing page.
    pub section_entry_selector: String,
    /// Selector of the per-page variant selector controls.
    pub variant_control_selector: String,
    /// Selector of the per-component code toggle.
    pub code_toggle_selector: String,
    /// Selector matching every component container in a section page.
    pub component_selector: String,
    /// Selector of a component's title element, within the container.
    pub component_title_selector: String,
    /// Prefix of the `x-ref` attribute naming a variant's code block;
    /// the variant token is appended (e.g. `codeBlock` + `react`).
    pub code_block_ref_prefix: String,
}

impl SiteProfile {
    /// Profile for the Tailwind-style catalog the harvester targets.
    pub fn tailwind() -> Self {
        Self {
            base_url: "https://tailwindui.com".to_string(),
            login_path: "/login".to_string(),
            login_email_selector: r#"[name="email"]"#.to_string(),
            login_password_selector: r#"[name="password"]"#.to_string(),
            login_submit_selector: r#"[type="submit"]"#.to_string(),
            login_rejected_marker: "These credentials do not match our records".to_string(),
            section_entry_selector: r##"#components [href^="/components"]"##.to_string(),
            variant_control_selector: r#"[x-model="activeSnippet"]"#.to_string(),
            code_toggle_selector: r#"[x-ref="code"]"#.to_string(),
            component_selector: r#"section[id^="component-"]"#.to_string(),
            component_title_selector: "h2 a".to_string(),
            code_block_ref_prefix: "codeBlock".to_string(),
        }
    }

    /// Same profile rooted at a different base URL (fixture servers).
    pub fn tailwind_at(base_url: &str) -> Result<Self, url::ParseError> {
        let parsed = url::Url::parse(base_url)?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            ..Self::tailwind()
        })
    }

    /// Absolute URL of the login page.
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    /// Selector of the code block holding one variant's snippet text.
    pub fn code_block_selector(&self, variant_token: &str) -> String {
        format!(r#"[x-ref="{}{}"]"#, self.code_block_ref_prefix, variant_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url() {
        let site = SiteProfile::tailwind();
        assert_eq!(site.login_url(), "https://tailwindui.com/login");
    }

    #[test]
    fn test_code_block_selector_appends_token() {
        let site = SiteProfile::tailwind();
        assert_eq!(
            site.code_block_selector("react"),
            r#"[x-ref="codeBlockreact"]"#
        );
    }

    #[test]
    fn test_tailwind_at_strips_trailing_slash() {
        let site = SiteProfile::tailwind_at("http://127.0.0.1:8080/").unwrap();
        assert_eq!(site.base_url, "http://127.0.0.1:8080");
        assert_eq!(site.login_url(), "http://127.0.0.1:8080/login");
    }

    #[test]
    fn test_tailwind_at_rejects_garbage() {
        assert!(SiteProfile::tailwind_at("not a url").is_err());
    }
}
