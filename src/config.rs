//! Run configuration: credentials from the environment and per-run policies.

use crate::error::HarvestError;

/// Environment variable holding the account identifier.
pub const EMAIL_VAR: &str = "SNIPHARVEST_EMAIL";
/// Environment variable holding the account secret.
pub const PASSWORD_VAR: &str = "SNIPHARVEST_PASSWORD";

/// Account credentials for the target site.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from explicit values, rejecting blanks.
    pub fn new(email: &str, password: &str) -> Result<Self, HarvestError> {
        let email = email.trim().to_string();
        let password = password.trim().to_string();
        if email.is_empty() {
            return Err(HarvestError::Config(format!(
                "account email is empty (set {EMAIL_VAR})"
            )));
        }
        if password.is_empty() {
            return Err(HarvestError::Config(format!(
                "account password is empty (set {PASSWORD_VAR})"
            )));
        }
        Ok(Self { email, password })
    }

    /// Read credentials from the environment. Missing or blank values are a
    /// startup-time configuration error, before any browser is launched.
    pub fn from_env() -> Result<Self, HarvestError> {
        let email = std::env::var(EMAIL_VAR).unwrap_or_default();
        let password = std::env::var(PASSWORD_VAR).unwrap_or_default();
        Self::new(&email, &password)
    }

    /// The secret with all but its last two characters masked.
    pub fn masked_password(&self) -> String {
        mask_secret(&self.password)
    }
}

// Credentials must never leak through Debug formatting of config structs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &mask_secret(&self.password))
            .finish()
    }
}

/// Mask a secret for diagnostic output.
///
/// Reveals at most the last two characters; secrets of four characters or
/// fewer are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 2), visible)
}

/// What to do when a single component is missing its code toggle or its
/// rendered code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Skip that one component silently; the rest of the section survives.
    #[default]
    Skip,
    /// Treat the section as failed.
    Fail,
}

/// What to do when one section's extraction fails unexpectedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run, persist completed sections under an `incomplete-`
    /// prefixed file, and exit non-zero.
    #[default]
    Abort,
    /// Log the failure, leave the section's component list empty, continue.
    Continue,
}

/// Everything a harvest run needs besides the browser session.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub missing_policy: MissingPolicy,
    pub failure_policy: FailurePolicy,
    /// Directory the JSON payload is written into; created if absent.
    pub output_dir: std::path::PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret_long() {
        assert_eq!(mask_secret("hunter2secret"), "***********et");
    }

    #[test]
    fn test_mask_secret_short_fully_masked() {
        assert_eq!(mask_secret("abcd"), "****");
        assert_eq!(mask_secret("ab"), "**");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_blank_credentials_rejected() {
        assert!(matches!(
            Credentials::new("", "pw"),
            Err(HarvestError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("me@example.com", "   "),
            Err(HarvestError::Config(_))
        ));
    }

    #[test]
    fn test_credentials_trimmed() {
        let creds = Credentials::new(" me@example.com ", " hunter2secret ").unwrap();
        assert_eq!(creds.email, "me@example.com");
        assert_eq!(creds.password, "hunter2secret");
    }

    #[test]
    fn test_debug_masks_password() {
        let creds = Credentials::new("me@example.com", "hunter2secret").unwrap();
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2secret"));
        assert!(rendered.contains("me@example.com"));
    }
}
