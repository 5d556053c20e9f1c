//! Typed error boundary for the harvest run.
//!
//! Internal helpers use `anyhow::Result` with context; these kinds are what
//! the driver and the binary report on, mapped to distinct exit paths.

use thiserror::Error;

/// Errors a harvest run can surface to the operator.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Missing or blank configuration, detected before any browser launch.
    #[error("missing configuration: {0}")]
    Config(String),

    /// The site rejected the supplied credentials.
    ///
    /// `masked_secret` never contains the full secret; see
    /// [`crate::config::mask_secret`].
    #[error("login rejected for {account} (secret: {masked_secret})")]
    InvalidCredentials {
        account: String,
        masked_secret: String,
    },

    /// The login flow itself broke (navigation, missing form fields).
    #[error("login failed for {account}")]
    Auth {
        account: String,
        #[source]
        source: anyhow::Error,
    },

    /// The catalog listing itself could not be read.
    #[error("failed to enumerate catalog sections")]
    Enumeration(#[source] anyhow::Error),

    /// An unexpected failure while extracting one section's components.
    ///
    /// An entitlement gap (the variant selector never appearing) is not an
    /// error; sections the account cannot see are skipped with a warning.
    #[error("extraction failed for section \"{section}\"")]
    Extraction {
        section: String,
        #[source]
        source: anyhow::Error,
    },

    /// The harvested payload could not be written to disk.
    #[error("failed to write output")]
    Output(#[source] anyhow::Error),
}
