//! Form login against the catalog site.
//!
//! A single attempt: navigate to the login page, fill the form, submit, and
//! check the resulting page for the site's rejection marker. Secrets are
//! masked before they can reach any log line or error display.

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::Credentials;
use crate::error::HarvestError;
use crate::renderer::RenderContext;
use crate::site::SiteProfile;

/// Navigation budget for the login round trip.
const LOGIN_TIMEOUT_MS: u64 = 30_000;

/// Log in to the site with the given credentials.
///
/// The caller guarantees non-blank credentials (enforced by
/// [`Credentials::new`]). Fails with [`HarvestError::InvalidCredentials`]
/// when the site shows its rejection marker, and with
/// [`HarvestError::Auth`] for any other failure in the flow.
pub async fn login(
    ctx: &mut dyn RenderContext,
    site: &SiteProfile,
    credentials: &Credentials,
) -> Result<(), HarvestError> {
    info!("logging in to {} as {}", site.base_url, credentials.email);

    let attempt = submit_login_form(ctx, site, credentials).await;
    let rejected = match attempt {
        Ok(rejected) => rejected,
        Err(source) => {
            return Err(HarvestError::Auth {
                account: credentials.email.clone(),
                source,
            })
        }
    };

    if rejected {
        return Err(HarvestError::InvalidCredentials {
            account: credentials.email.clone(),
            masked_secret: credentials.masked_password(),
        });
    }

    Ok(())
}

/// Drive the form interaction; returns whether the site rejected the login.
async fn submit_login_form(
    ctx: &mut dyn RenderContext,
    site: &SiteProfile,
    credentials: &Credentials,
) -> Result<bool> {
    ctx.navigate(&site.login_url(), LOGIN_TIMEOUT_MS)
        .await
        .context("opening login page")?;

    ctx.fill(&site.login_email_selector, &credentials.email)
        .await
        .context("filling account email")?;
    ctx.fill(&site.login_password_selector, &credentials.password)
        .await
        .context("filling account password")?;
    ctx.click(&site.login_submit_selector)
        .await
        .context("submitting login form")?;

    // Let the post-submit page settle before scanning it. A page that
    // never settles cannot be trusted not to hide the rejection marker.
    let settled = ctx
        .wait_for_selector("body", Some(LOGIN_TIMEOUT_MS))
        .await
        .context("waiting for post-login page")?;
    if !settled {
        bail!("post-login page did not load within {LOGIN_TIMEOUT_MS}ms");
    }

    page_shows_marker(ctx, &site.login_rejected_marker)
        .await
        .context("checking login result")
}

/// Whether the current page's visible text contains the marker.
async fn page_shows_marker(ctx: &dyn RenderContext, marker: &str) -> Result<bool> {
    let script = format!(
        "(() => document.body ? document.body.innerText.includes({}) : false)()",
        crate::catalog::js_string(marker)
    );
    let value = ctx.execute_js(&script).await?;
    Ok(value.as_bool().unwrap_or(false))
}
