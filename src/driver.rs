//! Sequential harvest driver: authenticate, enumerate, extract, persist.
//!
//! Owns the single browsing session for the run's duration and closes it
//! exactly once, whichever way the run ends.

use tracing::{error, info, warn};

use crate::auth;
use crate::catalog::types::{RunResult, SectionDescriptor, Variant};
use crate::catalog::{enumerate_sections, extract_components};
use crate::config::{FailurePolicy, RunConfig};
use crate::error::HarvestError;
use crate::persist;
use crate::renderer::RenderContext;
use crate::site::SiteProfile;

/// What a finished (or aborted-but-persisted) run produced.
#[derive(Debug)]
pub struct HarvestOutcome {
    /// Sections in enumeration order, with extraction results attached.
    pub sections: RunResult,
    /// Path of the JSON payload on disk.
    pub output_path: std::path::PathBuf,
}

/// Run the whole harvest over one browsing session.
///
/// On a fatal mid-extraction failure under [`FailurePolicy::Abort`], the
/// sections completed strictly before the fault are persisted under the
/// `incomplete-` name before the error is returned. Auth and enumeration
/// failures produce no output file at all.
pub async fn run_harvest(
    mut ctx: Box<dyn RenderContext>,
    site: &SiteProfile,
    variant: Variant,
    config: &RunConfig,
) -> Result<HarvestOutcome, HarvestError> {
    let outcome = drive(ctx.as_mut(), site, variant, config).await;

    // The session closes exactly once, before any verdict is reported.
    if let Err(e) = ctx.close().await {
        warn!("failed to close browser session: {e:#}");
    }

    match outcome {
        Ok(sections) => {
            let output_path = persist::write_result(&config.output_dir, variant, &sections, false)
                .map_err(HarvestError::Output)?;
            Ok(HarvestOutcome {
                sections,
                output_path,
            })
        }
        Err(DriveFault {
            completed: Some(completed),
            error,
        }) => {
            // Persist the prefix that finished before the fault; a failure
            // here is secondary to the one already being reported.
            match persist::write_result(&config.output_dir, variant, &completed, true) {
                Ok(path) => info!("partial progress saved to {}", path.display()),
                Err(e) => error!("could not save partial progress: {e:#}"),
            }
            Err(error)
        }
        Err(DriveFault {
            completed: None,
            error,
        }) => Err(error),
    }
}

/// A fatal fault, with the completed section prefix when the run got far
/// enough for partial output to be meaningful.
struct DriveFault {
    completed: Option<RunResult>,
    error: HarvestError,
}

/// The sequential loop proper. Does not close the session.
async fn drive(
    ctx: &mut dyn RenderContext,
    site: &SiteProfile,
    variant: Variant,
    config: &RunConfig,
) -> Result<RunResult, DriveFault> {
    auth::login(ctx, site, &config.credentials)
        .await
        .map_err(|error| DriveFault {
            completed: None,
            error,
        })?;

    info!("fetching sections..");
    let mut sections = enumerate_sections(ctx, site).await.map_err(|e| DriveFault {
        completed: None,
        error: HarvestError::Enumeration(e),
    })?;

    // Saturate: the total only feeds the progress log.
    let component_total = sections
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.components_count));
    info!(
        "{} sections found ({} components)",
        sections.len(),
        component_total
    );

    let total = sections.len();
    for index in 0..total {
        let SectionDescriptor {
            title,
            components_count,
            url,
            ..
        } = sections[index].clone();
        info!(
            "[{}/{}] fetching {} components: {} ({} components)",
            index + 1,
            total,
            variant,
            title,
            components_count
        );

        match extract_components(ctx, site, &url, variant, config.missing_policy).await {
            Ok(records) => sections[index].components = records,
            Err(source) => match config.failure_policy {
                FailurePolicy::Abort => {
                    return Err(DriveFault {
                        completed: Some(sections[..index].to_vec()),
                        error: HarvestError::Extraction {
                            section: title,
                            source,
                        },
                    });
                }
                FailurePolicy::Continue => {
                    error!(
                        "extraction failed for section \"{title}\": {source:#}; \
                         continuing with next section"
                    );
                }
            },
        }
    }

    Ok(sections)
}
