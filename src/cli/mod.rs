//! Command-line surface for the snipharvest binary.

pub mod output;

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::catalog::types::Variant;
use crate::config::{
    Credentials, FailurePolicy, MissingPolicy, RunConfig, EMAIL_VAR, PASSWORD_VAR,
};
use crate::driver;
use crate::error::HarvestError;
use crate::renderer::{ChromiumSession, RenderContext, RendererOptions};
use crate::site::SiteProfile;
use output::Styled;

/// Harvest code snippets for UI components from a catalog site.
#[derive(Debug, Parser)]
#[command(name = "snipharvest", version, about)]
pub struct Cli {
    /// Code variant to capture for every component.
    #[arg(value_enum)]
    pub variant: Option<Variant>,

    /// Directory the JSON payload is written into (created if absent).
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Override the catalog site's base URL (fixture servers, mirrors).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Run with a visible browser window instead of headless.
    #[arg(long)]
    pub headful: bool,

    /// Log a failed section and keep going instead of aborting the run.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Fail a section when a component lacks its code toggle or code
    /// block, instead of skipping that component silently.
    #[arg(long)]
    pub fail_on_missing: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The site profile this invocation targets.
    pub fn site(&self) -> Result<SiteProfile, HarvestError> {
        match &self.base_url {
            Some(url) => SiteProfile::tailwind_at(url)
                .map_err(|e| HarvestError::Config(format!("invalid --base-url {url:?}: {e}"))),
            None => Ok(SiteProfile::tailwind()),
        }
    }

    /// Build run configuration; fails before any browser is launched.
    pub fn run_config(&self) -> Result<RunConfig, HarvestError> {
        Ok(RunConfig {
            credentials: Credentials::from_env()?,
            missing_policy: if self.fail_on_missing {
                MissingPolicy::Fail
            } else {
                MissingPolicy::Skip
            },
            failure_policy: if self.continue_on_error {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
            output_dir: self.output_dir.clone(),
        })
    }
}

/// Run the harvest described by the parsed arguments; returns the process
/// exit code.
pub async fn run(cli: Cli) -> i32 {
    let s = Styled::new();

    // No variant: print usage guidance and exit cleanly. Harvesting only
    // starts when the operator has said what to harvest.
    let Some(variant) = cli.variant else {
        print_variant_usage(&s);
        return 0;
    };

    let config = match cli.run_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", s.fail_sym(), s.red(&e.to_string()));
            eprintln!(
                "  {}",
                s.dim(&format!(
                    "set {EMAIL_VAR} and {PASSWORD_VAR} before running"
                ))
            );
            return 1;
        }
    };

    let site = match cli.site() {
        Ok(site) => site,
        Err(e) => {
            eprintln!("{} {}", s.fail_sym(), s.red(&e.to_string()));
            return 1;
        }
    };
    let options = RendererOptions {
        headful: cli.headful,
    };
    let ctx: Box<dyn RenderContext> = match ChromiumSession::launch(&options).await {
        Ok(session) => Box::new(session),
        Err(e) => {
            eprintln!(
                "{} {}",
                s.fail_sym(),
                s.red(&format!("could not launch browser: {e:#}"))
            );
            return 1;
        }
    };

    match driver::run_harvest(ctx, &site, variant, &config).await {
        Ok(outcome) => {
            info!("done!");
            eprintln!(
                "{} harvested {} section(s) into {}",
                s.ok_sym(),
                outcome.sections.len(),
                s.bold(&outcome.output_path.display().to_string())
            );
            0
        }
        Err(e) => {
            // anyhow's alternate formatting renders the source chain.
            let chain = anyhow::Error::new(e);
            eprintln!("{} {}", s.fail_sym(), s.red(&format!("{chain:#}")));
            1
        }
    }
}

fn print_variant_usage(s: &Styled) {
    eprintln!(
        "{}",
        s.yellow("please specify a component variant (html/react/vue)")
    );
    eprintln!("  example: snipharvest react");
    eprintln!(
        "  credentials come from the {EMAIL_VAR} and {PASSWORD_VAR} environment variables"
    );
}
