//! snipharvest — headless-browser harvester for UI component catalogs.
//!
//! Logs into a catalog site, enumerates its sections, extracts per-component
//! code snippets for one requested variant, and writes the aggregate to a
//! JSON file. The pipeline talks to the browser through the
//! [`renderer::RenderContext`] trait, so everything above the chromiumoxide
//! layer is testable without a browser.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod persist;
pub mod renderer;
pub mod site;
