//! Output persistence: serialize the run result to `output/<variant>.json`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::types::{RunResult, Variant};

/// Write the run result and return the path written.
///
/// Creates `dir` if absent. An aborted run persists under an
/// `incomplete-` prefixed name so a complete payload is never clobbered by
/// a partial one.
pub fn write_result(
    dir: &Path,
    variant: Variant,
    sections: &RunResult,
    incomplete: bool,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let path = dir.join(file_name(variant, incomplete));
    let payload = serde_json::to_vec(sections).context("serializing run result")?;
    std::fs::write(&path, payload)
        .with_context(|| format!("writing {}", path.display()))?;

    info!("wrote {} section(s) to {}", sections.len(), path.display());
    Ok(path)
}

/// File name for a run's payload.
fn file_name(variant: Variant, incomplete: bool) -> String {
    if incomplete {
        format!("incomplete-{}.json", variant.token())
    } else {
        format!("{}.json", variant.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::SectionDescriptor;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Variant::React, false), "react.json");
        assert_eq!(file_name(Variant::Html, true), "incomplete-html.json");
    }

    #[test]
    fn test_write_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");
        let sections = vec![SectionDescriptor::new("Buttons", 12, "https://x.test/b")];

        let path = write_result(&out, Variant::Html, &sections, false).unwrap();
        assert_eq!(path, out.join("html.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: RunResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sections);
    }

    #[test]
    fn test_empty_result_is_an_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_result(dir.path(), Variant::Vue, &Vec::new(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
