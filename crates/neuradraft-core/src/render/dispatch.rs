//! Independent multi-format rendering
//!
//! Each renderer runs in isolation: an error or panic in one is captured in
//! its [`RenderOutcome`] and the remaining renderers still run.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use neuradraft_ast::{Document, OutputFormat};

use super::{RenderError, RenderResult, Renderer};
use crate::filename::artifact_file_name;

/// Result of one renderer
#[derive(Debug)]
pub struct RenderOutcome {
    pub format: OutputFormat,
    pub result: RenderResult<Vec<u8>>,
}

/// A rendered file, held in memory for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: OutputFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Everything produced for one document
#[derive(Debug, Default)]
pub struct Delivery {
    /// Successfully rendered files, in renderer order
    pub artifacts: Vec<Artifact>,
    /// Formats that failed and why
    pub failures: Vec<(OutputFormat, RenderError)>,
}

impl Delivery {
    /// Find the artifact for a format
    pub fn get(&self, format: OutputFormat) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.format == format)
    }

    /// Check if every renderer succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Write all artifacts into `dir`, creating it if needed
    pub fn write_all(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.artifacts.len());
        for artifact in &self.artifacts {
            let path = dir.join(&artifact.file_name);
            fs::write(&path, &artifact.bytes)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Run one renderer, turning a panic into a [`RenderError::Panic`]
fn render_isolated(renderer: &dyn Renderer, doc: &Document) -> RenderResult<Vec<u8>> {
    let format = renderer.format();
    match panic::catch_unwind(AssertUnwindSafe(|| renderer.render(doc))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(RenderError::Panic { format, message })
        }
    }
}

/// Render the document with every renderer
///
/// Always returns one outcome per renderer, in order.
pub fn render_all(doc: &Document, renderers: &[Box<dyn Renderer>]) -> Vec<RenderOutcome> {
    renderers
        .iter()
        .map(|renderer| {
            let format = renderer.format();
            let result = render_isolated(renderer.as_ref(), doc);
            match &result {
                Ok(bytes) => log::debug!("Rendered {} ({} bytes)", format, bytes.len()),
                Err(e) => log::warn!("{} generation failed: {}", format, e),
            }
            RenderOutcome { format, result }
        })
        .collect()
}

/// Write `bytes` under `dir`, read them back and remove the file
fn stage_one(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    let staged = fs::read(&path);
    let removed = fs::remove_file(&path);
    let staged = staged?;
    removed?;
    Ok(staged)
}

/// Render every format through a scoped staging directory
///
/// Each successful render is written to a temporary file named after
/// `base_name`, read back into memory and removed. The staging directory
/// itself is removed when this function returns, on every path. Only
/// failure to create the staging directory is an error; per-format
/// failures are reported in [`Delivery::failures`].
pub fn stage_artifacts(
    doc: &Document,
    renderers: &[Box<dyn Renderer>],
    base_name: &str,
) -> RenderResult<Delivery> {
    let staging = tempfile::Builder::new().prefix("neuradraft-").tempdir()?;
    let mut delivery = Delivery::default();

    for outcome in render_all(doc, renderers) {
        let bytes = match outcome.result {
            Ok(bytes) => bytes,
            Err(e) => {
                delivery.failures.push((outcome.format, e));
                continue;
            }
        };

        let file_name = artifact_file_name(base_name, outcome.format);
        match stage_one(staging.path(), &file_name, &bytes) {
            Ok(bytes) => delivery.artifacts.push(Artifact {
                format: outcome.format,
                file_name,
                bytes,
            }),
            Err(e) => {
                log::warn!("Failed to stage {}: {}", file_name, e);
                delivery.failures.push((outcome.format, e.into()));
            }
        }
    }

    staging.close()?;
    Ok(delivery)
}
