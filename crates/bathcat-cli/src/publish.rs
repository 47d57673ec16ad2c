//! Hand-off of written CSV files to whatever imports them.
//!
//! Only a local outbox directory is implemented; a remote transfer would be
//! another [`ExportSink`].

use std::path::{Path, PathBuf};

use anyhow::Context;

pub(crate) trait ExportSink {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Publishes one file and returns where it ended up.
    fn publish(&self, file: &Path) -> anyhow::Result<PathBuf>;
}

/// Copies files into a directory that an importer watches.
#[derive(Debug)]
pub(crate) struct OutboxSink {
    dir: PathBuf,
}

impl OutboxSink {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ExportSink for OutboxSink {
    fn name(&self) -> &str {
        "outbox"
    }

    fn publish(&self, file: &Path) -> anyhow::Result<PathBuf> {
        let file_name = file
            .file_name()
            .with_context(|| format!("{} has no file name", file.display()))?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create outbox {}", self.dir.display()))?;

        let target = self.dir.join(file_name);
        std::fs::copy(file, &target).with_context(|| {
            format!("failed to copy {} to {}", file.display(), target.display())
        })?;
        Ok(target)
    }
}

/// Publishes every file, stopping at the first failure.
pub(crate) fn publish_all(sink: &dyn ExportSink, files: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut published = Vec::with_capacity(files.len());
    for file in files {
        let target = sink.publish(file)?;
        tracing::info!(sink = sink.name(), file = %target.display(), "published export file");
        published.push(target);
    }
    Ok(published)
}
