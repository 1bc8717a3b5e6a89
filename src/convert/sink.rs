use crate::convert::types::ArtifactRef;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination capability for finished workbooks.
///
/// The pipeline serializes into a staging file and hands it here; the sink
/// decides where it ends up. A local directory is the common case, an
/// upload function (object store, CDN) is the other. Any closure of the
/// matching shape works as a sink.
pub trait ArtifactSink {
    /// Publish the staged workbook under `file_name` and return a
    /// reference the caller can hand out.
    fn publish(&self, staged: &Path, file_name: &str) -> Result<ArtifactRef>;
}

impl<F> ArtifactSink for F
where
    F: Fn(&Path, &str) -> Result<ArtifactRef>,
{
    fn publish(&self, staged: &Path, file_name: &str) -> Result<ArtifactRef> {
        self(staged, file_name)
    }
}

/// Publishes workbooks into a local directory.
///
/// The staged file is copied in under a dot-prefixed `.part` name and then
/// renamed into place, so directory readers never observe a partial
/// artifact.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn publish(&self, staged: &Path, file_name: &str) -> Result<ArtifactRef> {
        fs::create_dir_all(&self.dir).context("Failed to create output directory")?;

        let partial = self.dir.join(format!(".{}.part", file_name));
        let target = self.dir.join(file_name);

        fs::copy(staged, &partial).context("Failed to stage workbook in output directory")?;
        if let Err(err) = fs::rename(&partial, &target) {
            let _ = fs::remove_file(&partial);
            return Err(err).context("Failed to publish workbook");
        }

        debug!("published {}", target.display());
        Ok(ArtifactRef::File(target))
    }
}
