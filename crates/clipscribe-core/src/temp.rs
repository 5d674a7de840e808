//! Scoped temporary files
//!
//! Some downstream clients only accept file paths, so in-memory audio and
//! credential blobs are materialised through [`TempResource`]. A resource is
//! unlinked exactly once: by [`TempResource::release`] on the normal path, or
//! by `Drop` when the owning operation returns early, panics or is cancelled.

use std::{
    io,
    ops::Deref,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use tempfile::TempPath;
use tokio::io::{AsyncRead, AsyncWriteExt};

const PREFIX: &str = "clipscribe-";

/// Uniquely named local file owned by a single operation
#[derive(Debug)]
pub struct TempResource {
    path: TempPath,
    created_at: Timestamp,
}

impl TempResource {
    /// Create a file in `dir` ending with `suffix` and write `bytes` into it
    ///
    /// The file is removed again if the write fails.
    pub async fn acquire(dir: &Path, bytes: &[u8], suffix: &str) -> io::Result<Self> {
        let (resource, mut file) = Self::create(dir, suffix)?;

        file.write_all(bytes).await?;
        file.flush().await?;

        Ok(resource)
    }

    /// Create a file in `dir` ending with `suffix` and copy `reader` into it
    pub async fn acquire_from_reader<R>(dir: &Path, reader: &mut R, suffix: &str) -> io::Result<Self>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let (resource, mut file) = Self::create(dir, suffix)?;

        tokio::io::copy(reader, &mut file).await?;
        file.flush().await?;

        Ok(resource)
    }

    // Writes go through the handle opened here, never by path, so a write
    // still in flight after cancellation cannot recreate an unlinked file.
    fn create(dir: &Path, suffix: &str) -> io::Result<(Self, tokio::fs::File)> {
        let (file, path) = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(suffix)
            .tempfile_in(dir)?
            .into_parts();

        tracing::debug!(path = %path.display(), "acquired temp resource");

        let resource = Self {
            path,
            created_at: Timestamp::now(),
        };

        Ok((resource, tokio::fs::File::from_std(file)))
    }

    /// Location of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the file was created
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Delete the file, reporting any error
    ///
    /// Consumes the handle so a resource cannot be released twice.
    pub fn release(self) -> io::Result<()> {
        let shown = self.path.display().to_string();

        self.path.close().inspect_err(|e| {
            tracing::warn!(path = %shown, "failed to release temp resource: {e}");
        })?;

        tracing::debug!(path = %shown, "released temp resource");
        Ok(())
    }
}

impl Deref for TempResource {
    type Target = Path;

    fn deref(&self) -> &Path {
        self.path()
    }
}

impl AsRef<Path> for TempResource {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Resolve the scratch directory, falling back to the OS temp dir
pub fn scratch_dir(configured: Option<&Path>) -> PathBuf {
    configured.map_or_else(std::env::temp_dir, Path::to_path_buf)
}
