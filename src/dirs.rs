//
// Copyright 2025 Christopher Atherton <the8lack8ox@pm.me>
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the “Software”), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
// THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//

//! Output directory bookkeeping shared by every worker.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{Error, Result};

/// Serializes "create if missing" across all workers of a run.
///
/// One lock covers every path, so two workers racing for a new
/// artist/album directory never both try to create it.
#[derive(Debug, Default)]
pub struct DirectoryCoordinator {
    lock: Mutex<()>,
}

impl DirectoryCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `path` exists. Idempotent.
    pub fn ensure(&self, path: &Path) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path).map_err(|source| Error::DirectoryCreation {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Created \"{}\".", path.display());
        Ok(())
    }
}

/// Directories that received at least one encoded file this run.
#[derive(Debug, Default)]
pub struct OutputDirs {
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl OutputDirs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `dir` was not recorded yet.
    pub fn insert(&self, dir: PathBuf) -> bool {
        self.dirs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(dir)
    }

    /// Sorted snapshot, taken once the batch has finished.
    pub fn into_sorted(self) -> Vec<PathBuf> {
        self.dirs
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_iter()
            .collect()
    }
}
