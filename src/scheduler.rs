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

//! Fans every source file out to a fixed pool of encode workers.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::{BatchError, Error, Result, TaskFailure};
use crate::source::Source;
use crate::task::{Encoder, Shared};

/// Outcome of a batch once every task settled.
#[derive(Debug)]
pub struct Batch {
    pub submitted: usize,
    pub encoded: usize,
    pub failures: Vec<TaskFailure>,
    /// Directories that received at least one file, sorted.
    pub output_dirs: Vec<PathBuf>,
}

impl Batch {
    pub fn into_result(self) -> std::result::Result<Vec<PathBuf>, BatchError> {
        if self.failures.is_empty() {
            Ok(self.output_dirs)
        } else {
            Err(BatchError {
                failures: self.failures,
            })
        }
    }
}

/// Default worker count: the host's available parallelism.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Encode every file of every source on `threads` workers.
///
/// Returns only after all submitted tasks finished. A failed task
/// does not stop its siblings.
pub fn run(sources: &[Source], encoder: &Encoder, threads: usize) -> Result<Batch> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("encoder-{i}"))
        .build()
        .map_err(|err| {
            Error::Configuration(format!("Could not start {threads} worker(s): {err}"))
        })?;
    log::info!("Starting {threads} thread(s).");

    let shared = Shared::default();
    let failures = Mutex::new(Vec::new());
    let encoded = AtomicUsize::new(0);
    let mut submitted = 0;

    pool.scope(|scope| {
        for source in sources {
            for path in source.paths() {
                submitted += 1;
                let (shared, failures, encoded) = (&shared, &failures, &encoded);
                scope.spawn(move |_| match encoder.encode(&path, shared) {
                    Ok(_) => {
                        encoded.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(error) => {
                        log::error!("Failed \"{}\": {error}", path.display());
                        failures
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(TaskFailure {
                                source: path,
                                error,
                            });
                    }
                });
            }
        }
    });

    let mut failures = failures
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    failures.sort_by(|a, b| a.source.cmp(&b.source));
    let batch = Batch {
        submitted,
        encoded: encoded.into_inner(),
        failures,
        output_dirs: shared.output_dirs.into_sorted(),
    };
    log::info!(
        "Encoded {} of {} file(s) into {} director(ies); {} failed.",
        batch.encoded,
        batch.submitted,
        batch.output_dirs.len(),
        batch.failures.len()
    );
    Ok(batch)
}
