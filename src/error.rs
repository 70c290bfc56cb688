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

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Cannot find audio data path in cue sheet: {}", .0.display())]
    CueAudioNotFound(PathBuf),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Unreadable metadata in {}: {reason}", .path.display())]
    UnreadableMetadata { path: PathBuf, reason: String },
    #[error("Could not create directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failure encoding {}: {failure}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        failure: ToolFailure,
    },
    #[error(transparent)]
    Tool(#[from] ToolFailure),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error invalidates the whole run rather than one task.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::NotADirectory(_) | Error::CueAudioNotFound(_) | Error::Configuration(_)
        )
    }
}

/// An external program that could not be run, or that exited unsuccessfully.
#[derive(Debug, thiserror::Error)]
pub enum ToolFailure {
    #[error("Failure executing {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}{}", Diagnostics(.stderr))]
    Status {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

struct Diagnostics<'a>(&'a str);

impl fmt::Display for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, ": {}", self.0)
        }
    }
}

/// One encode task that did not complete.
#[derive(Debug)]
pub struct TaskFailure {
    pub source: PathBuf,
    pub error: Error,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.source.display(), self.error)
    }
}

/// Every failure of a batch, reported after all tasks settled.
#[derive(Debug)]
pub struct BatchError {
    pub failures: Vec<TaskFailure>,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} file(s) failed to encode", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BatchError {}
