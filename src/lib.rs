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

//! Batch conversion of lossless audio into Opus/Vorbis, filed under
//! `<base>/<artist>/<album>/` by each file's tags.

pub mod cli;
pub mod codec;
pub mod dirs;
pub mod error;
pub mod gain;
pub mod process;
pub mod scheduler;
pub mod source;
pub mod tags;
pub mod task;
pub mod tempdir;
pub mod template;
pub mod tools;

use std::path::PathBuf;

use crate::codec::EncoderProfile;
use crate::error::{BatchError, Error};
use crate::source::Source;
use crate::tags::TagReader;
use crate::task::Encoder;
use crate::template::NamePattern;
use crate::tools::Tools;

/// Everything one run needs.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_dir: PathBuf,
    pub pattern: NamePattern,
    pub profile: EncoderProfile,
    pub replaygain: bool,
    pub threads: usize,
    pub inputs: Vec<PathBuf>,
    pub tools: Tools,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Could not open input {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: Error,
    },
    #[error(transparent)]
    Setup(#[from] Error),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("Loudness normalization failed: {0}")]
    Gain(#[source] Error),
}

/// Convert every input, then normalize loudness if asked to.
///
/// Inputs are all opened (cue sheets split) before the first encode
/// starts. Returns the output directories written to.
pub fn run(config: &Config, reader: &dyn TagReader) -> Result<Vec<PathBuf>, RunError> {
    let sources = config
        .inputs
        .iter()
        .map(|path| {
            Source::open(path, &config.tools).map_err(|source| RunError::Input {
                path: path.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let encoder = Encoder {
        base_dir: &config.base_dir,
        pattern: &config.pattern,
        profile: &config.profile,
        tools: &config.tools,
        reader,
    };
    let output_dirs = scheduler::run(&sources, &encoder, config.threads)?.into_result()?;
    drop(sources);

    if config.replaygain {
        log::info!("Adding ReplayGain to {} director(ies) ...", output_dirs.len());
        gain::normalize(&output_dirs, &config.profile, &config.tools, config.threads)
            .map_err(RunError::Gain)?;
    }
    Ok(output_dirs)
}
