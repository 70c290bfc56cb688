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

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::codec::{Codec, DEFAULT_OPUS_BITRATE, DEFAULT_VORBIS_QUALITY, EncoderProfile};
use crate::scheduler::default_threads;
use crate::template::{DEFAULT_PATTERN, NamePattern};
use crate::tools::Tools;
use crate::Config;

/// Parse a Vorbis quality between -1 (low) and 10 (high).
pub fn parse_quality(value: &str) -> Result<f32, String> {
    let quality: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid quality '{value}'"))?;
    if (-1.0..=10.0).contains(&quality) {
        Ok(quality)
    } else {
        Err(format!("quality {quality} is outside -1..=10"))
    }
}

pub fn parse_threads(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("thread count must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid thread count '{value}'")),
    }
}

/// Convert FLACs and sort into a sensible folder hierarchy
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base directory to store output files to
    #[arg(short = 'd', long = "base", value_name = "DIR")]
    pub base_dir: PathBuf,

    /// Encoder to use
    #[arg(short, long, value_enum, default_value_t = Codec::Opus)]
    pub encoder: Codec,

    /// Produce filenames as this string, with %g (genre), %a (artist), %l (album),
    /// %n (track number), %t (title), %d (date)
    #[arg(short = 'n', long = "names", value_name = "PATTERN", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Vorbis encoding quality, between -1 (low) and 10 (high)
    #[arg(short, long, default_value_t = DEFAULT_VORBIS_QUALITY, value_parser = parse_quality, allow_negative_numbers = true)]
    pub quality: f32,

    /// Opus target bitrate in kbps
    #[arg(short, long, default_value_t = DEFAULT_OPUS_BITRATE)]
    pub bitrate: u32,

    /// Apply ReplayGain tags to every output directory written to
    #[arg(short, long)]
    pub replaygain: bool,

    /// Worker thread pool size
    #[arg(short, long, default_value_t = default_threads(), value_parser = parse_threads)]
    pub threads: usize,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Files, directories or .cue sheets to convert
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    #[arg(long, env = "LOSSIFY_OPUSENC", default_value = "opusenc", hide = true)]
    pub opusenc: OsString,
    #[arg(long, env = "LOSSIFY_OGGENC", default_value = "oggenc", hide = true)]
    pub oggenc: OsString,
    #[arg(long, env = "LOSSIFY_RSGAIN", default_value = "rsgain", hide = true)]
    pub rsgain: OsString,
    #[arg(long, env = "LOSSIFY_DOS2UNIX", default_value = "dos2unix", hide = true)]
    pub dos2unix: OsString,
    #[arg(long, env = "LOSSIFY_SHNSPLIT", default_value = "shnsplit", hide = true)]
    pub shnsplit: OsString,
    #[arg(long, env = "LOSSIFY_CUETAG", default_value = "cuetag.sh", hide = true)]
    pub cuetag: OsString,
}

impl Args {
    pub fn into_config(self) -> Config {
        let profile = match self.encoder {
            Codec::Opus => EncoderProfile::opus(self.bitrate),
            Codec::Vorbis => EncoderProfile::vorbis(self.quality),
        };
        Config {
            base_dir: self.base_dir,
            pattern: NamePattern::new(self.pattern),
            profile,
            replaygain: self.replaygain,
            threads: self.threads,
            inputs: self.inputs,
            tools: Tools {
                opusenc: self.opusenc,
                oggenc: self.oggenc,
                rsgain: self.rsgain,
                dos2unix: self.dos2unix,
                shnsplit: self.shnsplit,
                cuetag: self.cuetag,
            },
        }
    }
}
