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

//! Encoder selection and the command lines each codec needs.

use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::tools::Tools;

pub const DEFAULT_OPUS_BITRATE: u32 = 192;
pub const DEFAULT_VORBIS_QUALITY: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Codec {
    Opus,
    Vorbis,
}

struct CodecEntry {
    ext: &'static str,
    encode: fn(&Tools, &Setting, &Path, &Path) -> Command,
    gain: fn(&Tools, &Path, usize) -> Command,
}

/// The one scalar each encoder takes.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Setting {
    Bitrate(u32),
    Quality(f32),
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Setting::Bitrate(kbps) => write!(f, "{kbps}"),
            Setting::Quality(q) => write!(f, "{q}"),
        }
    }
}

fn opusenc(tools: &Tools, setting: &Setting, input: &Path, output: &Path) -> Command {
    let mut cmd = Command::new(&tools.opusenc);
    cmd.arg("--bitrate")
        .arg(setting.to_string())
        .arg(input)
        .arg(output);
    cmd
}

fn oggenc(tools: &Tools, setting: &Setting, input: &Path, output: &Path) -> Command {
    let mut cmd = Command::new(&tools.oggenc);
    cmd.arg("-q")
        .arg(setting.to_string())
        .arg("-o")
        .arg(output)
        .arg(input);
    cmd
}

fn rsgain(tools: &Tools, dir: &Path, threads: usize) -> Command {
    let mut cmd = Command::new(&tools.rsgain);
    cmd.arg("easy").arg("-m").arg(threads.to_string()).arg(dir);
    cmd
}

impl Codec {
    fn entry(self) -> &'static CodecEntry {
        static OPUS: CodecEntry = CodecEntry {
            ext: "opus",
            encode: opusenc,
            gain: rsgain,
        };
        static VORBIS: CodecEntry = CodecEntry {
            ext: "ogg",
            encode: oggenc,
            gain: rsgain,
        };
        match self {
            Codec::Opus => &OPUS,
            Codec::Vorbis => &VORBIS,
        }
    }
}

/// Codec plus its parameter, fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncoderProfile {
    codec: Codec,
    setting: Setting,
}

impl EncoderProfile {
    pub fn opus(bitrate: u32) -> Self {
        Self {
            codec: Codec::Opus,
            setting: Setting::Bitrate(bitrate),
        }
    }

    pub fn vorbis(quality: f32) -> Self {
        Self {
            codec: Codec::Vorbis,
            setting: Setting::Quality(quality),
        }
    }

    pub fn extension(&self) -> &'static str {
        self.codec.entry().ext
    }

    pub fn encode_command(&self, tools: &Tools, input: &Path, output: &Path) -> Command {
        (self.codec.entry().encode)(tools, &self.setting, input, output)
    }

    pub fn gain_command(&self, tools: &Tools, dir: &Path, threads: usize) -> Command {
        (self.codec.entry().gain)(tools, dir, threads)
    }
}
