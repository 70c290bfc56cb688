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

use std::path::PathBuf;

use crate::codec::EncoderProfile;
use crate::error::{Error, Result};
use crate::process;
use crate::tools::Tools;

/// Tag loudness in each directory touched by the batch, once apiece.
///
/// Every directory is attempted; the first failure is returned.
pub fn normalize(
    dirs: &[PathBuf],
    profile: &EncoderProfile,
    tools: &Tools,
    threads: usize,
) -> Result<()> {
    let mut first_error = None;
    for dir in dirs {
        if let Err(err) = process::run(&mut profile.gain_command(tools, dir, threads)) {
            log::error!("Loudness normalization of \"{}\" failed: {err}", dir.display());
            first_error.get_or_insert(Error::Tool(err));
        }
    }
    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
