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

use std::path::{Path, PathBuf};

use crate::codec::EncoderProfile;
use crate::dirs::{DirectoryCoordinator, OutputDirs};
use crate::error::{Error, Result};
use crate::process;
use crate::tags::TagReader;
use crate::template::NamePattern;
use crate::tools::Tools;

/// Read-only settings every encode task of a run shares.
pub struct Encoder<'a> {
    pub base_dir: &'a Path,
    pub pattern: &'a NamePattern,
    pub profile: &'a EncoderProfile,
    pub tools: &'a Tools,
    pub reader: &'a dyn TagReader,
}

/// State the tasks of one batch mutate together.
#[derive(Debug, Default)]
pub struct Shared {
    pub coordinator: DirectoryCoordinator,
    pub output_dirs: OutputDirs,
}

impl Encoder<'_> {
    /// Where `source` will be written.
    fn output_path(&self, source: &Path) -> Result<PathBuf> {
        let tags = self.reader.read(source)?;
        Ok(self
            .pattern
            .render(self.base_dir, &tags, self.profile.extension()))
    }

    /// Encode one file, returning the directory it landed in.
    pub fn encode(&self, source: &Path, shared: &Shared) -> Result<PathBuf> {
        let output = self.output_path(source)?;
        let output_dir = output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir.to_path_buf());
        shared.coordinator.ensure(&output_dir)?;

        process::run(&mut self.profile.encode_command(self.tools, source, &output)).map_err(
            |failure| Error::Encode {
                path: source.to_path_buf(),
                failure,
            },
        )?;
        log::info!("\"{}\" → \"{}\"", source.display(), output.display());

        shared.output_dirs.insert(output_dir.clone());
        Ok(output_dir)
    }
}
