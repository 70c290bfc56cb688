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

//! Inputs resolved into the lossless files they stand for.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::process;
use crate::tempdir::TempDir;
use crate::tools::Tools;

pub const LOSSLESS_EXT: &str = "flac";

/// shnsplit naming for split tracks: `<track number> - <title>`.
const SPLIT_PATTERN: &str = "%n - %t";

pub(crate) fn is_lossless(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LOSSLESS_EXT))
}

fn is_cue(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("cue"))
}

/// Lossless files directly inside `dir`, sorted.
fn lossless_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_lossless(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// A walked directory tree. Symlinks are followed; loops surface as
/// walk errors and are skipped.
#[derive(Debug)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Error accessing entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_lossless(entry.path()))
            .map(walkdir::DirEntry::into_path)
    }
}

/// A cue sheet album split into one file per track.
///
/// The split happens once, on construction. The tracks live in a
/// private scratch directory that goes away with this value.
#[derive(Debug)]
pub struct Cue {
    workspace: TempDir,
    tracks: Vec<PathBuf>,
}

/// Audio file named by the first `FILE "<name>" WAVE` line.
pub fn referenced_audio(cue_text: &str) -> Option<&str> {
    static FILE_RE: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r#"^FILE "(.+)" WAVE"#).expect("valid regex"));
    cue_text
        .lines()
        .find_map(|line| FILE_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|mat| mat.as_str())
}

impl Cue {
    pub fn new<P: AsRef<Path>>(cue_path: P, tools: &Tools) -> Result<Self> {
        let cue_path = cue_path.as_ref();
        let workspace = TempDir::new("lossify-cue")?;
        let file_name = cue_path.file_name().ok_or_else(|| {
            Error::Configuration(format!("Not a cue sheet: {}", cue_path.display()))
        })?;

        // cuetag.sh chokes on DOS line endings
        let unix_cue = workspace.path().join(file_name);
        process::run(
            Command::new(&tools.dos2unix)
                .arg("-n")
                .arg(cue_path)
                .arg(&unix_cue),
        )?;

        let cue_text = String::from_utf8_lossy(&fs::read(&unix_cue)?).into_owned();
        let audio = referenced_audio(&cue_text)
            .map(|name| cue_path.parent().unwrap_or(Path::new("")).join(name))
            .ok_or_else(|| Error::CueAudioNotFound(cue_path.to_path_buf()))?;

        process::run(
            Command::new(&tools.shnsplit)
                .arg("-t")
                .arg(SPLIT_PATTERN)
                .args(["-o", LOSSLESS_EXT])
                .arg("-d")
                .arg(workspace.path())
                .arg("-f")
                .arg(&unix_cue)
                .arg(&audio),
        )?;

        let tracks = lossless_files(workspace.path())?;
        process::run(Command::new(&tools.cuetag).arg(&unix_cue).args(&tracks))?;
        log::debug!(
            "Split \"{}\" into {} track(s).",
            cue_path.display(),
            tracks.len()
        );

        Ok(Self { workspace, tracks })
    }

    pub fn workspace(&self) -> &Path {
        self.workspace.path()
    }

    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.tracks.iter().cloned()
    }
}

/// One command line input, materialized.
#[derive(Debug)]
pub enum Source {
    File(PathBuf),
    Directory(Directory),
    Cue(Cue),
}

impl Source {
    /// Route `path` to its variant. Cue sheets are split here.
    pub fn open<P: AsRef<Path>>(path: P, tools: &Tools) -> Result<Self> {
        let path = path.as_ref();
        if is_cue(path) {
            Ok(Source::Cue(Cue::new(path, tools)?))
        } else if path.is_dir() {
            Ok(Source::Directory(Directory::new(path)?))
        } else {
            Ok(Source::File(path.to_path_buf()))
        }
    }

    /// Every encodable file. Each call starts over.
    pub fn paths(&self) -> Box<dyn Iterator<Item = PathBuf> + '_> {
        match self {
            Source::File(path) => Box::new(std::iter::once(path.clone())),
            Source::Directory(dir) => Box::new(dir.paths()),
            Source::Cue(cue) => Box::new(cue.paths()),
        }
    }
}
