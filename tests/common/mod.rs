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

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use lossify::error::{Error, Result};
use lossify::tags::{TagReader, TagSet};

/// Write an executable `sh` script standing in for an external tool.
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// `oggenc -q Q -o OUT IN`; inputs whose name contains `fail` are rejected.
pub const FAKE_OGGENC: &str = r#"out="$4"; in="$5"
case "$in" in *fail*) echo "cannot encode $in" >&2; exit 1;; esac
cp "$in" "$out""#;

/// `opusenc --bitrate N IN OUT`
pub const FAKE_OPUSENC: &str = r#"cp "$3" "$4""#;

/// `rsgain easy -m N DIR`, appending DIR to `$LOG`.
pub fn fake_rsgain(log: &Path) -> String {
    format!(r#"echo "$4" >> "{}""#, log.display())
}

pub const FAKE_DOS2UNIX: &str = r#"tr -d '\r' < "$2" > "$3""#;

/// `shnsplit -t PAT -o flac -d DIR -f CUE AUDIO`, always two tracks.
pub const FAKE_SHNSPLIT: &str = r#"dir="$6"; audio="$9"
[ -f "$audio" ] || { echo "missing $audio" >&2; exit 1; }
printf x > "$dir/01 - First.flac"
printf x > "$dir/02 - Second.flac""#;

/// `cuetag.sh CUE FILES...`, writing each track's number and title
/// into its file as KEY=VALUE lines.
pub const FAKE_CUETAG: &str = r#"cue="$1"; shift
n=0
for f in "$@"; do
  n=$((n+1))
  title=$(awk -v n="$n" '/^ *TRACK /{t++} t==n && /^ *TITLE /{sub(/^ *TITLE "/,""); sub(/"$/,""); print; exit}' "$cue")
  printf 'TRACKNUMBER=%02d\nTITLE=%s\n' "$n" "$title" > "$f"
done"#;

/// Reads tags stored as `KEY=VALUE` lines in the file itself.
pub struct KeyValueReader;

impl TagReader for KeyValueReader {
    fn read(&self, path: &Path) -> Result<TagSet> {
        let text = fs::read_to_string(path).map_err(|err| Error::UnreadableMetadata {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(text
            .lines()
            .filter_map(|line| line.split_once('='))
            .collect())
    }
}

pub fn write_tagged(path: &Path, tags: &[(&str, &str)]) {
    let text: String = tags.iter().map(|(k, v)| format!("{k}={v}\n")).collect();
    fs::write(path, text).unwrap();
}
