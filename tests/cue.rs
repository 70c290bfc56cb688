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

mod common;

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use common::{
    FAKE_CUETAG, FAKE_DOS2UNIX, FAKE_OGGENC, FAKE_SHNSPLIT, KeyValueReader, script,
};
use lossify::codec::EncoderProfile;
use lossify::error::Error;
use lossify::source::Source;
use lossify::tags::TagReader;
use lossify::template::NamePattern;
use lossify::tools::Tools;
use lossify::{Config, RunError};

const CUE: &str = "PERFORMER \"Band\"\r\n\
TITLE \"Album\"\r\n\
FILE \"album.wav\" WAVE\r\n\
  TRACK 01 AUDIO\r\n\
    TITLE \"First\"\r\n\
    INDEX 01 00:00:00\r\n\
  TRACK 02 AUDIO\r\n\
    TITLE \"Second\"\r\n\
    INDEX 01 03:00:00\r\n";

fn cue_tools(bin: &Path) -> Tools {
    Tools {
        dos2unix: script(bin, "dos2unix", FAKE_DOS2UNIX).into(),
        shnsplit: script(bin, "shnsplit", FAKE_SHNSPLIT).into(),
        cuetag: script(bin, "cuetag.sh", FAKE_CUETAG).into(),
        ..Tools::default()
    }
}

fn album(dir: &Path, cue_text: &str) -> std::path::PathBuf {
    fs::write(dir.join("album.wav"), b"RIFF").unwrap();
    let cue = dir.join("album.cue");
    fs::write(&cue, cue_text).unwrap();
    cue
}

#[test]
fn cue_sheet_yields_one_tagged_file_per_track() {
    let bin = tempdir().unwrap();
    let input = tempdir().unwrap();
    let cue = album(input.path(), CUE);

    let source = Source::open(&cue, &cue_tools(bin.path())).unwrap();
    let Source::Cue(ref split) = source else {
        panic!("cue sheet not routed to the cue variant");
    };
    let workspace = split.workspace().to_path_buf();

    let paths: Vec<_> = source.paths().collect();
    assert_eq!(
        paths,
        vec![
            workspace.join("01 - First.flac"),
            workspace.join("02 - Second.flac"),
        ]
    );

    // the track list is fixed once the split is done
    fs::write(workspace.join("03 - Stray.flac"), b"").unwrap();
    assert_eq!(source.paths().collect::<Vec<_>>(), paths);

    let first = KeyValueReader.read(&paths[0]).unwrap();
    let second = KeyValueReader.read(&paths[1]).unwrap();
    assert_eq!(first.first("TRACKNUMBER"), Some("01"));
    assert_eq!(first.first("TITLE"), Some("First"));
    assert_eq!(second.first("TRACKNUMBER"), Some("02"));
    assert_eq!(second.first("TITLE"), Some("Second"));

    // the normalized copy lives in the workspace, the original is untouched
    assert!(!fs::read_to_string(workspace.join("album.cue")).unwrap().contains('\r'));
    assert!(fs::read_to_string(&cue).unwrap().contains('\r'));

    drop(source);
    assert!(!workspace.exists());
}

#[test]
fn cue_without_file_line_is_not_found() {
    let bin = tempdir().unwrap();
    let input = tempdir().unwrap();
    let cue = album(input.path(), "TITLE \"Nothing\"\r\n  TRACK 01 AUDIO\r\n");

    let err = Source::open(&cue, &cue_tools(bin.path())).unwrap_err();
    assert!(matches!(err, Error::CueAudioNotFound(_)));
    assert!(err.is_configuration());
}

#[test]
fn splitter_failure_is_reported() {
    let bin = tempdir().unwrap();
    let input = tempdir().unwrap();
    let cue = input.path().join("album.cue");
    // audio file missing, so the fake splitter fails
    fs::write(&cue, CUE).unwrap();

    let err = Source::open(&cue, &cue_tools(bin.path())).unwrap_err();
    assert!(matches!(err, Error::Tool(_)));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn cue_album_encodes_end_to_end_and_workspace_is_released() {
    let bin = tempdir().unwrap();
    let input = tempdir().unwrap();
    let out = tempdir().unwrap();
    let cue = album(input.path(), CUE);

    let tools = Tools {
        oggenc: script(bin.path(), "oggenc", FAKE_OGGENC).into(),
        ..cue_tools(bin.path())
    };
    let config = Config {
        base_dir: out.path().to_path_buf(),
        pattern: NamePattern::new("%n %t"),
        profile: EncoderProfile::vorbis(5.0),
        replaygain: false,
        threads: 2,
        inputs: vec![cue],
        tools,
    };

    let dirs = lossify::run(&config, &KeyValueReader).unwrap();
    let album = out.path().join("Unknown artist").join("Unknown album");
    assert_eq!(dirs, vec![album.clone()]);
    assert!(album.join("01 First.ogg").is_file());
    assert!(album.join("02 Second.ogg").is_file());
}

#[test]
fn bad_cue_aborts_before_any_encode() {
    let bin = tempdir().unwrap();
    let input = tempdir().unwrap();
    let out = tempdir().unwrap();
    let song = input.path().join("song.flac");
    common::write_tagged(&song, &[("TITLE", "early")]);
    let cue = album(input.path(), "REM nothing here\n");

    let tools = Tools {
        oggenc: script(bin.path(), "oggenc", FAKE_OGGENC).into(),
        ..cue_tools(bin.path())
    };
    let config = Config {
        base_dir: out.path().to_path_buf(),
        pattern: NamePattern::default(),
        profile: EncoderProfile::vorbis(5.0),
        replaygain: false,
        threads: 2,
        inputs: vec![song, cue],
        tools,
    };

    let err = lossify::run(&config, &KeyValueReader).unwrap_err();
    assert!(matches!(err, RunError::Input { .. }));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
