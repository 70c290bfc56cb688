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

//! Decoded tag view of one audio file.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use lofty::config::ParseOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::flac::FlacFile;
use lofty::tag::ItemKey;

use crate::error::{Error, Result};

/// Tag names mapped to their values, first value authoritative.
///
/// Names are stored upper-cased, so lookups are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    items: HashMap<String, Vec<String>>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.items
            .entry(name.to_uppercase())
            .or_default()
            .push(value.into());
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.items
            .get(&name.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First value of `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for (name, value) in iter {
            tags.push(name.as_ref(), value);
        }
        tags
    }
}

/// Source of tags for an encode task.
pub trait TagReader: Sync {
    fn read(&self, path: &Path) -> Result<TagSet>;
}

/// Reads tags from disk with lofty.
///
/// FLAC files give their Vorbis comments verbatim. Anything else goes
/// through lofty's generic tag and is mapped back onto Vorbis names.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoftyReader;

const GENERIC_KEYS: [(ItemKey, &str); 9] = [
    (ItemKey::TrackTitle, "TITLE"),
    (ItemKey::AlbumTitle, "ALBUM"),
    (ItemKey::TrackArtist, "ARTIST"),
    (ItemKey::AlbumArtist, "ALBUMARTIST"),
    (ItemKey::TrackNumber, "TRACKNUMBER"),
    (ItemKey::RecordingDate, "DATE"),
    (ItemKey::Genre, "GENRE"),
    (ItemKey::Composer, "COMPOSER"),
    (ItemKey::Performer, "PERFORMER"),
];

impl LoftyReader {
    fn read_flac(path: &Path) -> std::result::Result<TagSet, lofty::error::LoftyError> {
        let mut file = File::open(path)?;
        let flac = FlacFile::read_from(&mut file, ParseOptions::new())?;
        Ok(flac
            .vorbis_comments()
            .map(|comments| comments.items().collect())
            .unwrap_or_default())
    }

    fn read_generic(path: &Path) -> std::result::Result<TagSet, lofty::error::LoftyError> {
        let tagged_file = lofty::read_from_path(path)?;
        let mut tags = TagSet::new();
        if let Some(tag) = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
        {
            for (key, name) in GENERIC_KEYS {
                if let Some(value) = tag.get_string(key) {
                    tags.push(name, value);
                }
            }
        }
        Ok(tags)
    }
}

impl TagReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<TagSet> {
        let is_flac = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("flac"));
        let tags = if is_flac {
            Self::read_flac(path)
        } else {
            Self::read_generic(path)
        };
        let tags = tags.map_err(|err| Error::UnreadableMetadata {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        log::debug!("Tags of \"{}\": {:?}", path.display(), tags);
        Ok(tags)
    }
}
