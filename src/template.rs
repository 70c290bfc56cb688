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

//! Output path rendering from a name pattern and a file's tags.

use std::path::{Path, PathBuf};

use crate::tags::TagSet;

pub const DEFAULT_PATTERN: &str = "%n - %t";

const UNKNOWN_ARTIST: &str = "Unknown artist";
const UNKNOWN_ALBUM: &str = "Unknown album";
const NONE: &str = "(none)";

/// Macros that are only looked up when the pattern mentions them.
const OPTIONAL_MACROS: [(&str, &str); 4] = [
    ("%g", "GENRE"),
    ("%n", "TRACKNUMBER"),
    ("%t", "TITLE"),
    ("%d", "DATE"),
];

/// Tags consulted for `%a`, most specific first.
const ARTIST_TAGS: [&str; 6] = [
    "ALBUM_ARTIST",
    "ALBUMARTIST",
    "ALBUM ARTIST",
    "COMPOSER",
    "PERFORMER",
    "ARTIST",
];

/// Replace characters that are unsafe in file names with `_`.
pub fn sanitize(value: &str) -> String {
    value.replace(['"', '*', '/', ':', '<', '>', '?', '\\', '|'], "_")
}

fn artist(tags: &TagSet) -> &str {
    ARTIST_TAGS
        .iter()
        .filter_map(|name| tags.first(name))
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_ARTIST)
}

/// Immutable file name pattern such as `%n - %t`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamePattern(String);

impl NamePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Macro values in fixed resolution order, already sanitized.
    fn macros(&self, tags: &TagSet) -> Vec<(&'static str, String)> {
        let mut values = Vec::with_capacity(6);
        for (token, name) in OPTIONAL_MACROS {
            if self.0.contains(token) {
                values.push((token, sanitize(tags.first(name).unwrap_or(NONE))));
            }
        }
        values.push(("%a", sanitize(artist(tags))));
        values.push((
            "%l",
            sanitize(tags.first("ALBUM").unwrap_or(UNKNOWN_ALBUM)),
        ));
        values
    }

    /// `<base>/%a/%l/<pattern>.<ext>` with every macro substituted.
    pub fn render(&self, base: &Path, tags: &TagSet, ext: &str) -> PathBuf {
        let mut relative = format!("%a/%l/{}.{ext}", self.0);
        for (token, value) in self.macros(tags) {
            relative = relative.replace(token, &value);
        }
        base.join(relative)
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(items: &[(&str, &str)]) -> TagSet {
        items.iter().copied().collect()
    }

    #[test]
    fn renders_artist_album_hierarchy() {
        let tags = tags(&[
            ("ARTIST", "A"),
            ("ALBUM", "B"),
            ("TRACKNUMBER", "01"),
            ("TITLE", "Song"),
        ]);
        let path = NamePattern::default().render(Path::new("/out"), &tags, "ogg");
        assert_eq!(path, PathBuf::from("/out/A/B/01 - Song.ogg"));
    }

    #[test]
    fn base_dir_is_kept_literally() {
        let tags = tags(&[("ARTIST", "A"), ("ALBUM", "B"), ("TITLE", "Song")]);
        let path = NamePattern::new("%t").render(Path::new("/music/%a"), &tags, "opus");
        assert_eq!(path, PathBuf::from("/music/%a/A/B/Song.opus"));
    }

    #[test]
    fn sanitizes_values_not_pattern() {
        let tags = tags(&[
            ("ARTIST", "A"),
            ("ALBUM", "B"),
            ("TRACKNUMBER", "01"),
            ("TITLE", "Weird/Title:Here"),
        ]);
        let path = NamePattern::new("%n: %t").render(Path::new("/out"), &tags, "ogg");
        assert_eq!(path, PathBuf::from("/out/A/B/01: Weird_Title_Here.ogg"));
    }

    #[test]
    fn sanitize_touches_only_unsafe_characters() {
        assert_eq!(sanitize(r#"a"b*c/d:e<f>g?h\i|j"#), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize("Ünïcode & (parens) [ok]"), "Ünïcode & (parens) [ok]");
    }

    #[test]
    fn falls_back_when_tags_are_missing() {
        let path = NamePattern::new("%g|%n|%t|%d").render(Path::new("/out"), &TagSet::new(), "opus");
        assert_eq!(
            path,
            PathBuf::from("/out/Unknown artist/Unknown album/(none)|(none)|(none)|(none).opus")
        );
    }

    #[test]
    fn artist_prefers_album_artist_family() {
        let tags = tags(&[
            ("ARTIST", "Track Artist"),
            ("PERFORMER", "Performer"),
            ("ALBUMARTIST", "Album Artist"),
        ]);
        let path = NamePattern::new("%a").render(Path::new("/o"), &tags, "ogg");
        assert_eq!(path, PathBuf::from("/o/Album Artist/Unknown album/Album Artist.ogg"));
    }

    #[test]
    fn empty_artist_values_are_skipped() {
        let tags = tags(&[("ALBUM_ARTIST", ""), ("COMPOSER", "Bach")]);
        let path = NamePattern::new("x").render(Path::new("/o"), &tags, "ogg");
        assert_eq!(path, PathBuf::from("/o/Bach/Unknown album/x.ogg"));
    }

    #[test]
    fn only_first_value_is_used() {
        let tags = tags(&[("ALBUM", "One"), ("ALBUM", "Two")]);
        let path = NamePattern::new("%l").render(Path::new("/o"), &tags, "ogg");
        assert_eq!(path, PathBuf::from("/o/Unknown artist/One/One.ogg"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let tags = tags(&[("ARTIST", "A"), ("TITLE", "T"), ("DATE", "1999")]);
        let pattern = NamePattern::new("%d %t");
        let first = pattern.render(Path::new("/o"), &tags, "opus");
        let second = pattern.render(Path::new("/o"), &tags, "opus");
        assert_eq!(first, second);
    }
}
