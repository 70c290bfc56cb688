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

/// Names of the external programs a run shells out to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tools {
    pub opusenc: OsString,
    pub oggenc: OsString,
    pub rsgain: OsString,
    pub dos2unix: OsString,
    pub shnsplit: OsString,
    pub cuetag: OsString,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            opusenc: "opusenc".into(),
            oggenc: "oggenc".into(),
            rsgain: "rsgain".into(),
            dos2unix: "dos2unix".into(),
            shnsplit: "shnsplit".into(),
            cuetag: "cuetag.sh".into(),
        }
    }
}
