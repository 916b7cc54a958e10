//! Joining of base path and sub-paths into the canonical endpoint urls.
//!
//! Joined paths are rooted, cleaned the same way `path.Clean` style joins work: empty and `.`
//! segments are dropped, `..` removes the previous segment but never climbs above the root, and
//! the result never ends with a slash unless it is the root itself.

use std::borrow::Cow;
use std::path::{Path, MAIN_SEPARATOR};

use crate::error::{Error, Result};

/// Join `base` and `segment` into a single rooted url path.
///
/// # Examples
///
/// ```rust
/// # use spec_docs::path::join;
/// assert_eq!(join("/api", "docs").unwrap(), "/api/docs");
/// assert_eq!(join("/", "./swagger.json").unwrap(), "/swagger.json");
/// assert_eq!(join("/api/", "/v1//docs/").unwrap(), "/api/v1/docs");
/// ```
pub fn join(base: &str, segment: &str) -> Result<String> {
    check(base, segment, base)?;
    check(base, segment, segment)?;

    let mut parts = Vec::<&str>::new();
    for part in base.split('/').chain(segment.split('/')) {
        match part {
            "" | "." => (),
            ".." => {
                parts.pop();
            }
            part => parts.push(part),
        }
    }

    Ok(format!("/{}", parts.join("/")))
}

/// Url path segment derived from the spec document's file path.
pub(crate) fn file_segment(file_path: &Path) -> Result<Cow<'_, str>> {
    let Some(segment) = file_path.to_str() else {
        return Err(Error::InvalidPath {
            base: String::new(),
            segment: file_path.to_string_lossy().into_owned(),
            reason: "file path is not valid UTF-8",
        });
    };

    if MAIN_SEPARATOR == '/' {
        Ok(Cow::Borrowed(segment))
    } else {
        Ok(Cow::Owned(segment.replace(MAIN_SEPARATOR, "/")))
    }
}

fn check(base: &str, segment: &str, value: &str) -> Result<()> {
    let invalid = |reason| Error::InvalidPath {
        base: base.to_string(),
        segment: segment.to_string(),
        reason,
    };

    let bytes = value.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'?' => return Err(invalid("query is not allowed in a path")),
            b'#' => return Err(invalid("fragment is not allowed in a path")),
            b'%' => {
                let escaped = bytes.get(index + 1..index + 3);
                if !escaped.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return Err(invalid("malformed percent-encoding"));
                }
                index += 2;
            }
            byte if is_path_char(byte) => (),
            _ => return Err(invalid("character is not allowed in a url path")),
        }
        index += 1;
    }

    Ok(())
}

// unreserved / sub-delims / ":" / "@" / "/"
fn is_path_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'@'
                | b'/'
        )
}
