//! Path types for addressing values inside nested containers.
//!
//! A path is a dotted chain of property names, where any property may be
//! followed by a bracketed accessor selecting a list element or a map entry:
//!
//! ```text
//! path     := seg ('.' seg)*
//! seg      := ident ('[' accessor ']')?
//! accessor := integer | '"' chars '"'
//! ```
//!
//! Identifiers may contain any character except `.`, `[` and `]`. Quoted map
//! keys may contain `\"` and `\\` escapes. The empty path refers to the
//! container itself.
//!
//! Two parsers share one scanner:
//!
//! - [`Path::parse`] is strict and reports the first syntax problem.
//! - [`parse_path`] never fails. It keeps every well-formed segment, drops a
//!   bracket whose content is neither an integer nor a quoted string, drops
//!   empty identifiers, and stops at an unterminated bracket. Each dropped
//!   piece is reported with a warning.
//!
//! # Usage
//!
//! ```
//! use templar::path::{Path, Segment};
//!
//! let path = Path::parse(r#"dict["k 1"].items[2].name"#)?;
//! assert_eq!(
//!     path.segments(),
//!     &[
//!         Segment::property("dict"),
//!         Segment::key("k 1"),
//!         Segment::property("items"),
//!         Segment::ListIndex(2),
//!         Segment::property("name"),
//!     ]
//! );
//! assert_eq!(path.to_string(), r#"dict["k 1"].items[2].name"#);
//! # Ok::<(), templar::path::PathError>(())
//! ```

use std::{borrow::Cow, fmt, str::FromStr};

use thiserror::Error;

/// Error type for strict path parsing.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path string does not follow the path grammar.
    #[error("Malformed path '{path}' at byte {position}: {reason}")]
    Malformed {
        path: String,
        position: usize,
        reason: String,
    },
}

impl PathError {
    /// Byte offset where parsing failed.
    pub fn position(&self) -> usize {
        match self {
            PathError::Malformed { position, .. } => *position,
        }
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// One parsed step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Look up a key in the current container.
    Property(String),
    /// Index into the list-of-containers named by the preceding property.
    ListIndex(usize),
    /// Look up a key in the map-of-containers named by the preceding property.
    MapKey(String),
}

impl Segment {
    /// Shorthand for [`Segment::Property`].
    pub fn property(name: impl Into<String>) -> Self {
        Segment::Property(name.into())
    }

    /// Shorthand for [`Segment::MapKey`].
    pub fn key(key: impl Into<String>) -> Self {
        Segment::MapKey(key.into())
    }

    /// Returns true for list index and map key segments.
    pub fn is_accessor(&self) -> bool {
        !matches!(self, Segment::Property(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Property(name) => write!(f, "{name}"),
            Segment::ListIndex(index) => write!(f, "[{index}]"),
            Segment::MapKey(key) => {
                write!(f, "[\"")?;
                for c in key.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "\"]")
            }
        }
    }
}

/// An immutable, parsed path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates the empty path, which refers to the container itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a path string, rejecting anything outside the grammar.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        scan(input, true).map(|segments| Path { segments })
    }

    /// Parses a path string with the lenient policy of [`parse_path`].
    pub fn parse_lenient(input: &str) -> Self {
        Path {
            segments: parse_path(input),
        }
    }

    /// Builder method appending a segment.
    pub fn push(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Builder method appending a property segment.
    pub fn property(self, name: impl Into<String>) -> Self {
        self.push(Segment::Property(name.into()))
    }

    /// Builder method appending a list index segment.
    pub fn index(self, index: usize) -> Self {
        self.push(Segment::ListIndex(index))
    }

    /// Builder method appending a map key segment.
    pub fn key(self, key: impl Into<String>) -> Self {
        self.push(Segment::MapKey(key.into()))
    }

    /// Resolves `other` as a continuation of this path.
    ///
    /// A relative continuation such as `[2]` attaches its accessor to the
    /// last property of `self`.
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the empty path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if the path starts with an accessor and therefore only
    /// makes sense as a continuation of another path.
    pub fn is_relative(&self) -> bool {
        self.segments.first().is_some_and(Segment::is_accessor)
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// The path without its final segment, or `None` for the empty path.
    pub fn parent(&self) -> Option<Path> {
        let (_, rest) = self.segments.split_last()?;
        Some(Path {
            segments: rest.to_vec(),
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !segment.is_accessor() {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path { segments }
    }
}

/// Types that can be used wherever a path is expected.
///
/// Strings are parsed strictly; [`Path`] values are used as is.
pub trait AsPath {
    fn as_path(&self) -> Result<Cow<'_, Path>, PathError>;
}

impl AsPath for Path {
    fn as_path(&self) -> Result<Cow<'_, Path>, PathError> {
        Ok(Cow::Borrowed(self))
    }
}

impl AsPath for str {
    fn as_path(&self) -> Result<Cow<'_, Path>, PathError> {
        Path::parse(self).map(Cow::Owned)
    }
}

impl AsPath for String {
    fn as_path(&self) -> Result<Cow<'_, Path>, PathError> {
        self.as_str().as_path()
    }
}

impl<T: AsPath + ?Sized> AsPath for &T {
    fn as_path(&self) -> Result<Cow<'_, Path>, PathError> {
        (**self).as_path()
    }
}

/// Tokenizes a path string into segments without ever failing.
///
/// See the [module documentation](self) for the recovery policy.
pub fn parse_path(input: &str) -> Vec<Segment> {
    // The lenient scanner recovers from every problem instead of returning it
    scan(input, false).unwrap_or_default()
}

/// What the scanner saw last, used to detect empty identifiers.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Dot,
    Token,
}

fn scan(input: &str, strict: bool) -> Result<Vec<Segment>, PathError> {
    let malformed = |position: usize, reason: &str| PathError::Malformed {
        path: input.to_string(),
        position,
        reason: reason.to_string(),
    };

    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    let mut last = Last::Start;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'.' => {
                if last != Last::Token {
                    if strict {
                        return Err(malformed(pos, "empty segment"));
                    }
                    tracing::warn!(path = input, position = pos, "Dropping empty path segment");
                }
                last = Last::Dot;
                pos += 1;
            }
            b'[' => match scan_accessor(input, pos) {
                Accessor::Segment(segment, next) => {
                    segments.push(segment);
                    last = Last::Token;
                    pos = next;
                }
                Accessor::Invalid(next) => {
                    if strict {
                        return Err(malformed(
                            pos,
                            "accessor is neither an integer nor a quoted string",
                        ));
                    }
                    tracing::warn!(
                        path = input,
                        position = pos,
                        "Dropping accessor that is neither an integer nor a quoted string"
                    );
                    last = Last::Token;
                    pos = next;
                }
                Accessor::Unterminated => {
                    if strict {
                        return Err(malformed(pos, "unterminated bracket"));
                    }
                    tracing::warn!(
                        path = input,
                        position = pos,
                        "Unterminated bracket; ignoring the rest of the path"
                    );
                    return Ok(segments);
                }
            },
            b']' => {
                if strict {
                    return Err(malformed(pos, "unexpected ']'"));
                }
                tracing::warn!(path = input, position = pos, "Skipping stray ']'");
                pos += 1;
            }
            _ => {
                if strict && last == Last::Token {
                    return Err(malformed(pos, "expected '.' or '[' after accessor"));
                }
                let end = input[pos..]
                    .find(['.', '[', ']'])
                    .map_or(input.len(), |offset| pos + offset);
                segments.push(Segment::Property(input[pos..end].to_string()));
                last = Last::Token;
                pos = end;
            }
        }
    }

    if last == Last::Dot {
        if strict {
            return Err(malformed(input.len(), "trailing '.'"));
        }
        tracing::warn!(path = input, "Dropping empty trailing path segment");
    }

    Ok(segments)
}

enum Accessor {
    /// A well-formed accessor and the byte offset just past its `]`.
    Segment(Segment, usize),
    /// A closed bracket with unusable content and the offset past its `]`.
    Invalid(usize),
    /// No closing bracket (or closing quote) before the end of input.
    Unterminated,
}

/// Scans the bracketed accessor starting at `open`, which must index a `[`.
fn scan_accessor(input: &str, open: usize) -> Accessor {
    let body = &input[open + 1..];

    if let Some(quoted) = body.strip_prefix('"') {
        let mut key = String::new();
        let mut chars = quoted.char_indices();
        while let Some((offset, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => key.push(escaped),
                    None => return Accessor::Unterminated,
                },
                '"' => {
                    // open + '[' + '"' + offset + '"'
                    let after_quote = open + 2 + offset + 1;
                    return match input[after_quote..].strip_prefix(']') {
                        Some(_) => Accessor::Segment(Segment::MapKey(key), after_quote + 1),
                        None => match input[after_quote..].find(']') {
                            Some(close) => Accessor::Invalid(after_quote + close + 1),
                            None => Accessor::Unterminated,
                        },
                    };
                }
                c => key.push(c),
            }
        }
        return Accessor::Unterminated;
    }

    let Some(close) = body.find(']') else {
        return Accessor::Unterminated;
    };
    let next = open + 1 + close + 1;
    let content = &body[..close];
    if !content.is_empty() && content.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = content.parse::<usize>() {
            return Accessor::Segment(Segment::ListIndex(index), next);
        }
    }
    Accessor::Invalid(next)
}
