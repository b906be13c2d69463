//! Property path syntax.
//!
//! ```text
//! path    := segment ('.' name)*
//! segment := name bracket* | bracket+
//! bracket := '[' (index | key | quoted) ']'
//! ```
//!
//! An `index` is a canonical non-negative decimal (`0`, `17`, but not `007`),
//! any other bracket content is a map key. Quoted keys (`['a.b']`, `["x"]`)
//! may contain `.`, `[` and `]`.

use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Tokens

/// One step of a property path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathToken<'a> {
    /// `name`
    Property(&'a str),
    /// `[3]`
    Index(usize),
    /// `[key]`, `['key']`
    Key(&'a str),
}

/// A token and the byte offset where it starts in the source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegment<'a> {
    token: PathToken<'a>,
    offset: usize,
}

impl<'a> PathSegment<'a> {
    #[inline]
    pub fn token(&self) -> &PathToken<'a> {
        &self.token
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for PathToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Property(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) if is_plain_key(key) => write!(f, "[{key}]"),
            Self::Key(key) if key.contains('\'') => write!(f, "[\"{key}\"]"),
            Self::Key(key) => write!(f, "['{key}']"),
        }
    }
}

/// Keys that read back unchanged without quotes.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && parse_index(key).is_none()
        && !key.starts_with(['\'', '"'])
        && !key.contains(['[', ']'])
}

fn parse_index(text: &str) -> Option<usize> {
    let canonical = text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));
    if canonical { text.parse().ok() } else { None }
}

// -----------------------------------------------------------------------------
// Errors

/// The path string does not follow the path syntax.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{reason} at byte {offset}")]
pub struct PathError {
    pub offset: usize,
    pub reason: &'static str,
}

#[inline]
fn fail<T>(offset: usize, reason: &'static str) -> Result<T, PathError> {
    Err(PathError { offset, reason })
}

// -----------------------------------------------------------------------------
// PropertyPath

/// A parsed property path, borrowing names and keys from the source string.
///
/// # Examples
///
/// ```
/// use bw_beans::{PathToken, PropertyPath};
///
/// let path = PropertyPath::parse("spouse.friends[2].someMap['a.b']").unwrap();
/// let tokens: Vec<_> = path.segments().iter().map(|s| *s.token()).collect();
/// assert_eq!(tokens, [
///     PathToken::Property("spouse"),
///     PathToken::Property("friends"),
///     PathToken::Index(2),
///     PathToken::Property("someMap"),
///     PathToken::Key("a.b"),
/// ]);
///
/// assert!(PropertyPath::parse("['").is_err());
/// assert!(PropertyPath::parse("a..b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath<'a> {
    source: &'a str,
    segments: Vec<PathSegment<'a>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Beginning of the path.
    Start,
    /// After a `.`.
    Name,
    /// After a name or a closing bracket.
    Separator,
}

impl<'a> PropertyPath<'a> {
    /// Parses `source`. Whitespace around tokens is ignored.
    pub fn parse(source: &'a str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        let mut expect = Expect::Start;
        let mut pos = 0;

        while let Some(c) = source[pos..].chars().next() {
            if c.is_whitespace() {
                pos += c.len_utf8();
                continue;
            }
            match (expect, c) {
                (Expect::Start | Expect::Separator, '[') => {
                    let (token, end) = parse_bracket(source, pos)?;
                    segments.push(PathSegment { token, offset: pos });
                    pos = end;
                    expect = Expect::Separator;
                }
                (Expect::Separator, '.') => {
                    pos += 1;
                    expect = Expect::Name;
                }
                (_, ']') => return fail(pos, "unexpected ']'"),
                (Expect::Start | Expect::Name, '.' | '[') => {
                    return fail(pos, "empty property name");
                }
                (Expect::Start | Expect::Name, _) => {
                    let end = source[pos..]
                        .find(['.', '[', ']'])
                        .map_or(source.len(), |i| pos + i);
                    let name = source[pos..end].trim_end();
                    if let Some(i) = name.find(char::is_whitespace) {
                        return fail(pos + i, "whitespace inside property name");
                    }
                    segments.push(PathSegment {
                        token: PathToken::Property(name),
                        offset: pos,
                    });
                    pos = end;
                    expect = Expect::Separator;
                }
                (Expect::Separator, _) => {
                    return fail(pos, "expected '.' or '[' after closing bracket");
                }
            }
        }

        match expect {
            Expect::Start => fail(0, "empty property path"),
            Expect::Name => fail(source.len(), "empty property name"),
            Expect::Separator => Ok(Self { source, segments }),
        }
    }

    /// The string this path was parsed from.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment<'a>] {
        &self.segments
    }

    /// Number of segments, never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Canonical text of the first `count` segments.
    ///
    /// ```
    /// use bw_beans::PropertyPath;
    ///
    /// let path = PropertyPath::parse(" spouse . friends [ 0 ] .name").unwrap();
    /// assert_eq!(path.prefix(3), "spouse.friends[0]");
    /// ```
    pub fn prefix(&self, count: usize) -> String {
        let mut out = String::new();
        for (index, segment) in self.segments.iter().take(count).enumerate() {
            if index > 0 && matches!(segment.token, PathToken::Property(_)) {
                out.push('.');
            }
            // Writing into a `String` cannot fail.
            let _ = fmt::write(&mut out, format_args!("{}", segment.token));
        }
        out
    }
}

impl fmt::Display for PropertyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix(self.segments.len()))
    }
}

/// Parses `[...]` starting at `open`, returning the token and the offset past `]`.
fn parse_bracket(source: &str, open: usize) -> Result<(PathToken<'_>, usize), PathError> {
    let inner_start = open + 1;
    let rest = &source[inner_start..];
    let skipped = rest.len() - rest.trim_start().len();
    let content = inner_start + skipped;

    match source[content..].chars().next() {
        None => fail(open, "unterminated '['"),
        Some(quote @ ('\'' | '"')) => {
            let key_start = content + 1;
            let Some(len) = source[key_start..].find(quote) else {
                return fail(content, "unterminated quoted key");
            };
            let key = &source[key_start..key_start + len];
            let after = key_start + len + 1;
            let rest = &source[after..];
            let close = after + (rest.len() - rest.trim_start().len());
            match source[close..].chars().next() {
                Some(']') => Ok((PathToken::Key(key), close + 1)),
                Some(_) => fail(close, "expected ']' after quoted key"),
                None => fail(open, "unterminated '['"),
            }
        }
        Some(_) => {
            let Some(len) = source[content..].find(']') else {
                return fail(open, "unterminated '['");
            };
            let raw = source[content..content + len].trim_end();
            if raw.is_empty() {
                return fail(open, "empty brackets");
            }
            if let Some(i) = raw.find('[') {
                return fail(content + i, "unexpected '[' inside brackets");
            }
            let token = match parse_index(raw) {
                Some(index) => PathToken::Index(index),
                None => PathToken::Key(raw),
            };
            Ok((token, content + len + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PathError, PathToken, PropertyPath};

    fn tokens(source: &str) -> Vec<PathToken<'_>> {
        let path = PropertyPath::parse(source).unwrap();
        path.segments().iter().map(|s| *s.token()).collect()
    }

    fn error(source: &str) -> PathError {
        PropertyPath::parse(source).unwrap_err()
    }

    #[test]
    fn names_and_brackets() {
        use PathToken::*;

        assert_eq!(tokens("name"), [Property("name")]);
        assert_eq!(tokens("a[0][1].b"), [Property("a"), Index(0), Index(1), Property("b")]);
        assert_eq!(tokens("[3]"), [Index(3)]);
        assert_eq!(tokens("map[key]"), [Property("map"), Key("key")]);
        assert_eq!(tokens("map[007]"), [Property("map"), Key("007")]);
        assert_eq!(tokens("map[\"it's\"]"), [Property("map"), Key("it's")]);
        assert_eq!(tokens("map['']"), [Property("map"), Key("")]);
        assert_eq!(tokens("map['a[0].b']"), [Property("map"), Key("a[0].b")]);
    }

    #[test]
    fn whitespace_around_tokens() {
        use PathToken::*;

        assert_eq!(tokens("  spouse . name "), [Property("spouse"), Property("name")]);
        assert_eq!(tokens("list[ 2 ]"), [Property("list"), Index(2)]);
        assert_eq!(tokens("map[ ' k ' ]"), [Property("map"), Key(" k ")]);
    }

    #[test]
    fn offsets() {
        let path = PropertyPath::parse("ab.cd[1]").unwrap();
        let offsets: Vec<_> = path.segments().iter().map(|s| s.offset()).collect();
        assert_eq!(offsets, [0, 3, 5]);
    }

    #[test]
    fn malformed() {
        assert_eq!(error("['").reason, "unterminated quoted key");
        assert_eq!(error("[']").reason, "unterminated quoted key");
        assert_eq!(error("a[0").reason, "unterminated '['");
        assert_eq!(error("a[").offset, 1);
        assert_eq!(error("a[]").reason, "empty brackets");
        assert_eq!(error("a..b").offset, 2);
        assert_eq!(error("a.").reason, "empty property name");
        assert_eq!(error(".a").reason, "empty property name");
        assert_eq!(error("a]").reason, "unexpected ']'");
        assert_eq!(error("a b").reason, "whitespace inside property name");
        assert_eq!(error("a[0]b").offset, 4);
        assert_eq!(error("a['k'x]").reason, "expected ']' after quoted key");
        assert_eq!(error("   ").reason, "empty property path");
    }

    #[test]
    fn display_round_trip() {
        for source in [
            "name",
            "spouse.name",
            "a[0][1].b",
            "[2].x",
            "map[key]",
            "map['a.b']",
            "map[\"it's\"]",
            "map['007']",
            "map['']",
            "map[' padded ']",
        ] {
            let path = PropertyPath::parse(source).unwrap();
            let text = path.to_string();
            let again = PropertyPath::parse(&text).unwrap();
            assert_eq!(tokens(source), tokens(&text), "{source} -> {text}");
            assert_eq!(path.len(), again.len());
        }
        assert_eq!(PropertyPath::parse(" a [ 1 ] . b").unwrap().to_string(), "a[1].b");
    }
}
