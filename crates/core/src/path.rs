//! Navigation paths.
//!
//! A [`NavPath`] is a rooted sequence of segments. Both `/` and `\` are
//! accepted as separators and empty segments are dropped, so `/people/1`,
//! `\people\1` and `people//1/` are the same path. Rendering always uses
//! the canonical `\` separator.
//!
//! A path may start with a bracketed store descriptor, e.g.
//! `\\[Data Source=app.db]\people\1`. The descriptor identifies the drive
//! and is stripped before the segments are parsed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical separator used when rendering paths.
pub const SEPARATOR: char = '\\';

/// A rooted, normalized path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavPath {
    segments: Vec<String>,
}

impl NavPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path, stripping any store descriptor prefix.
    pub fn parse(input: &str) -> Self {
        let rest = strip_store_prefix(input);
        let segments = rest
            .split(['/', '\\'])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        NavPath { segments }
    }

    /// Build a path from already-split segments. Empty segments are dropped.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NavPath {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
        }
    }

    /// Path segments from the root down.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// True for the bare root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parent path; the root has none.
    pub fn parent(&self) -> Option<NavPath> {
        if self.is_root() {
            return None;
        }
        Some(NavPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Final segment; the root has none.
    pub fn child_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Append a child segment (which may itself contain separators).
    pub fn join(&self, child: &str) -> NavPath {
        let mut segments = self.segments.clone();
        segments.extend(
            child
                .split(['/', '\\'])
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        NavPath { segments }
    }

    /// True if the final segment is a wildcard pattern.
    pub fn has_wildcard(&self) -> bool {
        self.child_name().map(is_wildcard).unwrap_or(false)
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", SEPARATOR);
        }
        for segment in &self.segments {
            write!(f, "{}{}", SEPARATOR, segment)?;
        }
        Ok(())
    }
}

impl From<&str> for NavPath {
    fn from(s: &str) -> Self {
        NavPath::parse(s)
    }
}

impl From<String> for NavPath {
    fn from(s: String) -> Self {
        NavPath::parse(&s)
    }
}

/// Split a leading `[descriptor]` (after any separators) off a path.
///
/// Returns the descriptor text and the remainder, or `None` when the path
/// carries no descriptor. The descriptor ends at the first `]`.
pub fn split_store_prefix(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim_start_matches(['/', '\\']);
    let inner = trimmed.strip_prefix('[')?;
    let close = inner.find(']')?;
    if close == 0 {
        return None;
    }
    Some((&inner[..close], &inner[close + 1..]))
}

/// Remove a leading store descriptor, if any.
pub fn strip_store_prefix(input: &str) -> &str {
    match split_store_prefix(input) {
        Some((_, rest)) => rest,
        None => input,
    }
}

/// True if `name` survives as a single path segment.
///
/// Names that are empty or contain a separator cannot be reached by path.
pub fn is_addressable(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\'])
}

/// True if `segment` contains glob metacharacters.
pub fn is_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?'])
}

/// Glob match supporting `*` (any run) and `?` (any one character).
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    let (mut pi, mut ni) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            backtrack = Some((pi, ni));
            pi += 1;
        } else if let Some((star, matched)) = backtrack {
            pi = star + 1;
            ni = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}
