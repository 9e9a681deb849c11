//! Segment grammar for virtual paths.
//!
//! A virtual path is split on the canonical separator (and, on hosts that use a
//! different native separator, on that one too). Empty and `.` segments carry no
//! meaning and are dropped. Everything downstream works on the segment list; no
//! check ever looks at raw substrings of the input.
use std::path::{Component, Path};

/// Separator used in every virtual path we build.
pub const VIRTUAL_SEPARATOR: char = '/';

#[cfg(windows)]
const NATIVE_SEPARATOR: Option<char> = Some('\\');
#[cfg(not(windows))]
const NATIVE_SEPARATOR: Option<char> = None;

const CURRENT_DIR: &str = ".";
const PARENT_DIR: &str = "..";

#[inline]
pub(crate) fn is_separator(c: char) -> bool {
    c == VIRTUAL_SEPARATOR || Some(c) == NATIVE_SEPARATOR
}

/// Rewrite any accepted alternate separator to the canonical one.
pub(crate) fn normalize_separators(text: &str) -> std::borrow::Cow<'_, str> {
    match NATIVE_SEPARATOR {
        Some(native) if text.contains(native) => {
            std::borrow::Cow::Owned(text.replace(native, "/"))
        }
        _ => std::borrow::Cow::Borrowed(text),
    }
}

/// Iterate the meaningful segments of `text`.
pub(crate) fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator)
        .filter(|segment| !segment.is_empty() && *segment != CURRENT_DIR)
}

#[inline]
pub(crate) fn is_parent_dir(segment: &str) -> bool {
    segment == PARENT_DIR
}

/// True when the host reads `segment` as exactly one ordinary path component.
///
/// Joining anything else onto an entry (a drive prefix such as `C:` on Windows,
/// a root, `..`) would replace or climb out of the entry path instead of
/// extending it.
pub(crate) fn is_plain_component(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

/// SUMMARY:
/// A virtual path split into identifier, top-level name and remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedVirtualPath<'a> {
    id: &'a str,
    top_level: Option<&'a str>,
    remainder: Vec<&'a str>,
}

impl<'a> ParsedVirtualPath<'a> {
    pub(crate) fn parse(virtual_path: &'a str) -> Self {
        let mut iter = segments(virtual_path);
        let id = iter.next().unwrap_or("");
        let top_level = iter.next();
        let remainder = iter.collect();
        Self {
            id,
            top_level,
            remainder,
        }
    }

    #[inline]
    pub(crate) fn id(&self) -> &'a str {
        self.id
    }

    #[inline]
    pub(crate) fn top_level(&self) -> Option<&'a str> {
        self.top_level
    }

    #[inline]
    pub(crate) fn remainder(&self) -> &[&'a str] {
        &self.remainder
    }

    /// First remainder segment that would leave the matched entry, if any.
    pub(crate) fn escaping_segment(&self) -> Option<&'a str> {
        self.remainder
            .iter()
            .copied()
            .find(|segment| is_parent_dir(segment) || !is_plain_component(segment))
    }
}
