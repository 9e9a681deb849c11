//! SUMMARY:
//! Define error types for registering isolated filesystems and cracking virtual paths.
//!
//! OVERVIEW:
//! This module exposes the crate-wide error enum `IsolationError`. Crack failures
//! (`InvalidIdentifier`, `NoMatchingEntry`, `TraversalRejected`) are returned for
//! attacker-controlled input and never carry a real path. The remaining variants
//! are only produced by `IsolatedContext::try_register`.
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

const MAX_ERROR_TEXT_LEN: usize = 256;

// Internal helper: render untrusted text for error messages (truncate long values).
pub(crate) fn truncate_display(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_len {
        return text.to_owned();
    }
    let keep = max_len.saturating_sub(5) / 2;
    let start: String = text.chars().take(keep).collect();
    let mut tail_chars: Vec<char> = text.chars().rev().take(keep).collect();
    tail_chars.reverse();
    let end: String = tail_chars.into_iter().collect();
    format!("{start}...{end}")
}

fn truncate_path_display(path: &Path) -> String {
    truncate_display(&path.to_string_lossy(), MAX_ERROR_TEXT_LEN)
}

/// SUMMARY:
/// Represent failures produced while cracking virtual paths or registering entries strictly.
///
/// VARIANTS:
/// - `InvalidIdentifier`: The identifier is missing, was never registered, or was revoked.
/// - `NoMatchingEntry`: No top-level entry has the requested basename.
/// - `TraversalRejected`: The remainder under the matched entry contains a `..` segment.
/// - `RelativeEntry`, `MissingBasename`, `DuplicateBasename`: Rejected by strict registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsolationError {
    /// SUMMARY:
    /// The identifier segment of a virtual path does not name a live isolated filesystem.
    ///
    /// FIELDS:
    /// - `id` (`String`): The candidate identifier as presented (empty when absent).
    InvalidIdentifier { id: String },
    /// SUMMARY:
    /// The first component after the identifier matches no top-level entry basename.
    ///
    /// FIELDS:
    /// - `id` (`String`): The live identifier that was resolved.
    /// - `component` (`String`): The requested top-level name.
    NoMatchingEntry { id: String, component: String },
    /// SUMMARY:
    /// The path below the matched entry would walk out of the entry's subtree.
    ///
    /// FIELDS:
    /// - `id` (`String`): The live identifier that was resolved.
    /// - `virtual_path` (`String`): The rejected virtual path as presented.
    TraversalRejected { id: String, virtual_path: String },
    /// A top-level entry handed to strict registration is not absolute.
    RelativeEntry { entry: PathBuf },
    /// A top-level entry has no final component (for example `/`) and could never be cracked.
    MissingBasename { entry: PathBuf },
    /// Two top-level entries in one registration share a basename.
    DuplicateBasename { basename: String },
}

impl IsolationError {
    #[inline]
    pub(crate) fn invalid_identifier(id: &str) -> Self {
        Self::InvalidIdentifier { id: id.to_owned() }
    }

    #[inline]
    pub(crate) fn no_matching_entry(id: &str, component: &str) -> Self {
        Self::NoMatchingEntry {
            id: id.to_owned(),
            component: component.to_owned(),
        }
    }

    #[inline]
    pub(crate) fn traversal_rejected(id: &str, virtual_path: &str) -> Self {
        Self::TraversalRejected {
            id: id.to_owned(),
            virtual_path: virtual_path.to_owned(),
        }
    }

    /// SUMMARY:
    /// Return true for errors produced by cracking (as opposed to strict registration).
    pub fn is_crack_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier { .. }
                | Self::NoMatchingEntry { .. }
                | Self::TraversalRejected { .. }
        )
    }
}

impl fmt::Display for IsolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsolationError::InvalidIdentifier { id } => {
                let id = truncate_display(id, MAX_ERROR_TEXT_LEN);
                write!(f, "Unknown or revoked isolated filesystem id '{id}'")
            }
            IsolationError::NoMatchingEntry { id, component } => {
                let component = truncate_display(component, MAX_ERROR_TEXT_LEN);
                write!(
                    f,
                    "No top-level entry named '{component}' in isolated filesystem '{id}'"
                )
            }
            IsolationError::TraversalRejected { id, virtual_path } => {
                let virtual_path = truncate_display(virtual_path, MAX_ERROR_TEXT_LEN);
                write!(
                    f,
                    "Virtual path '{virtual_path}' escapes its top-level entry in isolated filesystem '{id}'"
                )
            }
            IsolationError::RelativeEntry { entry } => {
                write!(
                    f,
                    "Top-level entry '{}' is not an absolute path",
                    truncate_path_display(entry)
                )
            }
            IsolationError::MissingBasename { entry } => {
                write!(
                    f,
                    "Top-level entry '{}' has no final component",
                    truncate_path_display(entry)
                )
            }
            IsolationError::DuplicateBasename { basename } => {
                let basename = truncate_display(basename, MAX_ERROR_TEXT_LEN);
                write!(f, "More than one top-level entry is named '{basename}'")
            }
        }
    }
}

impl Error for IsolationError {}
