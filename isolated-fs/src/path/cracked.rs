use crate::error::IsolationError;
use crate::id::IsolatedId;
use crate::path::segments::ParsedVirtualPath;
use crate::registry::entries::TopLevelEntries;
use crate::Result;
use std::path::{Path, PathBuf};

/// SUMMARY:
/// Hold the validated result of cracking a virtual path.
///
/// DETAILS:
/// `real_path()` is either empty, for the synthetic root of the isolated filesystem
/// (which has no single backing directory), or a registered top-level entry extended by
/// plain components only. A `CrackedPath` can only be obtained from
/// `IsolatedContext::crack`, so holding one proves the check happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrackedPath {
    id: IsolatedId,
    real_path: PathBuf,
}

impl CrackedPath {
    #[inline]
    pub fn id(&self) -> &IsolatedId {
        &self.id
    }

    #[inline]
    pub fn real_path(&self) -> &Path {
        &self.real_path
    }

    /// SUMMARY:
    /// Return true when the virtual path named the isolated filesystem's root.
    #[inline]
    pub fn is_virtual_root(&self) -> bool {
        self.real_path.as_os_str().is_empty()
    }

    #[inline]
    pub fn into_parts(self) -> (IsolatedId, PathBuf) {
        (self.id, self.real_path)
    }
}

// Validate the post-lookup part of a crack. Runs outside the registry lock on an
// immutable snapshot of the identifier's entries.
pub(crate) fn resolve(
    id: IsolatedId,
    entries: &TopLevelEntries,
    parsed: &ParsedVirtualPath<'_>,
    virtual_path: &str,
) -> Result<CrackedPath> {
    let Some(top_level) = parsed.top_level() else {
        tracing::debug!(id = %id, "cracked isolated filesystem root");
        return Ok(CrackedPath {
            id,
            real_path: PathBuf::new(),
        });
    };

    let Some(entry) = entries.find_by_basename(top_level) else {
        tracing::debug!(id = %id, component = top_level, "no top-level entry matches");
        return Err(IsolationError::no_matching_entry(id.as_str(), top_level));
    };

    if let Some(segment) = parsed.escaping_segment() {
        tracing::warn!(
            id = %id,
            segment,
            "rejected virtual path escaping its top-level entry"
        );
        return Err(IsolationError::traversal_rejected(id.as_str(), virtual_path));
    }

    let mut real_path = entry.to_path_buf();
    for segment in parsed.remainder() {
        real_path.push(segment);
    }
    tracing::debug!(id = %id, real_path = %real_path.display(), "cracked virtual path");
    Ok(CrackedPath { id, real_path })
}
