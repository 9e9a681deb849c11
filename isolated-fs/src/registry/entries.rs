use crate::error::IsolationError;
use crate::Result;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Immutable set of top-level entries owned by one identifier, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TopLevelEntries {
    paths: Vec<PathBuf>,
}

impl TopLevelEntries {
    /// Collect entries, collapsing exact duplicates onto their first occurrence.
    pub(crate) fn collect<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();
        for path in paths {
            let path: PathBuf = path.into();
            if seen.insert(path.clone()) {
                collected.push(path);
            }
        }
        Self { paths: collected }
    }

    #[inline]
    pub(crate) fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }

    /// First entry, in registration order, whose final component is exactly `name`.
    pub(crate) fn find_by_basename(&self, name: &str) -> Option<&Path> {
        let name = OsStr::new(name);
        self.paths
            .iter()
            .find(|path| path.file_name() == Some(name))
            .map(PathBuf::as_path)
    }

    /// Check the conditions strict registration adds on top of `register`.
    pub(crate) fn check_strict(&self) -> Result<()> {
        let mut basenames = HashSet::new();
        for path in &self.paths {
            if !path.is_absolute() {
                return Err(IsolationError::RelativeEntry {
                    entry: path.clone(),
                });
            }
            let Some(basename) = path.file_name() else {
                return Err(IsolationError::MissingBasename {
                    entry: path.clone(),
                });
            };
            if !basenames.insert(basename) {
                return Err(IsolationError::DuplicateBasename {
                    basename: basename.to_string_lossy().into_owned(),
                });
            }
        }
        Ok(())
    }
}
