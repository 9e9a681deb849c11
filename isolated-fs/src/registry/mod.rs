//! SUMMARY:
//! The isolation registry: identifier lifecycle and the trust boundary for cracking.
//!
//! OVERVIEW:
//! `IsolatedContext` maps each live `IsolatedId` to an immutable set of top-level
//! entries. Register, revoke, entry listing, and the lookup step of a crack all run
//! under one mutex and never perform I/O, so every call is short and linearizable.
//! Validation of the rest of a virtual path happens after the lock is released, on a
//! shared snapshot of the (immutable) entry set.
pub(crate) mod entries;

use crate::error::IsolationError;
use crate::id::{IdGenerator, IsolatedId, RandomIdGenerator};
use crate::path::cracked::{self, CrackedPath};
use crate::path::segments::{is_separator, ParsedVirtualPath};
use crate::path::virtual_path;
use crate::Result;
use entries::TopLevelEntries;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type TopLevelMap = HashMap<IsolatedId, Arc<TopLevelEntries>>;

/// SUMMARY:
/// Own the set of live isolated filesystems and crack virtual paths against them.
///
/// DETAILS:
/// Construct one per process (or per test) and share it by reference or `Arc`; there is
/// no hidden global instance. Registration never fails, revocation of an unknown id is a
/// no-op, and cracking reports every failure through `IsolationError` without ever
/// handing back a real path alongside it.
///
/// EXAMPLE:
/// ```rust
/// use isolated_fs::{IsolatedContext, IsolationError};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let context = IsolatedContext::new();
/// let id = context.register(["/srv/uploads/photos", "/srv/shared/docs"]);
///
/// let virtual_path = context.create_virtual_path(&id, "photos/2024/cat.png");
/// let cracked = context.crack(&virtual_path)?;
/// assert_eq!(cracked.id(), &id);
/// assert!(cracked.real_path().ends_with("photos/2024/cat.png"));
///
/// let escape = context.create_virtual_path(&id, "photos/../../etc/passwd");
/// assert!(matches!(
///     context.crack(&escape),
///     Err(IsolationError::TraversalRejected { .. })
/// ));
/// # Ok(()) }
/// ```
pub struct IsolatedContext<G = RandomIdGenerator> {
    generator: G,
    toplevels: Mutex<TopLevelMap>,
}

impl IsolatedContext {
    /// SUMMARY:
    /// Create an empty registry that mints random identifiers.
    #[inline]
    pub fn new() -> Self {
        Self::with_generator(RandomIdGenerator)
    }
}

impl Default for IsolatedContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> fmt::Debug for IsolatedContext<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsolatedContext")
            .field("live_ids", &self.lock().len())
            .finish_non_exhaustive()
    }
}

impl<G> IsolatedContext<G> {
    // Poisoning is recovered: every critical section leaves the map consistent, and
    // register/revoke must stay infallible.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, TopLevelMap> {
        self.toplevels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// SUMMARY:
    /// Remove the association for `id`.
    ///
    /// RETURNS:
    /// - `bool`: `true` if `id` was live. Unknown or already-revoked ids are a no-op returning `false`.
    ///
    /// DETAILS:
    /// Once this returns, every lookup of `id` fails. Real paths cracked earlier stay
    /// with their holders; revocation does not reach them.
    pub fn revoke<S: AsRef<str>>(&self, id: S) -> bool {
        let id = id.as_ref();
        let removed = self.lock().remove(id).is_some();
        if removed {
            tracing::debug!(id, "revoked isolated filesystem");
        }
        removed
    }

    /// SUMMARY:
    /// Revoke every live identifier. Returns how many were removed.
    pub fn revoke_all(&self) -> usize {
        let drained = std::mem::take(&mut *self.lock());
        let count = drained.len();
        if count > 0 {
            tracing::debug!(count, "revoked all isolated filesystems");
        }
        count
    }

    /// SUMMARY:
    /// Return the top-level entries registered under `id`.
    ///
    /// RETURNS:
    /// - `Option<Vec<PathBuf>>`: `None` for unknown or revoked ids; otherwise the entries in
    ///   registration order (exact duplicates collapsed). An empty registration yields `Some(vec![])`.
    pub fn top_level_paths<S: AsRef<str>>(&self, id: S) -> Option<Vec<PathBuf>> {
        self.lock()
            .get(id.as_ref())
            .map(|entries| entries.paths().to_vec())
    }

    /// SUMMARY:
    /// Return true while `id` is registered and not revoked.
    pub fn is_registered<S: AsRef<str>>(&self, id: S) -> bool {
        self.lock().contains_key(id.as_ref())
    }

    /// SUMMARY:
    /// Number of live identifiers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// SUMMARY:
    /// Build a virtual path for `relative` under `id`. See [`crate::create_virtual_path`].
    ///
    /// DETAILS:
    /// Does not consult the registry and never fails; validation happens in [`Self::crack`].
    #[inline]
    pub fn create_virtual_path<S: AsRef<str>, P: AsRef<Path>>(&self, id: S, relative: P) -> String {
        virtual_path::create_virtual_path(id, relative)
    }

    /// SUMMARY:
    /// Validate `virtual_path` and map it back to its identifier and real path.
    ///
    /// DETAILS:
    /// The first segment names the isolated filesystem. With nothing after it the result
    /// is the virtual root (empty real path). Otherwise the next segment must equal the
    /// basename of a registered entry (exact, case-sensitive, first match in registration
    /// order) and no later segment may be `..` or anything other than a plain component.
    /// Both `/` and the host separator are accepted.
    ///
    /// ERRORS:
    /// - `IsolationError::InvalidIdentifier`: No identifier segment, or the id is unknown or revoked.
    /// - `IsolationError::NoMatchingEntry`: The top-level name matches no entry.
    /// - `IsolationError::TraversalRejected`: The remainder would leave the matched entry.
    pub fn crack(&self, virtual_path: &str) -> Result<CrackedPath> {
        let parsed = ParsedVirtualPath::parse(virtual_path);
        let found = self
            .lock()
            .get_key_value(parsed.id())
            .map(|(id, entries)| (id.clone(), Arc::clone(entries)));
        let Some((id, entries)) = found else {
            tracing::debug!(id = parsed.id(), "crack of unknown isolated filesystem");
            return Err(IsolationError::invalid_identifier(parsed.id()));
        };
        cracked::resolve(id, &entries, &parsed, virtual_path)
    }
}

impl<G: IdGenerator> IsolatedContext<G> {
    /// SUMMARY:
    /// Create an empty registry that mints identifiers with `generator`.
    pub fn with_generator(generator: G) -> Self {
        Self {
            generator,
            toplevels: Mutex::new(HashMap::new()),
        }
    }

    /// SUMMARY:
    /// Register a set of top-level entries and return the identifier that now names them.
    ///
    /// DETAILS:
    /// Always succeeds and accepts an empty set. Entries are expected to be absolute;
    /// exact duplicates are collapsed. When two entries share a basename, cracking resolves
    /// to the first one in iteration order. Use [`Self::try_register`] to refuse such sets.
    pub fn register<I, P>(&self, paths: I) -> IsolatedId
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.insert(TopLevelEntries::collect(paths))
    }

    /// SUMMARY:
    /// Register only if every entry is absolute, has a basename, and no basename repeats.
    ///
    /// ERRORS:
    /// - `IsolationError::RelativeEntry`: An entry is not absolute on this host.
    /// - `IsolationError::MissingBasename`: An entry (such as `/`) has no final component.
    /// - `IsolationError::DuplicateBasename`: Two distinct entries share a basename.
    pub fn try_register<I, P>(&self, paths: I) -> Result<IsolatedId>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let entries = TopLevelEntries::collect(paths);
        entries.check_strict()?;
        Ok(self.insert(entries))
    }

    fn insert(&self, entries: TopLevelEntries) -> IsolatedId {
        let count = entries.len();
        let entries = Arc::new(entries);
        let mut toplevels = self.lock();
        let id = loop {
            let candidate = self.generator.generate();
            debug_assert!(
                !candidate.as_str().is_empty() && !candidate.as_str().contains(is_separator),
                "generated id cannot be embedded in a virtual path"
            );
            if !toplevels.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!(id = %candidate, "generated id collides with a live one, retrying");
        };
        toplevels.insert(id.clone(), entries);
        drop(toplevels);
        tracing::debug!(id = %id, entries = count, "registered isolated filesystem");
        id
    }
}

#[cfg(test)]
mod tests;
