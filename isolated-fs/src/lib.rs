//! # isolated-fs
//!
//! Hand trusted filesystem locations to less-trusted code by name only, and map the names
//! back without letting anyone climb out.
//!
//! Trusted code registers a set of absolute paths ("top-level entries") with an
//! [`IsolatedContext`] and receives an opaque [`IsolatedId`]. From then on the entries are
//! referred to through virtual paths of the form `/<id>/<entry-basename>/<nested...>`.
//! When a virtual path comes back from untrusted code, [`IsolatedContext::crack`] turns it
//! into the identifier and the real path it denotes, or refuses it.
//!
//! Cracking is a pure string transformation. It never touches the filesystem, never
//! checks existence, and never follows symlinks; it only guarantees that the real path it
//! returns is a registered entry extended by plain components, with no `..` anywhere
//! below the entry.
//!
//! ## Quick start
//!
//! ```rust
//! use isolated_fs::{IsolatedContext, IsolationError};
//! use std::path::Path;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let context = IsolatedContext::new();
//! let id = context.register(["/a/b", "/c/d/e/f/g", "/h"]);
//!
//! // Trusted side: build a virtual path.
//! let virtual_path = context.create_virtual_path(&id, "b/report.txt");
//!
//! // Untrusted side hands it back: crack it.
//! let cracked = context.crack(&virtual_path)?;
//! assert_eq!(cracked.real_path(), Path::new("/a/b/report.txt"));
//!
//! // Traversal below the entry is refused, wherever it appears.
//! let hostile = context.create_virtual_path(&id, "b/foo/../bar");
//! assert!(matches!(
//!     context.crack(&hostile),
//!     Err(IsolationError::TraversalRejected { .. })
//! ));
//!
//! // `/<id>` is the synthetic root: it succeeds with an empty real path.
//! assert!(context.crack(&format!("/{id}"))?.is_virtual_root());
//!
//! // Revoked ids are indistinguishable from ids that never existed.
//! context.revoke(&id);
//! assert!(context.top_level_paths(&id).is_none());
//! assert!(matches!(
//!     context.crack(&virtual_path),
//!     Err(IsolationError::InvalidIdentifier { .. })
//! ));
//! # Ok(()) }
//! ```
//!
//! ## Virtual path grammar
//!
//! - Segments are separated by `/`. On Windows `\` is accepted as well and treated the same.
//! - Empty segments (leading, doubled or trailing separators) and `.` segments are ignored.
//! - Segment 1 is the identifier. Segment 2, if present, must equal the final component
//!   of one registered entry, compared exactly and case-sensitively.
//! - Every later segment must be a plain component: `..` is rejected, as is anything the
//!   host would not treat as a single ordinary component.
//!
//! Building a virtual path ([`create_virtual_path`]) performs no validation at all; the
//! crack is the trust boundary.
//!
//! ## Entries that share a basename
//!
//! [`IsolatedContext::register`] accepts any set; when two entries have the same final
//! component the first one in iteration order wins. [`IsolatedContext::try_register`]
//! refuses such sets, along with relative entries and entries without a basename.
//!
//! ## Concurrency
//!
//! `IsolatedContext` is `Send + Sync`. All registry operations take one short-lived lock
//! and do no I/O; share the context through `&` or `Arc` across threads.
//!
//! ## Logging
//!
//! Registry and crack outcomes are emitted as `tracing` events (`debug`, and `warn` for
//! rejected traversal). Install a subscriber in the application to see them.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`IsolatedId`] as a plain string.
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod path;
pub mod registry;

// Public exports
pub use error::IsolationError;
pub use id::{IdGenerator, IsolatedId, RandomIdGenerator};
pub use path::cracked::CrackedPath;
pub use path::segments::VIRTUAL_SEPARATOR;
pub use path::virtual_path::create_virtual_path;
pub use registry::IsolatedContext;

/// Result type alias for this crate's operations.
pub type Result<T> = std::result::Result<T, IsolationError>;

#[cfg(test)]
mod tests;
