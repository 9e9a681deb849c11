use crate::path::segments::{is_separator, normalize_separators, VIRTUAL_SEPARATOR};
use std::path::Path;

/// SUMMARY:
/// Build the virtual path that names `relative` inside the isolated filesystem `id`.
///
/// DETAILS:
/// The result is `/<id>/<relative>` with host separators rewritten to `/` and leading
/// separators of `relative` removed, so `""` and `"/"` both produce the virtual root
/// `/<id>/`. Nothing is validated here: unknown identifiers and `..` segments are
/// carried through as-is and only rejected when the path is cracked. Non-UTF-8
/// relative paths are converted lossily and will not match any entry.
///
/// PARAMETERS:
/// - `id` (`AsRef<str>`): Identifier returned by `IsolatedContext::register`.
/// - `relative` (`AsRef<Path>`): Top-level entry basename, optionally followed by a nested path.
///
/// RETURNS:
/// - `String`: The virtual path text.
///
/// EXAMPLE:
/// ```rust
/// use isolated_fs::create_virtual_path;
/// assert_eq!(create_virtual_path("ABCD", "b/foo.txt"), "/ABCD/b/foo.txt");
/// assert_eq!(create_virtual_path("ABCD", "/"), "/ABCD/");
/// // Construction never fails, even for hostile input.
/// assert_eq!(create_virtual_path("ABCD", "b/../x"), "/ABCD/b/../x");
/// ```
pub fn create_virtual_path<S: AsRef<str>, P: AsRef<Path>>(id: S, relative: P) -> String {
    let id = id.as_ref();
    let relative = relative.as_ref().to_string_lossy();
    let relative = normalize_separators(&relative);
    let relative = relative.trim_start_matches(is_separator);

    let mut virtual_path = String::with_capacity(id.len() + relative.len() + 2);
    virtual_path.push(VIRTUAL_SEPARATOR);
    virtual_path.push_str(id);
    virtual_path.push(VIRTUAL_SEPARATOR);
    virtual_path.push_str(relative);
    virtual_path
}
