use crate::{IsolatedContext, IsolationError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[test]
fn register_list_crack_and_reject() {
    let context = IsolatedContext::new();
    let id = context.register(["/a/b", "/c/d/e/f/g", "/h"]);

    let listed: HashSet<PathBuf> = context.top_level_paths(&id).unwrap().into_iter().collect();
    let expected: HashSet<PathBuf> = ["/a/b", "/c/d/e/f/g", "/h"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(listed, expected);

    let cracked = context
        .crack(&context.create_virtual_path(&id, "b"))
        .unwrap();
    assert_eq!(cracked.id(), &id);
    assert_eq!(cracked.real_path(), Path::new("/a/b"));

    assert!(matches!(
        context.crack(&context.create_virtual_path(&id, "b/foo/../bar")),
        Err(IsolationError::TraversalRejected { .. })
    ));
    assert!(matches!(
        context.crack(&context.create_virtual_path(&id, "foo")),
        Err(IsolationError::NoMatchingEntry { .. })
    ));
}

#[test]
fn failures_never_carry_a_real_path() {
    let context = IsolatedContext::new();
    let id = context.register(["/secret/area/b"]);
    for virtual_path in [
        format!("/{id}/b/../../etc"),
        format!("/{id}/nope"),
        "/unknown/b".to_string(),
    ] {
        let err = context.crack(&virtual_path).unwrap_err();
        assert!(!err.to_string().contains("/secret/area"), "{err}");
    }
}
