use super::test_paths;
use crate::id::{IdGenerator, IsolatedId};
use crate::IsolatedContext;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

#[test]
fn register_returns_a_non_empty_id_and_lists_entries() {
    let context = IsolatedContext::new();
    let paths = test_paths();
    let id = context.register(paths.clone());
    assert!(!id.as_str().is_empty());

    let toplevels = context.top_level_paths(&id).unwrap();
    assert_eq!(toplevels.len(), paths.len());
    let expected: HashSet<PathBuf> = paths.into_iter().collect();
    for toplevel in &toplevels {
        assert!(expected.contains(toplevel), "unexpected entry {toplevel:?}");
    }
}

#[test]
fn entries_keep_registration_order() {
    let context = IsolatedContext::new();
    let id = context.register(["/z/last", "/a/first", "/m/middle"]);
    assert_eq!(
        context.top_level_paths(&id).unwrap(),
        [
            PathBuf::from("/z/last"),
            PathBuf::from("/a/first"),
            PathBuf::from("/m/middle")
        ]
    );
}

#[test]
fn exact_duplicates_collapse_onto_first_occurrence() {
    let context = IsolatedContext::new();
    let id = context.register(["/a/b", "/c/d", "/a/b"]);
    assert_eq!(
        context.top_level_paths(&id).unwrap(),
        [PathBuf::from("/a/b"), PathBuf::from("/c/d")]
    );
}

#[test]
fn empty_registration_is_found_with_no_entries() {
    let context = IsolatedContext::new();
    let id = context.register(Vec::<PathBuf>::new());
    assert_eq!(context.top_level_paths(&id), Some(Vec::new()));
    assert!(context.is_registered(&id));
}

#[test]
fn unknown_id_is_not_found() {
    let context = IsolatedContext::new();
    context.register(test_paths());
    assert_eq!(context.top_level_paths("NOT-AN-ID"), None);
    assert_eq!(context.top_level_paths(""), None);
    assert!(!context.is_registered("NOT-AN-ID"));
}

#[test]
fn revoke_then_register_fresh_empty_set() {
    let context = IsolatedContext::new();
    let id = context.register(test_paths());

    assert!(context.revoke(&id));
    let id2 = context.register(Vec::<PathBuf>::new());

    assert_ne!(id, id2);
    assert_eq!(context.top_level_paths(&id2), Some(Vec::new()));
    assert_eq!(context.top_level_paths(&id), None);
    assert!(!context.is_registered(&id));
    assert!(context.revoke(&id2));
}

#[test]
fn revoke_is_idempotent_and_ignores_unknown_ids() {
    let context = IsolatedContext::new();
    let id = context.register(["/a/b"]);
    assert!(context.revoke(&id));
    assert!(!context.revoke(&id));
    assert!(!context.revoke("never-registered"));
    assert!(context.is_empty());
}

#[test]
fn revoke_leaves_other_ids_alone() {
    let context = IsolatedContext::new();
    let first = context.register(["/a/b"]);
    let second = context.register(["/c/d"]);
    context.revoke(&first);
    assert_eq!(
        context.top_level_paths(&second).unwrap(),
        [PathBuf::from("/c/d")]
    );
    assert_eq!(context.len(), 1);
}

#[test]
fn revoke_all_clears_every_registration() {
    let context = IsolatedContext::new();
    let ids: Vec<IsolatedId> = (0..5).map(|_| context.register(["/a/b"])).collect();
    assert_eq!(context.len(), 5);
    assert_eq!(context.revoke_all(), 5);
    assert!(context.is_empty());
    for id in &ids {
        assert!(context.top_level_paths(id).is_none());
    }
    assert_eq!(context.revoke_all(), 0);
}

struct ScriptedGenerator {
    script: Mutex<VecDeque<&'static str>>,
}

impl ScriptedGenerator {
    fn new(script: &[&'static str]) -> Self {
        Self {
            script: Mutex::new(script.iter().copied().collect()),
        }
    }
}

impl IdGenerator for ScriptedGenerator {
    fn generate(&self) -> IsolatedId {
        let next = self.script.lock().unwrap().pop_front().unwrap();
        IsolatedId::new(next)
    }
}

#[test]
fn colliding_candidates_are_retried() {
    let context = IsolatedContext::with_generator(ScriptedGenerator::new(&[
        "SAME", "SAME", "SAME", "OTHER",
    ]));
    let first = context.register(["/a/b"]);
    let second = context.register(["/c/d"]);
    assert_eq!(first, "SAME");
    assert_eq!(second, "OTHER");
    assert_eq!(
        context.top_level_paths("SAME").unwrap(),
        [PathBuf::from("/a/b")]
    );
    assert_eq!(
        context.top_level_paths("OTHER").unwrap(),
        [PathBuf::from("/c/d")]
    );
}

#[test]
fn reissued_token_never_revives_revoked_entries() {
    let context = IsolatedContext::with_generator(ScriptedGenerator::new(&["ONE", "ONE"]));
    let id = context.register(["/a/b"]);
    context.revoke(&id);
    assert!(context.crack("/ONE/b").is_err());

    // Even a generator that repeats itself only yields a fresh, unrelated registration.
    let again = context.register(["/c/d"]);
    assert_eq!(again, "ONE");
    assert!(context.crack("/ONE/b").is_err());
    assert!(context.crack("/ONE/d").is_ok());
}

#[test]
fn revoked_random_ids_do_not_come_back() {
    let context = IsolatedContext::new();
    let revoked: Vec<IsolatedId> = (0..100)
        .map(|_| {
            let id = context.register(["/a/b"]);
            context.revoke(&id);
            id
        })
        .collect();
    let fresh: HashSet<IsolatedId> = (0..100).map(|_| context.register(["/a/b"])).collect();
    for id in &revoked {
        assert!(!fresh.contains(id));
        assert!(context.top_level_paths(id).is_none());
    }
}

#[test]
fn debug_output_reports_live_count_only() {
    let context = IsolatedContext::new();
    context.register(["/secret/location"]);
    let rendered = format!("{context:?}");
    assert!(rendered.contains("live_ids: 1"));
    assert!(!rendered.contains("secret"));
}
