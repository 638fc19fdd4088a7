/*!
 * Dispatcher Concurrency Tests
 * Parallel requests on shared and separate aliases
 */

use crate::common::Harness;
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[test]
fn test_parallel_aliases_are_independent() {
    let h = Arc::new(Harness::memory());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let h = h.clone();
            thread::spawn(move || {
                let alias = format!("user{}", i);
                for j in 0..20 {
                    h.call(json!({
                        "alias": alias,
                        "path": ["files"],
                        "operation": "newfile",
                        "filename": format!("f{:02}", j)
                    }))
                    .unwrap();
                }
                alias
            })
        })
        .collect();

    for handle in handles {
        let alias = handle.join().unwrap();
        assert_eq!(h.ls(&alias, &["files"]).len(), 20);
    }
}

#[test]
fn test_same_alias_mkdir_rmdir_race_settles() {
    let h = Arc::new(Harness::memory());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let h = h.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    let operation = if i % 2 == 0 { "mkdir" } else { "rmdir" };
                    // rmdir may find nothing to remove
                    let _ = h.call(json!({"alias": "shared", "path": ["work", "tmp"], "operation": operation}));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let items = h.ls("shared", &["work"]);
    assert!(items.is_empty() || items == vec!["tmp".to_string()]);
}
