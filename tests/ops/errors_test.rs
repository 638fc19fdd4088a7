/*!
 * Dispatcher Error Tests
 * Missing fields, not-found symmetry and traversal rejection
 */

use crate::common::{both, Harness};
use pretty_assertions::assert_eq;
use sandboxfs::{FsError, StatusClass};
use serde_json::json;

#[test]
fn test_missing_fields() {
    both(|h: Harness| {
        assert_eq!(
            h.call(json!({"alias": "u1", "operation": "newfile"})).unwrap_err(),
            FsError::bad_request("Filename required")
        );
        assert_eq!(
            h.call(json!({"alias": "u1", "operation": "deletefile", "filename": ""}))
                .unwrap_err(),
            FsError::bad_request("Filename required")
        );
        assert_eq!(
            h.call(json!({"alias": "u1", "path": ["x"], "operation": "rename"}))
                .unwrap_err(),
            FsError::bad_request("New name required")
        );
    });
}

#[test]
fn test_missing_filename_creates_nothing() {
    both(|h: Harness| {
        let _ = h.call(json!({"alias": "u1", "path": ["ghost"], "operation": "newfile"}));
        assert!(h.ls("u1", &[]).is_empty());
    });
}

#[test]
fn test_unknown_operation() {
    both(|h: Harness| {
        let err = h
            .call(json!({"alias": "u1", "operation": "chmod"}))
            .unwrap_err();
        assert_eq!(err.status(), StatusClass::BadRequest);
        assert!(err.detail().contains("chmod"));
    });
}

#[test]
fn test_not_found_symmetry() {
    both(|h: Harness| {
        h.call(json!({"alias": "u1", "operation": "newfile", "filename": "plain.txt"}))
            .unwrap();

        for operation in ["ls", "cd", "rmdir"] {
            for path in [json!(["absent"]), json!(["plain.txt"])] {
                let err = h
                    .call(json!({"alias": "u1", "path": path, "operation": operation}))
                    .unwrap_err();
                assert_eq!(err, FsError::not_found("Directory not found"), "{} {}", operation, path);
            }
        }
    });
}

#[test]
fn test_deletefile_on_directory() {
    both(|h: Harness| {
        h.call(json!({"alias": "u1", "path": ["dir"], "operation": "mkdir"}))
            .unwrap();
        assert_eq!(
            h.call(json!({"alias": "u1", "operation": "deletefile", "filename": "dir"}))
                .unwrap_err(),
            FsError::not_found("File not found")
        );
        assert_eq!(h.ls("u1", &[]), vec!["dir"]);
    });
}

#[test]
fn test_traversal_listing_rejected() {
    both(|h: Harness| {
        let err = h
            .call(json!({"alias": "u1", "path": ["..", "..", "etc"], "operation": "ls"}))
            .unwrap_err();
        assert!(err.is_traversal());
        assert_eq!(err.status(), StatusClass::BadRequest);
    });
}

#[test]
fn test_traversal_detail_hides_host_paths() {
    both(|h: Harness| {
        let host_root = h.host_root("u1");
        let err = h
            .call(json!({"alias": "u1", "path": ["..", "u2"], "operation": "mkdir"}))
            .unwrap_err();
        assert!(err.is_traversal());
        assert!(!err.detail().contains(&*host_root.to_string_lossy()));
        assert!(!err.detail().contains("base"));
    });
}

#[test]
fn test_entry_names_cannot_escape() {
    both(|h: Harness| {
        for name in ["..", "../x", "a/b", "."] {
            let err = h
                .call(json!({"alias": "u1", "operation": "newfile", "filename": name}))
                .unwrap_err();
            assert!(err.is_traversal(), "{:?}", name);
        }
        assert!(h.ls("u1", &[]).is_empty());
    });
}

#[test]
fn test_rename_scope() {
    both(|h: Harness| {
        h.call(json!({"alias": "u1", "path": ["a"], "operation": "newfile", "filename": "f"}))
            .unwrap();

        for new_name in ["../f", "..", "/tmp/f"] {
            let err = h
                .call(json!({"alias": "u1", "path": ["a", "f"], "operation": "rename", "new_name": new_name}))
                .unwrap_err();
            assert!(err.is_traversal(), "{:?}", new_name);
        }
        assert_eq!(h.ls("u1", &["a"]), vec!["f"]);

        assert_eq!(
            h.call(json!({"alias": "u1", "path": [], "operation": "rename", "new_name": "x"}))
                .unwrap_err(),
            FsError::bad_request("Cannot rename the sandbox root")
        );
    });
}

#[test]
fn test_rename_type_conflicts() {
    both(|h: Harness| {
        h.call(json!({"alias": "u1", "operation": "newfile", "filename": "a.txt"}))
            .unwrap();
        h.call(json!({"alias": "u1", "path": ["d"], "operation": "mkdir"}))
            .unwrap();
        h.call(json!({"alias": "u1", "path": ["e"], "operation": "mkdir"}))
            .unwrap();

        assert_eq!(
            h.call(json!({"alias": "u1", "path": ["a.txt"], "operation": "rename", "new_name": "d"}))
                .unwrap_err(),
            FsError::bad_request("A directory with that name already exists")
        );
        assert_eq!(
            h.call(json!({"alias": "u1", "path": ["e"], "operation": "rename", "new_name": "a.txt"}))
                .unwrap_err(),
            FsError::bad_request("A file with that name already exists")
        );
        assert_eq!(h.ls("u1", &[]), vec!["a.txt", "d", "e"]);
    });
}

#[test]
fn test_invalid_aliases() {
    both(|h: Harness| {
        for alias in ["..", ".", "a/b", "..\\x"] {
            let err = h
                .call(json!({"alias": alias, "operation": "ls"}))
                .unwrap_err();
            assert!(err.is_traversal(), "{:?}", alias);
        }
        assert_eq!(
            h.call(json!({"alias": "", "operation": "ls"})).unwrap_err(),
            FsError::bad_request("Alias required")
        );
    });
}

#[cfg(unix)]
#[test]
fn test_symlink_escape_on_host() {
    let h = Harness::local();
    let root = h.host_root("u1");
    let outside = root.parent().unwrap().parent().unwrap().join("outside");
    h.fs.create_dir(&outside).unwrap();
    h.fs.create(&outside.join("victim.txt")).unwrap();
    h.fs.symlink(&outside, &root.join("link")).unwrap();

    for request in [
        json!({"alias": "u1", "path": ["link"], "operation": "ls"}),
        json!({"alias": "u1", "path": ["link"], "operation": "rmdir"}),
        json!({"alias": "u1", "path": ["link"], "operation": "deletefile", "filename": "victim.txt"}),
        json!({"alias": "u1", "path": ["link", "victim.txt"], "operation": "rename", "new_name": "x"}),
        json!({"alias": "u1", "path": ["link", "sub"], "operation": "mkdir"}),
        json!({"alias": "u1", "path": ["link"], "operation": "newfile", "filename": "planted"}),
    ] {
        let err = h.call(request.clone()).unwrap_err();
        assert!(err.is_traversal(), "{}", request);
    }

    assert!(h.fs.exists(&outside.join("victim.txt")));
    assert!(!h.fs.exists(&outside.join("sub")));
    assert!(!h.fs.exists(&outside.join("planted")));
}

#[cfg(target_os = "linux")]
#[test]
fn test_listing_survives_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let h = Harness::local();
    let root = h.host_root("u1");
    std::fs::write(root.join(OsStr::from_bytes(b"bad\xff.txt")), b"").unwrap();
    std::fs::write(root.join("ok.txt"), b"").unwrap();

    assert_eq!(h.ls("u1", &[]), vec!["bad\u{fffd}.txt", "ok.txt"]);
}
