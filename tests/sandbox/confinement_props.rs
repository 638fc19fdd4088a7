/*!
 * Confinement Properties
 * Random segment sequences never resolve outside the alias root
 */

use proptest::prelude::*;
use sandboxfs::{FileSystem, MemFS, PathResolver};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ROOT: &str = "/base/u1";

fn sandbox() -> (PathResolver, PathBuf) {
    let fs = Arc::new(MemFS::new());
    let root = PathBuf::from(ROOT);
    fs.create_dir(&root.join("a/deep")).unwrap();
    fs.create_dir(&root.join("b")).unwrap();
    fs.create(&root.join("b/file.txt")).unwrap();
    fs.create_dir(Path::new("/base/u2/private")).unwrap();
    fs.create_dir(Path::new("/etc")).unwrap();

    fs.symlink(Path::new("/etc"), &root.join("to_etc")).unwrap();
    fs.symlink(Path::new("../u2"), &root.join("to_sibling")).unwrap();
    fs.symlink(Path::new("a/deep"), &root.join("to_deep")).unwrap();
    fs.symlink(Path::new("../../.."), &root.join("a/deep/up")).unwrap();
    fs.symlink(Path::new("/nowhere"), &root.join("dangling")).unwrap();

    (PathResolver::new(fs), root)
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "", ".", "..", "a", "b", "deep", "file.txt", "to_etc", "to_sibling", "to_deep",
            "up", "dangling", "u2", "etc", "new",
        ])
        .prop_map(|s| s.to_string()),
        "[a-z./\\\\]{0,6}",
    ]
}

proptest! {
    /// Every accepted path is the root or below it
    #[test]
    fn prop_resolved_paths_stay_confined(segments in prop::collection::vec(segment(), 0..12)) {
        let (resolver, root) = sandbox();
        if let Ok(path) = resolver.resolve(&root, &segments) {
            prop_assert!(path.as_path().starts_with(&root), "escaped to {:?}", path.as_path());
            prop_assert!(!path.to_string().contains(ROOT));
        }
    }

    /// Any segment carrying a separator is rejected as a traversal attempt
    #[test]
    fn prop_separators_rejected(
        prefix in prop::collection::vec("[a-z]{1,4}", 0..3),
        left in "[a-z.]{0,3}",
        right in "[a-z.]{0,3}",
        sep in prop::sample::select(vec!["/", "\\"]),
    ) {
        let (resolver, root) = sandbox();
        let mut segments = prefix;
        segments.push(format!("{}{}{}", left, sep, right));
        let err = resolver.resolve(&root, &segments).unwrap_err();
        prop_assert!(err.is_traversal());
    }

    /// Resolution is deterministic
    #[test]
    fn prop_resolution_is_stable(segments in prop::collection::vec(segment(), 0..8)) {
        let (resolver, root) = sandbox();
        let first = resolver.resolve(&root, &segments);
        let second = resolver.resolve(&root, &segments);
        prop_assert_eq!(first, second);
    }
}
