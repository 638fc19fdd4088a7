/*!
 * Path Resolver Tests
 * Confinement against the host filesystem
 */

use pretty_assertions::assert_eq;
use sandboxfs::{FileSystem, FsError, LocalFS, PathResolver, SandboxRoots};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    fs: Arc<LocalFS>,
    resolver: PathResolver,
    roots: SandboxRoots,
    root: PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let fs = Arc::new(LocalFS::new());
    let roots = SandboxRoots::new(fs.clone(), temp.path().join("base")).unwrap();
    let root = roots.root_for("u1").unwrap().path().to_path_buf();
    Fixture {
        resolver: PathResolver::new(fs.clone()),
        _temp: temp,
        fs,
        roots,
        root,
    }
}

#[test]
fn test_plain_and_missing_paths() {
    let fx = fixture();
    fx.fs.create_dir(&fx.root.join("docs")).unwrap();

    let docs = fx.resolver.resolve(&fx.root, &["docs"]).unwrap();
    assert_eq!(docs.as_path(), fx.root.join("docs"));
    assert_eq!(docs.to_string(), "/docs");

    let missing = fx.resolver.resolve(&fx.root, &["docs", "a", "b"]).unwrap();
    assert_eq!(missing.as_path(), fx.root.join("docs/a/b"));
}

#[test]
fn test_noop_segments() {
    let fx = fixture();
    let path = fx.resolver.resolve(&fx.root, &["", ".", "docs", ""]).unwrap();
    assert_eq!(path.to_string(), "/docs");
}

#[test]
fn test_dot_dot_stays_inside() {
    let fx = fixture();
    let path = fx.resolver.resolve(&fx.root, &["a", "b", "..", "..", "c"]).unwrap();
    assert_eq!(path.as_path(), fx.root.join("c"));
}

#[test]
fn test_dot_dot_escape() {
    let fx = fixture();
    for segments in [
        vec![".."],
        vec!["..", "..", "etc"],
        vec!["docs", "..", "..", "u2"],
    ] {
        let err = fx.resolver.resolve(&fx.root, &segments).unwrap_err();
        assert!(err.is_traversal(), "{:?} was not rejected", segments);
    }
}

#[test]
fn test_separator_and_nul_segments() {
    let fx = fixture();
    for segment in ["../etc", "/etc/passwd", "a\\b", "a\0b"] {
        let err = fx.resolver.resolve(&fx.root, &[segment]).unwrap_err();
        assert!(err.is_traversal(), "{:?} was not rejected", segment);
    }
}

#[test]
fn test_long_segment() {
    let fx = fixture();
    let long = "n".repeat(300);
    assert_eq!(
        fx.resolver.resolve(&fx.root, &[long.as_str()]).unwrap_err(),
        FsError::bad_request("Path segment too long")
    );
}

#[test]
fn test_through_regular_file() {
    let fx = fixture();
    fx.fs.create(&fx.root.join("f")).unwrap();

    // Confined even though the OS would refuse to use it as a directory
    let path = fx.resolver.resolve(&fx.root, &["f", "x"]).unwrap();
    assert_eq!(path.as_path(), fx.root.join("f/x"));
}

#[test]
fn test_sibling_alias_unreachable() {
    let fx = fixture();
    let other = fx.roots.root_for("u2").unwrap();
    fx.fs.create(&other.path().join("secret.txt")).unwrap();

    let err = fx
        .resolver
        .resolve(&fx.root, &["..", "u2", "secret.txt"])
        .unwrap_err();
    assert!(err.is_traversal());
}

#[cfg(unix)]
mod links {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_link_out_of_sandbox() {
        let fx = fixture();
        let outside = fx._temp.path().join("outside");
        fx.fs.create_dir(&outside).unwrap();
        fx.fs.create(&outside.join("passwd")).unwrap();
        fx.fs.symlink(&outside, &fx.root.join("escape")).unwrap();

        assert!(fx
            .resolver
            .resolve(&fx.root, &["escape"])
            .unwrap_err()
            .is_traversal());
        assert!(fx
            .resolver
            .resolve(&fx.root, &["escape", "passwd"])
            .unwrap_err()
            .is_traversal());
        assert!(fx
            .resolver
            .resolve(&fx.root, &["escape", "new", "deeper"])
            .unwrap_err()
            .is_traversal());
    }

    #[test]
    fn test_relative_link_out_of_sandbox() {
        let fx = fixture();
        fx.fs
            .symlink(std::path::Path::new("../.."), &fx.root.join("up"))
            .unwrap();
        assert!(fx
            .resolver
            .resolve(&fx.root, &["up"])
            .unwrap_err()
            .is_traversal());
    }

    #[test]
    fn test_link_within_sandbox() {
        let fx = fixture();
        fx.fs.create_dir(&fx.root.join("real")).unwrap();
        fx.fs
            .symlink(&fx.root.join("real"), &fx.root.join("shortcut"))
            .unwrap();

        let path = fx.resolver.resolve(&fx.root, &["shortcut", "x.txt"]).unwrap();
        assert_eq!(path.as_path(), fx.root.join("real/x.txt"));
    }

    #[test]
    fn test_dot_dot_follows_the_link_first() {
        let fx = fixture();
        fx.fs.create_dir(&fx.root.join("a/deep")).unwrap();
        fx.fs
            .symlink(std::path::Path::new("a/deep"), &fx.root.join("ln"))
            .unwrap();

        let path = fx.resolver.resolve(&fx.root, &["ln", ".."]).unwrap();
        assert_eq!(path.as_path(), fx.root.join("a"));
        assert_eq!(path.to_string(), "/a");
    }

    #[test]
    fn test_dangling_link() {
        let fx = fixture();
        let target = fx._temp.path().join("not-yet");
        fx.fs.symlink(&target, &fx.root.join("trap")).unwrap();

        assert!(fx
            .resolver
            .resolve(&fx.root, &["trap"])
            .unwrap_err()
            .is_traversal());
        assert!(!fx.fs.exists(&target));
    }

    #[test]
    fn test_link_loop() {
        let fx = fixture();
        fx.fs
            .symlink(&fx.root.join("b"), &fx.root.join("a"))
            .unwrap();
        fx.fs
            .symlink(&fx.root.join("a"), &fx.root.join("b"))
            .unwrap();

        assert_eq!(
            fx.resolver.resolve(&fx.root, &["a"]).unwrap_err(),
            FsError::bad_request("Too many levels of symbolic links")
        );
    }

    #[test]
    fn test_alias_directory_swapped_for_link() {
        let fx = fixture();
        let outside = fx._temp.path().join("elsewhere");
        fx.fs.create_dir(&outside).unwrap();
        fx.fs
            .symlink(&outside, &fx.roots.base().join("mallory"))
            .unwrap();

        assert!(fx.roots.root_for("mallory").unwrap_err().is_traversal());
    }
}
