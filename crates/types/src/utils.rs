//! Path helpers shared across the workspace

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` and lexically normalize the result
///
/// Absolute inputs ignore `base`. Normalization is purely lexical: `.` and
/// `..` components are folded without consulting the filesystem, so symlinks
/// are not resolved and the result does not have to exist.
pub fn abspath(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize_path(&joined)
}

/// Fold `.` and `..` components out of a path without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`; a leading `..` on a relative path stays.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abspath_joins_relative_paths() {
        let resolved = abspath(Path::new("/project/configs"), Path::new("../docs"));
        assert_eq!(resolved, PathBuf::from("/project/docs"));
    }

    #[test]
    fn test_abspath_keeps_absolute_paths() {
        let resolved = abspath(Path::new("/project"), Path::new("/other/docs"));
        assert_eq!(resolved, PathBuf::from("/other/docs"));
    }

    #[test]
    fn test_normalize_folds_dot_components() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize_path(Path::new("/../..")), PathBuf::from("/"));
    }

    #[test]
    fn test_normalize_keeps_leading_parent_on_relative_paths() {
        assert_eq!(normalize_path(Path::new("../a/b")), PathBuf::from("../a/b"));
    }
}
