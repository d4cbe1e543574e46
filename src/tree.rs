//! Project tree listing for the `file_txt` command

use std::path::Path;

use walkdir::WalkDir;

use crate::config::TreeSettings;
use crate::error::Result;

/// Walk `root` depth-first and render one line per entry.
///
/// The first line is the configured header, followed by the root itself.
/// Each entry is `<indent><icon> <name>` where the indent is two spaces per
/// path separator in the entry's path relative to `root`. Entries inside a
/// directory are sorted by file name.
///
/// Any walk error aborts the listing; partial results are dropped.
pub fn project_tree(root: &Path, settings: &TreeSettings) -> Result<Vec<String>> {
    let mut lines = vec![settings.header.clone()];

    let walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        // Root and its direct children have no separator in their relative path
        let depth = entry.depth().saturating_sub(1);
        let icon = if entry.file_type().is_dir() {
            &settings.dir_icon
        } else {
            &settings.file_icon
        };
        let name = entry.file_name().to_string_lossy();
        lines.push(format!("{}{} {}", "  ".repeat(depth), icon, name));
    }

    tracing::debug!(target: "io", root = %root.display(), entries = lines.len() - 1, "tree_walk_ok");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use std::fs;

    fn sample_project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/editor")).unwrap();
        fs::write(dir.path().join("Cargo.toml"), "").unwrap();
        fs::write(dir.path().join("src/main.rs"), "").unwrap();
        fs::write(dir.path().join("src/editor/buffer.rs"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        dir
    }

    #[test]
    fn test_tree_layout() {
        let dir = sample_project();
        let lines = project_tree(dir.path(), &TreeSettings::default()).unwrap();

        assert_eq!(lines[0], "--- Project Tree ---");
        assert!(lines[1].starts_with("📁 "));
        assert_eq!(
            &lines[2..],
            &[
                "📄 Cargo.toml",
                "📄 README.md",
                "📁 src",
                "  📁 editor",
                "    📄 buffer.rs",
                "  📄 main.rs",
            ]
        );
    }

    #[test]
    fn test_tree_uses_configured_icons() {
        let dir = sample_project();
        let settings = TreeSettings {
            header: "tree".to_string(),
            dir_icon: "D".to_string(),
            file_icon: "F".to_string(),
            follow_links: false,
        };
        let lines = project_tree(dir.path(), &settings).unwrap();
        assert_eq!(lines[0], "tree");
        assert!(lines.contains(&"D src".to_string()));
        assert!(lines.contains(&"  F main.rs".to_string()));
    }

    #[test]
    fn test_missing_root_is_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = project_tree(&missing, &TreeSettings::default()).unwrap_err();
        assert!(matches!(err, EditorError::DirectoryWalk { .. }));
    }
}
