//! Font table loading and table file I/O.

use std::{
    fs::{create_dir_all, read, read_to_string, remove_file, rename, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use font_coverage::FontTable;
use glob::{MatchOptions, glob_with};
use log::warn;

use crate::config::FONT_PATTERNS;

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Create a directory and its parents if they don't exist.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Write every file or none of them.
///
/// Contents go to `*.tmp` siblings first and are renamed into place once all
/// of them are written. If a rename fails, targets already replaced get their
/// previous contents back and the remaining staged files are removed.
pub fn write_all(files: &[(PathBuf, String)]) -> Result<()> {
    let mut staged = Vec::with_capacity(files.len());
    for (path, contents) in files {
        let tmp = staging_path(path);
        if let Err(e) = stage(path, &tmp, contents) {
            let _ = remove_file(&tmp);
            discard(&staged);
            return Err(e);
        }
        staged.push(tmp);
    }

    let previous: Result<Vec<_>> = files.iter().map(|(path, _)| read_previous(path)).collect();
    let previous = match previous {
        Ok(previous) => previous,
        Err(e) => {
            discard(&staged);
            return Err(e);
        }
    };

    for (i, ((path, _), tmp)) in files.iter().zip(&staged).enumerate() {
        if let Err(e) = rename(tmp, path) {
            restore(&files[..i], &previous[..i]);
            discard(&staged[i..]);
            return Err(e).with_context(|| format!("Failed to write {}", path.display()));
        }
    }
    Ok(())
}

fn stage(path: &Path, tmp: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    write(tmp, contents).with_context(|| format!("Failed to write {}", tmp.display()))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_previous(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.is_file() {
        return Ok(None);
    }
    read(path).map(Some).with_context(|| format!("Failed to read {}", path.display()))
}

fn restore(files: &[(PathBuf, String)], previous: &[Option<Vec<u8>>]) {
    for ((path, _), contents) in files.iter().zip(previous) {
        let restored = match contents {
            Some(contents) => write(path, contents),
            None => remove_file(path),
        };
        if let Err(e) = restored {
            warn!("Failed to restore {}: {e}", path.display());
        }
    }
}

fn discard(staged: &[PathBuf]) {
    for tmp in staged {
        let _ = remove_file(tmp);
    }
}

/// Load a `{"Name": "path"}` font table. Relative paths are taken from the
/// table file's directory.
pub fn load_font_table(path: &Path) -> Result<FontTable> {
    let json = read_text(path)?;
    let table: FontTable = serde_json::from_str(&json)
        .with_context(|| format!("Invalid font table: {}", path.display()))?;
    let base = path.parent().unwrap_or(Path::new(""));
    Ok(table.rebase(base))
}

/// Find fonts matching a glob pattern in a directory.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };
    Ok(glob_with(pattern_str, options)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect())
}

/// Every font file under `dir`, named by file stem, in path order.
///
/// When two files share a stem the first one in path order is kept.
pub fn discover_fonts(dir: &Path) -> Result<FontTable> {
    let mut paths = Vec::new();
    for pattern in FONT_PATTERNS {
        paths.extend(glob_fonts(dir, pattern)?);
    }
    paths.sort();
    paths.dedup();

    let mut table = FontTable::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("Ignoring font with a non UTF-8 name: {}", path.display());
            continue;
        };
        if let Some(kept) = table.get(stem) {
            warn!("Ignoring {}: font name {stem:?} is taken by {}", path.display(), kept.display());
            continue;
        }
        let stem = stem.to_string();
        table.insert(stem, path);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_font_table_rebases_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.json");
        write(&path, r#"{"Noto Sans": "noto/NotoSans.ttf", "Abs": "/fonts/Abs.ttf"}"#).unwrap();

        let table = load_font_table(&path).unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries[0].0, "Noto Sans");
        assert_eq!(entries[0].1, dir.path().join("noto/NotoSans.ttf"));
        assert_eq!(entries[1].1, Path::new("/fonts/Abs.ttf"));
    }

    #[test]
    fn test_load_font_table_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.json");
        write(&path, "[1, 2]").unwrap();
        assert!(load_font_table(&path).is_err());
    }

    #[test]
    fn test_discover_fonts_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        create_dir_all(dir.path().join("cjk")).unwrap();
        for name in ["b.ttf", "a.OTF", "cjk/c.ttc", "notes.txt"] {
            write(dir.path().join(name), b"").unwrap();
        }

        let table = discover_fonts(dir.path()).unwrap();
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(table.get("c"), Some(dir.path().join("cjk/c.ttc").as_path()));
    }

    #[test]
    fn test_discover_fonts_keeps_first_of_same_stem() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["a", "b"] {
            create_dir_all(dir.path().join(sub)).unwrap();
            write(dir.path().join(sub).join("Noto.ttf"), b"").unwrap();
        }

        let table = discover_fonts(dir.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Noto"), Some(dir.path().join("a/Noto.ttf").as_path()));
    }

    #[test]
    fn test_write_all_rolls_back_when_rename_fails() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("one.json");
        let fresh = dir.path().join("two.json");
        let blocked = dir.path().join("three.json");
        write(&existing, "old").unwrap();
        create_dir_all(blocked.join("nested")).unwrap();

        let result = write_all(&[
            (existing.clone(), "new".into()),
            (fresh.clone(), "new".into()),
            (blocked.clone(), "new".into()),
        ]);

        assert!(result.is_err());
        assert_eq!(read_text(&existing).unwrap(), "old");
        assert!(!fresh.exists());
        assert!(blocked.join("nested").is_dir());
        for name in ["one.json.tmp", "two.json.tmp", "three.json.tmp"] {
            assert!(!dir.path().join(name).exists(), "{name} left behind");
        }
    }

    #[test]
    fn test_write_all_discards_staged_when_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        write(&blocker, "").unwrap();
        let first = dir.path().join("one.json");

        let result = write_all(&[
            (first.clone(), "new".into()),
            (blocker.join("two.json"), "new".into()),
        ]);

        assert!(result.is_err());
        assert!(!first.exists());
        assert!(!dir.path().join("one.json.tmp").exists());
    }

    #[test]
    fn test_write_all_replaces_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("out/one.json");
        let second = dir.path().join("out/two.json");
        write_all(&[(first.clone(), "1".into()), (second.clone(), "2".into())]).unwrap();
        write_all(&[(first.clone(), "3".into())]).unwrap();

        assert_eq!(read_text(&first).unwrap(), "3");
        assert_eq!(read_text(&second).unwrap(), "2");
        assert!(!dir.path().join("out/one.json.tmp").exists());
    }
}
