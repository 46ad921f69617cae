//! Input discovery: files, directories, and wildcard patterns.
//!
//! A positional input may name a single file, a directory (which
//! enumerates documents by extension), or a wildcard pattern whose `*`
//! and `?` apply to the file-name component. Results are sorted so that
//! multi-file runs process documents in a deterministic order.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use regex::Regex;

/// File extensions recognized as MNX documents when a directory is scanned.
pub const MNX_EXTENSION: &str = "mnx";
pub const JSON_EXTENSION: &str = "json";

/// Whether the input argument contains wildcard characters.
pub fn has_wildcard(pattern: &Path) -> bool {
    let text = pattern.to_string_lossy();
    text.contains('*') || text.contains('?')
}

/// Resolve one input argument to a sorted list of files to process.
pub fn collect_inputs(pattern: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !has_wildcard(pattern) {
        if pattern.is_file() {
            return Ok(vec![pattern.to_path_buf()]);
        }
        if pattern.is_dir() {
            let mut found = Vec::new();
            walk(pattern, recursive, &has_document_extension, &mut found);
            found.sort();
            return Ok(found);
        }
        bail!(
            "Input path {} does not exist or is not a file or directory.",
            pattern.display()
        );
    }

    let dir = match pattern.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.is_dir() {
        bail!(
            "Input path {} does not exist or is not a file or directory.",
            dir.display()
        );
    }
    let name = pattern
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let matcher = wildcard_regex(&name)?;
    let matches = |path: &Path| {
        path.file_name()
            .map(|n| matcher.is_match(&n.to_string_lossy()))
            .unwrap_or(false)
    };
    let mut found = Vec::new();
    walk(&dir, recursive, &matches, &mut found);
    found.sort();
    Ok(found)
}

/// Compile a `*`/`?` wildcard into an anchored regex over file names.
fn wildcard_regex(pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    Ok(Regex::new(&format!("^{escaped}$"))?)
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == MNX_EXTENSION || ext == JSON_EXTENSION
        })
        .unwrap_or(false)
}

fn walk<F: Fn(&Path) -> bool>(dir: &Path, recursive: bool, matches: &F, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during input discovery"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            if recursive {
                walk(&path, recursive, matches, acc);
            }
        } else {
            tracing::debug!(file = %path.display(), "considered file");
            if matches(&path) {
                acc.push(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"{}").unwrap();
    }

    #[test]
    fn single_file_input_resolves_to_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("piece.mnx");
        touch(&file);
        let found = collect_inputs(&file, false).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn directory_input_picks_document_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.mnx"));
        touch(&dir.path().join("b.json"));
        touch(&dir.path().join("notes.txt"));
        let found = collect_inputs(dir.path(), false).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mnx", "b.json"]);
    }

    #[test]
    fn wildcard_matches_star_and_question_mark() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("accidentals_example.mnx"));
        touch(&dir.path().join("other.mnx"));
        let pattern = dir.path().join("accidentals*.?nx");
        let found = collect_inputs(&pattern, false).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("accidentals_example.mnx"));
    }

    #[test]
    fn wildcard_escapes_regex_metacharacters() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a+b.mnx"));
        touch(&dir.path().join("aab.mnx"));
        // '+' must match literally, not as a regex quantifier.
        let pattern = dir.path().join("a+?.mnx");
        let found = collect_inputs(&pattern, false).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("a+b.mnx"));
    }

    #[test]
    fn recursive_search_descends_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        touch(&nested.join("deep.mnx"));
        touch(&dir.path().join("top.mnx"));

        let flat = collect_inputs(dir.path(), false).unwrap();
        assert_eq!(flat.len(), 1, "non-recursive search stays at the top");

        let deep = collect_inputs(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn results_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("zz.mnx"));
        touch(&dir.path().join("aa.mnx"));
        let found = collect_inputs(dir.path(), false).unwrap();
        let mut sorted = found.clone();
        sorted.sort();
        assert_eq!(found, sorted);
    }

    #[test]
    fn nonexistent_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("doesntExist.mnx");
        let err = collect_inputs(&missing, false).unwrap_err();
        assert!(err
            .to_string()
            .contains("does not exist or is not a file or directory"));
    }

    #[test]
    fn wildcard_with_no_matches_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("piece.mnx"));
        let found = collect_inputs(&dir.path().join("nope*.mnx"), false).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("upper.MNX"));
        let found = collect_inputs(dir.path(), false).unwrap();
        assert_eq!(found.len(), 1);
    }
}
