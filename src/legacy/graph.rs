//! Whole-graph consistency checks for the legacy layout
//!
//! Per FORMAT.md §3.2-§3.4. The walk loads every `*.json` document into a
//! sorted index keyed by declared path, then runs the reference, orphan,
//! redirection, and file-accounting passes in that order. Iteration order
//! is deterministic, so a given broken tree always reports the same first
//! violation.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use super::document::{load_document, LegacyDocument};
use super::errors::{LegacyError, LegacyResult};

/// Validates the legacy metadata graph rooted at `root`.
///
/// Proves that every declared child reference resolves to exactly one
/// `is_child` document nested under its parent, that redirections point at
/// real objects, and that every file on disk is accounted for. Fails on
/// the first violation.
pub fn validate_legacy_tree(root: &Path) -> LegacyResult<()> {
    let files = scan_files(root)?;
    let index = build_index(root, &files)?;

    debug!(root = %root.display(), documents = index.len(), "indexed legacy metadata graph");

    let referenced = check_references(&index)?;
    check_orphans(&index, &referenced)?;
    check_redirections(&index, &files)?;
    check_accounting(&index, &files)?;

    Ok(())
}

/// Collects every file under the root as a `/`-separated relative path.
fn scan_files(root: &Path) -> LegacyResult<BTreeSet<String>> {
    let mut files = BTreeSet::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| LegacyError::Walk {
            path: root.display().to_string(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| LegacyError::Malformed {
                file: entry.path().display().to_string(),
                reason: "entry escapes the validation root".to_string(),
            })?;

        let mut parts = Vec::new();
        for component in relative.components() {
            parts.push(component.as_os_str().to_string_lossy().into_owned());
        }
        files.insert(parts.join("/"));
    }

    Ok(files)
}

/// Loads every metadata document, keyed by declared path.
///
/// A document stored at `f.json` must declare `path: f`; the check runs
/// here so the index keys and filenames are interchangeable afterwards.
fn build_index(
    root: &Path,
    files: &BTreeSet<String>,
) -> LegacyResult<BTreeMap<String, LegacyDocument>> {
    let mut index = BTreeMap::new();

    for file in files {
        let Some(declared) = file.strip_suffix(".json") else {
            continue;
        };

        let document = load_document(root, file)?;
        if document.path != declared {
            if document.is_redirect() {
                return Err(LegacyError::RedirectionUnexpectedPath {
                    file: file.clone(),
                    path: document.path,
                });
            }
            return Err(LegacyError::UnexpectedPath {
                file: file.clone(),
                path: document.path,
            });
        }

        index.insert(document.path.clone(), document);
    }

    Ok(index)
}

/// Checks every declared child reference; returns the set of referenced paths.
fn check_references(
    index: &BTreeMap<String, LegacyDocument>,
) -> LegacyResult<HashSet<String>> {
    let mut referenced: HashSet<String> = HashSet::new();

    for parent in index.values() {
        for child in &parent.children {
            let target = match index.get(child) {
                Some(target) => target,
                None => {
                    return Err(LegacyError::MissingChild {
                        parent: parent.path.clone(),
                        child: child.clone(),
                    })
                }
            };

            if !referenced.insert(child.clone()) {
                return Err(LegacyError::MultipleReferences {
                    child: child.clone(),
                });
            }

            if !child.starts_with(&format!("{}/", parent.path)) {
                return Err(LegacyError::NonNestedChild {
                    parent: parent.path.clone(),
                    child: child.clone(),
                });
            }

            if !target.is_child {
                return Err(LegacyError::NonChildReferenced {
                    parent: parent.path.clone(),
                    child: child.clone(),
                });
            }
        }
    }

    Ok(referenced)
}

/// Checks that every unreferenced document is a legitimate root.
///
/// Redirections live outside the parent/child graph and are exempt.
fn check_orphans(
    index: &BTreeMap<String, LegacyDocument>,
    referenced: &HashSet<String>,
) -> LegacyResult<()> {
    for document in index.values() {
        if document.is_redirect() || referenced.contains(&document.path) {
            continue;
        }

        if document.is_child {
            return Err(LegacyError::UnreferencedNested {
                path: document.path.clone(),
            });
        }
        if document.path.contains('/') {
            return Err(LegacyError::NonReferencedChild {
                path: document.path.clone(),
            });
        }
    }

    Ok(())
}

/// Checks every redirection: real target, no self-reference, no shadowed
/// source data.
fn check_redirections(
    index: &BTreeMap<String, LegacyDocument>,
    files: &BTreeSet<String>,
) -> LegacyResult<()> {
    for document in index.values() {
        let Some(target) = &document.redirect_target else {
            continue;
        };

        if *target == document.path || files.contains(&document.path) {
            return Err(LegacyError::RedirectionFromExistingPath {
                path: document.path.clone(),
            });
        }

        match index.get(target) {
            Some(resolved) if !resolved.is_redirect() => {}
            _ => {
                return Err(LegacyError::InvalidRedirection {
                    from: document.path.clone(),
                    target: target.clone(),
                })
            }
        }
    }

    Ok(())
}

/// Checks that every file on disk is either a metadata document or the data
/// file of a non-redirect document.
fn check_accounting(
    index: &BTreeMap<String, LegacyDocument>,
    files: &BTreeSet<String>,
) -> LegacyResult<()> {
    for file in files {
        if file.ends_with(".json") {
            // Loaded into the index by construction
            continue;
        }

        match index.get(file) {
            Some(document) if !document.is_redirect() => {}
            _ => return Err(LegacyError::UnknownFile { path: file.clone() }),
        }
    }

    Ok(())
}
