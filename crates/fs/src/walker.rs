use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::status::FileStatus;

/// Depth-first walk over every entry reachable from `root`.
///
/// The root is visited first, and a directory's own entry is always visited
/// before its children (pre-order). Siblings are visited in the order the
/// directory enumeration yields them. Symlinks are reported as themselves
/// and never followed.
///
/// Entries that cannot be stat'd and directories that cannot be opened or
/// read are reported as warnings and skipped; the walk continues with
/// whatever remains. An `Err` from the visitor aborts the walk immediately
/// and is returned unchanged.
pub fn walk<E, F>(root: &Path, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&Path, &FileStatus) -> Result<(), E>,
{
    let mut pending = vec![root.to_path_buf()];

    while let Some(path) = pending.pop() {
        let status = match FileStatus::from_path(&path) {
            Ok(status) => status,
            Err(e) => {
                warn!("cannot stat '{}': {e}", path.display());
                continue;
            }
        };

        visit(&path, &status)?;

        if status.is_dir() {
            push_children(&path, &mut pending);
        }
    }

    Ok(())
}

/// Enumerate `dir` and schedule its children. Children land on the LIFO
/// work stack in reverse so they pop in enumeration order; `read_dir` never
/// yields the synthetic `.`/`..` entries. The directory handle is released
/// when the enumeration is dropped, on error paths included.
fn push_children(dir: &Path, pending: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot open directory '{}': {e}", dir.display());
            return;
        }
    };

    let mut children = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => children.push(dir.join(entry.file_name())),
            Err(e) => {
                warn!("cannot read directory '{}': {e}", dir.display());
            }
        }
    }

    debug!(
        "descending into '{}' ({} children)",
        dir.display(),
        children.len()
    );

    pending.extend(children.into_iter().rev());
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
