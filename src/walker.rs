//! 源文件遍历
//!
//! Maps package names onto directories under the source root and lists the
//! `*.java` files in them. Directory entries are sorted by file name so the
//! bean order of the output is stable across platforms.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Version-control directories never descended into
const IGNORED_DIRS: &[&str] = &[".svn"];

/// Directory of a package: `com.example` -> `<root>/com/example`, blank -> `<root>`
pub fn package_dir(source_root: &Path, package: &str) -> PathBuf {
    package
        .trim()
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(source_root.to_path_buf(), |dir, segment| dir.join(segment))
}

/// List the Java files of the given packages.
///
/// Package directories are visited in the order given. With `recurse`,
/// sub-directories found along the way are queued behind them (breadth first);
/// without it they are ignored. Symbolic links are followed; a dangling link
/// is skipped. A package directory that cannot be listed is an error.
pub fn java_files<S: AsRef<str>>(
    source_root: &Path,
    packages: &[S],
    recurse: bool,
) -> Result<Vec<PathBuf>> {
    let mut queue: VecDeque<PathBuf> = packages
        .iter()
        .map(|pkg| package_dir(source_root, pkg.as_ref()))
        .collect();
    let mut files = Vec::new();

    while let Some(dir) = queue.pop_front() {
        debug!(dir = %dir.display(), "listing package directory");

        let entries = WalkDir::new(&dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                // 悬空链接等: 既不是文件也不是目录，跳过
                Err(err) if err.depth() > 0 => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to list directory: {}", dir.display()));
                }
            };
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if recurse && !is_ignored_dir(entry.path()) {
                    queue.push_back(entry.into_path());
                }
            } else if file_type.is_file() && is_java_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn is_java_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".java"))
}
