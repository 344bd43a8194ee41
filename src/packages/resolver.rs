//! Mapping changed files to the packages they affect.
//!
//! A package is a directory holding at least one of the config's
//! `package-file` markers, and is identified by its path relative to the
//! checkout root. The pseudo-package `"."` stands for a change outside any
//! package, which affects every package.

use crate::config::Config;
use crate::error::{CustardError, Result};
use crate::packages::patterns::PathFilter;
use crate::ui::UserInterface;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// The repository root as a pseudo-package, signalling a global change.
pub const ROOT_PACKAGE: &str = ".";

/// Check whether any package marker file exists directly under `dir`.
pub fn is_package_dir(config: &Config, dir: &Path) -> bool {
    config
        .package_file
        .iter()
        .any(|marker| dir.join(marker).is_file())
}

/// Normalize a diff path to the `a/b/c` form used for packages.
pub fn normalize_path(path: &str) -> String {
    let mut path = path.trim().replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        ROOT_PACKAGE.to_string()
    } else {
        path.to_string()
    }
}

/// The directory containing `path`, or `"."` for a top-level entry.
pub fn parent_dir(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((head, _)) if !head.is_empty() => head,
        _ => ROOT_PACKAGE,
    }
}

/// Find the nearest package enclosing `file_path`.
///
/// Walks upward from the file's directory. Returns `"."` when no enclosing
/// directory is a package, and `None` when the file's directory no longer
/// exists (the file or its whole package was removed).
pub fn find_package_dir(config: &Config, root: &Path, file_path: &str) -> Option<String> {
    let mut dir = parent_dir(file_path);
    loop {
        let full = root.join(dir);
        if !full.is_dir() {
            return None;
        }
        if dir == ROOT_PACKAGE || is_package_dir(config, &full) {
            return Some(dir.to_string());
        }
        dir = parent_dir(dir);
    }
}

/// Find every package under `root`.
///
/// A directory is a package if it passes `match`/`ignore`, holds a marker
/// file, and is not in `exclude-packages`. Nested packages are found too,
/// since the walk continues below packages. Results are in walk order,
/// sorted by file name at each level.
pub fn find_all_packages(config: &Config, root: &Path) -> Result<Vec<String>> {
    let filter = PathFilter::from_config(config);
    let mut packages = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| CustardError::Io(e.into()))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = relative_path(root, entry.path());
        if config.exclude_packages.contains(&path) {
            continue;
        }
        if filter.matches(&path) && is_package_dir(config, entry.path()) {
            packages.push(path);
        }
    }

    tracing::debug!(count = packages.len(), "discovered packages");
    Ok(packages)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve each changed file to its package.
///
/// Files failing `match`/`ignore` are skipped, as are files whose directory
/// no longer exists. A blank diff or one naming a directory is not a file
/// change and is skipped with a warning. Excluded packages are removed by
/// exact path.
pub fn match_packages(
    config: &Config,
    root: &Path,
    diffs: &[String],
    ui: &mut dyn UserInterface,
) -> BTreeSet<String> {
    let filter = PathFilter::from_config(config);
    let mut changed = BTreeSet::new();

    for diff in diffs {
        let diff = normalize_path(diff);
        if diff == ROOT_PACKAGE || root.join(&diff).is_dir() {
            ui.warning(&format!("{:?} is not a file, skipping.", diff));
            continue;
        }
        if !filter.matches(&diff) {
            ui.debug(&format!("Ignored file {:?}, skipping.", diff));
            continue;
        }
        let Some(package) = find_package_dir(config, root, &diff) else {
            ui.warning(&format!(
                "Directory of {:?} no longer exists, package was removed.",
                diff
            ));
            continue;
        };
        if package == ROOT_PACKAGE {
            ui.info(&format!("Global file changed: {:?}", diff));
        }
        changed.insert(package);
    }

    changed.retain(|package| {
        let excluded = config.exclude_packages.contains(package);
        if excluded {
            ui.info(&format!("Excluded package {:?}, skipping.", package));
        }
        !excluded
    });
    changed
}

/// Find the packages affected by a list of changed files.
///
/// If any change is global, every package under `root` is affected.
pub fn affected(
    config: &Config,
    root: &Path,
    diffs: &[String],
    ui: &mut dyn UserInterface,
) -> Result<Vec<String>> {
    let changed = match_packages(config, root, diffs, ui);
    if changed.contains(ROOT_PACKAGE) {
        ui.info("One or more global files were affected, all packages marked as affected.");
        return find_all_packages(config, root);
    }
    Ok(changed.into_iter().collect())
}
