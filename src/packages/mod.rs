//! Package discovery and affected-package resolution.
//!
//! # Example
//!
//! ```
//! use custard::config::Config;
//! use custard::packages::affected;
//! use custard::ui::MockUI;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join("api")).unwrap();
//! fs::write(temp.path().join("api/go.mod"), "module api").unwrap();
//!
//! let config = Config {
//!     package_file: vec!["go.mod".to_string()],
//!     ..Default::default()
//! };
//! let mut ui = MockUI::new();
//! let diffs = vec!["api/main.go".to_string()];
//! assert_eq!(affected(&config, temp.path(), &diffs, &mut ui).unwrap(), vec!["api"]);
//! ```

pub mod patterns;
pub mod resolver;

pub use patterns::{file_matches_config, glob_to_regex, matches, PathFilter, Pattern, PatternSet};
pub use resolver::{
    affected, find_all_packages, find_package_dir, is_package_dir, match_packages,
    normalize_path, parent_dir, ROOT_PACKAGE,
};
