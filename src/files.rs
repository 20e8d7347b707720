// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Collection of the documentation assets listed in the project.
//!
//! The help compiler accepts glob patterns in `file` entries, so the project
//! lists one pattern per asset type present next to the devhelp file instead
//! of every file by name.

use crate::project::{Element, Project};
use std::path::Path;
use walkdir::WalkDir;

/// Asset extensions, in the order their patterns are listed.
pub const EXTENSIONS: [&str; 6] = ["css", "gif", "html", "jpg", "jpeg", "png"];

/// Returns the patterns that match at least one entry of `dir`.
///
/// For each of [`EXTENSIONS`] the lowercase pattern (`*.png`) is checked
/// before the uppercase one (`*.PNG`). Matching follows shell globbing: the
/// suffix comparison is case-sensitive and hidden entries are skipped.
/// A missing or unreadable directory matches nothing.
#[must_use]
pub fn matching_patterns(dir: &Path) -> Vec<String> {
    let names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();

    EXTENSIONS
        .iter()
        .flat_map(|ext| [ext.to_lowercase(), ext.to_uppercase()])
        .filter(|ext| {
            let suffix = format!(".{ext}");
            names.iter().any(|name| name.ends_with(&suffix))
        })
        .map(|ext| format!("*.{ext}"))
        .collect()
}

/// Appends a `file` entry to `project` for every pattern matching in `dir`.
pub fn append_files(project: &mut Project, dir: &Path) {
    let list = project.files();
    for pattern in matching_patterns(dir) {
        project.append(list, Element::new("file").with_text(pattern));
    }
}
