// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Keyword index normalization.
//!
//! gtk-doc decorates symbol names for display: functions end in `" ()"`,
//! enumerations and structures carry a C keyword prefix. Qt Assistant looks
//! symbols up by their bare name, so the decorations are stripped.

use crate::parser::Keyword;
use crate::project::{Element, Project};

/// Strips gtk-doc decorations from a keyword name.
///
/// Trailing spaces and parentheses are removed first, then a leading
/// `"enum "`, then a leading `"struct "`.
///
/// # Example
///
/// ```
/// use devhelp2qhp::keywords::clean_keyword;
///
/// assert_eq!(clean_keyword("g_free ()"), "g_free");
/// assert_eq!(clean_keyword("enum GIOCondition"), "GIOCondition");
/// assert_eq!(clean_keyword("struct GList"), "GList");
/// ```
#[must_use]
pub fn clean_keyword(name: &str) -> &str {
    let name = name.trim_end_matches([' ', '(', ')']);
    let name = name.strip_prefix("enum ").unwrap_or(name);
    name.strip_prefix("struct ").unwrap_or(name)
}

/// Appends one `keyword` entry per source keyword to `project`.
///
/// Names that are empty after [`clean_keyword`] are skipped. Duplicates are
/// kept; each source keyword yields its own entry.
pub fn append_keywords(project: &mut Project, keywords: &[Keyword]) {
    let list = project.keywords();
    for keyword in keywords {
        let name = clean_keyword(&keyword.name);
        if name.is_empty() {
            continue;
        }
        project.append(
            list,
            Element::new("keyword")
                .with_attribute("name", name)
                .with_attribute("id", name)
                .with_attribute("ref", &keyword.link),
        );
    }
}
