// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! The devhelp to Qt Help Project pipeline.
//!
//! # Example
//!
//! ```
//! use devhelp2qhp::convert::{convert, ConvertOptions};
//! use devhelp2qhp::parser::parse_devhelp;
//! use std::path::Path;
//!
//! let devhelp = parse_devhelp(r#"<book title="Foo" link="index.html" name="foo"/>"#).unwrap();
//! let opts = ConvertOptions {
//!     namespace: "org.example.foo".into(),
//!     version: "1.0".into(),
//! };
//!
//! let project = convert(&devhelp, Path::new("no/such/dir"), &opts).unwrap();
//! let xml = String::from_utf8(project.to_xml().unwrap()).unwrap();
//! assert!(xml.contains("<namespace>org.example.foo.1.0</namespace>"));
//! ```

use crate::files::append_files;
use crate::keywords::append_keywords;
use crate::parser::{Devhelp, ParseError};
use crate::project::{Project, Template};
use crate::toc::append_toc;
use std::path::{Path, PathBuf};

/// Extension of the generated project file.
pub const OUTPUT_EXTENSION: &str = "qhp";

/// Settings supplied from outside the devhelp document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Namespace identifier prefix (e.g., "org.gtk.glib").
    pub namespace: String,

    /// Version of the documented package (e.g., "2.80").
    pub version: String,
}

impl ConvertOptions {
    /// The help namespace, `<namespace>.<version>`.
    #[must_use]
    pub fn qualified_namespace(&self) -> String {
        format!("{}.{}", self.namespace, self.version)
    }
}

/// Converts a parsed devhelp document into a project.
///
/// `asset_dir` is scanned for stylesheets, pages and images; it is normally
/// the directory holding the devhelp file.
///
/// # Errors
///
/// Returns [`ParseError::MissingAttribute`] if the book, a `sub` or a
/// `keyword` element lacks a required attribute.
pub fn convert(
    devhelp: &Devhelp<'_>,
    asset_dir: &Path,
    opts: &ConvertOptions,
) -> Result<Project, ParseError> {
    let book = devhelp.book()?;
    let chapters = devhelp.chapters()?;
    let keywords = devhelp.keywords()?;

    let mut project = Project::new(&Template {
        namespace: opts.qualified_namespace(),
        filter_key: book.name,
        filter_version: opts.version.clone(),
        title: book.title,
        index: book.link,
    });
    append_toc(&mut project, &chapters);
    append_keywords(&mut project, &keywords);
    append_files(&mut project, asset_dir);

    Ok(project)
}

/// Returns the directory whose assets belong to `source`.
///
/// This is the directory holding the index, not the index path with its
/// extension stripped: gtk-doc writes the pages beside the index, and the
/// `file` patterns must be relative to the `.qhp` written in the same place.
#[must_use]
pub fn asset_dir(source: &Path) -> &Path {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Returns the project path for `source`: same directory and base name,
/// `.qhp` extension.
#[must_use]
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}
