// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert gtk-doc devhelp2 indexes to Qt Help Project files.
//!
//! gtk-doc publishes API documentation as a directory of HTML pages plus a
//! `.devhelp2` index. Qt Assistant instead wants a compressed help file built
//! by `qhelpgenerator` from a `.qhp` project. This crate writes that project.
//!
//! # Overview
//!
//! 1. Parse the devhelp index, honoring its XML namespace
//! 2. Fill in the project skeleton from the book metadata
//! 3. Rebuild the table of contents and normalize the keyword index
//! 4. List the HTML, stylesheet and image assets next to the index
//!
//! # Example
//!
//! ```no_run
//! use devhelp2qhp::{convert, parser};
//! use std::path::Path;
//!
//! let source = Path::new("html/glib.devhelp2");
//! let xml = std::fs::read_to_string(source).unwrap();
//! let devhelp = parser::parse_devhelp(&xml).unwrap();
//!
//! let opts = convert::ConvertOptions {
//!     namespace: "org.gtk.glib".into(),
//!     version: "2.80".into(),
//! };
//! let project = convert::convert(&devhelp, convert::asset_dir(source), &opts).unwrap();
//!
//! std::fs::write(convert::output_path(source), project.to_xml().unwrap()).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`parser`]: devhelp parsing and namespace detection
//! - [`project`]: the `.qhp` document, its skeleton and serialization
//! - [`toc`]: table of contents reconstruction
//! - [`keywords`]: keyword name normalization
//! - [`files`]: asset pattern collection
//! - [`convert`]: the pipeline tying the steps together

#![deny(missing_docs)]

pub mod convert;
pub mod files;
pub mod keywords;
pub mod parser;
pub mod project;
pub mod toc;
