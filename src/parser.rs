// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! XML parsing for gtk-doc `.devhelp2` indexes.
//!
//! A devhelp2 document describes one book of API documentation:
//! - The root `book` element carries the book `title`, its index `link` and
//!   the short `name` of the package
//! - Nested `sub` elements form the table of contents
//! - Flat `keyword` elements list every documented symbol
//!
//! Documents written by gtk-doc live in the `http://www.devhelp.net/book`
//! namespace, but older or hand-written ones may not be namespaced at all.
//! Every element lookup is therefore qualified with the namespace of the
//! root element, see [`namespace_prefix`].
//!
//! # Example
//!
//! ```
//! use devhelp2qhp::parser::parse_devhelp;
//!
//! let xml = r#"<book xmlns="http://www.devhelp.net/book"
//!                    title="Foo Reference" link="index.html" name="foo">
//!     <chapters>
//!         <sub name="API" link="api.html"><sub name="FooBar" link="FooBar.html"/></sub>
//!     </chapters>
//!     <functions>
//!         <keyword type="function" name="foo_bar_new ()" link="FooBar.html#foo-bar-new"/>
//!     </functions>
//! </book>"#;
//!
//! let devhelp = parse_devhelp(xml).unwrap();
//! assert_eq!(devhelp.book().unwrap().name, "foo");
//! assert_eq!(devhelp.chapters().unwrap().len(), 2);
//! assert_eq!(devhelp.keywords().unwrap()[0].name, "foo_bar_new ()");
//! ```

use roxmltree::{Document, Node, ParsingOptions};
use snafu::prelude::*;

/// Error type for devhelp parsing failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[snafu(display("failed to parse XML: {source}"))]
    Xml {
        /// The underlying XML parsing error.
        source: roxmltree::Error,
    },

    /// An element lacks an attribute the conversion depends on.
    #[snafu(display("<{element}> element is missing the `{attribute}` attribute"))]
    MissingAttribute {
        /// Local name of the offending element.
        element: String,
        /// Name of the missing attribute.
        attribute: &'static str,
    },
}

/// Metadata from the root element of a devhelp document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Human readable title (e.g., "GLib Reference Manual").
    pub title: String,

    /// Link to the landing page of the book, relative to the index file.
    pub link: String,

    /// Short package name (e.g., "glib").
    pub name: String,
}

/// One table of contents entry, flattened out of the `sub` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Title shown for the entry.
    pub name: String,

    /// Page the entry points to.
    pub link: String,

    /// Number of `sub` elements directly below this one.
    pub child_count: usize,
}

/// One symbol from the keyword index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// Symbol name as written by gtk-doc, possibly decorated
    /// (e.g., "g_free ()" or "enum GIOCondition").
    pub name: String,

    /// Anchor of the symbol documentation.
    pub link: String,
}

/// A parsed devhelp document.
///
/// Wraps the XML tree together with the namespace prefix detected from the
/// root element, so all lookups agree on the element names.
#[derive(Debug)]
pub struct Devhelp<'input> {
    doc: Document<'input>,
    namespace: Option<String>,
    prefix: String,
}

impl<'input> Devhelp<'input> {
    /// Returns the namespace prefix used for element lookups.
    ///
    /// Empty for documents without a namespace.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Reads the book metadata from the root element.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingAttribute`] if `title`, `link` or `name`
    /// is absent.
    pub fn book(&self) -> Result<Book, ParseError> {
        let root = self.doc.root_element();
        Ok(Book {
            title: required(root, "title")?,
            link: required(root, "link")?,
            name: required(root, "name")?,
        })
    }

    /// Returns every `sub` element as a [`Chapter`], in document order.
    ///
    /// Document order is a pre-order walk, so the children of an entry always
    /// follow it directly; `child_count` is enough to rebuild the nesting.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingAttribute`] if a `sub` lacks `name` or
    /// `link`.
    pub fn chapters(&self) -> Result<Vec<Chapter>, ParseError> {
        self.elements("sub").map(|node| self.chapter(node)).collect()
    }

    /// Returns every `keyword` element, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingAttribute`] if a `keyword` lacks `name`
    /// or `link`.
    pub fn keywords(&self) -> Result<Vec<Keyword>, ParseError> {
        self.elements("keyword").map(keyword).collect()
    }

    fn chapter(&self, node: Node<'_, '_>) -> Result<Chapter, ParseError> {
        Ok(Chapter {
            name: required(node, "name")?,
            link: required(node, "link")?,
            child_count: node.children().filter(|c| self.is(*c, "sub")).count(),
        })
    }

    fn elements<'a>(&'a self, local: &'a str) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.doc.descendants().filter(move |node| self.is(*node, local))
    }

    /// Checks whether `node` is an element named `local` in this document's
    /// namespace.
    fn is(&self, node: Node<'_, '_>, local: &str) -> bool {
        let tag = node.tag_name();
        node.is_element() && tag.name() == local && tag.namespace() == self.namespace.as_deref()
    }
}

/// Returns the namespace prefix of the root element in Clark notation.
///
/// For `<book xmlns="http://www.devhelp.net/book">` this is
/// `{http://www.devhelp.net/book}`; for an unqualified root it is empty.
#[must_use]
pub fn namespace_prefix(doc: &Document<'_>) -> String {
    doc.root_element()
        .tag_name()
        .namespace()
        .map(|ns| format!("{{{ns}}}"))
        .unwrap_or_default()
}

fn keyword(node: Node<'_, '_>) -> Result<Keyword, ParseError> {
    Ok(Keyword {
        name: required(node, "name")?,
        link: required(node, "link")?,
    })
}

/// Reads an attribute that the conversion cannot do without.
fn required(node: Node<'_, '_>, attribute: &'static str) -> Result<String, ParseError> {
    node.attribute(attribute)
        .map(str::to_owned)
        .context(MissingAttributeSnafu {
            element: node.tag_name().name(),
            attribute,
        })
}

/// Parses a devhelp document and detects its namespace.
///
/// DOCTYPE declarations are accepted since devhelp files written by older
/// tools still carry one.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the text is not well-formed XML.
pub fn parse_devhelp(xml: &str) -> Result<Devhelp<'_>, ParseError> {
    let doc = Document::parse_with_options(
        xml,
        ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        },
    )
    .context(XmlSnafu)?;
    let namespace = doc.root_element().tag_name().namespace().map(str::to_owned);
    let prefix = namespace_prefix(&doc);
    Ok(Devhelp {
        doc,
        namespace,
        prefix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMESPACED: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>
<book xmlns="http://www.devhelp.net/book" title="Foo" link="index.html" author="" name="foo" version="2" language="c">
  <chapters>
    <sub name="A" link="a.html">
      <sub name="B" link="b.html"/>
      <sub name="C" link="c.html">
        <sub name="D" link="d.html"/>
      </sub>
    </sub>
  </chapters>
  <functions>
    <keyword type="function" name="foo_new ()" link="a.html#foo-new"/>
    <keyword type="enum" name="enum FooFlags" link="b.html#FooFlags"/>
  </functions>
</book>"#;

    fn plain(body: &str) -> String {
        format!(r#"<book title="Foo" link="index.html" name="foo">{body}</book>"#)
    }

    #[test]
    fn detects_namespace_prefix() {
        let devhelp = parse_devhelp(NAMESPACED).unwrap();
        assert_eq!(devhelp.prefix(), "{http://www.devhelp.net/book}");
    }

    #[test]
    fn unqualified_document_has_empty_prefix() {
        let xml = plain("");
        let devhelp = parse_devhelp(&xml).unwrap();
        assert_eq!(devhelp.prefix(), "");
    }

    #[test]
    fn reads_book_metadata() {
        let book = parse_devhelp(NAMESPACED).unwrap().book().unwrap();
        assert_eq!(
            book,
            Book {
                title: "Foo".into(),
                link: "index.html".into(),
                name: "foo".into(),
            }
        );
    }

    #[test]
    fn flattens_chapters_in_preorder() {
        let chapters = parse_devhelp(NAMESPACED).unwrap().chapters().unwrap();
        let summary: Vec<_> = chapters
            .iter()
            .map(|c| (c.name.as_str(), c.child_count))
            .collect();
        assert_eq!(summary, [("A", 2), ("B", 0), ("C", 1), ("D", 0)]);
    }

    #[test]
    fn finds_elements_without_namespace() {
        let xml = plain(
            r#"<chapters><sub name="A" link="a.html"/></chapters>
               <functions><keyword name="a ()" link="a.html#a"/></functions>"#,
        );
        let devhelp = parse_devhelp(&xml).unwrap();
        assert_eq!(devhelp.chapters().unwrap().len(), 1);
        assert_eq!(devhelp.keywords().unwrap().len(), 1);
    }

    #[test]
    fn ignores_elements_from_other_namespaces() {
        let xml = r#"<book xmlns="http://www.devhelp.net/book" xmlns:x="urn:other"
                           title="Foo" link="index.html" name="foo">
            <chapters>
                <sub name="A" link="a.html"/>
                <x:sub name="Foreign" link="x.html"/>
            </chapters>
        </book>"#;
        let chapters = parse_devhelp(xml).unwrap().chapters().unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].name, "A");
    }

    #[test]
    fn unqualified_document_ignores_namespaced_elements() {
        let xml = plain(
            r#"<chapters xmlns:x="urn:x">
                   <x:sub name="Foreign" link="x.html"><sub name="Nested" link="n.html"/></x:sub>
                   <sub name="A" link="a.html"/>
               </chapters>"#,
        );
        let chapters = parse_devhelp(&xml).unwrap().chapters().unwrap();
        let names: Vec<_> = chapters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Nested", "A"]);
    }

    #[test]
    fn counts_only_same_namespace_children() {
        let xml = r#"<book xmlns="urn:x" xmlns:o="urn:other" title="Foo" link="index.html" name="foo">
            <sub name="A" link="a.html"><sub name="B" link="b.html"/><o:sub name="X" link="x.html"/></sub>
        </book>"#;
        let chapters = parse_devhelp(xml).unwrap().chapters().unwrap();
        assert_eq!(chapters[0].child_count, 1);
    }

    #[test]
    fn reads_keywords_in_document_order() {
        let keywords = parse_devhelp(NAMESPACED).unwrap().keywords().unwrap();
        assert_eq!(
            keywords,
            [
                Keyword {
                    name: "foo_new ()".into(),
                    link: "a.html#foo-new".into(),
                },
                Keyword {
                    name: "enum FooFlags".into(),
                    link: "b.html#FooFlags".into(),
                },
            ]
        );
    }

    #[test]
    fn accepts_doctype() {
        let xml = format!(
            "<!DOCTYPE book PUBLIC \"-//Devhelp//DTD Devhelp 2//EN\" \"devhelp-2.dtd\">\n{}",
            plain("")
        );
        assert!(parse_devhelp(&xml).is_ok());
    }

    #[test]
    fn rejects_malformed_xml() {
        let err = parse_devhelp("<book title=").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }));
    }

    #[test]
    fn reports_missing_sub_attribute() {
        let xml = plain(r#"<chapters><sub link="a.html"/></chapters>"#);
        let err = parse_devhelp(&xml).unwrap().chapters().unwrap_err();
        assert_eq!(err.to_string(), "<sub> element is missing the `name` attribute");
    }

    #[test]
    fn reports_missing_book_attribute() {
        let devhelp = parse_devhelp(r#"<book title="Foo" name="foo"/>"#).unwrap();
        match devhelp.book() {
            Err(ParseError::MissingAttribute { element, attribute }) => {
                assert_eq!(element, "book");
                assert_eq!(attribute, "link");
            }
            other => panic!("Expected MissingAttribute, got {other:?}"),
        }
    }
}
