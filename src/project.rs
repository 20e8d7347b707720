// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! The Qt Help Project (`.qhp`) output document.
//!
//! A [`Project`] is built from a fixed skeleton by [`Project::new`] and then
//! grown by appending elements below the table of contents, keyword and file
//! lists. Elements live in an arena and are addressed by [`NodeId`], so
//! callers can keep handles to insertion points while the tree grows.
//!
//! # Output Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <QtHelpProject version="1.0">
//!   <namespace>org.example.foo.1.0</namespace>
//!   <virtualFolder>foo</virtualFolder>
//!   <customFilter name="Foo">
//!     <filterAttribute>foo</filterAttribute>
//!     <filterAttribute>1.0</filterAttribute>
//!   </customFilter>
//!   <filterSection>
//!     <filterAttribute>foo</filterAttribute>
//!     <filterAttribute>1.0</filterAttribute>
//!     <toc>
//!       <section title="Foo" ref="index.html"/>
//!     </toc>
//!     <keywords/>
//!     <files/>
//!   </filterSection>
//! </QtHelpProject>
//! ```
//!
//! The filter attribute pair appears twice on purpose: the help compiler
//! reads it from the custom filter and from the filter section.
//!
//! # Inspecting a Project
//!
//! Besides serialization, a project can be walked through [`Project::root`],
//! [`Project::children`] and [`Project::child`], which is how callers check
//! what a conversion produced without reparsing the XML:
//!
//! ```
//! use devhelp2qhp::project::{Project, Template};
//!
//! let project = Project::new(&Template {
//!     namespace: "org.example.foo.1.0".into(),
//!     filter_key: "foo".into(),
//!     filter_version: "1.0".into(),
//!     title: "Foo".into(),
//!     index: "index.html".into(),
//! });
//!
//! let filter = project.child(project.root(), "customFilter").unwrap();
//! assert_eq!(project.element(filter).attribute("name"), Some("Foo"));
//! assert_eq!(project.children(filter).len(), 2);
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use snafu::prelude::*;

/// Error type for serialization failures.
#[derive(Debug, Snafu)]
pub enum WriteError {
    /// Failed to emit an XML event.
    #[snafu(display("failed to write XML: {source}"))]
    Emit {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Handle to an element of a [`Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single element of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub name: &'static str,

    /// Attributes in the order they are written.
    pub attributes: Vec<(&'static str, String)>,

    /// Text content, if any.
    pub text: Option<String>,

    children: Vec<NodeId>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns the value of the attribute `key`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Values substituted into the project skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Unique help namespace (e.g., "org.gtk.glib.2.80").
    pub namespace: String,

    /// Filter key, also used as the virtual folder (e.g., "glib").
    pub filter_key: String,

    /// Filter version (e.g., "2.80").
    pub filter_version: String,

    /// Title of the book and of its custom filter.
    pub title: String,

    /// Page the root table of contents entry points to.
    pub index: String,
}

/// An in-memory Qt Help Project document.
#[derive(Debug, Clone)]
pub struct Project {
    nodes: Vec<Element>,
    root: NodeId,
    toc: NodeId,
    keywords: NodeId,
    files: NodeId,
}

impl Project {
    /// Builds the project skeleton from `template`.
    ///
    /// The table of contents starts out with a single root section pointing
    /// at the book index; keyword and file lists start out empty.
    #[must_use]
    pub fn new(template: &Template) -> Self {
        let mut project = Self {
            nodes: vec![Element::new("QtHelpProject").with_attribute("version", "1.0")],
            root: NodeId(0),
            toc: NodeId(0),
            keywords: NodeId(0),
            files: NodeId(0),
        };
        let root = project.root;

        project.append(root, Element::new("namespace").with_text(&template.namespace));
        project.append(
            root,
            Element::new("virtualFolder").with_text(&template.filter_key),
        );

        let custom_filter = project.append(
            root,
            Element::new("customFilter").with_attribute("name", &template.title),
        );
        project.append_filter_attributes(custom_filter, template);

        let filter_section = project.append(root, Element::new("filterSection"));
        project.append_filter_attributes(filter_section, template);

        let toc = project.append(filter_section, Element::new("toc"));
        project.toc = project.append(
            toc,
            Element::new("section")
                .with_attribute("title", &template.title)
                .with_attribute("ref", &template.index),
        );
        project.keywords = project.append(filter_section, Element::new("keywords"));
        project.files = project.append(filter_section, Element::new("files"));

        project
    }

    fn append_filter_attributes(&mut self, parent: NodeId, template: &Template) {
        self.append(
            parent,
            Element::new("filterAttribute").with_text(&template.filter_key),
        );
        self.append(
            parent,
            Element::new("filterAttribute").with_text(&template.filter_version),
        );
    }

    /// Appends `element` as the last child of `parent` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this project.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The document element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The root `toc/section`, parent of all transformed entries.
    #[must_use]
    pub const fn toc(&self) -> NodeId {
        self.toc
    }

    /// The `keywords` list.
    #[must_use]
    pub const fn keywords(&self) -> NodeId {
        self.keywords
    }

    /// The `files` list.
    #[must_use]
    pub const fn files(&self) -> NodeId {
        self.files
    }

    /// Returns the element behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this project.
    #[must_use]
    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    /// Returns the children of `id` in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.element(id).children
    }

    /// Finds the first child of `id` with the given tag name.
    #[must_use]
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.element(*c).name == name)
    }

    /// Serializes the project as an indented UTF-8 XML document.
    ///
    /// Elements without children or text are written self-closing.
    ///
    /// # Errors
    ///
    /// Returns an error if an XML event cannot be written.
    pub fn to_xml(&self) -> Result<Vec<u8>, WriteError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .context(EmitSnafu)?;
        self.write_element(&mut writer, self.root)?;
        let mut out = writer.into_inner();
        out.push(b'\n');
        Ok(out)
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<(), WriteError> {
        let element = self.element(id);
        let mut start = BytesStart::new(element.name);
        for (key, value) in &element.attributes {
            start.push_attribute((*key, value.as_str()));
        }

        if element.children.is_empty() && element.text.is_none() {
            return writer.write_event(Event::Empty(start)).context(EmitSnafu);
        }

        writer.write_event(Event::Start(start)).context(EmitSnafu)?;
        if let Some(text) = &element.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .context(EmitSnafu)?;
        }
        for child in &element.children {
            self.write_element(writer, *child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(element.name)))
            .context(EmitSnafu)
    }
}
