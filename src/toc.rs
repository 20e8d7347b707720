// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Table of contents reconstruction.
//!
//! The devhelp `sub` tree arrives flattened in pre-order, each entry knowing
//! only how many direct children it has. [`append_toc`] rebuilds the nesting
//! with an explicit stack of open sections instead of recursion.

use crate::parser::Chapter;
use crate::project::{Element, NodeId, Project};

/// A section still waiting for some of its children.
#[derive(Debug)]
struct OpenSection {
    node: NodeId,
    remaining: usize,
}

/// Appends `chapters` below the root section of `project`.
///
/// Relies on the pre-order guarantee: the children of an entry follow it
/// immediately, before any of its siblings' descendants. Input that breaks
/// this produces wrong nesting rather than an error.
pub fn append_toc(project: &mut Project, chapters: &[Chapter]) {
    let root = project.toc();
    let mut stack: Vec<OpenSection> = Vec::new();
    let mut parent = root;

    for chapter in chapters {
        let section = project.append(
            parent,
            Element::new("section")
                .with_attribute("title", &chapter.name)
                .with_attribute("ref", &chapter.link),
        );

        if let Some(top) = stack.last_mut() {
            top.remaining -= 1;
            if top.remaining == 0 {
                stack.pop();
                parent = stack.last().map_or(root, |open| open.node);
            }
        }

        if chapter.child_count > 0 {
            stack.push(OpenSection {
                node: section,
                remaining: chapter.child_count,
            });
            parent = section;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Template;

    fn project() -> Project {
        Project::new(&Template {
            namespace: "org.example.foo.1.0".into(),
            filter_key: "foo".into(),
            filter_version: "1.0".into(),
            title: "Foo".into(),
            index: "index.html".into(),
        })
    }

    fn chapter(name: &str, child_count: usize) -> Chapter {
        Chapter {
            name: name.into(),
            link: format!("{}.html", name.to_lowercase()),
            child_count,
        }
    }

    /// Renders the tree below `id` as `A(B,C(D))`.
    fn outline(project: &Project, id: NodeId) -> String {
        project
            .children(id)
            .iter()
            .map(|child| {
                let title = project.element(*child).attribute("title").unwrap_or("?");
                if project.children(*child).is_empty() {
                    title.to_owned()
                } else {
                    format!("{title}({})", outline(project, *child))
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn nests_children_under_their_parent() {
        let mut project = project();
        append_toc(
            &mut project,
            &[
                chapter("A", 2),
                chapter("B", 0),
                chapter("C", 1),
                chapter("D", 0),
            ],
        );
        assert_eq!(outline(&project, project.toc()), "A(B,C(D))");
    }

    #[test]
    fn flat_entries_stay_siblings() {
        let mut project = project();
        append_toc(
            &mut project,
            &[chapter("A", 0), chapter("B", 0), chapter("C", 0)],
        );
        assert_eq!(outline(&project, project.toc()), "A,B,C");
    }

    #[test]
    fn returns_to_root_after_closing_deep_branch() {
        let mut project = project();
        append_toc(
            &mut project,
            &[
                chapter("A", 1),
                chapter("B", 1),
                chapter("C", 0),
                chapter("D", 0),
            ],
        );
        assert_eq!(outline(&project, project.toc()), "A(B(C)),D");
    }

    #[test]
    fn last_child_opening_a_branch_keeps_grandparent_open() {
        let mut project = project();
        append_toc(
            &mut project,
            &[
                chapter("A", 2),
                chapter("B", 1),
                chapter("C", 1),
                chapter("D", 0),
                chapter("E", 0),
                chapter("F", 0),
            ],
        );
        assert_eq!(outline(&project, project.toc()), "A(B(C(D)),E),F");
    }

    #[test]
    fn copies_title_and_ref() {
        let mut project = project();
        append_toc(&mut project, &[chapter("Intro", 0)]);

        let section = project.element(project.children(project.toc())[0]);
        assert_eq!(section.name, "section");
        assert_eq!(section.attribute("title"), Some("Intro"));
        assert_eq!(section.attribute("ref"), Some("intro.html"));
    }

    #[test]
    fn empty_input_leaves_root_section_empty() {
        let mut project = project();
        append_toc(&mut project, &[]);
        assert!(project.children(project.toc()).is_empty());
    }
}
