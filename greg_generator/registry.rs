////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Read-only view of a Khronos XML registry (`gl.xml`).
//!
//! The document is parsed once into an owned tree of [`Element`]s and
//! [`Node`]s. Everything downstream only ever queries it.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use xml::reader::{EventReader, ParserConfig, XmlEvent};

use crate::error::{GeneratorError, Result};

/// A child of an element: either a nested element or a run of character data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Element name, or `None` for text.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(&element.name),
            Node::Text(_) => None,
        }
    }

    /// The node's own text value. Elements have none; their text lives in children.
    pub fn own_text(&self) -> &str {
        match self {
            Node::Element(_) => "",
            Node::Text(text) => text,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Element {
        Element { name: name.into(), ..Element::default() }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Text of the first text node inside the first child called `name`.
    ///
    /// Returns an empty string when either is missing, so `<proto>` lookups
    /// on odd registry entries simply fail to match anything.
    pub fn child_text(&self, name: &str) -> &str {
        self.child(name).map(Element::text).unwrap_or("")
    }

    /// Text of the first text node directly inside this element.
    pub fn text(&self) -> &str {
        self.children
            .iter()
            .find_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .unwrap_or("")
    }
}

/// A parsed registry document.
#[derive(Clone, Debug)]
pub struct Registry {
    root: Element,
}

impl Registry {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Registry> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GeneratorError::io(path, e))?;
        Registry::from_reader(BufReader::new(file))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(src: &str) -> Result<Registry> {
        Registry::from_reader(io::Cursor::new(src.as_bytes()))
    }

    pub fn from_reader<R: Read>(src: R) -> Result<Registry> {
        let config = ParserConfig::new()
            .trim_whitespace(false)
            .whitespace_to_characters(false)
            .cdata_to_characters(true)
            .ignore_comments(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        for event in EventReader::new_with_config(src, config) {
            match event? {
                XmlEvent::StartElement { name, attributes, .. } => {
                    let mut element = Element::new(name.local_name);
                    element.attributes =
                        attributes.into_iter().map(|a| (a.name.local_name, a.value)).collect();
                    stack.push(element);
                },
                XmlEvent::EndElement { .. } => {
                    // the parser rejects unbalanced documents, so the stack is never empty here
                    if let Some(element) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(Node::Element(element)),
                            None => root = Some(element),
                        }
                    }
                },
                XmlEvent::Characters(text) | XmlEvent::CData(text) => {
                    if let Some(parent) = stack.last_mut() {
                        // adjacent runs (text, then CDATA) read as one
                        match parent.children.last_mut() {
                            Some(Node::Text(prev)) => prev.push_str(&text),
                            _ => parent.children.push(Node::Text(text)),
                        }
                    }
                },
                // whitespace-only runs between elements carry no declaration text
                _ => {},
            }
        }

        let root = root.ok_or(GeneratorError::EmptyDocument)?;
        debug!("Parsed registry with root <{}>", root.name);
        Ok(Registry { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Evaluates an absolute path such as `/registry/types/type[@requires]`.
    ///
    /// Each step names a child element and may carry one `[@attr]` predicate
    /// requiring that attribute to be present. Matches come back in document
    /// order.
    pub fn select(&self, path: &str) -> Vec<&Element> {
        let mut steps = path.trim_start_matches('/').split('/').map(Step::parse);

        let first = match steps.next() {
            Some(step) => step,
            None => return Vec::new(),
        };
        if !first.matches(&self.root) {
            return Vec::new();
        }

        let mut current = vec![&self.root];
        for step in steps {
            current = current
                .into_iter()
                .flat_map(|element| element.elements())
                .filter(|element| step.matches(element))
                .collect();
        }
        current
    }
}

struct Step<'a> {
    name: &'a str,
    required_attr: Option<&'a str>,
}

impl<'a> Step<'a> {
    fn parse(step: &'a str) -> Step<'a> {
        match step.find('[') {
            Some(open) => Step {
                name: &step[..open],
                required_attr: Some(step[open + 1..].trim_end_matches(']').trim_start_matches('@')),
            },
            None => Step { name: step, required_attr: None },
        }
    }

    fn matches(&self, element: &Element) -> bool {
        element.name == self.name && self.required_attr.map_or(true, |attr| element.attr(attr).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
    <!-- comment -->
    <types>
        <type>typedef unsigned int <name>GLenum</name>;</type>
        <type name="khrplatform">#include &lt;KHR/khrplatform.h&gt;</type>
        <type requires="khrplatform">typedef khronos_int8_t <name>GLbyte</name>;</type>
    </types>
    <feature api="gl" name="GL_VERSION_1_0" number="1.0"/>
</registry>"#;

    #[test]
    fn parses_tree_without_whitespace_runs() {
        let registry = Registry::from_str(DOC).unwrap();
        let root = registry.root();
        assert_eq!(root.name, "registry");
        assert_eq!(root.elements().count(), 2);
        assert!(root.children.iter().all(|n| matches!(n, Node::Element(_))));

        let types = root.child("types").unwrap();
        let first = types.child("type").unwrap();
        assert_eq!(first.text(), "typedef unsigned int ");
        assert_eq!(first.child_text("name"), "GLenum");
        assert_eq!(first.children.len(), 3);
        assert_eq!(first.children[1].name(), Some("name"));
        assert_eq!(first.children[2].own_text(), ";");
    }

    #[test]
    fn decodes_entities_in_text() {
        let registry = Registry::from_str(DOC).unwrap();
        let khr = registry.select("/registry/types/type")[1];
        assert_eq!(khr.attr("name"), Some("khrplatform"));
        assert_eq!(khr.text(), "#include <KHR/khrplatform.h>");
    }

    #[test]
    fn select_walks_paths_and_predicates() {
        let registry = Registry::from_str(DOC).unwrap();
        assert_eq!(registry.select("/registry/types/type").len(), 3);
        assert_eq!(registry.select("/registry/feature").len(), 1);

        let with_requires = registry.select("/registry/types/type[@requires]");
        assert_eq!(with_requires.len(), 1);
        assert_eq!(with_requires[0].child_text("name"), "GLbyte");

        assert!(registry.select("/other/types").is_empty());
        assert!(registry.select("/registry/enums/enum").is_empty());
    }

    #[test]
    fn missing_lookups_are_empty() {
        let registry = Registry::from_str(DOC).unwrap();
        let feature = registry.select("/registry/feature")[0];
        assert_eq!(feature.attr("profile"), None);
        assert_eq!(feature.child_text("name"), "");
        assert_eq!(feature.text(), "");
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(Registry::from_str("<registry><feature></registry>"), Err(GeneratorError::Parse(_))));
        assert!(Registry::from_str("").is_err());
    }
}
