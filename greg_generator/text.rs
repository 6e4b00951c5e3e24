////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Flattens mixed-content registry elements back into C declaration text.

use crate::registry::{Element, Node};

/// Calling convention token substituted for `<apientry/>`.
pub const APIENTRY: &str = "GLAPIENTRY";

/// Returns the full text of a `<type>` element, with `<apientry/>` rendered as `GLAPIENTRY`.
pub fn extract_type_text(element: &Element) -> String {
    let mut out = String::new();
    scrape(element, &mut out, &|child: &Element| match child.name.as_str() {
        "apientry" => Some(APIENTRY),
        _ => None,
    });
    out
}

/// Returns the text of a `<proto>` or `<param>` element without its `<name>`.
///
/// This is the return type of a prototype, or the type of a parameter.
pub fn extract_proto_text(element: &Element) -> String {
    let mut out = String::new();
    scrape(element, &mut out, &|child: &Element| match child.name.as_str() {
        "name" => Some(""),
        _ => None,
    });
    out
}

/// Joins the type text of every `<param>` of a `<command>` with `", "`.
///
/// A command without parameters yields `void`.
pub fn format_params(command: &Element) -> String {
    let params = command.children_named("param").map(extract_proto_text).collect::<Vec<_>>();

    if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    }
}

/// Depth-first concatenation. `replace` may substitute a child element's
/// whole subtree with a fixed string instead of descending into it.
fn scrape<F>(element: &Element, out: &mut String, replace: &F)
where F: Fn(&Element) -> Option<&'static str> {
    if let Some(text) = replace(element) {
        out.push_str(text);
        return;
    }

    for node in &element.children {
        match node {
            Node::Text(_) => out.push_str(node.own_text()),
            Node::Element(child) => scrape(child, out, replace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn parse(xml: &str) -> Element {
        Registry::from_str(xml).unwrap().root().clone()
    }

    #[test]
    fn type_text_keeps_names_and_replaces_apientry() {
        let ty = parse("<type>typedef void (<apientry/> *<name>GLDEBUGPROC</name>)(GLenum source);</type>");
        assert_eq!(extract_type_text(&ty), "typedef void (GLAPIENTRY *GLDEBUGPROC)(GLenum source);");

        let plain = parse("<type>typedef unsigned int <name>GLenum</name>;</type>");
        assert_eq!(extract_type_text(&plain), "typedef unsigned int GLenum;");
    }

    #[test]
    fn proto_text_drops_the_identifier() {
        let proto = parse("<proto>const <ptype>GLubyte</ptype> *<name>glGetString</name></proto>");
        assert_eq!(extract_proto_text(&proto), "const GLubyte *");

        let param = parse("<param>const <ptype>GLchar</ptype> *const*<name>string</name></param>");
        assert_eq!(extract_proto_text(&param), "const GLchar *const*");
    }

    #[test]
    fn empty_parameter_list_is_void() {
        let cmd = parse("<command><proto>void <name>glFinish</name></proto></command>");
        assert_eq!(format_params(&cmd), "void");
    }

    #[test]
    fn parameters_are_comma_joined_in_order() {
        let cmd = parse(
            "<command><proto>void <name>glBindBuffer</name></proto>\
             <param><ptype>GLenum</ptype> <name>target</name></param>\
             <param><ptype>GLuint</ptype> <name>buffer</name></param></command>",
        );
        assert_eq!(format_params(&cmd), "GLenum, GLuint");
    }
}
