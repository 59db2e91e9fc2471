//! GraphML rendering
//!
//! Produces a complete GraphML document from an assembled [`Graph`]:
//! `<key>` declarations for edges and nodes, then a directed `<graph>` with
//! every node followed by every edge.

use crate::graph::{Edge, Graph, Node};
use crate::schema::{AttrType, KeyDomain};
use std::collections::BTreeMap;
use std::io::Write;

/// GraphML XML namespace
pub const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
/// Location of the GraphML 1.0 schema
pub const GRAPHML_SCHEMA: &str = "http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Render a graph as a GraphML document
///
/// Key ids are generated (`n0`, `e0`, ...) in attribute-name order so that
/// node and edge attributes of the same name never share an id; readers use
/// `attr.name` for the column name.
#[must_use]
pub fn to_graphml_string(graph: &Graph) -> String {
    let node_keys = KeyTable::new(
        KeyDomain::Node,
        graph.schema.node_keys(),
        graph.nodes.iter().flat_map(|n| n.data.iter().map(|(k, _)| k.as_str())),
    );
    let edge_keys = KeyTable::new(
        KeyDomain::Edge,
        graph.schema.edge_keys(),
        graph.edges.iter().flat_map(|e| e.data.iter().map(|(k, _)| k.as_str())),
    );

    let mut out = String::new();

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<graphml xmlns=\"{GRAPHML_NS}\" xmlns:xsi=\"{XSI_NS}\" \
         xsi:schemaLocation=\"{GRAPHML_NS} {GRAPHML_SCHEMA}\">\n"
    ));

    edge_keys.push_declarations(&mut out);
    node_keys.push_declarations(&mut out);

    out.push_str(&format!("  <graph id=\"{}\" edgedefault=\"directed\">\n", escape(&graph.name)));
    for node in &graph.nodes {
        push_node(&mut out, node, &node_keys);
    }
    for edge in &graph.edges {
        push_edge(&mut out, edge, &edge_keys);
    }
    out.push_str("  </graph>\n");
    out.push_str("</graphml>\n");

    out
}

/// Write a graph as GraphML to any writer
pub fn write_graphml<W: Write>(graph: &Graph, mut writer: W) -> std::io::Result<()> {
    writer.write_all(to_graphml_string(graph).as_bytes())?;
    writer.flush()
}

/// Attribute names of one domain mapped to their generated key ids
struct KeyTable<'a> {
    domain: KeyDomain,
    keys: BTreeMap<&'a str, (String, AttrType)>,
}

impl<'a> KeyTable<'a> {
    fn new(
        domain: KeyDomain,
        registered: impl Iterator<Item = (&'a str, AttrType)>,
        used: impl Iterator<Item = &'a str>,
    ) -> Self {
        let mut types: BTreeMap<&str, AttrType> = registered.collect();
        for name in used {
            types.entry(name).or_default();
        }

        let prefix = match domain {
            KeyDomain::Node => 'n',
            KeyDomain::Edge => 'e',
        };
        let keys = types
            .into_iter()
            .enumerate()
            .map(|(i, (name, attr_type))| (name, (format!("{prefix}{i}"), attr_type)))
            .collect();

        Self { domain, keys }
    }

    fn id(&self, name: &str) -> &str {
        self.keys.get(name).map_or("", |(id, _)| id.as_str())
    }

    fn push_declarations(&self, out: &mut String) {
        for (name, (id, attr_type)) in &self.keys {
            out.push_str(&format!(
                "  <key id=\"{id}\" for=\"{}\" attr.name=\"{}\" attr.type=\"{}\"/>\n",
                self.domain.as_str(),
                escape(name),
                attr_type.as_str()
            ));
        }
    }
}

fn push_node(out: &mut String, node: &Node, keys: &KeyTable<'_>) {
    out.push_str(&format!("    <node id=\"{}\">\n", escape(&node.id)));
    push_data(out, &node.data, keys);
    out.push_str("    </node>\n");
}

fn push_edge(out: &mut String, edge: &Edge, keys: &KeyTable<'_>) {
    out.push_str(&format!(
        "    <edge source=\"{}\" target=\"{}\">\n",
        escape(&edge.source),
        escape(&edge.target)
    ));
    push_data(out, &edge.data, keys);
    out.push_str("    </edge>\n");
}

fn push_data(out: &mut String, data: &[(String, String)], keys: &KeyTable<'_>) {
    for (name, value) in data {
        out.push_str(&format!("      <data key=\"{}\">{}</data>\n", keys.id(name), escape(value)));
    }
}

/// Escape text for use in XML content and attribute values
///
/// Characters XML 1.0 cannot represent at all are dropped.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => {},
        }
    }
    escaped
}

const fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape(r#"a < b & "c" > 'd'"#),
            "a &lt; b &amp; &quot;c&quot; &gt; &apos;d&apos;"
        );
    }

    #[test]
    fn test_escape_whitespace_and_controls() {
        assert_eq!(escape("line\nnext\tx"), "line&#10;next&#9;x");
        assert_eq!(escape("bell\u{7}"), "bell");
    }

    #[test]
    fn test_escape_keeps_unicode() {
        assert_eq!(escape("café 🦀"), "café 🦀");
    }
}
