use ctl::{FormulaNode, Tag, MCC_NAMESPACE};
use roxmltree::{Document, Node};

use crate::ExtractError;

/// One `<property>` element, before any validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEntry {
    pub id: Option<String>,
    pub formula: Option<FormulaNode>,
}

/// Collects the `<property>` elements of an MCC property file, at any depth,
/// in document order.
pub fn parse_properties(source: &str) -> Result<Vec<PropertyEntry>, ExtractError> {
    let doc = Document::parse(source)?;

    let entries = doc
        .descendants()
        .filter(|n| is_mcc(*n, "property"))
        .map(|prop| PropertyEntry {
            // Only the direct <id>/<formula> children in the MCC namespace count.
            id: child(prop, "id").and_then(text_of),
            formula: child(prop, "formula").map(to_formula),
        })
        .collect();

    Ok(entries)
}

// Text is kept on leaves only, whitespace between elements never reaches the tree.
fn to_formula(node: Node) -> FormulaNode {
    let children = node.children().filter(Node::is_element).map(to_formula).collect::<Vec<_>>();
    let text = if children.is_empty() {
        text_of(node)
    } else {
        None
    };
    FormulaNode {
        tag: tag_of(node),
        children,
        text,
    }
}

fn tag_of(node: Node) -> Tag {
    let name = node.tag_name();
    Tag::from_qualified(name.namespace(), name.name())
}

fn is_mcc(node: Node, local: &str) -> bool {
    let name = node.tag_name();
    node.is_element() && name.namespace() == Some(MCC_NAMESPACE) && name.name() == local
}

fn child<'a, 'input>(node: Node<'a, 'input>, local: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is_mcc(*c, local))
}

fn text_of(node: Node) -> Option<String> {
    node.text().map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}
