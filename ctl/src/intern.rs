use std::fmt;
use std::io;

use crate::index::{new_index, IndexedSet};
use crate::FormulaNode;

new_index!(pub index PropId);

impl fmt::Display for PropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.index.to_usize())
    }
}

/// Canonical serialization of an atomic subtree.
///
/// Equal subtrees give equal keys wherever they occur; whitespace-only text is
/// not part of a node, so indentation in the source document is irrelevant.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PropositionKey(String);

impl PropositionKey {
    pub fn of(node: &FormulaNode) -> Self {
        let mut key = String::new();
        write_canonical(node, &mut key);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_canonical(node: &FormulaNode, out: &mut String) {
    let name = node.tag.name();
    out.push('<');
    out.push_str(name);
    if node.children.is_empty() && node.text.is_none() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    // Escaped, so leaf text can never be mistaken for markup.
    if let Some(text) = &node.text {
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                c => out.push(c),
            }
        }
    }
    for child in &node.children {
        write_canonical(child, out);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Atomic propositions seen so far, numbered by first occurrence.
///
/// One table is one interning session: share it between documents to get a
/// vocabulary deduplicated across all of them, or create one per document.
#[derive(Default)]
pub struct PropositionTable {
    keys: IndexedSet<PropId, PropositionKey>,
}

impl PropositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol of `node`, allocating the next one if the subtree
    /// was never seen in this session.
    pub fn intern(&mut self, node: &FormulaNode) -> PropId {
        let (id, is_new) = self.keys.insert_full(PropositionKey::of(node));
        if is_new {
            log::debug!("{id} := {}", self.keys[id]);
        }
        id
    }

    pub fn lookup(&self, node: &FormulaNode) -> Option<PropId> {
        self.keys.get_index_of(&PropositionKey::of(node))
    }

    pub fn key(&self, id: PropId) -> Option<&PropositionKey> {
        self.keys.get(id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Forgets every symbol allocated after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.keys.truncate(len);
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropId, &PropositionKey)> + '_ {
        self.keys.enumerate()
    }

    /// Writes one `symbol<TAB>key` line per proposition, in allocation order.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        for (id, key) in self.iter() {
            writeln!(out, "{id}\t{key}")?;
        }
        Ok(())
    }
}
