use thiserror::Error;

use crate::{
    AtomKind, Dialect, FormulaNode, NodeKind, PropositionTable, Quantifier, Tag, TemporalOp,
};

/// How atomic predicates are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AtomPolicy {
    /// Each atomic subtree becomes one interned symbol `p{k}`.
    #[default]
    Opaque,
    /// Atomic subtrees are written out in terms of places and transitions.
    Structural,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("unknown or unhandled tag <{tag}>")]
    UnknownTag { tag: String },
    #[error("<{tag}> expects {expected} children, found {found}")]
    Arity {
        tag: String,
        expected: usize,
        found: usize,
    },
    #[error("<{tag}> has no children")]
    Empty { tag: String },
    #[error("<{quantifier}> must wrap a temporal operator, found <{tag}>")]
    UnexpectedOperator { quantifier: String, tag: String },
    #[error("<{tag}> has no text")]
    MissingText { tag: String },
}

type Result<T, E = TranslationError> = std::result::Result<T, E>;

/// Renders the formula rooted at `formula` in `dialect`.
///
/// Under [`AtomPolicy::Opaque`] atomic subtrees are interned into `table`, in
/// pre-order left-to-right order. Atoms interned before an error stay in the
/// table; callers that want to discard them can [`PropositionTable::truncate`].
pub fn translate(
    formula: &FormulaNode,
    dialect: &Dialect,
    policy: AtomPolicy,
    table: &mut PropositionTable,
) -> Result<String> {
    let mut ctx = TransContext {
        dialect,
        policy,
        table,
    };
    ctx.trans(formula)
}

struct TransContext<'a> {
    dialect: &'a Dialect,
    policy: AtomPolicy,
    table: &'a mut PropositionTable,
}

impl TransContext<'_> {
    fn trans(&mut self, node: &FormulaNode) -> Result<String> {
        let d = self.dialect;
        match node.kind() {
            NodeKind::Const(value) => Ok(d.literal(value).to_string()),
            NodeKind::And(children) => self.trans_junction(node, children, d.and),
            NodeKind::Or(children) => self.trans_junction(node, children, d.or),
            NodeKind::Not(children) => {
                let [child] = exactly(&node.tag, children)?;
                Ok(format!("{}({})", d.not, self.trans(child)?))
            }
            NodeKind::Path(quantifier, children) => {
                let [op] = exactly(&node.tag, children)?;
                self.trans_path(&node.tag, quantifier, op)
            }
            // Only a quantifier gives a temporal operator its meaning, anywhere
            // else it is passed through like any other wrapper.
            NodeKind::Temporal(_, children) => match children.first() {
                Some(first) => self.trans(first),
                None => Err(TranslationError::UnknownTag {
                    tag: node.tag.to_string(),
                }),
            },
            // Under the opaque policy the whole predicate is one symbol, its
            // children are never visited.
            NodeKind::Atom(kind) => match self.policy {
                AtomPolicy::Opaque => Ok(self.table.intern(node).to_string()),
                AtomPolicy::Structural => self.trans_atom(node, kind),
            },
            // <formula>, <before>, <reach> and foreign elements stand for their first child
            NodeKind::Wrapper(child) => self.trans(child),
            NodeKind::Leaf => Err(TranslationError::UnknownTag {
                tag: node.tag.to_string(),
            }),
        }
    }

    fn trans_junction(
        &mut self,
        node: &FormulaNode,
        children: &[FormulaNode],
        op: &str,
    ) -> Result<String> {
        if children.is_empty() {
            return Err(TranslationError::Empty {
                tag: node.tag.to_string(),
            });
        }
        let parts = children.iter().map(|c| self.trans(c)).collect::<Result<Vec<_>>>()?;
        let sep = format!(" {op} ");
        Ok(format!("({})", parts.join(sep.as_str())))
    }

    fn trans_path(
        &mut self,
        tag: &Tag,
        quantifier: Quantifier,
        op: &FormulaNode,
    ) -> Result<String> {
        let d = self.dialect;
        let q = d.quantifier(quantifier);

        // A quantifier must sit directly on top of G, F, X or U.
        let NodeKind::Temporal(temporal, children) = op.kind() else {
            return Err(TranslationError::UnexpectedOperator {
                quantifier: tag.to_string(),
                tag: op.tag.to_string(),
            });
        };

        match temporal {
            TemporalOp::Globally | TemporalOp::Finally => {
                let [child] = exactly(&op.tag, children)?;
                let g_or_f = if temporal == TemporalOp::Globally {
                    d.globally
                } else {
                    d.finally
                };
                Ok(format!("{q}{g_or_f} ({})", self.trans(child)?))
            }
            TemporalOp::Next => {
                let [child] = exactly(&op.tag, children)?;
                let inner = self.trans(child)?;
                match d.next {
                    Some(x) => Ok(format!("{q}{x} ({inner})")),
                    // X p == false W p
                    None => Ok(format!("{q}({} {} ({inner}))", d.ff, d.weak_until)),
                }
            }
            TemporalOp::Until => {
                let [before, reach] = exactly(&op.tag, children)?;
                let before = self.trans(operand(before)?)?;
                let reach = self.trans(operand(reach)?)?;
                Ok(format!("{q}({before} {} {reach})", d.until))
            }
        }
    }

    fn trans_atom(&mut self, node: &FormulaNode, kind: AtomKind) -> Result<String> {
        let children = &node.children[..];
        match kind {
            AtomKind::IntegerLe | AtomKind::IntegerEq => {
                let [lhs, rhs] = exactly(&node.tag, children)?;
                let rel = if kind == AtomKind::IntegerLe {
                    "<="
                } else {
                    "="
                };
                Ok(format!("({} {rel} {})", self.trans(lhs)?, self.trans(rhs)?))
            }
            // Several places count their sum, several transitions mean any of them.
            AtomKind::TokensCount => self.trans_list(node, "+"),
            AtomKind::IsFireable => {
                let or = self.dialect.or;
                self.trans_list(node, or)
            }
            AtomKind::Place | AtomKind::Transition | AtomKind::IntegerConstant => node
                .text
                .clone()
                .ok_or_else(|| TranslationError::MissingText {
                    tag: node.tag.to_string(),
                }),
        }
    }

    // One child renders bare, several are joined like a junction.
    fn trans_list(&mut self, node: &FormulaNode, op: &str) -> Result<String> {
        match &node.children[..] {
            [child] => self.trans(child),
            children => self.trans_junction(node, children, op),
        }
    }
}

fn exactly<'n, const N: usize>(
    tag: &Tag,
    children: &'n [FormulaNode],
) -> Result<&'n [FormulaNode; N]> {
    children.try_into().map_err(|_| TranslationError::Arity {
        tag: tag.to_string(),
        expected: N,
        found: children.len(),
    })
}

// <before>/<reach> wrap the actual sub-formula.
fn operand(wrapper: &FormulaNode) -> Result<&FormulaNode> {
    wrapper.first_child().ok_or_else(|| TranslationError::Empty {
        tag: wrapper.tag.to_string(),
    })
}
