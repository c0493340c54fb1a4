use std::fmt;

/// Namespace of the Model Checking Contest property schema.
pub const MCC_NAMESPACE: &str = "http://mcc.lip6.fr/";

/// Element kinds of the MCC formula vocabulary.
///
/// Elements outside the MCC namespace, or with a local name the translator
/// attaches no meaning to (`formula`, `property`, `description`, ...), are kept
/// as [`Tag::Other`] with their name.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Tag {
    Conjunction,
    Disjunction,
    Negation,
    AllPaths,
    ExistsPath,
    Globally,
    Finally,
    Next,
    Until,
    Before,
    Reach,
    IntegerLe,
    IntegerEq,
    IsFireable,
    TokensCount,
    Place,
    Transition,
    IntegerConstant,
    True,
    False,
    Other(String),
}

const MCC_TAGS: &[(&str, Tag)] = &[
    ("conjunction", Tag::Conjunction),
    ("disjunction", Tag::Disjunction),
    ("negation", Tag::Negation),
    ("all-paths", Tag::AllPaths),
    ("exists-path", Tag::ExistsPath),
    ("globally", Tag::Globally),
    ("finally", Tag::Finally),
    ("next", Tag::Next),
    ("until", Tag::Until),
    ("before", Tag::Before),
    ("reach", Tag::Reach),
    ("integer-le", Tag::IntegerLe),
    ("integer-eq", Tag::IntegerEq),
    ("is-fireable", Tag::IsFireable),
    ("tokens-count", Tag::TokensCount),
    ("place", Tag::Place),
    ("transition", Tag::Transition),
    ("integer-constant", Tag::IntegerConstant),
    ("true", Tag::True),
    ("false", Tag::False),
];

impl Tag {
    /// Resolves a namespace-qualified element name.
    pub fn from_qualified(namespace: Option<&str>, local: &str) -> Tag {
        match namespace {
            Some(MCC_NAMESPACE) => MCC_TAGS
                .iter()
                .find(|(name, _)| *name == local)
                .map(|(_, tag)| tag.clone())
                .unwrap_or_else(|| Tag::Other(local.to_string())),
            Some(ns) => Tag::Other(format!("{{{ns}}}{local}")),
            None => Tag::Other(local.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Other(name) => name,
            tag => MCC_TAGS
                .iter()
                .find(|(_, t)| t == tag)
                .map(|(name, _)| *name)
                .unwrap_or_default(),
        }
    }
}

impl From<&str> for Tag {
    /// Shorthand for a local name in the MCC namespace.
    fn from(local: &str) -> Self {
        Tag::from_qualified(Some(MCC_NAMESPACE), local)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    AllPaths,
    ExistsPath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalOp {
    Globally,
    Finally,
    Next,
    Until,
}

/// Model-specific predicates: the boundary between formula structure and
/// what gets interned under the opaque policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomKind {
    IntegerLe,
    IntegerEq,
    IsFireable,
    TokensCount,
    Place,
    Transition,
    IntegerConstant,
}

/// Classification of a node by its tag, borrowing the children it needs.
#[derive(Clone, Copy, Debug)]
pub enum NodeKind<'a> {
    Const(bool),
    And(&'a [FormulaNode]),
    Or(&'a [FormulaNode]),
    Not(&'a [FormulaNode]),
    Path(Quantifier, &'a [FormulaNode]),
    Temporal(TemporalOp, &'a [FormulaNode]),
    Atom(AtomKind),
    /// A node without meaning of its own; stands for its first child.
    Wrapper(&'a FormulaNode),
    /// A childless node with an unknown tag.
    Leaf,
}

/// A node of a parsed formula tree. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaNode {
    pub tag: Tag,
    pub children: Vec<FormulaNode>,
    pub text: Option<String>,
}

impl FormulaNode {
    pub fn new(tag: impl Into<Tag>, children: Vec<FormulaNode>) -> Self {
        Self {
            tag: tag.into(),
            children,
            text: None,
        }
    }

    pub fn leaf(tag: impl Into<Tag>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    pub fn first_child(&self) -> Option<&FormulaNode> {
        self.children.first()
    }

    pub fn kind(&self) -> NodeKind<'_> {
        let children = &self.children[..];
        match &self.tag {
            Tag::True => NodeKind::Const(true),
            Tag::False => NodeKind::Const(false),
            Tag::Conjunction => NodeKind::And(children),
            Tag::Disjunction => NodeKind::Or(children),
            Tag::Negation => NodeKind::Not(children),
            Tag::AllPaths => NodeKind::Path(Quantifier::AllPaths, children),
            Tag::ExistsPath => NodeKind::Path(Quantifier::ExistsPath, children),
            Tag::Globally => NodeKind::Temporal(TemporalOp::Globally, children),
            Tag::Finally => NodeKind::Temporal(TemporalOp::Finally, children),
            Tag::Next => NodeKind::Temporal(TemporalOp::Next, children),
            Tag::Until => NodeKind::Temporal(TemporalOp::Until, children),
            Tag::IntegerLe => NodeKind::Atom(AtomKind::IntegerLe),
            Tag::IntegerEq => NodeKind::Atom(AtomKind::IntegerEq),
            Tag::IsFireable => NodeKind::Atom(AtomKind::IsFireable),
            Tag::TokensCount => NodeKind::Atom(AtomKind::TokensCount),
            Tag::Place => NodeKind::Atom(AtomKind::Place),
            Tag::Transition => NodeKind::Atom(AtomKind::Transition),
            Tag::IntegerConstant => NodeKind::Atom(AtomKind::IntegerConstant),
            // <before>/<reach> only mean something below <until>, which reads them directly.
            Tag::Before | Tag::Reach | Tag::Other(_) => match children.first() {
                Some(first) => NodeKind::Wrapper(first),
                None => NodeKind::Leaf,
            },
        }
    }
}
