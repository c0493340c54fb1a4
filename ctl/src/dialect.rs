use crate::node::Quantifier;

/// Token spellings of one concrete CTL grammar.
///
/// Downstream tools parse the produced text with their own grammar, so every
/// field is reproduced exactly, spacing included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    pub and: &'static str,
    pub or: &'static str,
    pub not: &'static str,
    pub all_paths: &'static str,
    pub exists_path: &'static str,
    pub globally: &'static str,
    pub finally: &'static str,
    /// `None` when the grammar has no next operator: `X p` is then written
    /// as the weak until `false W p`.
    pub next: Option<&'static str>,
    pub until: &'static str,
    pub weak_until: &'static str,
    pub tt: &'static str,
    pub ff: &'static str,
    /// Separator appended to every statement of a document but the last.
    pub terminator: &'static str,
    /// Extension of the files holding formulas in this dialect.
    pub extension: &'static str,
}

impl Dialect {
    pub const SYMBOLIC: Dialect = Dialect {
        name: "symbolic",
        and: "&",
        or: "|",
        not: "!",
        all_paths: "A",
        exists_path: "E",
        globally: "G",
        finally: "F",
        next: None,
        until: "U",
        weak_until: "W",
        tt: "true",
        ff: "false",
        terminator: "",
        extension: "txt",
    };

    /// The LoLA keyword grammar.
    pub const LOLA: Dialect = Dialect {
        name: "lola",
        and: "AND",
        or: "OR",
        not: "NOT",
        all_paths: "A",
        exists_path: "E",
        globally: "G",
        finally: "F",
        next: Some("X"),
        until: "U",
        weak_until: "W",
        tt: "TRUE",
        ff: "FALSE",
        terminator: ":",
        extension: "ctl",
    };

    pub fn quantifier(&self, quantifier: Quantifier) -> &'static str {
        match quantifier {
            Quantifier::AllPaths => self.all_paths,
            Quantifier::ExistsPath => self.exists_path,
        }
    }

    pub fn literal(&self, value: bool) -> &'static str {
        if value {
            self.tt
        } else {
            self.ff
        }
    }
}
