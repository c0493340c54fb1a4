use ctl::{AtomPolicy, Dialect, FormulaNode, PropositionTable, Tag};
use test_log::test;

use crate::{extract_document, parse_properties, ExtractError, PropertyEntry};

fn formulas(
    source: &str,
    dialect: &Dialect,
    policy: AtomPolicy,
    table: &mut PropositionTable,
) -> Vec<String> {
    let props = extract_document(source, dialect, policy, table).unwrap();
    props.into_iter().map(|p| p.formula).collect()
}

fn run_test(source: &str, expected: &str, dialect: &Dialect, policy: AtomPolicy) {
    let got = formulas(source, dialect, policy, &mut PropositionTable::new());
    let expected = expected.lines().collect::<Vec<_>>();
    assert_eq!(got, expected, "{} / {policy:?}", dialect.name);
}

macro_rules! declare_test {
    ($($name:ident),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let tests = concat!(env!("CARGO_MANIFEST_DIR"), "/tests");
                let name = stringify!($name);

                let read = |ext: &str| {
                    std::fs::read_to_string(format!("{tests}/{name}.{ext}")).unwrap()
                };
                let source = read("xml");

                run_test(&source, &read("txt"), &Dialect::SYMBOLIC, AtomPolicy::Opaque);
                run_test(&source, &read("ctl"), &Dialect::LOLA, AtomPolicy::Opaque);
                let structural = read("structural.txt");
                run_test(&source, &structural, &Dialect::SYMBOLIC, AtomPolicy::Structural);
            }
        )*
    };
}

declare_test! {
    philosophers,
    fireability,
}

const PREFIX: &str = r#"<?xml version="1.0"?><property-set xmlns="http://mcc.lip6.fr/">"#;
const SUFFIX: &str = "</property-set>";

fn document(properties: &[String]) -> String {
    format!("{PREFIX}{}{SUFFIX}", properties.concat())
}

fn property(id: Option<&str>, formula: &str) -> String {
    let id = id.map(|id| format!("<id>{id}</id>")).unwrap_or_default();
    format!("<property>{id}<formula>{formula}</formula></property>")
}

fn fireable(transition: &str) -> String {
    format!("<is-fireable><transition>{transition}</transition></is-fireable>")
}

#[test]
fn conjunction_of_fireability_atoms() {
    let formula = format!("<conjunction>{}{}</conjunction>", fireable("t1"), fireable("t2"));
    let source = document(&[property(Some("c"), &formula)]);

    let mut table = PropositionTable::new();
    let props =
        extract_document(&source, &Dialect::SYMBOLIC, AtomPolicy::Opaque, &mut table).unwrap();

    assert_eq!(props.len(), 1);
    assert_eq!(props[0].id, "c");
    assert_eq!(props[0].formula, "(p0 & p1)");
    assert_eq!(table.len(), 2);
}

#[test]
fn entry_without_id_is_skipped() {
    let source =
        document(&[property(Some("ok"), &fireable("t1")), property(None, &fireable("t2"))]);

    let mut table = PropositionTable::new();
    let props = extract_document(&source, &Dialect::LOLA, AtomPolicy::Opaque, &mut table).unwrap();

    assert_eq!(props.len(), 1);
    assert_eq!(props[0].id, "ok");
    assert_eq!(props[0].formula, "p0");
    assert_eq!(table.len(), 1);
}

#[test]
fn entry_without_formula_is_skipped() {
    let lonely = "<property><id>lonely</id></property>".to_string();
    let source = document(&[lonely, property(Some("ok"), &fireable("t1"))]);

    let entries = parse_properties(&source).unwrap();
    assert_eq!(
        entries[0],
        PropertyEntry {
            id: Some("lonely".to_string()),
            formula: None
        }
    );

    let mut table = PropositionTable::new();
    let got = formulas(&source, &Dialect::SYMBOLIC, AtomPolicy::Opaque, &mut table);
    assert_eq!(got, ["p0"]);
}

#[test]
fn malformed_document() {
    let source = format!("{PREFIX}<property><id>x</id>{SUFFIX}");
    let mut table = PropositionTable::new();
    let result = extract_document(&source, &Dialect::SYMBOLIC, AtomPolicy::Opaque, &mut table);
    assert!(matches!(result, Err(ExtractError::MalformedDocument(_))));
}

#[test]
fn terminator_follows_emitted_statements() {
    let source = document(&[
        property(Some("a"), &fireable("t1")),
        property(Some("b"), &fireable("t2")),
        property(Some("broken"), "<all-paths><finally><deadlock/></finally></all-paths>"),
    ]);

    let lola = formulas(&source, &Dialect::LOLA, AtomPolicy::Opaque, &mut PropositionTable::new());
    assert_eq!(lola, ["p0:", "p1"]);

    let mut table = PropositionTable::new();
    let symbolic = formulas(&source, &Dialect::SYMBOLIC, AtomPolicy::Opaque, &mut table);
    assert_eq!(symbolic, ["p0", "p1"]);
}

#[test]
fn failed_property_consumes_no_symbols() {
    let broken = format!("<conjunction>{}<deadlock/></conjunction>", fireable("t1"));
    let source =
        document(&[property(Some("broken"), &broken), property(Some("ok"), &fireable("t2"))]);

    let mut table = PropositionTable::new();
    let got = formulas(&source, &Dialect::SYMBOLIC, AtomPolicy::Opaque, &mut table);

    assert_eq!(got, ["p0"]);
    assert_eq!(table.len(), 1);
}

#[test]
fn shared_table_spans_documents() {
    let tests = concat!(env!("CARGO_MANIFEST_DIR"), "/tests");
    let philosophers = std::fs::read_to_string(format!("{tests}/philosophers.xml")).unwrap();
    let fireability = std::fs::read_to_string(format!("{tests}/fireability.xml")).unwrap();

    let mut table = PropositionTable::new();
    formulas(&philosophers, &Dialect::SYMBOLIC, AtomPolicy::Opaque, &mut table);
    assert_eq!(table.len(), 6);

    let got = formulas(&fireability, &Dialect::SYMBOLIC, AtomPolicy::Opaque, &mut table);
    assert_eq!(got, ["E(p6 U !(p7))", "AG ((p7 | (p6)))", "A(false W (true))"]);

    // The same document again only reuses symbols.
    let again = formulas(&philosophers, &Dialect::LOLA, AtomPolicy::Opaque, &mut table);
    assert_eq!(again[0], "AG (p0):");
    assert_eq!(table.len(), 8);
}

#[test]
fn parsed_entries() {
    let source = format!(
        r#"<?xml version="1.0"?>
        <property-set xmlns="http://mcc.lip6.fr/" xmlns:x="urn:other">
          <x:property><id>foreign</id><formula><true/></formula></x:property>
          <group>
            <property>
              <id>
                nested
              </id>
              <formula><x:note>ignored</x:note><negation>{}</negation></formula>
            </property>
          </group>
        </property-set>"#,
        fireable("t1")
    );

    let entries = parse_properties(&source).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id.as_deref(), Some("nested"));

    let formula = entries[0].formula.as_ref().unwrap();
    assert_eq!(formula.tag, Tag::Other("formula".to_string()));
    let note = FormulaNode::leaf(Tag::Other("{urn:other}note".to_string()), "ignored");
    assert_eq!(formula.children[0], note);
    assert_eq!(
        formula.children[1],
        FormulaNode::new(
            "negation",
            vec![FormulaNode::new("is-fireable", vec![FormulaNode::leaf("transition", "t1")])]
        )
    );
}
