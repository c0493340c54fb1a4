use ctl::{translate, AtomPolicy, Dialect, PropositionTable};

use crate::{parse_properties, ExtractError, PropertyEntry};

/// A translated property, in the order it appears in its document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatedProperty {
    pub id: String,
    pub formula: String,
}

/// Translates every well-formed entry of one document.
///
/// Entries lacking an id or a formula, and formulas that fail to translate,
/// are logged and left out; they consume no symbols of `table`. The dialect's
/// terminator is appended to every returned formula but the last.
pub fn extract_properties(
    entries: &[PropertyEntry],
    dialect: &Dialect,
    policy: AtomPolicy,
    table: &mut PropositionTable,
) -> Vec<TranslatedProperty> {
    let mut props = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        match extract_entry(index, entry, dialect, policy, table) {
            Ok(prop) => props.push(prop),
            Err(err) => log::warn!("Skipping property: {err}"),
        }
    }

    // The terminator separates statements, the last one goes without.
    if let Some((_, init)) = props.split_last_mut() {
        for prop in init {
            prop.formula.push_str(dialect.terminator);
        }
    }

    log::debug!(
        "Translated {} of {} properties to {}, {} propositions in table",
        props.len(),
        entries.len(),
        dialect.name,
        table.len()
    );

    props
}

/// Parses `source` and extracts its properties. Only a malformed document is
/// an error; problems with single entries are skipped as in [`extract_properties`].
pub fn extract_document(
    source: &str,
    dialect: &Dialect,
    policy: AtomPolicy,
    table: &mut PropositionTable,
) -> Result<Vec<TranslatedProperty>, ExtractError> {
    let entries = parse_properties(source)?;
    Ok(extract_properties(&entries, dialect, policy, table))
}

fn extract_entry(
    index: usize,
    entry: &PropertyEntry,
    dialect: &Dialect,
    policy: AtomPolicy,
    table: &mut PropositionTable,
) -> Result<TranslatedProperty, ExtractError> {
    let missing = |field| ExtractError::MissingField { index, field };
    let id = entry.id.as_ref().ok_or_else(|| missing("id"))?;
    let formula = entry.formula.as_ref().ok_or_else(|| missing("formula"))?;

    // Symbols allocated by a failed formula are given back.
    let mark = table.len();
    match translate(formula, dialect, policy, table) {
        Ok(formula) => Ok(TranslatedProperty {
            id: id.clone(),
            formula,
        }),
        Err(source) => {
            table.truncate(mark);
            Err(ExtractError::Translation {
                id: id.clone(),
                source,
            })
        }
    }
}
