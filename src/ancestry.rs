//! Ancestor/series resolution for terminal components.
//!
//! Each terminal component carries up to five lineage labels. First-generation
//! components (direct children of `<dsc>`) that declare a `<unitid>` are
//! presented as archival series, with small integer identifiers rendered as
//! Roman numerals in keeping with traditional series presentation.

use roxmltree::Node;

use crate::ead;
use crate::model::ANCESTOR_SLOTS;

/// Title sentinel used for ancestor labels only; folder rows use the longer
/// "Title unavailable" form.
const ANCESTOR_TITLE_SENTINEL: &str = "X";

/// Fixed table covering series 1 through 40. Identifiers beyond the table are
/// assumed not to be series numbers; a general Roman-numeral algorithm is
/// deliberately out of scope.
const ROMAN_NUMERALS: [&str; 40] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
    "XVI", "XVII", "XVIII", "XIX", "XX", "XXI", "XXII", "XXIII", "XXIV", "XXV", "XXVI", "XXVII",
    "XXVIII", "XXIX", "XXX", "XXXI", "XXXII", "XXXIII", "XXXIV", "XXXV", "XXXVI", "XXXVII",
    "XXXVIII", "XXXIX", "XL",
];

fn roman_numeral(value: i64) -> Option<&'static str> {
    if (1..=40).contains(&value) {
        Some(ROMAN_NUMERALS[(value - 1) as usize])
    } else {
        None
    }
}

/// Builds the lineage labels for a terminal component: nearest ancestor
/// first, at most [`ANCESTOR_SLOTS`] entries, the `<dsc>` container itself
/// excluded. Ancestors without a `<did>` contribute nothing.
pub fn resolve_ancestors(terminal: Node) -> Vec<String> {
    let mut labels = Vec::new();

    for ancestor in terminal.ancestors().skip(1) {
        if !ead::is_component(ancestor) {
            continue;
        }
        let Some(did) = ead::find_child(ancestor, "did") else {
            continue;
        };

        let title = match ead::find_descendant(did, "unittitle") {
            Some(unittitle) => {
                let text = ead::inline_text(unittitle);
                if text.is_empty() {
                    ANCESTOR_TITLE_SENTINEL.to_string()
                } else {
                    text
                }
            }
            None => ANCESTOR_TITLE_SENTINEL.to_string(),
        };

        // All first-generation components sit directly under <dsc>; only
        // those may declare a series identifier.
        let first_generation = ancestor
            .parent()
            .is_some_and(|parent| ead::is_ead_element(parent, "dsc"));
        let unitid = ead::find_child(did, "unitid").and_then(ead::element_text);

        let label = match (first_generation, unitid) {
            (true, Some(identifier)) => format_series(&identifier, &title),
            _ => title,
        };
        labels.push(label);

        if labels.len() >= ANCESTOR_SLOTS {
            break;
        }
    }

    labels
}

/// Applies the series formatting rule to a first-generation identifier:
/// integers up to 40 become Roman numerals, larger integers suppress the
/// series prefix entirely, and non-integer identifiers are kept verbatim.
fn format_series(identifier: &str, title: &str) -> String {
    match identifier.trim().parse::<i64>() {
        Ok(value) if value <= 40 => {
            let numeral = roman_numeral(value)
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            format!("Series {numeral}. {title}")
        }
        Ok(_) => title.to_string(),
        Err(_) => format!("Series {identifier}. {title}"),
    }
}

/// Pads lineage labels to the fixed column count of the folder table.
pub fn pad_ancestors(labels: Vec<String>) -> [Option<String>; ANCESTOR_SLOTS] {
    let mut padded: [Option<String>; ANCESTOR_SLOTS] = Default::default();
    for (slot, label) in padded.iter_mut().zip(labels) {
        *slot = Some(label);
    }
    padded
}
