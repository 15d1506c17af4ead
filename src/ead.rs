//! Navigation helpers for EAD 2002 finding aid documents.
//!
//! The tree is read through [`roxmltree`]; nothing here mutates the document.
//! Components are the `<c>`/`<c01>`..`<c99>` elements under `<dsc>`; a
//! terminal component is one with no component children and represents a
//! single archival unit to be expanded into folder rows.

use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node};

use crate::model::CollectionInfo;

/// Default namespace of EAD 2002 documents.
pub const EAD_NAMESPACE: &str = "urn:isbn:1-931666-22-9";

/// Matches both unnumbered and numbered component tags: `c`, `c01`..`c99`.
static COMPONENT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^c\d{0,2}$").unwrap());

/// True when `node` is an EAD element with the given local name. Elements in
/// the EAD default namespace and unqualified elements both match.
pub(crate) fn is_ead_element(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node
            .tag_name()
            .namespace()
            .is_none_or(|ns| ns == EAD_NAMESPACE)
}

/// True when `node` carries a component-type tag.
pub fn is_component(node: Node) -> bool {
    node.is_element()
        && COMPONENT_TAG.is_match(node.tag_name().name())
        && node
            .tag_name()
            .namespace()
            .is_none_or(|ns| ns == EAD_NAMESPACE)
}

/// True when `node` has no component-type children of its own.
pub fn is_terminal(node: Node) -> bool {
    !node.children().any(is_component)
}

/// Locates every terminal component under the document's `<dsc>` section, in
/// document order. A document without a `<dsc>` yields an empty sequence.
pub fn terminal_components<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    let Some(dsc) = find_descendant(doc.root_element(), "dsc") else {
        return Vec::new();
    };
    dsc.descendants()
        .filter(|node| is_component(*node) && is_terminal(*node))
        .collect()
}

/// First direct child of `node` with the given EAD local name.
pub(crate) fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_ead_element(*child, name))
}

/// First descendant of `node` (excluding `node` itself) with the given name.
pub(crate) fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .filter(|candidate| *candidate != node)
        .find(|candidate| is_ead_element(*candidate, name))
}

/// Concatenates every inline text fragment under `node`, trimmed and joined
/// with single spaces. Covers titles composed of mixed markup.
pub(crate) fn inline_text(node: Node) -> String {
    node.descendants()
        .filter(|descendant| descendant.is_text())
        .filter_map(|descendant| descendant.text())
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed element text, dropping empty results.
pub(crate) fn element_text(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Reads the collection-level metadata from the `<archdesc>` header. Missing
/// pieces fall back to "Unknown …" placeholders so the tables stay complete.
pub fn collection_info(doc: &Document) -> CollectionInfo {
    let archdesc_did = find_child(doc.root_element(), "archdesc")
        .and_then(|archdesc| find_child(archdesc, "did"));

    let repository = archdesc_did
        .and_then(|did| find_child(did, "repository"))
        .and_then(|repository| find_child(repository, "corpname"))
        .and_then(element_text)
        .unwrap_or_else(|| "Unknown Repository".to_string());

    let collection = archdesc_did
        .and_then(|did| find_child(did, "unittitle"))
        .and_then(element_text)
        .unwrap_or_else(|| "Unknown Collection".to_string());

    let call_number = archdesc_did
        .and_then(|did| find_child(did, "unitid"))
        .and_then(element_text)
        .unwrap_or_else(|| "Unknown Call Number".to_string());

    CollectionInfo {
        repository,
        collection,
        call_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_tag_matches_numbered_and_plain() {
        for (doc_text, expected) in [
            ("<c/>", true),
            ("<c01/>", true),
            ("<c12/>", true),
            ("<c123/>", false),
            ("<cat/>", false),
            ("<did/>", false),
        ] {
            let doc = Document::parse(doc_text).unwrap();
            assert_eq!(is_component(doc.root_element()), expected, "{doc_text}");
        }
    }

    #[test]
    fn inline_text_joins_nested_fragments() {
        let doc =
            Document::parse("<unittitle>Letters <emph>to</emph> friends</unittitle>").unwrap();
        assert_eq!(inline_text(doc.root_element()), "Letters to friends");
    }

    #[test]
    fn missing_dsc_yields_no_components() {
        let doc = Document::parse("<ead><archdesc/></ead>").unwrap();
        assert!(terminal_components(&doc).is_empty());
    }
}
