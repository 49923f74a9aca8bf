//! HTML lookup helpers shared by the report extractors.
//!
//! Report templates have drifted between versions, so every lookup that has
//! to tolerate that drift goes through one of the matcher functions here
//! (exact id, id pattern, class, keyword in text) instead of ad hoc checks at
//! the call site.

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use crate::error::ExtractError;
use crate::model::FieldMap;

const STRUCTURAL_TAGS: [&str; 3] = ["html", "head", "body"];

/// Parses `raw` and rejects input that carries no markup at all.
pub fn parse_document(raw: &str) -> Result<NodeRef, ExtractError> {
    if raw.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    if !raw.contains('<') {
        return Err(ExtractError::NoMarkup);
    }

    let document = kuchiki::parse_html().one(raw);
    let has_content_element = elements(&document).any(|node| {
        tag_name(&node)
            .map(|name| !STRUCTURAL_TAGS.contains(&name.as_str()))
            .unwrap_or(false)
    });
    if !has_content_element {
        return Err(ExtractError::NoMarkup);
    }

    Ok(document)
}

pub fn decode_utf8(raw: &[u8]) -> Result<String, ExtractError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|err| ExtractError::InvalidUtf8(err.to_string()))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IdPattern<'a> {
    Exact(&'a str),
    Prefix(&'a str),
    Suffix(&'a str),
}

impl IdPattern<'_> {
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::Exact(expected) => id == *expected,
            Self::Prefix(prefix) => id.starts_with(prefix),
            Self::Suffix(suffix) => id.ends_with(suffix),
        }
    }
}

pub fn matches_any_id(id: &str, patterns: &[IdPattern<'_>]) -> bool {
    patterns.iter().any(|pattern| pattern.matches(id))
}

/// Case-insensitive search for any of `keywords` inside `text`.
pub fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

pub fn elements(root: &NodeRef) -> impl Iterator<Item = NodeRef> {
    root.descendants().filter(|node| node.as_element().is_some())
}

pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .map(|element| element.name.local.to_string().to_ascii_lowercase())
}

pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    tag_name(node)
        .map(|name| name.eq_ignore_ascii_case(tag))
        .unwrap_or(false)
}

pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    attributes.get(name).map(str::to_string)
}

pub fn classes(node: &NodeRef) -> Vec<String> {
    attr(node, "class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn has_class(node: &NodeRef, class: &str) -> bool {
    classes(node).iter().any(|value| value == class)
}

pub fn has_any_class(node: &NodeRef, wanted: &[&str]) -> bool {
    classes(node)
        .iter()
        .any(|value| wanted.contains(&value.as_str()))
}

/// First element (document order) whose `id` equals `id`.
pub fn find_by_id(root: &NodeRef, id: &str) -> Option<NodeRef> {
    find_all_by_id_pattern(root, None, &[IdPattern::Exact(id)])
        .into_iter()
        .next()
}

pub fn find_all_by_id_pattern(
    root: &NodeRef,
    tag: Option<&str>,
    patterns: &[IdPattern<'_>],
) -> Vec<NodeRef> {
    elements(root)
        .filter(|node| tag.map(|tag| is_tag(node, tag)).unwrap_or(true))
        .filter(|node| {
            attr(node, "id")
                .map(|id| matches_any_id(&id, patterns))
                .unwrap_or(false)
        })
        .collect()
}

pub fn find_all(root: &NodeRef, tag: &str, class: Option<&str>) -> Vec<NodeRef> {
    elements(root)
        .filter(|node| is_tag(node, tag))
        .filter(|node| class.map(|class| has_class(node, class)).unwrap_or(true))
        .collect()
}

pub fn find_first(root: &NodeRef, tag: &str, class: Option<&str>) -> Option<NodeRef> {
    elements(root)
        .filter(|node| is_tag(node, tag))
        .find(|node| class.map(|class| has_class(node, class)).unwrap_or(true))
}

/// Element siblings after `node`, in document order.
pub fn following_element_siblings(node: &NodeRef) -> Vec<NodeRef> {
    let mut siblings = Vec::new();
    let mut current = node.next_sibling();
    while let Some(sibling) = current {
        if sibling.as_element().is_some() {
            siblings.push(sibling.clone());
        }
        current = sibling.next_sibling();
    }
    siblings
}

/// Visible text of `node` with whitespace runs collapsed and trimmed.
pub fn text(node: &NodeRef) -> String {
    normalize_ws(&node.text_contents())
}

/// Each text fragment trimmed, empty ones dropped, joined with `separator`.
pub fn text_joined(node: &NodeRef, separator: &str) -> String {
    node.descendants()
        .filter_map(|child| child.as_text().map(|text| text.borrow().clone()))
        .map(|fragment| normalize_ws(&fragment))
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Raw text of a node's own text children, as written in the source.
pub fn raw_text(node: &NodeRef) -> String {
    node.children()
        .filter_map(|child| child.as_text().map(|text| text.borrow().clone()))
        .collect()
}

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn strip_chars(s: &str, unwanted: &[char]) -> String {
    s.chars()
        .filter(|ch| !unwanted.contains(ch))
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn clean_label(s: &str) -> String {
    s.trim().trim_end_matches(':').trim().to_string()
}

pub fn table_rows(table: &NodeRef, skip_header: bool) -> Vec<NodeRef> {
    let rows = find_all(table, "tr", None);
    let skip = usize::from(skip_header && !rows.is_empty());
    rows.into_iter().skip(skip).collect()
}

pub fn cells(row: &NodeRef) -> Vec<NodeRef> {
    find_all(row, "td", None)
}

pub fn cell_texts(row: &NodeRef) -> Vec<String> {
    cells(row).iter().map(text).collect()
}

#[derive(Copy, Clone, Debug)]
pub struct KeyValueLayout {
    pub skip_header: bool,
    pub exact_pairs: bool,
    pub strip_colon: bool,
}

impl KeyValueLayout {
    /// Label/value table without a header row, rows of exactly two cells.
    pub const PAIRS: Self = Self {
        skip_header: false,
        exact_pairs: true,
        strip_colon: true,
    };

    /// Metric table with a header row, first two cells of each row.
    pub const METRICS: Self = Self {
        skip_header: true,
        exact_pairs: false,
        strip_colon: false,
    };
}

pub fn key_value_table(table: &NodeRef, layout: KeyValueLayout) -> FieldMap {
    let mut map = FieldMap::new();
    for row in table_rows(table, layout.skip_header) {
        let values = cell_texts(&row);
        let usable = if layout.exact_pairs {
            values.len() == 2
        } else {
            values.len() >= 2
        };
        if !usable {
            continue;
        }

        let key = if layout.strip_colon {
            clean_label(&values[0].replace(':', ""))
        } else {
            values[0].clone()
        };
        map.insert(key, values[1].clone());
    }
    map
}

/// Reads the first table under the element with `section_id`.
pub fn section_table(root: &NodeRef, section_id: &str, layout: KeyValueLayout) -> FieldMap {
    find_by_id(root, section_id)
        .and_then(|section| find_first(&section, "table", None))
        .map(|table| key_value_table(&table, layout))
        .unwrap_or_default()
}

/// Parses a decimal written with either `.` or `,` as the separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_patterns_match_exact_prefix_and_suffix() {
        assert!(IdPattern::Exact("wstd-section").matches("wstd-section"));
        assert!(!IdPattern::Exact("wstd-section").matches("wstd-section-2"));
        assert!(IdPattern::Prefix("plotly-").matches("plotly-a1b2"));
        assert!(IdPattern::Suffix("-plot").matches("spectra-plot"));
        assert!(!IdPattern::Suffix("-plot").matches("plot-spectra"));
    }

    #[test]
    fn contains_keyword_ignores_case_including_accents() {
        assert!(contains_keyword("Ajuste completado CORRECTAMENTE", &["correctamente"]));
        assert!(contains_keyword("✅ VALIDACIÓN EXITOSA", &["validación"]));
        assert!(!contains_keyword("Ajuste incompleto", &["exitosa", "correctly"]));
    }

    #[test]
    fn parse_document_rejects_text_without_markup() {
        assert_eq!(parse_document("   ").err(), Some(ExtractError::Empty));
        assert_eq!(
            parse_document("just some words").err(),
            Some(ExtractError::NoMarkup)
        );
        assert!(parse_document("<div id='x'>ok</div>").is_ok());
    }

    #[test]
    fn decode_utf8_reports_invalid_bytes() {
        let err = decode_utf8(&[0x3c, 0xff, 0xfe]).expect_err("invalid bytes");
        assert!(matches!(err, ExtractError::InvalidUtf8(_)));
    }

    #[test]
    fn key_value_table_strips_colons_and_skips_non_pairs() {
        let doc = parse_document(
            "<table><tr><td>ID del Sensor:</td><td> 91-123 </td></tr>\
             <tr><td>solo</td></tr>\
             <tr><td>Cliente</td><td>ACME</td></tr></table>",
        )
        .expect("parse");
        let table = find_first(&doc, "table", None).expect("table");
        let map = key_value_table(&table, KeyValueLayout::PAIRS);
        assert_eq!(map.get("ID del Sensor"), Some("91-123"));
        assert_eq!(map.get("Cliente"), Some("ACME"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn metric_tables_skip_header_row() {
        let doc = parse_document(
            "<table><tr><th>Métrica</th><th>Valor</th></tr>\
             <tr><td>RMS</td><td>0.003</td><td>extra</td></tr></table>",
        )
        .expect("parse");
        let table = find_first(&doc, "table", None).expect("table");
        let map = key_value_table(&table, KeyValueLayout::METRICS);
        assert_eq!(map.get("RMS"), Some("0.003"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn text_joined_uses_separator_between_fragments() {
        let doc = parse_document("<table><tr><th>Humedad<br><small>(%)</small></th></tr></table>")
            .expect("parse");
        let th = find_first(&doc, "th", None).expect("th");
        assert_eq!(text_joined(&th, "|"), "Humedad|(%)");
    }

    #[test]
    fn parse_decimal_accepts_comma_separator() {
        assert_eq!(parse_decimal("0,012"), Some(0.012));
        assert_eq!(parse_decimal(" 0.02 "), Some(0.02));
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal(""), None);
    }
}
