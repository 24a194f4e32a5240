//! Unified element view over strict-XML and permissive-HTML parses.
//!
//! `.xbrl` instance documents are well-formed XML and go through
//! `roxmltree`; inline-XBRL `.htm` files (and malformed instances) go
//! through `scraper`'s HTML parser. Both flavors are flattened into the
//! same owned [`Elem`] list so the extractors never branch on markup
//! flavor again.

use scraper::{Html, Selector};

use crate::xbrl::tag::local_part;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseMode {
    /// Well-formed XML via `roxmltree`; fails on malformed input.
    Strict,
    /// Error-tolerant HTML via `scraper`; never fails.
    Permissive,
}

/// Recognized inline-XBRL fact element families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FactKind {
    /// `ix:nonFraction` and friends: numeric facts with scale/sign.
    Numeric,
    /// `ix:nonNumeric`: tagged text blocks.
    NonNumeric,
    /// `ix:continuation`: overflow blocks for split text facts.
    Continuation,
    Other,
}

/// One element, flattened out of either parser.
#[derive(Debug, Clone)]
pub(crate) struct Elem {
    /// Lower-cased local tag name (namespace prefix stripped).
    pub local: String,
    /// Raw inline-XBRL `name` attribute, if any.
    pub name_attr: Option<String>,
    /// Raw `contextRef` attribute, if any.
    pub context_ref: Option<String>,
    /// Raw inline-XBRL `scale` attribute, if any.
    pub scale: Option<String>,
    /// Raw inline-XBRL `sign` attribute, if any.
    pub sign: Option<String>,
    /// Concatenated descendant text.
    pub text: String,
    /// Inner markup. In strict mode this is the raw source slice when the
    /// element has child elements, else its (entity-unescaped) text,
    /// which for XBRL text blocks *is* the embedded HTML.
    pub inner: String,
}

impl Elem {
    pub(crate) fn kind(&self) -> FactKind {
        if self.local.contains("nonfraction") {
            FactKind::Numeric
        } else if self.local.contains("nonnumeric") {
            FactKind::NonNumeric
        } else if self.local.contains("continuation") {
            FactKind::Continuation
        } else {
            FactKind::Other
        }
    }
}

/// Flatten a document's elements. `None` when strict parsing fails.
pub(crate) fn parse_elements(text: &str, mode: ParseMode) -> Option<Vec<Elem>> {
    match mode {
        ParseMode::Strict => parse_strict(text),
        ParseMode::Permissive => Some(parse_permissive(text)),
    }
}

/// Modes to try for a document, preferred flavor first.
///
/// A document starting with an XML prolog is usually a strict instance,
/// but inline-XBRL-in-XHTML also carries a prolog; callers retry with the
/// opposite mode when the first yields nothing.
pub(crate) fn mode_order(text: &str) -> [ParseMode; 2] {
    if text.trim_start().starts_with("<?xml") {
        [ParseMode::Strict, ParseMode::Permissive]
    } else {
        [ParseMode::Permissive, ParseMode::Strict]
    }
}

/// `(context id, instant date)` pairs for every `context` element.
pub(crate) fn contexts(text: &str, mode: ParseMode) -> Vec<(String, Option<String>)> {
    match mode {
        ParseMode::Strict => {
            let Ok(doc) = roxmltree::Document::parse(text) else {
                return Vec::new();
            };
            doc.descendants()
                .filter(|n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case("context"))
                .filter_map(|n| {
                    let id = n.attribute("id")?.to_string();
                    let instant = n
                        .descendants()
                        .find(|c| {
                            c.is_element() && c.tag_name().name().eq_ignore_ascii_case("instant")
                        })
                        .and_then(|c| c.text())
                        .map(|s| s.trim().to_string());
                    Some((id, instant))
                })
                .collect()
        }
        ParseMode::Permissive => {
            let doc = Html::parse_document(text);
            let any = any_selector();
            doc.select(&any)
                .filter(|el| local_part(el.value().name()).eq_ignore_ascii_case("context"))
                .filter_map(|el| {
                    let id = attr_ci(el, "id")?.to_string();
                    let instant = el
                        .select(&any)
                        .find(|c| local_part(c.value().name()).eq_ignore_ascii_case("instant"))
                        .map(|c| c.text().collect::<String>().trim().to_string());
                    Some((id, instant))
                })
                .collect()
        }
    }
}

fn parse_strict(text: &str) -> Option<Vec<Elem>> {
    let doc = roxmltree::Document::parse(text).ok()?;
    let mut elems = Vec::new();
    for node in doc.descendants().filter(roxmltree::Node::is_element) {
        let local = node.tag_name().name().to_lowercase();
        let content: String = node
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        let inner = if node.children().any(|c| c.is_element()) {
            text[node.range()].to_string()
        } else {
            content.clone()
        };
        elems.push(Elem {
            local,
            name_attr: xml_attr(node, "name"),
            context_ref: xml_attr(node, "contextRef"),
            scale: xml_attr(node, "scale"),
            sign: xml_attr(node, "sign"),
            text: content,
            inner,
        });
    }
    Some(elems)
}

fn parse_permissive(text: &str) -> Vec<Elem> {
    let doc = Html::parse_document(text);
    let any = any_selector();
    doc.select(&any)
        .map(|el| Elem {
            local: local_part(el.value().name()).to_lowercase(),
            name_attr: attr_ci(el, "name").map(str::to_string),
            context_ref: attr_ci(el, "contextRef").map(str::to_string),
            scale: attr_ci(el, "scale").map(str::to_string),
            sign: attr_ci(el, "sign").map(str::to_string),
            text: el.text().collect(),
            inner: el.inner_html(),
        })
        .collect()
}

fn any_selector() -> Selector {
    Selector::parse("*").expect("universal selector")
}

fn xml_attr(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    node.attributes()
        .find(|a| a.name().eq_ignore_ascii_case(name))
        .map(|a| a.value().to_string())
}

/// The HTML parser lower-cases attribute names; strict XML preserves
/// them. Look up case-insensitively so both flavors hit.
fn attr_ci<'a>(el: scraper::ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value()
        .attrs()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}
