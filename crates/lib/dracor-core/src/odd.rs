//! Extraction of sections and element documentation from the DraCor ODD.
//!
//! The ODD ("One Document Does it all") describes the encoding guidelines
//! and the permitted TEI markup. Tools fetch it as raw XML and pull out a
//! table of contents, single sections, element specifications and the
//! embedded Schematron rules that back API features. Lookups return the
//! original XML text of the matched element, sliced by byte range, so the
//! markup reaches the caller unmodified.

use std::{error::Error, fmt};

use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;

pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
pub const TEI_EXAMPLES_NS: &str = "http://www.tei-c.org/ns/Examples";

const UNTITLED: &str = "Untitled Section";

/// Error type for ODD processing failures.
#[derive(Debug)]
pub enum OddError {
    Parse(roxmltree::Error),
    NotFound { what: &'static str, ident: String },
}

impl fmt::Display for OddError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "XML parse error: {err}"),
            Self::NotFound { what, ident } => write!(f, "no {what} matching '{ident}' in the ODD"),
        }
    }
}

impl Error for OddError {}

impl From<roxmltree::Error> for OddError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Parse(err)
    }
}

/// One section in the ODD table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub children: Vec<TocEntry>,
}

/// A parsed ODD document together with its source text.
#[derive(Debug)]
pub struct OddDocument<'a> {
    source: &'a str,
    doc: Document<'a>,
}

impl<'a> OddDocument<'a> {
    /// Parses ODD XML. DTDs are allowed since the TEI sources declare
    /// entities.
    ///
    /// # Errors
    /// Returns `OddError::Parse` if the XML is not well formed.
    pub fn parse(source: &'a str) -> Result<Self, OddError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(source, options)?;
        Ok(Self { source, doc })
    }

    /// Builds the table of contents from the `div` tree under `body`,
    /// keyed by `xml:id`. Divs without an id and divs nested inside
    /// `egXML` example blocks are skipped.
    #[must_use]
    pub fn table_of_contents(&self) -> Vec<TocEntry> {
        let Some(body) = self
            .doc
            .descendants()
            .find(|node| node.has_tag_name((TEI_NS, "body")))
        else {
            return Vec::new();
        };
        body.children()
            .filter(|node| node.has_tag_name((TEI_NS, "div")) && !inside_example(*node))
            .filter_map(toc_entry)
            .collect()
    }

    /// Returns the raw XML of the element with the given `xml:id`.
    ///
    /// # Errors
    /// Returns `OddError::NotFound` if no element carries that id.
    pub fn section(&self, xml_id: &str) -> Result<String, OddError> {
        self.find_raw(
            |node| node.attribute((XML_NS, "id")) == Some(xml_id),
            "section",
            xml_id,
        )
    }

    /// Returns the raw XML of the `elementSpec` documenting a TEI element.
    ///
    /// # Errors
    /// Returns `OddError::NotFound` if the element is not documented.
    pub fn element_documentation(&self, element_name: &str) -> Result<String, OddError> {
        self.find_raw(
            |node| {
                node.has_tag_name((TEI_NS, "elementSpec"))
                    && node.attribute("ident") == Some(element_name)
            },
            "elementSpec",
            element_name,
        )
    }

    /// Returns the raw XML of the embedded Schematron rule checking that a
    /// TEI file supports the given API feature.
    ///
    /// # Errors
    /// Returns `OddError::NotFound` if there is no check for that feature.
    pub fn feature_check_rule(&self, feature_name: &str) -> Result<String, OddError> {
        self.find_raw(
            |node| {
                node.has_tag_name((TEI_NS, "constraintSpec"))
                    && node.attribute("ident") == Some(feature_name)
                    && node.attribute("type") == Some("api_feature_check")
            },
            "api feature check",
            feature_name,
        )
    }

    fn find_raw(
        &self,
        predicate: impl Fn(&Node<'_, '_>) -> bool,
        what: &'static str,
        ident: &str,
    ) -> Result<String, OddError> {
        self.doc
            .descendants()
            .find(|node| node.is_element() && predicate(node))
            .map(|node| self.source[node.range()].to_string())
            .ok_or_else(|| OddError::NotFound {
                what,
                ident: ident.to_string(),
            })
    }
}

fn inside_example(node: Node<'_, '_>) -> bool {
    node.ancestors()
        .any(|ancestor| ancestor.has_tag_name((TEI_EXAMPLES_NS, "egXML")))
}

fn toc_entry(div: Node<'_, '_>) -> Option<TocEntry> {
    let id = div.attribute((XML_NS, "id"))?.to_string();
    let title = div
        .children()
        .find(|child| child.has_tag_name((TEI_NS, "head")))
        .map_or_else(|| UNTITLED.to_string(), head_text);
    let children = div
        .children()
        .filter(|child| child.has_tag_name((TEI_NS, "div")) && !inside_example(*child))
        .filter_map(toc_entry)
        .collect();
    Some(TocEntry { id, title, children })
}

fn head_text(head: Node<'_, '_>) -> String {
    let text: String = head
        .descendants()
        .filter(roxmltree::Node::is_text)
        .filter_map(|node| node.text())
        .collect::<Vec<_>>()
        .concat();
    let text = text.trim();
    if text.is_empty() {
        UNTITLED.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ODD_FIXTURE: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:eg="http://www.tei-c.org/ns/Examples">
  <text>
    <body>
      <div xml:id="encoding">
        <head>Encoding <hi>Guidelines</hi></head>
        <div xml:id="encoding-speakers">
          <head>Speakers</head>
          <eg:egXML>
            <div xml:id="nested-example"><head>Not a section</head></div>
          </eg:egXML>
        </div>
        <div xml:id="encoding-untitled"/>
      </div>
      <div>
        <head>No id, skipped</head>
      </div>
      <elementSpec ident="listPerson" module="namesdates">
        <desc>A list of persons.</desc>
      </elementSpec>
      <constraintSpec ident="play_id" type="api_feature_check" scheme="schematron">
        <constraint>rule body</constraint>
      </constraintSpec>
      <constraintSpec ident="play_id" type="other">
        <constraint>wrong type</constraint>
      </constraintSpec>
    </body>
  </text>
</TEI>"#;

    #[test]
    fn toc_nests_sections_and_skips_examples() {
        let odd = OddDocument::parse(ODD_FIXTURE).unwrap();
        let toc = odd.table_of_contents();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].id, "encoding");
        assert_eq!(toc[0].title, "Encoding Guidelines");

        let children = &toc[0].children;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id, "encoding-speakers");
        assert_eq!(children[0].title, "Speakers");
        assert!(children[0].children.is_empty(), "egXML content must not appear");
        assert_eq!(children[1].title, "Untitled Section");
    }

    #[test]
    fn section_returns_raw_xml() {
        let odd = OddDocument::parse(ODD_FIXTURE).unwrap();
        let section = odd.section("encoding-speakers").unwrap();
        assert!(section.starts_with("<div xml:id=\"encoding-speakers\">"));
        assert!(section.contains("<head>Speakers</head>"));
    }

    #[test]
    fn unknown_section_is_not_found() {
        let odd = OddDocument::parse(ODD_FIXTURE).unwrap();
        let err = odd.section("missing").unwrap_err();
        assert!(matches!(err, OddError::NotFound { .. }));
    }

    #[test]
    fn element_documentation_matches_ident() {
        let odd = OddDocument::parse(ODD_FIXTURE).unwrap();
        let spec = odd.element_documentation("listPerson").unwrap();
        assert!(spec.contains("A list of persons."));
        assert!(odd.element_documentation("castList").is_err());
    }

    #[test]
    fn feature_check_rule_requires_the_check_type() {
        let odd = OddDocument::parse(ODD_FIXTURE).unwrap();
        let rule = odd.feature_check_rule("play_id").unwrap();
        assert!(rule.contains("rule body"));
        assert!(!rule.contains("wrong type"));
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = OddDocument::parse("<TEI><unclosed>").unwrap_err();
        assert!(matches!(err, OddError::Parse(_)));
        assert!(err.to_string().starts_with("XML parse error"));
    }
}
