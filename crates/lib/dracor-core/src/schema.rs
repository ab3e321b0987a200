//! Validation of TEI documents against the DraCor RelaxNG schema.
//!
//! There is no RelaxNG engine in the Rust ecosystem, so validation is a
//! name-set check: the grammar is indexed for the element and attribute
//! names it declares, and a candidate document is valid when it is well
//! formed and uses only declared names. Content models are not enforced;
//! the report lists every unknown name it encountered.

use std::collections::HashSet;
use std::{error::Error, fmt};

use roxmltree::{Document, ParsingOptions};
use serde::Serialize;

pub const RELAXNG_NS: &str = "http://relaxng.org/ns/structure/1.0";

/// Error type for schema processing failures.
#[derive(Debug)]
pub enum SchemaError {
    /// The grammar itself could not be parsed.
    Grammar(roxmltree::Error),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grammar(err) => write!(f, "RelaxNG grammar parse error: {err}"),
        }
    }
}

impl Error for SchemaError {}

impl From<roxmltree::Error> for SchemaError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Grammar(err)
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Name index built from a RelaxNG grammar.
#[derive(Debug)]
pub struct RelaxNgIndex {
    elements: HashSet<String>,
    attributes: HashSet<String>,
    any_element: bool,
    any_attribute: bool,
}

impl RelaxNgIndex {
    /// Indexes the element and attribute names a grammar declares. Both the
    /// `name` attribute form and the `name` child element form are
    /// recognized; `anyName` inside an element or attribute pattern turns
    /// the corresponding check into a wildcard.
    ///
    /// # Errors
    /// Returns `SchemaError::Grammar` if the grammar XML is not well formed.
    pub fn parse(grammar: &str) -> Result<Self, SchemaError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(grammar, options)?;

        let mut elements = HashSet::new();
        let mut attributes = HashSet::new();
        let mut any_element = false;
        let mut any_attribute = false;

        for node in doc.descendants().filter(roxmltree::Node::is_element) {
            let is_element = node.has_tag_name((RELAXNG_NS, "element"));
            let is_attribute = node.has_tag_name((RELAXNG_NS, "attribute"));
            if !is_element && !is_attribute {
                continue;
            }

            let name = node.attribute("name").map(str::to_string).or_else(|| {
                node.children()
                    .find(|child| child.has_tag_name((RELAXNG_NS, "name")))
                    .and_then(|child| child.text())
                    .map(|text| text.trim().to_string())
            });

            match name {
                Some(name) => {
                    // Namespace prefixes in the grammar are irrelevant for
                    // the local-name check.
                    let local = name.rsplit(':').next().unwrap_or(&name).to_string();
                    if is_element {
                        elements.insert(local);
                    } else {
                        attributes.insert(local);
                    }
                }
                None => {
                    let wildcard = node
                        .children()
                        .any(|child| child.has_tag_name((RELAXNG_NS, "anyName")));
                    if wildcard && is_element {
                        any_element = true;
                    }
                    if wildcard && is_attribute {
                        any_attribute = true;
                    }
                }
            }
        }

        Ok(Self {
            elements,
            attributes,
            any_element,
            any_attribute,
        })
    }

    /// Validates a document against the indexed names. A document that is
    /// not well formed is reported as invalid with the parse error in the
    /// log, distinguishable from unknown-name findings.
    #[must_use]
    pub fn validate(&self, xml: &str) -> ValidationReport {
        let doc = match Document::parse_with_options(
            xml,
            ParsingOptions {
                allow_dtd: true,
                ..ParsingOptions::default()
            },
        ) {
            Ok(doc) => doc,
            Err(err) => {
                return ValidationReport {
                    valid: false,
                    errors: vec![format!("XML parse error: {err}")],
                };
            }
        };

        let mut errors = Vec::new();
        for node in doc.descendants().filter(roxmltree::Node::is_element) {
            let name = node.tag_name().name();
            if !self.any_element && !self.elements.contains(name) {
                errors.push(format!("unknown element '{name}'"));
            }
            for attribute in node.attributes() {
                let attribute_name = attribute.name();
                if !self.any_attribute && !self.attributes.contains(attribute_name) {
                    errors.push(format!("unknown attribute '{attribute_name}' on element '{name}'"));
                }
            }
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAMMAR: &str = r#"<grammar xmlns="http://relaxng.org/ns/structure/1.0">
  <start>
    <element name="TEI">
      <attribute name="version"/>
      <element name="text">
        <element>
          <name>body</name>
          <text/>
        </element>
      </element>
    </element>
  </start>
  <define name="global-attributes">
    <attribute>
      <name>xml:id</name>
    </attribute>
  </define>
</grammar>"#;

    #[test]
    fn declared_names_validate() {
        let index = RelaxNgIndex::parse(GRAMMAR).unwrap();
        let report = index.validate(r#"<TEI version="1.0"><text><body>x</body></text></TEI>"#);
        assert!(report.valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn unknown_names_are_reported() {
        let index = RelaxNgIndex::parse(GRAMMAR).unwrap();
        let report = index.validate(r#"<TEI bogus="1"><scene/></TEI>"#);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("unknown attribute 'bogus'")));
        assert!(report.errors.iter().any(|e| e.contains("unknown element 'scene'")));
    }

    #[test]
    fn prefixed_grammar_names_match_local_names() {
        let index = RelaxNgIndex::parse(GRAMMAR).unwrap();
        let report = index.validate(r#"<TEI xml:id="t1"><text><body>x</body></text></TEI>"#);
        assert!(report.valid, "errors: {:?}", report.errors);
    }

    #[test]
    fn malformed_document_reports_a_parse_error() {
        let index = RelaxNgIndex::parse(GRAMMAR).unwrap();
        let report = index.validate("<TEI><broken");
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("XML parse error"));
    }

    #[test]
    fn any_name_wildcard_accepts_everything() {
        let grammar = r#"<grammar xmlns="http://relaxng.org/ns/structure/1.0">
  <start><element><anyName/><attribute><anyName/></attribute></element></start>
</grammar>"#;
        let index = RelaxNgIndex::parse(grammar).unwrap();
        let report = index.validate(r#"<whatever anything="yes"><inner/></whatever>"#);
        assert!(report.valid);
    }

    #[test]
    fn malformed_grammar_is_an_error() {
        assert!(matches!(
            RelaxNgIndex::parse("<grammar").unwrap_err(),
            SchemaError::Grammar(_)
        ));
    }
}
