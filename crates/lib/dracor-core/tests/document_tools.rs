//! End-to-end checks for the ODD and schema document tools on a realistic
//! TEI fixture: table of contents, section lookup and name-set validation
//! working together the way the docs tools drive them.

use dracor_core::odd::OddDocument;
use dracor_core::schema::RelaxNgIndex;

const ODD: &str = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0" xmlns:eg="http://www.tei-c.org/ns/Examples">
  <text>
    <body>
      <div xml:id="preface">
        <head>Preface</head>
        <div xml:id="preface-scope">
          <head>Scope of these guidelines</head>
          <p>Drama encoded for DraCor.</p>
          <eg:egXML>
            <div xml:id="example-div"><head>Example only</head></div>
          </eg:egXML>
        </div>
      </div>
      <div xml:id="elements">
        <head>Element reference</head>
        <elementSpec ident="sp" module="drama">
          <desc>A speech.</desc>
        </elementSpec>
        <constraintSpec ident="play_title" type="api_feature_check" scheme="schematron">
          <constraint>title must be present</constraint>
        </constraintSpec>
      </div>
    </body>
  </text>
</TEI>"#;

const GRAMMAR: &str = r#"<grammar xmlns="http://relaxng.org/ns/structure/1.0">
  <start>
    <element name="TEI">
      <element name="text">
        <element name="body">
          <element name="sp">
            <attribute name="who"/>
            <text/>
          </element>
        </element>
      </element>
    </element>
  </start>
</grammar>"#;

#[test]
fn toc_exposes_ids_that_section_lookup_resolves() {
    let odd = OddDocument::parse(ODD).expect("fixture parses");
    let toc = odd.table_of_contents();
    assert_eq!(toc.len(), 2);
    assert_eq!(toc[0].id, "preface");
    assert_eq!(toc[0].children[0].title, "Scope of these guidelines");
    assert!(toc[0].children[0].children.is_empty());

    // Every id surfaced in the TOC must be retrievable as a section.
    let section = odd.section(&toc[0].children[0].id).expect("section resolves");
    assert!(section.contains("Drama encoded for DraCor."));
}

#[test]
fn element_and_feature_lookups_return_markup() {
    let odd = OddDocument::parse(ODD).expect("fixture parses");
    let spec = odd.element_documentation("sp").expect("elementSpec found");
    assert!(spec.starts_with("<elementSpec"));

    let rule = odd.feature_check_rule("play_title").expect("rule found");
    assert!(rule.contains("title must be present"));
}

#[test]
fn validation_accepts_conforming_and_flags_unknown_markup() {
    let index = RelaxNgIndex::parse(GRAMMAR).expect("grammar parses");

    let ok = index.validate(r##"<TEI><text><body><sp who="#odoardo">Ha!</sp></body></text></TEI>"##);
    assert!(ok.valid, "errors: {:?}", ok.errors);

    let bad = index.validate("<TEI><stage>unknown</stage></TEI>");
    assert!(!bad.valid);
    assert!(bad.errors.iter().any(|e| e.contains("unknown element 'stage'")));
}
