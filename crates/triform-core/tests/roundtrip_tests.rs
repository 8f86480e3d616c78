//! Round trips through the value model: same-format trips that must be exact,
//! and cross-format trips with their known structural losses.

use triform_core::{convert, ConvertOptions, Format};

const PRETTY: ConvertOptions = ConvertOptions { minify: false };
const MINIFIED: ConvertOptions = ConvertOptions { minify: true };

// ============================================================================
// Exact same-format round trips
// ============================================================================

#[test]
fn pretty_json_is_a_fixed_point() {
    let canonical = "{\n  \"name\": \"Ada\",\n  \"items\": [\n    1,\n    2\n  ],\n  \"meta\": {\n    \"id\": 7\n  }\n}\n";
    assert_eq!(convert(canonical, Format::Json, &PRETTY).unwrap(), canonical);
}

#[test]
fn pretty_xml_is_a_fixed_point() {
    let canonical =
        "<note id=\"1\">\n  <to>Alice</to>\n  <to>Bob</to>\n  <body>Hello</body>\n</note>\n";
    assert_eq!(convert(canonical, Format::Xml, &PRETTY).unwrap(), canonical);
}

#[test]
fn pretty_yaml_is_a_fixed_point() {
    let canonical = "name: Ada\nitems:\n  - 1\n  - 2\nmeta:\n  id: 7\n";
    assert_eq!(convert(canonical, Format::Yaml, &PRETTY).unwrap(), canonical);
}

#[test]
fn minified_json_is_a_fixed_point() {
    let canonical = r#"{"name":"Ada","items":[1,2],"meta":{"id":7}}"#;
    assert_eq!(
        convert(canonical, Format::Json, &MINIFIED).unwrap(),
        canonical
    );
}

#[test]
fn minified_xml_is_a_fixed_point() {
    let canonical = "<note id=\"1\"><to>Alice</to><to>Bob</to><body>Hello</body></note>";
    assert_eq!(
        convert(canonical, Format::Xml, &MINIFIED).unwrap(),
        canonical
    );
}

// ============================================================================
// Cross-format trips
// ============================================================================

#[test]
fn json_to_yaml_and_back() {
    let json = r#"{"name":"Ada","active":true,"scores":[1,2.5]}"#;
    let yaml = convert(json, Format::Yaml, &PRETTY).unwrap();
    assert_eq!(convert(&yaml, Format::Json, &MINIFIED).unwrap(), json);
}

#[test]
fn json_to_xml_and_back() {
    let json = r#"{"note":{"to":"Alice","body":"Hello","urgent":true}}"#;
    let xml = convert(json, Format::Xml, &PRETTY).unwrap();
    assert_eq!(convert(&xml, Format::Json, &MINIFIED).unwrap(), json);
}

#[test]
fn xml_to_yaml_and_back() {
    let xml = "<cfg><host>localhost</host><port>8080</port></cfg>";
    let yaml = convert(xml, Format::Yaml, &PRETTY).unwrap();
    assert_eq!(yaml, "cfg:\n  host: localhost\n  port: 8080\n");
    assert_eq!(convert(&yaml, Format::Xml, &MINIFIED).unwrap(), xml);
}

#[test]
fn null_survives_a_trip_through_xml() {
    let json = r#"{"r":{"a":null,"b":"x"}}"#;
    let xml = convert(json, Format::Xml, &MINIFIED).unwrap();
    assert_eq!(xml, "<r><a/><b>x</b></r>");
    assert_eq!(convert(&xml, Format::Json, &MINIFIED).unwrap(), json);
}

// ============================================================================
// Known structural losses through XML
// ============================================================================

#[test]
fn singleton_arrays_collapse_through_xml() {
    // A one-element array serializes as a single element, which parses back
    // as a plain value. The markup has no way to record the distinction.
    let xml = convert(r#"{"r":{"b":[1]}}"#, Format::Xml, &MINIFIED).unwrap();
    assert_eq!(xml, "<r><b>1</b></r>");
    assert_eq!(
        convert(&xml, Format::Json, &MINIFIED).unwrap(),
        r#"{"r":{"b":1}}"#
    );
}

#[test]
fn numeric_looking_strings_collapse_through_xml() {
    // Element text carries no type annotation, so "42" re-parses as a number.
    let xml = convert(r#"{"r":{"v":"42"}}"#, Format::Xml, &MINIFIED).unwrap();
    assert_eq!(
        convert(&xml, Format::Json, &MINIFIED).unwrap(),
        r#"{"r":{"v":42}}"#
    );
}
