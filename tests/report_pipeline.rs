//! End-to-end tests for the two report pipelines
//!
//! These drive the public report writers over on-disk fixtures, asserting
//! the exact output lines a downstream grep-based consumer relies on.

use oraclebox::config::types::{Category, ClassifierConfig, UnknownCodePolicy};
use oraclebox::report::{formulas, verdicts};
use oraclebox::verdict::decoder::OutputFormat;
use std::fs;
use std::io::Write;
use std::path::Path;

fn write_property_set(dir: &Path, category: Category, bodies: &[(&str, bool)]) {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<property-set>\n");
    for (i, (body, is_ef)) in bodies.iter().enumerate() {
        let (quant, modality) = if *is_ef {
            ("exists-path", "finally")
        } else {
            ("all-paths", "globally")
        };
        xml.push_str(&format!(
            "<property><id>q{:02}</id><formula><{q}><{m}>{body}</{m}></{q}></formula></property>\n",
            i,
            q = quant,
            m = modality,
            body = body
        ));
    }
    xml.push_str("</property-set>\n");
    fs::write(dir.join(category.file_name()), xml).unwrap();
}

// A cardinality body with a given structural size. The base comparison
// tokens-count/integer-constant has size 3; each negation wrapper adds 1.
fn body_of_size(size: usize) -> String {
    assert!(size >= 3);
    let mut body = String::from(
        "<integer-le><tokens-count><place>p</place></tokens-count>\
         <integer-constant>1</integer-constant></integer-le>",
    );
    for _ in 0..(size - 3) {
        body = format!("<negation>{}</negation>", body);
    }
    body
}

const FIREABILITY_BODY: &str =
    "<is-fireable><transition>t1</transition><transition>t2</transition></is-fireable>";

#[test]
fn formula_report_emits_expected_lines_in_order() {
    let root = tempfile::tempdir().unwrap();
    let model = root.path().join("M1");
    fs::create_dir(&model).unwrap();

    // Two cardinality queries: EF of size 12, AG of size 7
    write_property_set(
        &model,
        Category::ReachabilityCardinality,
        &[(&body_of_size(12), true), (&body_of_size(7), false)],
    );
    write_property_set(
        &model,
        Category::ReachabilityFireability,
        &[(FIREABILITY_BODY, true)],
    );

    let mut out = Vec::new();
    formulas::write_report(
        root.path(),
        &mut out,
        &ClassifierConfig::default(),
        OutputFormat::Text,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "M1-ReachabilityFireability-00 EF 1",
            "M1-ReachabilityCardinality-00 EF 12",
            "M1-ReachabilityCardinality-01 AG 7",
        ]
    );
}

#[test]
fn formula_report_sorts_model_directories() {
    let root = tempfile::tempdir().unwrap();
    for model in ["Zeta", "Alpha"] {
        let dir = root.path().join(model);
        fs::create_dir(&dir).unwrap();
        write_property_set(
            &dir,
            Category::ReachabilityFireability,
            &[(FIREABILITY_BODY, true)],
        );
        write_property_set(
            &dir,
            Category::ReachabilityCardinality,
            &[(&body_of_size(3), false)],
        );
    }

    let mut out = Vec::new();
    formulas::write_report(
        root.path(),
        &mut out,
        &ClassifierConfig::default(),
        OutputFormat::Text,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let models: Vec<&str> = text
        .lines()
        .map(|l| l.split('-').next().unwrap())
        .collect();
    assert_eq!(models, vec!["Alpha", "Alpha", "Zeta", "Zeta"]);
}

#[test]
fn formula_report_ignores_plain_files_at_the_root() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("README"), "not a model").unwrap();

    let mut out = Vec::new();
    formulas::write_report(
        root.path(),
        &mut out,
        &ClassifierConfig::default(),
        OutputFormat::Text,
    )
    .unwrap();
    assert!(out.is_empty());
}

#[test]
fn formula_report_fails_on_malformed_xml() {
    let root = tempfile::tempdir().unwrap();
    let model = root.path().join("M1");
    fs::create_dir(&model).unwrap();
    fs::write(
        model.join(Category::ReachabilityFireability.file_name()),
        "<property-set><property>",
    )
    .unwrap();

    let mut out = Vec::new();
    let result = formulas::write_report(
        root.path(),
        &mut out,
        &ClassifierConfig::default(),
        OutputFormat::Text,
    );
    assert!(result.is_err());
}

#[test]
fn verdict_report_decodes_a_full_record() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "M1 TF??PU?????????? a b c d e f g h i j k l m n o p"
    )
    .unwrap();

    let mut out = Vec::new();
    verdicts::write_report(
        file.path(),
        &mut out,
        UnknownCodePolicy::Ignore,
        OutputFormat::Text,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // Every code in the record is in the known table, `?` included
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "M1-00 TRUE a");
    assert_eq!(lines[1], "M1-01 FALSE b");
    assert_eq!(lines[4], "M1-04 POSSIBLE e");
    assert_eq!(lines[5], "M1-05 UNLIKELY f");
    assert_eq!(lines[6], "M1-06 UNKNOWN g");
}

#[test]
fn verdict_report_halts_on_seventeen_field_record() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "M1 TF??PU?????????? a b c d e f g h i j k l m n o").unwrap();

    let mut out = Vec::new();
    let result = verdicts::write_report(
        file.path(),
        &mut out,
        UnknownCodePolicy::Ignore,
        OutputFormat::Text,
    );
    assert!(result.is_err());
    assert!(out.is_empty());
}

#[test]
fn verdict_report_json_lines_are_parseable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "M1 T??????????????? a b c d e f g h i j k l m n o p"
    )
    .unwrap();

    let mut out = Vec::new();
    verdicts::write_report(
        file.path(),
        &mut out,
        UnknownCodePolicy::Ignore,
        OutputFormat::Json,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["model"], "M1");
    assert_eq!(first["slot"], 0);
    assert_eq!(first["verdict"], "True");
    assert_eq!(first["payload"], "a");
}

#[test]
fn formula_report_with_simplification_shrinks_trivial_queries() {
    let root = tempfile::tempdir().unwrap();
    let model = root.path().join("M1");
    fs::create_dir(&model).unwrap();

    // 1 <= 2 folds to the constant true, size 1
    write_property_set(
        &model,
        Category::ReachabilityCardinality,
        &[(
            "<integer-le><integer-constant>1</integer-constant>\
             <integer-constant>2</integer-constant></integer-le>",
            true,
        )],
    );
    write_property_set(
        &model,
        Category::ReachabilityFireability,
        &[(FIREABILITY_BODY, true)],
    );

    let config = ClassifierConfig {
        enable_simplification: true,
        ..ClassifierConfig::default()
    };
    let mut out = Vec::new();
    formulas::write_report(root.path(), &mut out, &config, OutputFormat::Text).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text
        .lines()
        .any(|l| l == "M1-ReachabilityCardinality-00 EF 1"));
}
