use std::io::Write;

use super::*;

fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file
}

#[test]
fn default_vocabulary_passes_validation() {
    assert!(validate_vocabulary(&AttributeVocabulary::default()).is_ok());
}

#[test]
fn unit_rule_matches_attached_and_free_standing_units() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.infer_label("80 cm"), Some("Measurement"));
    assert_eq!(vocab.infer_label("80cm"), Some("Measurement"));
    assert_eq!(vocab.infer_label("80,5cm"), Some("Measurement"));
    assert_eq!(vocab.infer_label("Tablero 1,2 m"), Some("Measurement"));
    assert_eq!(vocab.infer_label("16 mm"), Some("Measurement"));
}

#[test]
fn unit_rule_matches_units_glued_to_other_text() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.infer_label("80x45cm"), Some("Measurement"));
    assert_eq!(vocab.infer_label("Ancho80cm"), Some("Measurement"));
    assert_eq!(vocab.infer_label("80X45 cm"), Some("Measurement"));
    assert_eq!(vocab.infer_label("1.20m"), Some("Measurement"));
}

#[test]
fn unit_rule_ignores_words_starting_with_unit_letters() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.infer_label("Mate"), None);
    assert_eq!(vocab.infer_label("Mueble suspendido"), None);
    assert_eq!(vocab.infer_label("Espejo"), Some("Mirror"));
    assert_eq!(vocab.infer_label("Premium"), None);
}

#[test]
fn colour_words_infer_finish() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.infer_label("Blanco Brillo"), Some("Finish"));
    assert_eq!(vocab.infer_label("Roble Natural"), Some("Finish"));
    assert_eq!(vocab.infer_label("Matt Anthracite"), Some("Finish"));
}

#[test]
fn colour_words_must_be_whole_tokens() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.infer_label("Shredded"), None);
}

#[test]
fn measurement_outranks_finish() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.infer_label("Blanco 80 cm"), Some("Measurement"));
}

#[test]
fn mirror_rule_matches_substring() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.infer_label("Con espejo LED"), Some("Mirror"));
    assert_eq!(vocab.infer_label("Mirrored cabinet"), Some("Mirror"));
}

#[test]
fn fallback_label_is_one_based() {
    let vocab = AttributeVocabulary::default();
    assert_eq!(vocab.fallback_label(0), "Option 1");
    assert_eq!(vocab.fallback_label(4), "Option 5");
}

#[test]
fn load_vocabulary_reads_custom_rules() {
    let file = write_yaml(
        r"
rules:
  - label: Acabado
    match: word
    tokens: [blanco, negro]
fallback: 'Opción {n}'
dimensions:
  width: [ancho]
",
    );
    let vocab = load_vocabulary(file.path()).expect("expected valid vocabulary");
    assert_eq!(vocab.rules.len(), 1);
    assert_eq!(vocab.infer_label("Negro mate"), Some("Acabado"));
    assert_eq!(vocab.fallback_label(1), "Opción 2");
    assert_eq!(vocab.dimensions.width, vec!["ancho"]);
    assert!(vocab.dimensions.depth.is_empty());
}

#[test]
fn load_vocabulary_rejects_fallback_without_placeholder() {
    let file = write_yaml("rules: []\nfallback: Option\n");
    let err = load_vocabulary(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("{n}")));
}

#[test]
fn load_vocabulary_rejects_rule_without_tokens() {
    let file = write_yaml(
        "rules:\n  - label: Finish\n    match: word\n    tokens: []\nfallback: 'Option {n}'\n",
    );
    let err = load_vocabulary(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("Finish")));
}

#[test]
fn load_vocabulary_rejects_duplicate_labels() {
    let file = write_yaml(
        r"
rules:
  - label: Finish
    match: word
    tokens: [white]
  - label: finish
    match: substring
    tokens: [oak]
fallback: 'Option {n}'
",
    );
    let err = load_vocabulary(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")));
}

#[test]
fn load_vocabulary_reports_missing_file() {
    let err = load_vocabulary(Path::new("/nonexistent/vocabulary.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::VocabularyFileIo { .. }));
}

#[test]
fn load_vocabulary_reports_parse_errors() {
    let file = write_yaml("rules: [not: valid: yaml");
    let err = load_vocabulary(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::VocabularyFileParse(_)));
}
