use std::thread;

use bamana_lexicon::Lexicon;
use bamana_morph::{AffixRule, Analyzer, AnalyzerOptions, RuleError, lemmatize};
use bamana_types::{LexiconRecord, Pos, Stage, tonal_key};

const RECORDS: &str = r#"[
    {"lemma": "mùso", "variants": ["muso"], "pos": "n", "gloss": "woman"},
    {"lemma": "dɔ́n", "pos": "v", "gloss": "know"},
    {"lemma": "dɔ̀n", "pos": "v", "gloss": "dance"},
    {"lemma": "báara", "pos": "n/v", "gloss": "work"},
    {"lemma": "báarakɛla", "pos": "n", "gloss": "worker"},
    {"lemma": "kɛ́", "pos": "v", "gloss": "do"},
    {"lemma": "kàlan", "pos": "v/n", "gloss": "read"},
    {"lemma": "hákili", "pos": "n", "gloss": "mind"},
    {"lemma": "ɲùman", "pos": "adj/vq", "gloss": "good"}
]"#;

fn records() -> Vec<LexiconRecord> {
    serde_json::from_str(RECORDS).unwrap()
}

fn lexicon() -> Lexicon {
    Lexicon::build(records())
}

#[test]
fn every_headword_and_variant_resolves_directly() {
    let lex = lexicon();
    for record in records() {
        for form in std::iter::once(&record.lemma).chain(&record.variants) {
            let cands = lemmatize(&form.to_uppercase(), &lex);
            assert!(
                cands.iter().any(|c| c.stage == Stage::Direct
                    && c.lemma.as_deref() == Some(record.lemma.as_str())),
                "{form} -> {cands:?}"
            );
        }
    }
}

#[test]
fn direct_match_beats_affix_rules() {
    let lex = lexicon();
    // "báarakɛla" ends in -la but is itself a headword.
    let cands = lemmatize("báarakɛla", &lex);
    assert_eq!(cands.len(), 1);
    assert_eq!(cands[0].stage, Stage::Direct);
    assert_eq!(cands[0].gloss.as_deref(), Some("worker"));
}

#[test]
fn derivations_carry_affix_gloss() {
    let lex = lexicon();
    let cases = [
        ("hakilintan", "hákili", "mind-PRIV"),
        ("ɲumanya", "ɲùman", "good-ABSTR"),
        ("kalanbaga", "kàlan", "read-AG.EX"),
        ("kalanna", "kàlan", "read-AG.OCC"),
        ("kɛla", "kɛ́", "do-AG.OCC"),
    ];
    for (word, lemma, gloss) in cases {
        let cands = lemmatize(word, &lex);
        assert_eq!(cands[0].stage, Stage::Derivation, "{word}");
        assert_eq!(cands[0].lemma.as_deref(), Some(lemma), "{word}");
        assert_eq!(cands[0].gloss.as_deref(), Some(gloss), "{word}");
    }
}

#[test]
fn tone_stripped_homographs_all_returned() {
    let lex = lexicon();
    let cands = lemmatize("dɔn", &lex);
    let glosses: Vec<_> = cands.iter().filter_map(|c| c.gloss.as_deref()).collect();
    assert_eq!(glosses, vec!["know", "dance"]);
    assert!(cands.iter().all(|c| c.stage == Stage::Direct));
}

#[test]
fn unrecognized_marker_has_no_lemma_or_gloss() {
    let lex = lexicon();
    let cands = lemmatize("zzzz", &lex);
    assert_eq!(cands.len(), 1);
    assert_eq!(cands[0].stage.code(), -1);
    assert!(cands[0].lemma.is_none() && cands[0].gloss.is_none());
}

#[test]
fn custom_rule_table() {
    let lex = lexicon();
    let rule = AffixRule::new("ko", &[(Some("^ko$"), None)], 2, &[Pos::Noun], "TEST").unwrap();
    let analyzer = Analyzer::new(vec![rule], AnalyzerOptions::default());
    let cands = analyzer.lemmatize("mùsoko", &lex);
    assert_eq!(cands[0].gloss.as_deref(), Some("woman-TEST"));
    // The default plural rule is not in this table.
    assert!(analyzer.lemmatize("musow", &lex)[0].is_unrecognized());

    let err = AffixRule::new("broken", &[(None, Some("[a-"))], 1, &[], "X").unwrap_err();
    assert!(matches!(err, RuleError::InvalidPattern { ref pattern, .. } if pattern == "[a-"));
}

#[test]
fn extended_tiers_only_when_enabled() {
    let lex = lexicon();
    let extended = Analyzer::default().with_options(AnalyzerOptions::extended());
    let cands = extended.lemmatize("musomuso", &lex);
    assert_eq!(cands[0].stage, Stage::Reduplication);
    assert!(lemmatize("musomuso", &lex)[0].is_unrecognized());

    let cands = extended.lemmatize("musobaara", &lex);
    assert_eq!(cands[0].stage, Stage::Compound);
    assert_eq!(cands[0].gloss.as_deref(), Some("woman.work"));
}

#[test]
fn candidates_serialize() {
    let lex = lexicon();
    let json = serde_json::to_value(lemmatize("mùsow", &lex)).unwrap();
    assert_eq!(json[0]["stage"], "derivation");
    assert_eq!(json[0]["pos"][0], "n");
}

#[test]
fn shared_lexicon_across_threads() {
    let lex = lexicon();
    let words = ["mùso", "mùsow", "dɔn", "kɛla", "zzzz"];
    let expected: Vec<_> = words.iter().map(|w| lemmatize(w, &lex)).collect();
    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (word, want) in words.iter().zip(&expected) {
                    assert_eq!(&lemmatize(word, &lex), want, "{}", tonal_key(word));
                }
            });
        }
    });
}
