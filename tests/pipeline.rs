use std::fs;

use anyhow::Result;
use bamana::{
    CodecStats, DecodeError, Lexicon, Stage, ToneCode, canonicalize, decode_str, detone,
    encode_with_stats, lemmatize, normalize, syllabify,
};

const RECORDS: &str = r#"[
    {"lemma": "mùso", "variants": ["muso"], "pos": "n", "gloss": "woman"},
    {"lemma": "nàrɛ", "pos": "n", "gloss": "néré tree"},
    {"lemma": "kàlan", "pos": "v/n", "gloss": "read"},
    {"lemma": "Bàmakɔ", "pos": "n.prop", "gloss": "Bamako"}
]"#;

fn load_lexicon() -> Result<Lexicon> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lexicon.json");
    fs::write(&path, RECORDS)?;
    Lexicon::load_json(&path)
}

#[test]
fn tonal_text_through_every_stage() -> Result<()> {
    let lex = load_lexicon()?;
    let mut stats = CodecStats::new();
    for tonal in ["mùso", "nàrɛ", "kàlan", "Bàmakɔ"] {
        let plain = detone(tonal);
        let chunks = syllabify(&plain);
        assert_eq!(chunks.first().concat(), plain);

        let encoded = encode_with_stats(&plain, tonal, &mut stats);
        assert_eq!(encoded.reconstruct()?, tonal);

        let cands = lemmatize(tonal, &lex);
        assert_eq!(cands[0].stage, Stage::Direct, "{tonal}");
    }
    assert_eq!(stats.words, 4);
    assert_eq!(stats.mismatches, 0);
    Ok(())
}

#[test]
fn inflected_and_unknown_words() -> Result<()> {
    let lex = load_lexicon()?;
    let plural = lemmatize("musow", &lex);
    assert_eq!(plural[0].stage, Stage::Derivation);
    assert_eq!(plural[0].lemma.as_deref(), Some("mùso"));

    let unknown = lemmatize("wulu", &lex);
    assert_eq!(unknown.len(), 1);
    assert!(unknown[0].is_unrecognized());

    let json = serde_json::to_value(&plural)?;
    assert_eq!(json[0]["lemma"], "mùso");
    assert_eq!(json[0]["gloss"], "woman-PL");
    assert_eq!(json[0]["stage"], "derivation");
    let json = serde_json::to_value(&unknown)?;
    assert!(json[0]["lemma"].is_null() && json[0]["gloss"].is_null());
    assert_eq!(json[0]["stage"], "unrecognized");
    Ok(())
}

#[test]
fn normalized_text_is_stable() {
    let text = "Ń bɛ́ Bàmakɔ, mùsow bɛ kàlan kɛ.";
    let once = normalize(text);
    assert_eq!(normalize(&once), once);
}

#[test]
fn serialized_codes_compare_canonically() -> Result<()> {
    let a: ToneCode = "-;1;e;+;2;\u{0300};+;1;ɛ".parse()?;
    let b: ToneCode = "+;1;ɛ;+;2;\u{0300};-;1;e".parse()?;
    assert_eq!(canonicalize(&a), canonicalize(&b));
    assert_eq!(decode_str("re", "+;1;ɛ;-;1;e")?, "rɛ");
    Ok(())
}

#[test]
fn malformed_codes_are_errors() {
    assert!(matches!(
        decode_str("to", "+;1"),
        Err(DecodeError::SegmentCount { count: 2 })
    ));
    assert!(decode_str("to", "*;1;a").is_err());
}
