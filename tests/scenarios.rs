//! End-to-end scenarios over the public API.

use metaphone_br::dedup::{find_best_matches, find_duplicate_names, DedupMethod};
use metaphone_br::{is_sim, pack, MatchConfig, MetaphoneError, Name, NameMatcher};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_preposition_recognized_and_excluded() {
    let name = Name::parse("Maria de Souza").unwrap();
    assert_eq!(name.words(), ["MARIA", "DE", "SOUZA"]);
    assert!(name.is_preposition(1, &MatchConfig::default()));

    // Excluded from both numerator and denominator
    let plain = Name::parse("Maria Souza").unwrap();
    assert_eq!(name.sim(&name).unwrap(), 1.0);
    assert_eq!(plain.sim(&name).unwrap(), 1.0);
}

#[test]
fn test_inserted_preposition_keeps_score() {
    let a = Name::parse("Maria Souza").unwrap();
    let b = Name::parse("Maria de Souza").unwrap();
    assert!(a.sim(&b).unwrap() > 0.99);
    assert!(b.sim(&a).unwrap() > 0.99);
}

#[test]
fn test_accents_neutralized_before_transcription() {
    let a = Name::parse("Joao Silva").unwrap();
    let b = Name::parse("João Silva").unwrap();
    assert_eq!(a.codes(), b.codes());

    // The literal word similarity still sees one substitution in JOAO
    let score = a.sim(&b).unwrap();
    assert!(approx_eq(score, 0.75));
    assert!(score > Name::parse("Joao Souza").unwrap().sim(&b).unwrap());
}

#[test]
fn test_is_sim_margin_boundary() {
    for len in [3usize, 5, 7, 9] {
        let margin = (0.5 * (len - 1) as f64).floor() as usize;
        let base: String = "A".repeat(len);
        let at_margin: String = "B".repeat(margin) + &"A".repeat(len - margin);
        let past_margin: String = "B".repeat(margin + 1) + &"A".repeat(len - margin - 1);
        assert!(is_sim(&base, &at_margin), "len {len}");
        assert!(!is_sim(&base, &past_margin), "len {len}");
    }
}

#[test]
fn test_permutation_scores_lower() {
    let ordered = Name::parse("Maria Silva").unwrap();
    let swapped = Name::parse("Silva Maria").unwrap();
    let same = ordered.sim(&ordered).unwrap();
    let permuted = swapped.sim(&ordered).unwrap();
    assert_eq!(same, 1.0);
    assert!(permuted < same);
}

#[test]
fn test_spelling_variants_share_codes() {
    let pairs = [
        ("LUIZ", "LUIS"),
        ("THIAGO", "TIAGO"),
        ("FELIPE", "PHELIPE"),
        ("KATIA", "CATIA"),
        ("WALTER", "VALTER"),
        ("RAFAEL", "RAPHAEL"),
        ("MARCOS", "MARCUS"),
        ("HELENA", "ELENA"),
        ("QUEIROZ", "KEIROZ"),
    ];
    for (a, b) in pairs {
        assert_eq!(pack(a), pack(b), "{a}/{b}");
    }
}

#[test]
fn test_full_name_variants() {
    let a = Name::parse("Thiago Rafael de Queiroz").unwrap();
    let b = Name::parse("Tiago Raphael Keiroz").unwrap();
    assert_eq!(a.phonetic_key(), "TG 2F D KS");
    assert_eq!(b.phonetic_key(), "TG 2F KS");
    // Every word pairs up; only the literal spellings differ
    let score = a.sim(&b).unwrap();
    assert!(approx_eq(score, (5.0 / 6.0) * (5.0 / 7.0) * (5.0 / 7.0)), "{score}");
}

#[test]
fn test_unparseable_names_error() {
    assert!(matches!(Name::parse("1234"), Err(MetaphoneError::InvalidName(_))));
    let matcher = NameMatcher::default();
    assert!(matcher.sim_raw("Maria", "").is_err());
}

#[test]
fn test_configured_matcher() {
    let config: MatchConfig =
        serde_json::from_str(r#"{"lev_threshold": 0.0, "verbose": false}"#).unwrap();
    let matcher = NameMatcher::new(config).unwrap();
    let name = matcher.parse("Maria de Souza").unwrap();
    assert_eq!(matcher.render(&name), "MARIA DE SOUZA");
    assert_eq!(matcher.sim_raw("Maria Souza", "Maria de Souza").unwrap(), 1.0);
}

#[test]
fn test_dedup_and_ranking_agree() {
    let items: Vec<String> = ["Luiz Carvalho", "Luis Carvalho", "Luiz de Carvalho", "Ana Santos"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let matcher = NameMatcher::default();

    let groups = find_duplicate_names(&items, &matcher, 0.75, DedupMethod::BruteForce).unwrap();
    assert_eq!(groups.groups.len(), 1);
    assert_eq!(groups.groups[0].len(), 3);
    assert_eq!(groups.unique, vec!["Ana Santos".to_string()]);

    let best = find_best_matches("Luiz Carvalho", &items, &matcher, Some(2), 0.75).unwrap();
    let order: Vec<usize> = best.iter().map(|m| m.index).collect();
    assert_eq!(order, vec![0, 2]);
}
