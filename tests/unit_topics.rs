// Unit tests for the vocabulary and topic helpers.
//
// Covers Dictionary id assignment and serde shape, parse_topic_string edge
// cases, and topic lookup through the TopicModel trait.

use docdist::document::{SparseBagOfWords, SparseDistribution};
use docdist::errors::DistanceError;
use docdist::metrics::hellinger_distance;
use docdist::topics::fixed::FixedTopicModel;
use docdist::topics::parse::parse_topic_string;
use docdist::topics::traits::{most_likely_topic, TopicModel};
use docdist::vocabulary::{Dictionary, Vocabulary};

fn toy_dictionary() -> Dictionary {
    Dictionary::from_documents(&[
        vec!["bank", "river", "shore", "water"],
        vec!["money", "transaction", "bank", "finance"],
    ])
}

// ============================================================
// Dictionary
// ============================================================

#[test]
fn dictionary_serializes_as_token_array() {
    let dict = toy_dictionary();
    let json = serde_json::to_string(&dict).unwrap();
    assert_eq!(
        json,
        r#"["bank","river","shore","water","money","transaction","finance"]"#
    );

    let back: Dictionary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.token_id("finance"), Some(6));
    assert_eq!(back.token(4), Some("money"));
}

#[test]
fn dictionary_doc2bow_empty_document() {
    let dict = toy_dictionary();
    let empty: [&str; 0] = [];
    assert!(dict.doc2bow(&empty).is_empty());
}

#[test]
fn dictionary_doc2bow_only_unknown_tokens() {
    let dict = toy_dictionary();
    assert!(dict.doc2bow(&["loan", "sell"]).is_empty());
}

#[test]
fn empty_dictionary() {
    let dict = Dictionary::new();
    assert!(dict.is_empty());
    assert_eq!(dict.token_id("bank"), None);
}

// ============================================================
// parse_topic_string
// ============================================================

#[test]
fn parse_topic_tolerates_spacing() {
    let dict = toy_dictionary();
    let dist = parse_topic_string(r#"  0.6 * "bank"+0.4*"money"  "#, &dict).unwrap();
    assert!((dist.get(0) - 0.6).abs() < 1e-12);
    assert!((dist.get(4) - 0.4).abs() < 1e-12);
    assert!((dist.total_mass() - 1.0).abs() < 1e-12);
}

#[test]
fn parse_topic_repeated_word_accumulates() {
    let dict = toy_dictionary();
    let dist = parse_topic_string(r#"0.2*"bank" + 0.3*"bank""#, &dict).unwrap();
    assert_eq!(dist.len(), 1);
    assert!((dist.get(0) - 0.5).abs() < 1e-12);
}

#[test]
fn parse_topic_errors_are_invalid_input() {
    let dict = toy_dictionary();
    for bad in ["", "   ", r#"bank*0.3"#, r#"0.3*"bank" 0.2*"water""#, r#"0.3*"unknown""#] {
        assert!(
            matches!(parse_topic_string(bad, &dict), Err(DistanceError::InvalidInput(_))),
            "'{bad}' should be rejected"
        );
    }
}

#[test]
fn parsed_topics_feed_hellinger() {
    let dict = toy_dictionary();
    let water = parse_topic_string(r#"0.5*"water" + 0.3*"river" + 0.2*"bank""#, &dict).unwrap();
    let finance = parse_topic_string(r#"0.5*"money" + 0.3*"finance" + 0.2*"bank""#, &dict).unwrap();

    let d = hellinger_distance(&water, &finance).unwrap();
    // Only "bank" is shared: 1 - BC where BC = sqrt(0.2 * 0.2)
    let expected = (1.0f64 - 0.2).sqrt();
    assert!((d - expected).abs() < 1e-12, "Expected {expected}, got {d}");
    assert_eq!(hellinger_distance(&water, &water).unwrap(), 0.0);
}

// ============================================================
// TopicModel
// ============================================================

struct ConstantModel(SparseDistribution);

impl TopicModel for ConstantModel {
    fn infer(&self, _bow: &SparseBagOfWords) -> anyhow::Result<SparseDistribution> {
        Ok(self.0.clone())
    }
}

#[test]
fn most_likely_topic_from_custom_model() {
    let model = ConstantModel(SparseDistribution::new([(0, 0.3), (1, 0.7)]));
    let bow = SparseBagOfWords::new([(0, 1)]);
    assert_eq!(most_likely_topic(&model, &bow).unwrap(), Some(1));
}

#[test]
fn most_likely_topic_empty_distribution() {
    let model = ConstantModel(SparseDistribution::default());
    let bow = SparseBagOfWords::default();
    assert_eq!(most_likely_topic(&model, &bow).unwrap(), None);
}

#[test]
fn fixed_model_unknown_document_errors() {
    let model = FixedTopicModel::default();
    let err = model.infer(&SparseBagOfWords::new([(1, 1)])).unwrap_err();
    assert!(err.to_string().contains("No precomputed topic distribution"));
}
