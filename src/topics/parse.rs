// Parsing topics printed as weighted word lists.
//
// Topic models commonly render a topic as
//
//   0.300*"bank" + 0.200*"water" + 0.100*"river"
//
// This turns that text back into a distribution over vocabulary indices so
// two topics can be compared with the distribution metrics.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::document::SparseDistribution;
use crate::errors::{DistanceError, Result};
use crate::vocabulary::Vocabulary;

static TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s*\*\s*"([^"]*)""#)
        .expect("topic term pattern is valid")
});

/// Parse a rendered topic into a distribution over `vocabulary` indices.
///
/// Fails with `InvalidInput` on text between terms other than `+`, on an
/// empty topic, and on words the vocabulary does not know.
pub fn parse_topic_string(text: &str, vocabulary: &dyn Vocabulary) -> Result<SparseDistribution> {
    let mut pairs = Vec::new();
    let mut last_end = 0;

    for caps in TERM_RE.captures_iter(text) {
        let (Some(whole), Some(prob), Some(word)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let separator = text[last_end..whole.start()].trim();
        let expected = if pairs.is_empty() { "" } else { "+" };
        if separator != expected {
            return Err(DistanceError::invalid(format!(
                "unexpected '{separator}' before term '{}'",
                whole.as_str()
            )));
        }
        last_end = whole.end();

        let prob: f64 = prob.as_str().parse().map_err(|_| {
            DistanceError::invalid(format!("bad probability '{}'", prob.as_str()))
        })?;
        let word = word.as_str().trim();
        let id = vocabulary
            .token_id(word)
            .ok_or_else(|| DistanceError::invalid(format!("word '{word}' is not in the vocabulary")))?;
        pairs.push((id, prob));
    }

    let trailing = text[last_end..].trim();
    if !trailing.is_empty() {
        return Err(DistanceError::invalid(format!(
            "unexpected trailing text '{trailing}'"
        )));
    }
    if pairs.is_empty() {
        return Err(DistanceError::invalid("topic has no terms"));
    }

    Ok(SparseDistribution::new(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Dictionary;

    fn vocab() -> Dictionary {
        Dictionary::from_documents(&[vec!["bank", "water", "river", "money"]])
    }

    #[test]
    fn test_parse_basic() {
        let dist = parse_topic_string(r#"0.300*"bank" + 0.200*"water""#, &vocab()).unwrap();
        assert_eq!(dist.iter().collect::<Vec<_>>(), vec![(0, 0.3), (1, 0.2)]);
    }

    #[test]
    fn test_parse_scientific_notation() {
        let dist = parse_topic_string(r#"0.5*"river" + 5e-2*"money""#, &vocab()).unwrap();
        assert!((dist.get(3) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_word_rejected() {
        let err = parse_topic_string(r#"0.3*"tree""#, &vocab()).unwrap_err();
        assert!(err.to_string().contains("tree"));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(parse_topic_string("", &vocab()).is_err());
        assert!(parse_topic_string(r#"0.3*"bank" - 0.2*"water""#, &vocab()).is_err());
        assert!(parse_topic_string(r#"0.3*"bank" + junk"#, &vocab()).is_err());
    }
}
