use std::env;

use anyhow::{Context, Result};

use crate::graph::DEFAULT_EDGE_THRESHOLD;
use crate::metrics::Metric;

/// Topic models usually drop topics below this mass.
pub const DEFAULT_MINIMUM_PROBABILITY: f64 = 1e-8;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command
/// line flags take precedence over anything set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Weight above which a graph edge is strong (DOCDIST_EDGE_THRESHOLD)
    pub edge_threshold: f64,
    /// Entries of distribution inputs below this are dropped
    /// (DOCDIST_MINIMUM_PROBABILITY)
    pub minimum_probability: f64,
    /// Metric used by `docdist distance` when none is given (DOCDIST_METRIC)
    pub default_metric: Metric,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            minimum_probability: DEFAULT_MINIMUM_PROBABILITY,
            default_metric: Metric::Hellinger,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set but malformed ones are an
    /// error naming the variable.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let edge_threshold = match lookup("DOCDIST_EDGE_THRESHOLD") {
            Some(raw) => parse_f64("DOCDIST_EDGE_THRESHOLD", &raw)?,
            None => defaults.edge_threshold,
        };

        let minimum_probability = match lookup("DOCDIST_MINIMUM_PROBABILITY") {
            Some(raw) => {
                let value = parse_f64("DOCDIST_MINIMUM_PROBABILITY", &raw)?;
                if value < 0.0 {
                    anyhow::bail!("DOCDIST_MINIMUM_PROBABILITY must not be negative, got {value}");
                }
                value
            }
            None => defaults.minimum_probability,
        };

        let default_metric = match lookup("DOCDIST_METRIC") {
            Some(raw) => raw
                .parse::<Metric>()
                .with_context(|| format!("DOCDIST_METRIC is not a known metric: '{raw}'"))?,
            None => defaults.default_metric,
        };

        Ok(Self {
            edge_threshold,
            minimum_probability,
            default_metric,
        })
    }
}

fn parse_f64(key: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a number, got '{raw}'"))?;
    if !value.is_finite() {
        anyhow::bail!("{key} must be finite, got '{raw}'");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.edge_threshold, 1.25);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DOCDIST_EDGE_THRESHOLD", "2.0"),
            ("DOCDIST_MINIMUM_PROBABILITY", "0.01"),
            ("DOCDIST_METRIC", "jensen-shannon"),
        ]))
        .unwrap();
        assert_eq!(config.edge_threshold, 2.0);
        assert_eq!(config.minimum_probability, 0.01);
        assert_eq!(config.default_metric, Metric::JensenShannon);
    }

    #[test]
    fn test_malformed_values_name_the_variable() {
        let err = Config::from_lookup(lookup(&[("DOCDIST_EDGE_THRESHOLD", "high")])).unwrap_err();
        assert!(err.to_string().contains("DOCDIST_EDGE_THRESHOLD"));

        let err = Config::from_lookup(lookup(&[("DOCDIST_METRIC", "euclid")])).unwrap_err();
        assert!(err.to_string().contains("DOCDIST_METRIC"));

        let err =
            Config::from_lookup(lookup(&[("DOCDIST_MINIMUM_PROBABILITY", "-1")])).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }
}
