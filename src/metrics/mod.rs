// Distance metrics: Hellinger, Jaccard and friends.

pub mod cosine;
pub mod divergence;
pub mod hellinger;
pub mod jaccard;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::SparseDistribution;
use crate::errors::{DistanceError, Result};

pub use cosine::cosine_distance;
pub use divergence::{jensen_shannon, kullback_leibler};
pub use hellinger::{hellinger_dense, hellinger_distance};
pub use jaccard::{
    jaccard_distance, jaccard_distance_with, jaccard_set_distance, weighted_jaccard_distance,
};

/// A distance measure that can be applied to two sparse distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    Hellinger,
    /// Set Jaccard over the supports (indices with positive mass).
    Jaccard,
    KullbackLeibler,
    JensenShannon,
    Cosine,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Hellinger,
        Metric::Jaccard,
        Metric::KullbackLeibler,
        Metric::JensenShannon,
        Metric::Cosine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Hellinger => "hellinger",
            Metric::Jaccard => "jaccard",
            Metric::KullbackLeibler => "kullback-leibler",
            Metric::JensenShannon => "jensen-shannon",
            Metric::Cosine => "cosine",
        }
    }

    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Metric::KullbackLeibler)
    }

    /// Whether the measure is a true metric (triangle inequality holds).
    pub fn obeys_triangle_inequality(&self) -> bool {
        matches!(self, Metric::Hellinger | Metric::Jaccard)
    }

    /// Whether results are guaranteed to lie in [0, 1].
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Metric::KullbackLeibler)
    }

    pub fn distance(&self, p: &SparseDistribution, q: &SparseDistribution) -> Result<f64> {
        match self {
            Metric::Hellinger => hellinger_distance(p, q),
            Metric::Jaccard => {
                p.validate()?;
                q.validate()?;
                Ok(jaccard_set_distance(&support(p), &support(q)))
            }
            Metric::KullbackLeibler => kullback_leibler(p, q),
            Metric::JensenShannon => jensen_shannon(p, q),
            Metric::Cosine => {
                p.validate()?;
                q.validate()?;
                Ok(cosine_distance(p, q))
            }
        }
    }
}

fn support(dist: &SparseDistribution) -> HashSet<u32> {
    dist.iter().filter(|&(_, p)| p > 0.0).map(|(i, _)| i).collect()
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "hellinger" => Ok(Metric::Hellinger),
            "jaccard" => Ok(Metric::Jaccard),
            "kullback-leibler" | "kl" => Ok(Metric::KullbackLeibler),
            "jensen-shannon" | "js" => Ok(Metric::JensenShannon),
            "cosine" => Ok(Metric::Cosine),
            _ => Err(DistanceError::invalid(format!("unknown metric '{s}'"))),
        }
    }
}
