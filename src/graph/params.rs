use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of the small-world construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmallWorldParams {
    /// Number of nodes on the ring
    pub node_count: usize,
    /// Lattice neighbours per node (k/2 on each side), must be even
    pub neighbors: usize,
    /// Chance that each lattice edge gets rewired
    pub rewire_probability: f64,
    pub seed: u64,
}

impl Default for SmallWorldParams {
    fn default() -> Self {
        Self {
            node_count: 15,
            neighbors: 4,
            rewire_probability: 0.3,
            seed: 42,
        }
    }
}

impl SmallWorldParams {
    /// Parse parameters from JSON; omitted fields keep their default value
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let params: SmallWorldParams = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Check the construction preconditions
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.neighbors % 2 != 0 {
            return Err(ConfigurationError::OddNeighborCount(self.neighbors));
        }

        if self.node_count < self.neighbors + 1 {
            return Err(ConfigurationError::TooFewNodes {
                node_count: self.node_count,
                neighbors: self.neighbors,
            });
        }

        if !(0.0..=1.0).contains(&self.rewire_probability) {
            return Err(ConfigurationError::RewireProbabilityOutOfRange(
                self.rewire_probability,
            ));
        }

        Ok(())
    }

    /// Number of edges the construction always produces
    pub fn edge_count(&self) -> usize {
        self.node_count * self.neighbors / 2
    }
}

/// Graph parameters that cannot produce a valid puzzle
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    OddNeighborCount(usize),
    TooFewNodes { node_count: usize, neighbors: usize },
    RewireProbabilityOutOfRange(f64),
    Malformed(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::OddNeighborCount(k) => {
                write!(f, "Neighbour count {} must be even", k)
            }
            ConfigurationError::TooFewNodes {
                node_count,
                neighbors,
            } => write!(
                f,
                "{} nodes cannot host a ring lattice with {} neighbours (need at least {})",
                node_count,
                neighbors,
                neighbors + 1
            ),
            ConfigurationError::RewireProbabilityOutOfRange(p) => {
                write!(f, "Rewire probability {} is outside [0, 1]", p)
            }
            ConfigurationError::Malformed(reason) => {
                write!(f, "Malformed graph parameters: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = SmallWorldParams::default();

        assert_eq!(params.node_count, 15);
        assert_eq!(params.neighbors, 4);
        assert_eq!(params.seed, 42);
        assert!(params.validate().is_ok());
        assert_eq!(params.edge_count(), 30);
    }

    #[test]
    fn test_odd_neighbors_rejected() {
        let params = SmallWorldParams {
            neighbors: 3,
            ..Default::default()
        };

        assert_eq!(
            params.validate(),
            Err(ConfigurationError::OddNeighborCount(3))
        );
    }

    #[test]
    fn test_too_few_nodes_rejected() {
        let params = SmallWorldParams {
            node_count: 4,
            neighbors: 4,
            ..Default::default()
        };

        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::TooFewNodes { node_count: 4, .. })
        ));

        let just_enough = SmallWorldParams {
            node_count: 5,
            neighbors: 4,
            ..Default::default()
        };
        assert!(just_enough.validate().is_ok());
    }

    #[test]
    fn test_probability_bounds() {
        for p in [-0.1, 1.5, f64::NAN] {
            let params = SmallWorldParams {
                rewire_probability: p,
                ..Default::default()
            };
            assert!(
                matches!(
                    params.validate(),
                    Err(ConfigurationError::RewireProbabilityOutOfRange(_))
                ),
                "p = {} should be rejected",
                p
            );
        }
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let params = SmallWorldParams::from_json(r#"{ "seed": 7 }"#).unwrap();

        assert_eq!(params.seed, 7);
        assert_eq!(params.node_count, 15);
        assert_eq!(params.neighbors, 4);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            SmallWorldParams::from_json(r#"{ "neighbours": 4 }"#),
            Err(ConfigurationError::Malformed(_))
        ));
        assert!(matches!(
            SmallWorldParams::from_json("not json"),
            Err(ConfigurationError::Malformed(_))
        ));
        assert_eq!(
            SmallWorldParams::from_json(r#"{ "neighbors": 5, "node_count": 20 }"#),
            Err(ConfigurationError::OddNeighborCount(5))
        );
    }
}
