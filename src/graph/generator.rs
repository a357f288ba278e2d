use super::centrality::CentralityScores;
use super::node::NodeId;
use super::params::{ConfigurationError, SmallWorldParams};
use super::small_world::SmallWorldGraph;

use log::{debug, info};

/// Builds the puzzle network and works out which node is the answer
#[derive(Debug, Clone, Default)]
pub struct PuzzleGraphGenerator {
    params: SmallWorldParams,
}

/// A built puzzle: the network, its closeness scores and the answer node
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleGraph {
    pub graph: SmallWorldGraph,
    pub scores: CentralityScores,
    /// Most central node, lowest id on ties
    pub ground_truth: NodeId,
}

impl PuzzleGraphGenerator {
    pub fn new(params: SmallWorldParams) -> Self {
        PuzzleGraphGenerator { params }
    }

    pub fn params(&self) -> &SmallWorldParams {
        &self.params
    }

    /// Build the graph and its ground truth
    ///
    /// The same parameters always yield the same edges and the same answer,
    /// so rebuilding mid-session can never move the ground truth.
    pub fn build(&self) -> Result<PuzzleGraph, ConfigurationError> {
        let graph = SmallWorldGraph::watts_strogatz(&self.params)?;
        let scores = CentralityScores::closeness(&graph);
        let ground_truth = most_central(&scores, &self.params)?;

        let tied = scores.tied_with_max();
        if tied.len() > 1 {
            debug!(
                "Closeness tie between nodes {:?}, picking node {}",
                tied, ground_truth
            );
        }

        info!(
            "Puzzle graph ready: {} nodes, {} edges (seed {})",
            graph.node_count(),
            graph.edge_count(),
            self.params.seed
        );

        Ok(PuzzleGraph {
            graph,
            scores,
            ground_truth,
        })
    }
}

/// Lowest-id node with the top closeness score
///
/// `validate()` already rejects graphs without nodes, so an empty table is
/// reported as the same configuration error rather than defaulting to node 0.
fn most_central(
    scores: &CentralityScores,
    params: &SmallWorldParams,
) -> Result<NodeId, ConfigurationError> {
    scores
        .argmax()
        .ok_or(ConfigurationError::TooFewNodes {
            node_count: params.node_count,
            neighbors: params.neighbors,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ground truth for the default parameters (15 nodes, k = 4, p = 0.3, seed 42)
    const EXPECTED_GROUND_TRUTH: NodeId = NodeId(10);

    #[test]
    fn test_default_ground_truth() {
        let puzzle = PuzzleGraphGenerator::default().build().unwrap();

        assert_eq!(puzzle.ground_truth, EXPECTED_GROUND_TRUTH);
    }

    #[test]
    fn test_default_ground_truth_is_a_tie() {
        let puzzle = PuzzleGraphGenerator::default().build().unwrap();

        // Nodes 10 and 13 both sit at total distance 23 from everyone else
        assert_eq!(puzzle.scores.tied_with_max(), vec![NodeId(10), NodeId(13)]);
        assert_eq!(puzzle.scores.get(NodeId(10)), 1.0 / 23.0);
    }

    #[test]
    fn test_build_is_reproducible() {
        let generator = PuzzleGraphGenerator::default();
        let first = generator.build().unwrap();

        for _ in 0..5 {
            let again = generator.build().unwrap();
            assert_eq!(again.graph.edges().sorted(), first.graph.edges().sorted());
            assert_eq!(again.ground_truth, first.ground_truth);
        }
    }

    #[test]
    fn test_ground_truth_is_lowest_maximum_for_many_seeds() {
        for seed in 0..50 {
            let generator = PuzzleGraphGenerator::new(SmallWorldParams {
                seed,
                ..Default::default()
            });
            let puzzle = generator.build().unwrap();

            assert!(puzzle.ground_truth.index() < 15);

            let best = puzzle.scores.get(puzzle.ground_truth);
            for (node, score) in puzzle.scores.iter() {
                assert!(score <= best, "seed {}: node {} beats the answer", seed, node);
                if score == best {
                    assert!(node >= puzzle.ground_truth, "seed {}: tie not broken low", seed);
                }
            }
        }
    }

    #[test]
    fn test_empty_score_table_has_no_answer() {
        let params = SmallWorldParams {
            node_count: 0,
            ..Default::default()
        };
        let scores = CentralityScores::closeness(&SmallWorldGraph::empty(0));

        assert_eq!(
            most_central(&scores, &params),
            Err(ConfigurationError::TooFewNodes {
                node_count: 0,
                neighbors: 4
            })
        );
    }

    #[test]
    fn test_generator_keeps_its_params() {
        let params = SmallWorldParams {
            rewire_probability: 0.0,
            seed: 7,
            ..Default::default()
        };
        let generator = PuzzleGraphGenerator::new(params);

        assert_eq!(generator.params(), &params);
        assert_eq!(
            generator.build().unwrap().graph,
            SmallWorldGraph::ring_lattice(15, 4)
        );
    }

    #[test]
    fn test_build_rejects_bad_params() {
        let generator = PuzzleGraphGenerator::new(SmallWorldParams {
            neighbors: 5,
            ..Default::default()
        });

        assert_eq!(
            generator.build(),
            Err(ConfigurationError::OddNeighborCount(5))
        );
    }
}
