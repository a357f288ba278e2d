mod centrality;
mod edge;
mod generator;
mod node;
mod params;
mod small_world;
mod snapshot;

pub use centrality::CentralityScores;
pub use edge::{Edge, EdgeSet};
pub use generator::{PuzzleGraph, PuzzleGraphGenerator};
pub use node::NodeId;
pub use params::{ConfigurationError, SmallWorldParams};
pub use small_world::SmallWorldGraph;
pub use snapshot::GraphSnapshot;
