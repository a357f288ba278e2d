use serde::Serialize;
use std::fmt;

/// Node identifier, an index into `0..node_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    pub const fn index(&self) -> usize {
        self.0
    }

    /// The node `offset` steps further around a ring of `node_count` nodes
    pub const fn ring_offset(&self, offset: usize, node_count: usize) -> Self {
        NodeId((self.0 + offset) % node_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_offset_wraps() {
        assert_eq!(NodeId(3).ring_offset(2, 15), NodeId(5));
        assert_eq!(NodeId(14).ring_offset(1, 15), NodeId(0));
        assert_eq!(NodeId(13).ring_offset(2, 15), NodeId(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeId(7).to_string(), "7");
    }
}
