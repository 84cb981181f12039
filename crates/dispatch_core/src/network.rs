//! Road network: a weighted undirected graph over integer node ids.
//!
//! Nodes exist only through the roads that touch them. Parallel roads between the same
//! pair of nodes are kept side by side (they model alternate routes), and the shortest
//! path search simply prefers the cheapest one.
//!
//! Every [`RoadNetwork::shortest_path`] call runs a fresh Dijkstra search; nothing is
//! cached, so a route always reflects the roads present at the time of the query.
//!
//! Road weights are `u32` while route distances are `u64`: a simple path has fewer than
//! 2^32 roads, so no route sum can overflow.

use std::collections::BTreeMap;
use std::fmt;

use pathfinding::prelude::dijkstra;
use serde::{Deserialize, Serialize};

/// Opaque location identifier in the road network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        NodeId(raw)
    }
}

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Sum of road weights along `path`.
    pub distance: u64,
    /// Nodes visited in order, origin first and destination last.
    pub path: Vec<NodeId>,
}

impl Route {
    pub fn origin(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.path.last().copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    adjacency: BTreeMap<NodeId, Vec<(NodeId, u32)>>,
    road_count: usize,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully connected network over nodes `0..nodes`, weighting each road with `weight(i, j)`.
    ///
    /// Fewer than two nodes produce no roads and therefore an empty network.
    pub fn complete(nodes: u32, weight: impl Fn(u32, u32) -> u32) -> Self {
        let mut network = Self::new();
        for i in 0..nodes {
            for j in (i + 1)..nodes {
                network.add_road(NodeId(i), NodeId(j), weight(i, j));
            }
        }
        network
    }

    /// Fully connected network over `0..nodes` where the road between `i` and `j`
    /// weighs `|i - j|`.
    pub fn linear(nodes: u32) -> Self {
        Self::complete(nodes, |i, j| i.abs_diff(j))
    }

    pub fn from_roads<I>(roads: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, u32)>,
    {
        let mut network = Self::new();
        for (a, b, weight) in roads {
            network.add_road(a, b, weight);
        }
        network
    }

    /// Insert an undirected road, creating either endpoint if it is new.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, weight: u32) {
        self.adjacency.entry(a).or_default().push((b, weight));
        self.adjacency.entry(b).or_default().push((a, weight));
        self.road_count += 1;
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn road_count(&self) -> usize {
        self.road_count
    }

    /// Known nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Roads leaving `node` as `(neighbor, weight)` pairs, parallel roads included.
    /// Weights are widened to the distance type.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, u64)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flatten()
            .map(|&(next, weight)| (next, u64::from(weight)))
    }

    /// Shortest route from `from` to `to`, or `None` when either node is unknown or no
    /// road sequence connects them. A node routes to itself with distance 0.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Route> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        let (path, distance) = dijkstra(&from, |node| self.neighbors(*node), |node| *node == to)?;
        Some(Route { distance, path })
    }
}
