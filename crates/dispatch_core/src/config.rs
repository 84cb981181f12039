//! Engine and road network configuration.
//!
//! Both structs deserialize from partial documents: missing fields fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};

use crate::network::{NodeId, RoadNetwork};
use crate::pricing::FARE_PER_UNIT;

/// Road network used by the interactive front end when nothing else is configured.
pub const DEFAULT_NODE_COUNT: u32 = 10;

/// What a freed cab does when it cannot reach a queued pickup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogMissPolicy {
    /// Take the oldest pickup the cab can reach; unreachable ones stay queued in order.
    #[default]
    Retain,
    /// Pop the oldest pickup; if the cab cannot reach it the request is dropped.
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub fare_per_unit: u64,
    pub backlog_miss_policy: BacklogMissPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            fare_per_unit: FARE_PER_UNIT,
            backlog_miss_policy: BacklogMissPolicy::default(),
        }
    }
}

impl DispatchConfig {
    pub fn with_fare_per_unit(mut self, fare_per_unit: u64) -> Self {
        self.fare_per_unit = fare_per_unit;
        self
    }

    pub fn with_backlog_miss_policy(mut self, policy: BacklogMissPolicy) -> Self {
        self.backlog_miss_policy = policy;
        self
    }
}

/// One undirected road in a configured network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadSpec {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkConfig {
    /// Fully connected nodes `0..nodes`, road weight `|i - j|`.
    Linear { nodes: u32 },
    /// Explicit road list.
    Roads { roads: Vec<RoadSpec> },
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig::Linear {
            nodes: DEFAULT_NODE_COUNT,
        }
    }
}

impl NetworkConfig {
    pub fn build(&self) -> RoadNetwork {
        match self {
            NetworkConfig::Linear { nodes } => RoadNetwork::linear(*nodes),
            NetworkConfig::Roads { roads } => RoadNetwork::from_roads(
                roads.iter().map(|road| (road.from, road.to, road.weight)),
            ),
        }
    }
}
