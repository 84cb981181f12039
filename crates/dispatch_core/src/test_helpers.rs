//! Test helpers for common engine setup.
//!
//! Shared by unit tests, integration tests and benchmarks so every scenario starts from the
//! same road network.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{DispatchConfig, DEFAULT_NODE_COUNT};
use crate::engine::DispatchEngine;
use crate::fleet::CabId;
use crate::network::{NodeId, RoadNetwork};

/// Nodes `0..10`, every pair connected, road weight `|i - j|`.
pub fn reference_network() -> RoadNetwork {
    RoadNetwork::linear(DEFAULT_NODE_COUNT)
}

/// Engine over `network` with one cab per `(id, location)` pair, driver named `driver-<id>`.
///
/// # Panics
///
/// Panics if `cabs` repeats an id.
pub fn engine_with_cabs(
    network: RoadNetwork,
    config: DispatchConfig,
    cabs: &[(u32, u32)],
) -> DispatchEngine {
    let mut engine = DispatchEngine::new(network, config);
    for &(id, location) in cabs {
        engine
            .add_cab(CabId(id), format!("driver-{id}"), NodeId(location))
            .expect("cab ids in test fixtures must be unique");
    }
    engine
}

/// [`engine_with_cabs`] over the [`reference_network`] with the default configuration.
pub fn reference_engine(cabs: &[(u32, u32)]) -> DispatchEngine {
    engine_with_cabs(reference_network(), DispatchConfig::default(), cabs)
}

/// Seeded random network over nodes `0..nodes` with `roads` roads of weight `0..=max_weight`.
///
/// A spanning chain `0 - 1 - ... - (nodes - 1)` is laid first so every node exists and
/// the network is connected; the remaining roads are random and may be parallel.
pub fn random_network(seed: u64, nodes: u32, roads: usize, max_weight: u32) -> RoadNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut network = RoadNetwork::new();

    for node in 1..nodes {
        network.add_road(NodeId(node - 1), NodeId(node), rng.gen_range(0..=max_weight));
    }
    while nodes > 1 && network.road_count() < roads {
        let a = rng.gen_range(0..nodes);
        let b = rng.gen_range(0..nodes);
        network.add_road(NodeId(a), NodeId(b), rng.gen_range(0..=max_weight));
    }
    network
}
