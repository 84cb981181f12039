//! Cab selection for a pickup request.

use std::cmp::Ordering;
use std::fmt;

use crate::fleet::CabId;
use crate::network::{NodeId, RoadNetwork, Route};

/// A cab that can reach the pickup, together with its approach route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub cab: CabId,
    pub route: Route,
}

/// Chooses which free cab serves a pickup.
///
/// Implementations receive every free cab as `(cab, location)` pairs and must return `None`
/// when none of them can reach `pickup`; the engine then queues the request.
pub trait MatchingAlgorithm: fmt::Debug + Send + Sync {
    fn find_match(
        &self,
        network: &RoadNetwork,
        pickup: NodeId,
        free_cabs: &[(CabId, NodeId)],
    ) -> Option<MatchCandidate>;
}

/// Shortest road distance wins; equal distances go to the lowest cab id.
///
/// Runs one shortest-path query per free cab, so a booking costs
/// O(cabs * (V + E) log V).
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestCabMatching;

impl MatchingAlgorithm for NearestCabMatching {
    fn find_match(
        &self,
        network: &RoadNetwork,
        pickup: NodeId,
        free_cabs: &[(CabId, NodeId)],
    ) -> Option<MatchCandidate> {
        let mut best: Option<MatchCandidate> = None;

        for &(cab, location) in free_cabs {
            let Some(route) = network.shortest_path(location, pickup) else {
                continue;
            };
            let candidate = MatchCandidate { cab, route };
            best = match best {
                Some(current) if !is_better(&candidate, &current) => Some(current),
                _ => Some(candidate),
            };
        }

        best
    }
}

fn is_better(candidate: &MatchCandidate, current: &MatchCandidate) -> bool {
    let ordering = candidate
        .route
        .distance
        .cmp(&current.route.distance)
        .then_with(|| candidate.cab.cmp(&current.cab));
    ordering == Ordering::Less
}
