//! Read-only views of engine state for rendering or export.

use std::collections::HashMap;

use serde::Serialize;

use crate::engine::DispatchEngine;
use crate::fleet::{CabId, CabStatus};
use crate::ledger::{Ride, RideId};
use crate::network::NodeId;

/// One cab with its display status derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabSnapshot {
    pub id: CabId,
    pub driver: String,
    pub location: NodeId,
    pub status: CabStatus,
    /// Active ride served by this cab, if any.
    pub ride: Option<RideId>,
}

impl CabSnapshot {
    pub fn is_available(&self) -> bool {
        self.status == CabStatus::Available
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BacklogSnapshot {
    /// 1-based queue position.
    pub position: usize,
    pub pickup: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSnapshot {
    pub cabs: Vec<CabSnapshot>,
    pub active_rides: Vec<Ride>,
    pub completed_rides: Vec<Ride>,
    pub backlog: Vec<BacklogSnapshot>,
}

impl DispatchSnapshot {
    pub fn capture(engine: &DispatchEngine) -> Self {
        let ledger = engine.ledger();
        let ride_by_cab: HashMap<CabId, RideId> = ledger
            .active_rides()
            .map(|ride| (ride.cab, ride.id))
            .collect();

        let cabs = engine
            .fleet()
            .iter()
            .map(|cab| {
                let ride = ride_by_cab.get(&cab.id).copied();
                CabSnapshot {
                    id: cab.id,
                    driver: cab.driver.clone(),
                    location: cab.location,
                    status: if ride.is_some() {
                        CabStatus::OnRide
                    } else {
                        cab.status
                    },
                    ride,
                }
            })
            .collect();

        let backlog = engine
            .backlog()
            .peek_all()
            .enumerate()
            .map(|(index, pickup)| BacklogSnapshot {
                position: index + 1,
                pickup,
            })
            .collect();

        Self {
            cabs,
            active_rides: ledger.active_rides().cloned().collect(),
            completed_rides: ledger.completed_rides().to_vec(),
            backlog,
        }
    }
}
