//! Dispatch engine: matches pickups to cabs and drives the ride lifecycle.
//!
//! Cab lifecycle as seen by the engine:
//!
//! ```text
//! Available --match--> OnRide --end--> Available --match--> OnRide
//!                        |                ^
//!                        +---cancel---> Canceled (still free)
//! ```
//!
//! Whenever a ride ends or is canceled the freed cab is offered to the backlog first, so
//! a waiting pickup is served before the cab shows up as free.
//!
//! Every operation validates before it mutates: an `Err` leaves the engine untouched.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backlog::Backlog;
use crate::config::{BacklogMissPolicy, DispatchConfig};
use crate::error::DispatchError;
use crate::fleet::{Cab, CabId, CabStatus, FleetRegistry};
use crate::ledger::{Ride, RideId, RideLedger};
use crate::matching::{MatchingAlgorithm, NearestCabMatching};
use crate::network::{NodeId, RoadNetwork, Route};
use crate::snapshot::DispatchSnapshot;

/// Result of a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    /// A cab was matched and a ride opened.
    Booked { ride: Ride },
    /// No free cab could reach the pickup; it waits in the backlog at `position` (1-based).
    Queued { pickup: NodeId, position: usize },
}

/// Result of ending or canceling a ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RideClosure {
    /// The ride as it left the active set: completed after an end, untouched after a cancel.
    pub ride: Ride,
    /// Status of the freed cab once the backlog has been offered to it.
    pub cab_status: CabStatus,
    /// Queued pickup the cab was immediately assigned to, if any.
    pub reassigned: Option<Ride>,
    /// Queued pickup dropped because the cab could not reach it
    /// (only under [`BacklogMissPolicy::Discard`]).
    pub discarded: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub rides_cleared: usize,
    pub backlog_cleared: usize,
}

#[derive(Debug)]
pub struct DispatchEngine {
    config: DispatchConfig,
    network: RoadNetwork,
    fleet: FleetRegistry,
    ledger: RideLedger,
    backlog: Backlog,
    matching: Box<dyn MatchingAlgorithm>,
}

impl DispatchEngine {
    pub fn new(network: RoadNetwork, config: DispatchConfig) -> Self {
        Self::with_fleet(network, FleetRegistry::new(), config)
    }

    /// Build an engine around an existing fleet, e.g. one restored from disk.
    pub fn with_fleet(network: RoadNetwork, fleet: FleetRegistry, config: DispatchConfig) -> Self {
        Self {
            config,
            network,
            fleet,
            ledger: RideLedger::new(),
            backlog: Backlog::new(),
            matching: Box::new(NearestCabMatching),
        }
    }

    pub fn with_matching_algorithm(mut self, matching: Box<dyn MatchingAlgorithm>) -> Self {
        self.matching = matching;
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn fleet(&self) -> &FleetRegistry {
        &self.fleet
    }

    pub fn ledger(&self) -> &RideLedger {
        &self.ledger
    }

    pub fn backlog(&self) -> &Backlog {
        &self.backlog
    }

    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot::capture(self)
    }

    pub fn add_road(&mut self, a: NodeId, b: NodeId, weight: u32) {
        self.network.add_road(a, b, weight);
    }

    pub fn add_cab(
        &mut self,
        id: CabId,
        driver: impl Into<String>,
        location: NodeId,
    ) -> Result<&Cab, DispatchError> {
        if !self.network.contains(location) {
            warn!(cab = %id, location = %location, "cab placed on a node outside the road network");
        }
        let cab = self.fleet.add_cab(id, driver, location)?;
        info!(cab = %cab.id, driver = %cab.driver, location = %cab.location, "cab registered");
        Ok(cab)
    }

    /// Match `pickup` to the nearest free cab, or queue it when no free cab can reach it.
    pub fn book_ride(&mut self, pickup: NodeId) -> Result<BookingOutcome, DispatchError> {
        if !self.network.contains(pickup) {
            return Err(DispatchError::InvalidPickup(pickup));
        }

        let free_cabs: Vec<(CabId, NodeId)> = self
            .fleet
            .free_cabs()
            .map(|cab| (cab.id, cab.location))
            .collect();

        let Some(candidate) = self.matching.find_match(&self.network, pickup, &free_cabs) else {
            let position = self.backlog.enqueue(pickup);
            info!(
                pickup = %pickup,
                position,
                free_cabs = free_cabs.len(),
                "no reachable cab, pickup queued"
            );
            return Ok(BookingOutcome::Queued { pickup, position });
        };

        debug!(
            cab = %candidate.cab,
            distance = candidate.route.distance,
            candidates = free_cabs.len(),
            "nearest cab selected"
        );
        let ride = self.open_ride(candidate.cab, pickup, candidate.route)?;
        info!(ride = %ride.id, cab = %ride.cab, pickup = %pickup, "ride booked");
        Ok(BookingOutcome::Booked { ride })
    }

    /// Assign `pickup` directly to `cab`, skipping the nearest-cab search.
    ///
    /// This is how a freed cab picks up a queued request; the caller owns removing the
    /// pickup from the backlog.
    pub fn assign_from_backlog(
        &mut self,
        cab: CabId,
        pickup: NodeId,
    ) -> Result<Ride, DispatchError> {
        let location = self
            .fleet
            .get(cab)
            .ok_or(DispatchError::UnknownCab(cab))?
            .location;
        if !self.network.contains(pickup) {
            return Err(DispatchError::InvalidPickup(pickup));
        }
        if self.ledger.active_ride_for_cab(cab).is_some() {
            return Err(DispatchError::CabBusy(cab));
        }
        let approach = self
            .network
            .shortest_path(location, pickup)
            .ok_or(DispatchError::UnreachablePickup { cab, pickup })?;

        let ride = self.open_ride(cab, pickup, approach)?;
        info!(ride = %ride.id, cab = %cab, pickup = %pickup, "queued pickup assigned");
        Ok(ride)
    }

    /// Complete an active ride at `drop`, then offer the freed cab to the backlog.
    pub fn end_ride(
        &mut self,
        ride_id: RideId,
        drop: NodeId,
    ) -> Result<RideClosure, DispatchError> {
        let pickup = self
            .ledger
            .get_active(ride_id)
            .ok_or(DispatchError::RideNotFound(ride_id))?
            .pickup;
        if !self.network.contains(drop) {
            return Err(DispatchError::InvalidDrop(drop));
        }
        let trip = self
            .network
            .shortest_path(pickup, drop)
            .ok_or(DispatchError::Unreachable {
                from: pickup,
                to: drop,
            })?;

        let ride = self
            .ledger
            .end_ride(ride_id, drop, trip, self.config.fare_per_unit)?;
        self.fleet.set_location(ride.cab, drop)?;
        info!(
            ride = %ride.id,
            cab = %ride.cab,
            drop = %drop,
            distance = ride.distance,
            fare = ride.fare,
            "ride completed"
        );

        self.release_cab(ride, CabStatus::Available)
    }

    /// Cancel an active ride without a completion record, then offer the cab to the backlog.
    pub fn cancel_ride(&mut self, ride_id: RideId) -> Result<RideClosure, DispatchError> {
        let ride = self.ledger.cancel_ride(ride_id)?;
        self.fleet.set_status(ride.cab, CabStatus::Canceled)?;
        info!(ride = %ride.id, cab = %ride.cab, "ride canceled");

        self.release_cab(ride, CabStatus::Canceled)
    }

    /// Hard reset: forget active rides and queued pickups, every cab back to available.
    /// Completed rides and the ride id counter survive.
    pub fn reset_availability(&mut self) -> ResetSummary {
        let rides_cleared = self.ledger.clear_active();
        let backlog_cleared = self.backlog.clear();
        self.fleet.reset_statuses();
        info!(
            rides_cleared,
            backlog_cleared,
            cabs = self.fleet.len(),
            "all cabs set to available"
        );
        ResetSummary {
            rides_cleared,
            backlog_cleared,
        }
    }

    fn open_ride(
        &mut self,
        cab: CabId,
        pickup: NodeId,
        approach: Route,
    ) -> Result<Ride, DispatchError> {
        self.fleet.set_status(cab, CabStatus::OnRide)?;
        // The cab is treated as being at the pickup from the moment it is matched.
        self.fleet.set_location(cab, pickup)?;
        Ok(self.ledger.begin_ride(cab, pickup, approach))
    }

    fn release_cab(
        &mut self,
        ride: Ride,
        idle_status: CabStatus,
    ) -> Result<RideClosure, DispatchError> {
        let (reassigned, discarded) = self.drain_backlog(ride.cab)?;

        let cab_status = if reassigned.is_some() {
            CabStatus::OnRide
        } else {
            self.fleet.set_status(ride.cab, idle_status)?;
            idle_status
        };

        Ok(RideClosure {
            ride,
            cab_status,
            reassigned,
            discarded,
        })
    }

    fn drain_backlog(
        &mut self,
        cab: CabId,
    ) -> Result<(Option<Ride>, Option<NodeId>), DispatchError> {
        if self.backlog.is_empty() {
            return Ok((None, None));
        }

        match self.config.backlog_miss_policy {
            BacklogMissPolicy::Retain => {
                let location = self
                    .fleet
                    .get(cab)
                    .ok_or(DispatchError::UnknownCab(cab))?
                    .location;
                let network = &self.network;
                let Some((pickup, approach)) = self
                    .backlog
                    .take_first_with(|pickup| network.shortest_path(location, pickup))
                else {
                    warn!(
                        cab = %cab,
                        location = %location,
                        queued = self.backlog.len(),
                        "freed cab cannot reach any queued pickup, backlog kept"
                    );
                    return Ok((None, None));
                };

                let ride = self.open_ride(cab, pickup, approach)?;
                info!(ride = %ride.id, cab = %cab, pickup = %pickup, "queued pickup assigned");
                Ok((Some(ride), None))
            }
            BacklogMissPolicy::Discard => {
                let Some(pickup) = self.backlog.dequeue() else {
                    return Ok((None, None));
                };
                match self.assign_from_backlog(cab, pickup) {
                    Ok(ride) => Ok((Some(ride), None)),
                    Err(err) => {
                        warn!(
                            cab = %cab,
                            pickup = %pickup,
                            error = %err,
                            "queued pickup discarded"
                        );
                        Ok((None, Some(pickup)))
                    }
                }
            }
        }
    }
}
