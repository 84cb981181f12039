//! Ride ledger: active rides keyed by id plus the history of completed rides.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::fleet::CabId;
use crate::network::{NodeId, Route};
use crate::pricing::calculate_fare;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideId(pub u64);

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RideId {
    fn from(raw: u64) -> Self {
        RideId(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RidePhase {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    pub cab: CabId,
    pub pickup: NodeId,
    /// Set once the ride is completed.
    pub drop: Option<NodeId>,
    /// Road distance the cab covered to reach the pickup.
    pub pickup_distance: u64,
    /// Pickup to drop distance; 0 while in progress.
    pub distance: u64,
    /// 0 while in progress.
    pub fare: u64,
    /// Approach leg (cab origin to pickup) while in progress, pickup to drop once completed.
    pub path: Vec<NodeId>,
    pub phase: RidePhase,
}

#[derive(Debug, Clone)]
pub struct RideLedger {
    next_id: u64,
    active: BTreeMap<RideId, Ride>,
    completed: Vec<Ride>,
}

impl Default for RideLedger {
    fn default() -> Self {
        Self {
            next_id: 1,
            active: BTreeMap::new(),
            completed: Vec::new(),
        }
    }
}

impl RideLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next ride will receive.
    pub fn next_ride_id(&self) -> RideId {
        RideId(self.next_id)
    }

    /// Open an in-progress ride for `cab` whose approach to `pickup` follows `approach`.
    pub fn begin_ride(&mut self, cab: CabId, pickup: NodeId, approach: Route) -> Ride {
        let id = RideId(self.next_id);
        self.next_id += 1;

        let ride = Ride {
            id,
            cab,
            pickup,
            drop: None,
            pickup_distance: approach.distance,
            distance: 0,
            fare: 0,
            path: approach.path,
            phase: RidePhase::InProgress,
        };
        self.active.insert(id, ride.clone());
        ride
    }

    /// Complete an active ride at `drop` along `trip`, moving it into the history.
    ///
    /// The ride stays active when the fare does not fit in a `u64`.
    pub fn end_ride(
        &mut self,
        id: RideId,
        drop: NodeId,
        trip: Route,
        fare_per_unit: u64,
    ) -> Result<Ride, DispatchError> {
        if !self.active.contains_key(&id) {
            return Err(DispatchError::RideNotFound(id));
        }
        let fare = calculate_fare(trip.distance, fare_per_unit).ok_or(
            DispatchError::FareOverflow {
                ride: id,
                distance: trip.distance,
            },
        )?;
        let mut ride = self
            .active
            .remove(&id)
            .ok_or(DispatchError::RideNotFound(id))?;

        ride.drop = Some(drop);
        ride.distance = trip.distance;
        ride.fare = fare;
        ride.path = trip.path;
        ride.phase = RidePhase::Completed;

        self.completed.push(ride.clone());
        Ok(ride)
    }

    /// Drop an active ride without recording it as completed.
    pub fn cancel_ride(&mut self, id: RideId) -> Result<Ride, DispatchError> {
        self.active
            .remove(&id)
            .ok_or(DispatchError::RideNotFound(id))
    }

    pub fn get_active(&self, id: RideId) -> Option<&Ride> {
        self.active.get(&id)
    }

    pub fn active_ride_for_cab(&self, cab: CabId) -> Option<&Ride> {
        self.active.values().find(|ride| ride.cab == cab)
    }

    /// Active rides in ascending id order.
    pub fn active_rides(&self) -> impl Iterator<Item = &Ride> + '_ {
        self.active.values()
    }

    /// Completed rides in completion order.
    pub fn completed_rides(&self) -> &[Ride] {
        &self.completed
    }

    /// Forget every active ride without recording anything. The id counter keeps counting.
    pub(crate) fn clear_active(&mut self) -> usize {
        let cleared = self.active.len();
        self.active.clear();
        cleared
    }
}
