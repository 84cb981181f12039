//! Cab dispatch over a weighted road network.
//!
//! The [`engine::DispatchEngine`] owns every piece of state: the road network, the fleet,
//! the ride ledger and the backlog of unmatched pickups. Operations return outcome values
//! and never print; rendering and persistence live outside the engine.

pub mod backlog;
pub mod config;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod fleet_store;
pub mod ledger;
pub mod matching;
pub mod network;
pub mod pricing;
pub mod snapshot;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use engine::{BookingOutcome, DispatchEngine, RideClosure};
pub use error::DispatchError;
pub use fleet::{Cab, CabId, CabStatus};
pub use ledger::{Ride, RideId, RidePhase};
pub use network::{NodeId, RoadNetwork, Route};
