use thiserror::Error;

use crate::fleet::CabId;
use crate::ledger::RideId;
use crate::network::NodeId;

/// Recoverable failures reported by dispatch operations.
///
/// A failed operation never mutates engine state. Running out of free cabs is not an
/// error: the pickup is queued and reported through [`crate::BookingOutcome::Queued`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("cab {0} already exists")]
    AlreadyExists(CabId),
    #[error("cab {0} is not registered")]
    UnknownCab(CabId),
    #[error("cab {0} is already on a ride")]
    CabBusy(CabId),
    #[error("pickup node {0} is not part of the road network")]
    InvalidPickup(NodeId),
    #[error("drop node {0} is not part of the road network")]
    InvalidDrop(NodeId),
    #[error("no road connects node {from} to node {to}")]
    Unreachable { from: NodeId, to: NodeId },
    #[error("cab {cab} cannot reach pickup node {pickup}")]
    UnreachablePickup { cab: CabId, pickup: NodeId },
    #[error("ride {0} is not active")]
    RideNotFound(RideId),
    #[error("fare for ride {ride} over distance {distance} does not fit in a u64")]
    FareOverflow { ride: RideId, distance: u64 },
}
