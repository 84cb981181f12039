//! Fare calculation for completed rides.

/// Fare charged per unit of road distance between pickup and drop.
pub const FARE_PER_UNIT: u64 = 10;

/// Fare for a ride of `distance` road units: `distance * per_unit`, or `None` when the
/// product does not fit in a `u64`.
pub fn calculate_fare(distance: u64, per_unit: u64) -> Option<u64> {
    distance.checked_mul(per_unit)
}
