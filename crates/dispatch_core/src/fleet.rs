//! Fleet registry: every cab ever registered, keyed by id.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::network::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CabId(pub u32);

impl fmt::Display for CabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CabId {
    fn from(raw: u32) -> Self {
        CabId(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CabStatus {
    Available,
    OnRide,
    /// Free again after its last ride was canceled. Cleared by the next assignment or a reset.
    Canceled,
}

impl CabStatus {
    /// Whether the cab may be offered a pickup.
    pub fn is_free(self) -> bool {
        matches!(self, CabStatus::Available | CabStatus::Canceled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cab {
    pub id: CabId,
    pub driver: String,
    pub location: NodeId,
    pub status: CabStatus,
}

impl Cab {
    pub fn new(id: CabId, driver: impl Into<String>, location: NodeId) -> Self {
        Self {
            id,
            driver: driver.into(),
            location,
            status: CabStatus::Available,
        }
    }
}

/// Owns the cabs. Cabs are never removed, so an id stays taken for the registry's lifetime.
#[derive(Debug, Clone, Default)]
pub struct FleetRegistry {
    cabs: BTreeMap<CabId, Cab>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, available cab. Fails if the id is already taken.
    pub fn add_cab(
        &mut self,
        id: CabId,
        driver: impl Into<String>,
        location: NodeId,
    ) -> Result<&Cab, DispatchError> {
        self.insert(Cab::new(id, driver, location))
    }

    /// Register a cab with whatever status it carries (used when restoring a saved fleet).
    pub(crate) fn insert(&mut self, cab: Cab) -> Result<&Cab, DispatchError> {
        use std::collections::btree_map::Entry;

        match self.cabs.entry(cab.id) {
            Entry::Occupied(_) => Err(DispatchError::AlreadyExists(cab.id)),
            Entry::Vacant(slot) => Ok(slot.insert(cab)),
        }
    }

    pub fn get(&self, id: CabId) -> Option<&Cab> {
        self.cabs.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: CabId) -> Option<&mut Cab> {
        self.cabs.get_mut(&id)
    }

    pub(crate) fn set_location(
        &mut self,
        id: CabId,
        location: NodeId,
    ) -> Result<(), DispatchError> {
        let cab = self.get_mut(id).ok_or(DispatchError::UnknownCab(id))?;
        cab.location = location;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, id: CabId, status: CabStatus) -> Result<(), DispatchError> {
        let cab = self.get_mut(id).ok_or(DispatchError::UnknownCab(id))?;
        cab.status = status;
        Ok(())
    }

    pub fn contains(&self, id: CabId) -> bool {
        self.cabs.contains_key(&id)
    }

    /// All cabs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Cab> + '_ {
        self.cabs.values()
    }

    /// Cabs that may take a pickup (available or carrying a canceled marker), ascending by id.
    pub fn free_cabs(&self) -> impl Iterator<Item = &Cab> + '_ {
        self.cabs.values().filter(|cab| cab.status.is_free())
    }

    pub fn len(&self) -> usize {
        self.cabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cabs.is_empty()
    }

    /// Force every cab back to available. Identity, driver and location are untouched.
    pub(crate) fn reset_statuses(&mut self) {
        for cab in self.cabs.values_mut() {
            cab.status = CabStatus::Available;
        }
    }
}
