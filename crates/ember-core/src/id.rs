//! Stable handles into a world

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable entity identifier.
///
/// Ids are handed out by a `World` from a monotonic counter and never
/// reused, so a handle held across a despawn resolves to nothing rather
/// than aliasing a newer entity.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Create an EntityId from a raw value (for deserialization/testing)
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Addresses one component slot on an entity.
///
/// Slots are append-only for the lifetime of an entity, so a `ComponentId`
/// stays valid until the owning entity is despawned.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct ComponentId {
    pub entity: EntityId,
    pub slot: usize,
}

impl ComponentId {
    pub fn new(entity: EntityId, slot: usize) -> Self {
        Self { entity, slot }
    }
}

/// Handle type used by the collider registry; a collider is addressed by
/// the component slot it occupies
pub type ColliderId = ComponentId;
