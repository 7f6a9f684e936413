//! `AssignmentMap` — which tunnel each admitted vehicle currently holds.
//!
//! An entry exists iff the vehicle occupies a tunnel: created by a successful
//! admission, removed by the matching release.  At most one entry per vehicle
//! ever exists — the scheduler never admits a vehicle that already holds one.
//!
//! The map is only touched under the scheduler lock, so it needs no
//! synchronization of its own.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use tn_core::{TunnelId, VehicleId};

/// Uniqueness-preserving `VehicleId → TunnelId` mapping.
#[derive(Default, Debug)]
pub struct AssignmentMap {
    inner: HashMap<VehicleId, TunnelId>,
}

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `vehicle` now holds `tunnel`.
    ///
    /// A live prior entry would mean a vehicle was admitted twice without a
    /// release in between — a scheduler bug, caught by the debug assertion.
    pub fn put(&mut self, vehicle: VehicleId, tunnel: TunnelId) {
        let prior = self.inner.insert(vehicle, tunnel);
        debug_assert!(
            prior.is_none(),
            "{vehicle} assigned {tunnel} while still holding {prior:?}"
        );
    }

    /// The tunnel `vehicle` currently holds, if any.
    pub fn get(&self, vehicle: VehicleId) -> Option<TunnelId> {
        self.inner.get(&vehicle).copied()
    }

    /// Remove and return `vehicle`'s assignment, or `None` if it holds no
    /// tunnel (e.g. a misdirected release).
    pub fn remove(&mut self, vehicle: VehicleId) -> Option<TunnelId> {
        self.inner.remove(&vehicle)
    }

    /// Number of vehicles currently holding a tunnel.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
