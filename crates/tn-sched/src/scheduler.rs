//! `PriorityScheduler` — the mutex/condvar admission core.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use tn_core::{TunnelId, Vehicle, PRIORITY_LEVELS};
use tn_log::EventSink;

use crate::{AssignmentMap, SchedError, SchedResult, Tunnel};

// ── Shared state ──────────────────────────────────────────────────────────────

/// Everything the lock protects.  Tunnels, waiting counts, and assignments
/// are never touched without holding the scheduler mutex.
struct SchedState {
    /// `counts[p]` = vehicles currently inside `admit()` at priority `p`
    /// (waiting or admitted-but-not-released).  Fixed-size: priority levels
    /// are a small bounded set known at compile time.
    counts: [usize; PRIORITY_LEVELS],
    tunnels: Vec<Tunnel>,
    assignments: AssignmentMap,
    /// Releases that arrived for a vehicle with no live assignment.  Caller
    /// misuse, tolerated; surfaced through [`PriorityScheduler::misdirected_releases`].
    misdirected_releases: u64,
}

impl SchedState {
    /// The highest priority level with at least one waiter, or `None` if no
    /// vehicle is currently contending.
    fn highest_waiting(&self) -> Option<u8> {
        self.counts
            .iter()
            .rposition(|&c| c > 0)
            .map(|p| p as u8)
    }

    /// Scan tunnels in ascending id and admit `vehicle` into the first one
    /// that accepts it, recording the assignment.  `None` if every tunnel
    /// rejected it.
    fn try_admit(&mut self, vehicle: &Vehicle, sink: &dyn EventSink) -> Option<TunnelId> {
        for tunnel in &mut self.tunnels {
            if tunnel.try_enter(vehicle, sink) {
                let id = tunnel.id();
                self.assignments.put(vehicle.id, id);
                return Some(id);
            }
        }
        None
    }
}

// ── PriorityScheduler ─────────────────────────────────────────────────────────

/// Priority-fair admission controller over a fixed set of tunnels.
///
/// Scheduling is strict-priority: only the highest-priority cohort currently
/// inside [`admit`] may attempt entry; lower priorities wait even when
/// tunnels are free.  Equal-priority ordering is unspecified — any cohort
/// member may win a given scan.  A continuous stream of higher-priority
/// arrivals can therefore delay lower priorities indefinitely; that is the
/// contract, not an oversight.
///
/// One mutex serializes all shared state; one condvar, broadcast on every
/// admission success and every release, wakes all waiters so eligibility is
/// re-evaluated after any relevant change.  Finer-grained signaling would be
/// an optimization only.
///
/// [`admit`]: PriorityScheduler::admit
pub struct PriorityScheduler {
    state: Mutex<SchedState>,
    admission: Condvar,
    sink: Arc<dyn EventSink>,
}

impl PriorityScheduler {
    /// Create a scheduler owning `num_tunnels` tunnels with ids `0..n`.
    ///
    /// Zero tunnels would make every `admit` block forever, so it is
    /// rejected at construction (fatal at startup, per the error design).
    pub fn new(num_tunnels: usize, sink: Arc<dyn EventSink>) -> SchedResult<Self> {
        if num_tunnels == 0 {
            return Err(SchedError::Config(
                "scheduler needs at least one tunnel".into(),
            ));
        }
        let tunnels = (0..num_tunnels)
            .map(|i| Tunnel::new(TunnelId(i as u32)))
            .collect();
        Ok(Self {
            state: Mutex::new(SchedState {
                counts: [0; PRIORITY_LEVELS],
                tunnels,
                assignments: AssignmentMap::new(),
                misdirected_releases: 0,
            }),
            admission: Condvar::new(),
            sink,
        })
    }

    /// Block until `vehicle` is admitted into some tunnel; return its id.
    ///
    /// The calling thread first claims a waiting slot at its priority, then
    /// sleeps until it belongs to the highest waiting cohort, then scans the
    /// tunnels.  A failed scan does not abandon the claim — the vehicle stays
    /// counted (keeping lower priorities gated) and re-enters the wait until
    /// a release frees a slot.  Every `admit` therefore eventually returns a
    /// tunnel the vehicle holds until its matching [`release`].
    ///
    /// [`release`]: PriorityScheduler::release
    pub fn admit(&self, vehicle: &Vehicle) -> TunnelId {
        let mut state = self.lock();
        state.counts[vehicle.priority as usize] += 1;

        loop {
            // Fairness gate: only the highest waiting cohort may attempt.
            // Our own claim is counted, so highest_waiting() is never None.
            while state.highest_waiting() != Some(vehicle.priority) {
                state = self.wait(state);
            }

            if let Some(tunnel) = state.try_admit(vehicle, self.sink.as_ref()) {
                // Occupancy changed: everyone re-evaluates availability.
                self.admission.notify_all();
                return tunnel;
            }

            // Highest cohort but no compatible space.  Keep the claim and
            // wait for a release broadcast; no state changed, so no wake.
            state = self.wait(state);
        }
    }

    /// Release the tunnel `vehicle` holds and retire its priority claim.
    ///
    /// A release with no live assignment leaves the tunnels untouched but
    /// still decrements the priority count — the vehicle did contend at that
    /// level — and bumps the misdirected-release diagnostic.
    pub fn release(&self, vehicle: &Vehicle) {
        let mut state = self.lock();

        match state.assignments.remove(vehicle.id) {
            Some(tunnel) => {
                let tunnel = &mut state.tunnels[tunnel.index()];
                tunnel.leave(vehicle, self.sink.as_ref());
            }
            None => state.misdirected_releases += 1,
        }

        // Saturating: a misdirected release from a vehicle that never called
        // admit must not drive the count negative (counts[p] >= 0 always).
        let count = &mut state.counts[vehicle.priority as usize];
        *count = count.saturating_sub(1);

        // Both a freed slot and a reduced count can change who is eligible.
        self.admission.notify_all();
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// Vehicles currently inside `admit` at priority `p`.
    pub fn waiting_at(&self, priority: u8) -> usize {
        self.lock().counts[priority as usize]
    }

    /// Vehicles currently inside `admit` across all priorities.
    pub fn total_waiting(&self) -> usize {
        self.lock().counts.iter().sum()
    }

    /// Occupant count of one tunnel, or `None` for an unknown id.
    pub fn occupant_count(&self, tunnel: TunnelId) -> Option<usize> {
        let state = self.lock();
        state.tunnels.get(tunnel.index()).map(Tunnel::occupant_count)
    }

    /// Number of tunnels owned by this scheduler.
    pub fn num_tunnels(&self) -> usize {
        self.lock().tunnels.len()
    }

    /// Releases observed for vehicles that held no tunnel.
    pub fn misdirected_releases(&self) -> u64 {
        self.lock().misdirected_releases
    }

    // ── Lock plumbing ─────────────────────────────────────────────────────
    //
    // A poisoned lock means a thread panicked while mutating scheduler
    // state; the state is unrecoverable and continuing would violate the
    // occupancy invariants, so propagating the panic is correct.

    fn lock(&self) -> MutexGuard<'_, SchedState> {
        self.state.lock().expect("scheduler lock poisoned")
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, SchedState>) -> MutexGuard<'a, SchedState> {
        self.admission
            .wait(guard)
            .expect("scheduler lock poisoned during wait")
    }
}
