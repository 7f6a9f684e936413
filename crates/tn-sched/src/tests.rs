//! Unit and concurrency tests for tn-sched.

use std::sync::Arc;

use tn_core::{Direction, TunnelId, Vehicle, VehicleClass, VehicleId, HIGHEST_PRIORITY};
use tn_log::{EventKind, EventLog, EventSink, NoopSink};

use crate::{AssignmentMap, PriorityScheduler, Tunnel};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn car(id: u32, direction: Direction, priority: u8) -> Vehicle {
    Vehicle::new(VehicleId(id), VehicleClass::Car, direction, priority)
}

fn sled(id: u32, direction: Direction, priority: u8) -> Vehicle {
    Vehicle::new(VehicleId(id), VehicleClass::Sled, direction, priority)
}

fn scheduler(num_tunnels: usize) -> (Arc<PriorityScheduler>, Arc<EventLog>) {
    let log = Arc::new(EventLog::new());
    let sched = PriorityScheduler::new(num_tunnels, log.clone() as Arc<dyn EventSink>)
        .expect("valid tunnel count");
    (Arc::new(sched), log)
}

// ── Tunnel state machine ──────────────────────────────────────────────────────

#[cfg(test)]
mod tunnel {
    use super::*;

    #[test]
    fn empty_tunnel_admits_anyone() {
        let mut t = Tunnel::new(TunnelId(0));
        assert!(t.try_enter(&sled(1, Direction::South, 0), &NoopSink));
        assert_eq!(t.occupant_count(), 1);
        assert_eq!(t.occupancy(), Some((VehicleClass::Sled, Direction::South)));
    }

    #[test]
    fn class_mismatch_rejected() {
        let mut t = Tunnel::new(TunnelId(0));
        assert!(t.try_enter(&car(1, Direction::North, 0), &NoopSink));
        assert!(!t.try_enter(&sled(2, Direction::North, 0), &NoopSink));
        assert_eq!(t.occupant_count(), 1);
    }

    #[test]
    fn direction_mismatch_rejected() {
        let mut t = Tunnel::new(TunnelId(0));
        assert!(t.try_enter(&car(1, Direction::North, 0), &NoopSink));
        assert!(!t.try_enter(&car(2, Direction::South, 0), &NoopSink));
    }

    #[test]
    fn car_capacity_is_three() {
        let mut t = Tunnel::new(TunnelId(0));
        for i in 0..3 {
            assert!(t.try_enter(&car(i, Direction::North, 0), &NoopSink), "car {i}");
        }
        assert!(!t.try_enter(&car(3, Direction::North, 0), &NoopSink));
        assert_eq!(t.occupant_count(), 3);
    }

    #[test]
    fn sled_capacity_is_one() {
        let mut t = Tunnel::new(TunnelId(0));
        assert!(t.try_enter(&sled(1, Direction::North, 0), &NoopSink));
        assert!(!t.try_enter(&sled(2, Direction::North, 0), &NoopSink));
    }

    #[test]
    fn leave_clears_occupancy_at_zero() {
        let mut t = Tunnel::new(TunnelId(0));
        let a = car(1, Direction::North, 0);
        let b = car(2, Direction::North, 0);
        t.try_enter(&a, &NoopSink);
        t.try_enter(&b, &NoopSink);

        t.leave(&a, &NoopSink);
        assert_eq!(t.occupant_count(), 1);
        assert_eq!(t.occupancy(), Some((VehicleClass::Car, Direction::North)));

        t.leave(&b, &NoopSink);
        assert!(t.is_empty());
        assert_eq!(t.occupancy(), None);

        // Opposite heading fits now that the tunnel reset.
        assert!(t.try_enter(&sled(3, Direction::South, 0), &NoopSink));
    }

    #[test]
    fn every_attempt_is_logged() {
        let log = EventLog::new();
        let mut t = Tunnel::new(TunnelId(0));
        let a = car(1, Direction::North, 0);
        t.try_enter(&a, &log);
        t.try_enter(&sled(2, Direction::North, 0), &log); // rejected
        t.leave(&a, &log);

        let kinds: Vec<EventKind> = log.drain().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::EnterAttempt,
                EventKind::EnterSucceeded,
                EventKind::EnterAttempt,
                EventKind::EnterFailed,
                EventKind::LeaveStart,
                EventKind::LeaveEnd,
            ]
        );
    }
}

// ── AssignmentMap ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod assignment {
    use super::*;

    #[test]
    fn put_get_remove_roundtrip() {
        let mut map = AssignmentMap::new();
        map.put(VehicleId(1), TunnelId(4));
        assert_eq!(map.get(VehicleId(1)), Some(TunnelId(4)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove(VehicleId(1)), Some(TunnelId(4)));
        assert!(map.is_empty());
    }

    #[test]
    fn remove_absent_is_none() {
        let mut map = AssignmentMap::new();
        assert_eq!(map.remove(VehicleId(9)), None);
        assert_eq!(map.get(VehicleId(9)), None);
    }
}

// ── Scheduler: single-threaded behavior ───────────────────────────────────────

#[cfg(test)]
mod scheduler_basics {
    use super::*;

    #[test]
    fn zero_tunnels_is_a_config_error() {
        let result = PriorityScheduler::new(0, Arc::new(NoopSink));
        assert!(result.is_err());
    }

    #[test]
    fn admit_release_cycle() {
        let (sched, log) = scheduler(2);
        let v = car(1, Direction::North, 2);

        let tunnel = sched.admit(&v);
        assert_eq!(tunnel, TunnelId(0), "ascending-id scan starts at tunnel 0");
        assert_eq!(sched.occupant_count(tunnel), Some(1));
        assert_eq!(sched.waiting_at(2), 1);

        sched.release(&v);
        assert_eq!(sched.occupant_count(tunnel), Some(0));
        assert_eq!(sched.total_waiting(), 0);

        let kinds: Vec<EventKind> = log.drain().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::EnterAttempt,
                EventKind::EnterSucceeded,
                EventKind::LeaveStart,
                EventKind::LeaveEnd,
            ]
        );
    }

    #[test]
    fn scan_skips_incompatible_tunnels() {
        let (sched, _log) = scheduler(2);
        let holder = sled(1, Direction::North, 0);
        assert_eq!(sched.admit(&holder), TunnelId(0));

        // A southbound car cannot share tunnel 0; it lands in tunnel 1.
        let v = car(2, Direction::South, 0);
        assert_eq!(sched.admit(&v), TunnelId(1));
    }

    #[test]
    fn misdirected_release_is_tolerated() {
        let (sched, log) = scheduler(1);
        let stranger = car(99, Direction::North, 3);

        sched.release(&stranger);
        assert_eq!(sched.misdirected_releases(), 1);
        assert_eq!(sched.total_waiting(), 0, "count must not underflow");
        assert!(log.is_empty(), "no tunnel events for a vehicle holding nothing");
    }

    #[test]
    fn release_frees_the_held_tunnel_only() {
        let (sched, _log) = scheduler(1);
        let a = car(1, Direction::North, 0);
        let b = car(2, Direction::North, 0);
        sched.admit(&a);
        sched.admit(&b);
        assert_eq!(sched.occupant_count(TunnelId(0)), Some(2));

        sched.release(&a);
        assert_eq!(sched.occupant_count(TunnelId(0)), Some(1));
        // Releasing a again is misdirected: b's slot stays.
        sched.release(&a);
        assert_eq!(sched.occupant_count(TunnelId(0)), Some(1));
        assert_eq!(sched.misdirected_releases(), 1);
    }
}

// ── Scheduler: concurrency scenarios ──────────────────────────────────────────

#[cfg(test)]
mod scheduler_concurrency {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    /// Poll `predicate` until it holds or the deadline passes.
    fn wait_until(predicate: impl Fn() -> bool, what: &str) {
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !predicate() {
            assert!(std::time::Instant::now() < deadline, "timed out waiting for {what}");
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Track the running and high-water occupancy across threads.
    struct OccupancyProbe {
        current: AtomicUsize,
        max:     AtomicUsize,
    }

    impl OccupancyProbe {
        fn new() -> Self {
            Self {
                current: AtomicUsize::new(0),
                max:     AtomicUsize::new(0),
            }
        }

        fn enter(&self) {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.max.fetch_max(now, Ordering::SeqCst);
        }

        fn exit(&self) {
            self.current.fetch_sub(1, Ordering::SeqCst);
        }

        fn high_water(&self) -> usize {
            self.max.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn capacity_bound_holds_under_contention() {
        // 1 tunnel, 4 same-class same-direction cars at one priority:
        // at most 3 inside at any instant, and all 4 eventually cross.
        let (sched, log) = scheduler(1);
        let probe = Arc::new(OccupancyProbe::new());
        let barrier = Arc::new(Barrier::new(4));

        let mut handles = Vec::new();
        for i in 0..4 {
            let sched = Arc::clone(&sched);
            let probe = Arc::clone(&probe);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                let v = car(i, Direction::North, 0);
                barrier.wait();
                let tunnel = sched.admit(&v);
                assert_eq!(tunnel, TunnelId(0));
                probe.enter();
                thread::sleep(Duration::from_millis(30));
                probe.exit();
                sched.release(&v);
            }));
        }
        for handle in handles {
            handle.join().expect("vehicle thread panicked");
        }

        assert!(probe.high_water() <= 3, "occupancy exceeded car capacity");
        assert_eq!(sched.occupant_count(TunnelId(0)), Some(0));
        assert_eq!(sched.total_waiting(), 0);

        let events = log.drain();
        let succeeded = events.iter().filter(|e| e.kind == EventKind::EnterSucceeded).count();
        let left = events.iter().filter(|e| e.kind == EventKind::LeaveEnd).count();
        assert_eq!(succeeded, 4, "every vehicle eventually admitted");
        assert_eq!(left, 4);
    }

    #[test]
    fn incompatible_class_waits_for_empty_tunnel() {
        let (sched, log) = scheduler(1);
        let holder = car(1, Direction::North, 0);
        sched.admit(&holder);

        let sched2 = Arc::clone(&sched);
        let waiter = thread::spawn(move || {
            let v = sled(2, Direction::North, 0);
            let tunnel = sched2.admit(&v);
            sched2.release(&v);
            tunnel
        });

        // Wait for the sled to claim its slot and fail its first scan.
        let sched3 = Arc::clone(&sched);
        wait_until(move || sched3.waiting_at(0) == 2, "sled to start waiting");
        assert_eq!(sched.occupant_count(TunnelId(0)), Some(1), "car alone inside");

        sched.release(&holder);
        let tunnel = waiter.join().expect("sled thread panicked");
        assert_eq!(tunnel, TunnelId(0));

        // The sled's failed attempt was recorded before its success.
        let sled_kinds: Vec<EventKind> = log
            .drain()
            .into_iter()
            .filter(|e| e.vehicle.id == VehicleId(2))
            .map(|e| e.kind)
            .collect();
        assert_eq!(sled_kinds.first(), Some(&EventKind::EnterAttempt));
        assert!(sled_kinds.contains(&EventKind::EnterFailed));
        assert!(sled_kinds.contains(&EventKind::EnterSucceeded));
    }

    #[test]
    fn higher_priority_admitted_strictly_first() {
        // Tunnel blocked by a high-priority sled; a priority-4 and a
        // priority-0 vehicle both queue up behind it.  While any priority-4
        // claim is live the priority-0 vehicle may not even scan, so after
        // the holder leaves, priority 4 crosses completely before priority 0
        // makes a single attempt.
        let (sched, log) = scheduler(1);
        let holder = sled(1, Direction::North, HIGHEST_PRIORITY);
        sched.admit(&holder);

        let mut handles = Vec::new();
        for (id, priority) in [(2, HIGHEST_PRIORITY), (3, 0)] {
            let sched = Arc::clone(&sched);
            handles.push(thread::spawn(move || {
                let v = sled(id, Direction::North, priority);
                sched.admit(&v);
                thread::sleep(Duration::from_millis(20));
                sched.release(&v);
            }));
        }

        // Both contenders must have claimed their slots before the tunnel
        // frees up, otherwise the gate has nothing to order.
        let sched2 = Arc::clone(&sched);
        wait_until(
            move || sched2.waiting_at(HIGHEST_PRIORITY) == 2 && sched2.waiting_at(0) == 1,
            "contenders to register",
        );
        sched.release(&holder);
        for handle in handles {
            handle.join().expect("contender thread panicked");
        }

        let events = log.drain();
        let p4_done = events
            .iter()
            .position(|e| e.vehicle.id == VehicleId(2) && e.kind == EventKind::LeaveEnd)
            .expect("priority-4 vehicle crossed");
        let p0_first_attempt = events
            .iter()
            .position(|e| e.vehicle.id == VehicleId(3) && e.kind == EventKind::EnterAttempt)
            .expect("priority-0 vehicle attempted");
        assert!(
            p0_first_attempt > p4_done,
            "priority 0 attempted at event {p0_first_attempt}, before priority 4 left at {p4_done}"
        );
    }

    #[test]
    fn failed_scan_keeps_the_priority_claim() {
        // A blocked high-priority vehicle keeps gating lower priorities even
        // though it cannot enter yet.
        let (sched, _log) = scheduler(1);
        let holder = sled(1, Direction::North, 0);
        sched.admit(&holder);

        let sched2 = Arc::clone(&sched);
        let blocked = thread::spawn(move || {
            let v = sled(2, Direction::South, HIGHEST_PRIORITY);
            let tunnel = sched2.admit(&v);
            sched2.release(&v);
            tunnel
        });

        // The claim is still counted while the vehicle waits for space.
        let sched3 = Arc::clone(&sched);
        wait_until(move || sched3.waiting_at(HIGHEST_PRIORITY) == 1, "claim to register");
        thread::sleep(Duration::from_millis(20));
        assert_eq!(sched.waiting_at(HIGHEST_PRIORITY), 1, "claim survives a failed scan");

        sched.release(&holder);
        blocked.join().expect("blocked thread panicked");
        assert_eq!(sched.total_waiting(), 0);
    }

    #[test]
    fn stress_many_vehicles_all_cross() {
        // 6 tunnels, 60 vehicles with mixed attributes; every admit must
        // complete and the books must balance afterwards.
        let (sched, log) = scheduler(6);
        let barrier = Arc::new(Barrier::new(60));

        let mut handles = Vec::new();
        for i in 0..60u32 {
            let sched = Arc::clone(&sched);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                let class = if i % 3 == 0 { VehicleClass::Sled } else { VehicleClass::Car };
                let direction = if i % 2 == 0 { Direction::North } else { Direction::South };
                let v = Vehicle::new(VehicleId(i), class, direction, (i % 5) as u8);
                barrier.wait();
                let tunnel = sched.admit(&v);
                assert!(tunnel.index() < 6);
                thread::sleep(Duration::from_millis(2));
                sched.release(&v);
            }));
        }
        for handle in handles {
            handle.join().expect("vehicle thread panicked");
        }

        assert_eq!(sched.total_waiting(), 0);
        assert_eq!(sched.misdirected_releases(), 0);
        for t in 0..6 {
            assert_eq!(sched.occupant_count(TunnelId(t)), Some(0));
        }

        let events = log.drain();
        let succeeded = events.iter().filter(|e| e.kind == EventKind::EnterSucceeded).count();
        let left = events.iter().filter(|e| e.kind == EventKind::LeaveEnd).count();
        assert_eq!(succeeded, 60);
        assert_eq!(left, 60);
    }
}
