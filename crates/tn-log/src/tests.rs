//! Unit tests for tn-log.

use tn_core::{Direction, TunnelId, Vehicle, VehicleClass, VehicleId};

use crate::{Event, EventKind, EventLog, EventSink, NoopSink};

fn car(id: u32) -> Vehicle {
    Vehicle::new(VehicleId(id), VehicleClass::Car, Direction::North, 2)
}

#[cfg(test)]
mod events {
    use super::*;

    #[test]
    fn display_renders_original_line() {
        let e = Event::new(car(7), TunnelId(3), EventKind::EnterSucceeded);
        assert_eq!(e.to_string(), "NORTH CAR 7 with priority 2 entered successfully 3");
    }

    #[test]
    fn kind_phrases() {
        assert_eq!(EventKind::EnterAttempt.to_string(), "trying to enter");
        assert_eq!(EventKind::LeaveEnd.to_string(), "left");
    }
}

#[cfg(test)]
mod log {
    use super::*;

    #[test]
    fn fifo_order_preserved() {
        let log = EventLog::new();
        for i in 0..5 {
            log.record(Event::new(car(i), TunnelId(0), EventKind::EnterAttempt));
        }
        assert_eq!(log.len(), 5);
        for i in 0..5 {
            let e = log.pop_head().unwrap();
            assert_eq!(e.vehicle.id, VehicleId(i));
        }
        assert!(log.pop_head().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn drain_empties_in_order() {
        let log = EventLog::new();
        log.record(Event::new(car(1), TunnelId(0), EventKind::EnterAttempt));
        log.record(Event::new(car(1), TunnelId(0), EventKind::EnterSucceeded));
        let events = log.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::EnterAttempt);
        assert_eq!(events[1].kind, EventKind::EnterSucceeded);
        assert!(log.is_empty());
    }

    #[test]
    fn concurrent_records_all_arrive() {
        use std::sync::Arc;
        use std::thread;

        let log = Arc::new(EventLog::new());
        let mut handles = Vec::new();
        for t in 0..8u32 {
            let log = Arc::clone(&log);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    log.record(Event::new(
                        car(t * 100 + i),
                        TunnelId(0),
                        EventKind::EnterAttempt,
                    ));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("recorder thread panicked");
        }
        assert_eq!(log.len(), 800);
    }

    #[test]
    fn noop_sink_accepts_events() {
        // Purely that it doesn't panic; NoopSink has no observable state.
        NoopSink.record(Event::new(car(1), TunnelId(0), EventKind::LeaveEnd));
    }
}

#[cfg(test)]
mod csv_export {
    use super::*;
    use crate::write_events;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        let events = vec![
            Event::new(car(1), TunnelId(0), EventKind::EnterAttempt),
            Event::new(car(1), TunnelId(0), EventKind::EnterSucceeded),
        ];
        write_events(&path, &events).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3, "header + 2 rows: {contents}");
        assert_eq!(lines[0], "seq,vehicle_id,class,direction,priority,tunnel_id,kind");
        assert!(lines[1].starts_with("0,1,CAR,NORTH,2,0,enter_attempt"));
        assert!(lines[2].contains("enter_succeeded"));
    }

    #[test]
    fn empty_log_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        write_events(&path, &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        // serde-based writer only emits the header once a row is written.
        assert!(contents.is_empty());
    }
}
