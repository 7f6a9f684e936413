//! Vehicle population generation.
//!
//! Vehicle ids are allocated monotonically starting at 1.  The first
//! `num_tunnels + 1` vehicles form a priming cohort of identical
//! highest-priority sleds — more single-occupancy vehicles than tunnels, so
//! the run opens with guaranteed contention and at least one failed scan for
//! the verifier to chew on.  The rest of the population is sampled uniformly
//! over class, direction, and priority.

use tn_core::{Direction, SimRng, Vehicle, VehicleClass, VehicleId, HIGHEST_PRIORITY};

use crate::SimConfig;

/// Sample one vehicle with uniformly random attributes.
pub fn random_vehicle(id: VehicleId, rng: &mut SimRng) -> Vehicle {
    let class = VehicleClass::ALL[rng.gen_range(0..VehicleClass::ALL.len())];
    let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
    let priority = rng.gen_range(0..=HIGHEST_PRIORITY);
    Vehicle::new(id, class, direction, priority)
}

/// Generate the full population for `config`, deterministic in `config.seed`.
pub fn generate_population(config: &SimConfig) -> Vec<Vehicle> {
    let mut rng = SimRng::new(config.seed);
    (0..config.num_vehicles)
        .map(|i| {
            let id = VehicleId(i as u32 + 1);
            if i <= config.num_tunnels {
                Vehicle::new(id, VehicleClass::Sled, Direction::North, HIGHEST_PRIORITY)
            } else {
                random_vehicle(id, &mut rng)
            }
        })
        .collect()
}
