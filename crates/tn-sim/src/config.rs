//! Top-level simulation configuration.

/// Parameters for one simulation run.
///
/// Validated by [`SimBuilder::build`][crate::SimBuilder::build]; invalid
/// values are fatal at startup, never mid-run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of tunnels the scheduler owns.  Fixed for the whole run.
    pub num_tunnels: usize,

    /// Number of vehicles (= worker threads) to send through the tunnels.
    pub num_vehicles: usize,

    /// Master RNG seed.  The same seed always produces the same population;
    /// thread interleaving remains the only nondeterminism.
    pub seed: u64,

    /// Milliseconds of simulated crossing time per point of speed deficit:
    /// a vehicle with speed `s` sleeps `(10 - s) * this` inside its tunnel.
    /// Turn it down for fast tests.
    pub crossing_millis_per_speed_unit: u64,
}

impl Default for SimConfig {
    /// The classic scenario: 10 tunnels, 100 vehicles, 100 ms per speed
    /// deficit point (cars cross in 400 ms, sleds in 600 ms).
    fn default() -> Self {
        Self {
            num_tunnels: 10,
            num_vehicles: 100,
            seed: 42,
            crossing_millis_per_speed_unit: 100,
        }
    }
}

impl SimConfig {
    /// Crossing duration for a vehicle of the given speed.
    pub fn crossing_millis(&self, speed: u8) -> u64 {
        let deficit = 10u64.saturating_sub(speed as u64);
        deficit * self.crossing_millis_per_speed_unit
    }
}
