//! Mock robot that walks around and publishes its position
//!
//! The robot moves in a straight line and picks a new random direction every
//! [`TURN_EVERY`] steps.

use crate::store::SharedStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use trail_lib::Coordinate;

/// Starting position (latitude, longitude)
pub const START: (f64, f64) = (48.2082, 16.3738);

/// Direction of the first straight leg, degrees per step (latitude, longitude)
pub const INITIAL_DIRECTION: (f64, f64) = (0.0001, 0.00015);

/// Number of steps between direction changes
pub const TURN_EVERY: u32 = 10;

/// Largest random step on each axis, in degrees
pub const MAX_STEP: f64 = 0.0002;

pub struct RobotSimulator {
    latitude: f64,
    longitude: f64,
    direction: (f64, f64),
    steps_since_turn: u32,
    rng: StdRng,
}

impl RobotSimulator {
    /// Create a simulator; a seed makes the walk reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            latitude: START.0,
            longitude: START.1,
            direction: INITIAL_DIRECTION,
            steps_since_turn: 0,
            rng,
        }
    }

    /// Advance one step and return the new position
    pub fn step(&mut self) -> trail_lib::Result<Coordinate> {
        self.steps_since_turn += 1;
        if self.steps_since_turn >= TURN_EVERY {
            self.direction = (
                self.rng.gen_range(-MAX_STEP..=MAX_STEP),
                self.rng.gen_range(-MAX_STEP..=MAX_STEP),
            );
            self.steps_since_turn = 0;
        }

        let next = Coordinate::new(
            self.latitude + self.direction.0,
            self.longitude + self.direction.1,
        );

        match next {
            Ok(coordinate) => {
                self.latitude = coordinate.latitude;
                self.longitude = coordinate.longitude;
                Ok(coordinate)
            }
            Err(err) => {
                // Walked off the map: turn around and stay put for this step
                self.direction = (-self.direction.0, -self.direction.1);
                Err(err)
            }
        }
    }

    /// Publish a new position into the store every `period`, forever
    pub async fn run(mut self, store: SharedStore, period: Duration) {
        tracing::info!(
            "Robot simulator started at ({}, {}), publishing every {:?}",
            self.latitude,
            self.longitude,
            period
        );

        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match self.step() {
                Ok(coordinate) => {
                    store.write().await.insert(coordinate);
                    tracing::debug!("Published {}", coordinate.label());
                }
                Err(err) => tracing::warn!("Simulator produced an invalid position: {err}"),
            }
        }
    }
}
