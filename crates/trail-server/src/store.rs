//! In-memory coordinate store
//!
//! Entries are kept ordered by timestamp, oldest first. The store only keeps the
//! newest `retain` entries; older ones are evicted on insert.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use trail_lib::Coordinate;

pub type SharedStore = Arc<RwLock<CoordinateStore>>;

/// A coordinate with the time it was received (seconds since the Unix epoch)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoredCoordinate {
    pub timestamp: f64,
    pub coordinate: Coordinate,
}

#[derive(Debug)]
pub struct CoordinateStore {
    entries: VecDeque<StoredCoordinate>,
    retain: usize,
}

impl CoordinateStore {
    pub fn new(retain: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            retain: retain.max(1),
        }
    }

    pub fn shared(retain: usize) -> SharedStore {
        Arc::new(RwLock::new(Self::new(retain)))
    }

    /// Store a coordinate received now
    pub fn insert(&mut self, coordinate: Coordinate) -> StoredCoordinate {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        self.insert_at(timestamp, coordinate)
    }

    /// Store a coordinate with an explicit timestamp, keeping timestamp order
    pub fn insert_at(&mut self, timestamp: f64, coordinate: Coordinate) -> StoredCoordinate {
        let entry = StoredCoordinate {
            timestamp,
            coordinate,
        };

        // Equal timestamps keep arrival order
        let index = self.entries.partition_point(|e| e.timestamp <= timestamp);
        self.entries.insert(index, entry);

        while self.entries.len() > self.retain {
            self.entries.pop_front();
        }

        entry
    }

    /// The newest `limit` coordinates, oldest first
    pub fn recent(&self, limit: usize) -> Vec<Coordinate> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries
            .iter()
            .skip(skip)
            .map(|e| e.coordinate)
            .collect()
    }

    pub fn latest(&self) -> Option<&StoredCoordinate> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
