//! Collision counting over `(data, hash)` records
//!
//! Groups distinct data values by the hash they were read with, in a single
//! forward pass. A hash collides as soon as its group holds two distinct
//! data values; feeding the same `(data, hash)` record twice is a duplicate,
//! not a collision.

use crate::record::Record;
use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use tracing::debug;

/// Statistics gathered by a [`CollisionCounter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollisionStats {
    /// Records fed to the counter, duplicates included
    pub records_seen: usize,
    /// Records whose `(data, hash)` pair had already been seen
    pub duplicate_records: usize,
    /// Distinct data values
    pub unique_data: usize,
    /// Distinct hash values
    pub unique_hashes: usize,
    /// Data values belonging to a colliding hash
    pub colliding_data: usize,
    /// Hash values shared by two or more data values
    pub colliding_hashes: usize,
}

impl CollisionStats {
    /// Percentage of unique data values involved in a collision, 0.0 on empty input
    pub fn collision_rate(&self) -> f64 {
        if self.unique_data == 0 {
            0.0
        } else {
            (self.colliding_data as f64 / self.unique_data as f64) * 100.0
        }
    }

    /// Percentage of unique hashes that collide, 0.0 on empty input
    pub fn colliding_hash_rate(&self) -> f64 {
        if self.unique_hashes == 0 {
            0.0
        } else {
            (self.colliding_hashes as f64 / self.unique_hashes as f64) * 100.0
        }
    }

    /// Mean number of data values per colliding hash, `None` without collisions
    pub fn average_collision_size(&self) -> Option<f64> {
        if self.colliding_hashes == 0 {
            None
        } else {
            Some(self.colliding_data as f64 / self.colliding_hashes as f64)
        }
    }
}

/// What a single insertion did to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// First record seen for this hash
    NewHash,
    /// Same data already recorded under this hash
    Duplicate,
    /// New data for an existing hash; the group now has `group_size` members
    Collision { group_size: usize },
}

/// One colliding hash and every data value that produced it.
///
/// Values are rendered as text, with invalid UTF-8 replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollisionGroup {
    pub hash: String,
    /// Sorted ascending by raw bytes
    pub data: Vec<String>,
}

impl CollisionGroup {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Frozen result of a counting pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionReport {
    pub stats: CollisionStats,
    /// Largest group first, ties by ascending hash bytes
    pub groups: Vec<CollisionGroup>,
}

/// Single-pass collision counter
#[derive(Debug, Default)]
pub struct CollisionCounter {
    /// hash -> distinct data values seen with it
    groups: AHashMap<Vec<u8>, AHashSet<Vec<u8>>>,
    /// hashes whose group holds at least two values
    colliding: AHashSet<Vec<u8>>,
    records_seen: usize,
    duplicate_records: usize,
    unique_data: usize,
}

impl CollisionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter pre-sized for roughly `capacity` distinct hashes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            groups: AHashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Record that `data` hashed to `hash`. Values are compared byte for byte.
    pub fn insert(&mut self, data: impl AsRef<[u8]>, hash: impl AsRef<[u8]>) -> Outcome {
        let (data, hash) = (data.as_ref(), hash.as_ref());
        self.records_seen += 1;

        let Some(group) = self.groups.get_mut(hash) else {
            let mut group = AHashSet::with_capacity(1);
            group.insert(data.to_vec());
            self.groups.insert(hash.to_vec(), group);
            self.unique_data += 1;
            return Outcome::NewHash;
        };

        if group.contains(data) {
            self.duplicate_records += 1;
            return Outcome::Duplicate;
        }

        group.insert(data.to_vec());
        self.unique_data += 1;
        let group_size = group.len();
        if group_size == 2 {
            debug!("Hash {} now collides", String::from_utf8_lossy(hash));
            self.colliding.insert(hash.to_vec());
        }
        Outcome::Collision { group_size }
    }

    /// Record a parsed input line
    pub fn insert_record(&mut self, record: &Record) -> Outcome {
        self.insert(&record.data, &record.hash)
    }

    /// Feed every `(data, hash)` pair of an iterator
    pub fn extend<I, D, H>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (D, H)>,
        D: AsRef<[u8]>,
        H: AsRef<[u8]>,
    {
        for (data, hash) in pairs {
            self.insert(data, hash);
        }
    }

    /// Feed every record of an iterator, in order
    pub fn extend_records<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            self.insert_record(record);
        }
    }

    /// Current statistics
    pub fn stats(&self) -> CollisionStats {
        CollisionStats {
            records_seen: self.records_seen,
            duplicate_records: self.duplicate_records,
            unique_data: self.unique_data,
            unique_hashes: self.groups.len(),
            colliding_data: self
                .colliding
                .iter()
                .map(|hash| self.groups.get(hash).map_or(0, |group| group.len()))
                .sum(),
            colliding_hashes: self.colliding.len(),
        }
    }

    /// Number of distinct data values recorded under `hash`
    pub fn group_size(&self, hash: impl AsRef<[u8]>) -> usize {
        self.groups.get(hash.as_ref()).map_or(0, |group| group.len())
    }

    /// Whether `hash` is shared by two or more data values
    pub fn is_colliding(&self, hash: impl AsRef<[u8]>) -> bool {
        self.colliding.contains(hash.as_ref())
    }

    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    pub fn colliding_hashes(&self) -> usize {
        self.colliding.len()
    }

    /// End the pass and freeze the colliding groups into a sorted report
    pub fn finish(mut self) -> CollisionReport {
        let stats = self.stats();

        let mut raw: Vec<(Vec<u8>, Vec<Vec<u8>>)> = self
            .colliding
            .drain()
            .filter_map(|hash| {
                let members = self.groups.remove(&hash)?;
                let mut data: Vec<Vec<u8>> = members.into_iter().collect();
                data.sort_unstable();
                Some((hash, data))
            })
            .collect();

        // sort on raw bytes so the order does not depend on lossy rendering
        raw.sort_by(|(hash_a, data_a), (hash_b, data_b)| {
            data_b.len().cmp(&data_a.len()).then_with(|| hash_a.cmp(hash_b))
        });

        let groups = raw
            .into_iter()
            .map(|(hash, data)| CollisionGroup {
                hash: lossy(hash),
                data: data.into_iter().map(lossy).collect(),
            })
            .collect();

        CollisionReport { stats, groups }
    }
}

fn lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
