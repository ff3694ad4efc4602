//! Run several hash algorithms over the same messages

use crate::collision::{CollisionCounter, CollisionStats};
use crate::generate::Message;
use crate::hash::{format_digest, HashAlgorithm};
use rayon::prelude::*;
use tracing::info;

/// Count collisions of every algorithm on `messages`, in the given algorithm order.
///
/// Digests are computed in parallel; insertion into each counter follows
/// message order.
pub fn compare_algorithms(
    messages: &[Message],
    algorithms: &[HashAlgorithm],
) -> Vec<(HashAlgorithm, CollisionStats)> {
    algorithms
        .iter()
        .map(|&algorithm| {
            let digests: Vec<String> = messages
                .par_iter()
                .map(|message| format_digest(algorithm.digest(&message.bytes)))
                .collect();

            let mut counter = CollisionCounter::with_capacity(messages.len());
            counter.extend(
                messages
                    .iter()
                    .map(|message| message.bytes.as_slice())
                    .zip(digests.iter()),
            );

            let stats = counter.stats();
            info!(
                "{}: {} colliding hashes over {} messages",
                algorithm, stats.colliding_hashes, stats.unique_data
            );
            (algorithm, stats)
        })
        .collect()
}
