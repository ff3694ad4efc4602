//! Producers of `<message> <HASH>` lines for the collision counter

use crate::hash::{format_digest, HashAlgorithm};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Pair-file line for `message`, without the trailing newline.
///
/// The message bytes are copied verbatim so the line round-trips through
/// the collision counter even when it is not valid UTF-8.
pub fn hash_line(algorithm: HashAlgorithm, message: &[u8]) -> Vec<u8> {
    let digest = format_digest(algorithm.digest(message));
    let mut line = Vec::with_capacity(message.len() + 1 + digest.len());
    line.extend_from_slice(message);
    line.push(b' ');
    line.extend_from_slice(digest.as_bytes());
    line
}

/// Printable form of random bytes: each byte becomes two letters in `a..=p`,
/// low nibble first. Distinct byte strings always get distinct text.
pub fn letter_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(b'a' + (b & 0xF)));
        out.push(char::from(b'a' + (b >> 4)));
    }
    out
}

/// A message to hash: its printable form and the raw bytes that get hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub repr: String,
    pub bytes: Vec<u8>,
}

impl Message {
    /// Message whose text is hashed as-is
    pub fn from_text(text: impl Into<String>) -> Self {
        let repr = text.into();
        Self {
            bytes: repr.as_bytes().to_vec(),
            repr,
        }
    }

    /// Message read from a file; `repr` is its text form with invalid UTF-8 replaced
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            repr: String::from_utf8_lossy(&bytes).into_owned(),
            bytes,
        }
    }

    /// Pair-file line for this message under `algorithm`
    pub fn line(&self, algorithm: HashAlgorithm) -> String {
        format!("{} {}", self.repr, format_digest(algorithm.digest(&self.bytes)))
    }
}

/// Deterministic stream of fixed-length random messages
pub struct RandomMessages {
    rng: StdRng,
    remaining: usize,
    length: usize,
}

/// Fresh seed for a run that did not ask for one
pub fn random_seed() -> u64 {
    rand::random()
}

impl RandomMessages {
    pub fn new(count: usize, length: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            remaining: count,
            length,
        }
    }
}

impl Iterator for RandomMessages {
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mut bytes = vec![0u8; self.length];
        self.rng.fill_bytes(&mut bytes);
        Some(Message {
            repr: letter_encode(&bytes),
            bytes,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RandomMessages {}
