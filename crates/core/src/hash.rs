//! Hash algorithms under test
//!
//! Small 32-bit checksums and hashes aimed at short messages, plus seahash
//! as a 64-bit baseline that should practically never collide.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ADLER_MOD: u32 = 0xFFF1;
const CRC32_POLY: u32 = 0xEDB8_8320;

/// Hash algorithm selectable from the command line or a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// Plain Adler-32 checksum
    Adler32,
    /// Adler-32 with a rotating accumulator, tuned for short data
    Adler32x,
    /// Lattay's Clunky Hash, a xoshiro-inspired 32-bit hash
    Lch32,
    /// Reflected CRC-32 (IEEE), bitwise
    Crc32,
    /// 64-bit seahash
    SeaHash,
}

impl HashAlgorithm {
    /// Every available algorithm, in display order
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Adler32,
        HashAlgorithm::Adler32x,
        HashAlgorithm::Lch32,
        HashAlgorithm::Crc32,
        HashAlgorithm::SeaHash,
    ];

    /// Compute the digest of `bytes`
    pub fn digest(&self, bytes: &[u8]) -> u64 {
        match self {
            HashAlgorithm::Adler32 => u64::from(adler32(bytes)),
            HashAlgorithm::Adler32x => u64::from(adler32x(bytes)),
            HashAlgorithm::Lch32 => u64::from(lch32(bytes)),
            HashAlgorithm::Crc32 => u64::from(crc32(bytes)),
            HashAlgorithm::SeaHash => seahash::hash(bytes),
        }
    }

    /// Compute the digest of a string
    pub fn digest_str(&self, s: &str) -> u64 {
        self.digest(s.as_bytes())
    }

    /// Width of the digest in bits
    pub fn bits(&self) -> u32 {
        match self {
            HashAlgorithm::SeaHash => 64,
            _ => 32,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Adler32 => "adler32",
            HashAlgorithm::Adler32x => "adler32x",
            HashAlgorithm::Lch32 => "lch32",
            HashAlgorithm::Crc32 => "crc32",
            HashAlgorithm::SeaHash => "seahash",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// Render a digest the way pair files store it: uppercase hex, no prefix, no padding
pub fn format_digest(digest: u64) -> String {
    format!("{:X}", digest)
}

/// Adler-32 checksum
pub fn adler32(bytes: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in bytes {
        a = (a + u32::from(byte)) % ADLER_MOD;
        b = (b + a) % ADLER_MOD;
    }
    (b << 16) | a
}

/// Adler-32 variant whose first sum is rotated before each byte is added,
/// spreading short inputs over more of the 16-bit range.
pub fn adler32x(bytes: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32 << 9, 0u32);
    for &byte in bytes {
        a = ((a << 7) + (a >> 9) + u32::from(byte)) % ADLER_MOD;
        b = (b + a) % ADLER_MOD;
    }
    (b << 16) | a
}

/// LCH32: consumes the input two bytes at a time, mixing each block into a
/// three-word state with xor and 32-bit rotations.
pub fn lch32(bytes: &[u8]) -> u32 {
    let mut buf: [u32; 3] = [0x51b7_3064, 0x9f4a_5705, 0x7b04_9943];
    let mut digest: u32 = 0x698a_3c57;

    for pair in bytes.chunks(2) {
        let a = pair[0];
        // odd tail: the last byte fills both halves of the block
        let b = pair.get(1).copied().unwrap_or(a);
        let block1 = u32::from(a) | (u32::from(b) << 8);
        let block2 = block1.rotate_left(5);

        let t = buf[2].wrapping_add(buf[0]);
        buf[1] ^= block1 | (block2 << 16);

        buf[2] ^= buf[0];
        digest ^= buf[1];
        buf[1] ^= buf[2];
        buf[0] ^= digest;

        buf[0] ^= t;

        digest = digest.rotate_left(23);
    }
    digest
}

/// CRC-32 (IEEE 802.3), reflected, computed bit by bit without a table
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (CRC32_POLY & mask);
        }
    }
    !crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adler32_known_vectors() {
        assert_eq!(adler32(b""), 1);
        assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn test_adler32x_known_vectors() {
        assert_eq!(adler32x(b""), 0x200);
        assert_eq!(adler32x(b"a"), 0x0071_0071);
        assert_eq!(adler32x(b"hello"), 0xE364_09AF);
    }

    #[test]
    fn test_lch32_known_vectors() {
        assert_eq!(lch32(b""), 0x698A_3C57);
        assert_eq!(lch32(b"a"), 0x19ED_7005);
        assert_eq!(lch32(b"ab"), 0x99DD_7004);
        assert_eq!(lch32(b"abc"), 0x9206_3247);
        assert_eq!(lch32(b"hello"), 0x4E02_1176);
    }

    #[test]
    fn test_lch32_separates_near_messages() {
        assert_ne!(lch32(b"a#'po45"), lch32(b"a#'po46"));
        assert_ne!(lch32(b"a#'po45"), lch32(b"a3'po45"));
    }

    #[test]
    fn test_crc32_known_vectors() {
        assert_eq!(crc32(b""), 0);
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(
            crc32(b"The quick brown fox jumps over the lazy dog"),
            0x414F_A339
        );
    }

    #[test]
    fn test_seahash_consistency() {
        let data = b"test data";
        let hash1 = HashAlgorithm::SeaHash.digest(data);
        let hash2 = HashAlgorithm::SeaHash.digest(data);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1, seahash::hash(data));
    }

    #[test]
    fn test_digest_dispatch() {
        assert_eq!(HashAlgorithm::Adler32.digest_str("Wikipedia"), 0x11E6_0398);
        assert_eq!(HashAlgorithm::Crc32.digest_str("123456789"), 0xCBF4_3926);
        for algorithm in HashAlgorithm::ALL {
            if algorithm.bits() == 32 {
                assert!(algorithm.digest(b"some message") <= u64::from(u32::MAX));
            }
        }
    }

    #[test]
    fn test_parse_algorithm_names() {
        for algorithm in HashAlgorithm::ALL {
            assert_eq!(algorithm.name().parse::<HashAlgorithm>().unwrap(), algorithm);
        }
        assert_eq!("CRC32".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Crc32);
        assert!(matches!(
            "md5".parse::<HashAlgorithm>(),
            Err(Error::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_format_digest() {
        assert_eq!(format_digest(0x11E6_0398), "11E60398");
        assert_eq!(format_digest(0x200), "200");
        assert_eq!(format_digest(0), "0");
    }
}
