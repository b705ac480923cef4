//! Sequence checksums
//!
//! Every sequence is keyed by two digests of its raw bytes: the SwissProt
//! CRC-64 (ISO polynomial, reflected, zero initial value) rendered as 16
//! upper-case hex digits, and the MD5 digest rendered as lower-case hex.

use crate::error::{Result, RncError};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Reflected form of the ISO 3309 polynomial x^64 + x^4 + x^3 + x + 1.
const CRC64_POLY: u64 = 0xD800_0000_0000_0000;

const CRC64_TABLE: [u64; 256] = build_crc64_table();

const fn build_crc64_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0;
    while i < 256 {
        let mut value = i as u64;
        let mut bit = 0;
        while bit < 8 {
            if value & 1 == 1 {
                value = (value >> 1) ^ CRC64_POLY;
            } else {
                value >>= 1;
            }
            bit += 1;
        }
        table[i] = value;
        i += 1;
    }
    table
}

/// Checksum algorithms used for sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    Crc64,
    Md5,
}

impl ChecksumAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Crc64 => "crc64",
            ChecksumAlgorithm::Md5 => "md5",
        }
    }
}

impl std::str::FromStr for ChecksumAlgorithm {
    type Err = RncError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crc64" | "crc-64" => Ok(ChecksumAlgorithm::Crc64),
            "md5" => Ok(ChecksumAlgorithm::Md5),
            _ => Err(RncError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Incremental CRC-64 state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc64 {
    value: u64,
}

impl Crc64 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let index = ((self.value ^ u64::from(byte)) & 0xff) as usize;
            self.value = CRC64_TABLE[index] ^ (self.value >> 8);
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn hex(&self) -> String {
        format!("{:016X}", self.value)
    }
}

/// CRC-64 of `data` as 16 upper-case hex digits.
pub fn crc64(data: &[u8]) -> String {
    let mut crc = Crc64::new();
    crc.update(data);
    crc.hex()
}

/// MD5 of `data` as lower-case hex.
pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Compute a checksum for any readable source
pub fn compute_checksum<R: Read>(reader: &mut R, algorithm: ChecksumAlgorithm) -> Result<String> {
    let mut buffer = [0u8; 8192];
    match algorithm {
        ChecksumAlgorithm::Crc64 => {
            let mut crc = Crc64::new();
            loop {
                let bytes_read = reader.read(&mut buffer)?;
                if bytes_read == 0 {
                    break;
                }
                crc.update(&buffer[..bytes_read]);
            }
            Ok(crc.hex())
        },
        ChecksumAlgorithm::Md5 => {
            let mut context = md5::Context::new();
            loop {
                let bytes_read = reader.read(&mut buffer)?;
                if bytes_read == 0 {
                    break;
                }
                context.consume(&buffer[..bytes_read]);
            }
            Ok(format!("{:x}", context.compute()))
        },
    }
}

/// Verify that `data` has the expected checksum.
///
/// Hex comparison ignores case so CRC-64 values coming from lower-casing
/// loaders still match.
pub fn verify_checksum(data: &[u8], expected: &str, algorithm: ChecksumAlgorithm) -> Result<bool> {
    let actual = match algorithm {
        ChecksumAlgorithm::Crc64 => crc64(data),
        ChecksumAlgorithm::Md5 => md5_hex(data),
    };
    if actual.eq_ignore_ascii_case(expected) {
        Ok(true)
    } else {
        Err(RncError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_crc64_known_values() {
        assert_eq!(crc64(b"ACCG"), "687EBEBDB0000000");
        assert_eq!(crc64(b"ACGTACGTACGT"), "C4FBB762C4A87EBD");
        assert_eq!(crc64(b"GATTACAGATTACA"), "CA01F885E5FF437D");
    }

    #[test]
    fn test_crc64_empty_is_zero() {
        assert_eq!(crc64(b""), "0000000000000000");
    }

    #[test]
    fn test_md5_known_values() {
        assert_eq!(md5_hex(b"ACCG"), "50effd9175908e89c4759afd90205fbc");
        assert_eq!(md5_hex(b"GATTACAGATTACA"), "a0ae76be441aae7d2cbdc50ba00af74f");
    }

    #[test]
    fn test_compute_checksum_from_reader() {
        let mut cursor = Cursor::new(b"ACGTACGTACGT".to_vec());
        let crc = compute_checksum(&mut cursor, ChecksumAlgorithm::Crc64).unwrap();
        assert_eq!(crc, "C4FBB762C4A87EBD");

        let mut cursor = Cursor::new(b"hello world".to_vec());
        let md5 = compute_checksum(&mut cursor, ChecksumAlgorithm::Md5).unwrap();
        assert_eq!(md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn test_incremental_crc64_matches_one_shot() {
        let mut crc = Crc64::new();
        crc.update(b"GATTACA");
        crc.update(b"GATTACA");
        assert_eq!(crc.hex(), crc64(b"GATTACAGATTACA"));
    }

    #[test]
    fn test_verify_checksum() {
        assert!(verify_checksum(b"ACCG", "687ebebdb0000000", ChecksumAlgorithm::Crc64).unwrap());
        let err = verify_checksum(b"ACCG", "0000", ChecksumAlgorithm::Md5).unwrap_err();
        assert!(matches!(err, RncError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_compute_checksum_from_file() {
        let mut file = tempfile::tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"GATTACAGATTACA").unwrap();
        std::io::Seek::rewind(&mut file).unwrap();

        let md5 = compute_checksum(&mut file, ChecksumAlgorithm::Md5).unwrap();
        assert_eq!(md5, md5_hex(b"GATTACAGATTACA"));
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("CRC64".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Crc64);
        assert_eq!("md5".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Md5);
        assert!("sha1".parse::<ChecksumAlgorithm>().is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_incremental_crc64_matches_one_shot(
            data in proptest::collection::vec(proptest::num::u8::ANY, 0..512),
            split in 0usize..512,
        ) {
            let split = split.min(data.len());
            let mut crc = Crc64::new();
            crc.update(&data[..split]);
            crc.update(&data[split..]);
            proptest::prop_assert_eq!(crc.hex(), crc64(&data));
        }

        #[test]
        fn prop_digests_verify(data in proptest::collection::vec(proptest::num::u8::ANY, 0..256)) {
            proptest::prop_assert!(verify_checksum(&data, &crc64(&data), ChecksumAlgorithm::Crc64).unwrap());
            proptest::prop_assert!(verify_checksum(&data, &md5_hex(&data), ChecksumAlgorithm::Md5).unwrap());
            proptest::prop_assert_eq!(crc64(&data).len(), 16);
            proptest::prop_assert_eq!(md5_hex(&data).len(), 32);
        }
    }
}
