//! RNAcentral Common Library
//!
//! Shared utilities for the RNAcentral import workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the common error type and result alias
//! - **Checksums**: CRC-64 and MD5 digests over raw sequence bytes
//! - **Logging**: tracing subscriber setup driven by the environment
//!
//! # Example
//!
//! ```
//! use rnac_common::checksum::{crc64, md5_hex};
//!
//! assert_eq!(crc64(b"ACCG"), "687EBEBDB0000000");
//! assert_eq!(md5_hex(b"ACCG"), "50effd9175908e89c4759afd90205fbc");
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod checksum;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, RncError};
