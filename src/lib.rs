//! Cash-denomination exchange order desk.
//!
//! This crate implements a small currency-exchange intake and admin
//! flow: customers order fixed cash denominations, a per-denomination
//! service fee is computed at placement time, and orders live in a
//! single JSON-backed sequence (a local file or an opaque remote blob)
//! that the admin side lists, toggles, exports to a spreadsheet, and
//! can wipe.

pub mod admin;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod client;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod desk;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod fees;
pub mod models;
pub mod stats;
pub mod storage;
