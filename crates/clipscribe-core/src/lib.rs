//! Shared building blocks for clipscribe crates
//!
//! Error classification, scoped temporary files, timestamps and audio
//! content-type helpers used by the storage, transcription and pipeline layers.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod audio;
pub mod clock;
mod error;
pub mod temp;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorKind, HttpError};
pub use temp::TempResource;
