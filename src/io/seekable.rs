//! Seekable reader trait
//!
//! Binary format readers in this crate walk their input with a mix of
//! sequential reads and absolute seeks (record skipping, measure-block
//! skipping). This trait names that combination once so readers can take
//! a file, a cursor over an in-memory buffer, or anything else that
//! qualifies.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
