//! I/O primitives for reading binary image containers
//!
//! This module provides the seekable reader abstraction and the
//! endianness strategies used while walking TIFF structures.

pub mod seekable;
pub mod byte_order;
