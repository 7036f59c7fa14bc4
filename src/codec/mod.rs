//! Byte codec - fixed-width primitives over a growable byte sequence
//!
//! The codec is the lowest layer of the genome format: layers, shapes and
//! patterns write themselves into a `ByteBuffer` and read themselves back in
//! the same order. Transport text wraps the finished byte sequence.

mod buffer;
mod transport;

pub use buffer::ByteBuffer;
