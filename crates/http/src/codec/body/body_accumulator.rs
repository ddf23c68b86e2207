//! Accumulator for request bodies delimited by the Content-Length header, as defined in
//! [RFC 7230 Section 3.3.2](https://tools.ietf.org/html/rfc7230#section-3.3.2).

use bytes::{Bytes, BytesMut};
use std::cmp;

/// Collects a request body of a known length.
///
/// The accumulator never takes more than the announced length, so bytes that belong
/// to a following request are left with the caller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BodyAccumulator {
    body: BytesMut,
    /// The total number of bytes the body is expected to have
    length: u64,
}

impl BodyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops any collected bytes and expects a body of `length` bytes.
    pub fn reset(&mut self, length: u64) {
        self.body.clear();
        self.length = length;
    }

    /// Appends as much of `src` as still fits in the body, returning how many bytes
    /// were taken.
    pub fn write(&mut self, src: &[u8]) -> usize {
        let len = usize::try_from(self.remaining()).map_or(src.len(), |remaining| cmp::min(remaining, src.len()));
        self.body.extend_from_slice(&src[..len]);
        len
    }

    /// Bytes still missing from the body.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.length - self.written()
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.body.len() as u64
    }

    #[inline]
    pub fn target_length(&self) -> u64 {
        self.length
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.written() == self.length
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Takes the collected bytes, leaving the accumulator empty.
    pub fn take(&mut self) -> Bytes {
        self.length = 0;
        self.body.split().freeze()
    }
}
