//! Bounded accumulation of one response body.

use std::collections::TryReserveError;
use thiserror::Error;

/// Accumulator failure. Any append error aborts the in-flight transfer;
/// a body is never silently truncated.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("response body exceeds {limit} bytes")]
    Overflow { limit: usize },
    #[error("response buffer allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Receives response data chunk-by-chunk, in arrival order.
pub trait BodySink {
    /// # Errors
    /// A failed append aborts the transfer; partial bodies are never
    /// interpreted.
    fn append(&mut self, chunk: &[u8]) -> Result<(), SinkError>;
}

/// Growable buffer for one response body, created fresh per request and
/// consumed once the transfer completes.
#[derive(Debug)]
pub struct BodyBuffer {
    buf: Vec<u8>,
    limit: usize,
}

impl BodyBuffer {
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            limit,
        }
    }

    /// Finalize the transfer and take the concatenated body.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl BodySink for BodyBuffer {
    fn append(&mut self, chunk: &[u8]) -> Result<(), SinkError> {
        if self.buf.len().saturating_add(chunk.len()) > self.limit {
            return Err(SinkError::Overflow { limit: self.limit });
        }
        self.buf.try_reserve(chunk.len())?;
        self.buf.extend_from_slice(chunk);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_chunks_in_arrival_order() {
        let mut buffer = BodyBuffer::with_limit(64);
        buffer.append(b"{\"authenticated\"").expect("first chunk fits");
        buffer.append(b": true}").expect("second chunk fits");
        assert_eq!(buffer.into_bytes(), b"{\"authenticated\": true}");
    }

    #[test]
    fn accepts_a_body_exactly_at_the_limit() {
        let mut buffer = BodyBuffer::with_limit(4);
        buffer.append(b"ab").expect("fits");
        buffer.append(b"cd").expect("still fits");
        assert_eq!(buffer.into_bytes(), b"abcd");
    }

    #[test]
    fn rejects_a_chunk_that_would_cross_the_limit() {
        let mut buffer = BodyBuffer::with_limit(4);
        buffer.append(b"abc").expect("fits");
        let err = buffer.append(b"de").expect_err("5 bytes exceed the limit");
        assert!(matches!(err, SinkError::Overflow { limit: 4 }));
    }
}
