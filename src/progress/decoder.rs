// ABOUTME: Incremental decoder for the engine's JSON progress stream.
// ABOUTME: Accepts newline-delimited or back-to-back objects split across chunks.

use super::event::ProgressEvent;
use bytes::{Buf, BytesMut};

#[derive(Debug, thiserror::Error)]
pub enum ProgressDecodeError {
    #[error("malformed progress message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stream ended inside a progress message ({0} bytes left over)")]
    Truncated(usize),
}

/// Buffers response chunks and yields complete events.
///
/// Only whole events leave the decoder; a partial object waits for the next
/// chunk.
#[derive(Debug, Default)]
pub struct ProgressDecoder {
    buf: BytesMut,
}

impl ProgressDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Next complete event, or `None` if more input is needed.
    pub fn next_event(&mut self) -> Result<Option<ProgressEvent>, ProgressDecodeError> {
        self.skip_whitespace();
        if self.buf.is_empty() {
            return Ok(None);
        }

        let mut events = serde_json::Deserializer::from_slice(&self.buf).into_iter::<ProgressEvent>();
        match events.next() {
            Some(Ok(event)) => {
                let consumed = events.byte_offset();
                self.buf.advance(consumed);
                Ok(Some(event))
            }
            Some(Err(e)) if e.is_eof() => Ok(None),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Check that nothing but whitespace is left once the stream has ended.
    pub fn finish(mut self) -> Result<(), ProgressDecodeError> {
        self.skip_whitespace();
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(ProgressDecodeError::Truncated(self.buf.len()))
        }
    }

    fn skip_whitespace(&mut self) {
        let leading = self
            .buf
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.buf.advance(leading);
    }
}
