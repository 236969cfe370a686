//
// Copyright 2019-2026 The Mudlink Authors. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! # Mudlink MCCPv2 Decompression
//!
//! MCCPv2 (telnet option 86, `COMPRESS2`) lets a MUD server switch the
//! connection into a zlib deflate stream immediately after it sends
//! `IAC SB COMPRESS2 IAC SE`. From that byte onward everything the server
//! transmits arrives compressed, telnet commands included, and the inflated
//! output has to be fed back through the same telnet byte state machine.
//!
//! That switch can happen between two bytes of a single `read()`, so this
//! crate provides a *pull* inflater rather than a stream wrapper:
//! [`StreamInflater::feed`] takes whatever slice of the read buffer is left,
//! inflates it in 1 KiB output chunks, and hands back the plaintext for the
//! caller to re-scan.
//!
//! The stream has no natural end while compression is healthy; a clean
//! deflate stream end means the server terminated compression and is
//! reported as an error so the session can fall back to plain mode.
//!
//! # Example
//!
//! ```
//! use mudlink_compress::StreamInflater;
//!
//! # fn example(compressed: &[u8]) -> Result<(), mudlink_compress::InflateError> {
//! let mut inflater = StreamInflater::new();
//! inflater.feed(compressed)?;
//! let plaintext = inflater.take_output();
//! # let _ = plaintext;
//! # Ok(())
//! # }
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

use flate2::{Decompress, FlushDecompress, Status};
use tracing::debug;

/// Output is drained from zlib in chunks of this size.
const CHUNK: usize = 1024;

/// Why inflation stopped; any of these ends compression for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflateError {
    message: String,
}

impl InflateError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The underlying zlib message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for InflateError {}

impl std::fmt::Display for InflateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "inflate failed: {}", self.message)
    }
}

///
/// A streaming zlib inflater for an MCCPv2 substream.
///
/// One instance corresponds to one compression episode: it is created when
/// the `COMPRESS2` subnegotiation completes and dropped when the stream
/// errors or ends. State carries over between [`feed`](Self::feed) calls, so
/// deflate blocks may be split across reads arbitrarily.
///
pub struct StreamInflater {
    stream: Decompress,
    output: Vec<u8>,
}

impl StreamInflater {
    /// Creates an inflater expecting a zlib-wrapped deflate stream, which is
    /// what MCCPv2 servers send.
    pub fn new() -> Self {
        Self {
            stream: Decompress::new(true),
            output: Vec::new(),
        }
    }

    /// Inflates one slice of the inbound transport buffer into the internal
    /// output buffer, draining zlib's window in 1 KiB steps.
    ///
    /// Plaintext produced *before* a failure stays retrievable through
    /// [`take_output`](Self::take_output), so a mid-buffer error never eats
    /// bytes that decoded cleanly. Errors cover corrupt data and a clean
    /// stream end alike; after either, the caller must discard this
    /// inflater and drop back to plain mode.
    pub fn feed(&mut self, input: &[u8]) -> Result<(), InflateError> {
        let mut chunk = [0u8; CHUNK];
        let mut pos = 0;

        loop {
            let in_before = self.stream.total_in();
            let out_before = self.stream.total_out();

            let result = self
                .stream
                .decompress(&input[pos..], &mut chunk, FlushDecompress::Sync);

            // the totals advance even on a failed call, so plaintext decoded
            // before the bad byte is still recovered
            pos += usize::try_from(self.stream.total_in() - in_before).unwrap_or(usize::MAX);
            let produced =
                usize::try_from(self.stream.total_out() - out_before).unwrap_or(usize::MAX);
            self.output.extend_from_slice(&chunk[..produced]);

            let status = result.map_err(|e| InflateError::new(e.to_string()))?;

            if status == Status::StreamEnd {
                debug!(
                    "zlib stream ended after {} compressed bytes",
                    self.stream.total_in()
                );
                return Err(InflateError::new("stream ended"));
            }

            // Done once the input is consumed and zlib has no pending output
            // (a full chunk means there may be more to drain).
            if pos >= input.len() && produced < CHUNK {
                break;
            }
        }

        if !self.output.is_empty() && !input.is_empty() {
            debug!(
                "zlib compression ratio of {:.1}:1",
                self.output.len() as f64 / input.len() as f64
            );
        }
        Ok(())
    }

    /// Takes every plaintext byte inflated since the last call, including
    /// anything produced before a failed [`feed`](Self::feed).
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Total compressed bytes consumed over the lifetime of this inflater.
    pub fn total_in(&self) -> u64 {
        self.stream.total_in()
    }

    /// Total plaintext bytes produced over the lifetime of this inflater.
    pub fn total_out(&self) -> u64 {
        self.stream.total_out()
    }
}

impl Default for StreamInflater {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StreamInflater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamInflater")
            .field("total_in", &self.stream.total_in())
            .field("total_out", &self.stream.total_out())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{Compress, Compression, FlushCompress};

    /// Deflates `data` with a sync flush and no stream end, the way an MCCP
    /// server keeps its stream open.
    fn deflate_open(data: &[u8]) -> Vec<u8> {
        let mut compressor = Compress::new(Compression::default(), true);
        let mut out = Vec::with_capacity(data.len() + 1024);
        compressor
            .compress_vec(data, &mut out, FlushCompress::Sync)
            .expect("compress");
        out
    }

    /// Deflates `data` and finishes the stream.
    fn deflate_finished(data: &[u8]) -> Vec<u8> {
        let mut compressor = Compress::new(Compression::default(), true);
        let mut out = Vec::with_capacity(data.len() + 1024);
        compressor
            .compress_vec(data, &mut out, FlushCompress::Finish)
            .expect("compress");
        out
    }

    #[test]
    fn feed_roundtrip() {
        let original = b"hello\r\n";
        let compressed = deflate_open(original);

        let mut inflater = StreamInflater::new();
        inflater.feed(&compressed).expect("inflate");
        assert_eq!(inflater.take_output(), original);
    }

    #[test]
    fn feed_across_split_input() {
        let original = b"The quick brown fox jumps over the lazy dog\r\n".repeat(8);
        let compressed = deflate_open(&original);

        let mut inflater = StreamInflater::new();
        let mut plaintext = Vec::new();
        for piece in compressed.chunks(3) {
            inflater.feed(piece).expect("inflate");
            plaintext.extend(inflater.take_output());
        }
        assert_eq!(plaintext, original);
    }

    #[test]
    fn feed_output_larger_than_chunk() {
        let original = vec![b'x'; CHUNK * 5 + 17];
        let compressed = deflate_open(&original);

        let mut inflater = StreamInflater::new();
        inflater.feed(&compressed).expect("inflate");
        assert_eq!(inflater.take_output(), original);
    }

    #[test]
    fn feed_empty_input() {
        let mut inflater = StreamInflater::new();
        inflater.feed(&[]).expect("inflate");
        assert!(inflater.take_output().is_empty());
    }

    #[test]
    fn take_output_drains() {
        let compressed = deflate_open(b"once");
        let mut inflater = StreamInflater::new();
        inflater.feed(&compressed).expect("inflate");
        assert_eq!(inflater.take_output(), b"once");
        assert!(inflater.take_output().is_empty());
    }

    #[test]
    fn stream_end_is_an_error_but_keeps_output() {
        let compressed = deflate_finished(b"goodbye");
        let mut inflater = StreamInflater::new();
        assert!(inflater.feed(&compressed).is_err());
        assert_eq!(inflater.take_output(), b"goodbye");
    }

    #[test]
    fn garbage_is_an_error() {
        let mut inflater = StreamInflater::new();
        assert!(inflater.feed(b"this is not a zlib stream").is_err());
        assert!(inflater.take_output().is_empty());
    }

    #[test]
    fn partial_output_survives_a_mid_buffer_error() {
        let mut input = deflate_open(b"kept");
        input.extend_from_slice(b"garbage garbage garbage");

        let mut inflater = StreamInflater::new();
        assert!(inflater.feed(&input).is_err());
        assert_eq!(inflater.take_output(), b"kept");
    }

    #[test]
    fn accounting_tracks_totals() {
        let original = b"accounting check";
        let compressed = deflate_open(original);

        let mut inflater = StreamInflater::new();
        inflater.feed(&compressed).expect("inflate");
        let plaintext = inflater.take_output();
        assert_eq!(inflater.total_in(), compressed.len() as u64);
        assert_eq!(inflater.total_out(), plaintext.len() as u64);
    }
}
