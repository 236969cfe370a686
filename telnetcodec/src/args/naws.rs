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

//! Negotiate About Window Size
//!

use byteorder::{BigEndian, WriteBytesExt};
use bytes::BytesMut;

/// Terminal dimensions exchanged via the NAWS option.
///
/// RFC 1073 encodes the window size as four bytes in network order:
/// two for columns, two for rows. Hosts hand the engine whatever their
/// widget layer reports, so construction clamps to the representable range.
///
/// # Example
/// ```
/// use mudlink_telnetcodec::naws::WindowSize;
///
/// let size = WindowSize::clamped(80, 24);
/// assert_eq!(size.cols, 80);
/// assert_eq!(size.rows, 24);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// Columns (characters per line)
    pub cols: u16,
    /// Rows (lines)
    pub rows: u16,
}

impl WindowSize {
    /// Creates a window size from exact dimensions.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// Creates a window size from host-supplied dimensions, clamping each
    /// axis into `0..=65535`.
    pub fn clamped(cols: i32, rows: i32) -> Self {
        WindowSize {
            cols: u16::try_from(cols.clamp(0, i32::from(u16::MAX))).unwrap_or(u16::MAX),
            rows: u16::try_from(rows.clamp(0, i32::from(u16::MAX))).unwrap_or(u16::MAX),
        }
    }

    /// Renders the four parameter bytes of the NAWS subnegotiation,
    /// before telnet escaping.
    pub fn to_payload(self) -> BytesMut {
        let mut payload = Vec::with_capacity(4);
        // infallible: writing to a Vec
        let _ = payload.write_u16::<BigEndian>(self.cols);
        let _ = payload.write_u16::<BigEndian>(self.rows);
        BytesMut::from(&payload[..])
    }

    /// Decodes the four parameter bytes of a NAWS subnegotiation.
    ///
    /// Returns `None` for any payload that is not exactly four bytes, which
    /// the caller treats as a corrupt subnegotiation.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        match payload {
            [x1, x2, y1, y2] => Some(WindowSize {
                cols: u16::from_be_bytes([*x1, *x2]),
                rows: u16::from_be_bytes([*y1, *y2]),
            }),
            _ => None,
        }
    }
}

impl Default for WindowSize {
    /// The traditional 80x24 terminal, used until the host reports better.
    fn default() -> Self {
        WindowSize { cols: 80, rows: 24 }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.cols, self.rows)
    }
}
