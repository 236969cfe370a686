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

//! Charset negotiation payloads (RFC 2066).
//!
//! A `REQUEST` lists character set names behind a sender-chosen separator
//! byte that also precedes the first entry:
//!
//! ```text
//! REQUEST ;UTF-8;ISO-8859-1
//! ```
//!
//! The `[TTABLE]` translation-table variant is recognized only to be
//! rejected; this engine never offers or accepts translation tables.

use crate::consts::subneg;
use bytes::{BufMut, BytesMut};
use tracing::debug;

/// A decoded CHARSET subnegotiation, option byte already stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharsetSubnegotiation {
    /// Peer proposes character sets; empty when the request was malformed
    /// or a `[TTABLE]` variant (both get rejected wholesale).
    Request {
        /// Proposed character set names, in the peer's preference order.
        entries: Vec<BytesMut>,
    },
    /// Peer accepted this character set from our request.
    Accepted(BytesMut),
    /// Peer rejected our request outright.
    Rejected,
    /// Peer sent a translation table, which we never ask for.
    TtableIs,
}

impl CharsetSubnegotiation {
    /// Parses the parameter bytes of a CHARSET subnegotiation.
    ///
    /// Returns `None` for empty, unknown, or too-short payloads, which the
    /// caller drops silently the way it drops any other stray block.
    pub fn parse(params: &[u8]) -> Option<Self> {
        let (&code, rest) = params.split_first()?;
        match code {
            subneg::REQUEST => {
                // sep then at least one name byte, and not the [TTABLE] form
                if rest.len() >= 2 && rest[0] != b'[' {
                    let sep = rest[0];
                    let entries = rest[1..]
                        .split(|&b| b == sep)
                        .filter(|entry| !entry.is_empty())
                        .map(BytesMut::from)
                        .collect();
                    Some(CharsetSubnegotiation::Request { entries })
                } else {
                    debug!("Unusable charset request ({} bytes)", rest.len());
                    Some(CharsetSubnegotiation::Request {
                        entries: Vec::new(),
                    })
                }
            }
            subneg::ACCEPTED => {
                if rest.is_empty() {
                    None
                } else {
                    Some(CharsetSubnegotiation::Accepted(BytesMut::from(rest)))
                }
            }
            subneg::REJECTED => Some(CharsetSubnegotiation::Rejected),
            subneg::TTABLE_IS => Some(CharsetSubnegotiation::TtableIs),
            _ => None,
        }
    }

    /// Builds the parameter bytes of a `REQUEST` offering the given names,
    /// each preceded by the separator.
    pub fn request_payload<'a, I>(names: I) -> BytesMut
    where
        I: IntoIterator<Item = &'a str>,
    {
        const SEP: u8 = b';';
        let mut payload = BytesMut::new();
        payload.put_u8(subneg::REQUEST);
        for name in names {
            payload.put_u8(SEP);
            payload.extend_from_slice(name.as_bytes());
        }
        payload
    }

    /// Builds the parameter bytes of an `ACCEPTED` reply.
    pub fn accepted_payload(name: &[u8]) -> BytesMut {
        let mut payload = BytesMut::with_capacity(1 + name.len());
        payload.put_u8(subneg::ACCEPTED);
        payload.extend_from_slice(name);
        payload
    }

    /// Builds the parameter bytes of a `REJECTED` reply.
    pub fn rejected_payload() -> BytesMut {
        let mut payload = BytesMut::with_capacity(1);
        payload.put_u8(subneg::REJECTED);
        payload
    }
}
