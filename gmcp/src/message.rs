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

use crate::result::{GmcpError, GmcpResult};
use bytes::BytesMut;
use std::fmt;

///
/// A single GMCP message: a dotted package name plus an optional JSON body.
///
/// Format on the wire (inside `IAC SB GMCP ... IAC SE`):
/// `<package.subpackage.command> <json_data>`, where the space and body are
/// optional. The body is kept as a raw string; [`GmcpMessage::from_bytes`]
/// only proves that it parses as JSON.
///
/// # Examples
///
/// ```
/// use mudlink_gmcp::GmcpMessage;
///
/// let msg = GmcpMessage::from_bytes(b"Core.Hello {\"client\":\"mudlink\"}").unwrap();
/// assert_eq!(msg.name(), "Core.Hello");
/// assert_eq!(msg.json(), Some(r#"{"client":"mudlink"}"#));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GmcpMessage {
    /// The package name, e.g. `Core.Hello` or `Char.Vitals`.
    name: String,
    /// Optional JSON body, separated from the name by a single space.
    json: Option<String>,
}

impl GmcpMessage {
    /// Creates a message with a package name and a JSON body.
    ///
    /// The body is taken on faith here; use [`GmcpMessage::from_bytes`] when
    /// the input comes from the wire.
    pub fn new<S: Into<String>, D: Into<String>>(name: S, json: D) -> Self {
        Self {
            name: name.into(),
            json: Some(json.into()),
        }
    }

    /// Creates a body-less message (command only), e.g. `Core.Ping`.
    pub fn command<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            json: None,
        }
    }

    /// Parses a GMCP message from a raw subnegotiation payload.
    ///
    /// The payload must be UTF-8 and must begin with a non-empty package
    /// name; any body after the first space must be well-formed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GmcpError::InvalidUtf8`], [`GmcpError::EmptyName`], or
    /// [`GmcpError::InvalidJson`] accordingly.
    pub fn from_bytes(bytes: &[u8]) -> GmcpResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| GmcpError::InvalidUtf8)?;

        let (name, body) = match text.find(' ') {
            Some(pos) => (&text[..pos], Some(&text[pos + 1..])),
            None => (text, None),
        };
        if name.is_empty() {
            return Err(GmcpError::EmptyName);
        }

        let json = match body {
            Some(body) if !body.trim().is_empty() => {
                serde_json::from_str::<serde_json::Value>(body).map_err(|e| {
                    GmcpError::InvalidJson {
                        reason: e.to_string(),
                    }
                })?;
                Some(body.to_string())
            }
            _ => None,
        };

        Ok(Self {
            name: name.to_string(),
            json,
        })
    }

    /// Returns the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the JSON body, if present.
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    /// Deserializes the JSON body, if present.
    pub fn json_value(&self) -> Option<serde_json::Value> {
        self.json
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }

    /// Encodes the message back to its wire payload (without telnet framing).
    pub fn to_bytes(&self) -> BytesMut {
        let mut bytes = BytesMut::with_capacity(self.len());
        bytes.extend_from_slice(self.name.as_bytes());
        if let Some(ref json) = self.json {
            bytes.extend_from_slice(b" ");
            bytes.extend_from_slice(json.as_bytes());
        }
        bytes
    }

    /// Returns the encoded byte length of this message.
    pub fn len(&self) -> usize {
        let mut len = self.name.len();
        if let Some(ref json) = self.json {
            len += 1 + json.len();
        }
        len
    }

    /// Checks whether the message has an empty package name.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for GmcpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref json) = self.json {
            write!(f, " {json}")?;
        }
        Ok(())
    }
}
