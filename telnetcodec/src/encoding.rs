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

//! Text encoding selection and conversion.
//!
//! MUD servers predate Unicode by decades; the practical encodings on the
//! wire are Latin-1, UTF-8, and plain ASCII. Which one is active comes from
//! either RFC 2066 `CHARSET` negotiation or, absent that, the host's
//! configuration. Conversion itself is delegated to `encoding_rs`.

use tracing::warn;

/// The character encodings this engine can negotiate and convert.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CharacterEncoding {
    /// ISO-8859-1, the traditional MUD default.
    #[default]
    Latin1,
    /// UTF-8.
    Utf8,
    /// 7-bit US-ASCII.
    Ascii,
}

impl CharacterEncoding {
    /// The canonical RFC 2066 name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            CharacterEncoding::Latin1 => "ISO-8859-1",
            CharacterEncoding::Utf8 => "UTF-8",
            CharacterEncoding::Ascii => "US-ASCII",
        }
    }

    /// Resolves a wire name (case-insensitive, common aliases included).
    pub fn from_name(name: &[u8]) -> Option<Self> {
        let name = std::str::from_utf8(name).ok()?;
        match name.trim().to_ascii_uppercase().as_str() {
            "ISO-8859-1" | "ISO8859-1" | "LATIN-1" | "LATIN1" => Some(CharacterEncoding::Latin1),
            "UTF-8" | "UTF8" => Some(CharacterEncoding::Utf8),
            "US-ASCII" | "ASCII" => Some(CharacterEncoding::Ascii),
            _ => None,
        }
    }
}

impl std::fmt::Display for CharacterEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

///
/// The active text encoding plus conversion to and from Rust strings.
///
/// The engine owns one of these per connection. `CHARSET` negotiation swaps
/// the active encoding; when the peer never negotiated `CHARSET`, the engine
/// reconciles it against the host configuration on every access instead.
///
#[derive(Clone, Debug)]
pub struct TextCodec {
    encoding: CharacterEncoding,
}

impl TextCodec {
    /// Creates a codec with the given initial encoding.
    pub fn new(encoding: CharacterEncoding) -> Self {
        Self { encoding }
    }

    /// The currently active encoding.
    pub fn encoding(&self) -> CharacterEncoding {
        self.encoding
    }

    /// Switches the active encoding.
    pub fn set_encoding(&mut self, encoding: CharacterEncoding) {
        self.encoding = encoding;
    }

    /// Switches the active encoding by wire name; unknown names are logged
    /// and leave the current encoding in place.
    pub fn set_encoding_for_name(&mut self, name: &[u8]) {
        match CharacterEncoding::from_name(name) {
            Some(encoding) => self.encoding = encoding,
            None => warn!(
                "Ignoring unsupported character set {:?}",
                String::from_utf8_lossy(name)
            ),
        }
    }

    /// The encodings we offer in a `CHARSET REQUEST`, current one first.
    pub fn supported_encodings(&self) -> Vec<&'static str> {
        let mut names = vec![self.encoding.name()];
        for encoding in [
            CharacterEncoding::Utf8,
            CharacterEncoding::Latin1,
            CharacterEncoding::Ascii,
        ] {
            if encoding != self.encoding {
                names.push(encoding.name());
            }
        }
        names
    }

    /// Whether a peer-proposed character set name is one we can use.
    pub fn supports(&self, name: &[u8]) -> bool {
        CharacterEncoding::from_name(name).is_some()
    }

    /// Decodes inbound bytes to a string under the active encoding.
    /// Unmappable input becomes U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self.encoding {
            CharacterEncoding::Latin1 => {
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                decoded.into_owned()
            }
            CharacterEncoding::Utf8 | CharacterEncoding::Ascii => {
                let (decoded, _, _) = encoding_rs::UTF_8.decode(bytes);
                decoded.into_owned()
            }
        }
    }

    /// Encodes a string to outbound bytes under the active encoding.
    /// Unmappable characters degrade to the encoder's substitute.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self.encoding {
            CharacterEncoding::Latin1 => {
                let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(text);
                encoded.into_owned()
            }
            CharacterEncoding::Utf8 => text.as_bytes().to_vec(),
            CharacterEncoding::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new(CharacterEncoding::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(
            CharacterEncoding::from_name(b"utf-8"),
            Some(CharacterEncoding::Utf8)
        );
        assert_eq!(
            CharacterEncoding::from_name(b"LATIN-1"),
            Some(CharacterEncoding::Latin1)
        );
        assert_eq!(
            CharacterEncoding::from_name(b"US-ASCII"),
            Some(CharacterEncoding::Ascii)
        );
        assert_eq!(CharacterEncoding::from_name(b"KOI8-R"), None);
    }

    #[test]
    fn supported_list_leads_with_current() {
        let codec = TextCodec::new(CharacterEncoding::Utf8);
        assert_eq!(
            codec.supported_encodings(),
            vec!["UTF-8", "ISO-8859-1", "US-ASCII"]
        );

        let codec = TextCodec::default();
        assert_eq!(codec.supported_encodings()[0], "ISO-8859-1");
    }

    #[test]
    fn set_for_unknown_name_keeps_current() {
        let mut codec = TextCodec::new(CharacterEncoding::Utf8);
        codec.set_encoding_for_name(b"EBCDIC");
        assert_eq!(codec.encoding(), CharacterEncoding::Utf8);
    }

    #[test]
    fn latin1_roundtrip() {
        let codec = TextCodec::new(CharacterEncoding::Latin1);
        let bytes = codec.encode("café");
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(codec.decode(&bytes), "café");
    }

    #[test]
    fn utf8_roundtrip() {
        let codec = TextCodec::new(CharacterEncoding::Utf8);
        let text = "mörkö 🦀";
        assert_eq!(codec.decode(&codec.encode(text)), text);
    }

    #[test]
    fn ascii_substitutes_unmappable() {
        let codec = TextCodec::new(CharacterEncoding::Ascii);
        assert_eq!(codec.encode("naïve"), b"na?ve".to_vec());
    }
}
