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

/// Result type for GMCP parsing operations.
pub type GmcpResult<T> = Result<T, GmcpError>;

/// Errors raised while parsing a GMCP payload or module registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GmcpError {
    /// The subnegotiation payload was not valid UTF-8.
    InvalidUtf8,

    /// The payload had no package name before the first space.
    EmptyName,

    /// The body after the package name was not well-formed JSON.
    InvalidJson {
        /// Parser description of what was wrong with the body.
        reason: String,
    },

    /// A module was enabled without the version the protocol requires.
    MissingVersion,
}

impl std::error::Error for GmcpError {}

impl std::fmt::Display for GmcpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GmcpError::InvalidUtf8 => write!(f, "payload is not valid UTF-8"),
            GmcpError::EmptyName => write!(f, "payload has no package name"),
            GmcpError::InvalidJson { reason } => write!(f, "invalid JSON body: {reason}"),
            GmcpError::MissingVersion => write!(f, "missing version"),
        }
    }
}
