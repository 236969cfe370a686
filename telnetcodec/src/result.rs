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

/// Result type for engine operations.
pub type TelnetResult<T> = Result<T, TelnetError>;

/// Errors the engine reports to its caller.
///
/// Protocol anomalies (stray `SE`, bad NAWS lengths, malformed GMCP) are
/// logged and recovered from without surfacing here; what does surface is
/// either transport I/O trouble or the end of an MCCP compression stream,
/// and neither invalidates the engine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelnetError {
    /// An I/O error from the underlying transport plumbing.
    IoError {
        /// The kind of I/O error that occurred
        kind: std::io::ErrorKind,
        /// Description of the operation that failed
        operation: String,
    },

    /// The MCCP inflate stream ended or failed; the engine has already
    /// dropped back to plain mode when this is returned.
    Compression {
        /// The underlying zlib message
        message: String,
    },
}

impl std::error::Error for TelnetError {}

impl std::fmt::Display for TelnetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetError::IoError { kind, operation } => {
                write!(f, "I/O error during {operation}: {kind:?}")
            }
            TelnetError::Compression { message } => {
                write!(f, "compression failed: {message}")
            }
        }
    }
}

impl From<std::io::Error> for TelnetError {
    fn from(err: std::io::Error) -> Self {
        TelnetError::IoError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}

impl From<mudlink_compress::InflateError> for TelnetError {
    fn from(err: mudlink_compress::InflateError) -> Self {
        TelnetError::Compression {
            message: err.message().to_string(),
        }
    }
}
