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

use std::fmt;
use std::hash::{Hash, Hasher};

/// Version value meaning "no version negotiated" for a module.
pub const DEFAULT_GMCP_MODULE_VERSION: u32 = 0;

///
/// The top-level GMCP packages this engine recognizes and tracks versions
/// for. Anything else a peer registers is carried in the module set but has
/// no version slot.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GmcpModuleType {
    /// `Char` - character vitals, stats, skills.
    Char,
    /// `Comm` - communication channels.
    Comm,
    /// `Event` - game events such as darkness or moves.
    Event,
    /// `External.Discord` - Discord rich-presence support.
    ExternalDiscord,
    /// `Group` - group/party membership.
    Group,
    /// `Room` - room identity and exits.
    Room,
}

impl GmcpModuleType {
    /// Every recognized module type, for table initialization.
    pub const ALL: [GmcpModuleType; 6] = [
        GmcpModuleType::Char,
        GmcpModuleType::Comm,
        GmcpModuleType::Event,
        GmcpModuleType::ExternalDiscord,
        GmcpModuleType::Group,
        GmcpModuleType::Room,
    ];

    /// Looks up a module type from a normalized (lowercase) package name.
    pub fn from_normalized_name(name: &str) -> Option<Self> {
        match name {
            "char" => Some(GmcpModuleType::Char),
            "comm" => Some(GmcpModuleType::Comm),
            "event" => Some(GmcpModuleType::Event),
            "external.discord" => Some(GmcpModuleType::ExternalDiscord),
            "group" => Some(GmcpModuleType::Group),
            "room" => Some(GmcpModuleType::Room),
            _ => None,
        }
    }
}

impl fmt::Display for GmcpModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GmcpModuleType::Char => write!(f, "Char"),
            GmcpModuleType::Comm => write!(f, "Comm"),
            GmcpModuleType::Event => write!(f, "Event"),
            GmcpModuleType::ExternalDiscord => write!(f, "External.Discord"),
            GmcpModuleType::Group => write!(f, "Group"),
            GmcpModuleType::Room => write!(f, "Room"),
        }
    }
}

///
/// A GMCP module registration: a dotted package name plus an optional
/// version, as found in `Core.Supports.Set ["Char 1", "Room 1"]` entries.
///
/// Equality and hashing use only the normalized name, so a
/// `HashSet<GmcpModule>` models the protocol's module list: re-registering
/// `Char` at a new version replaces the old entry.
///
#[derive(Clone, Debug)]
pub struct GmcpModule {
    /// Normalized (lowercase) package name.
    name: String,
    /// Requested version; [`DEFAULT_GMCP_MODULE_VERSION`] when absent.
    version: u32,
}

impl GmcpModule {
    /// Builds a module from an already-split name and version.
    pub fn new<S: Into<String>>(name: S, version: u32) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            version,
        }
    }

    /// Parses a `Core.Supports` entry such as `"Char 1"` or `"Room"`.
    ///
    /// The version is the decimal number after the last space; a missing or
    /// unparsable version yields [`DEFAULT_GMCP_MODULE_VERSION`].
    pub fn parse(entry: &str) -> Self {
        let entry = entry.trim();
        match entry.rsplit_once(' ') {
            Some((name, version)) => match version.parse::<u32>() {
                Ok(version) => Self::new(name.trim_end(), version),
                Err(_) => Self::new(entry, DEFAULT_GMCP_MODULE_VERSION),
            },
            None => Self::new(entry, DEFAULT_GMCP_MODULE_VERSION),
        }
    }

    /// Returns the normalized package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the requested version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Whether a version was actually supplied.
    pub fn has_version(&self) -> bool {
        self.version != DEFAULT_GMCP_MODULE_VERSION
    }

    /// The recognized top-level type of this module, if any.
    pub fn module_type(&self) -> Option<GmcpModuleType> {
        GmcpModuleType::from_normalized_name(&self.name)
    }

    /// Whether this module maps to a recognized [`GmcpModuleType`].
    pub fn is_supported(&self) -> bool {
        self.module_type().is_some()
    }
}

impl PartialEq for GmcpModule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for GmcpModule {}

impl Hash for GmcpModule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for GmcpModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_version() {
            write!(f, "{} {}", self.name, self.version)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
