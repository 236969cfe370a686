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

use crate::consts;
use std::fmt;

///
/// The telnet options this engine negotiates, plus a catch-all for
/// everything else in the 0..=255 option space.
///
/// [Telnet Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SUPPRESS_GA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Telnet Status Option [RFC859](http://www.iana.org/go/rfc859)
    Status,
    /// [`consts::option::TIMING_MARK`] Telnet Timing Mark Option [RFC860](http://www.iana.org/go/rfc860)
    TimingMark,
    /// [`consts::option::TERMINAL_TYPE`] Terminal Type [RFC1091](http://www.iana.org/go/rfc1091)
    TerminalType,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](http://www.iana.org/go/rfc1073)
    Naws,
    /// [`consts::option::CHARSET`] Charset [RFC2066](http://www.iana.org/go/rfc2066)
    Charset,
    /// [`consts::option::COMPRESS2`] Mud Client Compression Protocol version 2 [MCCPv2](https://tintin.mudhalla.net/protocols/mccp/)
    Compress2,
    /// [`consts::option::GMCP`] Generic Mud Communication Protocol [GMCP](https://tintin.mudhalla.net/protocols/gmcp/)
    Gmcp,
    /// Any option this engine does not negotiate
    Unknown(u8),
}

impl TelnetOption {
    /// Converts this option to its wire code.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SUPPRESS_GA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TIMING_MARK,
            TelnetOption::TerminalType => consts::option::TERMINAL_TYPE,
            TelnetOption::Naws => consts::option::NAWS,
            TelnetOption::Charset => consts::option::CHARSET,
            TelnetOption::Compress2 => consts::option::COMPRESS2,
            TelnetOption::Gmcp => consts::option::GMCP,
            TelnetOption::Unknown(byte) => byte,
        }
    }

    /// Converts a wire code to the matching option, or `Unknown` for
    /// anything the engine does not negotiate.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SUPPRESS_GA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TIMING_MARK => TelnetOption::TimingMark,
            consts::option::TERMINAL_TYPE => TelnetOption::TerminalType,
            consts::option::NAWS => TelnetOption::Naws,
            consts::option::CHARSET => TelnetOption::Charset,
            consts::option::COMPRESS2 => TelnetOption::Compress2,
            consts::option::GMCP => TelnetOption::Gmcp,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// Whether we agree to enable this option on our own side when the peer
    /// sends `DO`. `COMPRESS2` is deliberately absent: compression is
    /// server-initiated and this engine only ever inflates.
    pub fn supported_local(self) -> bool {
        matches!(
            self,
            TelnetOption::SuppressGoAhead
                | TelnetOption::Status
                | TelnetOption::TerminalType
                | TelnetOption::Naws
                | TelnetOption::Echo
                | TelnetOption::Charset
                | TelnetOption::Gmcp
        )
    }

    /// Whether we accept the peer enabling this option on its side when it
    /// sends `WILL`.
    pub fn supported_remote(self) -> bool {
        matches!(
            self,
            TelnetOption::SuppressGoAhead
                | TelnetOption::Status
                | TelnetOption::TerminalType
                | TelnetOption::Naws
                | TelnetOption::Echo
                | TelnetOption::Charset
                | TelnetOption::Compress2
                | TelnetOption::Gmcp
        )
    }
}

impl fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::SuppressGoAhead => write!(f, "SuppressGoAhead"),
            TelnetOption::Status => write!(f, "Status"),
            TelnetOption::TimingMark => write!(f, "TimingMark"),
            TelnetOption::TerminalType => write!(f, "TerminalType"),
            TelnetOption::Naws => write!(f, "NAWS"),
            TelnetOption::Charset => write!(f, "Charset"),
            TelnetOption::Compress2 => write!(f, "Compress2"),
            TelnetOption::Gmcp => write!(f, "GMCP"),
            TelnetOption::Unknown(option) => write!(f, "Unknown({option})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// Number of slots in the telnet option space.
const NUM_OPTIONS: usize = 256;

///
/// Per-option negotiation state for both ends of the connection.
///
/// Four flat boolean tables over the full option space:
///
/// * `local_enabled` - options enabled on our side,
/// * `remote_enabled` - options the peer has enabled on its side,
/// * `local_announced` - options we have sent at least one WILL/WONT for,
/// * `remote_announced` - options the peer has announced at least once.
///
/// The tables are mutated only by the negotiation rules and by the framing
/// helpers that put a WILL/WONT on the wire, so they always mirror what was
/// actually exchanged.
///
#[derive(Clone)]
pub struct OptionTables {
    local_enabled: [bool; NUM_OPTIONS],
    remote_enabled: [bool; NUM_OPTIONS],
    local_announced: [bool; NUM_OPTIONS],
    remote_announced: [bool; NUM_OPTIONS],
}

impl OptionTables {
    /// All tables false: nothing negotiated yet.
    pub fn new() -> Self {
        Self {
            local_enabled: [false; NUM_OPTIONS],
            remote_enabled: [false; NUM_OPTIONS],
            local_announced: [false; NUM_OPTIONS],
            remote_announced: [false; NUM_OPTIONS],
        }
    }

    /// Clears every table back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Is the option enabled on our side?
    pub fn local_enabled(&self, option: TelnetOption) -> bool {
        self.local_enabled[option.to_u8() as usize]
    }

    /// Is the option enabled on the peer's side?
    pub fn remote_enabled(&self, option: TelnetOption) -> bool {
        self.remote_enabled[option.to_u8() as usize]
    }

    /// Have we announced (WILL/WONT) this option at least once?
    pub fn local_announced(&self, option: TelnetOption) -> bool {
        self.local_announced[option.to_u8() as usize]
    }

    /// Has the peer announced this option at least once?
    pub fn remote_announced(&self, option: TelnetOption) -> bool {
        self.remote_announced[option.to_u8() as usize]
    }

    /// Sets the local enabled flag.
    pub fn set_local_enabled(&mut self, option: TelnetOption, enabled: bool) {
        self.local_enabled[option.to_u8() as usize] = enabled;
    }

    /// Sets the remote enabled flag.
    pub fn set_remote_enabled(&mut self, option: TelnetOption, enabled: bool) {
        self.remote_enabled[option.to_u8() as usize] = enabled;
    }

    /// Marks the option as announced by us.
    pub fn set_local_announced(&mut self, option: TelnetOption) {
        self.local_announced[option.to_u8() as usize] = true;
    }

    /// Marks the option as announced by the peer.
    pub fn set_remote_announced(&mut self, option: TelnetOption) {
        self.remote_announced[option.to_u8() as usize] = true;
    }

    /// Iterates every option code with its (local, remote) enabled flags,
    /// in wire-code order. Used to build the STATUS report.
    pub fn enabled_entries(&self) -> impl Iterator<Item = (u8, bool, bool)> + '_ {
        (0..NUM_OPTIONS).map(|i| {
            (
                u8::try_from(i).unwrap_or(u8::MAX),
                self.local_enabled[i],
                self.remote_enabled[i],
            )
        })
    }
}

impl Default for OptionTables {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OptionTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enabled: Vec<String> = self
            .enabled_entries()
            .filter(|(_, local, remote)| *local || *remote)
            .map(|(code, local, remote)| {
                format!(
                    "{}(local={local},remote={remote})",
                    TelnetOption::from_u8(code)
                )
            })
            .collect();
        f.debug_struct("OptionTables").field("enabled", &enabled).finish()
    }
}
