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

//! Telnet wire constants (RFC 854/855 plus the MUD extensions).

/// Subnegotiation End
pub const SE: u8 = 240;
/// No Operation
pub const NOP: u8 = 241;
/// Data Mark
pub const DM: u8 = 242;
/// Break
pub const BRK: u8 = 243;
/// Interrupt Process
pub const IP: u8 = 244;
/// Abort Output
pub const AO: u8 = 245;
/// Are You There
pub const AYT: u8 = 246;
/// Erase Character
pub const EC: u8 = 247;
/// Erase Line
pub const EL: u8 = 248;
/// Go Ahead
pub const GA: u8 = 249;
/// Subnegotiation Begin
pub const SB: u8 = 250;
/// Will (sender wants to enable an option)
pub const WILL: u8 = 251;
/// Won't (sender refuses or disables an option)
pub const WONT: u8 = 252;
/// Do (sender wants the receiver to enable an option)
pub const DO: u8 = 253;
/// Don't (sender wants the receiver to disable an option)
pub const DONT: u8 = 254;
/// Interpret As Command - the in-band escape byte
pub const IAC: u8 = 255;

/// Carriage Return
pub const CR: u8 = b'\r';
/// Line Feed
pub const LF: u8 = b'\n';

/// Option codes, per the IANA telnet-options registry.
pub mod option {
    /// Echo [RFC857]
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858]
    pub const SUPPRESS_GA: u8 = 3;
    /// Status [RFC859]
    pub const STATUS: u8 = 5;
    /// Timing Mark [RFC860]
    pub const TIMING_MARK: u8 = 6;
    /// Terminal Type [RFC1091]
    pub const TERMINAL_TYPE: u8 = 24;
    /// Negotiate About Window Size [RFC1073]
    pub const NAWS: u8 = 31;
    /// Charset [RFC2066]
    pub const CHARSET: u8 = 42;
    /// MUD Client Compression Protocol version 2 (MCCPv2)
    pub const COMPRESS2: u8 = 86;
    /// Generic Mud Communication Protocol
    pub const GMCP: u8 = 201;
}

/// Subnegotiation operation codes shared by TTYPE (RFC 1091), STATUS
/// (RFC 859) and CHARSET (RFC 2066). RFC 2066 calls code 1 `REQUEST` where
/// RFC 1091 calls it `SEND`; the wire value is the same.
pub mod subneg {
    /// `IS` (TTYPE/STATUS)
    pub const IS: u8 = 0;
    /// `SEND` (TTYPE/STATUS) / `REQUEST` (CHARSET)
    pub const SEND: u8 = 1;
    /// `REQUEST` (CHARSET), alias of [`SEND`]
    pub const REQUEST: u8 = 1;
    /// `ACCEPTED` (CHARSET)
    pub const ACCEPTED: u8 = 2;
    /// `REJECTED` (CHARSET)
    pub const REJECTED: u8 = 3;
    /// `TTABLE-IS` (CHARSET)
    pub const TTABLE_IS: u8 = 4;
    /// `TTABLE-REJECTED` (CHARSET)
    pub const TTABLE_REJECTED: u8 = 5;
    /// `TTABLE-ACK` (CHARSET)
    pub const TTABLE_ACK: u8 = 6;
    /// `TTABLE-NAK` (CHARSET)
    pub const TTABLE_NAK: u8 = 7;
}

/// Human-readable name of a telnet command byte, for debug logging.
pub fn command_name(cmd: u8) -> &'static str {
    match cmd {
        SE => "SE",
        NOP => "NOP",
        DM => "DM",
        BRK => "BRK",
        IP => "IP",
        AO => "AO",
        AYT => "AYT",
        EC => "EC",
        EL => "EL",
        GA => "GA",
        SB => "SB",
        WILL => "WILL",
        WONT => "WONT",
        DO => "DO",
        DONT => "DONT",
        IAC => "IAC",
        _ => "unknown",
    }
}
