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

use crate::TelnetOption;
use bytes::BytesMut;

///
/// One complete telnet protocol unit as recognized by the byte state
/// machine: a single clean data byte, a two-byte command, a three-byte
/// negotiation verb, or a finished subnegotiation block.
///
/// `Data` is emitted per byte; the caller accumulates runs of data into its
/// own buffer so that command processing stays interleaved with the byte
/// stream in wire order.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// A clean application data byte (IAC IAC decodes to a single `Data(255)`).
    Data(u8),
    /// No Operation
    NoOperation,
    /// End of urgent data stream
    DataMark,
    /// Operator pressed the Break or Attention key
    Break,
    /// Interrupt the current process
    InterruptProcess,
    /// Cancel output of the current process
    AbortOutput,
    /// Request a sign of life
    AreYouThere,
    /// Erase the previous character
    EraseCharacter,
    /// Erase the previous line
    EraseLine,
    /// End of prompt / your turn (half-duplex turn marker)
    GoAhead,
    /// Peer offers to enable an option on its side
    Will(TelnetOption),
    /// Peer refuses or disables an option on its side
    Wont(TelnetOption),
    /// Peer asks us to enable an option
    Do(TelnetOption),
    /// Peer asks us to disable an option
    Dont(TelnetOption),
    /// A complete subnegotiation: option plus its unescaped parameter bytes
    Subnegotiate(TelnetOption, BytesMut),
}

impl TelnetFrame {
    /// Builds the negotiation frame for a raw verb byte, if it is one.
    pub fn negotiation(verb: u8, option: TelnetOption) -> Option<Self> {
        match verb {
            crate::consts::WILL => Some(TelnetFrame::Will(option)),
            crate::consts::WONT => Some(TelnetFrame::Wont(option)),
            crate::consts::DO => Some(TelnetFrame::Do(option)),
            crate::consts::DONT => Some(TelnetFrame::Dont(option)),
            _ => None,
        }
    }
}
