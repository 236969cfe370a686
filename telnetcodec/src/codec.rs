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

use crate::result::TelnetError;
use crate::{TelnetFrame, TelnetOption, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

///
/// The telnet byte state machine, exposed as a `tokio_util` codec.
///
/// The decode half scans the inbound stream one byte at a time and emits one
/// [`TelnetFrame`] per protocol unit: clean data bytes, two-byte commands,
/// three-byte negotiation verbs, and complete subnegotiation blocks with
/// their `IAC IAC` escapes already collapsed. The encode half renders frames
/// back to the wire, doubling `IAC` wherever it appears as payload.
///
/// The scanner is deliberately ignorant of option state; which options are
/// enabled, and what to answer, is the caller's business. That keeps the
/// state machine pure over `(state, byte, buffer)` and lets it be tested
/// byte-by-byte.
///
/// Commands embedded *inside* a subnegotiation are still commands (RFC 855
/// treats `IAC SE` as a command, not a delimiter), so a sequence like
/// `IAC SB ... IAC GA ... IAC SE` emits the `GoAhead` frame mid-block and
/// then finishes the subnegotiation normally.
///
pub struct TelnetCodec {
    decoder_state: DecoderState,
    /// Option byte plus parameter bytes of the subnegotiation in progress.
    decoder_buffer: BytesMut,
}

impl TelnetCodec {
    /// Creates a codec in the `NormalData` state with empty buffers.
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Returns the codec to its initial state, dropping any partial
    /// command or subnegotiation.
    pub fn reset(&mut self) {
        self.decoder_state = DecoderState::NormalData;
        self.decoder_buffer.clear();
    }

    /// Feeds a single byte through the state machine.
    ///
    /// Returns the frame completed by this byte, if any. This is the
    /// primitive the [`Decoder`] impl loops over; it is public so a caller
    /// that interleaves decoding with other work (such as switching the
    /// transport into a decompressed mode) can drive the scanner directly.
    pub fn advance(&mut self, byte: u8) -> Option<TelnetFrame> {
        match (self.decoder_state, byte) {
            (DecoderState::NormalData, consts::IAC) => {
                self.decoder_state = DecoderState::InterpretAsCommand;
                None
            }
            (DecoderState::NormalData, _) => Some(TelnetFrame::Data(byte)),

            (DecoderState::InterpretAsCommand, consts::IAC) => {
                // IAC IAC is an escaped data byte
                self.decoder_state = DecoderState::NormalData;
                Some(TelnetFrame::Data(consts::IAC))
            }
            (
                DecoderState::InterpretAsCommand,
                consts::WILL | consts::WONT | consts::DO | consts::DONT,
            ) => {
                self.decoder_state = DecoderState::Negotiate(byte);
                None
            }
            (DecoderState::InterpretAsCommand, consts::SB) => {
                self.decoder_state = DecoderState::Subnegotiate;
                self.decoder_buffer.clear();
                None
            }
            (DecoderState::InterpretAsCommand, consts::SE) => {
                // SE without a preceding SB
                warn!("Received IAC SE outside subnegotiation; ignoring");
                self.decoder_state = DecoderState::NormalData;
                None
            }
            (DecoderState::InterpretAsCommand, _) => {
                self.decoder_state = DecoderState::NormalData;
                Some(command_frame(byte))
            }

            (DecoderState::Negotiate(verb), _) => {
                self.decoder_state = DecoderState::NormalData;
                let option = TelnetOption::from_u8(byte);
                TelnetFrame::negotiation(verb, option)
            }

            (DecoderState::Subnegotiate, consts::IAC) => {
                self.decoder_state = DecoderState::SubnegotiateIac;
                None
            }
            (DecoderState::Subnegotiate, _) => {
                self.decoder_buffer.put_u8(byte);
                None
            }

            (DecoderState::SubnegotiateIac, consts::IAC) => {
                // escaped 0xFF inside the subnegotiation payload
                self.decoder_state = DecoderState::Subnegotiate;
                self.decoder_buffer.put_u8(consts::IAC);
                None
            }
            (
                DecoderState::SubnegotiateIac,
                consts::WILL | consts::WONT | consts::DO | consts::DONT,
            ) => {
                self.decoder_state = DecoderState::SubnegotiateNegotiate(byte);
                None
            }
            (DecoderState::SubnegotiateIac, consts::SE) => {
                self.decoder_state = DecoderState::NormalData;
                if self.decoder_buffer.is_empty() {
                    warn!("Received empty subnegotiation; ignoring");
                    return None;
                }
                let option = TelnetOption::from_u8(self.decoder_buffer[0]);
                let payload = BytesMut::from(&self.decoder_buffer[1..]);
                self.decoder_buffer.clear();
                Some(TelnetFrame::Subnegotiate(option, payload))
            }
            (DecoderState::SubnegotiateIac, consts::SB) => {
                warn!("Received nested IAC SB; dropping subnegotiation");
                self.decoder_state = DecoderState::NormalData;
                self.decoder_buffer.clear();
                None
            }
            (DecoderState::SubnegotiateIac, _) => {
                // RFC 855: an embedded command does not end the block
                self.decoder_state = DecoderState::Subnegotiate;
                Some(command_frame(byte))
            }

            (DecoderState::SubnegotiateNegotiate(verb), _) => {
                self.decoder_state = DecoderState::Subnegotiate;
                let option = TelnetOption::from_u8(byte);
                TelnetFrame::negotiation(verb, option)
            }
        }
    }
}

/// Maps a two-byte command code to its frame. Unknown codes are logged and
/// reported as `NoOperation` so the stream keeps flowing.
fn command_frame(byte: u8) -> TelnetFrame {
    match byte {
        consts::NOP => TelnetFrame::NoOperation,
        consts::DM => TelnetFrame::DataMark,
        consts::BRK => TelnetFrame::Break,
        consts::IP => TelnetFrame::InterruptProcess,
        consts::AO => TelnetFrame::AbortOutput,
        consts::AYT => TelnetFrame::AreYouThere,
        consts::EC => TelnetFrame::EraseCharacter,
        consts::EL => TelnetFrame::EraseLine,
        consts::GA => TelnetFrame::GoAhead,
        _ => {
            warn!("Received unknown telnet command {byte:#04X}");
            TelnetFrame::NoOperation
        }
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec {
            decoder_state: DecoderState::NormalData,
            decoder_buffer: BytesMut::new(),
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetFrame;
    type Error = TelnetError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetFrame>, Self::Error> {
        while src.remaining() > 0 {
            let byte = src.get_u8();
            if let Some(frame) = self.advance(byte) {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = TelnetError;

    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(byte) => {
                dst.reserve(2);
                if byte == consts::IAC {
                    dst.put_u8(consts::IAC);
                }
                dst.put_u8(byte);
            }
            TelnetFrame::NoOperation => put_command(dst, consts::NOP),
            TelnetFrame::DataMark => put_command(dst, consts::DM),
            TelnetFrame::Break => put_command(dst, consts::BRK),
            TelnetFrame::InterruptProcess => put_command(dst, consts::IP),
            TelnetFrame::AbortOutput => put_command(dst, consts::AO),
            TelnetFrame::AreYouThere => put_command(dst, consts::AYT),
            TelnetFrame::EraseCharacter => put_command(dst, consts::EC),
            TelnetFrame::EraseLine => put_command(dst, consts::EL),
            TelnetFrame::GoAhead => put_command(dst, consts::GA),
            TelnetFrame::Will(option) => put_negotiation(dst, consts::WILL, option),
            TelnetFrame::Wont(option) => put_negotiation(dst, consts::WONT, option),
            TelnetFrame::Do(option) => put_negotiation(dst, consts::DO, option),
            TelnetFrame::Dont(option) => put_negotiation(dst, consts::DONT, option),
            TelnetFrame::Subnegotiate(option, payload) => {
                dst.reserve(5 + payload.len() * 2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option.to_u8());
                put_escaped(dst, &payload);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = TelnetError;

    /// Encodes raw application bytes, doubling any `IAC` so the peer's
    /// scanner sees them as data.
    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len() + 8);
        put_escaped(dst, item);
        Ok(())
    }
}

fn put_command(dst: &mut BytesMut, command: u8) {
    dst.reserve(2);
    dst.put_u8(consts::IAC);
    dst.put_u8(command);
}

fn put_negotiation(dst: &mut BytesMut, verb: u8, option: TelnetOption) {
    dst.reserve(3);
    dst.put_u8(consts::IAC);
    dst.put_u8(verb);
    dst.put_u8(option.to_u8());
}

/// Appends bytes with the RFC 855 escape rule: 0xFF becomes 0xFF 0xFF.
pub(crate) fn put_escaped(dst: &mut BytesMut, bytes: &[u8]) {
    for &byte in bytes {
        if byte == consts::IAC {
            dst.put_u8(consts::IAC);
        }
        dst.put_u8(byte);
    }
}

///
/// Decoder positions for the telnet scanner.
///
/// `Negotiate` and `SubnegotiateNegotiate` carry the verb byte that opened
/// them; the subnegotiation option code is the first byte of the decoder
/// buffer, so stray `IAC SB IAC SE` blocks collapse to an ignorable empty
/// buffer instead of inventing an option.
///
#[derive(Clone, Copy, Debug)]
enum DecoderState {
    /// Forwarding plain data bytes
    NormalData,
    /// Received IAC; next byte is a command
    InterpretAsCommand,
    /// Received IAC WILL/WONT/DO/DONT; next byte is the option
    Negotiate(u8),
    /// Inside a subnegotiation block, accumulating payload
    Subnegotiate,
    /// Received IAC inside a subnegotiation; next byte decides
    SubnegotiateIac,
    /// Received IAC verb inside a subnegotiation; next byte is the option
    SubnegotiateNegotiate(u8),
}
