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

use crate::encoding::CharacterEncoding;
use mudlink_gmcp::GmcpMessage;

///
/// The capabilities the engine needs from whoever owns it.
///
/// The host owns the engine and passes `&mut self` into each engine
/// operation; the engine calls back through this trait while it processes.
/// That keeps ownership acyclic and means no engine state is ever shared.
///
/// Callbacks run synchronously on the reader task. A callback may submit
/// *outbound* data back into the engine, but must never feed it inbound
/// bytes (the engine is mid-scan when callbacks fire).
///
/// Everything except the two data sinks has a default no-op implementation,
/// so minimal hosts only wire up what they use.
///
pub trait TelnetHost {
    /// Writes bytes to the raw transport. Called for every negotiation
    /// reply and every framed payload, in wire order.
    fn send_raw_data(&mut self, data: &[u8]);

    /// Receives decoded clean bytes. `go_ahead` marks flushes triggered by
    /// an `IAC GA` turn marker rather than end of input.
    fn receive_data(&mut self, data: &[u8], go_ahead: bool);

    /// Peer toggled server-side echo; `true` means the host should echo
    /// locally again (e.g. password entry ended).
    fn receive_echo_mode(&mut self, echo: bool) {
        let _ = echo;
    }

    /// Peer answered our `TERMINAL-TYPE SEND` with its type.
    fn receive_terminal_type(&mut self, term_type: &[u8]) {
        let _ = term_type;
    }

    /// Peer reported its window dimensions via NAWS.
    fn receive_window_size(&mut self, cols: u16, rows: u16) {
        let _ = (cols, rows);
    }

    /// Peer delivered a GMCP message.
    fn receive_gmcp_message(&mut self, msg: GmcpMessage) {
        let _ = msg;
    }

    /// GMCP became enabled on our side; the host typically responds by
    /// sending `Core.Hello` and `Core.Supports.Set`.
    fn on_gmcp_enabled(&mut self) {}

    /// The host's configured character encoding, consulted whenever the
    /// peer has not negotiated one via CHARSET.
    fn character_encoding(&self) -> CharacterEncoding {
        CharacterEncoding::default()
    }
}
