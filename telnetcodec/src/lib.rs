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

//! # Mudlink Telnet Protocol Engine
//!
//! The protocol layer of a MUD client: everything between a raw TCP byte
//! stream and the line/GMCP consumer above it.
//!
//! ## Overview
//!
//! The telnet protocol (RFC 854) multiplexes application data with in-band
//! commands behind the `IAC` (0xFF) escape byte. On top of that base, MUD
//! servers negotiate a family of options this engine speaks natively:
//!
//! - **ECHO / SUPPRESS-GA / STATUS / TIMING-MARK** - classic session options
//! - **TERMINAL-TYPE** (RFC 1091) - client identification
//! - **NAWS** (RFC 1073) - window size reporting
//! - **CHARSET** (RFC 2066) - character encoding agreement
//! - **MCCPv2** (option 86) - zlib compression of the server stream
//! - **GMCP** (option 201) - JSON out-of-band messages
//!
//! ## Core Components
//!
//! ### [`TelnetCodec`]
//!
//! The byte state machine, implementing `tokio_util::codec`'s [`Decoder`]
//! and [`Encoder`] traits. It turns raw bytes into [`TelnetFrame`] values
//! and frames outbound data with correct `IAC` escaping. It holds no option
//! state and can be used standalone on a `Framed` transport.
//!
//! ### [`TelnetEngine`]
//!
//! The connection brain. Owns the codec, the per-option negotiation tables,
//! the GMCP module registry, the active [`TextCodec`] and, when the server
//! enables MCCPv2, the inflate context. Drive it with
//! [`TelnetEngine::on_read`] and it calls back into your [`TelnetHost`]
//! with clean data and protocol events, answering negotiation on the wire
//! as it goes.
//!
//! ### [`TelnetHost`]
//!
//! The capability trait a session object implements: a raw-data sink, a
//! clean-data sink, and optional hooks for echo mode, terminal type, window
//! size, and GMCP traffic.
//!
//! ## Usage
//!
//! ```
//! use mudlink_telnetcodec::{EngineSettings, TelnetEngine, TelnetHost};
//!
//! struct Session {
//!     to_server: Vec<u8>,
//!     to_screen: Vec<u8>,
//! }
//!
//! impl TelnetHost for Session {
//!     fn send_raw_data(&mut self, data: &[u8]) {
//!         self.to_server.extend_from_slice(data);
//!     }
//!     fn receive_data(&mut self, data: &[u8], _go_ahead: bool) {
//!         self.to_screen.extend_from_slice(data);
//!     }
//! }
//!
//! let mut session = Session { to_server: Vec::new(), to_screen: Vec::new() };
//! let mut engine = TelnetEngine::new(EngineSettings::default());
//!
//! // IAC WILL NAWS from the server is answered with IAC DO NAWS
//! engine.on_read(&mut session, &[0xFF, 0xFB, 0x1F]).unwrap();
//! assert_eq!(session.to_server, vec![0xFF, 0xFD, 0x1F]);
//! ```
//!
//! ## Concurrency
//!
//! The engine is a synchronous state machine with a single owner. All
//! processing happens inside the reader task that calls `on_read`; outbound
//! writes are synchronous calls into the host's sink, issued before the
//! next inbound byte is examined. Host callbacks may re-enter the engine to
//! submit outbound data but must never feed inbound bytes.
//!
//! ## Error Handling
//!
//! Protocol anomalies (stray `SE`, nested `SB`, malformed NAWS or GMCP
//! payloads) are logged via `tracing` and recovered from in place. The only
//! errors surfaced to the caller are transport I/O wrappers and the end of
//! an MCCP compression stream; see [`TelnetError`].

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod args;
mod codec;
mod consts;
mod encoding;
mod engine;
mod frame;
mod host;
mod options;
mod result;

pub use self::args::{charset, naws};
pub use self::codec::TelnetCodec;
pub use self::encoding::{CharacterEncoding, TextCodec};
pub use self::engine::{EngineSettings, TelnetEngine};
pub use self::frame::TelnetFrame;
pub use self::host::TelnetHost;
pub use self::options::{OptionTables, TelnetOption};
pub use self::result::{TelnetError, TelnetResult};

pub use consts::{command_name, option, subneg};
