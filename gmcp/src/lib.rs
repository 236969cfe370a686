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

//! # Mudlink GMCP Types
//!
//! GMCP (Generic Mud Communication Protocol) carries structured, typed data
//! between a MUD server and client as a telnet subnegotiation (option 201).
//! Each message is an ASCII package name followed by an optional JSON body:
//!
//! ```text
//! Core.Hello {"client": "mudlink", "version": "0.3"}
//! Char.Vitals {"hp": 100, "maxhp": 120}
//! Core.Ping
//! ```
//!
//! This crate provides the two value types the telnet engine works with:
//!
//! - [`GmcpMessage`] - a parsed `name [json]` pair. Parsing validates UTF-8
//!   and JSON well-formedness but keeps the body as a raw string, so hosts
//!   can defer (or skip) full deserialization.
//! - [`GmcpModule`] - a module registration such as `Char 1`, as exchanged
//!   via `Core.Supports.Set`/`Add`/`Remove`. Modules compare and hash on
//!   their normalized name so a set of them behaves like the protocol's
//!   module list.
//!
//! # References
//!
//! - [GMCP Protocol Specification](https://tintin.mudhalla.net/protocols/gmcp/)

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod message;
mod module;
mod result;

pub use self::message::GmcpMessage;
pub use self::module::{GmcpModule, GmcpModuleType, DEFAULT_GMCP_MODULE_VERSION};
pub use self::result::{GmcpError, GmcpResult};
