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

use crate::TelnetFrame;
use crate::args::charset::CharsetSubnegotiation;
use crate::args::naws::WindowSize;
use crate::codec::{TelnetCodec, put_escaped};
use crate::consts::{self, subneg};
use crate::encoding::{CharacterEncoding, TextCodec};
use crate::host::TelnetHost;
use crate::options::{OptionTables, TelnetOption};
use crate::result::TelnetResult;
use bytes::{BufMut, BytesMut};
use mudlink_compress::StreamInflater;
use mudlink_gmcp::{
    DEFAULT_GMCP_MODULE_VERSION, GmcpError, GmcpMessage, GmcpModule, GmcpModuleType, GmcpResult,
};
use std::collections::{HashMap, HashSet};
use tokio_util::codec::Encoder;
use tracing::{debug, error, warn};

/// Per-connection engine settings.
///
/// # Example
///
/// ```
/// use mudlink_telnetcodec::{CharacterEncoding, EngineSettings};
///
/// let settings = EngineSettings::default()
///     .with_term_type("mudlink")
///     .with_encoding(CharacterEncoding::Utf8);
/// ```
#[derive(Clone, Debug)]
pub struct EngineSettings {
    /// Terminal type reported in `TERMINAL-TYPE IS` replies.
    pub term_type: String,
    /// Character encoding assumed before (or without) CHARSET negotiation.
    pub encoding: CharacterEncoding,
    /// Gates verbose per-command debug logging.
    pub debug: bool,
}

impl EngineSettings {
    /// Sets the advertised terminal type.
    #[must_use]
    pub fn with_term_type(mut self, term_type: impl Into<String>) -> Self {
        self.term_type = term_type.into();
        self
    }

    /// Sets the initial character encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: CharacterEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Enables verbose per-command debug logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            term_type: "unknown".to_string(),
            encoding: CharacterEncoding::default(),
            debug: false,
        }
    }
}

/// GMCP bookkeeping: the version table for recognized module types plus the
/// set of every module the peer registered.
#[derive(Debug)]
struct GmcpState {
    supported: HashMap<GmcpModuleType, u32>,
    modules: HashSet<GmcpModule>,
}

impl GmcpState {
    fn new() -> Self {
        let mut state = Self {
            supported: HashMap::new(),
            modules: HashSet::new(),
        };
        state.reset();
        state
    }

    fn reset(&mut self) {
        for ty in GmcpModuleType::ALL {
            self.supported.insert(ty, DEFAULT_GMCP_MODULE_VERSION);
        }
        self.modules.clear();
    }
}

///
/// The telnet protocol engine.
///
/// Sits between a raw byte transport and the application: inbound bytes go
/// through [`on_read`](Self::on_read), which strips telnet framing, answers
/// option negotiation, transparently inflates an MCCPv2 substream, and
/// delivers clean data to the host; outbound application data goes through
/// [`submit_payload`](Self::submit_payload), which escapes reserved bytes
/// and appends the turn marker when appropriate.
///
/// The engine never touches a socket. Everything it sends goes through
/// [`TelnetHost::send_raw_data`] on the host value passed into each call,
/// so the host stays the owner of both the engine and the transport:
///
/// ```
/// use mudlink_telnetcodec::{EngineSettings, TelnetEngine, TelnetHost};
///
/// struct Session {
///     out: Vec<u8>,
///     text: Vec<u8>,
/// }
///
/// impl TelnetHost for Session {
///     fn send_raw_data(&mut self, data: &[u8]) {
///         self.out.extend_from_slice(data);
///     }
///     fn receive_data(&mut self, data: &[u8], _go_ahead: bool) {
///         self.text.extend_from_slice(data);
///     }
/// }
///
/// let mut session = Session { out: Vec::new(), text: Vec::new() };
/// let mut engine = TelnetEngine::new(EngineSettings::default());
/// engine.on_read(&mut session, b"hello\xFF\xFF").unwrap();
/// assert_eq!(session.text, b"hello\xFF");
/// ```
///
/// All state lives in this one value; `reset()` returns it to the
/// just-constructed state for connection reuse.
///
pub struct TelnetEngine {
    settings: EngineSettings,
    codec: TelnetCodec,
    options: OptionTables,
    term_type: String,
    window_size: WindowSize,
    text_codec: TextCodec,
    gmcp: GmcpState,
    received_go_ahead: bool,
    recv_compress: bool,
    inflater: Option<StreamInflater>,
    sent_bytes: u64,
}

impl TelnetEngine {
    /// Creates an engine in its initial state.
    pub fn new(settings: EngineSettings) -> Self {
        let term_type = settings.term_type.clone();
        let text_codec = TextCodec::new(settings.encoding);
        Self {
            settings,
            codec: TelnetCodec::new(),
            options: OptionTables::new(),
            term_type,
            window_size: WindowSize::default(),
            text_codec,
            gmcp: GmcpState::new(),
            received_go_ahead: false,
            recv_compress: false,
            inflater: None,
            sent_bytes: 0,
        }
    }

    /// Returns the engine to its initial state: all option tables cleared,
    /// scanner in normal mode, buffers empty, compression off, GMCP
    /// registry emptied, counters zeroed.
    pub fn reset(&mut self) {
        self.options.reset();
        self.codec.reset();
        self.term_type = self.settings.term_type.clone();
        self.gmcp.reset();
        self.received_go_ahead = false;
        self.sent_bytes = 0;
        self.reset_compress();
    }

    // #### Inbound ##########################################################

    /// Feeds one chunk of transport bytes through the engine.
    ///
    /// Clean application bytes are delivered to the host in order, flushed
    /// at every `IAC GA` (marked as a go-ahead flush) and once more at end
    /// of input. Negotiation replies are written to the host's raw sink
    /// before the next inbound byte is looked at.
    ///
    /// # Errors
    ///
    /// Returns [`TelnetError::Compression`](crate::TelnetError::Compression)
    /// when an active MCCP substream ends or is corrupt. The engine has
    /// already delivered any decoded bytes and fallen back to plain mode;
    /// processing may continue with the next read.
    pub fn on_read<H: TelnetHost>(&mut self, host: &mut H, data: &[u8]) -> TelnetResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        let mut clean = BytesMut::with_capacity(data.len());
        let mut pos = 0;
        while pos < data.len() {
            if self.inflater.is_some() {
                if let Err(err) = self.read_inflated(host, &mut clean, &data[pos..]) {
                    if !clean.is_empty() {
                        host.receive_data(&clean, false);
                    }
                    return Err(err);
                }
                // the inflater consumed the rest of this chunk
                pos = data.len();
                continue;
            }

            self.process_byte(host, &mut clean, data[pos]);
            pos += 1;

            if self.recv_compress {
                // switch to inflate mode starting with the next byte
                self.recv_compress = false;
                debug!("Starting compression");
                self.inflater = Some(StreamInflater::new());
                continue;
            }

            if self.received_go_ahead {
                host.receive_data(&clean, true);
                clean.clear();
                self.received_go_ahead = false;
            }
        }

        if !clean.is_empty() {
            host.receive_data(&clean, false);
        }
        Ok(())
    }

    /// Runs the remainder of a chunk through the inflater and re-feeds the
    /// plaintext through the scanner, honoring GA flushes. Plaintext that
    /// decoded ahead of an inflate failure is still delivered before the
    /// error is surfaced.
    fn read_inflated<H: TelnetHost>(
        &mut self,
        host: &mut H,
        clean: &mut BytesMut,
        input: &[u8],
    ) -> TelnetResult<()> {
        let (inflated, result) = {
            let Some(inflater) = self.inflater.as_mut() else {
                return Ok(());
            };
            let result = inflater.feed(input);
            (inflater.take_output(), result)
        };

        for byte in inflated {
            self.process_byte(host, clean, byte);
            if self.received_go_ahead {
                host.receive_data(clean, true);
                clean.clear();
                self.received_go_ahead = false;
            }
        }

        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!("Ending compression");
                self.reset_compress();
                Err(err.into())
            }
        }
    }

    /// Advances the scanner one byte and reacts to whatever completed.
    fn process_byte<H: TelnetHost>(&mut self, host: &mut H, clean: &mut BytesMut, byte: u8) {
        let Some(frame) = self.codec.advance(byte) else {
            return;
        };
        match frame {
            TelnetFrame::Data(byte) => clean.put_u8(byte),
            TelnetFrame::GoAhead => self.received_go_ahead = true,
            TelnetFrame::AreYouThere => self.send_are_you_there(host),
            TelnetFrame::Will(option) => self.process_will(host, option),
            TelnetFrame::Wont(option) => self.process_wont(host, option),
            TelnetFrame::Do(option) => self.process_do(host, option),
            TelnetFrame::Dont(option) => self.process_dont(host, option),
            TelnetFrame::Subnegotiate(option, payload) => {
                self.process_subnegotiation(host, option, &payload);
            }
            TelnetFrame::NoOperation
            | TelnetFrame::DataMark
            | TelnetFrame::Break
            | TelnetFrame::InterruptProcess
            | TelnetFrame::AbortOutput
            | TelnetFrame::EraseCharacter
            | TelnetFrame::EraseLine => {}
        }
    }

    // #### Negotiation ######################################################

    /// Peer offers to enable an option on its side.
    fn process_will<H: TelnetHost>(&mut self, host: &mut H, option: TelnetOption) {
        if self.settings.debug {
            debug!("Processing telnet command: WILL {option}");
        }
        self.options.set_remote_announced(option);
        if !self.options.remote_enabled(option) {
            if !self.options.local_enabled(option) {
                if option.supported_remote() {
                    self.send_telnet_option(host, consts::DO, option);
                    self.options.set_remote_enabled(option, true);
                    if option == TelnetOption::Echo {
                        host.receive_echo_mode(false);
                    }
                } else {
                    self.send_telnet_option(host, consts::DONT, option);
                    self.options.set_remote_enabled(option, false);
                }
            } else if option == TelnetOption::TerminalType {
                // we already announced TTYPE ourselves; ask for theirs
                self.send_terminal_type_request(host);
            }
        } else if self.settings.debug {
            // announcement without a request; tolerated
            debug!("Peer option {option} was already enabled");
        }
    }

    /// Peer refuses or disables an option on its side.
    fn process_wont<H: TelnetHost>(&mut self, host: &mut H, option: TelnetOption) {
        if self.settings.debug {
            debug!("Processing telnet command: WONT {option}");
        }
        if !self.options.local_enabled(option)
            && (self.options.remote_enabled(option) || !self.options.remote_announced(option))
        {
            // acknowledge with DONT, per RFC 854
            self.send_telnet_option(host, consts::DONT, option);
            self.options.set_remote_enabled(option, false);
            if option == TelnetOption::Echo {
                host.receive_echo_mode(true);
            }
        }
        self.options.set_remote_announced(option);
    }

    /// Peer asks us to enable an option on our side.
    fn process_do<H: TelnetHost>(&mut self, host: &mut H, option: TelnetOption) {
        if self.settings.debug {
            debug!("Processing telnet command: DO {option}");
        }
        if option == TelnetOption::TimingMark {
            // one-shot sync point; answer WILL without storing state
            self.send_telnet_option(host, consts::WILL, option);
        } else if !self.options.local_enabled(option) {
            if option.supported_local() {
                self.send_telnet_option(host, consts::WILL, option);
                self.options.set_local_enabled(option, true);
                self.options.set_local_announced(option);
            } else {
                self.send_telnet_option(host, consts::WONT, option);
                self.options.set_local_enabled(option, false);
                self.options.set_local_announced(option);
            }
        } else if self.settings.debug {
            debug!("Our option {option} was already enabled");
        }

        if self.options.local_enabled(TelnetOption::Naws) && option == TelnetOption::Naws {
            // window size info must follow the acceptance
            let size = self.window_size;
            self.send_window_size(host, size);
        } else if self.options.local_enabled(TelnetOption::Charset)
            && option == TelnetOption::Charset
        {
            self.send_charset_request(host);
        } else if self.options.local_enabled(TelnetOption::Gmcp) && option == TelnetOption::Gmcp {
            host.on_gmcp_enabled();
        }
    }

    /// Peer asks us to disable an option on our side.
    fn process_dont<H: TelnetHost>(&mut self, host: &mut H, option: TelnetOption) {
        if self.settings.debug {
            debug!("Processing telnet command: DONT {option}");
        }
        // answer only when the value changes or we never announced it
        if self.options.local_enabled(option) || !self.options.local_announced(option) {
            self.send_telnet_option(host, consts::WONT, option);
            self.options.set_local_announced(option);
        }
        self.options.set_local_enabled(option, false);
    }

    // #### Subnegotiation dispatch ##########################################

    fn process_subnegotiation<H: TelnetHost>(
        &mut self,
        host: &mut H,
        option: TelnetOption,
        payload: &[u8],
    ) {
        if self.settings.debug {
            debug!(
                "Processing telnet subnegotiation: {option} ({} parameter bytes)",
                payload.len()
            );
        }
        match option {
            // lenient on purpose: plenty of servers ask for STATUS without
            // ever negotiating it properly
            TelnetOption::Status => {
                if payload.first() == Some(&subneg::SEND) {
                    self.send_option_status(host);
                }
            }

            TelnetOption::TerminalType if self.options.local_enabled(option) => {
                match payload.first() {
                    Some(&subneg::SEND) => {
                        let term_type = std::mem::take(&mut self.term_type);
                        self.send_terminal_type(host, term_type.as_bytes());
                        self.term_type = term_type;
                    }
                    Some(&subneg::IS) => host.receive_terminal_type(&payload[1..]),
                    _ => {}
                }
            }

            // either side having negotiated CHARSET is enough; servers that
            // only announced WILL still send a REQUEST
            TelnetOption::Charset
                if self.options.local_enabled(option) || self.options.remote_enabled(option) =>
            {
                self.process_charset(host, payload);
            }

            TelnetOption::Compress2 if self.options.remote_enabled(option) => {
                if self.inflater.is_some() {
                    debug!("Compression was already enabled");
                } else {
                    self.recv_compress = true;
                }
            }

            TelnetOption::Gmcp if self.options.local_enabled(option) => {
                if payload.is_empty() {
                    warn!("Invalid GMCP subnegotiation received");
                    return;
                }
                match GmcpMessage::from_bytes(payload) {
                    Ok(msg) => {
                        if self.settings.debug {
                            debug!("Received GMCP message {}", msg.name());
                        }
                        host.receive_gmcp_message(msg);
                    }
                    Err(err) => warn!("Corrupted GMCP received: {err}"),
                }
            }

            TelnetOption::Naws if self.options.local_enabled(option) => {
                match WindowSize::from_payload(payload) {
                    Some(size) => host.receive_window_size(size.cols, size.rows),
                    None => warn!("Corrupted NAWS received ({} parameter bytes)", payload.len()),
                }
            }

            // unsupported option, or its guard failed
            _ => {}
        }
    }

    fn process_charset<H: TelnetHost>(&mut self, host: &mut H, payload: &[u8]) {
        match CharsetSubnegotiation::parse(payload) {
            Some(CharsetSubnegotiation::Request { entries }) => {
                for entry in &entries {
                    if self.text_codec.supports(entry) {
                        self.text_codec.set_encoding_for_name(entry);
                        self.send_charset_accepted(host, entry);
                        return;
                    }
                }
                if self.settings.debug {
                    debug!("Rejected all {} proposed character sets", entries.len());
                }
                self.send_charset_rejected(host);
            }
            Some(CharsetSubnegotiation::Accepted(name)) => {
                if self.settings.debug {
                    debug!("Peer accepted charset {:?}", String::from_utf8_lossy(&name));
                }
                self.text_codec.set_encoding_for_name(&name);
            }
            Some(CharsetSubnegotiation::Rejected) => {
                if self.settings.debug {
                    debug!("Peer rejected our charset request");
                }
            }
            Some(CharsetSubnegotiation::TtableIs) => {
                // we never request translation tables, so a compliant peer
                // cannot send this
                error!("Received CHARSET TTABLE-IS without a request; ignoring");
            }
            None => {}
        }
    }

    // #### Outbound #########################################################

    /// Sends application data over the connection, doubling any `IAC` bytes
    /// and appending `IAC GA` when `go_ahead` is set and the peer has not
    /// suppressed go-aheads.
    pub fn submit_payload<H: TelnetHost>(&mut self, host: &mut H, data: &[u8], go_ahead: bool) {
        let mut out = BytesMut::with_capacity(data.len() + 2);
        if data.contains(&consts::IAC) {
            put_escaped(&mut out, data);
        } else {
            out.extend_from_slice(data);
        }

        if go_ahead && !self.options.remote_enabled(TelnetOption::SuppressGoAhead) {
            out.put_u8(consts::IAC);
            out.put_u8(consts::GA);
        }

        self.send_raw(host, &out);
    }

    /// Emits `IAC <verb> <option>`.
    pub fn send_telnet_option<H: TelnetHost>(
        &mut self,
        host: &mut H,
        verb: u8,
        option: TelnetOption,
    ) {
        if self.settings.debug {
            debug!(
                "Sending telnet command: {} {option}",
                consts::command_name(verb)
            );
        }
        match TelnetFrame::negotiation(verb, option) {
            Some(frame) => self.send_frame(host, frame),
            None => warn!("Refusing to send non-negotiation verb {verb:#04X}"),
        }
    }

    /// Marks an option as locally enabled and announced, then emits the
    /// negotiation command. For host-initiated offers such as `WILL GMCP`.
    pub fn request_telnet_option<H: TelnetHost>(
        &mut self,
        host: &mut H,
        verb: u8,
        option: TelnetOption,
    ) {
        self.options.set_local_enabled(option, true);
        self.options.set_local_announced(option);
        self.send_telnet_option(host, verb, option);
    }

    /// Records the new window dimensions and announces them via NAWS.
    pub fn send_window_size_changed<H: TelnetHost>(&mut self, host: &mut H, cols: i32, rows: i32) {
        let size = WindowSize::clamped(cols, rows);
        self.window_size = size;
        self.send_window_size(host, size);
    }

    fn send_window_size<H: TelnetHost>(&mut self, host: &mut H, size: WindowSize) {
        if self.settings.debug {
            debug!("Sending NAWS {size}");
        }
        self.send_frame(
            host,
            TelnetFrame::Subnegotiate(TelnetOption::Naws, size.to_payload()),
        );
    }

    /// Sends a GMCP message to the peer.
    pub fn send_gmcp_message<H: TelnetHost>(&mut self, host: &mut H, msg: &GmcpMessage) {
        if self.settings.debug {
            debug!("Sending GMCP: {msg}");
        }
        self.send_frame(
            host,
            TelnetFrame::Subnegotiate(TelnetOption::Gmcp, msg.to_bytes()),
        );
    }

    fn send_terminal_type<H: TelnetHost>(&mut self, host: &mut H, term_type: &[u8]) {
        if self.settings.debug {
            debug!(
                "Sending terminal type {:?}",
                String::from_utf8_lossy(term_type)
            );
        }
        let mut payload = BytesMut::with_capacity(1 + term_type.len());
        payload.put_u8(subneg::IS);
        payload.extend_from_slice(term_type);
        self.send_frame(
            host,
            TelnetFrame::Subnegotiate(TelnetOption::TerminalType, payload),
        );
    }

    fn send_terminal_type_request<H: TelnetHost>(&mut self, host: &mut H) {
        let mut payload = BytesMut::with_capacity(1);
        payload.put_u8(subneg::SEND);
        self.send_frame(
            host,
            TelnetFrame::Subnegotiate(TelnetOption::TerminalType, payload),
        );
    }

    fn send_charset_request<H: TelnetHost>(&mut self, host: &mut H) {
        let names = self.text_codec.supported_encodings();
        if self.settings.debug {
            debug!("Requesting charsets {names:?}");
        }
        self.send_frame(
            host,
            TelnetFrame::Subnegotiate(
                TelnetOption::Charset,
                CharsetSubnegotiation::request_payload(names),
            ),
        );
    }

    fn send_charset_accepted<H: TelnetHost>(&mut self, host: &mut H, name: &[u8]) {
        if self.settings.debug {
            debug!("Accepted charset {:?}", String::from_utf8_lossy(name));
        }
        self.send_frame(
            host,
            TelnetFrame::Subnegotiate(
                TelnetOption::Charset,
                CharsetSubnegotiation::accepted_payload(name),
            ),
        );
    }

    fn send_charset_rejected<H: TelnetHost>(&mut self, host: &mut H) {
        self.send_frame(
            host,
            TelnetFrame::Subnegotiate(
                TelnetOption::Charset,
                CharsetSubnegotiation::rejected_payload(),
            ),
        );
    }

    /// Reports every enabled option, both directions, as
    /// `STATUS IS (WILL|DO <option>)*`.
    fn send_option_status<H: TelnetHost>(&mut self, host: &mut H) {
        let mut payload = BytesMut::new();
        payload.put_u8(subneg::IS);
        for (code, local, remote) in self.options.enabled_entries() {
            if local {
                payload.put_u8(consts::WILL);
                payload.put_u8(code);
            }
            if remote {
                payload.put_u8(consts::DO);
                payload.put_u8(code);
            }
        }
        self.send_frame(host, TelnetFrame::Subnegotiate(TelnetOption::Status, payload));
    }

    fn send_are_you_there<H: TelnetHost>(&mut self, host: &mut H) {
        // the reply is plain text; an impatient server gets prose
        self.send_raw(host, b"I'm here! Please be more patient!\r\n");
    }

    fn send_frame<H: TelnetHost>(&mut self, host: &mut H, frame: TelnetFrame) {
        let mut out = BytesMut::new();
        match self.codec.encode(frame, &mut out) {
            Ok(()) => self.send_raw(host, &out),
            Err(err) => warn!("Failed to encode outbound frame: {err}"),
        }
    }

    fn send_raw<H: TelnetHost>(&mut self, host: &mut H, data: &[u8]) {
        self.sent_bytes += data.len() as u64;
        host.send_raw_data(data);
    }

    // #### GMCP module registry #############################################

    /// Registers or unregisters a GMCP module the peer asked about.
    ///
    /// # Errors
    ///
    /// Enabling a module that carries no version is rejected with
    /// [`GmcpError::MissingVersion`] and leaves the registry unchanged.
    pub fn receive_gmcp_module(&mut self, module: &GmcpModule, enabled: bool) -> GmcpResult<()> {
        if enabled {
            if !module.has_version() {
                return Err(GmcpError::MissingVersion);
            }
            if self.settings.debug {
                debug!("Adding GMCP module {module}");
            }
            self.gmcp.modules.insert(module.clone());
            if let Some(ty) = module.module_type() {
                self.gmcp.supported.insert(ty, module.version());
            }
        } else {
            if self.settings.debug {
                debug!("Removing GMCP module {module}");
            }
            self.gmcp.modules.remove(module);
            if let Some(ty) = module.module_type() {
                self.gmcp.supported.insert(ty, DEFAULT_GMCP_MODULE_VERSION);
            }
        }
        Ok(())
    }

    /// Whether a recognized module type is active: GMCP must be enabled on
    /// our side and the type registered with a nonzero version.
    pub fn is_gmcp_module_enabled(&self, ty: GmcpModuleType) -> bool {
        if !self.options.local_enabled(TelnetOption::Gmcp) {
            return false;
        }
        self.gmcp
            .supported
            .get(&ty)
            .copied()
            .unwrap_or(DEFAULT_GMCP_MODULE_VERSION)
            != DEFAULT_GMCP_MODULE_VERSION
    }

    // #### State access #####################################################

    /// The active text codec, reconciled against the host configuration
    /// whenever the peer never negotiated CHARSET.
    pub fn text_codec<H: TelnetHost>(&mut self, host: &H) -> &TextCodec {
        if !self.options.remote_enabled(TelnetOption::Charset) {
            let configured = host.character_encoding();
            if configured != self.text_codec.encoding() {
                self.text_codec.set_encoding(configured);
            }
        }
        &self.text_codec
    }

    /// Is the option enabled on our side?
    pub fn is_enabled_local(&self, option: TelnetOption) -> bool {
        self.options.local_enabled(option)
    }

    /// Is the option enabled on the peer's side?
    pub fn is_enabled_remote(&self, option: TelnetOption) -> bool {
        self.options.remote_enabled(option)
    }

    /// Is an MCCP substream currently being inflated?
    pub fn is_compressed(&self) -> bool {
        self.inflater.is_some()
    }

    /// The terminal type currently advertised to the peer.
    pub fn terminal_type(&self) -> &str {
        &self.term_type
    }

    /// The window size most recently pushed by the host.
    pub fn window_size(&self) -> WindowSize {
        self.window_size
    }

    /// Total bytes handed to the transport since construction or `reset()`.
    pub fn sent_bytes(&self) -> u64 {
        self.sent_bytes
    }

    fn reset_compress(&mut self) {
        self.inflater = None;
        self.recv_compress = false;
        self.options
            .set_remote_enabled(TelnetOption::Compress2, false);
    }
}

impl std::fmt::Debug for TelnetEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetEngine")
            .field("options", &self.options)
            .field("term_type", &self.term_type)
            .field("window_size", &self.window_size)
            .field("encoding", &self.text_codec.encoding())
            .field("compressed", &self.inflater.is_some())
            .field("sent_bytes", &self.sent_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::option;

    #[derive(Default)]
    struct MockHost {
        raw: Vec<u8>,
        flushes: Vec<(Vec<u8>, bool)>,
        echo: Vec<bool>,
        term_types: Vec<Vec<u8>>,
        window_sizes: Vec<(u16, u16)>,
        gmcp: Vec<GmcpMessage>,
        gmcp_enabled: usize,
        encoding: Option<CharacterEncoding>,
    }

    impl TelnetHost for MockHost {
        fn send_raw_data(&mut self, data: &[u8]) {
            self.raw.extend_from_slice(data);
        }
        fn receive_data(&mut self, data: &[u8], go_ahead: bool) {
            self.flushes.push((data.to_vec(), go_ahead));
        }
        fn receive_echo_mode(&mut self, echo: bool) {
            self.echo.push(echo);
        }
        fn receive_terminal_type(&mut self, term_type: &[u8]) {
            self.term_types.push(term_type.to_vec());
        }
        fn receive_window_size(&mut self, cols: u16, rows: u16) {
            self.window_sizes.push((cols, rows));
        }
        fn receive_gmcp_message(&mut self, msg: GmcpMessage) {
            self.gmcp.push(msg);
        }
        fn on_gmcp_enabled(&mut self) {
            self.gmcp_enabled += 1;
        }
        fn character_encoding(&self) -> CharacterEncoding {
            self.encoding.unwrap_or_default()
        }
    }

    fn engine() -> TelnetEngine {
        TelnetEngine::new(EngineSettings::default().with_term_type("test-term"))
    }

    #[test]
    fn will_supported_option_answers_do() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::NAWS])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::DO, option::NAWS]);
        assert!(telnet.is_enabled_remote(TelnetOption::Naws));
    }

    #[test]
    fn will_unsupported_option_answers_dont() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, 99])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::DONT, 99]);
        assert!(!telnet.is_enabled_remote(TelnetOption::Unknown(99)));
    }

    #[test]
    fn repeated_will_is_tolerated_silently() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::SUPPRESS_GA])
            .unwrap();
        host.raw.clear();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::SUPPRESS_GA])
            .unwrap();
        assert!(host.raw.is_empty());
        assert!(telnet.is_enabled_remote(TelnetOption::SuppressGoAhead));
    }

    #[test]
    fn will_echo_reports_remote_echo() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::ECHO])
            .unwrap();
        assert_eq!(host.echo, vec![false]);

        telnet
            .on_read(&mut host, &[consts::IAC, consts::WONT, option::ECHO])
            .unwrap();
        assert_eq!(host.echo, vec![false, true]);
    }

    #[test]
    fn unsolicited_wont_is_acknowledged_once() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WONT, option::ECHO])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::DONT, option::ECHO]);

        // announced now, still disabled: a second WONT needs no reply
        host.raw.clear();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WONT, option::ECHO])
            .unwrap();
        assert!(host.raw.is_empty());
    }

    #[test]
    fn do_supported_option_answers_will() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::SUPPRESS_GA])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::WILL, option::SUPPRESS_GA]);
        assert!(telnet.is_enabled_local(TelnetOption::SuppressGoAhead));
    }

    #[test]
    fn do_compress2_is_refused() {
        // compression is peer-driven; we inflate but never deflate
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::COMPRESS2])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::WONT, option::COMPRESS2]);
        assert!(!telnet.is_enabled_local(TelnetOption::Compress2));
    }

    #[test]
    fn do_timing_mark_answers_will_without_state() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::TIMING_MARK])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::WILL, option::TIMING_MARK]);
        assert!(!telnet.is_enabled_local(TelnetOption::TimingMark));

        // one-shot every time, no announcement bookkeeping
        host.raw.clear();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::TIMING_MARK])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::WILL, option::TIMING_MARK]);
    }

    #[test]
    fn do_naws_sends_current_window_size() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet.send_window_size_changed(&mut host, 120, 40);
        host.raw.clear();

        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::NAWS])
            .unwrap();
        assert_eq!(
            host.raw,
            vec![
                consts::IAC,
                consts::WILL,
                option::NAWS,
                consts::IAC,
                consts::SB,
                option::NAWS,
                0x00,
                0x78,
                0x00,
                0x28,
                consts::IAC,
                consts::SE,
            ]
        );
    }

    #[test]
    fn do_gmcp_raises_host_hook() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::GMCP])
            .unwrap();
        assert_eq!(host.gmcp_enabled, 1);
        assert!(telnet.is_enabled_local(TelnetOption::Gmcp));
    }

    #[test]
    fn dont_answers_wont_then_stays_silent() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DONT, option::ECHO])
            .unwrap();
        assert_eq!(host.raw, vec![consts::IAC, consts::WONT, option::ECHO]);

        host.raw.clear();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DONT, option::ECHO])
            .unwrap();
        assert!(host.raw.is_empty());
    }

    #[test]
    fn ayt_answers_prose() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::AYT])
            .unwrap();
        assert_eq!(host.raw, b"I'm here! Please be more patient!\r\n");
    }

    #[test]
    fn ga_flushes_with_marker() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        let mut input = b"hi".to_vec();
        input.extend_from_slice(&[consts::IAC, consts::GA]);
        input.extend_from_slice(b"bye");
        telnet.on_read(&mut host, &input).unwrap();
        assert_eq!(
            host.flushes,
            vec![(b"hi".to_vec(), true), (b"bye".to_vec(), false)]
        );
    }

    #[test]
    fn terminal_type_send_is_answered_with_is() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::TERMINAL_TYPE])
            .unwrap();
        host.raw.clear();

        telnet
            .on_read(
                &mut host,
                &[
                    consts::IAC,
                    consts::SB,
                    option::TERMINAL_TYPE,
                    subneg::SEND,
                    consts::IAC,
                    consts::SE,
                ],
            )
            .unwrap();
        let mut expected = vec![
            consts::IAC,
            consts::SB,
            option::TERMINAL_TYPE,
            subneg::IS,
        ];
        expected.extend_from_slice(b"test-term");
        expected.extend_from_slice(&[consts::IAC, consts::SE]);
        assert_eq!(host.raw, expected);
    }

    #[test]
    fn terminal_type_is_reaches_host() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::TERMINAL_TYPE])
            .unwrap();

        let mut input = vec![
            consts::IAC,
            consts::SB,
            option::TERMINAL_TYPE,
            subneg::IS,
        ];
        input.extend_from_slice(b"xterm-256color");
        input.extend_from_slice(&[consts::IAC, consts::SE]);
        telnet.on_read(&mut host, &input).unwrap();
        assert_eq!(host.term_types, vec![b"xterm-256color".to_vec()]);
    }

    #[test]
    fn will_terminal_type_solicits_peer_type_when_ours_is_on() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::TERMINAL_TYPE])
            .unwrap();
        host.raw.clear();

        telnet
            .on_read(
                &mut host,
                &[consts::IAC, consts::WILL, option::TERMINAL_TYPE],
            )
            .unwrap();
        assert_eq!(
            host.raw,
            vec![
                consts::IAC,
                consts::SB,
                option::TERMINAL_TYPE,
                subneg::SEND,
                consts::IAC,
                consts::SE,
            ]
        );
    }

    #[test]
    fn status_send_reports_enabled_options() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::SUPPRESS_GA])
            .unwrap();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::ECHO])
            .unwrap();
        host.raw.clear();

        telnet
            .on_read(
                &mut host,
                &[
                    consts::IAC,
                    consts::SB,
                    option::STATUS,
                    subneg::SEND,
                    consts::IAC,
                    consts::SE,
                ],
            )
            .unwrap();
        assert_eq!(
            host.raw,
            vec![
                consts::IAC,
                consts::SB,
                option::STATUS,
                subneg::IS,
                consts::DO,
                option::ECHO,
                consts::WILL,
                option::SUPPRESS_GA,
                consts::IAC,
                consts::SE,
            ]
        );
    }

    #[test]
    fn gmcp_message_reaches_host() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::GMCP])
            .unwrap();

        let mut input = vec![consts::IAC, consts::SB, option::GMCP];
        input.extend_from_slice(b"Core.Hello {}");
        input.extend_from_slice(&[consts::IAC, consts::SE]);
        telnet.on_read(&mut host, &input).unwrap();

        assert_eq!(host.gmcp.len(), 1);
        assert_eq!(host.gmcp[0].name(), "Core.Hello");
        assert_eq!(host.gmcp[0].json(), Some("{}"));
    }

    #[test]
    fn corrupted_gmcp_is_dropped() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::GMCP])
            .unwrap();

        let mut input = vec![consts::IAC, consts::SB, option::GMCP];
        input.extend_from_slice(b"Char.Vitals {broken");
        input.extend_from_slice(&[consts::IAC, consts::SE]);
        telnet.on_read(&mut host, &input).unwrap();
        assert!(host.gmcp.is_empty());
    }

    #[test]
    fn gmcp_without_negotiation_is_ignored() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        let mut input = vec![consts::IAC, consts::SB, option::GMCP];
        input.extend_from_slice(b"Core.Hello {}");
        input.extend_from_slice(&[consts::IAC, consts::SE]);
        telnet.on_read(&mut host, &input).unwrap();
        assert!(host.gmcp.is_empty());
    }

    #[test]
    fn gmcp_module_registry() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::GMCP])
            .unwrap();

        let module = GmcpModule::parse("Char 1");
        telnet.receive_gmcp_module(&module, true).unwrap();
        assert!(telnet.is_gmcp_module_enabled(GmcpModuleType::Char));
        assert!(!telnet.is_gmcp_module_enabled(GmcpModuleType::Room));

        telnet.receive_gmcp_module(&module, false).unwrap();
        assert!(!telnet.is_gmcp_module_enabled(GmcpModuleType::Char));
    }

    #[test]
    fn gmcp_module_without_version_is_rejected() {
        let mut telnet = engine();
        let module = GmcpModule::parse("Char");
        assert_eq!(
            telnet.receive_gmcp_module(&module, true),
            Err(GmcpError::MissingVersion)
        );
        assert!(!telnet.is_gmcp_module_enabled(GmcpModuleType::Char));
    }

    #[test]
    fn gmcp_modules_need_gmcp_enabled() {
        let mut telnet = engine();
        let module = GmcpModule::parse("Room 1");
        telnet.receive_gmcp_module(&module, true).unwrap();
        // registered, but GMCP itself is off
        assert!(!telnet.is_gmcp_module_enabled(GmcpModuleType::Room));
    }

    #[test]
    fn submit_payload_escapes_and_appends_ga() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet.submit_payload(&mut host, &[b'a', consts::IAC, b'b'], true);
        assert_eq!(
            host.raw,
            vec![b'a', consts::IAC, consts::IAC, b'b', consts::IAC, consts::GA]
        );
    }

    #[test]
    fn submit_payload_omits_ga_when_suppressed() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::SUPPRESS_GA])
            .unwrap();
        host.raw.clear();

        telnet.submit_payload(&mut host, b"prompt", true);
        assert_eq!(host.raw, b"prompt");
    }

    #[test]
    fn text_codec_follows_config_until_charset_negotiated() {
        let mut host = MockHost {
            encoding: Some(CharacterEncoding::Utf8),
            ..MockHost::default()
        };
        let mut telnet = engine();
        assert_eq!(telnet.text_codec(&host).encoding(), CharacterEncoding::Utf8);

        host.encoding = Some(CharacterEncoding::Latin1);
        assert_eq!(
            telnet.text_codec(&host).encoding(),
            CharacterEncoding::Latin1
        );
    }

    #[test]
    fn sent_bytes_counts_everything_we_wrote() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet.submit_payload(&mut host, b"abc", false);
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::NAWS])
            .unwrap();
        assert_eq!(telnet.sent_bytes(), 3 + 3);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut host = MockHost::default();
        let mut telnet = engine();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::WILL, option::ECHO])
            .unwrap();
        telnet
            .on_read(&mut host, &[consts::IAC, consts::DO, option::GMCP])
            .unwrap();
        telnet
            .receive_gmcp_module(&GmcpModule::parse("Char 1"), true)
            .unwrap();

        telnet.reset();
        assert!(!telnet.is_enabled_remote(TelnetOption::Echo));
        assert!(!telnet.is_enabled_local(TelnetOption::Gmcp));
        assert!(!telnet.is_gmcp_module_enabled(GmcpModuleType::Char));
        assert_eq!(telnet.sent_bytes(), 0);

        telnet.reset();
        assert!(!telnet.is_enabled_remote(TelnetOption::Echo));
        assert_eq!(telnet.sent_bytes(), 0);
    }
}
