//! SCPI command grammar core: the command text builder, the link
//! contract the subsystem wrappers program against, and a line/block
//! framing adapter for plain byte streams.

use std::{
    fmt::{self, Display, Write as _},
    io::{BufRead, BufReader, Read, Write},
};

use bytes::Bytes;

pub mod block;
pub mod error;
pub mod response;

use error::ScpiError;

type Result<T> = std::result::Result<T, ScpiError>;

/// One SCPI program message under construction.
///
/// Starts from the program header, appends `?` for the query form and
/// parameters with the standard separators (space before the first,
/// comma between the rest).
#[derive(Debug, Clone)]
pub struct Command(String);

impl Command {
    pub fn new(header: impl Into<String>) -> Self {
        Self(header.into())
    }

    pub fn query(mut self) -> Self {
        self.0.push('?');
        self
    }

    pub fn para(mut self, para: impl Display) -> Self {
        let sep = if self.0.contains(' ') { ',' } else { ' ' };
        self.0.push(sep);
        let _ = write!(self.0, "{}", para);
        self
    }

    /// Appends a double-quoted string parameter.
    pub fn quoted(mut self, para: &str) -> Self {
        let sep = if self.0.contains(' ') { ',' } else { ' ' };
        self.0.push(sep);
        self.0.push('"');
        self.0.push_str(para);
        self.0.push('"');
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boolean parameters go out as the `ON`/`OFF` mnemonics.
pub fn on_off(state: bool) -> &'static str {
    if state {
        "ON"
    } else {
        "OFF"
    }
}

/// Defines a settings enum with its official short-form mnemonic (what
/// we transmit) and any long-form synonyms an instrument may answer
/// with. Generates `Display` emitting the short form and a
/// case-insensitive `FromStr` over all forms.
macro_rules! scpi_setting {
    ($(#[$meta:meta])* $name:ident {
        $($(#[$vmeta:meta])* $variant:ident => $short:literal $([$alt:literal])*),+ $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($short),)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ();
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($short $(| $alt)* => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }
    };
}
pub(crate) use scpi_setting;

/// The only contract the subsystem wrappers need from a connection: a
/// way to send one command and a way to exchange one query. VISA
/// sessions, sockets, serial ports and test fakes all fit behind it.
pub trait ScpiLink {
    fn scpi_write(&mut self, command: &str) -> Result<()>;
    fn scpi_query(&mut self, command: &str) -> Result<String>;

    /// Sends `command` followed by `,` and `data` framed as a
    /// definite-length block. Binary payloads cannot ride through the
    /// `&str` write path, so this is a separate required operation.
    fn scpi_write_block(&mut self, command: &str, data: &[u8]) -> Result<()>;

    /// Exchanges a query whose response is definite-length block data.
    ///
    /// The default goes through [`ScpiLink::scpi_query`], which is fine
    /// for links that return response bytes losslessly; links that frame
    /// on a terminator must override it, since payloads may contain the
    /// terminator byte.
    fn scpi_query_block(&mut self, command: &str) -> Result<Bytes> {
        let resp = self.scpi_query(command)?;
        block::decode(resp.as_bytes())
    }
}

/// Line-framing adapter turning any `Read + Write` byte stream into an
/// [`ScpiLink`]: appends the terminator on write, reads up to it on
/// query, and switches to header-driven exact reads for block data.
pub struct Messenger<IO: Read + Write> {
    io: BufReader<IO>,
    terminator: u8,
    buf: Vec<u8>,
}

impl<IO: Read + Write> Messenger<IO> {
    pub fn new(io: IO) -> Self {
        Self::with_terminator(io, b'\n')
    }

    pub fn with_terminator(io: IO, terminator: u8) -> Self {
        Self {
            io: BufReader::new(io),
            terminator,
            buf: Vec::new(),
        }
    }

    pub fn get_mut(&mut self) -> &mut IO {
        self.io.get_mut()
    }

    pub fn into_inner(self) -> IO {
        self.io.into_inner()
    }
}

impl<IO: Read + Write> ScpiLink for Messenger<IO> {
    fn scpi_write(&mut self, command: &str) -> Result<()> {
        let io = self.io.get_mut();
        io.write_all(command.as_bytes())?;
        io.write_all(&[self.terminator])?;
        io.flush()?;
        Ok(())
    }

    fn scpi_query(&mut self, command: &str) -> Result<String> {
        self.scpi_write(command)?;
        self.buf.clear();
        self.io.read_until(self.terminator, &mut self.buf)?;
        Ok(String::from_utf8_lossy(&self.buf).into_owned())
    }

    fn scpi_write_block(&mut self, command: &str, data: &[u8]) -> Result<()> {
        let framed = block::encode(data)?;
        let io = self.io.get_mut();
        io.write_all(command.as_bytes())?;
        io.write_all(b",")?;
        io.write_all(&framed)?;
        io.write_all(&[self.terminator])?;
        io.flush()?;
        Ok(())
    }

    fn scpi_query_block(&mut self, command: &str) -> Result<Bytes> {
        self.scpi_write(command)?;
        let data = block::read_from(&mut self.io)?;
        // the terminator still follows the frame; drain through it so it
        // cannot surface as the next reply
        self.buf.clear();
        self.io.read_until(self.terminator, &mut self.buf)?;
        Ok(data)
    }
}

/// View over the IEEE 488.2 status byte (`*STB?`, `*SRE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusByte(u8);

impl StatusByte {
    pub fn new(byte: u8) -> Self {
        Self(byte)
    }

    pub fn byte(&self) -> u8 {
        self.0
    }

    pub fn error_queue_not_empty(&self) -> bool {
        self.0 & (1 << 2) != 0
    }

    pub fn questionable_summary(&self) -> bool {
        self.0 & (1 << 3) != 0
    }

    pub fn message_available(&self) -> bool {
        self.0 & (1 << 4) != 0
    }

    pub fn event_summary(&self) -> bool {
        self.0 & (1 << 5) != 0
    }

    pub fn requesting_service(&self) -> bool {
        self.0 & (1 << 6) != 0
    }

    pub fn operation_summary(&self) -> bool {
        self.0 & (1 << 7) != 0
    }

    pub fn with_event_summary(mut self) -> Self {
        self.0 |= 1 << 5;
        self
    }

    pub fn with_message_available(mut self) -> Self {
        self.0 |= 1 << 4;
        self
    }

    pub fn with_operation_summary(mut self) -> Self {
        self.0 |= 1 << 7;
        self
    }
}

impl Display for StatusByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// View over the standard event status register (`*ESR?`, `*ESE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStatusByte(u8);

impl EventStatusByte {
    pub fn new(byte: u8) -> Self {
        Self(byte)
    }

    pub fn byte(&self) -> u8 {
        self.0
    }

    pub fn operation_complete(&self) -> bool {
        self.0 & (1 << 0) != 0
    }

    pub fn query_error(&self) -> bool {
        self.0 & (1 << 2) != 0
    }

    pub fn device_dependent_error(&self) -> bool {
        self.0 & (1 << 3) != 0
    }

    pub fn execution_error(&self) -> bool {
        self.0 & (1 << 4) != 0
    }

    pub fn command_error(&self) -> bool {
        self.0 & (1 << 5) != 0
    }

    pub fn power_on(&self) -> bool {
        self.0 & (1 << 7) != 0
    }

    pub fn with_operation_complete(mut self) -> Self {
        self.0 |= 1 << 0;
        self
    }

    pub fn with_command_error(mut self) -> Self {
        self.0 |= 1 << 5;
        self
    }

    pub fn with_execution_error(mut self) -> Self {
        self.0 |= 1 << 4;
        self
    }
}

impl Display for EventStatusByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
