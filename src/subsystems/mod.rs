//! One wrapper type per SCPI subsystem, plus the [`Instrument`] entry
//! point carrying the IEEE 488.2 common commands.
//!
//! Every wrapper borrows the link for its lifetime and maps each
//! method onto exactly one command or query: validate, format, send,
//! parse. No state is kept on this side of the wire.

use serde::{Deserialize, Serialize};

use crate::scpi::{error::ScpiError, response, Command, EventStatusByte, ScpiLink, StatusByte};

pub mod calculate;
pub mod calibration;
pub mod display;
pub mod input;
pub mod memory;
pub mod status;
pub mod trace;
pub mod vxi;

pub use calculate::Calculate;
pub use calibration::Calibration;
pub use display::Display;
pub use input::Input;
pub use memory::Memory;
pub use status::Status;
pub use trace::Trace;
pub use vxi::Vxi;

type Result<T> = std::result::Result<T, ScpiError>;

/// Fields of the `*IDN?` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware: String,
}

/// Handle on one instrument: owns the link, answers the `*`-prefixed
/// common commands itself and hands out subsystem views.
pub struct Instrument<L: ScpiLink> {
    link: L,
}

impl<L: ScpiLink> Instrument<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn into_inner(self) -> L {
        self.link
    }

    pub fn identity(&mut self) -> Result<Identity> {
        let resp = self.link.scpi_query("*IDN?")?;
        let f = response::expect_fields("*IDN?", &resp, 4)?;
        Ok(Identity {
            manufacturer: response::unquote(f[0]).to_string(),
            model: response::unquote(f[1]).to_string(),
            serial_number: response::unquote(f[2]).to_string(),
            firmware: response::unquote(f[3]).to_string(),
        })
    }

    pub fn reset(&mut self) -> Result<()> {
        self.link.scpi_write("*RST")
    }

    pub fn clear_status(&mut self) -> Result<()> {
        self.link.scpi_write("*CLS")
    }

    pub fn wait_to_complete(&mut self) -> Result<()> {
        self.link.scpi_write("*WAI")
    }

    pub fn operation_complete(&mut self) -> Result<()> {
        self.link.scpi_write("*OPC")
    }

    /// `*OPC?` — returns once the instrument reports `1`.
    pub fn operation_complete_query(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query("*OPC?")?;
        response::parse_bool("*OPC?", &resp)
    }

    /// `*TST?` — zero means the self-test passed.
    pub fn self_test(&mut self) -> Result<i32> {
        let resp = self.link.scpi_query("*TST?")?;
        response::parse_num("*TST?", &resp)
    }

    pub fn status_byte(&mut self) -> Result<StatusByte> {
        let resp = self.link.scpi_query("*STB?")?;
        Ok(StatusByte::new(response::parse_num("*STB?", &resp)?))
    }

    pub fn event_status(&mut self) -> Result<EventStatusByte> {
        let resp = self.link.scpi_query("*ESR?")?;
        Ok(EventStatusByte::new(response::parse_num("*ESR?", &resp)?))
    }

    pub fn set_event_mask(&mut self, mask: EventStatusByte) -> Result<()> {
        self.link
            .scpi_write(Command::new("*ESE").para(mask).as_str())
    }

    pub fn get_event_mask(&mut self) -> Result<EventStatusByte> {
        let resp = self.link.scpi_query("*ESE?")?;
        Ok(EventStatusByte::new(response::parse_num("*ESE?", &resp)?))
    }

    pub fn set_service_mask(&mut self, mask: StatusByte) -> Result<()> {
        self.link
            .scpi_write(Command::new("*SRE").para(mask).as_str())
    }

    pub fn get_service_mask(&mut self) -> Result<StatusByte> {
        let resp = self.link.scpi_query("*SRE?")?;
        Ok(StatusByte::new(response::parse_num("*SRE?", &resp)?))
    }

    pub fn calculate(&mut self) -> Calculate<'_, L> {
        Calculate::new(&mut self.link)
    }

    pub fn calibration(&mut self) -> Calibration<'_, L> {
        Calibration::new(&mut self.link)
    }

    pub fn display(&mut self) -> Display<'_, L> {
        Display::new(&mut self.link)
    }

    pub fn input(&mut self) -> Input<'_, L> {
        Input::new(&mut self.link)
    }

    pub fn memory(&mut self) -> Memory<'_, L> {
        Memory::new(&mut self.link)
    }

    pub fn status(&mut self) -> Status<'_, L> {
        Status::new(&mut self.link)
    }

    pub fn trace(&mut self) -> Trace<'_, L> {
        Trace::new(&mut self.link)
    }

    pub fn vxi(&mut self) -> Vxi<'_, L> {
        Vxi::new(&mut self.link)
    }
}

/// Named entities (traces, stored states) travel inside quoted strings;
/// a name that embeds quotes or separators would change the message
/// shape, so those are rejected before any I/O.
pub(crate) fn check_name(command: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ScpiError::invalid(command, "name must not be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control() && c != ',' && c != '"' && c != '\'')
    {
        return Err(ScpiError::invalid(
            command,
            format!("name contains characters not allowed on the wire: {:?}", name),
        ));
    }
    Ok(())
}

/// Finite-value guard for analog setters.
pub(crate) fn check_finite(command: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ScpiError::invalid(
            command,
            format!("value must be finite, got {}", value),
        ));
    }
    Ok(())
}
