//! `VXI` — mainframe configuration: logical address selection, the
//! device roster and A16 register access.

use serde::{Deserialize, Serialize};

use crate::scpi::{error::ScpiError, response, Command, ScpiLink};

use super::Result;

/// A16 register space of one device is 64 bytes of 16-bit registers.
const MAX_REGISTER_OFFSET: u8 = 63;

/// One row of the resource manager's device table
/// (`VXI:CONF:INF? <addr>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub logical_address: u8,
    /// Logical address of the commander, `-1` for a top-level device.
    pub commander_address: i16,
    pub manufacturer_id: u16,
    pub model_code: u16,
    pub device_class: String,
}

pub struct Vxi<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Vxi<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    /// Routes subsequent word-serial commands to one logical address.
    pub fn select(&mut self, logical_address: u8) -> Result<()> {
        self.link
            .scpi_write(Command::new(":VXI:SEL").para(logical_address).as_str())
    }

    pub fn selected(&mut self) -> Result<u8> {
        let resp = self.link.scpi_query(":VXI:SEL?")?;
        response::parse_num(":VXI:SEL?", &resp)
    }

    pub fn device_count(&mut self) -> Result<u32> {
        let resp = self.link.scpi_query(":VXI:CONF:NUM?")?;
        response::parse_num(":VXI:CONF:NUM?", &resp)
    }

    /// Logical addresses of every configured device.
    pub fn device_numbers(&mut self) -> Result<Vec<u8>> {
        let resp = self.link.scpi_query(":VXI:CONF:DNUM?")?;
        response::parse_list(":VXI:CONF:DNUM?", &resp)
    }

    pub fn device_info(&mut self, logical_address: u8) -> Result<DeviceInfo> {
        let resp = self.link.scpi_query(
            Command::new(":VXI:CONF:INF")
                .query()
                .para(logical_address)
                .as_str(),
        )?;
        let f = response::expect_fields(":VXI:CONF:INF?", &resp, 5)?;
        Ok(DeviceInfo {
            logical_address: response::parse_num(":VXI:CONF:INF?", f[0])?,
            commander_address: response::parse_num(":VXI:CONF:INF?", f[1])?,
            manufacturer_id: response::parse_num(":VXI:CONF:INF?", f[2])?,
            model_code: response::parse_num(":VXI:CONF:INF?", f[3])?,
            device_class: response::unquote(f[4]).to_string(),
        })
    }

    /// Writes one 16-bit register of the selected device. Registers
    /// live on even byte offsets within the 64-byte A16 window.
    pub fn write_register(&mut self, offset: u8, value: u16) -> Result<()> {
        check_register(":VXI:REG:WRIT", offset)?;
        self.link.scpi_write(
            Command::new(":VXI:REG:WRIT")
                .para(offset)
                .para(value)
                .as_str(),
        )
    }

    pub fn read_register(&mut self, offset: u8) -> Result<u16> {
        check_register(":VXI:REG:READ?", offset)?;
        let resp = self
            .link
            .scpi_query(Command::new(":VXI:REG:READ").query().para(offset).as_str())?;
        response::parse_num(":VXI:REG:READ?", &resp)
    }
}

fn check_register(command: &'static str, offset: u8) -> Result<()> {
    if offset > MAX_REGISTER_OFFSET {
        return Err(ScpiError::out_of_range(
            command,
            format!("register offset {} outside 0..={}", offset, MAX_REGISTER_OFFSET),
        ));
    }
    if offset % 2 != 0 {
        return Err(ScpiError::out_of_range(
            command,
            format!("register offset {} must be 16-bit aligned", offset),
        ));
    }
    Ok(())
}
