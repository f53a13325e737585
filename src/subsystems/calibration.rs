//! `CALibration` — bench calibration control: autocal, the secure
//! switch, correction values and the cal date stamp.

use crate::scpi::{error::ScpiError, on_off, response, scpi_setting, Command, ScpiLink};

use super::{check_finite, Result};

scpi_setting! {
    /// Autocalibration behavior. `ONCE` runs a single cycle and drops
    /// back to `OFF`.
    CalAuto {
        Off => "OFF",
        On => "ON",
        Once => "ONCE",
    }
}

/// Calendar stamp of the last calibration, as the instrument stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

pub struct Calibration<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Calibration<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    pub fn set_auto(&mut self, auto: CalAuto) -> Result<()> {
        self.link
            .scpi_write(Command::new(":CAL:AUTO").para(auto).as_str())
    }

    pub fn get_auto(&mut self) -> Result<CalAuto> {
        let resp = self.link.scpi_query(":CAL:AUTO?")?;
        response::parse_setting(":CAL:AUTO?", &resp)
    }

    /// Runs the full calibration sequence; zero means pass.
    pub fn run_all(&mut self) -> Result<i32> {
        let resp = self.link.scpi_query(":CAL:ALL?")?;
        response::parse_num(":CAL:ALL?", &resp)
    }

    pub fn count(&mut self) -> Result<u32> {
        let resp = self.link.scpi_query(":CAL:COUN?")?;
        response::parse_num(":CAL:COUN?", &resp)
    }

    pub fn set_secure_state(&mut self, enabled: bool, code: &str) -> Result<()> {
        check_code(":CAL:SEC:STAT", code)?;
        self.link.scpi_write(
            Command::new(":CAL:SEC:STAT")
                .para(on_off(enabled))
                .quoted(code)
                .as_str(),
        )
    }

    pub fn get_secure_state(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":CAL:SEC:STAT?")?;
        response::parse_bool(":CAL:SEC:STAT?", &resp)
    }

    /// Replaces the security code. Only valid while unsecured.
    pub fn set_secure_code(&mut self, code: &str) -> Result<()> {
        check_code(":CAL:SEC:CODE", code)?;
        self.link
            .scpi_write(Command::new(":CAL:SEC:CODE").quoted(code).as_str())
    }

    /// Correction value for the point selected by the running cal step.
    pub fn set_value(&mut self, value: f64) -> Result<()> {
        check_finite(":CAL:VAL", value)?;
        self.link
            .scpi_write(Command::new(":CAL:VAL").para(value).as_str())
    }

    pub fn get_value(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":CAL:VAL?")?;
        response::parse_num(":CAL:VAL?", &resp)
    }

    /// Free-form message stored with the cal record.
    pub fn set_string(&mut self, message: &str) -> Result<()> {
        if message.contains('"') || message.contains('\'') {
            return Err(ScpiError::invalid(
                ":CAL:STR",
                "message must not contain quote characters",
            ));
        }
        self.link
            .scpi_write(Command::new(":CAL:STR").quoted(message).as_str())
    }

    pub fn get_string(&mut self) -> Result<String> {
        let resp = self.link.scpi_query(":CAL:STR?")?;
        Ok(response::unquote(response::trim(&resp)).to_string())
    }

    pub fn set_date(&mut self, date: CalDate) -> Result<()> {
        if !(1990..=2099).contains(&date.year) {
            return Err(ScpiError::out_of_range(
                ":CAL:DATE",
                format!("year {} outside 1990..=2099", date.year),
            ));
        }
        if !(1..=12).contains(&date.month) {
            return Err(ScpiError::out_of_range(
                ":CAL:DATE",
                format!("month {} outside 1..=12", date.month),
            ));
        }
        if !(1..=31).contains(&date.day) {
            return Err(ScpiError::out_of_range(
                ":CAL:DATE",
                format!("day {} outside 1..=31", date.day),
            ));
        }
        self.link.scpi_write(
            Command::new(":CAL:DATE")
                .para(date.year)
                .para(date.month)
                .para(date.day)
                .as_str(),
        )
    }

    pub fn get_date(&mut self) -> Result<CalDate> {
        let resp = self.link.scpi_query(":CAL:DATE?")?;
        let f = response::expect_fields(":CAL:DATE?", &resp, 3)?;
        Ok(CalDate {
            year: response::parse_num(":CAL:DATE?", f[0])?,
            month: response::parse_num(":CAL:DATE?", f[1])?,
            day: response::parse_num(":CAL:DATE?", f[2])?,
        })
    }
}

fn check_code(command: &'static str, code: &str) -> Result<()> {
    if code.is_empty() || code.len() > 12 {
        return Err(ScpiError::invalid(
            command,
            format!("security code must be 1..=12 characters, got {}", code.len()),
        ));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ScpiError::invalid(
            command,
            "security code must be alphanumeric",
        ));
    }
    Ok(())
}
