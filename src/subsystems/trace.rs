//! `TRACe` — named data traces: sizing, transfer (binary block or
//! ASCII list), copying and housekeeping.

use bytes::Bytes;

use crate::scpi::{error::ScpiError, response, Command, ScpiLink};

use super::{check_name, Result};

pub struct Trace<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Trace<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    /// Sizes a trace; zero points is rejected before I/O.
    pub fn set_points(&mut self, name: &str, points: u32) -> Result<()> {
        check_name(":TRAC:POIN", name)?;
        if points == 0 {
            return Err(ScpiError::out_of_range(
                ":TRAC:POIN",
                "point count must be at least 1",
            ));
        }
        self.link.scpi_write(
            Command::new(":TRAC:POIN")
                .quoted(name)
                .para(points)
                .as_str(),
        )
    }

    pub fn get_points(&mut self, name: &str) -> Result<u32> {
        check_name(":TRAC:POIN?", name)?;
        let resp = self
            .link
            .scpi_query(Command::new(":TRAC:POIN").query().quoted(name).as_str())?;
        response::parse_num(":TRAC:POIN?", &resp)
    }

    /// Transfers raw trace bytes as a definite-length block.
    pub fn set_data(&mut self, name: &str, data: &[u8]) -> Result<()> {
        check_name(":TRAC:DATA", name)?;
        self.link
            .scpi_write_block(Command::new(":TRAC:DATA").quoted(name).as_str(), data)
    }

    pub fn get_data(&mut self, name: &str) -> Result<Bytes> {
        check_name(":TRAC:DATA?", name)?;
        self.link
            .scpi_query_block(Command::new(":TRAC:DATA").query().quoted(name).as_str())
    }

    /// Transfers trace values as an ASCII comma-separated list.
    pub fn set_values(&mut self, name: &str, values: &[f64]) -> Result<()> {
        check_name(":TRAC:DATA", name)?;
        if values.is_empty() {
            return Err(ScpiError::invalid(
                ":TRAC:DATA",
                "value list must not be empty",
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ScpiError::invalid(
                ":TRAC:DATA",
                format!("value list contains non-finite value {}", bad),
            ));
        }
        let mut cmd = Command::new(":TRAC:DATA").quoted(name);
        for v in values {
            cmd = cmd.para(v);
        }
        self.link.scpi_write(cmd.as_str())
    }

    pub fn get_values(&mut self, name: &str) -> Result<Vec<f64>> {
        check_name(":TRAC:DATA?", name)?;
        let resp = self
            .link
            .scpi_query(Command::new(":TRAC:DATA").query().quoted(name).as_str())?;
        response::parse_list(":TRAC:DATA?", &resp)
    }

    pub fn copy(&mut self, destination: &str, source: &str) -> Result<()> {
        check_name(":TRAC:COPY", destination)?;
        check_name(":TRAC:COPY", source)?;
        self.link.scpi_write(
            Command::new(":TRAC:COPY")
                .quoted(destination)
                .quoted(source)
                .as_str(),
        )
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        check_name(":TRAC:DEL:NAME", name)?;
        self.link
            .scpi_write(Command::new(":TRAC:DEL:NAME").quoted(name).as_str())
    }

    pub fn delete_all(&mut self) -> Result<()> {
        self.link.scpi_write(":TRAC:DEL:ALL")
    }

    /// Free and used byte counts of trace memory.
    pub fn free(&mut self) -> Result<(u64, u64)> {
        let resp = self.link.scpi_query(":TRAC:FREE?")?;
        let f = response::expect_fields(":TRAC:FREE?", &resp, 2)?;
        Ok((
            response::parse_num(":TRAC:FREE?", f[0])?,
            response::parse_num(":TRAC:FREE?", f[1])?,
        ))
    }

    /// Names of the defined traces. An instrument with none answers
    /// with an empty string or `"NONE"`.
    pub fn catalog(&mut self) -> Result<Vec<String>> {
        let resp = self.link.scpi_query(":TRAC:CAT?")?;
        let names: Vec<String> = response::fields(&resp)
            .into_iter()
            .map(|f| response::unquote(f).to_string())
            .filter(|n| !n.is_empty() && n != "NONE")
            .collect();
        Ok(names)
    }
}
