//! `MEMory` — instrument mass memory: the catalog, state registers and
//! named binary data.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::scpi::{error::ScpiError, response, scpi_setting, Command, ScpiLink};

use super::{check_name, Result};

/// State registers run 0..=9 on every instrument this crate targets.
const MAX_STATE_REGISTER: u32 = 9;

scpi_setting! {
    /// Memory pools the instrument accounts for separately.
    MemoryKind {
        All => "ALL",
        State => "STAT" ["STATE"],
        Table => "TABL" ["TABLE"],
        Macro => "MACR" ["MACRO"],
    }
}

/// One record out of `MEMory:CATalog?`: the instrument reports each
/// entry as a quoted `"name,type,size"` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub kind: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCatalog {
    pub bytes_used: u64,
    pub bytes_free: u64,
    pub entries: Vec<CatalogEntry>,
}

pub struct Memory<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Memory<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    pub fn catalog(&mut self) -> Result<MemoryCatalog> {
        let resp = self.link.scpi_query(":MEM:CAT?")?;
        let fields = response::fields(&resp);
        if fields.len() < 2 {
            return Err(ScpiError::response(
                ":MEM:CAT?",
                format!("expected at least 2 fields, got {}", fields.len()),
            ));
        }
        let bytes_used = response::parse_num(":MEM:CAT?", fields[0])?;
        let bytes_free = response::parse_num(":MEM:CAT?", fields[1])?;
        let entries = fields[2..]
            .iter()
            .map(|f| parse_entry(f))
            .collect::<Result<Vec<_>>>()?;
        Ok(MemoryCatalog {
            bytes_used,
            bytes_free,
            entries,
        })
    }

    /// Number of `*SAV`/`*RCL` state registers the instrument offers.
    pub fn nstates(&mut self) -> Result<u32> {
        let resp = self.link.scpi_query(":MEM:NST?")?;
        response::parse_num(":MEM:NST?", &resp)
    }

    /// Free and used byte counts for one memory pool.
    pub fn free(&mut self, kind: MemoryKind) -> Result<(u64, u64)> {
        let command = Command::new(format!(":MEM:FREE:{}", kind)).query();
        let resp = self.link.scpi_query(command.as_str())?;
        let f = response::expect_fields(command.as_str(), &resp, 2)?;
        Ok((
            response::parse_num(command.as_str(), f[0])?,
            response::parse_num(command.as_str(), f[1])?,
        ))
    }

    pub fn set_state_name(&mut self, register: u32, name: &str) -> Result<()> {
        if register > MAX_STATE_REGISTER {
            return Err(ScpiError::out_of_range(
                ":MEM:STAT:NAME",
                format!("register {} outside 0..={}", register, MAX_STATE_REGISTER),
            ));
        }
        check_name(":MEM:STAT:NAME", name)?;
        self.link.scpi_write(
            Command::new(":MEM:STAT:NAME")
                .para(register)
                .quoted(name)
                .as_str(),
        )
    }

    pub fn get_state_name(&mut self, register: u32) -> Result<String> {
        if register > MAX_STATE_REGISTER {
            return Err(ScpiError::out_of_range(
                ":MEM:STAT:NAME?",
                format!("register {} outside 0..={}", register, MAX_STATE_REGISTER),
            ));
        }
        let resp = self
            .link
            .scpi_query(Command::new(":MEM:STAT:NAME").query().para(register).as_str())?;
        Ok(response::unquote(response::trim(&resp)).to_string())
    }

    pub fn set_data(&mut self, name: &str, data: &[u8]) -> Result<()> {
        check_name(":MEM:DATA", name)?;
        self.link
            .scpi_write_block(Command::new(":MEM:DATA").quoted(name).as_str(), data)
    }

    pub fn get_data(&mut self, name: &str) -> Result<Bytes> {
        check_name(":MEM:DATA?", name)?;
        self.link
            .scpi_query_block(Command::new(":MEM:DATA").query().quoted(name).as_str())
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        check_name(":MEM:DEL:NAME", name)?;
        self.link
            .scpi_write(Command::new(":MEM:DEL:NAME").quoted(name).as_str())
    }

    pub fn delete_all(&mut self) -> Result<()> {
        self.link.scpi_write(":MEM:DEL:ALL")
    }
}

fn parse_entry(field: &str) -> Result<CatalogEntry> {
    let inner = response::unquote(field);
    let parts = response::expect_fields(":MEM:CAT?", inner, 3)?;
    Ok(CatalogEntry {
        name: parts[0].to_string(),
        kind: parts[1].to_string(),
        size: response::parse_num(":MEM:CAT?", parts[2])?,
    })
}
