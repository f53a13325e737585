//! `STATus` — the operation and questionable register trees plus the
//! error/event queue.

use crate::scpi::{response, scpi_setting, Command, ScpiLink};

use super::Result;

scpi_setting! {
    /// The two SCPI status register trees.
    StatusBranch {
        Operation => "OPER" ["OPERATION"],
        Questionable => "QUES" ["QUESTIONABLE"],
    }
}

/// One entry popped off the instrument's error/event queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub code: i32,
    pub message: String,
}

pub struct Status<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Status<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    /// Instantaneous condition register; reading does not clear it.
    pub fn condition(&mut self, branch: StatusBranch) -> Result<u16> {
        self.query_register(branch, ":COND")
    }

    /// Latched event register; reading clears it.
    pub fn event(&mut self, branch: StatusBranch) -> Result<u16> {
        self.query_register(branch, "")
    }

    pub fn set_enable(&mut self, branch: StatusBranch, mask: u16) -> Result<()> {
        self.write_register(branch, ":ENAB", mask)
    }

    pub fn get_enable(&mut self, branch: StatusBranch) -> Result<u16> {
        self.query_register(branch, ":ENAB")
    }

    /// Which 0→1 condition transitions latch into the event register.
    pub fn set_positive_transition(&mut self, branch: StatusBranch, mask: u16) -> Result<()> {
        self.write_register(branch, ":PTR", mask)
    }

    pub fn get_positive_transition(&mut self, branch: StatusBranch) -> Result<u16> {
        self.query_register(branch, ":PTR")
    }

    /// Which 1→0 condition transitions latch into the event register.
    pub fn set_negative_transition(&mut self, branch: StatusBranch, mask: u16) -> Result<()> {
        self.write_register(branch, ":NTR", mask)
    }

    pub fn get_negative_transition(&mut self, branch: StatusBranch) -> Result<u16> {
        self.query_register(branch, ":NTR")
    }

    fn write_register(&mut self, branch: StatusBranch, leaf: &str, mask: u16) -> Result<()> {
        let header = format!(":STAT:{}{}", branch, leaf);
        self.link
            .scpi_write(Command::new(header).para(mask).as_str())
    }

    fn query_register(&mut self, branch: StatusBranch, leaf: &str) -> Result<u16> {
        let command = Command::new(format!(":STAT:{}{}", branch, leaf)).query();
        let resp = self.link.scpi_query(command.as_str())?;
        response::parse_num(command.as_str(), &resp)
    }

    /// Returns both trees to their device-defined power-on defaults.
    pub fn preset(&mut self) -> Result<()> {
        self.link.scpi_write(":STAT:PRES")
    }

    /// Pops the oldest queue entry; `None` when the queue is empty
    /// (code 0, "No error").
    pub fn next_queue_entry(&mut self) -> Result<Option<QueueEntry>> {
        let resp = self.link.scpi_query(":STAT:QUE?")?;
        let f = response::expect_fields(":STAT:QUE?", &resp, 2)?;
        let code: i32 = response::parse_num(":STAT:QUE?", f[0])?;
        if code == 0 {
            return Ok(None);
        }
        Ok(Some(QueueEntry {
            code,
            message: response::unquote(f[1]).to_string(),
        }))
    }
}
