//! `INPut` — the analog front end: coupling, impedance, attenuation,
//! filtering, gain and polarity.

use crate::scpi::{error::ScpiError, on_off, response, scpi_setting, Command, ScpiLink};

use super::{check_finite, Result};

scpi_setting! {
    InputCoupling {
        Ac => "AC",
        Dc => "DC",
        Ground => "GND" ["GROUND"],
    }
}

scpi_setting! {
    Polarity {
        Normal => "NORM" ["NORMAL"],
        Inverted => "INV" ["INVERTED"],
    }
}

/// Input terminations instruments actually offer; anything else is a
/// wiring mistake, not a continuum.
const IMPEDANCES: [f64; 3] = [50.0, 75.0, 1.0e6];

pub struct Input<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Input<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    pub fn set_coupling(&mut self, coupling: InputCoupling) -> Result<()> {
        self.link
            .scpi_write(Command::new(":INP:COUP").para(coupling).as_str())
    }

    pub fn get_coupling(&mut self) -> Result<InputCoupling> {
        let resp = self.link.scpi_query(":INP:COUP?")?;
        response::parse_setting(":INP:COUP?", &resp)
    }

    /// Termination in ohms; only 50, 75 and 1e6 exist on the hardware.
    pub fn set_impedance(&mut self, ohms: f64) -> Result<()> {
        if !IMPEDANCES.contains(&ohms) {
            return Err(ScpiError::invalid(
                ":INP:IMP",
                format!("unsupported termination {} ohm (50, 75 or 1e6)", ohms),
            ));
        }
        self.link
            .scpi_write(Command::new(":INP:IMP").para(ohms).as_str())
    }

    pub fn get_impedance(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":INP:IMP?")?;
        response::parse_num(":INP:IMP?", &resp)
    }

    pub fn set_attenuation(&mut self, db: f64) -> Result<()> {
        check_finite(":INP:ATT", db)?;
        if !(0.0..=70.0).contains(&db) {
            return Err(ScpiError::out_of_range(
                ":INP:ATT",
                format!("attenuation {} dB outside 0..=70", db),
            ));
        }
        self.link
            .scpi_write(Command::new(":INP:ATT").para(db).as_str())
    }

    pub fn get_attenuation(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":INP:ATT?")?;
        response::parse_num(":INP:ATT?", &resp)
    }

    pub fn set_attenuation_auto(&mut self, enabled: bool) -> Result<()> {
        self.link.scpi_write(
            Command::new(":INP:ATT:AUTO")
                .para(on_off(enabled))
                .as_str(),
        )
    }

    pub fn get_attenuation_auto(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":INP:ATT:AUTO?")?;
        response::parse_bool(":INP:ATT:AUTO?", &resp)
    }

    pub fn set_filter_state(&mut self, enabled: bool) -> Result<()> {
        self.link
            .scpi_write(Command::new(":INP:FILT").para(on_off(enabled)).as_str())
    }

    pub fn get_filter_state(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":INP:FILT?")?;
        response::parse_bool(":INP:FILT?", &resp)
    }

    /// Low-pass corner frequency in Hz.
    pub fn set_filter_frequency(&mut self, hz: f64) -> Result<()> {
        check_finite(":INP:FILT:FREQ", hz)?;
        if hz <= 0.0 {
            return Err(ScpiError::out_of_range(
                ":INP:FILT:FREQ",
                format!("frequency {} Hz must be positive", hz),
            ));
        }
        self.link
            .scpi_write(Command::new(":INP:FILT:FREQ").para(hz).as_str())
    }

    pub fn get_filter_frequency(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":INP:FILT:FREQ?")?;
        response::parse_num(":INP:FILT:FREQ?", &resp)
    }

    pub fn set_gain(&mut self, db: f64) -> Result<()> {
        check_finite(":INP:GAIN", db)?;
        if !(-20.0..=20.0).contains(&db) {
            return Err(ScpiError::out_of_range(
                ":INP:GAIN",
                format!("gain {} dB outside -20..=20", db),
            ));
        }
        self.link
            .scpi_write(Command::new(":INP:GAIN").para(db).as_str())
    }

    pub fn get_gain(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":INP:GAIN?")?;
        response::parse_num(":INP:GAIN?", &resp)
    }

    pub fn set_polarity(&mut self, polarity: Polarity) -> Result<()> {
        self.link
            .scpi_write(Command::new(":INP:POL").para(polarity).as_str())
    }

    pub fn get_polarity(&mut self) -> Result<Polarity> {
        let resp = self.link.scpi_query(":INP:POL?")?;
        response::parse_setting(":INP:POL?", &resp)
    }
}
