//! `CALCulate` — post-acquisition math: trace format, math
//! expressions, averaging, limit testing and smoothing.

use crate::scpi::{error::ScpiError, on_off, response, scpi_setting, Command, ScpiLink};

use super::{check_finite, Result};

scpi_setting! {
    /// How the measured complex data is presented.
    TraceFormat {
        MagnitudeLinear => "MLIN" ["MLINEAR"],
        MagnitudeLog => "MLOG" ["MLOGARITHMIC"],
        Phase => "PHAS" ["PHASE"],
        Polar => "POL" ["POLAR"],
        Smith => "SMIT" ["SMITH"],
        Swr => "SWR",
        GroupDelay => "GDEL" ["GDELAY"],
        Real => "REAL",
        Imaginary => "IMAG" ["IMAGINARY"],
        None => "NONE",
    }
}

pub struct Calculate<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Calculate<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    pub fn set_format(&mut self, format: TraceFormat) -> Result<()> {
        self.link
            .scpi_write(Command::new(":CALC:FORM").para(format).as_str())
    }

    pub fn get_format(&mut self) -> Result<TraceFormat> {
        let resp = self.link.scpi_query(":CALC:FORM?")?;
        response::parse_setting(":CALC:FORM?", &resp)
    }

    pub fn set_math_state(&mut self, enabled: bool) -> Result<()> {
        self.link.scpi_write(
            Command::new(":CALC:MATH:STAT")
                .para(on_off(enabled))
                .as_str(),
        )
    }

    pub fn get_math_state(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":CALC:MATH:STAT?")?;
        response::parse_bool(":CALC:MATH:STAT?", &resp)
    }

    /// Installs a math expression, e.g. `(TRACE1-TRACE2)`.
    pub fn set_math_expression(&mut self, expression: &str) -> Result<()> {
        if expression.is_empty() {
            return Err(ScpiError::invalid(
                ":CALC:MATH:EXPR",
                "expression must not be empty",
            ));
        }
        if expression.contains('"') || expression.contains('\'') {
            return Err(ScpiError::invalid(
                ":CALC:MATH:EXPR",
                "expression must not contain quote characters",
            ));
        }
        self.link.scpi_write(
            Command::new(":CALC:MATH:EXPR")
                .quoted(expression)
                .as_str(),
        )
    }

    pub fn get_math_expression(&mut self) -> Result<String> {
        let resp = self.link.scpi_query(":CALC:MATH:EXPR?")?;
        Ok(response::unquote(response::trim(&resp)).to_string())
    }

    pub fn set_average_state(&mut self, enabled: bool) -> Result<()> {
        self.link.scpi_write(
            Command::new(":CALC:AVER")
                .para(on_off(enabled))
                .as_str(),
        )
    }

    pub fn get_average_state(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":CALC:AVER?")?;
        response::parse_bool(":CALC:AVER?", &resp)
    }

    pub fn set_average_count(&mut self, count: u32) -> Result<()> {
        if !(1..=999).contains(&count) {
            return Err(ScpiError::out_of_range(
                ":CALC:AVER:COUN",
                format!("count {} outside 1..=999", count),
            ));
        }
        self.link
            .scpi_write(Command::new(":CALC:AVER:COUN").para(count).as_str())
    }

    pub fn get_average_count(&mut self) -> Result<u32> {
        let resp = self.link.scpi_query(":CALC:AVER:COUN?")?;
        response::parse_num(":CALC:AVER:COUN?", &resp)
    }

    pub fn set_limit_state(&mut self, enabled: bool) -> Result<()> {
        self.link.scpi_write(
            Command::new(":CALC:LIM:STAT")
                .para(on_off(enabled))
                .as_str(),
        )
    }

    pub fn get_limit_state(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":CALC:LIM:STAT?")?;
        response::parse_bool(":CALC:LIM:STAT?", &resp)
    }

    pub fn set_limit_upper(&mut self, limit: f64) -> Result<()> {
        check_finite(":CALC:LIM:UPP", limit)?;
        self.link
            .scpi_write(Command::new(":CALC:LIM:UPP").para(limit).as_str())
    }

    pub fn get_limit_upper(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":CALC:LIM:UPP?")?;
        response::parse_num(":CALC:LIM:UPP?", &resp)
    }

    pub fn set_limit_lower(&mut self, limit: f64) -> Result<()> {
        check_finite(":CALC:LIM:LOW", limit)?;
        self.link
            .scpi_write(Command::new(":CALC:LIM:LOW").para(limit).as_str())
    }

    pub fn get_limit_lower(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":CALC:LIM:LOW?")?;
        response::parse_num(":CALC:LIM:LOW?", &resp)
    }

    /// `true` when the last limit test failed.
    pub fn limit_fail(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":CALC:LIM:FAIL?")?;
        response::parse_bool(":CALC:LIM:FAIL?", &resp)
    }

    pub fn set_smoothing_state(&mut self, enabled: bool) -> Result<()> {
        self.link.scpi_write(
            Command::new(":CALC:SMO")
                .para(on_off(enabled))
                .as_str(),
        )
    }

    pub fn get_smoothing_state(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":CALC:SMO?")?;
        response::parse_bool(":CALC:SMO?", &resp)
    }

    /// Smoothing aperture as a percentage of the trace span.
    pub fn set_smoothing_aperture(&mut self, percent: f64) -> Result<()> {
        check_finite(":CALC:SMO:APER", percent)?;
        if !(0.05..=25.0).contains(&percent) {
            return Err(ScpiError::out_of_range(
                ":CALC:SMO:APER",
                format!("aperture {} outside 0.05..=25 percent", percent),
            ));
        }
        self.link
            .scpi_write(Command::new(":CALC:SMO:APER").para(percent).as_str())
    }

    pub fn get_smoothing_aperture(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":CALC:SMO:APER?")?;
        response::parse_num(":CALC:SMO:APER?", &resp)
    }
}
