//! `DISPlay` — front panel: enable, brightness/contrast, trace color
//! and the annotation line.

use crate::scpi::{error::ScpiError, on_off, response, Command, ScpiLink};

use super::{check_finite, Result};

/// Hue, saturation, luminance; each component normalized to 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub hue: f64,
    pub saturation: f64,
    pub luminance: f64,
}

pub struct Display<'a, L: ScpiLink> {
    link: &'a mut L,
}

impl<'a, L: ScpiLink> Display<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    pub fn set_state(&mut self, enabled: bool) -> Result<()> {
        self.link
            .scpi_write(Command::new(":DISP:ENAB").para(on_off(enabled)).as_str())
    }

    pub fn get_state(&mut self) -> Result<bool> {
        let resp = self.link.scpi_query(":DISP:ENAB?")?;
        response::parse_bool(":DISP:ENAB?", &resp)
    }

    pub fn set_brightness(&mut self, level: f64) -> Result<()> {
        check_unit(":DISP:BRIG", "brightness", level)?;
        self.link
            .scpi_write(Command::new(":DISP:BRIG").para(level).as_str())
    }

    pub fn get_brightness(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":DISP:BRIG?")?;
        response::parse_num(":DISP:BRIG?", &resp)
    }

    pub fn set_contrast(&mut self, level: f64) -> Result<()> {
        check_unit(":DISP:CONT", "contrast", level)?;
        self.link
            .scpi_write(Command::new(":DISP:CONT").para(level).as_str())
    }

    pub fn get_contrast(&mut self) -> Result<f64> {
        let resp = self.link.scpi_query(":DISP:CONT?")?;
        response::parse_num(":DISP:CONT?", &resp)
    }

    pub fn set_color(&mut self, color: Color) -> Result<()> {
        check_unit(":DISP:COL:HSL", "hue", color.hue)?;
        check_unit(":DISP:COL:HSL", "saturation", color.saturation)?;
        check_unit(":DISP:COL:HSL", "luminance", color.luminance)?;
        self.link.scpi_write(
            Command::new(":DISP:COL:HSL")
                .para(color.hue)
                .para(color.saturation)
                .para(color.luminance)
                .as_str(),
        )
    }

    pub fn get_color(&mut self) -> Result<Color> {
        let resp = self.link.scpi_query(":DISP:COL:HSL?")?;
        let f = response::expect_fields(":DISP:COL:HSL?", &resp, 3)?;
        Ok(Color {
            hue: response::parse_num(":DISP:COL:HSL?", f[0])?,
            saturation: response::parse_num(":DISP:COL:HSL?", f[1])?,
            luminance: response::parse_num(":DISP:COL:HSL?", f[2])?,
        })
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        if text.contains('"') || text.contains('\'') {
            return Err(ScpiError::invalid(
                ":DISP:TEXT",
                "text must not contain quote characters",
            ));
        }
        self.link
            .scpi_write(Command::new(":DISP:TEXT").quoted(text).as_str())
    }

    pub fn get_text(&mut self) -> Result<String> {
        let resp = self.link.scpi_query(":DISP:TEXT?")?;
        Ok(response::unquote(response::trim(&resp)).to_string())
    }

    pub fn clear_text(&mut self) -> Result<()> {
        self.link.scpi_write(":DISP:TEXT:CLE")
    }
}

fn check_unit(command: &'static str, what: &str, value: f64) -> Result<()> {
    check_finite(command, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ScpiError::out_of_range(
            command,
            format!("{} {} outside 0..=1", what, value),
        ));
    }
    Ok(())
}
