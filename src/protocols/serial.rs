use super::Protocol;
use serial::{SerialPort, SystemPort};

#[derive(Clone, Copy)]
pub struct Serial {
    pub baud_rate: serial::BaudRate,
    pub data_bits: serial::CharSize,
    pub parity: serial::Parity,
    pub stop_bits: serial::StopBits,
    pub flow_control: serial::FlowControl,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            baud_rate: serial::Baud9600,
            data_bits: serial::Bits8,
            parity: serial::ParityNone,
            stop_bits: serial::Stop1,
            flow_control: serial::FlowNone,
        }
    }
}

impl Protocol for Serial {
    type Address = String;
    type Error = serial::Error;
    type IO = SystemPort;
    fn connect(
        self,
        address: Self::Address,
        time_out: std::time::Duration,
    ) -> Result<Self::IO, Self::Error> {
        let mut port = serial::open(&address)?;
        port.reconfigure(&|settings| {
            settings.set_baud_rate(self.baud_rate)?;
            settings.set_char_size(self.data_bits);
            settings.set_parity(self.parity);
            settings.set_stop_bits(self.stop_bits);
            settings.set_flow_control(self.flow_control);
            Ok(())
        })?;
        port.set_timeout(time_out)?;
        Ok(port)
    }
}
