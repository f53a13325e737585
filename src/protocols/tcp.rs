use super::Protocol;
use std::{
    io::Error,
    net::{SocketAddr, TcpStream},
};

/// Raw-socket SCPI, conventionally port 5025.
#[derive(Default)]
pub struct Tcp;

impl Protocol for Tcp {
    type IO = TcpStream;
    type Address = SocketAddr;
    type Error = Error;
    fn connect(
        self,
        address: Self::Address,
        time_out: std::time::Duration,
    ) -> Result<Self::IO, Self::Error> {
        let stream = TcpStream::connect_timeout(&address, time_out)?;
        stream.set_read_timeout(Some(time_out))?;
        stream.set_write_timeout(Some(time_out))?;
        Ok(stream)
    }
}
