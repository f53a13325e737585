//! One-to-one mappings from method calls to SCPI text commands for
//! laboratory test instruments reached over a VISA-style transport.
//!
//! Every wrapper method does the same four things and nothing else:
//! validate its argument against a fixed enumeration or numeric range,
//! format the command per the SCPI grammar, push it down the link, and
//! (for queries) parse the reply text back into a typed value. There is
//! no instrument state kept on this side, no retry and no concurrency.
//!
//! The link contract is the [`scpi::ScpiLink`] trait; anything with a
//! write/query pair fits. For direct use, [`open_tcp`] and
//! [`open_serial`] build an [`Instrument`] over the bundled transports:
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let mut dmm = scpilink::open_tcp(
//!     "192.168.0.42:5025".parse().unwrap(),
//!     Duration::from_secs(2),
//! )?;
//! println!("{:?}", dmm.identity()?);
//! dmm.input().set_coupling(scpilink::subsystems::input::InputCoupling::Dc)?;
//! # Ok::<(), scpilink::Error>(())
//! ```

use std::net::TcpStream;
use std::time::Duration;

pub mod error;
pub mod protocols;
pub mod scpi;
pub mod subsystems;

pub use error::Error;
pub use scpi::{Command, Messenger, ScpiLink};
pub use subsystems::{Identity, Instrument};

use protocols::{Protocol, Serial, Tcp};

/// Connects to a raw-socket SCPI endpoint (port 5025 by convention).
pub fn open_tcp(
    address: std::net::SocketAddr,
    time_out: Duration,
) -> Result<Instrument<Messenger<TcpStream>>, Error> {
    let io = Tcp.connect(address, time_out)?;
    Ok(Instrument::new(Messenger::new(io)))
}

/// Opens a serial-attached instrument with the given port settings.
pub fn open_serial(
    port: impl Into<String>,
    config: Serial,
    time_out: Duration,
) -> Result<Instrument<Messenger<serial::SystemPort>>, Error> {
    let io = config.connect(port.into(), time_out)?;
    Ok(Instrument::new(Messenger::new(io)))
}
