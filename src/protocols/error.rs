use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("tcp protocol error: {0}")]
    TcpError(#[from] std::io::Error),
    #[error("serial protocol error: {0}")]
    SerialError(#[from] serial::Error),
}
