//! IEEE 488.2 definite-length block data: `#<ndigits><nbytes><raw>`.
//!
//! One ASCII digit gives the width of the decimal length field that
//! follows, then exactly that many payload bytes. This is the only wire
//! format in the crate with a bit-exact contract; `MEMory:DATA` and
//! `TRACe:DATA` both ride on it.

use std::io::BufRead;

use bytes::{BufMut, Bytes, BytesMut};

use super::error::ScpiError;

/// Largest payload a single-digit length-of-length can describe.
const MAX_LEN: usize = 999_999_999;

/// Frames `data` as a definite-length block.
///
/// Payloads above [`MAX_LEN`] bytes cannot be represented and are
/// rejected.
pub fn encode(data: &[u8]) -> Result<Bytes, ScpiError> {
    if data.len() > MAX_LEN {
        return Err(ScpiError::Block("payload exceeds 9-digit length field"));
    }
    let len = data.len().to_string();
    let mut out = BytesMut::with_capacity(2 + len.len() + data.len());
    out.put_u8(b'#');
    out.put_u8(b'0' + len.len() as u8);
    out.put_slice(len.as_bytes());
    out.put_slice(data);
    Ok(out.freeze())
}

/// Extracts the payload from a definite-length block.
///
/// Bytes after the payload (a trailing terminator, typically) are
/// ignored. The indefinite form `#0` is not supported.
pub fn decode(src: &[u8]) -> Result<Bytes, ScpiError> {
    if src.first() != Some(&b'#') {
        return Err(ScpiError::Block("missing '#' marker"));
    }
    let ndigits = match src.get(1) {
        Some(b'0') => return Err(ScpiError::Block("indefinite-length block not supported")),
        Some(d @ b'1'..=b'9') => (d - b'0') as usize,
        _ => return Err(ScpiError::Block("length-of-length is not a digit")),
    };
    let field = src
        .get(2..2 + ndigits)
        .ok_or(ScpiError::Block("truncated length field"))?;
    let nbytes = parse_len(field)?;
    let data = src
        .get(2 + ndigits..2 + ndigits + nbytes)
        .ok_or(ScpiError::Block("truncated payload"))?;
    Ok(Bytes::copy_from_slice(data))
}

/// Reads one block straight off a buffered stream, consuming exactly
/// the framed bytes. Used by `Messenger` so binary payloads containing
/// the line terminator survive intact.
pub(crate) fn read_from<R: BufRead>(src: &mut R) -> Result<Bytes, ScpiError> {
    let mut head = [0u8; 2];
    src.read_exact(&mut head)?;
    if head[0] != b'#' {
        return Err(ScpiError::Block("missing '#' marker"));
    }
    let ndigits = match head[1] {
        b'0' => return Err(ScpiError::Block("indefinite-length block not supported")),
        d @ b'1'..=b'9' => (d - b'0') as usize,
        _ => return Err(ScpiError::Block("length-of-length is not a digit")),
    };
    let mut field = vec![0u8; ndigits];
    src.read_exact(&mut field)?;
    let nbytes = parse_len(&field)?;
    let mut data = vec![0u8; nbytes];
    src.read_exact(&mut data)?;
    Ok(data.into())
}

fn parse_len(field: &[u8]) -> Result<usize, ScpiError> {
    let mut nbytes = 0usize;
    for &b in field {
        if !b.is_ascii_digit() {
            return Err(ScpiError::Block("length field is not numeric"));
        }
        nbytes = nbytes * 10 + (b - b'0') as usize;
    }
    Ok(nbytes)
}
