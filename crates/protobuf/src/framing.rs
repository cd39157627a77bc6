//! Entry prefix and delimited-message framing
//!
//! Every entry begins with two big-endian i16s: the entry type and the format
//! version. Chunk payloads are sequences of messages, each preceded by its
//! length as a protobuf varint.

use bdio_core::{BdioError, EntryType, Result, ENTRY_PREFIX_LEN};
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use std::io::{self, Read};

/// Longest legal varint encoding of a u64
const MAX_VARINT_LEN: usize = 10;

/// Decoded entry prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPrefix {
    /// Header or chunk
    pub entry_type: EntryType,
    /// Format version tag, not yet checked against the registry
    pub version: i16,
}

/// Encode the 4-byte prefix of an entry
pub fn write_prefix(entry_type: EntryType, version: i16) -> [u8; ENTRY_PREFIX_LEN] {
    let mut prefix = [0u8; ENTRY_PREFIX_LEN];
    BigEndian::write_i16(&mut prefix[0..2], entry_type.as_i16());
    BigEndian::write_i16(&mut prefix[2..4], version);
    prefix
}

/// Read and decode the 4-byte prefix at the start of an entry
pub fn read_prefix<R: Read + ?Sized>(reader: &mut R) -> Result<EntryPrefix> {
    let mut prefix = [0u8; ENTRY_PREFIX_LEN];
    read_exact_or_framing(reader, &mut prefix, "entry prefix")?;
    let entry_type = decode_entry_type(BigEndian::read_i16(&prefix[0..2]))?;
    let version = BigEndian::read_i16(&prefix[2..4]);
    Ok(EntryPrefix {
        entry_type,
        version,
    })
}

/// Read the entry-type half of the prefix
pub fn read_entry_type<R: Read + ?Sized>(reader: &mut R) -> Result<EntryType> {
    let raw = reader
        .read_i16::<BigEndian>()
        .map_err(|e| truncated(e, "entry type"))?;
    decode_entry_type(raw)
}

/// Read the version half of the prefix
pub fn read_version<R: Read + ?Sized>(reader: &mut R) -> Result<i16> {
    reader
        .read_i16::<BigEndian>()
        .map_err(|e| truncated(e, "format version"))
}

fn decode_entry_type(raw: i16) -> Result<EntryType> {
    EntryType::from_i16(raw).ok_or(BdioError::UnknownEntryType(raw))
}

fn truncated(err: io::Error, what: &str) -> BdioError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        BdioError::framing(format!("truncated {}", what))
    } else {
        BdioError::Io(err)
    }
}

fn read_exact_or_framing<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    what: &str,
) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(BdioError::framing(format!(
                    "truncated {}: {} of {} bytes",
                    what,
                    filled,
                    buf.len()
                )))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn read_byte<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Read one varint-delimited message body
///
/// Returns `Ok(None)` on a clean end of stream (no byte of a length prefix
/// read). A stream that ends inside a length prefix or a body is a framing
/// error.
pub fn read_delimited<R: Read + ?Sized>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut len: u64 = 0;
    let mut terminated = false;
    for index in 0..MAX_VARINT_LEN {
        let byte = match read_byte(reader)? {
            Some(byte) => byte,
            None if index == 0 => return Ok(None),
            None => return Err(BdioError::framing("truncated length prefix")),
        };
        len |= u64::from(byte & 0x7f) << (7 * index);
        if byte & 0x80 == 0 {
            terminated = true;
            break;
        }
    }
    if !terminated {
        return Err(BdioError::framing("malformed length prefix"));
    }

    let mut body = Vec::new();
    (&mut *reader).take(len).read_to_end(&mut body)?;
    if body.len() as u64 != len {
        return Err(BdioError::framing(format!(
            "truncated message: expected {} bytes, found {}",
            len,
            body.len()
        )));
    }
    Ok(Some(body))
}
