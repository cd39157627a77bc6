//! tar + zstd container
//!
//! tar needs an entry's size before its data, so the sink buffers the open
//! entry and appends it when the next entry starts or the archive finishes.
//! Entries carry zero mtime and mode 0644 so identical input gives identical
//! archives.

use super::{read_bounded, ArchiveEntry, EntrySink, EntrySource, MAX_ENTRY_SIZE};
use bdio_core::{BdioError, Result};
use std::io::{Read, Write};
use tar::{Archive, Builder, Header};

/// Writes entries into a zstd-compressed tar archive
pub struct TarZstdSink<W: Write> {
    builder: Builder<zstd::Encoder<'static, W>>,
    pending: Option<(String, Vec<u8>)>,
}

impl<W: Write> TarZstdSink<W> {
    /// Compress with the given zstd level
    pub fn new(inner: W, level: i32) -> Result<Self> {
        let encoder = zstd::Encoder::new(inner, level)
            .map_err(|e| BdioError::compression(format!("zstd encoder: {}", e)))?;
        Ok(Self {
            builder: Builder::new(encoder),
            pending: None,
        })
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some((name, data)) = self.pending.take() {
            let mut header = Header::new_gnu();
            header
                .set_path(&name)
                .map_err(|e| BdioError::archive(format!("set path '{}': {}", name, e)))?;
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(0);
            header.set_cksum();

            self.builder
                .append(&header, data.as_slice())
                .map_err(|e| BdioError::archive(format!("append '{}': {}", name, e)))?;
        }
        Ok(())
    }
}

impl<W: Write> EntrySink for TarZstdSink<W> {
    type Output = W;

    fn start_entry(&mut self, name: &str) -> Result<()> {
        self.flush_pending()?;
        self.pending = Some((name.to_string(), Vec::new()));
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        match self.pending.as_mut() {
            Some((_, data)) => {
                data.extend_from_slice(bytes);
                Ok(())
            }
            None => Err(BdioError::archive("write outside of an entry")),
        }
    }

    fn finish(mut self) -> Result<W> {
        self.flush_pending()?;
        let encoder = self
            .builder
            .into_inner()
            .map_err(|e| BdioError::archive(format!("tar finish: {}", e)))?;
        encoder
            .finish()
            .map_err(|e| BdioError::compression(format!("zstd finish: {}", e)))
    }
}

/// Reads the file entries of a zstd-compressed tar archive
///
/// The archive is decoded when the source is opened; entries are then handed
/// out in archive order.
pub struct TarZstdSource {
    entries: std::vec::IntoIter<ArchiveEntry>,
}

impl TarZstdSource {
    /// Decode an archive
    pub fn new<R: Read>(inner: R) -> Result<Self> {
        Self::with_max_entry_size(inner, MAX_ENTRY_SIZE)
    }

    /// Decode an archive, refusing entries larger than `max` bytes
    pub fn with_max_entry_size<R: Read>(inner: R, max: u64) -> Result<Self> {
        let decoder = zstd::Decoder::new(inner)
            .map_err(|e| BdioError::compression(format!("zstd decode: {}", e)))?;
        let mut archive = Archive::new(decoder);

        let mut entries = Vec::new();
        for entry in archive
            .entries()
            .map_err(|e| BdioError::archive(e.to_string()))?
        {
            let mut entry = entry.map_err(|e| BdioError::archive(e.to_string()))?;
            if !entry.header().entry_type().is_file() {
                continue;
            }
            let name = entry
                .path()
                .map_err(|e| BdioError::archive(e.to_string()))?
                .to_string_lossy()
                .into_owned();
            let data = read_bounded(&name, &mut entry, max)?;
            entries.push(ArchiveEntry { name, data });
        }

        Ok(Self {
            entries: entries.into_iter(),
        })
    }
}

impl EntrySource for TarZstdSource {
    fn next_entry(&mut self) -> Result<Option<ArchiveEntry>> {
        Ok(self.entries.next())
    }
}
