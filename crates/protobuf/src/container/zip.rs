//! ZIP container, the format existing BDIO consumers read

use super::{read_bounded, ArchiveEntry, EntrySink, EntrySource, MAX_ENTRY_SIZE};
use bdio_core::{BdioError, Result};
use std::io::{Read, Seek, Write};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

fn zip_error(err: ZipError) -> BdioError {
    match err {
        ZipError::Io(io) => BdioError::Io(io),
        other => BdioError::archive(other.to_string()),
    }
}

/// Writes entries into a ZIP archive
pub struct ZipSink<W: Write + Seek> {
    writer: ZipWriter<W>,
    options: FileOptions,
}

impl<W: Write + Seek> ZipSink<W> {
    /// Deflate-compressed entries with a fixed timestamp
    pub fn new(inner: W) -> Self {
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);
        Self {
            writer: ZipWriter::new(inner),
            options,
        }
    }

    /// Store entries uncompressed instead
    pub fn stored(mut self) -> Self {
        self.options = self.options.compression_method(CompressionMethod::Stored);
        self
    }
}

impl<W: Write + Seek> EntrySink for ZipSink<W> {
    type Output = W;

    fn start_entry(&mut self, name: &str) -> Result<()> {
        self.writer.start_file(name, self.options).map_err(zip_error)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn finish(mut self) -> Result<W> {
        self.writer.finish().map_err(zip_error)
    }
}

/// Reads entries of a ZIP archive through its central directory
pub struct ZipSource<R: Read + Seek> {
    archive: ZipArchive<R>,
    next_index: usize,
    max_entry_size: u64,
}

impl<R: Read + Seek> ZipSource<R> {
    /// Open an archive
    pub fn new(inner: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(inner).map_err(zip_error)?,
            next_index: 0,
            max_entry_size: MAX_ENTRY_SIZE,
        })
    }

    /// Refuse entries larger than `max` bytes (default [`MAX_ENTRY_SIZE`])
    pub fn with_max_entry_size(mut self, max: u64) -> Self {
        self.max_entry_size = max;
        self
    }

    /// Number of entries, directories included
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// True for an archive without entries
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn next_entry(&mut self) -> Result<Option<ArchiveEntry>> {
        while self.next_index < self.archive.len() {
            let index = self.next_index;
            self.next_index += 1;

            let mut file = self.archive.by_index(index).map_err(zip_error)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let data = read_bounded(&name, &mut file, self.max_entry_size)?;
            return Ok(Some(ArchiveEntry { name, data }));
        }
        Ok(None)
    }
}
