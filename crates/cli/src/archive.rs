//! Opening archives from disk.

use anyhow::{anyhow, Context, Result};
use bdio_protobuf::{ContainerFormat, EntrySource, TarZstdSource, ZipSource};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// Open `path` as an entry source, detecting the container unless given.
pub fn open_source(path: &Path, format: Option<ContainerFormat>) -> Result<Box<dyn EntrySource>> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let format = match format {
        Some(format) => format,
        None => detect_format(&mut file)
            .with_context(|| format!("Failed to detect container of {}", path.display()))?,
    };
    debug!(target: "bdio::cli", path = %path.display(), %format, "Opening archive");

    let source: Box<dyn EntrySource> = match format {
        ContainerFormat::Zip => Box::new(ZipSource::new(BufReader::new(file))?),
        ContainerFormat::TarZstd => Box::new(TarZstdSource::new(BufReader::new(file))?),
    };
    Ok(source)
}

fn detect_format(file: &mut File) -> Result<ContainerFormat> {
    let mut magic = Vec::with_capacity(4);
    (&mut *file).take(4).read_to_end(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;
    ContainerFormat::detect(&magic).ok_or_else(|| anyhow!("Unrecognized container format"))
}
