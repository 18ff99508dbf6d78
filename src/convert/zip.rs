//! Zip archive reading
//!
//! This module implements a minimal zip container reader: it walks the
//! central directory, picks the geometry entry out of the archive, and
//! hands the decompressed payload to the matching format reader. Only
//! the stored and deflate compression methods are supported, which is
//! what every shapefile/KML bundling tool produces.

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::DeflateDecoder;
use log::debug;

use crate::geojson::errors::{GeoError, GeoResult};
use crate::geojson::GeoDocument;
use super::handler::FormatHandler;
use super::kml::KmlReader;
use super::shapefile::ShapefileReader;

/// End of central directory signature
const EOCD_SIGNATURE: u32 = 0x0605_4b50;
/// Central directory file header signature
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
/// Local file header signature
const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;

/// Minimum size of the end of central directory record
const EOCD_LENGTH: usize = 22;
/// Fixed part of a local file header
const LOCAL_HEADER_LENGTH: u64 = 30;

/// Entry stored (uncompressed)
const METHOD_STORED: u16 = 0;
/// Entry deflate-compressed
const METHOD_DEFLATE: u16 = 8;

/// One entry from the central directory
#[derive(Debug, Clone)]
struct ZipEntry {
    name: String,
    method: u16,
    compressed_size: u32,
    uncompressed_size: u32,
    local_offset: u32,
}

/// Reader for zip archives containing geometry files
pub struct ZipReader;

impl ZipReader {
    /// Creates a new zip reader
    pub fn new() -> Self {
        ZipReader
    }

    /// Read a zip archive payload into a document
    ///
    /// The first `.shp` entry wins; when the archive holds none, the
    /// first `.kml` entry is used instead. An archive with neither is
    /// rejected.
    ///
    /// # Arguments
    /// * `data` - Raw zip archive content
    ///
    /// # Returns
    /// The converted document or an error
    pub fn read(&self, data: &[u8]) -> GeoResult<GeoDocument> {
        let entries = self.read_central_directory(data)?;
        debug!("Zip archive holds {} entries", entries.len());

        let entry = entries
            .iter()
            .find(|e| e.name.to_lowercase().ends_with(".shp"))
            .or_else(|| entries.iter().find(|e| e.name.to_lowercase().ends_with(".kml")))
            .ok_or_else(|| {
                GeoError::InvalidArchive("no .shp or .kml entry in archive".to_string())
            })?;

        debug!(
            "Using entry '{}' (method {}, {} -> {} bytes)",
            entry.name, entry.method, entry.compressed_size, entry.uncompressed_size
        );

        let payload = self.read_entry(data, entry)?;

        if entry.name.to_lowercase().ends_with(".shp") {
            ShapefileReader::new().read(&payload)
        } else {
            KmlReader::new().read(&payload)
        }
    }

    /// Locate the end of central directory record, scanning backwards
    /// past any archive comment
    fn find_eocd(&self, data: &[u8]) -> GeoResult<usize> {
        if data.len() < EOCD_LENGTH {
            return Err(GeoError::InvalidArchive(format!(
                "archive is {} bytes, shorter than an end record",
                data.len()
            )));
        }

        let mut position = data.len() - EOCD_LENGTH;
        loop {
            let signature = u32::from_le_bytes([
                data[position],
                data[position + 1],
                data[position + 2],
                data[position + 3],
            ]);
            if signature == EOCD_SIGNATURE {
                return Ok(position);
            }
            if position == 0 {
                return Err(GeoError::InvalidArchive(
                    "end of central directory record not found".to_string(),
                ));
            }
            position -= 1;
        }
    }

    /// Walk the central directory and collect every entry
    fn read_central_directory(&self, data: &[u8]) -> GeoResult<Vec<ZipEntry>> {
        let eocd = self.find_eocd(data)?;
        let mut cursor = Cursor::new(data);

        cursor.seek(SeekFrom::Start(eocd as u64 + 10))?;
        let entry_count = cursor.read_u16::<LittleEndian>()?;
        cursor.seek(SeekFrom::Start(eocd as u64 + 16))?;
        let directory_offset = cursor.read_u32::<LittleEndian>()?;

        cursor.seek(SeekFrom::Start(directory_offset as u64))?;

        let mut entries = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let signature = cursor.read_u32::<LittleEndian>()?;
            if signature != CENTRAL_HEADER_SIGNATURE {
                return Err(GeoError::InvalidArchive(format!(
                    "bad central directory signature {:#010x}",
                    signature
                )));
            }

            // Versions, flags, times and CRC are irrelevant here
            cursor.seek(SeekFrom::Current(6))?;
            let method = cursor.read_u16::<LittleEndian>()?;
            cursor.seek(SeekFrom::Current(8))?;
            let compressed_size = cursor.read_u32::<LittleEndian>()?;
            let uncompressed_size = cursor.read_u32::<LittleEndian>()?;
            let name_length = cursor.read_u16::<LittleEndian>()?;
            let extra_length = cursor.read_u16::<LittleEndian>()?;
            let comment_length = cursor.read_u16::<LittleEndian>()?;
            cursor.seek(SeekFrom::Current(8))?;
            let local_offset = cursor.read_u32::<LittleEndian>()?;

            let mut name_bytes = vec![0u8; name_length as usize];
            cursor.read_exact(&mut name_bytes)?;
            let name = String::from_utf8_lossy(&name_bytes).into_owned();

            cursor.seek(SeekFrom::Current(extra_length as i64 + comment_length as i64))?;

            entries.push(ZipEntry {
                name,
                method,
                compressed_size,
                uncompressed_size,
                local_offset,
            });
        }

        Ok(entries)
    }

    /// Extract and decompress one entry's payload
    fn read_entry(&self, data: &[u8], entry: &ZipEntry) -> GeoResult<Vec<u8>> {
        let mut cursor = Cursor::new(data);
        cursor.seek(SeekFrom::Start(entry.local_offset as u64))?;

        let signature = cursor.read_u32::<LittleEndian>()?;
        if signature != LOCAL_HEADER_SIGNATURE {
            return Err(GeoError::InvalidArchive(format!(
                "bad local header signature {:#010x} for entry '{}'",
                signature, entry.name
            )));
        }

        // The local name/extra lengths can differ from the central
        // directory's; read them from the local header.
        cursor.seek(SeekFrom::Start(entry.local_offset as u64 + 26))?;
        let name_length = cursor.read_u16::<LittleEndian>()?;
        let extra_length = cursor.read_u16::<LittleEndian>()?;

        let start = entry.local_offset as u64
            + LOCAL_HEADER_LENGTH
            + name_length as u64
            + extra_length as u64;
        let end = start + entry.compressed_size as u64;

        let compressed = data
            .get(start as usize..end as usize)
            .ok_or_else(|| {
                GeoError::InvalidArchive(format!(
                    "entry '{}' data runs past the end of the archive",
                    entry.name
                ))
            })?;

        match entry.method {
            METHOD_STORED => Ok(compressed.to_vec()),
            METHOD_DEFLATE => {
                let mut decoder = DeflateDecoder::new(compressed);
                let mut decompressed = Vec::with_capacity(entry.uncompressed_size as usize);
                decoder.read_to_end(&mut decompressed)?;
                Ok(decompressed)
            }
            other => Err(GeoError::UnsupportedCompression(other)),
        }
    }
}

/// Zip archive format handler
pub struct ZipHandler;

impl FormatHandler for ZipHandler {
    fn convert(&self, data: &[u8]) -> GeoResult<GeoDocument> {
        ZipReader::new().read(data)
    }

    fn name(&self) -> &'static str {
        "Zip archive"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["zip"]
    }
}
