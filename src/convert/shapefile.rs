//! ESRI shapefile reading
//!
//! This module implements the `.shp` geometry file reader. The format
//! mixes byte orders: the file header and record headers are big-endian,
//! record contents are little-endian. Only the geometry file is read;
//! the attribute table (`.dbf`) and projection (`.prj`) sidecars are not
//! consulted.

use std::io::{Cursor, Seek, SeekFrom};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use log::{debug, warn};

use crate::convert::shape_codes::{self, get_shape_type_name};
use crate::coordinate::RawCoordinate;
use crate::geojson::errors::{GeoError, GeoResult};
use crate::geojson::{Feature, GeoDocument};
use crate::io::seekable::SeekableReader;
use crate::utils::progress::ProgressTracker;
use super::handler::FormatHandler;

/// Magic number at the start of every shapefile
pub const SHAPEFILE_FILE_CODE: i32 = 9994;
/// The only shapefile version ever published
pub const SHAPEFILE_VERSION: i32 = 1000;

/// Fixed length of the file header in bytes
const HEADER_LENGTH: u64 = 100;
/// Length of each record header (record number + content length) in bytes
const RECORD_HEADER_LENGTH: u64 = 8;
/// Files larger than this get a progress bar while scanning records
const PROGRESS_THRESHOLD: u64 = 1 << 20;

/// Parsed shapefile header fields
#[derive(Debug, Clone, Copy)]
pub struct ShapefileHeader {
    /// Total file length in bytes
    pub file_length: u64,
    /// Declared shape type for the whole file
    pub shape_type: i32,
    /// Bounding box as (min_x, min_y, max_x, max_y)
    pub bounds: (f64, f64, f64, f64),
}

/// Reader for ESRI shapefile geometry payloads
pub struct ShapefileReader;

impl ShapefileReader {
    /// Creates a new shapefile reader
    pub fn new() -> Self {
        ShapefileReader
    }

    /// Read a shapefile payload into a document
    ///
    /// Every record becomes one feature; Null Shape records are skipped.
    /// The output is always a FeatureCollection, which extraction rejects
    /// as empty when the file holds no usable records.
    ///
    /// # Arguments
    /// * `data` - Raw `.shp` file content
    ///
    /// # Returns
    /// A FeatureCollection document or an error describing the corruption
    pub fn read(&self, data: &[u8]) -> GeoResult<GeoDocument> {
        if data.len() < HEADER_LENGTH as usize {
            return Err(GeoError::InvalidShapefile(format!(
                "file is {} bytes, shorter than the {}-byte header",
                data.len(),
                HEADER_LENGTH
            )));
        }

        let mut cursor = Cursor::new(data);
        let header = self.read_header(&mut cursor)?;

        debug!(
            "Shapefile header: shape type {} ({}), {} bytes declared",
            header.shape_type,
            get_shape_type_name(header.shape_type),
            header.file_length
        );

        // The declared length can disagree with the payload we were
        // handed; trust whichever is shorter.
        let byte_length = header.file_length.min(data.len() as u64);

        let progress = if byte_length > PROGRESS_THRESHOLD {
            Some(ProgressTracker::new(byte_length, "Reading shapefile records"))
        } else {
            None
        };

        let mut features = Vec::new();

        while cursor.position() + RECORD_HEADER_LENGTH <= byte_length {
            let record_number = cursor.read_i32::<BigEndian>()?;
            let content_words = cursor.read_i32::<BigEndian>()?;

            // Content length is in 16-bit words and includes the shape type
            if content_words < 2 {
                return Err(GeoError::InvalidShapefile(format!(
                    "record {} content length {} is shorter than a shape type",
                    record_number, content_words
                )));
            }

            let content_length = content_words as u64 * 2;
            let content_end = cursor.position() + content_length;
            if content_end > byte_length {
                return Err(GeoError::InvalidShapefile(format!(
                    "record {} runs past the end of the file",
                    record_number
                )));
            }

            let shape_type = cursor.read_i32::<LittleEndian>()?;
            if let Some(geometry) = self.read_shape(&mut cursor, shape_type, content_end)? {
                features.push(Feature::new(geometry));
            }

            // Z/M measure blocks and any record padding end here
            cursor.seek(SeekFrom::Start(content_end))?;

            if let Some(tracker) = &progress {
                tracker.advance(RECORD_HEADER_LENGTH + content_length);
            }
        }

        if let Some(tracker) = progress {
            tracker.finish();
        }

        debug!("Shapefile produced {} features", features.len());
        Ok(GeoDocument::FeatureCollection(features))
    }

    /// Parse and validate the 100-byte file header
    fn read_header(&self, reader: &mut dyn SeekableReader) -> GeoResult<ShapefileHeader> {
        let file_code = reader.read_i32::<BigEndian>()?;
        if file_code != SHAPEFILE_FILE_CODE {
            return Err(GeoError::InvalidShapefile(format!(
                "bad file code {:#x}, expected {:#x}",
                file_code, SHAPEFILE_FILE_CODE
            )));
        }

        // Five unused big-endian words
        for _ in 0..5 {
            reader.read_i32::<BigEndian>()?;
        }

        // Declared length is in 16-bit words
        let file_length = reader.read_i32::<BigEndian>()? as u64 * 2;

        let version = reader.read_i32::<LittleEndian>()?;
        if version != SHAPEFILE_VERSION {
            warn!("Unexpected shapefile version {}, continuing anyway", version);
        }

        let shape_type = reader.read_i32::<LittleEndian>()?;

        let min_x = reader.read_f64::<LittleEndian>()?;
        let min_y = reader.read_f64::<LittleEndian>()?;
        let max_x = reader.read_f64::<LittleEndian>()?;
        let max_y = reader.read_f64::<LittleEndian>()?;

        // Skip the Z and M ranges at the tail of the header
        reader.seek(SeekFrom::Start(HEADER_LENGTH))?;

        Ok(ShapefileHeader {
            file_length,
            shape_type,
            bounds: (min_x, min_y, max_x, max_y),
        })
    }

    /// Read one record's geometry, dispatching on its shape type code
    ///
    /// Z and M variants share the XY layout of their base type; the
    /// measure blocks that follow are skipped by the caller seeking to
    /// the record end.
    fn read_shape(
        &self,
        reader: &mut dyn SeekableReader,
        shape_type: i32,
        content_end: u64,
    ) -> GeoResult<Option<GeoDocument>> {
        match shape_type {
            shape_codes::SHAPE_NULL => {
                debug!("Skipping Null Shape record");
                Ok(None)
            }
            shape_codes::SHAPE_POINT
            | shape_codes::SHAPE_POINT_Z
            | shape_codes::SHAPE_POINT_M => {
                let pair = self.read_pair(reader)?;
                Ok(Some(GeoDocument::Point(pair)))
            }
            shape_codes::SHAPE_MULTIPOINT
            | shape_codes::SHAPE_MULTIPOINT_Z
            | shape_codes::SHAPE_MULTIPOINT_M => {
                let points = self.read_multipoint(reader, content_end)?;
                Ok(Some(GeoDocument::LineString(points)))
            }
            shape_codes::SHAPE_POLYLINE
            | shape_codes::SHAPE_POLYLINE_Z
            | shape_codes::SHAPE_POLYLINE_M => {
                let parts = self.read_poly_parts(reader, content_end)?;
                if parts.len() > 1 {
                    debug!("Flattening {}-part polyline into one LineString", parts.len());
                }
                Ok(Some(GeoDocument::LineString(parts.into_iter().flatten().collect())))
            }
            shape_codes::SHAPE_POLYGON
            | shape_codes::SHAPE_POLYGON_Z
            | shape_codes::SHAPE_POLYGON_M => {
                let rings = self.read_poly_parts(reader, content_end)?;
                if rings.is_empty() {
                    return Err(GeoError::InvalidShapefile(
                        "polygon record has no rings".to_string(),
                    ));
                }
                Ok(Some(GeoDocument::Polygon(rings)))
            }
            other => Err(GeoError::UnsupportedShapeType(other)),
        }
    }

    /// Read one little-endian (x, y) pair
    fn read_pair(&self, reader: &mut dyn SeekableReader) -> GeoResult<RawCoordinate> {
        let x = reader.read_f64::<LittleEndian>()?;
        let y = reader.read_f64::<LittleEndian>()?;
        Ok([x, y])
    }

    /// Read a MultiPoint payload: bounding box, count, then pairs
    fn read_multipoint(
        &self,
        reader: &mut dyn SeekableReader,
        content_end: u64,
    ) -> GeoResult<Vec<RawCoordinate>> {
        self.skip_bounding_box(reader)?;
        let num_points = self.read_count(reader, "point", content_end)?;

        let mut points = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            points.push(self.read_pair(reader)?);
        }
        Ok(points)
    }

    /// Read a PolyLine/Polygon payload and split its points into parts
    ///
    /// The layout is: bounding box, part count, point count, part start
    /// offsets, then all points. Part offsets must be ascending and in
    /// range or the record is corrupt.
    fn read_poly_parts(
        &self,
        reader: &mut dyn SeekableReader,
        content_end: u64,
    ) -> GeoResult<Vec<Vec<RawCoordinate>>> {
        self.skip_bounding_box(reader)?;
        let num_parts = self.read_count(reader, "part", content_end)?;
        let num_points = self.read_count(reader, "point", content_end)?;

        let mut part_starts = Vec::with_capacity(num_parts);
        for _ in 0..num_parts {
            let start = reader.read_i32::<LittleEndian>()?;
            if start < 0 || start as usize > num_points {
                return Err(GeoError::InvalidShapefile(format!(
                    "part start {} outside point range 0..{}",
                    start, num_points
                )));
            }
            part_starts.push(start as usize);
        }

        let mut points = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            points.push(self.read_pair(reader)?);
        }

        let mut parts = Vec::with_capacity(num_parts);
        for (index, &start) in part_starts.iter().enumerate() {
            let end = part_starts.get(index + 1).copied().unwrap_or(num_points);
            if end < start {
                return Err(GeoError::InvalidShapefile(format!(
                    "part starts not ascending: {} after {}",
                    end, start
                )));
            }
            parts.push(points[start..end].to_vec());
        }

        Ok(parts)
    }

    /// Read a non-negative little-endian count, bounded by what the
    /// record can actually hold
    fn read_count(
        &self,
        reader: &mut dyn SeekableReader,
        what: &str,
        content_end: u64,
    ) -> GeoResult<usize> {
        let count = reader.read_i32::<LittleEndian>()?;
        if count < 0 {
            return Err(GeoError::InvalidShapefile(format!(
                "negative {} count {}",
                what, count
            )));
        }

        // Every counted element is at least 4 bytes; a count the record
        // cannot hold means a truncated or corrupt record, not a huge
        // allocation.
        let remaining = content_end.saturating_sub(reader.stream_position()?);
        if count as u64 > remaining / 4 {
            return Err(GeoError::InvalidShapefile(format!(
                "{} count {} does not fit in the record",
                what, count
            )));
        }

        Ok(count as usize)
    }

    /// Skip a record-level bounding box (four little-endian doubles)
    fn skip_bounding_box(&self, reader: &mut dyn SeekableReader) -> GeoResult<()> {
        reader.seek(SeekFrom::Current(32))?;
        Ok(())
    }
}

/// ESRI shapefile format handler
pub struct ShapefileHandler;

impl FormatHandler for ShapefileHandler {
    fn convert(&self, data: &[u8]) -> GeoResult<GeoDocument> {
        ShapefileReader::new().read(data)
    }

    fn name(&self) -> &'static str {
        "ESRI Shapefile"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["shp"]
    }
}
