//! Street map text loader.
//!
//! # File format
//!
//! One record per street: the street name on its own line, a line holding the
//! number of segments, then that many segment lines of four whitespace
//! separated fields `lat1 lon1 lat2 lon2`.
//!
//! ```text
//! Barrington Avenue
//! 2
//! 34.0547000 -118.4794734 34.0544590 -118.4801137
//! 34.0544590 -118.4801137 34.0541142 -118.4809707
//! Wilshire Boulevard
//! 1
//! 34.0586085 -118.4442511 34.0589813 -118.4437312
//! ```
//!
//! Blank lines between records are skipped.  A missing or non-numeric count,
//! a segment line without exactly four coordinate fields, or a file that ends
//! mid-record is rejected with the offending line number.  Coordinate text is
//! kept verbatim; see [`GeoCoord`] for why.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use dp_core::{GeoCoord, IndexConfig};

use crate::error::LoadError;
use crate::network::{StreetMap, StreetMapBuilder};
use crate::SpatialResult;

impl StreetMap {
    /// Load a street map file with the default index sizing.
    pub fn load(path: &Path) -> SpatialResult<StreetMap> {
        load_map_file(path, IndexConfig::default())
    }

    /// Like [`load`](Self::load) but reads from any buffered source.
    pub fn from_reader<R: BufRead>(reader: R) -> SpatialResult<StreetMap> {
        load_map_reader(reader, IndexConfig::default())
    }
}

/// Load a street map file, sizing the coordinate index per `config`.
///
/// # Errors
///
/// [`SpatialError::Config`](crate::SpatialError::Config) for an invalid
/// `config`, [`SpatialError::Load`](crate::SpatialError::Load) for unreadable
/// or malformed input.
pub fn load_map_file(path: &Path, config: IndexConfig) -> SpatialResult<StreetMap> {
    let file = File::open(path).map_err(LoadError::Io)?;
    load_map_reader(BufReader::new(file), config)
}

/// Like [`load_map_file`] but accepts any `BufRead` source.
///
/// Useful for tests (pass a `&[u8]` or `std::io::Cursor`) and for maps
/// embedded in a binary.
pub fn load_map_reader<R: BufRead>(reader: R, config: IndexConfig) -> SpatialResult<StreetMap> {
    config.validate()?;

    let mut builder = StreetMapBuilder::with_config(config);
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut streets = 0usize;

    while let Some((line_no, line)) = lines.next() {
        let line = line.map_err(LoadError::Io)?;
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        // ── Segment count ─────────────────────────────────────────────────
        let Some((count_no, count_line)) = lines.next() else {
            return Err(malformed(line_no + 1, format!("missing segment count for street {name:?}")));
        };
        let count_line = count_line.map_err(LoadError::Io)?;
        let count: usize = count_line.trim().parse().map_err(|_| {
            malformed(count_no, format!("invalid segment count {:?} for street {name:?}", count_line.trim()))
        })?;

        // ── Segments ──────────────────────────────────────────────────────
        let mut last_line = count_no;
        for k in 0..count {
            let Some((seg_no, seg_line)) = lines.next() else {
                return Err(malformed(
                    last_line + 1,
                    format!("street {name:?} declares {count} segments but only {k} were found"),
                ));
            };
            let seg_line = seg_line.map_err(LoadError::Io)?;
            last_line = seg_no;
            let (start, end) = parse_segment_line(&seg_line).map_err(|reason| malformed(seg_no, reason))?;
            builder.add_street_segment(start, end, name);
        }
        streets += 1;
    }

    tracing::info!(
        streets,
        coordinates = builder.node_count(),
        segments = builder.segment_count(),
        buckets = builder.index_buckets(),
        "street map loaded"
    );
    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_segment_line(line: &str) -> Result<(GeoCoord, GeoCoord), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [lat1, lon1, lat2, lon2] = fields.as_slice() else {
        return Err(format!(
            "expected 4 coordinate fields (lat1 lon1 lat2 lon2), found {}",
            fields.len()
        ));
    };
    let start = GeoCoord::parse(lat1, lon1).map_err(|e| e.to_string())?;
    let end = GeoCoord::parse(lat2, lon2).map_err(|e| e.to_string())?;
    Ok((start, end))
}

fn malformed(line: usize, reason: String) -> crate::SpatialError {
    LoadError::Malformed { line, reason }.into()
}
