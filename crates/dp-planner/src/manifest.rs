//! Delivery manifest loader.
//!
//! # Format
//!
//! The first non-blank line is the depot, every following line one delivery:
//!
//! ```text
//! 34.0625329 -118.4470263
//! 34.0712323 -118.4505969:Chicken tenders
//! 34.0687443 -118.4449195:B-Plate salmon
//! ```
//!
//! Lines split on `:`; anything after the first colon is the item name.
//! Coordinates keep their text verbatim, so they match street map nodes
//! written with the same digits.

use std::io::Read;
use std::path::Path;

use dp_core::{DeliveryRequest, GeoCoord};

use crate::error::ManifestError;
use crate::planner::PlanJob;

/// A depot and the deliveries to make from it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryManifest {
    pub depot:    GeoCoord,
    pub requests: Vec<DeliveryRequest>,
}

impl DeliveryManifest {
    pub fn load(path: &Path) -> Result<DeliveryManifest, ManifestError> {
        load_manifest_file(path)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<DeliveryManifest, ManifestError> {
        load_manifest_reader(reader)
    }

    pub fn into_job(self) -> PlanJob {
        PlanJob { depot: self.depot, deliveries: self.requests }
    }
}

/// Load a manifest from a file.
pub fn load_manifest_file(path: &Path) -> Result<DeliveryManifest, ManifestError> {
    let file = std::fs::File::open(path)?;
    load_manifest_reader(file)
}

/// Like [`load_manifest_file`] but accepts any `Read` source.
pub fn load_manifest_reader<R: Read>(reader: R) -> Result<DeliveryManifest, ManifestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b':')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut depot: Option<GeoCoord> = None;
    let mut requests = Vec::new();

    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        if record.iter().all(str::is_empty) {
            continue;
        }

        match depot {
            None => {
                if record.len() != 1 {
                    return Err(malformed(line, "depot line must be `lat lon` with no item"));
                }
                depot = Some(parse_coord(&record[0], line)?);
            }
            Some(_) => {
                if record.len() < 2 {
                    return Err(malformed(line, "expected `lat lon:item`"));
                }
                let location = parse_coord(&record[0], line)?;
                let item = record.iter().skip(1).collect::<Vec<_>>().join(":");
                if item.is_empty() {
                    return Err(malformed(line, "empty item name"));
                }
                requests.push(DeliveryRequest::new(location, item));
            }
        }
    }

    let depot = depot.ok_or(ManifestError::MissingDepot)?;
    tracing::info!(%depot, deliveries = requests.len(), "delivery manifest loaded");
    Ok(DeliveryManifest { depot, requests })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_coord(field: &str, line: usize) -> Result<GeoCoord, ManifestError> {
    let mut parts = field.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lon), None) => {
            GeoCoord::parse(lat, lon).map_err(|e| malformed(line, e.to_string()))
        }
        _ => Err(malformed(line, format!("expected `lat lon`, got {field:?}"))),
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> ManifestError {
    ManifestError::Malformed { line, reason: reason.into() }
}

fn csv_error(err: csv::Error) -> ManifestError {
    let line = err.position().map_or(0, |p| p.line() as usize);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => ManifestError::Io(io),
        _ => ManifestError::Malformed { line, reason },
    }
}
