//! Geographic coordinate type and distance/bearing utilities.
//!
//! # Identity
//!
//! A `GeoCoord` keeps the latitude/longitude **text exactly as loaded** and
//! compares and hashes on that text alone.  `"34.0625"` and `"34.06250"` are
//! different coordinates even though they parse to the same `f64`.  Street
//! data joins segments by repeating the same literal at both ends, so textual
//! identity is what makes two segments meet at a node; tolerance-based
//! matching would silently merge or split intersections.
//!
//! The parsed `f64` values exist only for distance and bearing math.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{CoreError, CoreResult};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Statute mile in kilometres.
pub const KM_PER_MILE: f64 = 1.609_344;

/// A latitude/longitude pair identified by its decimal text.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(String, String)", into = "(String, String)")
)]
pub struct GeoCoord {
    lat_text: Box<str>,
    lon_text: Box<str>,
    /// Latitude in degrees, parsed from the text.
    pub lat: f64,
    /// Longitude in degrees, parsed from the text.
    pub lon: f64,
}

impl GeoCoord {
    /// Parse a coordinate from its latitude and longitude text.
    ///
    /// Surrounding whitespace is trimmed; the trimmed text becomes the
    /// coordinate's identity.
    pub fn parse(lat: &str, lon: &str) -> CoreResult<GeoCoord> {
        let (lat_s, lon_s) = (lat.trim(), lon.trim());
        let bad = |reason| CoreError::InvalidCoordinate {
            lat: lat_s.to_owned(),
            lon: lon_s.to_owned(),
            reason,
        };

        let lat_v: f64 = lat_s.parse().map_err(|_| bad("latitude is not a number"))?;
        let lon_v: f64 = lon_s.parse().map_err(|_| bad("longitude is not a number"))?;
        if !lat_v.is_finite() || !lon_v.is_finite() {
            return Err(bad("non-finite value"));
        }

        Ok(GeoCoord {
            lat_text: lat_s.into(),
            lon_text: lon_s.into(),
            lat: lat_v,
            lon: lon_v,
        })
    }

    /// Build a coordinate from numeric degrees.  The text identity is the
    /// shortest round-tripping decimal form (`{}` formatting).
    pub fn from_degrees(lat: f64, lon: f64) -> GeoCoord {
        GeoCoord {
            lat_text: lat.to_string().into(),
            lon_text: lon.to_string().into(),
            lat,
            lon,
        }
    }

    #[inline]
    pub fn latitude_text(&self) -> &str {
        &self.lat_text
    }

    #[inline]
    pub fn longitude_text(&self) -> &str {
        &self.lon_text
    }

    /// Haversine great-circle distance in statute miles.
    pub fn distance_miles(&self, other: &GeoCoord) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c / KM_PER_MILE
    }

    /// Planar bearing of the line `self → other` in degrees, `[0, 360)`.
    ///
    /// 0° is due East and angles grow counter-clockwise (90° = North), i.e.
    /// `atan2(Δlat, Δlon)`.  Good enough for labelling headings at street
    /// scale; not a navigational azimuth.
    pub fn bearing_degrees(&self, other: &GeoCoord) -> f64 {
        let angle = (other.lat - self.lat).atan2(other.lon - self.lon).to_degrees();
        if angle < 0.0 { angle + 360.0 } else { angle }
    }
}

impl PartialEq for GeoCoord {
    fn eq(&self, other: &Self) -> bool {
        self.lat_text == other.lat_text && self.lon_text == other.lon_text
    }
}

impl Eq for GeoCoord {}

impl Hash for GeoCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat_text.hash(state);
        self.lon_text.hash(state);
    }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat_text, self.lon_text)
    }
}

impl TryFrom<(String, String)> for GeoCoord {
    type Error = CoreError;

    fn try_from((lat, lon): (String, String)) -> CoreResult<GeoCoord> {
        GeoCoord::parse(&lat, &lon)
    }
}

impl From<GeoCoord> for (String, String) {
    fn from(c: GeoCoord) -> (String, String) {
        (c.lat_text.into(), c.lon_text.into())
    }
}
