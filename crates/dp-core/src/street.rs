//! Plain data carriers: directed street segments and delivery requests.

use crate::GeoCoord;

/// A directed piece of a named street from `start` to `end`.
///
/// Street data is two-way; the map loader stores every segment in both
/// orientations, each carrying the street name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetSegment {
    pub start: GeoCoord,
    pub end:   GeoCoord,
    pub name:  String,
}

impl StreetSegment {
    pub fn new(start: GeoCoord, end: GeoCoord, name: impl Into<String>) -> Self {
        Self { start, end, name: name.into() }
    }

    /// The same segment traversed `end → start`.
    pub fn reversed(&self) -> StreetSegment {
        StreetSegment {
            start: self.end.clone(),
            end:   self.start.clone(),
            name:  self.name.clone(),
        }
    }

    /// Great-circle length in miles.
    #[inline]
    pub fn length_miles(&self) -> f64 {
        self.start.distance_miles(&self.end)
    }

    /// Heading of this segment, see [`GeoCoord::bearing_degrees`].
    #[inline]
    pub fn bearing(&self) -> f64 {
        self.start.bearing_degrees(&self.end)
    }

    /// Counter-clockwise angle in `[0, 360)` from this segment's heading to
    /// `next`'s heading.  Values below 180° bend left.
    pub fn turn_angle_to(&self, next: &StreetSegment) -> f64 {
        let angle = next.bearing() - self.bearing();
        if angle < 0.0 { angle + 360.0 } else { angle }
    }
}

/// One item to drop off at `location`.
///
/// Neither locations nor items need to be unique within a request set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRequest {
    pub location: GeoCoord,
    pub item:     String,
}

impl DeliveryRequest {
    pub fn new(location: GeoCoord, item: impl Into<String>) -> Self {
        Self { location, item: item.into() }
    }
}
