//! Driving commands handed to the courier.

use std::fmt;

/// One of eight compass headings, each covering a 45° sector.
///
/// Bearings follow [`GeoCoord::bearing_degrees`](dp_core::GeoCoord::bearing_degrees):
/// 0° is east and angles grow counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum CompassDirection {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl CompassDirection {
    const SECTORS: [CompassDirection; 8] = [
        CompassDirection::East,
        CompassDirection::Northeast,
        CompassDirection::North,
        CompassDirection::Northwest,
        CompassDirection::West,
        CompassDirection::Southwest,
        CompassDirection::South,
        CompassDirection::Southeast,
    ];

    /// Sector containing `bearing` (degrees, any range; normalised first).
    ///
    /// Sector boundaries sit at 22.5° + k·45°; a boundary value belongs to
    /// the sector counter-clockwise of it, so 22.5° is northeast and both
    /// 0° and 337.5° are east.
    pub fn from_bearing(bearing: f64) -> CompassDirection {
        let b = bearing.rem_euclid(360.0);
        let sector = ((b + 22.5) / 45.0).floor() as usize % 8;
        Self::SECTORS[sector]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompassDirection::East      => "east",
            CompassDirection::Northeast => "northeast",
            CompassDirection::North     => "north",
            CompassDirection::Northwest => "northwest",
            CompassDirection::West      => "west",
            CompassDirection::Southwest => "southwest",
            CompassDirection::South     => "south",
            CompassDirection::Southeast => "southeast",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Direction of a counter-clockwise turn angle in `[0, 360)`.
    pub fn from_turn_angle(angle: f64) -> TurnDirection {
        if angle < 180.0 { TurnDirection::Left } else { TurnDirection::Right }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TurnDirection::Left  => "left",
            TurnDirection::Right => "right",
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single instruction in a delivery plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(tag = "kind", rename_all = "lowercase"))]
pub enum DeliveryCommand {
    /// Keep driving along `street`.
    Proceed {
        direction:      CompassDirection,
        street:         String,
        distance_miles: f64,
    },
    /// Turn onto `street`.  Always followed by a `Proceed` on that street.
    Turn {
        direction: TurnDirection,
        street:    String,
    },
    /// Drop off `item` at the current location.
    Deliver {
        item: String,
    },
}

impl DeliveryCommand {
    /// Miles covered by this command; zero for turns and deliveries.
    pub fn distance_miles(&self) -> f64 {
        match self {
            DeliveryCommand::Proceed { distance_miles, .. } => *distance_miles,
            _ => 0.0,
        }
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, DeliveryCommand::Proceed { .. })
    }

    pub fn is_deliver(&self) -> bool {
        matches!(self, DeliveryCommand::Deliver { .. })
    }
}

impl fmt::Display for DeliveryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryCommand::Proceed { direction, street, distance_miles } => {
                write!(f, "Proceed {direction} on {street} for {distance_miles:.2} miles")
            }
            DeliveryCommand::Turn { direction, street } => write!(f, "Turn {direction} on {street}"),
            DeliveryCommand::Deliver { item } => write!(f, "Deliver {item}"),
        }
    }
}
