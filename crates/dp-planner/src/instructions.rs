//! Turning routed segments into driving commands.
//!
//! ```text
//! first segment after start/Deliver → Proceed <compass> on <street>
//! same street as previous segment  → extend the last Proceed
//! new street                       → [Turn left|right] + Proceed
//! ```
//!
//! The turn is dropped when the heading changes by at most 1° either way,
//! so a street rename on a straight road yields only the new `Proceed`.

use dp_core::StreetSegment;
use dp_spatial::{Route, StreetMap};

use crate::command::{CompassDirection, DeliveryCommand, TurnDirection};

/// Smallest heading change, in degrees, reported as a turn.
const MIN_TURN_DEGREES: f64 = 1.0;

/// Accumulates commands for consecutive routes.
///
/// Routes pushed back to back with no [`push_deliver`](Self::push_deliver)
/// in between continue each other: a same-street join extends one `Proceed`.
#[derive(Debug, Default)]
pub struct CommandBuilder {
    commands: Vec<DeliveryCommand>,
    prev:     Option<StreetSegment>,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, seg: &StreetSegment) {
        let miles = seg.length_miles();

        match self.prev.as_ref() {
            Some(prev) if prev.name == seg.name => {
                if let Some(DeliveryCommand::Proceed { distance_miles, .. }) = self.commands.last_mut() {
                    *distance_miles += miles;
                }
            }
            Some(prev) => {
                let angle = prev.turn_angle_to(seg);
                if angle > MIN_TURN_DEGREES && angle < 360.0 - MIN_TURN_DEGREES {
                    self.commands.push(DeliveryCommand::Turn {
                        direction: TurnDirection::from_turn_angle(angle),
                        street:    seg.name.clone(),
                    });
                }
                self.push_proceed(seg, miles);
            }
            None => self.push_proceed(seg, miles),
        }

        self.prev = Some(seg.clone());
    }

    /// Push every segment of `route`, resolved against `map`.
    pub fn push_route(&mut self, map: &StreetMap, route: &Route) {
        for seg in route.streets(map) {
            self.push_segment(seg);
        }
    }

    /// Record a drop-off.  The next segment starts a fresh `Proceed`.
    pub fn push_deliver(&mut self, item: impl Into<String>) {
        self.commands.push(DeliveryCommand::Deliver { item: item.into() });
        self.prev = None;
    }

    pub fn commands(&self) -> &[DeliveryCommand] {
        &self.commands
    }

    pub fn finish(self) -> Vec<DeliveryCommand> {
        self.commands
    }

    fn push_proceed(&mut self, seg: &StreetSegment, miles: f64) {
        self.commands.push(DeliveryCommand::Proceed {
            direction:      CompassDirection::from_bearing(seg.bearing()),
            street:         seg.name.clone(),
            distance_miles: miles,
        });
    }
}
