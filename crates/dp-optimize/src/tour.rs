//! Crow-flight tour length, the optimizer's energy function.
//!
//! Straight-line miles stand in for road miles here: routing every candidate
//! order through the street map inside the annealing loop would cost one A*
//! search per leg per iteration.

use dp_core::{DeliveryRequest, GeoCoord};

/// Length of `depot → stops[0] → … → stops[last] → depot` in great-circle
/// miles.  Zero for an empty tour.
pub fn tour_miles(depot: &GeoCoord, stops: &[DeliveryRequest]) -> f64 {
    closed_tour(depot, stops.iter().map(|r| &r.location))
}

/// Same as [`tour_miles`] for stops visited in `order` (indices into
/// `requests`).
pub(crate) fn tour_miles_by_index(depot: &GeoCoord, requests: &[DeliveryRequest], order: &[usize]) -> f64 {
    closed_tour(depot, order.iter().map(|&i| &requests[i].location))
}

fn closed_tour<'a>(depot: &'a GeoCoord, stops: impl Iterator<Item = &'a GeoCoord>) -> f64 {
    let mut total = 0.0;
    let mut prev = depot;
    for stop in stops {
        total += prev.distance_miles(stop);
        prev = stop;
    }
    total + prev.distance_miles(depot)
}
