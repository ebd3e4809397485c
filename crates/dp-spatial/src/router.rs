//! Point-to-point routing: the `Router` trait, A*, and reference Dijkstra.
//!
//! # Pluggability
//!
//! The planner calls routing through the [`Router`] trait.  [`AStarRouter`]
//! is the default; [`DijkstraRouter`] runs the same search with a zero
//! heuristic and exists as the exhaustive baseline A* is checked against.
//!
//! # Cost units
//!
//! Edge cost is the great-circle length of a segment in miles.  The A*
//! heuristic is the great-circle distance to the goal, which never exceeds
//! the remaining road distance (every road path is at least as long as the
//! straight line), so the first time the goal is popped its cost is optimal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use dp_core::{GeoCoord, NodeId, SegmentId, StreetSegment};

use crate::network::StreetMap;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: segments to traverse in order and their
/// total length.
///
/// Consecutive segments always connect: `segment(i).end == segment(i+1).start`.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub segments: Vec<SegmentId>,
    pub total_miles: f64,
}

impl Route {
    /// `true` if start and destination are the same coordinate.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolve the segment ids against the map they were computed on.
    pub fn streets<'m>(&self, map: &'m StreetMap) -> impl Iterator<Item = &'m StreetSegment> {
        self.segments.iter().map(move |&id| map.segment(id))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable point-to-point routing engine.
///
/// Implementations hold no per-query state and must be `Send + Sync` so one
/// router can serve concurrent planning calls over a shared map.
pub trait Router: Send + Sync {
    /// Shortest route from `start` to `end`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::BadCoordinate`] if either endpoint is not on the map
    ///   (checked before searching).
    /// - [`SpatialError::NoRoute`] if the endpoints are not connected.
    fn route(&self, map: &StreetMap, start: &GeoCoord, end: &GeoCoord) -> SpatialResult<Route>;
}

/// A* search guided by straight-line distance to the goal.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn route(&self, map: &StreetMap, start: &GeoCoord, end: &GeoCoord) -> SpatialResult<Route> {
        search(map, start, end, |node, goal| node.distance_miles(goal))
    }
}

/// Uniform-cost search (A* with `h = 0`).
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, map: &StreetMap, start: &GeoCoord, end: &GeoCoord) -> SpatialResult<Route> {
        search(map, start, end, |_, _| 0.0)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Frontier entry.  `BinaryHeap` is a max-heap, so the ordering is inverted:
/// lower `f` wins, and among equal `f` the earlier push (`seq`) wins.
struct Frontier {
    f:    f64,
    seq:  u64,
    node: NodeId,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.total_cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

fn search(
    map: &StreetMap,
    start: &GeoCoord,
    end: &GeoCoord,
    heuristic: impl Fn(&GeoCoord, &GeoCoord) -> f64,
) -> SpatialResult<Route> {
    let from = map.node_of(start).ok_or_else(|| SpatialError::BadCoordinate(start.clone()))?;
    let to = map.node_of(end).ok_or_else(|| SpatialError::BadCoordinate(end.clone()))?;

    if from == to {
        return Ok(Route::default());
    }

    let n = map.node_count();
    // g[v] = best known miles from `from` to v.
    let mut g = vec![f64::INFINITY; n];
    // prev[v] = segment that achieved g[v]; INVALID for unreached nodes.
    let mut prev = vec![SegmentId::INVALID; n];
    let mut closed = vec![false; n];

    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    let mut expanded = 0usize;

    g[from.index()] = 0.0;
    heap.push(Frontier { f: heuristic(start, end), seq, node: from });

    while let Some(Frontier { node, .. }) = heap.pop() {
        // Stale duplicate of an already finalized node.
        if closed[node.index()] {
            continue;
        }
        if node == to {
            let route = reconstruct(map, &prev, from, to);
            tracing::debug!(
                %start, %end,
                expanded,
                segments = route.segments.len(),
                miles = route.total_miles,
                "route found"
            );
            return Ok(route);
        }
        closed[node.index()] = true;
        expanded += 1;

        let g_node = g[node.index()];
        for seg in map.out_segments(node) {
            let next = map.seg_to[seg.index()];
            let tentative = g_node + map.seg_length_mi[seg.index()];
            if tentative < g[next.index()] {
                g[next.index()] = tentative;
                prev[next.index()] = seg;
                // Rounding can make the heuristic marginally inconsistent;
                // a strictly better path reopens the node.
                closed[next.index()] = false;
                seq += 1;
                heap.push(Frontier {
                    f: tentative + heuristic(map.coord(next), end),
                    seq,
                    node: next,
                });
            }
        }
    }

    tracing::debug!(%start, %end, expanded, "frontier exhausted");
    Err(SpatialError::NoRoute { from: start.clone(), to: end.clone() })
}

fn reconstruct(map: &StreetMap, prev: &[SegmentId], from: NodeId, to: NodeId) -> Route {
    let mut segments = Vec::new();
    let mut cur = to;
    while cur != from {
        let seg = prev[cur.index()];
        debug_assert!(seg != SegmentId::INVALID, "predecessor chain broken at {cur}");
        if seg == SegmentId::INVALID {
            break;
        }
        segments.push(seg);
        cur = map.seg_from[seg.index()];
    }
    segments.reverse();

    let total_miles = segments.iter().map(|s| map.seg_length_mi[s.index()]).sum();
    Route { segments, total_miles }
}
