//! Street map representation and builder.
//!
//! # Data layout
//!
//! While loading, [`StreetMapBuilder`] interns every distinct coordinate
//! through an [`ExpandableHashMap`] (coordinate → `NodeId`), so the index
//! grows with the file instead of being sized up front.  [`build`] then
//! freezes the directed segments into **Compressed Sparse Row** form: the
//! segments leaving node `n` occupy
//!
//! ```text
//! segments[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! so "which segments start at this coordinate" is one hash lookup followed
//! by a contiguous slice.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest known
//! coordinate.  It is only consulted by [`StreetMap::nearest_coord`]; graph
//! identity never goes through it.
//!
//! [`build`]: StreetMapBuilder::build

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use dp_core::{GeoCoord, IndexConfig, NodeId, SegmentId, StreetSegment};

use crate::hashmap::ExpandableHashMap;

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Fine for picking the
    /// closest intersection within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── StreetMap ─────────────────────────────────────────────────────────────────

/// Read-only directed street graph keyed by exact coordinate text.
///
/// Immutable once built, so a single map can be shared by any number of
/// concurrent planning calls.  Do not construct directly; use
/// [`StreetMapBuilder`] or the loader.
pub struct StreetMap {
    index: ExpandableHashMap<GeoCoord, NodeId>,

    /// Coordinate of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoCoord>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Owned directed segments, sorted by source node.  Indexed by `SegmentId`.
    pub segments: Vec<StreetSegment>,

    /// Source node of each segment (for predecessor walks).
    pub seg_from: Vec<NodeId>,

    /// Destination node of each segment.
    pub seg_to: Vec<NodeId>,

    /// Great-circle length of each segment in miles.  Router edge cost.
    pub seg_length_mi: Vec<f64>,

    spatial_idx: RTree<NodeEntry>,
}

impl StreetMap {
    /// A map with no streets.  Every routing request against it fails with
    /// `BadCoordinate`.
    pub fn empty() -> Self {
        StreetMapBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Bucket count of the coordinate index after loading.
    pub fn index_buckets(&self) -> usize {
        self.index.bucket_count()
    }

    // ── Coordinate queries ────────────────────────────────────────────────

    #[inline]
    pub fn node_of(&self, coord: &GeoCoord) -> Option<NodeId> {
        self.index.find(coord).copied()
    }

    /// `true` if `coord` appeared in the loaded data, even as a dead end.
    #[inline]
    pub fn contains(&self, coord: &GeoCoord) -> bool {
        self.index.contains_key(coord)
    }

    #[inline]
    pub fn coord(&self, node: NodeId) -> &GeoCoord {
        &self.node_pos[node.index()]
    }

    /// Segments whose `start` is `coord`.  Empty for unknown coordinates;
    /// pair with [`contains`](Self::contains) to tell the two cases apart.
    pub fn segments_from(&self, coord: &GeoCoord) -> &[StreetSegment] {
        match self.node_of(coord) {
            Some(n) => &self.segments[self.out_range(n)],
            None => &[],
        }
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    #[inline]
    fn out_range(&self, node: NodeId) -> std::ops::Range<usize> {
        self.node_out_start[node.index()] as usize..self.node_out_start[node.index() + 1] as usize
    }

    /// `SegmentId`s leaving `node`.  A contiguous index range.
    #[inline]
    pub fn out_segments(&self, node: NodeId) -> impl Iterator<Item = SegmentId> + '_ {
        self.out_range(node).map(|i| SegmentId::from_index(i))
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &StreetSegment {
        &self.segments[id.index()]
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The known coordinate nearest to `(lat, lon)`, or `None` for an empty
    /// map.  Use it to snap free-form input onto the map before planning.
    pub fn nearest_coord(&self, lat: f64, lon: f64) -> Option<&GeoCoord> {
        self.spatial_idx
            .nearest_neighbor(&[lat, lon])
            .map(|e| self.coord(e.id))
    }
}

impl std::fmt::Debug for StreetMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreetMap")
            .field("nodes", &self.node_count())
            .field("segments", &self.segment_count())
            .field("index_buckets", &self.index_buckets())
            .finish()
    }
}

// ── StreetMapBuilder ──────────────────────────────────────────────────────────

/// Construct a [`StreetMap`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use dp_core::GeoCoord;
/// use dp_spatial::StreetMapBuilder;
///
/// let mut b = StreetMapBuilder::new();
/// let a = GeoCoord::parse("34.0547000", "-118.4794734").unwrap();
/// let c = GeoCoord::parse("34.0544590", "-118.4801137").unwrap();
/// b.add_street_segment(a.clone(), c, "Barrington Ave");
/// let map = b.build();
/// assert_eq!(map.node_count(), 2);
/// assert_eq!(map.segment_count(), 2); // both orientations
/// assert_eq!(map.segments_from(&a).len(), 1);
/// ```
pub struct StreetMapBuilder {
    index:        ExpandableHashMap<GeoCoord, NodeId>,
    nodes:        Vec<GeoCoord>,
    raw_segments: Vec<RawSegment>,
}

struct RawSegment {
    from:    NodeId,
    to:      NodeId,
    segment: StreetSegment,
}

impl StreetMapBuilder {
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Builder whose coordinate index follows `config`'s sizing policy.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            index:        ExpandableHashMap::with_config(config),
            nodes:        Vec::new(),
            raw_segments: Vec::new(),
        }
    }

    /// Intern `coord`, returning its existing `NodeId` if already seen.
    pub fn add_node(&mut self, coord: GeoCoord) -> NodeId {
        if let Some(&id) = self.index.find(&coord) {
            return id;
        }
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(coord.clone());
        self.index.associate(coord, id);
        id
    }

    /// Add one **directed** segment.
    pub fn add_directed_segment(&mut self, segment: StreetSegment) {
        let from = self.add_node(segment.start.clone());
        let to = self.add_node(segment.end.clone());
        self.raw_segments.push(RawSegment { from, to, segment });
    }

    /// Add a two-way piece of street: `start → end` and `end → start`, both
    /// named `name`.
    pub fn add_street_segment(&mut self, start: GeoCoord, end: GeoCoord, name: impl Into<String>) {
        let forward = StreetSegment::new(start, end, name);
        let reverse = forward.reversed();
        self.add_directed_segment(forward);
        self.add_directed_segment(reverse);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn segment_count(&self) -> usize { self.raw_segments.len() }
    pub fn index_buckets(&self) -> usize { self.index.bucket_count() }

    /// Consume the builder and produce a [`StreetMap`].
    ///
    /// Segments keep their insertion order within each source node.
    pub fn build(self) -> StreetMap {
        let node_count = self.nodes.len();

        let mut raw = self.raw_segments;
        raw.sort_by_key(|s| s.from.0);

        let seg_from: Vec<NodeId> = raw.iter().map(|s| s.from).collect();
        let seg_to:   Vec<NodeId> = raw.iter().map(|s| s.to).collect();
        let seg_length_mi: Vec<f64> = raw.iter().map(|s| s.segment.length_miles()).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for s in &raw {
            node_out_start[s.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let segments: Vec<StreetSegment> = raw.into_iter().map(|s| s.segment).collect();

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, c)| NodeEntry { point: [c.lat, c.lon], id: NodeId::from_index(i) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        StreetMap {
            index: self.index,
            node_pos: self.nodes,
            node_out_start,
            segments,
            seg_from,
            seg_to,
            seg_length_mi,
            spatial_idx,
        }
    }
}

impl Default for StreetMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
