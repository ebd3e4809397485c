//! Unit tests for dp-spatial.
//!
//! All tests use hand-crafted or seeded synthetic maps; no map files on disk
//! except the one written by `loader::from_file`.

#[cfg(test)]
mod helpers {
    use dp_core::GeoCoord;

    use crate::{StreetMap, StreetMapBuilder};

    pub fn c(lat: f64, lon: f64) -> GeoCoord {
        GeoCoord::from_degrees(lat, lon)
    }

    /// Small street grid.
    ///
    /// Coordinates (lat, lon):
    ///   0:(0,0)  1:(0,0.01)  2:(0,0.02)
    ///   3:(0.02,0)           4:(0.01,0.02)
    ///
    /// Two-way streets: 0-1-2-4 "Main St", 0-3 "Oak Ave", 3-4 "Elm St".
    ///
    /// 0→4 via Main is ~0.03° long; via Oak/Elm ~0.042°, so Main always wins.
    pub fn grid_map() -> (StreetMap, [GeoCoord; 5]) {
        let n = [c(0.0, 0.0), c(0.0, 0.01), c(0.0, 0.02), c(0.02, 0.0), c(0.01, 0.02)];
        let mut b = StreetMapBuilder::new();
        b.add_street_segment(n[0].clone(), n[1].clone(), "Main St");
        b.add_street_segment(n[1].clone(), n[2].clone(), "Main St");
        b.add_street_segment(n[2].clone(), n[4].clone(), "Main St");
        b.add_street_segment(n[0].clone(), n[3].clone(), "Oak Ave");
        b.add_street_segment(n[3].clone(), n[4].clone(), "Elm St");
        (b.build(), n)
    }
}

// ── Expandable hash map ───────────────────────────────────────────────────────

#[cfg(test)]
mod hashmap {
    use dp_core::{GeoCoord, IndexConfig};

    use crate::ExpandableHashMap;

    #[test]
    fn starts_small_and_empty() {
        let m: ExpandableHashMap<u32, u32> = ExpandableHashMap::new();
        assert!(m.is_empty());
        assert_eq!(m.bucket_count(), 8);
        assert_eq!(m.find(&1), None);
    }

    #[test]
    fn grows_past_load_factor_and_keeps_everything() {
        let mut m = ExpandableHashMap::new();
        for i in 0..1_000u32 {
            m.associate(i, i * 3);
            assert!(m.load_factor() <= 0.5, "load factor {} after {} inserts", m.load_factor(), i + 1);
        }
        assert_eq!(m.len(), 1_000);
        assert!(m.bucket_count() >= 2_000);
        assert!(m.bucket_count().is_power_of_two());
        for i in 0..1_000u32 {
            assert_eq!(m.find(&i), Some(&(i * 3)));
        }
        assert_eq!(m.find(&1_000), None);
    }

    #[test]
    fn doubles_exactly_when_threshold_crossed() {
        let mut m = ExpandableHashMap::new();
        for i in 0..4u32 {
            m.associate(i, ());
        }
        assert_eq!(m.bucket_count(), 8); // 4 / 8 = 0.5, not above
        m.associate(4, ());
        assert_eq!(m.bucket_count(), 16);
    }

    #[test]
    fn associate_overwrites_without_growing() {
        let mut m = ExpandableHashMap::new();
        assert_eq!(m.associate("a", 1), None);
        assert_eq!(m.associate("a", 2), Some(1));
        assert_eq!(m.len(), 1);
        assert_eq!(m.find(&"a"), Some(&2));
    }

    #[test]
    fn custom_load_factor() {
        let mut m = ExpandableHashMap::with_config(IndexConfig { max_load_factor: 2.0, ..Default::default() });
        for i in 0..16u32 {
            m.associate(i, i);
        }
        assert_eq!(m.bucket_count(), 8); // 16 / 8 = 2.0, not above
        m.associate(16, 16);
        assert_eq!(m.bucket_count(), 16);
    }

    #[test]
    fn tiny_load_factor_is_clamped() {
        let mut m = ExpandableHashMap::with_config(IndexConfig { initial_buckets: 1, max_load_factor: 1e-12 });
        m.associate(0u32, ());
        // 1 entry at load factor 0.1 needs 16 buckets, not 2^40.
        assert_eq!(m.bucket_count(), 16);
        assert!(m.load_factor() <= IndexConfig::MIN_LOAD_FACTOR);
    }

    #[test]
    fn oversized_initial_buckets_are_capped() {
        let m: ExpandableHashMap<u32, ()> =
            ExpandableHashMap::with_config(IndexConfig { initial_buckets: usize::MAX, ..Default::default() });
        assert_eq!(m.bucket_count(), IndexConfig::MAX_INITIAL_BUCKETS);
        assert!(m.is_empty());
    }

    #[test]
    fn coordinate_keys_match_on_text() {
        let mut m = ExpandableHashMap::new();
        m.associate(GeoCoord::parse("34.05", "-118.4").unwrap(), 1);
        m.associate(GeoCoord::parse("34.050", "-118.4").unwrap(), 2);
        assert_eq!(m.len(), 2);
        assert_eq!(m.find(&GeoCoord::parse("34.05", "-118.4").unwrap()), Some(&1));
    }
}

// ── Builder & street map structure ────────────────────────────────────────────

#[cfg(test)]
mod network {
    use super::helpers::{c, grid_map};
    use crate::{StreetMap, StreetMapBuilder};
    use dp_core::{IndexConfig, StreetSegment};

    #[test]
    fn empty_build() {
        let map = StreetMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.segment_count(), 0);
        assert!(!map.contains(&c(0.0, 0.0)));
        assert!(map.nearest_coord(0.0, 0.0).is_none());
    }

    #[test]
    fn street_segments_are_stored_both_ways() {
        let (map, n) = grid_map();
        assert_eq!(map.node_count(), 5);
        assert_eq!(map.segment_count(), 10);

        let from_1 = map.segments_from(&n[1]);
        assert_eq!(from_1.len(), 2);
        assert!(from_1.iter().all(|s| s.start == n[1] && s.name == "Main St"));
        let ends: Vec<_> = from_1.iter().map(|s| s.end.clone()).collect();
        assert!(ends.contains(&n[0]) && ends.contains(&n[2]));

        // Reverse orientation of 3-4 exists and keeps its name.
        let back = map.segments_from(&n[4]).iter().find(|s| s.end == n[3]).unwrap();
        assert_eq!(back.name, "Elm St");
    }

    #[test]
    fn unknown_coordinate_vs_dead_end() {
        let mut b = StreetMapBuilder::new();
        let a = c(1.0, 1.0);
        let dead_end = c(1.0, 1.001);
        b.add_directed_segment(StreetSegment::new(a.clone(), dead_end.clone(), "Cul-de-sac"));
        let map = b.build();

        assert!(map.contains(&dead_end));
        assert!(map.segments_from(&dead_end).is_empty());

        let never_seen = c(9.0, 9.0);
        assert!(!map.contains(&never_seen));
        assert!(map.segments_from(&never_seen).is_empty());
    }

    #[test]
    fn csr_out_segments_start_at_node() {
        let (map, n) = grid_map();
        for (i, coord) in n.iter().enumerate() {
            let node = map.node_of(coord).unwrap();
            assert_eq!(map.coord(node), coord, "node {i}");
            for s in map.out_segments(node) {
                assert_eq!(map.seg_from[s.index()], node);
                assert_eq!(&map.segment(s).start, coord);
                assert_eq!(map.node_of(&map.segment(s).end), Some(map.seg_to[s.index()]));
            }
        }
        assert_eq!(map.out_segments(map.node_of(&n[0]).unwrap()).count(), 2);
    }

    #[test]
    fn duplicate_segments_are_kept() {
        let mut b = StreetMapBuilder::new();
        b.add_street_segment(c(0.0, 0.0), c(0.0, 0.01), "Main St");
        b.add_street_segment(c(0.0, 0.0), c(0.0, 0.01), "Main St");
        let map = b.build();
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.segments_from(&c(0.0, 0.0)).len(), 2);
    }

    #[test]
    fn index_grows_while_building() {
        let mut b = StreetMapBuilder::with_config(IndexConfig { initial_buckets: 1, max_load_factor: 0.5 });
        for i in 0..50 {
            b.add_street_segment(c(0.0, i as f64 * 0.001), c(0.0, (i + 1) as f64 * 0.001), "Long Rd");
        }
        assert_eq!(b.node_count(), 51);
        assert!(b.index_buckets() >= 102);
        let map = b.build();
        for i in 0..=50 {
            assert!(map.contains(&c(0.0, i as f64 * 0.001)));
        }
    }

    #[test]
    fn nearest_coord_snaps() {
        let (map, n) = grid_map();
        assert_eq!(map.nearest_coord(0.0001, 0.0099), Some(&n[1]));
        assert_eq!(map.nearest_coord(0.019, -0.001), Some(&n[3]));
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Write;
    use std::path::Path;

    use dp_core::{GeoCoord, IndexConfig};

    use crate::{LoadError, SpatialError, StreetMap, load_map_file, load_map_reader};

    const SAMPLE: &str = "\
Barrington Avenue
2
34.0547000 -118.4794734 34.0544590 -118.4801137
34.0544590 -118.4801137 34.0541142 -118.4809707

Sunset Boulevard
1
34.0544590 -118.4801137 34.0550000 -118.4801137
";

    fn coord(lat: &str, lon: &str) -> GeoCoord {
        GeoCoord::parse(lat, lon).unwrap()
    }

    fn malformed_line(err: SpatialError) -> usize {
        match err {
            SpatialError::Load(LoadError::Malformed { line, .. }) => line,
            other => panic!("expected malformed-input error, got {other:?}"),
        }
    }

    #[test]
    fn loads_sample() {
        let map = StreetMap::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(map.node_count(), 4);
        assert_eq!(map.segment_count(), 6);

        let hub = coord("34.0544590", "-118.4801137");
        let names: Vec<&str> = map.segments_from(&hub).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names.iter().filter(|n| **n == "Barrington Avenue").count(), 2);
        assert!(names.contains(&"Sunset Boulevard"));
    }

    #[test]
    fn coordinate_text_is_kept_verbatim() {
        let map = StreetMap::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(map.contains(&coord("34.0547000", "-118.4794734")));
        assert!(!map.contains(&coord("34.0547", "-118.4794734")));
    }

    #[test]
    fn zero_segment_street_is_allowed() {
        let map = StreetMap::from_reader("Ghost Lane\n0\n".as_bytes()).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn rejects_bad_count() {
        let err = StreetMap::from_reader("Main St\ntwo\n".as_bytes()).unwrap_err();
        assert_eq!(malformed_line(err), 2);
    }

    #[test]
    fn rejects_missing_count() {
        let err = StreetMap::from_reader("Main St\n".as_bytes()).unwrap_err();
        assert_eq!(malformed_line(err), 2);
    }

    #[test]
    fn rejects_short_segment_line() {
        let text = "Main St\n1\n34.0 -118.0 34.1\n";
        let err = StreetMap::from_reader(text.as_bytes()).unwrap_err();
        assert_eq!(malformed_line(err), 3);
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let text = "Main St\n2\n34.0 -118.0 34.1 -118.0\n34.1 -118.0 north -118.1\n";
        let err = StreetMap::from_reader(text.as_bytes()).unwrap_err();
        assert_eq!(malformed_line(err), 4);
    }

    #[test]
    fn rejects_truncated_record() {
        let text = "Main St\n3\n34.0 -118.0 34.1 -118.0\n";
        let err = StreetMap::from_reader(text.as_bytes()).unwrap_err();
        assert_eq!(malformed_line(err), 4);
    }

    #[test]
    fn rejects_invalid_index_config() {
        let cfg = IndexConfig { max_load_factor: -1.0, ..Default::default() };
        let err = load_map_reader(SAMPLE.as_bytes(), cfg).err().unwrap();
        assert!(matches!(err, SpatialError::Config(_)));
        let cfg = IndexConfig { max_load_factor: 1e-12, ..Default::default() };
        let err = load_map_reader(SAMPLE.as_bytes(), cfg).err().unwrap();
        assert!(matches!(err, SpatialError::Config(_)));
        let cfg = IndexConfig { initial_buckets: usize::MAX, ..Default::default() };
        let err = load_map_reader(SAMPLE.as_bytes(), cfg).err().unwrap();
        assert!(matches!(err, SpatialError::Config(_)));
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let map = load_map_file(file.path(), IndexConfig::default()).unwrap();
        assert_eq!(map.segment_count(), 6);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = StreetMap::load(Path::new("/definitely/not/here/mapdata.txt")).err().unwrap();
        assert!(matches!(err, SpatialError::Load(LoadError::Io(_))));
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use dp_core::GeoCoord;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{c, grid_map};
    use crate::{AStarRouter, DijkstraRouter, Route, Router, SpatialError, StreetMap, StreetMapBuilder};

    fn assert_connected(map: &StreetMap, route: &Route, start: &GeoCoord, end: &GeoCoord) {
        let segs: Vec<_> = route.streets(map).collect();
        if segs.is_empty() {
            assert_eq!(start, end);
            return;
        }
        assert_eq!(&segs[0].start, start);
        assert_eq!(&segs[segs.len() - 1].end, end);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let sum: f64 = segs.iter().map(|s| s.length_miles()).sum();
        assert!((sum - route.total_miles).abs() < 1e-9);
    }

    #[test]
    fn trivial_same_coordinate() {
        let (map, n) = grid_map();
        let r = AStarRouter.route(&map, &n[2], &n[2]).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.total_miles, 0.0);
    }

    #[test]
    fn shortest_path_correct() {
        let (map, n) = grid_map();
        let route = AStarRouter.route(&map, &n[0], &n[4]).unwrap();
        assert_eq!(route.segments.len(), 3);
        assert!(route.streets(&map).all(|s| s.name == "Main St"));
        assert_connected(&map, &route, &n[0], &n[4]);

        let expected = n[0].distance_miles(&n[1]) + n[1].distance_miles(&n[2]) + n[2].distance_miles(&n[4]);
        assert!((route.total_miles - expected).abs() < 1e-9);
    }

    #[test]
    fn reverse_direction_uses_reverse_segments() {
        let (map, n) = grid_map();
        let route = AStarRouter.route(&map, &n[4], &n[0]).unwrap();
        assert_connected(&map, &route, &n[4], &n[0]);
        assert_eq!(route.segments.len(), 3);
    }

    #[test]
    fn unknown_coordinate_is_bad_coordinate() {
        let (map, n) = grid_map();
        let nowhere = c(5.0, 5.0);
        let err = AStarRouter.route(&map, &nowhere, &n[0]).unwrap_err();
        assert!(matches!(err, SpatialError::BadCoordinate(ref g) if *g == nowhere));
        let err = AStarRouter.route(&map, &n[0], &nowhere).unwrap_err();
        assert!(matches!(err, SpatialError::BadCoordinate(_)));
        // Same text, different literal: still unknown.
        let near_miss = GeoCoord::parse("0.0", "0.010").unwrap();
        assert!(matches!(
            AStarRouter.route(&map, &near_miss, &n[0]),
            Err(SpatialError::BadCoordinate(_))
        ));
    }

    #[test]
    fn unknown_start_equal_to_end_is_still_bad() {
        let map = StreetMap::empty();
        let p = c(1.0, 1.0);
        assert!(matches!(AStarRouter.route(&map, &p, &p), Err(SpatialError::BadCoordinate(_))));
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = StreetMapBuilder::new();
        b.add_street_segment(c(0.0, 0.0), c(0.0, 0.01), "West Rd");
        b.add_street_segment(c(1.0, 0.0), c(1.0, 0.01), "East Rd");
        let map = b.build();
        let err = AStarRouter.route(&map, &c(0.0, 0.0), &c(1.0, 0.01)).unwrap_err();
        assert!(matches!(err, SpatialError::NoRoute { .. }));
        assert!(matches!(
            DijkstraRouter.route(&map, &c(0.0, 0.0), &c(1.0, 0.01)),
            Err(SpatialError::NoRoute { .. })
        ));
    }

    #[test]
    fn prefers_longer_hop_count_when_shorter_in_miles() {
        // Direct A–D dog-leg is long; A–B–C–D follows a straight line.
        let (a, b_, cc, d) = (c(0.0, 0.0), c(0.0, 0.01), c(0.0, 0.02), c(0.0, 0.03));
        let far = c(0.05, 0.015);
        let mut b = StreetMapBuilder::new();
        b.add_street_segment(a.clone(), far.clone(), "Detour");
        b.add_street_segment(far, d.clone(), "Detour");
        b.add_street_segment(a.clone(), b_.clone(), "Straight");
        b.add_street_segment(b_, cc.clone(), "Straight");
        b.add_street_segment(cc, d.clone(), "Straight");
        let map = b.build();

        let route = AStarRouter.route(&map, &a, &d).unwrap();
        assert_eq!(route.segments.len(), 3);
        assert!((route.total_miles - a.distance_miles(&d)).abs() < 1e-6);
    }

    /// Random planar-ish graph; returns the coordinates and the map.
    fn random_map(seed: u64, nodes: usize, edges: usize) -> (Vec<GeoCoord>, StreetMap) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let coords: Vec<GeoCoord> = (0..nodes)
            .map(|_| c(34.0 + rng.gen_range(0.0..0.05), -118.5 + rng.gen_range(0.0..0.05)))
            .collect();
        let mut b = StreetMapBuilder::new();
        for e in 0..edges {
            let i = rng.gen_range(0..nodes);
            let j = rng.gen_range(0..nodes);
            b.add_street_segment(coords[i].clone(), coords[j].clone(), format!("Street {e}"));
        }
        (coords, b.build())
    }

    /// Floyd–Warshall all-pairs miles, independent of the router code.
    fn all_pairs(map: &StreetMap) -> Vec<Vec<f64>> {
        let n = map.node_count();
        let mut d = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for s in 0..map.segment_count() {
            let (u, v) = (map.seg_from[s].index(), map.seg_to[s].index());
            d[u][v] = d[u][v].min(map.seg_length_mi[s]);
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let via = d[i][k] + d[k][j];
                    if via < d[i][j] {
                        d[i][j] = via;
                    }
                }
            }
        }
        d
    }

    #[test]
    fn astar_matches_exhaustive_search() {
        for seed in 0..5 {
            let (_, map) = random_map(seed, 14, 18);
            let reference = all_pairs(&map);
            for i in 0..map.node_count() {
                for j in 0..map.node_count() {
                    let (a, b) = (map.node_pos[i].clone(), map.node_pos[j].clone());
                    match AStarRouter.route(&map, &a, &b) {
                        Ok(route) => {
                            assert!(
                                (route.total_miles - reference[i][j]).abs() < 1e-9,
                                "seed {seed} {i}->{j}: astar {} vs exhaustive {}",
                                route.total_miles,
                                reference[i][j]
                            );
                            assert_connected(&map, &route, &a, &b);
                        }
                        Err(SpatialError::NoRoute { .. }) => {
                            assert!(reference[i][j].is_infinite(), "seed {seed} {i}->{j} is reachable");
                        }
                        Err(e) => panic!("unexpected error {e}"),
                    }
                }
            }
        }
    }

    #[test]
    fn astar_matches_dijkstra_on_larger_graphs() {
        for seed in 10..13 {
            let (coords, map) = random_map(seed, 120, 260);
            for k in 0..40 {
                let a = &coords[(k * 7) % coords.len()];
                let b = &coords[(k * 13 + 5) % coords.len()];
                // Nodes that never got a segment are not on the map.
                if !map.contains(a) || !map.contains(b) {
                    continue;
                }
                let astar = AStarRouter.route(&map, a, b);
                let dijkstra = DijkstraRouter.route(&map, a, b);
                match (astar, dijkstra) {
                    (Ok(x), Ok(y)) => assert!((x.total_miles - y.total_miles).abs() < 1e-9),
                    (Err(SpatialError::NoRoute { .. }), Err(SpatialError::NoRoute { .. })) => {}
                    (x, y) => panic!("routers disagree: {x:?} vs {y:?}"),
                }
            }
        }
    }

    #[test]
    fn heuristic_never_exceeds_true_distance() {
        let (_, map) = random_map(99, 14, 20);
        let reference = all_pairs(&map);
        for i in 0..map.node_count() {
            for j in 0..map.node_count() {
                if reference[i][j].is_finite() {
                    let h = map.node_pos[i].distance_miles(&map.node_pos[j]);
                    assert!(h <= reference[i][j] + 1e-9);
                }
            }
        }
    }
}
