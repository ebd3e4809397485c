//! Unit tests for dp-optimize.

#[cfg(test)]
mod helpers {
    use dp_core::{DeliveryRequest, GeoCoord};

    pub fn c(lat: f64, lon: f64) -> GeoCoord {
        GeoCoord::from_degrees(lat, lon)
    }

    pub fn req(lat: f64, lon: f64, item: &str) -> DeliveryRequest {
        DeliveryRequest::new(c(lat, lon), item)
    }

    /// Five stops on the meridian north of the depot, listed out of order so
    /// the identity tour zig-zags.
    pub fn line_of_five() -> (GeoCoord, Vec<DeliveryRequest>) {
        let depot = c(0.0, 0.0);
        let stops = vec![
            req(0.03, 0.0, "C"),
            req(0.05, 0.0, "E"),
            req(0.01, 0.0, "A"),
            req(0.04, 0.0, "D"),
            req(0.02, 0.0, "B"),
        ];
        (depot, stops)
    }

    pub fn sorted_items(requests: &[DeliveryRequest]) -> Vec<String> {
        let mut items: Vec<String> = requests.iter().map(|r| r.item.clone()).collect();
        items.sort();
        items
    }
}

// ── Tour energy ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tour {
    use super::helpers::*;
    use crate::tour_miles;

    #[test]
    fn empty_tour_is_zero() {
        assert_eq!(tour_miles(&c(1.0, 1.0), &[]), 0.0);
    }

    #[test]
    fn single_stop_is_out_and_back() {
        let depot = c(0.0, 0.0);
        let stop = req(0.01, 0.0, "Tea");
        let leg = depot.distance_miles(&stop.location);
        assert!((tour_miles(&depot, &[stop]) - 2.0 * leg).abs() < 1e-12);
    }

    #[test]
    fn zig_zag_is_longer_than_sweep() {
        let (depot, stops) = line_of_five();
        let mut sweep = stops.clone();
        sweep.sort_by(|a, b| a.location.lat.total_cmp(&b.location.lat));
        assert!(tour_miles(&depot, &stops) > tour_miles(&depot, &sweep) + 0.1);
    }
}

// ── Annealing ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod annealing {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use dp_core::{AnnealingConfig, CoreError};

    use super::helpers::*;
    use crate::{AnnealingObserver, AnnealingStats, DeliveryOptimizer, OptimizeError, tour_miles};

    #[derive(Default)]
    struct Counting {
        steps:     u32,
        last_best: f64,
        finished:  Option<AnnealingStats>,
    }

    impl AnnealingObserver for Counting {
        fn on_temperature(&mut self, step: u32, _t: f64, current: f64, best: f64) {
            assert_eq!(step, self.steps);
            assert!(best <= current + 1e-12);
            if self.steps > 0 {
                assert!(best <= self.last_best, "best got worse at step {step}");
            }
            self.last_best = best;
            self.steps += 1;
        }

        fn on_finish(&mut self, stats: &AnnealingStats) {
            self.finished = Some(*stats);
        }
    }

    #[test]
    fn empty_request_set() {
        let mut opt = DeliveryOptimizer::from_config(AnnealingConfig::default()).unwrap();
        let out = opt.optimize(&c(0.0, 0.0), &[]);
        assert!(out.order.is_empty());
        assert_eq!(out.original_miles, 0.0);
        assert_eq!(out.optimized_miles, 0.0);
    }

    #[test]
    fn single_request_is_returned_unchanged() {
        let depot = c(0.0, 0.0);
        let stops = vec![req(0.01, 0.01, "Pizza")];
        let mut obs = Counting::default();
        let mut opt = DeliveryOptimizer::from_config(AnnealingConfig::default()).unwrap();
        let out = opt.optimize_observed(&depot, &stops, &mut obs);

        assert_eq!(out.order, stops);
        assert_eq!(out.original_miles, out.optimized_miles);
        assert_eq!(obs.steps, 0);
        assert_eq!(obs.finished.unwrap().iterations, 0);
    }

    #[test]
    fn result_is_a_permutation() {
        let (depot, stops) = line_of_five();
        for seed in 0..8 {
            let cfg = AnnealingConfig { seed, ..Default::default() };
            let out = DeliveryOptimizer::from_config(cfg).unwrap().optimize(&depot, &stops);
            assert_eq!(sorted_items(&out.order), sorted_items(&stops), "seed {seed}");
        }
    }

    #[test]
    fn never_worse_than_input_order() {
        let depot = c(34.0, -118.0);
        let stops: Vec<_> = (0..9)
            .map(|i| {
                let f = i as f64;
                req(34.0 + (f * 0.37).sin() * 0.02, -118.0 + (f * 0.91).cos() * 0.02, &format!("item{i}"))
            })
            .collect();
        for seed in 0..4 {
            let cfg = AnnealingConfig { seed, ..Default::default() };
            let out = DeliveryOptimizer::from_config(cfg).unwrap().optimize(&depot, &stops);
            assert_eq!(out.original_miles, tour_miles(&depot, &stops));
            assert!(out.optimized_miles <= out.original_miles);
            assert!((out.optimized_miles - tour_miles(&depot, &out.order)).abs() < 1e-9);
        }
    }

    #[test]
    fn already_optimal_input_keeps_its_length() {
        let depot = c(0.0, 0.0);
        let stops = vec![req(0.01, 0.0, "A"), req(0.02, 0.0, "B"), req(0.03, 0.0, "C")];
        let out = DeliveryOptimizer::from_config(AnnealingConfig::default()).unwrap().optimize(&depot, &stops);
        assert!((out.optimized_miles - out.original_miles).abs() < 1e-12);
    }

    #[test]
    fn finds_optimum_on_a_line() {
        let (depot, stops) = line_of_five();
        let farthest = depot.distance_miles(&stops[1].location);
        for seed in [1, 2, 3] {
            let cfg = AnnealingConfig { seed, ..Default::default() };
            let out = DeliveryOptimizer::from_config(cfg).unwrap().optimize(&depot, &stops);
            assert!(
                (out.optimized_miles - 2.0 * farthest).abs() < 1e-6,
                "seed {seed}: {} vs {}",
                out.optimized_miles,
                2.0 * farthest
            );
        }
    }

    #[test]
    fn same_seed_same_order() {
        let (depot, stops) = line_of_five();
        let cfg = AnnealingConfig { seed: 42, ..Default::default() };
        let a = DeliveryOptimizer::from_config(cfg).unwrap().optimize(&depot, &stops);
        let b = DeliveryOptimizer::from_config(cfg).unwrap().optimize(&depot, &stops);
        assert_eq!(a, b);
    }

    #[test]
    fn injected_rng_is_used() {
        let (depot, stops) = line_of_five();
        let cfg = AnnealingConfig::default();
        let a = DeliveryOptimizer::new(cfg, SmallRng::seed_from_u64(7)).unwrap().optimize(&depot, &stops);
        let b = DeliveryOptimizer::new(cfg, SmallRng::seed_from_u64(7)).unwrap().optimize(&depot, &stops);
        assert_eq!(a.order, b.order);
        assert_eq!(sorted_items(&a.order), sorted_items(&stops));
    }

    #[test]
    fn default_schedule_runs_88_steps() {
        let (depot, stops) = line_of_five();
        let mut obs = Counting::default();
        let mut opt = DeliveryOptimizer::from_config(AnnealingConfig::default()).unwrap();
        let out = opt.optimize_observed(&depot, &stops, &mut obs);

        let stats = obs.finished.expect("on_finish not called");
        assert_eq!(obs.steps, 88);
        assert_eq!(stats.temperature_steps, 88);
        assert_eq!(stats.iterations, 8_800);
        assert!(stats.accepted <= stats.iterations);
        assert_eq!(stats.optimized_miles, out.optimized_miles);
        assert_eq!(stats.original_miles, out.original_miles);
    }

    #[test]
    fn rejects_invalid_schedule() {
        let cfg = AnnealingConfig { cooling_factor: 1.0, ..Default::default() };
        let err = DeliveryOptimizer::from_config(cfg).err().expect("config should be rejected");
        assert!(matches!(err, OptimizeError::Config(CoreError::Config(_))));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use dp_core::{AnnealingConfig, DeliveryRequest};

    use super::helpers::*;
    use crate::{DeliveryOptimizer, tour_miles};

    fn quick_schedule(seed: u64) -> AnnealingConfig {
        AnnealingConfig {
            iterations_per_temperature: 20,
            initial_temperature:        1.0,
            cooling_factor:             0.5,
            min_temperature:            0.01,
            seed,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn reorders_without_losing_requests(
            points in prop::collection::vec((-0.05f64..0.05, -0.05f64..0.05), 0..12),
            seed in any::<u64>(),
        ) {
            let depot = c(0.0, 0.0);
            let stops: Vec<DeliveryRequest> = points
                .iter()
                .enumerate()
                .map(|(i, &(lat, lon))| req(lat, lon, &format!("item{i}")))
                .collect();

            let out = DeliveryOptimizer::from_config(quick_schedule(seed)).unwrap().optimize(&depot, &stops);

            prop_assert_eq!(sorted_items(&out.order), sorted_items(&stops));
            prop_assert!(out.optimized_miles <= out.original_miles);
            prop_assert!((out.optimized_miles - tour_miles(&depot, &out.order)).abs() < 1e-9);
        }
    }
}
