//! Simulated annealing over delivery orders.
//!
//! # Search
//!
//! State is a permutation of the request list.  A neighbour swaps two
//! positions drawn uniformly at random (possibly the same one), so the
//! multiset of requests never changes.  A candidate with lower energy is
//! always taken; a worse one is taken when a uniform draw in `[0, 1)` falls
//! below `exp((E_current − E_candidate) / T)`.
//!
//! # Schedule
//!
//! ```text
//! T = initial_temperature
//! while T >= min_temperature:
//!     repeat iterations_per_temperature times: propose, accept/reject
//!     T *= cooling_factor
//! ```
//!
//! The best order seen anywhere on the trajectory is returned, not the final
//! one, so the result is never longer than the input order.

use rand::Rng;

use dp_core::{AnnealingConfig, DeliveryRequest, GeoCoord, PlannerRng};

use crate::observer::{AnnealingObserver, AnnealingStats, NoopObserver};
use crate::tour::{tour_miles, tour_miles_by_index};
use crate::OptimizeResult;

/// Reordered requests plus crow-flight tour lengths before and after.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedOrder {
    pub order:           Vec<DeliveryRequest>,
    pub original_miles:  f64,
    pub optimized_miles: f64,
}

/// Delivery-order optimizer owning its random source.
///
/// The generator is injected at construction; two optimizers built with equal
/// configs and equally seeded generators return identical orders.
///
/// # Example
///
/// ```
/// use dp_core::{AnnealingConfig, DeliveryRequest, GeoCoord};
/// use dp_optimize::DeliveryOptimizer;
///
/// let depot = GeoCoord::from_degrees(34.0, -118.0);
/// let stops = vec![
///     DeliveryRequest::new(GeoCoord::from_degrees(34.02, -118.0), "Sandwiches"),
///     DeliveryRequest::new(GeoCoord::from_degrees(34.01, -118.0), "Tea"),
/// ];
/// let mut opt = DeliveryOptimizer::from_config(AnnealingConfig::default()).unwrap();
/// let result = opt.optimize(&depot, &stops);
/// assert_eq!(result.order.len(), 2);
/// assert!(result.optimized_miles <= result.original_miles);
/// ```
pub struct DeliveryOptimizer<G: Rng = PlannerRng> {
    config: AnnealingConfig,
    rng:    G,
}

impl DeliveryOptimizer<PlannerRng> {
    /// Optimizer seeded from `config.seed`.
    pub fn from_config(config: AnnealingConfig) -> OptimizeResult<Self> {
        Self::new(config, PlannerRng::new(config.seed))
    }
}

impl<G: Rng> DeliveryOptimizer<G> {
    /// Optimizer drawing from `rng`.  `config.seed` is ignored.
    pub fn new(config: AnnealingConfig, rng: G) -> OptimizeResult<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Reorder `requests` to shorten the crow-flight tour from and back to
    /// `depot`.
    ///
    /// An empty request set yields an empty order with both lengths zero.
    pub fn optimize(&mut self, depot: &GeoCoord, requests: &[DeliveryRequest]) -> OptimizedOrder {
        self.optimize_observed(depot, requests, &mut NoopObserver)
    }

    /// Like [`optimize`](Self::optimize), reporting progress to `observer`.
    pub fn optimize_observed(
        &mut self,
        depot: &GeoCoord,
        requests: &[DeliveryRequest],
        observer: &mut impl AnnealingObserver,
    ) -> OptimizedOrder {
        let n = requests.len();
        let original_miles = tour_miles(depot, requests);
        let mut stats = AnnealingStats { original_miles, optimized_miles: original_miles, ..Default::default() };

        // Nothing to reorder.
        if n < 2 {
            observer.on_finish(&stats);
            return OptimizedOrder {
                order: requests.to_vec(),
                original_miles,
                optimized_miles: original_miles,
            };
        }

        let mut current: Vec<usize> = (0..n).collect();
        let mut current_miles = original_miles;
        let mut best = current.clone();
        let mut best_miles = original_miles;

        let mut temperature = self.config.initial_temperature;
        while temperature >= self.config.min_temperature {
            for _ in 0..self.config.iterations_per_temperature {
                let a = self.rng.gen_range(0..n);
                let b = self.rng.gen_range(0..n);
                current.swap(a, b);
                let candidate_miles = tour_miles_by_index(depot, requests, &current);
                stats.iterations += 1;

                if self.accept(current_miles, candidate_miles, temperature) {
                    stats.accepted += 1;
                    current_miles = candidate_miles;
                    if current_miles < best_miles {
                        best_miles = current_miles;
                        best.clone_from(&current);
                    }
                } else {
                    current.swap(a, b);
                }
            }

            observer.on_temperature(stats.temperature_steps, temperature, current_miles, best_miles);
            stats.temperature_steps += 1;
            temperature *= self.config.cooling_factor;
        }

        stats.optimized_miles = best_miles;
        tracing::debug!(
            stops = n,
            steps = stats.temperature_steps,
            iterations = stats.iterations,
            accepted = stats.accepted,
            original_miles,
            optimized_miles = best_miles,
            "delivery order optimized"
        );
        observer.on_finish(&stats);

        OptimizedOrder {
            order: best.iter().map(|&i| requests[i].clone()).collect(),
            original_miles,
            optimized_miles: best_miles,
        }
    }

    /// Metropolis acceptance.  Only draws from the RNG for non-improving moves.
    fn accept(&mut self, current: f64, candidate: f64, temperature: f64) -> bool {
        if candidate < current {
            return true;
        }
        let p = ((current - candidate) / temperature).exp();
        self.rng.r#gen::<f64>() < p
    }
}
