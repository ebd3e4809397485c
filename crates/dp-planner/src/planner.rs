//! Delivery plan assembly.
//!
//! # Pipeline
//!
//! ```text
//! deliveries ──► DeliveryOptimizer ──► visiting order
//!                                          │
//!   depot → stop₀ → stop₁ → … → stopₙ → depot   (one Router call per leg)
//!                                          │
//!                          CommandBuilder ─┴─► Proceed / Turn / Deliver
//! ```
//!
//! A failed leg aborts the whole plan; callers never see partial commands.

use rand::Rng;

use dp_core::{AnnealingConfig, DeliveryRequest, GeoCoord, PlannerRng};
use dp_optimize::{DeliveryOptimizer, OptimizeError};
use dp_spatial::{AStarRouter, Router, SpatialError, StreetMap};

use crate::command::DeliveryCommand;
use crate::instructions::CommandBuilder;
use crate::PlanResult;

/// Output of [`DeliveryPlanner::generate_delivery_plan`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPlan {
    pub commands:             Vec<DeliveryCommand>,
    /// Road miles over every leg, as reported by the router.
    pub total_miles:          f64,
    /// Crow-flight tour length of the deliveries in input order.
    pub original_crow_miles:  f64,
    /// Crow-flight tour length of the order actually driven.
    pub optimized_crow_miles: f64,
}

impl DeliveryPlan {
    pub fn deliveries(&self) -> usize {
        self.commands.iter().filter(|c| c.is_deliver()).count()
    }

    /// Sum of `Proceed` distances.  Matches `total_miles` up to rounding.
    pub fn proceed_miles(&self) -> f64 {
        self.commands.iter().map(DeliveryCommand::distance_miles).sum()
    }
}

/// One independent planning request for [`DeliveryPlanner::plan_batch`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanJob {
    pub depot:      GeoCoord,
    pub deliveries: Vec<DeliveryRequest>,
}

/// Plans delivery rounds over a borrowed street map.
///
/// `R` defaults to [`AStarRouter`]; any [`Router`] can be plugged in with
/// [`with_router`](Self::with_router).
///
/// # Example
///
/// ```
/// use dp_core::{DeliveryRequest, GeoCoord};
/// use dp_planner::DeliveryPlanner;
/// use dp_spatial::StreetMapBuilder;
///
/// let depot = GeoCoord::parse("34.0625", "-118.4470").unwrap();
/// let shop  = GeoCoord::parse("34.0625", "-118.4460").unwrap();
/// let mut b = StreetMapBuilder::new();
/// b.add_street_segment(depot.clone(), shop.clone(), "Le Conte Ave");
/// let map = b.build();
///
/// let planner = DeliveryPlanner::new(&map);
/// let plan = planner
///     .generate_delivery_plan(&depot, &[DeliveryRequest::new(shop, "Coffee")])
///     .unwrap();
/// assert_eq!(plan.commands.len(), 3);
/// assert_eq!(plan.commands[1].to_string(), "Deliver Coffee");
/// ```
pub struct DeliveryPlanner<'m, R: Router = AStarRouter> {
    map:    &'m StreetMap,
    router: R,
    config: AnnealingConfig,
}

impl<'m> DeliveryPlanner<'m, AStarRouter> {
    pub fn new(map: &'m StreetMap) -> Self {
        Self::with_router(map, AStarRouter)
    }
}

impl<'m, R: Router> DeliveryPlanner<'m, R> {
    pub fn with_router(map: &'m StreetMap, router: R) -> Self {
        Self { map, router, config: AnnealingConfig::default() }
    }

    /// Replace the annealing schedule and seed used for stop ordering.
    pub fn annealing(mut self, config: AnnealingConfig) -> PlanResult<Self> {
        config.validate().map_err(OptimizeError::from)?;
        self.config = config;
        Ok(self)
    }

    /// Order `deliveries`, route every leg of the round trip from `depot`,
    /// and turn the result into driving commands.
    ///
    /// An empty delivery list yields an empty plan, provided the depot is
    /// on the map.
    ///
    /// # Errors
    ///
    /// - [`PlanError::Route`](crate::PlanError::Route) with
    ///   [`SpatialError::BadCoordinate`] or [`SpatialError::NoRoute`] when a
    ///   leg cannot be routed.
    pub fn generate_delivery_plan(
        &self,
        depot: &GeoCoord,
        deliveries: &[DeliveryRequest],
    ) -> PlanResult<DeliveryPlan> {
        let mut optimizer = DeliveryOptimizer::from_config(self.config)?;
        self.generate_delivery_plan_with(&mut optimizer, depot, deliveries)
    }

    /// Like [`generate_delivery_plan`](Self::generate_delivery_plan) with a
    /// caller-supplied optimizer.
    pub fn generate_delivery_plan_with<G: Rng>(
        &self,
        optimizer: &mut DeliveryOptimizer<G>,
        depot: &GeoCoord,
        deliveries: &[DeliveryRequest],
    ) -> PlanResult<DeliveryPlan> {
        if !self.map.contains(depot) {
            return Err(SpatialError::BadCoordinate(depot.clone()).into());
        }

        let optimized = optimizer.optimize(depot, deliveries);

        let mut builder = CommandBuilder::new();
        let mut total_miles = 0.0;
        let mut here = depot;

        for stop in &optimized.order {
            let route = self.router.route(self.map, here, &stop.location)?;
            total_miles += route.total_miles;
            builder.push_route(self.map, &route);
            builder.push_deliver(stop.item.clone());
            here = &stop.location;
        }

        if !optimized.order.is_empty() {
            let route = self.router.route(self.map, here, depot)?;
            total_miles += route.total_miles;
            builder.push_route(self.map, &route);
        }

        let commands = builder.finish();
        tracing::debug!(
            %depot,
            stops = optimized.order.len(),
            commands = commands.len(),
            total_miles,
            crow_before = optimized.original_miles,
            crow_after = optimized.optimized_miles,
            "delivery plan generated"
        );

        Ok(DeliveryPlan {
            commands,
            total_miles,
            original_crow_miles:  optimized.original_miles,
            optimized_crow_miles: optimized.optimized_miles,
        })
    }

    /// Plan every job independently.  Results are in job order.
    ///
    /// Job `i` anneals with `PlannerRng::for_job(config.seed, i)`, so the
    /// output does not depend on thread scheduling under the `parallel`
    /// feature.
    pub fn plan_batch(&self, jobs: &[PlanJob]) -> Vec<PlanResult<DeliveryPlan>> {
        let plan_one = |(index, job): (usize, &PlanJob)| -> PlanResult<DeliveryPlan> {
            let rng = PlannerRng::for_job(self.config.seed, index);
            let mut optimizer = DeliveryOptimizer::new(self.config, rng)?;
            self.generate_delivery_plan_with(&mut optimizer, &job.depot, &job.deliveries)
        };

        #[cfg(not(feature = "parallel"))]
        let plans: Vec<_> = jobs.iter().enumerate().map(plan_one).collect();

        #[cfg(feature = "parallel")]
        let plans: Vec<_> = {
            use rayon::prelude::*;
            jobs.par_iter().enumerate().map(plan_one).collect()
        };

        tracing::info!(
            jobs = jobs.len(),
            failed = plans.iter().filter(|p| p.is_err()).count(),
            "batch planned"
        );
        plans
    }
}
