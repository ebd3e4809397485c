//! Progress hooks for the annealing loop.

/// Summary of one optimizer run, handed to [`AnnealingObserver::on_finish`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingStats {
    /// Temperatures visited.
    pub temperature_steps: u32,
    /// Candidate orders evaluated.
    pub iterations: u64,
    /// Candidates accepted (improving or not).
    pub accepted: u64,
    /// Crow-flight miles of the input order.
    pub original_miles: f64,
    /// Crow-flight miles of the returned order.
    pub optimized_miles: f64,
}

/// Callbacks invoked by
/// [`DeliveryOptimizer::optimize_observed`][crate::DeliveryOptimizer::optimize_observed].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — convergence trace
///
/// ```rust,ignore
/// struct Trace(Vec<f64>);
///
/// impl AnnealingObserver for Trace {
///     fn on_temperature(&mut self, _step: u32, _t: f64, _current: f64, best: f64) {
///         self.0.push(best);
///     }
/// }
/// ```
pub trait AnnealingObserver {
    /// Called after all iterations at one temperature, before cooling.
    fn on_temperature(&mut self, _step: u32, _temperature: f64, _current_miles: f64, _best_miles: f64) {}

    /// Called once when the run ends.
    fn on_finish(&mut self, _stats: &AnnealingStats) {}
}

/// An [`AnnealingObserver`] that does nothing.
pub struct NoopObserver;

impl AnnealingObserver for NoopObserver {}
