use core::time::Duration;

/// Common shape of the three engines as seen by a host driving them on a timer.
///
/// The host owns the engine for the lifetime of the mounted game, calls
/// [`Simulation::step`] every [`Simulation::tick_interval`] and funnels input
/// through the engine's own intent methods in between ticks.
pub trait Simulation {
    /// Report of what a single tick changed.
    type Step: Copy + core::fmt::Debug;

    /// Advances the game by one tick.
    fn step(&mut self) -> Self::Step;

    /// Replaces the whole state with a fresh game.
    fn reset(&mut self);

    fn is_over(&self) -> bool;

    fn score(&self) -> u32;

    fn tick_interval(&self) -> Duration;
}
