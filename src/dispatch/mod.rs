//! Bounded-concurrency execution of a request plan.
mod pool;
mod runner;
mod state;

#[cfg(test)]
mod tests;

pub use runner::Dispatcher;
pub use state::DispatchState;
