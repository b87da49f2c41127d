//! Generational evolutionary optimizer for the Euclidean Traveling
//! Salesman Problem.
//!
//! Given a fixed set of cities, [`ga::GaRunner`] searches for a short
//! closed tour visiting each city exactly once using:
//!
//! - **Tournament selection** without replacement
//! - **Order crossover** that keeps a parent prefix and the other parent's
//!   relative gene order
//! - **Swap mutation** of two distinct positions
//! - **Elitism**, so the best-known tour length never increases
//!
//! All randomness flows from one generator owned by the runner and seeded
//! from [`ga::GaConfig::seed`], so runs are reproducible.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (`debug` per generation, `info` on
//! improvements and completion) and installs no subscriber.

pub mod ga;
