//! Integration tests for the simulation core
//!
//! Tests are organized by topic:
//! - `projection` - compound interest, breakeven and rate conversion
//! - `accumulation` - cash-flow accumulation, fees and depletion
//! - `ensemble` - stochastic paths, Monte Carlo runs and summaries
//! - `properties` - proptest invariants across input ranges

mod ensemble;
