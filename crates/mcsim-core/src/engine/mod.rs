//! # Engine Module
//!
//! The Metropolis Monte Carlo engine and everything it owns while a chain is
//! running.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters, their builder and validation
//! - **Acceptance** ([`acceptance`]) - The Metropolis criterion
//! - **Transactions** ([`transaction`]) - Apply a trial displacement, then commit or revert it
//! - **Sampling** ([`trajectory`]) - Append-only recorder of sampled frames
//! - **State Tracking** ([`state`]) - Running energy, move statistics, run phase and results
//! - **Driver** ([`monte_carlo`]) - The engine loop tying the pieces together
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting for front-ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! A chain is strictly sequential and owns its random stream, so independent
//! chains never share mutable state.

pub mod acceptance;
pub mod config;
pub mod error;
pub mod monte_carlo;
pub mod progress;
pub mod state;
pub mod trajectory;
pub mod transaction;
