//! Background maintenance for Tempfiles.
//!
//! This crate provides:
//! - The two-phase expiry sweeper (soft-delete expired folders, purge
//!   deleted ones)
//! - A scheduler running each phase on its own interval

pub mod scheduler;
pub mod sweeper;

pub use scheduler::SweepScheduler;
pub use sweeper::{ExpirySweeper, SweepSummary};
