//! Core types for the fraud guard.
//!
//! This module provides type-safe wrappers for the domain concepts the
//! matcher, logger and workflow share.

pub mod category;
pub mod customer;
pub mod id;
pub mod status;

pub use category::{BlacklistCategory, BlockReason};
pub use customer::{Address, CustomerRecord, single_line};
pub use id::*;
pub use status::*;
