//! RateScope Common Types
//!
//! This crate contains the shared data model used across RateScope:
//! currency codes, validated currency pairs, change metrics and the
//! quote record handed from loaders to the analytics engine.

pub mod currency;
pub mod error;
pub mod metric;
pub mod quote;

pub use currency::*;
pub use error::*;
pub use metric::*;
pub use quote::*;
