//! Core data types and structures
//!
//! This module contains the fundamental data types used throughout
//! deploy-descriptor, separated from the logic that produces them.

pub mod config_tree;
pub mod types;

pub use config_tree::{ConfigMap, ConfigNode};
pub use types::*;
