//! Storage abstractions for service layer
//!
//! Contains the file-backed JSON map store and the insertion-ordered map it
//! reads into, so that listing and stable sorting follow file order.

pub mod json_map_store;
pub mod ordered_map;

pub use json_map_store::JsonMapStore;
pub use ordered_map::OrderedMap;
