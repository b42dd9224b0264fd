//! Veldt - per-frame render state for a voxel terrain renderer

pub mod core;
pub mod render;
