//! Rendering system and GPU interfaces

pub mod frame;
