//! A window with one rotating, vertex-colored cube drawn through Direct3D 11.
//!
//! Everything outside [`d3d11`] is plain data and arithmetic and builds on
//! any host.

pub mod clock;
pub mod config;
pub mod error;
pub mod feature_level;
pub mod frame_loop;
pub mod mesh;
pub mod refresh_rate;
pub mod shader_stage;
pub mod slot;
pub mod startup;
pub mod transforms;

#[cfg(windows)]
pub mod d3d11;
