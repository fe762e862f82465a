#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Export document assembly.
pub mod export;

/// I/O utilities for reading sparse reconstruction data.
pub mod io;

/// Point cloud container.
pub mod pointcloud;

/// 3D transforms and pose geometry.
pub mod transforms;
