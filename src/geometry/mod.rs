//! Geometry generated once at startup and read-only afterwards.

pub mod fiber;
pub mod path;

pub use fiber::{Fiber, FiberBundle, FiberFan};
pub use path::{bezier_point, Path, PathId};
