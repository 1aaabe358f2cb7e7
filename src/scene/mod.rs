pub mod anatomy;
pub mod frame;
pub mod palette;
pub mod state;

pub use anatomy::{Anatomy, VesselKind};
pub use palette::Neon;
pub use state::{Frame, SimulationState};
