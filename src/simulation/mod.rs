mod backend;
pub mod diagnostics;
mod simulation;

pub use backend::*;
pub use diagnostics::Diagnostics;
pub use simulation::*;
