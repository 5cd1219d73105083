pub mod simulation;
pub mod simulation_diagnostics;

pub use simulation::FlockPlugin;
pub use simulation_diagnostics::FlockDiagnosticsPlugin;
