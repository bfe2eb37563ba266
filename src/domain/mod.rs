// Domain layer: core models and ports (interfaces). No network or UI
// concerns live here.

pub mod model;
pub mod ports;
