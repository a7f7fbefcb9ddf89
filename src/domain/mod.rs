// Domain layer: core models, platform envelope types and ports (interfaces).

pub mod envelope;
pub mod model;
pub mod ports;
