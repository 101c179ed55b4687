// Domain layer: dashboard models and ports. Nothing here talks to the network directly.

pub mod model;
pub mod ports;
