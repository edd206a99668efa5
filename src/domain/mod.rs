// Domain layer: shared row/outcome types and the ports the core talks through.

pub mod model;
pub mod ports;
