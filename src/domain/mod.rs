// Domain layer: layout model, hex geometry and the ports the pipeline talks through.

pub mod hex;
pub mod model;
pub mod ports;
