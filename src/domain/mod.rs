// Domain layer: the people feed model, the cat roster and the fetch port.

pub mod model;
pub mod ports;
