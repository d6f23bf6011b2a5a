// Domain layer: CSW request model and ports. No transport code here.

pub mod model;
pub mod ports;
