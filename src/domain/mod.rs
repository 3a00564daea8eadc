// Domain layer: core models and ports (interfaces). Nothing here touches the network or the filesystem.

pub mod model;
pub mod ports;
