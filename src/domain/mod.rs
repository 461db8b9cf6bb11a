// Domain layer: core models and ports. No HTTP or MCP types in here.

pub mod model;
pub mod ports;
