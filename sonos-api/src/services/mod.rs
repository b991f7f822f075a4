//! Actions grouped by the service that answers them

pub mod av_transport;
pub mod rendering_control;
pub mod zone_group_topology;
