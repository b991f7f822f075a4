/// The UPnP services a speaker exposes that snapshots touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Transport state, position, play mode and source URI
    AVTransport,

    /// Volume, mute and EQ
    RenderingControl,

    /// Household grouping
    ZoneGroupTopology,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::AVTransport => "AVTransport",
            Service::RenderingControl => "RenderingControl",
            Service::ZoneGroupTopology => "ZoneGroupTopology",
        }
    }

    /// Control URL path, relative to the speaker's base URL
    pub fn control_path(&self) -> &'static str {
        match self {
            Service::AVTransport => "MediaRenderer/AVTransport/Control",
            Service::RenderingControl => "MediaRenderer/RenderingControl/Control",
            Service::ZoneGroupTopology => "ZoneGroupTopology/Control",
        }
    }

    pub fn urn(&self) -> &'static str {
        match self {
            Service::AVTransport => "urn:schemas-upnp-org:service:AVTransport:1",
            Service::RenderingControl => "urn:schemas-upnp-org:service:RenderingControl:1",
            Service::ZoneGroupTopology => "urn:schemas-upnp-org:service:ZoneGroupTopology:1",
        }
    }

    /// Leading argument every action on this service carries
    ///
    /// The media renderer services address their single instance `0`;
    /// topology actions take no instance.
    pub fn instance_argument(&self) -> &'static str {
        match self {
            Service::AVTransport | Service::RenderingControl => "<InstanceID>0</InstanceID>",
            Service::ZoneGroupTopology => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Service::AVTransport, "MediaRenderer/AVTransport/Control")]
    #[case(Service::RenderingControl, "MediaRenderer/RenderingControl/Control")]
    #[case(Service::ZoneGroupTopology, "ZoneGroupTopology/Control")]
    fn test_control_path(#[case] service: Service, #[case] path: &str) {
        assert_eq!(service.control_path(), path);
        assert!(service.urn().ends_with(&format!(":{}:1", service.name())));
    }

    #[test]
    fn test_topology_has_no_instance() {
        assert_eq!(Service::ZoneGroupTopology.instance_argument(), "");
        assert_eq!(Service::RenderingControl.instance_argument(), "<InstanceID>0</InstanceID>");
    }
}
