//! Static IPMI channel catalogue and channel-number resolution.

/// Protocol type marking an unassigned channel slot.
const PROTOCOL_RESERVED: u8 = 0xFF;

/// Channel byte meaning "the channel this request arrived on" once the
/// high nibble is forced.
const CURRENT_CHANNEL: u8 = 0xFE;

/// Channel number of the system interface (KCS).
pub const SYSTEM_INTERFACE: u8 = 0xFF;

/// One entry of the channel catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelEntry {
    /// Channel number (0xF0..=0xFF).
    pub number: u8,
    /// Channel protocol type.
    pub protocol_type: u8,
    /// Channel medium type.
    pub medium_type: u8,
    /// Session support bits.
    pub session_support: u8,
    /// Access capabilities reported by `Get Channel Access`.
    pub capabilities: u8,
    /// Channel privilege level limit.
    pub privilege_level: u8,
    /// Short description.
    pub description: &'static str,
}

impl ChannelEntry {
    const fn new(
        number: u8,
        protocol_type: u8,
        medium_type: u8,
        session_support: u8,
        capabilities: u8,
        privilege_level: u8,
        description: &'static str,
    ) -> Self {
        Self {
            number,
            protocol_type,
            medium_type,
            session_support,
            capabilities,
            privilege_level,
            description,
        }
    }

    const fn reserved(number: u8) -> Self {
        Self::new(number, PROTOCOL_RESERVED, 0, 0, 0, 0, "")
    }

    /// Whether this slot is unassigned and must never resolve.
    pub fn is_reserved(&self) -> bool {
        self.protocol_type == PROTOCOL_RESERVED
    }
}

/// The simulated BMC's channels, in lookup order.
pub const CHANNELS: [ChannelEntry; 16] = [
    ChannelEntry::new(0xF0, 0x02, 0x01, 0x00, 0x00, 0x00, "IPMBv1.0, no-session"),
    ChannelEntry::new(0xF1, 0x02, 0x04, 0x80, 0xC2, 0xF5, "802.3 LAN, m-session"),
    ChannelEntry::new(0xF2, 0x02, 0x05, 0x40, 0x00, 0x00, "Serial/Modem, s-session"),
    ChannelEntry::new(0xF3, 0x02, 0x02, 0x00, 0x00, 0x00, "ICMB no-session"),
    ChannelEntry::new(0xF4, 0x04, 0x09, 0x00, 0x00, 0x00, "IPMI-SMBus no-session"),
    ChannelEntry::reserved(0xF5),
    ChannelEntry::reserved(0xF6),
    ChannelEntry::reserved(0xF7),
    ChannelEntry::reserved(0xF8),
    ChannelEntry::reserved(0xF9),
    ChannelEntry::reserved(0xFA),
    ChannelEntry::reserved(0xFB),
    ChannelEntry::reserved(0xFC),
    ChannelEntry::reserved(0xFD),
    ChannelEntry::reserved(0xFE),
    ChannelEntry::new(0xFF, 0x05, 0x0C, 0x00, 0x00, 0x00, "KCS-SysIntf s-less"),
];

/// Look up a channel by its catalogue number.
///
/// Reserved slots never match.
pub fn resolve_channel(number: u8) -> Option<&'static ChannelEntry> {
    CHANNELS
        .iter()
        .find(|entry| entry.number == number && !entry.is_reserved())
}

/// Force the high nibble of a raw channel byte and remap "current channel"
/// to the system interface.
pub fn normalize_channel(raw: u8) -> u8 {
    let channel = raw | 0xF0;
    if channel == CURRENT_CHANNEL {
        SYSTEM_INTERFACE
    } else {
        channel
    }
}

/// Normalize then resolve a raw channel byte from a request.
pub fn resolve_request_channel(raw: u8) -> Option<&'static ChannelEntry> {
    resolve_channel(normalize_channel(raw))
}

/// Whether a raw channel byte names a usable channel.
pub fn is_valid_channel(raw: u8) -> bool {
    resolve_request_channel(raw).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_assigned_channel_resolves_to_its_entry() {
        for number in 0xF0..=0xFF_u8 {
            let entry = CHANNELS[usize::from(number - 0xF0)];
            match resolve_channel(number) {
                Some(found) => {
                    assert!(!entry.is_reserved());
                    assert_eq!(*found, entry);
                }
                None => assert!(entry.is_reserved(), "channel {number:#04x}"),
            }
        }
    }

    #[test]
    fn reserved_slots_never_resolve() {
        for number in 0xF5..=0xFE_u8 {
            assert!(resolve_channel(number).is_none());
        }
    }

    #[test]
    fn numbers_below_catalogue_do_not_resolve() {
        assert!(resolve_channel(0x00).is_none());
        assert!(resolve_channel(0x0F).is_none());
    }

    #[test]
    fn current_channel_maps_to_system_interface() {
        assert_eq!(normalize_channel(0x0E), SYSTEM_INTERFACE);
        assert_eq!(normalize_channel(0xFE), SYSTEM_INTERFACE);
        assert_eq!(normalize_channel(0x01), 0xF1);

        let entry = resolve_request_channel(0x0E).expect("system interface");
        assert_eq!(entry.medium_type, 0x0C);
        assert_eq!(entry.protocol_type, 0x05);
    }

    #[test]
    fn lan_channel_fields() {
        let lan = resolve_request_channel(0x01).expect("lan");
        assert_eq!(lan.session_support, 0x80);
        assert_eq!(lan.capabilities, 0xC2);
        assert_eq!(lan.privilege_level, 0xF5);
        assert!(is_valid_channel(0x01));
        assert!(!is_valid_channel(0x05));
    }
}
