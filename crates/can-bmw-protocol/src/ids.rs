//! CAN identifiers used by the steering safety hooks.

/// Arbitration IDs of the frames the gatekeeper inspects.
pub mod addresses {
    /// Steering column angle report (measured angle, ~100 Hz).
    pub const STEERING_ANGLE: u32 = 0x00E;
    /// Wheel speed and brake status.
    pub const SPEED_BRAKE: u32 = 0x168;
    /// Cruise status on cars with the dynamic (radar) cruise option.
    pub const DYNAMIC_CRUISE: u32 = 0x193;
    /// Cruise status on cars with the normal cruise option.
    pub const CRUISE: u32 = 0x200;
    /// Steering actuation command sent by the driving computer.
    pub const STEERING_COMMAND: u32 = 0x488;

    /// All inbound addresses that can change safety state.
    pub const INBOUND: [u32; 4] = [STEERING_ANGLE, SPEED_BRAKE, DYNAMIC_CRUISE, CRUISE];
}

/// Returns `true` for addresses that carry a cruise engagement bit.
#[must_use]
pub fn is_cruise_address(address: u32) -> bool {
    matches!(address, addresses::DYNAMIC_CRUISE | addresses::CRUISE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_values() {
        assert_eq!(addresses::STEERING_ANGLE, 0x0E);
        assert_eq!(addresses::SPEED_BRAKE, 0x168);
        assert_eq!(addresses::DYNAMIC_CRUISE, 0x193);
        assert_eq!(addresses::CRUISE, 0x200);
        assert_eq!(addresses::STEERING_COMMAND, 0x488);
    }

    #[test]
    fn test_cruise_addresses() {
        assert!(is_cruise_address(0x193));
        assert!(is_cruise_address(0x200));
        assert!(!is_cruise_address(0x168));
        assert!(!is_cruise_address(addresses::STEERING_COMMAND));
    }

    #[test]
    fn test_command_address_is_not_inbound() {
        assert!(!addresses::INBOUND.contains(&addresses::STEERING_COMMAND));
    }
}
