//! The hook table the host firmware drives.

use steerguard_bmw_protocol::CanFrame;

/// Safety hooks for one vehicle variant.
///
/// The host classifies every frame, calls [`rx`](Self::rx) for inbound
/// frames, and calls [`tx`](Self::tx) before transmitting anything. The
/// hooks never initiate I/O themselves.
///
/// # Real-Time Safety
///
/// All methods run to completion without blocking or allocating.
pub trait SafetyHooks {
    /// Reset to the power-on safety posture: controls disallowed.
    fn init(&mut self, param: i16);

    /// Observe an inbound frame. Returns `true` to keep processing it.
    fn rx(&mut self, frame: &CanFrame) -> bool;

    /// Vet an outbound frame. Returns `true` if it may be transmitted.
    fn tx(&mut self, frame: &CanFrame) -> bool;

    /// Vet a transmission on the secondary output bus.
    ///
    /// Defaults to [`no_output_tx_secondary`].
    fn tx_secondary(&mut self, bus: u8, payload: &[u8]) -> bool {
        no_output_tx_secondary(bus, payload)
    }

    /// Bus to forward `frame` to, if any.
    ///
    /// Defaults to [`default_forward`].
    fn forward(&mut self, bus: u8, frame: &CanFrame) -> Option<u8> {
        default_forward(bus, frame)
    }
}

/// Secondary-bus policy for variants with no secondary outputs: reject all.
#[must_use]
pub fn no_output_tx_secondary(_bus: u8, _payload: &[u8]) -> bool {
    false
}

/// Shared forwarding policy: forward nothing.
#[must_use]
pub fn default_forward(_bus: u8, _frame: &CanFrame) -> Option<u8> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let frame = CanFrame::from_array(0x488, [0; 8]);
        assert!(!no_output_tx_secondary(0, &[1, 2, 3]));
        assert_eq!(default_forward(0, &frame), None);
        assert_eq!(default_forward(2, &frame), None);
    }
}
