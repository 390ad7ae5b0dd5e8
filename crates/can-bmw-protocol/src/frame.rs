//! Classic CAN frame value.

/// An immutable CAN frame: an arbitration ID and up to 8 payload bytes.
///
/// Frames are plain `Copy` data. The transport owns them; the safety hooks
/// borrow one for the duration of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CanFrame {
    address: u32,
    len: u8,
    data: [u8; 8],
}

impl CanFrame {
    /// Maximum payload length of a classic CAN frame.
    pub const MAX_PAYLOAD: usize = 8;

    /// Build a frame from a payload slice.
    ///
    /// Returns `None` if `payload` is longer than [`MAX_PAYLOAD`](Self::MAX_PAYLOAD).
    #[must_use]
    pub fn new(address: u32, payload: &[u8]) -> Option<Self> {
        let len = u8::try_from(payload.len()).ok()?;
        let mut data = [0u8; Self::MAX_PAYLOAD];
        data.get_mut(..payload.len())?.copy_from_slice(payload);
        Some(Self { address, len, data })
    }

    /// Build a full-length (8-byte) frame.
    #[must_use]
    pub const fn from_array(address: u32, data: [u8; 8]) -> Self {
        Self {
            address,
            len: 8,
            data,
        }
    }

    /// Arbitration ID.
    #[inline]
    #[must_use]
    pub const fn address(&self) -> u32 {
        self.address
    }

    /// Payload bytes (the first `len()` bytes).
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.data.get(..usize::from(self.len)).unwrap_or(&[])
    }

    /// Payload byte at `index`, or `None` past the end of the payload.
    #[inline]
    #[must_use]
    pub fn byte(&self, index: usize) -> Option<u8> {
        self.payload().get(index).copied()
    }

    /// Payload length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` for a zero-length payload.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
