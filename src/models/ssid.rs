// Network name as raw bytes, bounded to the 802.11 SSID size minus the terminator slot.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Longest network name kept, in bytes. Longer input is truncated.
pub const MAX_SSID_LEN: usize = 63;

/// Network name. May be empty (hidden network) and may hold any bytes, including
/// control characters and invalid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ssid(Vec<u8>);

impl Ssid {
    /// Copies at most [`MAX_SSID_LEN`] bytes.
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        let bytes = bytes.as_ref();
        let len = bytes.len().min(MAX_SSID_LEN);
        Self(bytes[..len].to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Ssid {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lossy: invalid UTF-8 sequences show as U+FFFD.
impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl Serialize for Ssid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.0))
    }
}

impl<'de> Deserialize<'de> for Ssid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s))
    }
}
