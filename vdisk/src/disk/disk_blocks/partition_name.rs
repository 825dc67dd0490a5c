use core::fmt::{Debug, Display, Formatter};

pub const PARTITION_NAME_LENGTH: usize = 16;

/// A partition name as stored on disk: up to 16 bytes of UTF-8, padded with null bytes.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PartitionName {
    bytes: [u8; PARTITION_NAME_LENGTH],
}

impl PartitionName {
    /// Returns None for empty names, names longer than 16 bytes or names containing a null byte.
    pub fn new(name: &str) -> Option<Self> {
        let raw = name.as_bytes();

        if raw.is_empty() || raw.len() > PARTITION_NAME_LENGTH || raw.contains(&0) {
            return None;
        }

        let mut bytes = [0u8; PARTITION_NAME_LENGTH];
        bytes[..raw.len()].copy_from_slice(raw);

        return Some(Self { bytes });
    }

    pub const fn empty() -> Self {
        return Self {
            bytes: [0u8; PARTITION_NAME_LENGTH],
        };
    }

    /// Decodes the padded on-disk form. Bytes after the first null must also be null.
    pub fn from_raw(raw: &[u8]) -> Option<Self> {
        if raw.len() < PARTITION_NAME_LENGTH {
            return None;
        }

        let mut bytes = [0u8; PARTITION_NAME_LENGTH];
        bytes.copy_from_slice(&raw[..PARTITION_NAME_LENGTH]);

        let len = bytes.iter().position(|b| *b == 0).unwrap_or(PARTITION_NAME_LENGTH);

        if bytes[len..].iter().any(|b| *b != 0) {
            return None;
        }

        if core::str::from_utf8(&bytes[..len]).is_err() {
            return None;
        }

        return Some(Self { bytes });
    }

    pub fn as_str(&self) -> &str {
        let len = self.len();

        // Both constructors validate the prefix as UTF-8.
        return core::str::from_utf8(&self.bytes[..len]).unwrap_or("");
    }

    pub fn len(&self) -> usize {
        return self
            .bytes
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(PARTITION_NAME_LENGTH);
    }

    pub fn is_empty(&self) -> bool {
        return self.bytes[0] == 0;
    }

    pub fn raw(&self) -> &[u8; PARTITION_NAME_LENGTH] {
        return &self.bytes;
    }
}

impl Display for PartitionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        return write!(f, "{}", self.as_str());
    }
}

impl Debug for PartitionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        return write!(f, "PartitionName({:?})", self.as_str());
    }
}
