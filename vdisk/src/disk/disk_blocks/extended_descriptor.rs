use super::PartitionName;
use crate::{ByteSerializable, FitStrategy};
use byteorder::{ByteOrder, LittleEndian};

/// Stored in `next` by the last descriptor of a chain.
pub const NO_NEXT_DESCRIPTOR: u64 = u64::MAX;

/// Encoded width of a descriptor.
pub const DESCRIPTOR_SIZE: u64 = 48;

/// A node of the singly linked list kept inside an extended partition. Each active node describes
/// one logical partition. The head node always sits at the extended partition's first byte.
/// Length of 48 bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExtendedDescriptor {
    active: bool,
    fit: Option<FitStrategy>,
    /// Absolute byte offset of the logical partition's data, just past its descriptor.
    start: u64,
    size: u64,
    /// Absolute byte offset of the next descriptor or NO_NEXT_DESCRIPTOR.
    next: u64,
    name: PartitionName,
}

impl ExtendedDescriptor {
    /// The inactive head of an extended partition with no logical partitions.
    pub const fn empty() -> Self {
        return Self {
            active: false,
            fit: None,
            start: 0,
            size: 0,
            next: NO_NEXT_DESCRIPTOR,
            name: PartitionName::empty(),
        };
    }

    pub fn new(fit: FitStrategy, start: u64, size: u64, name: PartitionName) -> Self {
        return Self {
            active: true,
            fit: Some(fit),
            start,
            size,
            next: NO_NEXT_DESCRIPTOR,
            name,
        };
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        return self.active;
    }

    #[inline]
    pub fn fit(&self) -> Option<FitStrategy> {
        return self.fit;
    }

    #[inline]
    pub fn start(&self) -> u64 {
        return self.start;
    }

    #[inline]
    pub fn size(&self) -> u64 {
        return self.size;
    }

    #[inline]
    pub fn end(&self) -> u64 {
        return self.start.saturating_add(self.size);
    }

    #[inline]
    pub fn name(&self) -> &PartitionName {
        return &self.name;
    }

    pub fn next(&self) -> Option<u64> {
        if self.next == NO_NEXT_DESCRIPTOR {
            return None;
        }

        return Some(self.next);
    }

    pub fn set_next(&mut self, next: Option<u64>) {
        self.next = next.unwrap_or(NO_NEXT_DESCRIPTOR);
    }
}

impl Default for ExtendedDescriptor {
    fn default() -> Self {
        return Self::empty();
    }
}

impl ByteSerializable for ExtendedDescriptor {
    type BytesArrayType = [u8; 48];

    fn to_bytes(&self) -> Self::BytesArrayType {
        let mut bytes = [0u8; 48];

        bytes[0] = self.active as u8;
        bytes[1] = self.fit.map(|f| f.as_u8()).unwrap_or(0);
        // bytes 2 - 7 are reserved

        let mut offset = 8;

        LittleEndian::write_u64(&mut bytes[offset..], self.start);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.size);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.next);
        offset += 8;

        bytes[offset..offset + 16].copy_from_slice(self.name.raw());

        return bytes;
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized,
    {
        if bytes.len() < 48 {
            return None;
        }

        let active = match bytes[0] {
            0 => false,
            1 => true,
            _ => return None,
        };

        let fit = match bytes[1] {
            0 => None,
            n => Some(FitStrategy::from_u8(n)?),
        };

        let start = LittleEndian::read_u64(&bytes[8..]);
        let size = LittleEndian::read_u64(&bytes[16..]);
        let next = LittleEndian::read_u64(&bytes[24..]);
        let name = PartitionName::from_raw(&bytes[32..48])?;

        if active && (fit.is_none() || name.is_empty()) {
            return None;
        }

        return Some(Self {
            active,
            fit,
            start,
            size,
            next,
            name,
        });
    }

    fn generic_bytes_rep(bytes: &Self::BytesArrayType) -> &[u8] {
        return bytes;
    }

    fn size() -> u64 {
        return DESCRIPTOR_SIZE;
    }
}
