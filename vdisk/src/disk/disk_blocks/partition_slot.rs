use super::PartitionName;
use crate::{ByteSerializable, FitStrategy, PartitionKind};
use byteorder::{ByteOrder, LittleEndian};

/// Encoded width of a slot in the boot record.
pub const PARTITION_SLOT_SIZE: u64 = 40;

/// One entry of the boot record's partition table. Length of 40 bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartitionSlot {
    active: bool,
    /// Primary or Extended. None when the slot is inactive.
    kind: Option<PartitionKind>,
    /// The strategy that placed this partition.
    fit: Option<FitStrategy>,
    /// Absolute byte offset of the partition within the image.
    start: u64,
    size: u64,
    name: PartitionName,
}

impl PartitionSlot {
    pub const fn empty() -> Self {
        return Self {
            active: false,
            kind: None,
            fit: None,
            start: 0,
            size: 0,
            name: PartitionName::empty(),
        };
    }

    pub fn new(
        kind: PartitionKind,
        fit: FitStrategy,
        start: u64,
        size: u64,
        name: PartitionName,
    ) -> Self {
        return Self {
            active: true,
            kind: Some(kind),
            fit: Some(fit),
            start,
            size,
            name,
        };
    }

    /// Reset every field to the inactive, zeroed form.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        return self.active;
    }

    #[inline]
    pub fn kind(&self) -> Option<PartitionKind> {
        return self.kind;
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

    /// The first byte after this partition.
    #[inline]
    pub fn end(&self) -> u64 {
        return self.start.saturating_add(self.size);
    }

    #[inline]
    pub fn name(&self) -> &PartitionName {
        return &self.name;
    }

    pub fn is_extended(&self) -> bool {
        return self.active && self.kind == Some(PartitionKind::Extended);
    }
}

impl Default for PartitionSlot {
    fn default() -> Self {
        return Self::empty();
    }
}

impl ByteSerializable for PartitionSlot {
    type BytesArrayType = [u8; 40];

    fn to_bytes(&self) -> Self::BytesArrayType {
        let mut bytes = [0u8; 40];

        bytes[0] = self.active as u8;
        bytes[1] = self.kind.map(|k| k.as_u8()).unwrap_or(0);
        bytes[2] = self.fit.map(|f| f.as_u8()).unwrap_or(0);
        // bytes 3 - 7 are reserved

        let mut offset = 8;

        LittleEndian::write_u64(&mut bytes[offset..], self.start);
        offset += 8;
        LittleEndian::write_u64(&mut bytes[offset..], self.size);
        offset += 8;

        bytes[offset..offset + 16].copy_from_slice(self.name.raw());

        return bytes;
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized,
    {
        if bytes.len() < 40 {
            return None;
        }

        let active = match bytes[0] {
            0 => false,
            1 => true,
            _ => return None,
        };

        let kind = match bytes[1] {
            0 => None,
            b'P' => Some(PartitionKind::Primary),
            b'E' => Some(PartitionKind::Extended),
            _ => return None, // Logical partitions never live in the table.
        };

        let fit = match bytes[2] {
            0 => None,
            n => Some(FitStrategy::from_u8(n)?),
        };

        let start = LittleEndian::read_u64(&bytes[8..]);
        let size = LittleEndian::read_u64(&bytes[16..]);
        let name = PartitionName::from_raw(&bytes[24..40])?;

        if active && (kind.is_none() || fit.is_none() || name.is_empty()) {
            return None;
        }

        return Some(Self {
            active,
            kind,
            fit,
            start,
            size,
            name,
        });
    }

    fn generic_bytes_rep(bytes: &Self::BytesArrayType) -> &[u8] {
        return bytes;
    }

    fn size() -> u64 {
        return PARTITION_SLOT_SIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_width() {
        assert_eq!(PartitionSlot::empty().to_bytes().len() as u64, PARTITION_SLOT_SIZE);
        assert_eq!(<PartitionSlot as ByteSerializable>::size(), PARTITION_SLOT_SIZE);
    }

    #[test]
    fn test_empty_slot_is_zeroed() {
        assert_eq!(PartitionSlot::empty().to_bytes().to_vec(), vec![0u8; 40]);
    }

    #[test]
    fn test_to_bytes() {
        let slot = PartitionSlot::new(
            PartitionKind::Extended,
            FitStrategy::BestFit,
            0xc0,
            0x1000,
            PartitionName::new("ext").unwrap(),
        );

        let bytes = {
            let mut res = [0u8; 40];
            res[0] = 1;
            res[1] = b'E';
            res[2] = b'B';
            res[8] = 0xc0;
            res[17] = 0x10;
            res[24] = b'e';
            res[25] = b'x';
            res[26] = b't';
            res
        };

        assert_eq!(slot.to_bytes().to_vec(), bytes.to_vec());
        assert_eq!(PartitionSlot::from_bytes(&bytes).unwrap(), slot);
    }

    #[test]
    fn test_rejects_logical_kind() {
        let mut bytes = PartitionSlot::new(
            PartitionKind::Primary,
            FitStrategy::FirstFit,
            192,
            10,
            PartitionName::new("a").unwrap(),
        )
        .to_bytes();
        bytes[1] = b'L';

        assert!(PartitionSlot::from_bytes(&bytes).is_none());
    }

    #[test]
    fn test_rejects_active_without_name() {
        let mut bytes = [0u8; 40];
        bytes[0] = 1;
        bytes[1] = b'P';
        bytes[2] = b'F';

        assert!(PartitionSlot::from_bytes(&bytes).is_none());
    }

    #[test]
    fn test_truncated() {
        assert!(PartitionSlot::from_bytes(&[0u8; 39]).is_none());
    }

    #[test]
    fn test_clear() {
        let mut slot = PartitionSlot::new(
            PartitionKind::Primary,
            FitStrategy::WorstFit,
            192,
            100,
            PartitionName::new("P1").unwrap(),
        );
        slot.clear();

        assert!(!slot.is_active());
        assert_eq!(slot, PartitionSlot::empty());
    }
}
