use super::{PartitionName, PartitionSlot, PARTITION_SLOT_SIZE};
use crate::{ByteSerializable, Checksum, FitStrategy};
use byteorder::{ByteOrder, LittleEndian};
use alloc::vec::Vec;
use chrono::{DateTime, TimeZone, Utc};

const CURRENT_VERSION: u8 = 0x00;
const MAGIC: u32 = 0x5644_4b00;
const SLOTS_OFFSET: usize = 32;

/// The partition table can never hold more than this many primary and extended partitions.
pub const PARTITION_SLOTS: usize = 4;

/// The disk-level descriptor stored at offset 0 of every image. Length of 192 bytes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BootRecord {
    /// Magic used to identify the image, in the form 0x56444b00 | version.
    magic: u32,

    /// Bytes available on the disk, including this record.
    total_size: u64,
    /// Seconds since the unix epoch. Set once when the disk is created.
    creation_time: i64,
    /// Random value chosen when the disk is created.
    signature: u32,
    /// Applied to partition requests that do not name a fit.
    default_fit: FitStrategy,

    checksum: u8,
    reserved: [u8; 6],

    slots: [PartitionSlot; PARTITION_SLOTS],
}

impl BootRecord {
    pub fn new(
        total_size: u64,
        creation_time: DateTime<Utc>,
        signature: u32,
        default_fit: FitStrategy,
    ) -> Self {
        let mut new = Self {
            magic: MAGIC | (CURRENT_VERSION as u32),
            total_size,
            creation_time: creation_time.timestamp(),
            signature,
            default_fit,
            checksum: 0,
            reserved: [0u8; 6],
            slots: [PartitionSlot::empty(); PARTITION_SLOTS],
        };

        new.set_checksum();

        return new;
    }

    #[inline]
    pub fn total_size(&self) -> u64 {
        return self.total_size;
    }

    /// Seconds since the unix epoch.
    #[inline]
    pub fn creation_time(&self) -> i64 {
        return self.creation_time;
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        return Utc.timestamp_opt(self.creation_time, 0).single();
    }

    #[inline]
    pub fn signature(&self) -> u32 {
        return self.signature;
    }

    #[inline]
    pub fn default_fit(&self) -> FitStrategy {
        return self.default_fit;
    }

    #[inline]
    pub fn slots(&self) -> &[PartitionSlot; PARTITION_SLOTS] {
        return &self.slots;
    }

    /// Callers must call `set_checksum` before the record is encoded again.
    #[inline]
    pub fn slots_mut(&mut self) -> &mut [PartitionSlot; PARTITION_SLOTS] {
        return &mut self.slots;
    }

    pub fn active_count(&self) -> usize {
        return self.slots.iter().filter(|s| s.is_active()).count();
    }

    pub fn extended_slot(&self) -> Option<(usize, &PartitionSlot)> {
        return self.slots.iter().enumerate().find(|(_, s)| s.is_extended());
    }

    pub fn slot_index_by_name(&self, name: &PartitionName) -> Option<usize> {
        return self
            .slots
            .iter()
            .position(|s| s.is_active() && s.name() == name);
    }

    /// The first byte that may belong to a partition.
    pub fn first_usable_byte() -> u64 {
        return Self::size();
    }

    // At most one extended slot, every active slot inside the disk, no two active slots overlapping.
    fn slots_are_consistent(&self) -> bool {
        if self.slots.iter().filter(|s| s.is_extended()).count() > 1 {
            return false;
        }

        let active: Vec<&PartitionSlot> = self.slots.iter().filter(|s| s.is_active()).collect();

        for (i, slot) in active.iter().enumerate() {
            if slot.start() < Self::first_usable_byte() || slot.end() > self.total_size {
                return false;
            }

            for other in active.iter().skip(i + 1) {
                if slot.start() < other.end() && other.start() < slot.end() {
                    return false;
                }
            }
        }

        return true;
    }
}

impl ByteSerializable for BootRecord {
    type BytesArrayType = [u8; 192];

    fn to_bytes(&self) -> Self::BytesArrayType {
        let mut bytes = [0u8; 192];
        let mut offset = 0;

        LittleEndian::write_u32(&mut bytes[offset..], self.magic);
        offset += 4;

        LittleEndian::write_u64(&mut bytes[offset..], self.total_size);
        offset += 8;
        LittleEndian::write_i64(&mut bytes[offset..], self.creation_time);
        offset += 8;
        LittleEndian::write_u32(&mut bytes[offset..], self.signature);
        offset += 4;

        bytes[offset] = self.default_fit.as_u8();
        offset += 1;

        bytes[offset] = self.checksum;
        //offset += 1;

        // bytes 26 - 31 are reserved

        let mut offset = SLOTS_OFFSET;
        let slot_size = PARTITION_SLOT_SIZE as usize;

        for slot in self.slots.iter() {
            bytes[offset..offset + slot_size].copy_from_slice(&slot.to_bytes());
            offset += slot_size;
        }

        return bytes;
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self>
    where
        Self: core::marker::Sized,
    {
        if bytes.len() < 192 {
            return None;
        }

        let mut offset = 0;

        let magic = LittleEndian::read_u32(&bytes[offset..]);
        offset += 4;

        if magic & 0xffff_ff00 != MAGIC {
            return None;
        }

        let total_size = LittleEndian::read_u64(&bytes[offset..]);
        offset += 8;
        let creation_time = LittleEndian::read_i64(&bytes[offset..]);
        offset += 8;
        let signature = LittleEndian::read_u32(&bytes[offset..]);
        offset += 4;

        let default_fit = FitStrategy::from_u8(bytes[offset])?;
        offset += 1;

        let checksum = bytes[offset];

        let mut slots = [PartitionSlot::empty(); PARTITION_SLOTS];
        let slot_size = PARTITION_SLOT_SIZE as usize;
        let mut offset = SLOTS_OFFSET;

        for slot in slots.iter_mut() {
            *slot = PartitionSlot::from_bytes(&bytes[offset..offset + slot_size])?;
            offset += slot_size;
        }

        let res = Self {
            magic,
            total_size,
            creation_time,
            signature,
            default_fit,
            checksum,
            reserved: [0u8; 6],
            slots,
        };

        if res.perform_checksum() && res.slots_are_consistent() {
            return Some(res);
        } else {
            return None;
        }
    }

    fn generic_bytes_rep(bytes: &Self::BytesArrayType) -> &[u8] {
        return bytes;
    }

    fn size() -> u64 {
        return 192;
    }
}

impl Checksum for BootRecord {
    fn set_checksum(&mut self) {
        self.checksum = 0;
        self.checksum = self.calculate_checksum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PartitionKind;

    fn creation_time() -> DateTime<Utc> {
        return Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    }

    #[test]
    fn create_new() {
        let record = BootRecord::new(1_048_576, creation_time(), 0xdead_beef, FitStrategy::FirstFit);

        assert_eq!(record.total_size(), 1_048_576);
        assert_eq!(record.creation_time(), 1_700_000_000);
        assert_eq!(record.creation_date(), Some(creation_time()));
        assert_eq!(record.signature(), 0xdead_beef);
        assert_eq!(record.active_count(), 0);
        assert!(record.extended_slot().is_none());
        assert!(record.perform_checksum());
    }

    #[test]
    fn test_to_bytes() {
        let record = BootRecord::new(1_048_576, creation_time(), 0x0102_0304, FitStrategy::WorstFit);
        let bytes = record.to_bytes();

        // Magic
        assert_eq!(&bytes[0..4], &[0x00, 0x4b, 0x44, 0x56]);
        // Total size
        assert_eq!(&bytes[4..12], &[0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);
        // Signature
        assert_eq!(&bytes[20..24], &[0x04, 0x03, 0x02, 0x01]);
        // Default fit
        assert_eq!(bytes[24], b'W');
        // Empty slots
        assert_eq!(bytes[32..].to_vec(), vec![0u8; 160]);

        let sum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_round_trip_with_partitions() {
        let mut record = BootRecord::new(4_000_000, creation_time(), 77, FitStrategy::BestFit);

        record.slots_mut()[1] = PartitionSlot::new(
            PartitionKind::Primary,
            FitStrategy::FirstFit,
            192,
            1000,
            PartitionName::new("boot").unwrap(),
        );
        record.slots_mut()[3] = PartitionSlot::new(
            PartitionKind::Extended,
            FitStrategy::WorstFit,
            1192,
            200_000,
            PartitionName::new("extended-area").unwrap(),
        );
        record.set_checksum();

        let decoded = BootRecord::from_bytes(&record.to_bytes()).unwrap();

        assert_eq!(decoded, record);
        assert_eq!(decoded.active_count(), 2);
        assert_eq!(decoded.extended_slot().unwrap().0, 3);
        assert_eq!(
            decoded.slot_index_by_name(&PartitionName::new("boot").unwrap()),
            Some(1)
        );
    }

    #[test]
    fn test_stale_checksum_is_rejected() {
        let mut record = BootRecord::new(4096, creation_time(), 1, FitStrategy::FirstFit);

        record.slots_mut()[0] = PartitionSlot::new(
            PartitionKind::Primary,
            FitStrategy::FirstFit,
            192,
            10,
            PartitionName::new("a").unwrap(),
        );

        assert!(BootRecord::from_bytes(&record.to_bytes()).is_none());
    }

    fn slot(kind: PartitionKind, start: u64, size: u64, name: &str) -> PartitionSlot {
        return PartitionSlot::new(
            kind,
            FitStrategy::FirstFit,
            start,
            size,
            PartitionName::new(name).unwrap(),
        );
    }

    #[test]
    fn test_two_extended_slots_are_rejected() {
        let mut record = BootRecord::new(100_000, creation_time(), 1, FitStrategy::FirstFit);

        record.slots_mut()[0] = slot(PartitionKind::Extended, 192, 1000, "e1");
        record.slots_mut()[1] = slot(PartitionKind::Extended, 2000, 1000, "e2");
        record.set_checksum();

        assert!(BootRecord::from_bytes(&record.to_bytes()).is_none());
    }

    #[test]
    fn test_slot_past_the_end_is_rejected() {
        let mut record = BootRecord::new(4096, creation_time(), 1, FitStrategy::FirstFit);

        record.slots_mut()[0] = slot(PartitionKind::Primary, 192, 4000, "big");
        record.set_checksum();

        assert!(BootRecord::from_bytes(&record.to_bytes()).is_none());
    }

    #[test]
    fn test_overlapping_slots_are_rejected() {
        let mut record = BootRecord::new(100_000, creation_time(), 1, FitStrategy::FirstFit);

        record.slots_mut()[0] = slot(PartitionKind::Primary, 192, 1000, "a");
        record.slots_mut()[2] = slot(PartitionKind::Primary, 1000, 1000, "b");
        record.set_checksum();

        assert!(BootRecord::from_bytes(&record.to_bytes()).is_none());
    }

    #[test]
    fn test_slot_over_the_boot_record_is_rejected() {
        let mut record = BootRecord::new(100_000, creation_time(), 1, FitStrategy::FirstFit);

        record.slots_mut()[0] = slot(PartitionKind::Primary, 100, 1000, "a");
        record.set_checksum();

        assert!(BootRecord::from_bytes(&record.to_bytes()).is_none());
    }

    #[test]
    fn test_zeroed_bytes_are_rejected() {
        assert!(BootRecord::from_bytes(&[0u8; 192]).is_none());
    }

    #[test]
    fn test_truncated() {
        let record = BootRecord::new(4096, creation_time(), 1, FitStrategy::FirstFit);
        assert!(BootRecord::from_bytes(&record.to_bytes()[..191]).is_none());
    }
}
