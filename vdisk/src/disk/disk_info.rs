use super::allocator::{candidate_extents, Extent};
use super::disk_blocks::{BootRecord, PARTITION_SLOTS};
use super::PartitionInfo;
use crate::FitStrategy;
use alloc::vec::Vec;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiskInfo {
    total_size: u64,
    creation_time: i64,
    signature: u32,
    default_fit: FitStrategy,
    slots: [Option<PartitionInfo>; PARTITION_SLOTS],
    logical_partitions: Vec<PartitionInfo>,
    free_extents: [Option<Extent>; PARTITION_SLOTS],
}

impl DiskInfo {
    pub fn from_boot_record(record: &BootRecord, logical_partitions: Vec<PartitionInfo>) -> Self {
        let slots = record.slots();

        return Self {
            total_size: record.total_size(),
            creation_time: record.creation_time(),
            signature: record.signature(),
            default_fit: record.default_fit(),
            slots: [
                PartitionInfo::from_slot(&slots[0]),
                PartitionInfo::from_slot(&slots[1]),
                PartitionInfo::from_slot(&slots[2]),
                PartitionInfo::from_slot(&slots[3]),
            ],
            logical_partitions,
            free_extents: candidate_extents(record),
        };
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

    #[inline]
    pub fn signature(&self) -> u32 {
        return self.signature;
    }

    #[inline]
    pub fn default_fit(&self) -> FitStrategy {
        return self.default_fit;
    }

    /// The partition table in slot order, None for inactive slots.
    #[inline]
    pub fn slots(&self) -> &[Option<PartitionInfo>; PARTITION_SLOTS] {
        return &self.slots;
    }

    /// Logical partitions in chain order.
    #[inline]
    pub fn logical_partitions(&self) -> &[PartitionInfo] {
        return &self.logical_partitions;
    }

    /// The extent each inactive slot could currently be allocated from.
    #[inline]
    pub fn free_extents(&self) -> &[Option<Extent>; PARTITION_SLOTS] {
        return &self.free_extents;
    }

    /// The largest request a primary or extended partition could currently satisfy.
    pub fn largest_free_extent(&self) -> u64 {
        return self
            .free_extents
            .iter()
            .filter_map(|e| e.map(|e| e.len()))
            .max()
            .unwrap_or(0);
    }

    pub fn active_slot_count(&self) -> usize {
        return self.slots.iter().filter(|s| s.is_some()).count();
    }
}
