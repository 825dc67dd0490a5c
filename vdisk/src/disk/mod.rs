// Disk layout:
// boot record (192 bytes, 4 partition slots), then primary and extended partitions in table order.
// An extended partition begins with the head of its descriptor chain; each descriptor is followed
// directly by the logical partition it describes.

mod allocator;
mod disk;
mod disk_blocks;
mod disk_info;
mod partition_info;
mod partition_kind;
pub mod disk_handler;

pub use allocator::{candidate_extents, choose_slot, Extent};
pub use disk::{DescriptorLink, Disk};
pub use disk_blocks::{
    BootRecord, ExtendedDescriptor, PartitionName, PartitionSlot, DESCRIPTOR_SIZE,
    NO_NEXT_DESCRIPTOR, PARTITION_NAME_LENGTH, PARTITION_SLOTS, PARTITION_SLOT_SIZE,
};
pub use disk_handler::DiskHandler;
pub use disk_info::DiskInfo;
pub use partition_info::PartitionInfo;
pub use partition_kind::{FitStrategy, PartitionKind};
