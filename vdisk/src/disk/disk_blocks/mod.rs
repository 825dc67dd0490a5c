mod boot_record;
mod extended_descriptor;
mod partition_name;
mod partition_slot;

pub use boot_record::{BootRecord, PARTITION_SLOTS};
pub use extended_descriptor::{ExtendedDescriptor, DESCRIPTOR_SIZE, NO_NEXT_DESCRIPTOR};
pub use partition_name::{PartitionName, PARTITION_NAME_LENGTH};
pub use partition_slot::{PartitionSlot, PARTITION_SLOT_SIZE};
