#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod byte_serializable;
mod checksum_trait;
mod disk;
mod manager;
mod mount;
mod vdisk_error;

pub use byte_serializable::ByteSerializable;
pub use checksum_trait::Checksum;
pub use disk::*;
pub use manager::OSManager;
pub use mount::{MountEntry, MountId, MountTable};
pub use vdisk_error::{VDiskError, VDiskErrorConvertible};
