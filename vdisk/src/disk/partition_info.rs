use super::disk_blocks::{ExtendedDescriptor, PartitionSlot};
use crate::{FitStrategy, PartitionKind};
use alloc::string::{String, ToString};

/// An owned summary of one active partition, wherever it lives on the disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartitionInfo {
    name: String,
    kind: PartitionKind,
    fit: Option<FitStrategy>,
    start: u64,
    size: u64,
}

impl PartitionInfo {
    pub fn new(
        name: &str,
        kind: PartitionKind,
        fit: Option<FitStrategy>,
        start: u64,
        size: u64,
    ) -> Self {
        return Self {
            name: name.to_string(),
            kind,
            fit,
            start,
            size,
        };
    }

    /// None for inactive slots.
    pub fn from_slot(slot: &PartitionSlot) -> Option<Self> {
        if !slot.is_active() {
            return None;
        }

        return Some(Self {
            name: slot.name().as_str().to_string(),
            kind: slot.kind()?,
            fit: slot.fit(),
            start: slot.start(),
            size: slot.size(),
        });
    }

    /// None for inactive descriptors.
    pub fn from_descriptor(descriptor: &ExtendedDescriptor) -> Option<Self> {
        if !descriptor.is_active() {
            return None;
        }

        return Some(Self {
            name: descriptor.name().as_str().to_string(),
            kind: PartitionKind::Logical,
            fit: descriptor.fit(),
            start: descriptor.start(),
            size: descriptor.size(),
        });
    }

    #[inline]
    pub fn name(&self) -> &str {
        return &self.name;
    }

    #[inline]
    pub fn kind(&self) -> PartitionKind {
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

    #[inline]
    pub fn end(&self) -> u64 {
        return self.start.saturating_add(self.size);
    }
}
