use super::allocator::{candidate_extents, choose_slot};
use super::disk_blocks::{
    BootRecord, ExtendedDescriptor, PartitionName, PartitionSlot, DESCRIPTOR_SIZE,
    PARTITION_SLOTS,
};
use super::{DiskHandler, DiskInfo, PartitionInfo};
use crate::{
    ByteSerializable, Checksum, FitStrategy, OSManager, PartitionKind, VDiskError,
    VDiskErrorConvertible,
};
use alloc::string::ToString;
use alloc::vec::Vec;
use log::{debug, info, warn};

/// A descriptor together with the absolute offset it is stored at.
pub type DescriptorLink = (u64, ExtendedDescriptor);

/// A disk image carved into partitions. Nothing is cached: every operation reads the boot record
/// (and the extended chain when needed), validates, and only then writes.
pub struct Disk<'a, E: VDiskErrorConvertible> {
    handler: &'a mut dyn DiskHandler<E>,
}

macro_rules! unwrap_error_vdisk_convertible {
    ($v:expr) => {
        match $v {
            Ok(val) => val,
            Err(e) => return Err(e.into_vdisk_error()),
        }
    };
}

impl<'a, E: VDiskErrorConvertible> Disk<'a, E> {
    /// Writes a fresh boot record with an empty partition table. The handler's whole size becomes the disk size.
    pub fn make_new_disk(
        handler: &'a mut dyn DiskHandler<E>,
        manager: &mut dyn OSManager,
        default_fit: FitStrategy,
    ) -> Result<Self, VDiskError<E>> {
        let disk_size = unwrap_error_vdisk_convertible!(handler.disk_size());

        if disk_size <= BootRecord::size() {
            return Err(VDiskError::InvalidArgument(
                "the disk is too small to hold a boot record".to_string(),
            ));
        }

        let mut record = BootRecord::new(
            disk_size,
            manager.current_time(),
            manager.disk_signature(),
            default_fit,
        );

        unwrap_error_vdisk_convertible!(handler.zero_range(0, BootRecord::size()));

        let mut new_disk = Self { handler };
        new_disk.store_boot_record(&mut record)?;

        info!(
            "Created a disk of {} bytes with signature {} ({})",
            disk_size,
            record.signature(),
            default_fit
        );

        return Ok(new_disk);
    }

    /// Opens an existing disk, checking that the boot record is intact.
    pub fn open_disk(handler: &'a mut dyn DiskHandler<E>) -> Result<Self, VDiskError<E>> {
        let disk = Self { handler };
        let record = disk.boot_record()?;

        let disk_size = unwrap_error_vdisk_convertible!(disk.handler.disk_size());
        if record.total_size() != disk_size {
            return Err(VDiskError::CorruptedBootRecord);
        }

        return Ok(disk);
    }

    /// Reads and decodes the boot record.
    pub fn boot_record(&self) -> Result<BootRecord, VDiskError<E>> {
        let bytes =
            unwrap_error_vdisk_convertible!(self.handler.read_bytes(0, BootRecord::size()));

        return match BootRecord::from_bytes(&bytes) {
            Some(r) => Ok(r),
            None => Err(VDiskError::CorruptedBootRecord),
        };
    }

    pub fn info(&self) -> Result<DiskInfo, VDiskError<E>> {
        let record = self.boot_record()?;
        let logical_partitions = self.logical_partitions_of(&record)?;

        return Ok(DiskInfo::from_boot_record(&record, logical_partitions));
    }

    /// Every active partition: table slots in slot order followed by logical partitions in chain order.
    pub fn partitions(&self) -> Result<Vec<PartitionInfo>, VDiskError<E>> {
        let record = self.boot_record()?;

        let mut result: Vec<PartitionInfo> = record
            .slots()
            .iter()
            .filter_map(PartitionInfo::from_slot)
            .collect();

        result.extend(self.logical_partitions_of(&record)?);

        return Ok(result);
    }

    /// Active logical partitions in chain order. Empty when there is no extended partition.
    pub fn logical_partitions(&self) -> Result<Vec<PartitionInfo>, VDiskError<E>> {
        let record = self.boot_record()?;

        return self.logical_partitions_of(&record);
    }

    /// The raw descriptor chain of the extended partition, head first, including an inactive head.
    pub fn descriptor_chain(&self) -> Result<Vec<DescriptorLink>, VDiskError<E>> {
        let record = self.boot_record()?;

        return match record.extended_slot() {
            Some((_, extended)) => self.walk_chain(extended),
            None => Err(VDiskError::NoExtendedPartition),
        };
    }

    /// Read-only search by name: the partition table first, then the extended chain.
    pub fn find_partition(&self, name: &str) -> Result<Option<PartitionInfo>, VDiskError<E>> {
        let name = match PartitionName::new(name) {
            Some(n) => n,
            None => return Ok(None),
        };

        let record = self.boot_record()?;

        if let Some(index) = record.slot_index_by_name(&name) {
            return Ok(PartitionInfo::from_slot(&record.slots()[index]));
        }

        if let Some((_, extended)) = record.extended_slot() {
            for (_, node) in self.walk_chain(extended)? {
                if node.is_active() && node.name() == &name {
                    return Ok(PartitionInfo::from_descriptor(&node));
                }
            }
        }

        return Ok(None);
    }

    /// Creates a partition. When `fit` is None the disk's default fit is used.
    pub fn create_partition(
        &mut self,
        kind: PartitionKind,
        size: u64,
        fit: Option<FitStrategy>,
        name: &str,
    ) -> Result<PartitionInfo, VDiskError<E>> {
        if size == 0 {
            return Err(VDiskError::InvalidArgument(
                "partition size must be greater than 0".to_string(),
            ));
        }

        let name = match PartitionName::new(name) {
            Some(n) => n,
            None => return Err(VDiskError::InvalidPartitionName),
        };

        return match kind {
            PartitionKind::Logical => self.create_logical(size, fit, name),
            _ => self.create_primary_or_extended(kind, size, fit, name),
        };
    }

    fn create_primary_or_extended(
        &mut self,
        kind: PartitionKind,
        size: u64,
        fit: Option<FitStrategy>,
        name: PartitionName,
    ) -> Result<PartitionInfo, VDiskError<E>> {
        let mut record = self.boot_record()?;

        self.ensure_unique_name(&record, &name)?;

        if record.active_count() >= PARTITION_SLOTS {
            return Err(VDiskError::TableFull);
        }

        if kind == PartitionKind::Extended {
            if record.extended_slot().is_some() {
                return Err(VDiskError::DuplicateExtended);
            }

            if size < DESCRIPTOR_SIZE {
                return Err(VDiskError::InvalidArgument(
                    "an extended partition must be able to hold its first descriptor".to_string(),
                ));
            }
        }

        let fit = fit.unwrap_or(record.default_fit());
        let candidates = candidate_extents(&record);

        debug!(
            "Placing {} bytes for \"{}\" with {}, candidates: {:?}",
            size, name, fit, candidates
        );

        let (index, start) = match choose_slot(fit, &candidates, size) {
            Some(i) => match candidates[i] {
                Some(extent) => (i, extent.start()),
                None => return Err(VDiskError::InsufficientSpace),
            },
            None => return Err(VDiskError::InsufficientSpace),
        };

        record.slots_mut()[index] = PartitionSlot::new(kind, fit, start, size, name);

        if kind == PartitionKind::Extended {
            self.write_descriptor(start, &ExtendedDescriptor::empty())?;
        }

        self.store_boot_record(&mut record)?;

        info!(
            "Created {} partition \"{}\" in slot {} at {} ({} bytes)",
            kind, name, index, start, size
        );

        return Ok(PartitionInfo::new(name.as_str(), kind, Some(fit), start, size));
    }

    fn create_logical(
        &mut self,
        size: u64,
        fit: Option<FitStrategy>,
        name: PartitionName,
    ) -> Result<PartitionInfo, VDiskError<E>> {
        let record = self.boot_record()?;

        let extended = match record.extended_slot() {
            Some((_, slot)) => *slot,
            None => return Err(VDiskError::NoExtendedPartition),
        };

        self.ensure_unique_name(&record, &name)?;

        // Recorded on the descriptor only. Logical partitions are always appended at the tail.
        let fit = fit.unwrap_or(record.default_fit());

        let chain = self.walk_chain(&extended)?;
        let (head_location, head) = match chain.first() {
            Some(link) => *link,
            None => return Err(VDiskError::CorruptedDescriptorChain),
        };

        if !head.is_active() {
            if size > extended.size().saturating_sub(DESCRIPTOR_SIZE) {
                return Err(VDiskError::InsufficientSpace);
            }

            let node = ExtendedDescriptor::new(fit, head_location + DESCRIPTOR_SIZE, size, name);
            self.write_descriptor(head_location, &node)?;

            info!(
                "Created logical partition \"{}\" at {} ({} bytes)",
                name,
                node.start(),
                size
            );

            return Ok(PartitionInfo::new(name.as_str(), PartitionKind::Logical, Some(fit), node.start(), size));
        }

        let (tail_location, mut tail) = match chain.last() {
            Some(link) => *link,
            None => return Err(VDiskError::CorruptedDescriptorChain),
        };

        let descriptor_location = tail.end();
        let available = extended
            .end()
            .saturating_sub(descriptor_location)
            .saturating_sub(DESCRIPTOR_SIZE);

        debug!(
            "Appending \"{}\" after the descriptor at {}, {} bytes available",
            name, tail_location, available
        );

        if available < size {
            return Err(VDiskError::InsufficientSpace);
        }

        let node = ExtendedDescriptor::new(fit, descriptor_location + DESCRIPTOR_SIZE, size, name);
        self.write_descriptor(descriptor_location, &node)?;

        tail.set_next(Some(descriptor_location));
        self.write_descriptor(tail_location, &tail)?;

        info!(
            "Created logical partition \"{}\" at {} ({} bytes)",
            name,
            node.start(),
            size
        );

        return Ok(PartitionInfo::new(name.as_str(), PartitionKind::Logical, Some(fit), node.start(), size));
    }

    /// Removes a partition by name and returns what was removed. The freed bytes are not reclaimed.
    pub fn delete_partition(&mut self, name: &str) -> Result<PartitionInfo, VDiskError<E>> {
        let name = match PartitionName::new(name) {
            Some(n) => n,
            None => return Err(VDiskError::InvalidPartitionName),
        };

        let mut record = self.boot_record()?;

        if let Some(index) = record.slot_index_by_name(&name) {
            let slot = record.slots()[index];

            let removed = match PartitionInfo::from_slot(&slot) {
                Some(p) => p,
                None => return Err(VDiskError::CorruptedBootRecord),
            };

            if slot.is_extended() {
                let dropped = match self.walk_chain(&slot) {
                    Ok(chain) => chain.iter().filter(|(_, n)| n.is_active()).count(),
                    Err(e) => {
                        warn!(
                            "Could not read the logical partitions of \"{}\": {:?}",
                            name, e
                        );
                        0
                    }
                };

                if dropped > 0 {
                    warn!(
                        "Deleting extended partition \"{}\" drops {} logical partition(s)",
                        name, dropped
                    );
                }
            }

            record.slots_mut()[index].clear();
            self.store_boot_record(&mut record)?;

            info!("Deleted partition \"{}\" from slot {}", name, index);

            return Ok(removed);
        }

        let extended = match record.extended_slot() {
            Some((_, slot)) => *slot,
            None => return Err(VDiskError::PartitionNotFound),
        };

        let chain = self.walk_chain(&extended)?;

        let position = match chain
            .iter()
            .position(|(_, n)| n.is_active() && n.name() == &name)
        {
            Some(p) => p,
            None => return Err(VDiskError::PartitionNotFound),
        };

        let (location, node) = chain[position];

        let removed = match PartitionInfo::from_descriptor(&node) {
            Some(p) => p,
            None => return Err(VDiskError::CorruptedDescriptor),
        };

        if position == 0 {
            // The head must stay at the extended partition's first byte, so the successor moves into it.
            let replacement = match node.next() {
                Some(_) => match chain.get(1) {
                    Some((_, successor)) => *successor,
                    None => return Err(VDiskError::CorruptedDescriptorChain),
                },
                None => ExtendedDescriptor::empty(),
            };

            self.write_descriptor(location, &replacement)?;
        } else {
            let (previous_location, mut previous) = chain[position - 1];
            previous.set_next(node.next());
            self.write_descriptor(previous_location, &previous)?;
        }

        info!("Deleted logical partition \"{}\" at {}", name, node.start());

        return Ok(removed);
    }

    fn logical_partitions_of(
        &self,
        record: &BootRecord,
    ) -> Result<Vec<PartitionInfo>, VDiskError<E>> {
        return match record.extended_slot() {
            Some((_, extended)) => Ok(self
                .walk_chain(extended)?
                .iter()
                .filter_map(|(_, node)| PartitionInfo::from_descriptor(node))
                .collect()),
            None => Ok(Vec::new()),
        };
    }

    /// Names are unique across the table and the extended chain.
    fn ensure_unique_name(
        &self,
        record: &BootRecord,
        name: &PartitionName,
    ) -> Result<(), VDiskError<E>> {
        if record.slot_index_by_name(name).is_some() {
            return Err(VDiskError::NameCollision(name.as_str().to_string()));
        }

        if let Some((_, extended)) = record.extended_slot() {
            for (_, node) in self.walk_chain(extended)? {
                if node.is_active() && node.name() == name {
                    return Err(VDiskError::NameCollision(name.as_str().to_string()));
                }
            }
        }

        return Ok(());
    }

    /// Follows the chain from the head. Every descriptor must lie inside the extended partition and the
    /// walk is bounded by how many descriptors could fit, so a cycle is reported instead of looping.
    fn walk_chain(&self, extended: &PartitionSlot) -> Result<Vec<DescriptorLink>, VDiskError<E>> {
        let max_links = extended.size() / DESCRIPTOR_SIZE + 1;

        let mut chain = Vec::new();
        let mut next_location = Some(extended.start());

        while let Some(location) = next_location {
            let inside = location >= extended.start()
                && location.saturating_add(DESCRIPTOR_SIZE) <= extended.end();

            if !inside || chain.len() as u64 >= max_links {
                return Err(VDiskError::CorruptedDescriptorChain);
            }

            let node = self.read_descriptor(location)?;
            next_location = node.next();
            chain.push((location, node));
        }

        return Ok(chain);
    }

    fn read_descriptor(&self, location: u64) -> Result<ExtendedDescriptor, VDiskError<E>> {
        let bytes = unwrap_error_vdisk_convertible!(self
            .handler
            .read_bytes(location, DESCRIPTOR_SIZE));

        return match ExtendedDescriptor::from_bytes(&bytes) {
            Some(d) => Ok(d),
            None => Err(VDiskError::CorruptedDescriptor),
        };
    }

    fn write_descriptor(
        &mut self,
        location: u64,
        descriptor: &ExtendedDescriptor,
    ) -> Result<(), VDiskError<E>> {
        unwrap_error_vdisk_convertible!(self
            .handler
            .write_bytes(&descriptor.to_bytes(), location));

        return Ok(());
    }

    fn store_boot_record(&mut self, record: &mut BootRecord) -> Result<(), VDiskError<E>> {
        record.set_checksum();
        unwrap_error_vdisk_convertible!(self.handler.write_bytes(&record.to_bytes(), 0));

        return Ok(());
    }
}
