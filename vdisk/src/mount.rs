use crate::{Disk, PartitionInfo, PartitionKind, VDiskError, VDiskErrorConvertible};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use log::info;

const FIRST_DISK_LETTER: u8 = b'a';
const LAST_DISK_LETTER: u8 = b'z';

/// Identifies a mounted partition, rendered as `vd` + disk letter + sequence number, e.g. `vda1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MountId {
    letter: char,
    sequence: u32,
}

impl MountId {
    pub fn new(letter: char, sequence: u32) -> Self {
        return Self { letter, sequence };
    }

    #[inline]
    pub fn letter(&self) -> char {
        return self.letter;
    }

    /// 1-based position of this mount among the mounts of the same disk.
    #[inline]
    pub fn sequence(&self) -> u32 {
        return self.sequence;
    }
}

impl Display for MountId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        return write!(f, "vd{}{}", self.letter, self.sequence);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountEntry {
    id: MountId,
    disk_path: String,
    partition: PartitionInfo,
}

impl MountEntry {
    #[inline]
    pub fn id(&self) -> MountId {
        return self.id;
    }

    #[inline]
    pub fn disk_path(&self) -> &str {
        return &self.disk_path;
    }

    #[inline]
    pub fn partition_name(&self) -> &str {
        return self.partition.name();
    }

    #[inline]
    pub fn kind(&self) -> PartitionKind {
        return self.partition.kind();
    }

    #[inline]
    pub fn start(&self) -> u64 {
        return self.partition.start();
    }

    #[inline]
    pub fn size(&self) -> u64 {
        return self.partition.size();
    }
}

/// Registry of mounted partitions. Lives as long as its owner; nothing is persisted.
#[derive(Clone, Debug, Default)]
pub struct MountTable {
    /// In registration order.
    entries: Vec<MountEntry>,
    /// Letters are handed out on a disk path's first mount and never reassigned.
    disk_letters: BTreeMap<String, char>,
}

impl MountTable {
    pub fn new() -> Self {
        return Self::default();
    }

    /// Mounts the named partition of `disk`, which must be the disk stored at `disk_path`.
    pub fn mount<E: VDiskErrorConvertible>(
        &mut self,
        disk_path: &str,
        disk: &Disk<E>,
        partition_name: &str,
    ) -> Result<MountId, VDiskError<E>> {
        if self.is_mounted(disk_path, partition_name) {
            return Err(VDiskError::AlreadyMounted(partition_name.to_string()));
        }

        let partition = match disk.find_partition(partition_name)? {
            Some(p) => p,
            None => return Err(VDiskError::PartitionNotFound),
        };

        let letter = match self.disk_letters.get(disk_path) {
            Some(l) => *l,
            None => {
                let next = FIRST_DISK_LETTER as usize + self.disk_letters.len();

                if next > LAST_DISK_LETTER as usize {
                    return Err(VDiskError::DiskLettersExhausted);
                }

                next as u8 as char
            }
        };

        let sequence = self
            .entries
            .iter()
            .filter(|e| e.disk_path == disk_path)
            .count() as u32
            + 1;

        let id = MountId::new(letter, sequence);

        self.disk_letters.insert(disk_path.to_string(), letter);
        self.entries.push(MountEntry {
            id,
            disk_path: disk_path.to_string(),
            partition,
        });

        info!("Mounted \"{}\" of {} as {}", partition_name, disk_path, id);

        return Ok(id);
    }

    pub fn is_mounted(&self, disk_path: &str, partition_name: &str) -> bool {
        return self
            .entries
            .iter()
            .any(|e| e.disk_path == disk_path && e.partition_name() == partition_name);
    }

    /// Entries in the order they were mounted.
    pub fn list(&self) -> &[MountEntry] {
        return &self.entries;
    }

    /// Look up a mount by its rendered id, e.g. `vda1`.
    pub fn get(&self, id: &str) -> Option<&MountEntry> {
        return self.entries.iter().find(|e| e.id.to_string() == id);
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
