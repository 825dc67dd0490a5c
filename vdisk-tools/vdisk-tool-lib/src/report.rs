use crate::{u64_to_sized_string, DiskDump};
use chrono::{TimeZone, Utc};
use std::fmt::Write;
use std::path::Path;
use vdisk::{DiskInfo, MountEntry, MountId, PartitionInfo};

const BYTES_PER_ROW: usize = 16;

/// Rows of `offset  xx xx ...`, 16 bytes each.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut result = String::new();

    for (row, chunk) in bytes.chunks(BYTES_PER_ROW).enumerate() {
        let pairs: Vec<String> = chunk.iter().map(|b| hex::encode([*b])).collect();
        let _ = writeln!(result, "{:08x}  {}", row * BYTES_PER_ROW, pairs.join(" "));
    }

    return result;
}

fn format_time(seconds: i64) -> String {
    return match Utc.timestamp_opt(seconds, 0).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{} (invalid)", seconds),
    };
}

fn partition_line(partition: &PartitionInfo) -> String {
    let fit = match partition.fit() {
        Some(f) => f.short_name(),
        None => "--",
    };

    return format!(
        "{:<16} {:<9} {:<3} {:>12} {:>12} {:>12}",
        partition.name(),
        partition.kind().to_string(),
        fit,
        partition.start(),
        partition.end(),
        partition.size()
    );
}

pub fn disk_created(path: &Path, info: &DiskInfo) -> String {
    return format!(
        "Created disk {} ({} bytes, {}), default fit: {}",
        path.display(),
        info.total_size(),
        u64_to_sized_string(info.total_size()),
        info.default_fit()
    );
}

pub fn disk_deleted(path: &Path) -> String {
    return format!("Deleted disk {}", path.display());
}

pub fn partition_created(partition: &PartitionInfo) -> String {
    return format!(
        "Created {} partition \"{}\" at byte {} ({} bytes)",
        partition.kind(),
        partition.name(),
        partition.start(),
        partition.size()
    );
}

pub fn partition_deleted(partition: &PartitionInfo) -> String {
    return format!(
        "Deleted {} partition \"{}\"",
        partition.kind(),
        partition.name()
    );
}

pub fn mounted(id: MountId, path: &Path, name: &str) -> String {
    return format!("Mounted \"{}\" of {} as {}", name, path.display(), id);
}

pub fn mount_list(entries: &[MountEntry]) -> String {
    if entries.is_empty() {
        return "No partitions are mounted.".to_string();
    }

    let mut result = format!(
        "{:<8} {:<16} {:<9} {:>12} {:>12}  {}\n",
        "ID", "NAME", "KIND", "START", "SIZE", "DISK"
    );

    for entry in entries {
        let _ = writeln!(
            result,
            "{:<8} {:<16} {:<9} {:>12} {:>12}  {}",
            entry.id().to_string(),
            entry.partition_name(),
            entry.kind().to_string(),
            entry.start(),
            entry.size(),
            entry.disk_path()
        );
    }

    return result;
}

pub fn disk_info(dump: &DiskDump) -> String {
    let info = &dump.info;
    let mut result = String::new();

    let _ = writeln!(result, "Disk:        {}", dump.path.display());
    let _ = writeln!(
        result,
        "Size:        {} bytes ({})",
        info.total_size(),
        u64_to_sized_string(info.total_size())
    );
    let _ = writeln!(result, "Created:     {}", format_time(info.creation_time()));
    let _ = writeln!(result, "Signature:   {:#010x}", info.signature());
    let _ = writeln!(result, "Default fit: {}", info.default_fit());
    let _ = writeln!(result, "Largest free extent: {} bytes", info.largest_free_extent());
    let _ = writeln!(result);

    let _ = writeln!(
        result,
        "{:<4} {:<16} {:<9} {:<3} {:>12} {:>12} {:>12}",
        "SLOT", "NAME", "KIND", "FIT", "START", "END", "SIZE"
    );

    for (i, slot) in info.slots().iter().enumerate() {
        match slot {
            Some(p) => {
                let _ = writeln!(result, "{:<4} {}", i, partition_line(p));
            }
            None => {
                let _ = writeln!(result, "{:<4} (free)", i);
            }
        }
    }

    for p in info.logical_partitions() {
        let _ = writeln!(result, "{:<4} {}", "-", partition_line(p));
    }

    let _ = writeln!(result);
    let _ = writeln!(result, "First {} bytes:", dump.leading_bytes.len());
    result.push_str(&hex_dump(&dump.leading_bytes));

    return result;
}
