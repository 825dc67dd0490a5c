extern crate vdisk;
use vdisk::{
    BootRecord, ByteSerializable, Checksum, Disk, FitStrategy, PartitionKind, PartitionName,
    PartitionSlot, VDiskError,
};

mod common;
use common::*;

#[test]
fn test_create_new_disk() {
    let mut handler = Handler::new((1024 * KIB) as usize);
    let mut manager = Manager::new();

    {
        let disk = Disk::<Error>::make_new_disk(&mut handler, &mut manager, FitStrategy::WorstFit).unwrap();
        let record = disk.boot_record().unwrap();

        assert_eq!(record.total_size(), 1024 * KIB);
        assert_eq!(record.creation_date(), Some(Manager::creation_time()));
        assert_eq!(record.signature(), 0x5eee);
        assert_eq!(record.default_fit(), FitStrategy::WorstFit);
        assert_eq!(record.active_count(), 0);

        for slot in record.slots().iter() {
            assert_eq!(*slot, PartitionSlot::empty());
        }
    }

    let dump = handler.dump_disk();
    let record = BootRecord::from_bytes(&dump[..BootRecord::size() as usize]).unwrap();

    assert_eq!(record.total_size(), 1024 * KIB);
    // Everything past the boot record is still zero.
    assert!(dump[BootRecord::size() as usize..].iter().all(|b| *b == 0));
}

#[test]
fn test_each_disk_gets_a_new_signature() {
    let mut manager = Manager::new();

    let mut first = Handler::new(4096);
    let mut second = Handler::new(4096);

    let a = Disk::<Error>::make_new_disk(&mut first, &mut manager, FitStrategy::FirstFit)
        .unwrap()
        .boot_record()
        .unwrap()
        .signature();
    let b = Disk::<Error>::make_new_disk(&mut second, &mut manager, FitStrategy::FirstFit)
        .unwrap()
        .boot_record()
        .unwrap()
        .signature();

    assert_ne!(a, b);
}

#[test]
fn test_disk_too_small() {
    let mut handler = Handler::new(BootRecord::size() as usize);
    let mut manager = Manager::new();

    match Disk::<Error>::make_new_disk(&mut handler, &mut manager, FitStrategy::FirstFit) {
        Err(VDiskError::InvalidArgument(_)) => (),
        Err(e) => panic!("Unexpected error: {:?}", e),
        Ok(_) => panic!("A disk without room for partitions was created"),
    }
}

#[test]
fn test_open_disk() {
    let mut handler = Handler::new(8192);
    let mut manager = Manager::new();

    new_disk(&mut handler, &mut manager);

    let disk = Disk::<Error>::open_disk(&mut handler).unwrap();
    assert_eq!(disk.boot_record().unwrap().total_size(), 8192);
    assert!(disk.partitions().unwrap().is_empty());
}

#[test]
fn test_open_unformatted_disk() {
    let mut handler = Handler::new(8192);

    match Disk::<Error>::open_disk(&mut handler) {
        Err(VDiskError::CorruptedBootRecord) => (),
        Err(e) => panic!("Unexpected error: {:?}", e),
        Ok(_) => panic!("Opened a disk without a boot record"),
    }
}

#[test]
fn test_open_disk_with_wrong_size() {
    let mut handler = Handler::new(8192);
    let mut manager = Manager::new();

    new_disk(&mut handler, &mut manager);
    handler.disk.truncate(4096);

    match Disk::<Error>::open_disk(&mut handler) {
        Err(VDiskError::CorruptedBootRecord) => (),
        Err(e) => panic!("Unexpected error: {:?}", e),
        Ok(_) => panic!("Opened a disk whose size disagrees with its boot record"),
    }
}

#[test]
fn test_open_disk_with_damaged_boot_record() {
    let mut handler = Handler::new(8192);
    let mut manager = Manager::new();

    new_disk(&mut handler, &mut manager);
    handler.disk[4] ^= 0xff;

    assert!(Disk::<Error>::open_disk(&mut handler).is_err());
}

#[test]
fn test_open_disk_with_inconsistent_partition_table() {
    let mut handler = Handler::new(8192);
    let mut manager = Manager::new();

    new_disk(&mut handler, &mut manager);

    // A checksum-valid record whose only partition runs past the end of the disk.
    let mut record = BootRecord::from_bytes(&handler.disk[..192]).unwrap();
    record.slots_mut()[0] = PartitionSlot::new(
        PartitionKind::Primary,
        FitStrategy::FirstFit,
        192,
        10_000,
        PartitionName::new("P1").unwrap(),
    );
    record.set_checksum();
    handler.disk[..192].copy_from_slice(&record.to_bytes());

    match Disk::<Error>::open_disk(&mut handler) {
        Err(VDiskError::CorruptedBootRecord) => (),
        Err(e) => panic!("Unexpected error: {:?}", e),
        Ok(_) => panic!("Opened a disk with a partition past its end"),
    }
}

#[test]
fn test_disk_info() {
    let mut handler = Handler::new((64 * KIB) as usize);
    let mut manager = Manager::new();

    let disk = new_disk(&mut handler, &mut manager);
    let info = disk.info().unwrap();

    assert_eq!(info.total_size(), 64 * KIB);
    assert_eq!(info.default_fit(), FitStrategy::FirstFit);
    assert_eq!(info.active_slot_count(), 0);
    assert!(info.logical_partitions().is_empty());
    assert_eq!(info.largest_free_extent(), 64 * KIB - BootRecord::size());
}
