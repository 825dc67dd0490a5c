#![allow(dead_code)]

extern crate vdisk;
use chrono::{DateTime, TimeZone, Utc};
use vdisk::{Disk, DiskHandler, FitStrategy, OSManager, VDiskErrorConvertible};

pub const KIB: u64 = 1024;

#[derive(Debug, PartialEq)]
pub struct Error {}

impl VDiskErrorConvertible for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error")
    }
}

pub struct Handler {
    pub disk: Vec<u8>,
}

impl Handler {
    pub fn new(disk_size: usize) -> Self {
        return Self {
            disk: vec![0u8; disk_size],
        };
    }

    pub fn dump_disk(&self) -> Vec<u8> {
        return self.disk.clone();
    }
}

impl DiskHandler<Error> for Handler {
    fn write_bytes(&mut self, bytes: &[u8], location: u64) -> Result<(), Error> {
        let location = location as usize;

        if location + bytes.len() > self.disk.len() {
            return Err(Error {});
        }

        self.disk[location..location + bytes.len()].copy_from_slice(bytes);

        return Ok(());
    }

    fn read_bytes(&self, location: u64, amount: u64) -> Result<Vec<u8>, Error> {
        let location = location as usize;
        let amount = amount as usize;

        if location + amount > self.disk.len() {
            return Err(Error {});
        }

        return Ok(self.disk[location..location + amount].to_vec());
    }

    fn zero_range(&mut self, start: u64, end: u64) -> Result<(), Error> {
        for i in start..end {
            self.disk[i as usize] = 0;
        }

        return Ok(());
    }

    fn disk_size(&self) -> Result<u64, Error> {
        return Ok(self.disk.len() as u64);
    }
}

#[derive(Debug)]
pub struct Manager {
    next_signature: u32,
}

impl Manager {
    pub fn new() -> Self {
        return Self {
            next_signature: 0x5eed,
        };
    }

    pub fn creation_time() -> DateTime<Utc> {
        return Utc.timestamp_opt(1_760_000_000, 0).unwrap();
    }
}

impl OSManager for Manager {
    fn current_time(&self) -> DateTime<Utc> {
        return Self::creation_time();
    }

    fn disk_signature(&mut self) -> u32 {
        self.next_signature += 1;
        return self.next_signature;
    }
}

/// A freshly created disk of `size` bytes using first fit by default.
pub fn new_disk<'a>(handler: &'a mut Handler, manager: &mut Manager) -> Disk<'a, Error> {
    return Disk::<Error>::make_new_disk(handler, manager, FitStrategy::FirstFit).unwrap();
}
