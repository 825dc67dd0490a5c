use chrono::DateTime;
use chrono::Utc;
use core::fmt::Debug;

/// Provide OS specific methods
pub trait OSManager: Debug {
    fn current_time(&self) -> DateTime<Utc>;

    /// A fresh value used to tell disks apart. Called once per created disk.
    fn disk_signature(&mut self) -> u32;
}
