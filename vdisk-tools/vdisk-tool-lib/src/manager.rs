use chrono::DateTime;
use chrono::Utc;
use vdisk::OSManager;

#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Eq, Ord, Default)]
pub struct Manager {}

impl Manager {
    pub fn new() -> Self {
        return Self {};
    }
}

impl OSManager for Manager {
    fn current_time(&self) -> DateTime<Utc> {
        return Utc::now();
    }

    fn disk_signature(&mut self) -> u32 {
        return rand::random::<u32>();
    }
}
