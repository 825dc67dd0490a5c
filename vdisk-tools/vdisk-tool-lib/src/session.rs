use crate::{create_parent_directories, expand_path, Handler, ImageError, Manager};
use log::{debug, info};
use std::path::{Path, PathBuf};
use vdisk::{
    Disk, DiskHandler, DiskInfo, FitStrategy, MountEntry, MountId, MountTable, PartitionInfo,
    PartitionKind, VDiskError,
};

/// Number of leading bytes captured by `Session::disk_info`.
pub const DUMP_LENGTH: u64 = 100;

pub type SessionResult<T> = Result<T, VDiskError<ImageError>>;

/// Everything `disk_info` reports about one image.
#[derive(Clone, Debug)]
pub struct DiskDump {
    pub path: PathBuf,
    pub info: DiskInfo,
    /// The first bytes of the image, raw.
    pub leading_bytes: Vec<u8>,
}

/// Runs disk commands against image files on the host. Each command opens the image, does its work
/// and closes it again. Mounts are remembered for as long as the session lives.
#[derive(Debug, Default)]
pub struct Session {
    manager: Manager,
    mounts: MountTable,
}

macro_rules! lift_image_error {
    ($v:expr) => {
        match $v {
            Ok(val) => val,
            Err(e) => return Err(VDiskError::StorageIO(e)),
        }
    };
}

impl Session {
    pub fn new() -> Self {
        return Self {
            manager: Manager::new(),
            mounts: MountTable::new(),
        };
    }

    /// Creates a zero-filled image of `size` bytes and formats it.
    pub fn create_disk(&mut self, size: u64, path: &str, fit: FitStrategy) -> SessionResult<DiskInfo> {
        let path = expand_path(path);

        if size == 0 {
            return Err(VDiskError::InvalidArgument(
                "disk size must be greater than 0".to_string(),
            ));
        }

        if path.exists() {
            return Err(VDiskError::DiskAlreadyExists);
        }

        lift_image_error!(create_parent_directories(&path));
        let mut handler = lift_image_error!(Handler::new_create(&path, size));

        let info = match Disk::<ImageError>::make_new_disk(&mut handler, &mut self.manager, fit) {
            Ok(disk) => disk.info(),
            Err(e) => Err(e),
        };

        if info.is_err() {
            debug!("Removing {} after a failed format", path.display());
            drop(handler);
            let _ = std::fs::remove_file(&path);
        }

        return info;
    }

    /// Removes an image file. Mounts that refer to it are kept.
    pub fn delete_disk(&mut self, path: &str) -> SessionResult<PathBuf> {
        let path = expand_path(path);

        if !path.is_file() {
            return Err(VDiskError::DiskNotFound);
        }

        match std::fs::remove_file(&path) {
            Ok(_) => (),
            Err(e) => {
                return Err(VDiskError::StorageIO(ImageError::new(&format!(
                    "Failed to delete {}. Error: {}",
                    path.display(),
                    e
                ))))
            }
        }

        info!("Deleted disk {}", path.display());

        return Ok(path);
    }

    /// The decoded boot record together with the first `DUMP_LENGTH` bytes of the image.
    pub fn disk_info(&self, path: &str) -> SessionResult<DiskDump> {
        let path = expand_path(path);
        let mut handler = Self::open_handler(&path)?;

        let length = lift_image_error!(handler.disk_size()).min(DUMP_LENGTH);
        let leading_bytes = lift_image_error!(handler.read_bytes(0, length));

        let disk = Disk::<ImageError>::open_disk(&mut handler)?;
        let info = disk.info()?;

        return Ok(DiskDump {
            path,
            info,
            leading_bytes,
        });
    }

    pub fn create_partition(
        &mut self,
        path: &str,
        size: u64,
        kind: PartitionKind,
        fit: Option<FitStrategy>,
        name: &str,
    ) -> SessionResult<PartitionInfo> {
        let path = expand_path(path);
        let mut handler = Self::open_handler(&path)?;
        let mut disk = Disk::<ImageError>::open_disk(&mut handler)?;

        return disk.create_partition(kind, size, fit, name);
    }

    pub fn delete_partition(&mut self, path: &str, name: &str) -> SessionResult<PartitionInfo> {
        let path = expand_path(path);
        let mut handler = Self::open_handler(&path)?;
        let mut disk = Disk::<ImageError>::open_disk(&mut handler)?;

        return disk.delete_partition(name);
    }

    pub fn mount(&mut self, path: &str, name: &str) -> SessionResult<MountId> {
        let path = expand_path(path);
        let mut handler = Self::open_handler(&path)?;
        let disk = Disk::<ImageError>::open_disk(&mut handler)?;

        return self.mounts.mount(&path.to_string_lossy(), &disk, name);
    }

    /// Mounts in the order they were made.
    pub fn list_mounts(&self) -> &[MountEntry] {
        return self.mounts.list();
    }

    pub fn find_mount(&self, id: &str) -> Option<&MountEntry> {
        return self.mounts.get(id);
    }

    fn open_handler(path: &Path) -> SessionResult<Handler> {
        if !path.is_file() {
            return Err(VDiskError::DiskNotFound);
        }

        return Ok(lift_image_error!(Handler::new(path)));
    }
}
