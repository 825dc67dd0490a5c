use crate::error::ImageError;
use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use vdisk::DiskHandler;

// Zeroes are written in chunks of this many bytes.
const ZERO_CHUNK_SIZE: u64 = 64 * 1024;

/// A disk image stored as a plain file on the host.
pub struct Handler {
    file: RefCell<File>,
}

impl Handler {
    /// This will create a new file of the specified size, filled with zeroes. Fails if the file exists.
    pub fn new_create(path: &Path, size: u64) -> Result<Self, ImageError> {
        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(f) => f,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to create {}. Error: {}",
                    path.display(),
                    e
                )))
            }
        };

        let mut handler = Self {
            file: RefCell::new(file),
        };

        if let Err(e) = handler.reserve(size) {
            drop(handler);
            let _ = std::fs::remove_file(path);
            return Err(e);
        }

        return Ok(handler);
    }

    // Grows the new file to `size` bytes and zero fills it.
    fn reserve(&mut self, size: u64) -> Result<(), ImageError> {
        if let Err(e) = self.file.borrow().set_len(size) {
            return Err(ImageError::new(&format!(
                "Failed to resize the image to {} bytes. Error: {}",
                size, e
            )));
        }

        return self.write_zeroes(0, size);
    }

    /// Opens an existing image for reading and writing.
    pub fn new(path: &Path) -> Result<Self, ImageError> {
        let file = match OpenOptions::new().read(true).write(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Failed to open file {}. Error: {}",
                    path.display(),
                    e
                )))
            }
        };

        return Ok(Self {
            file: RefCell::new(file),
        });
    }

    fn seek(&self, location: u64) -> Result<(), ImageError> {
        return match self.file.borrow_mut().seek(SeekFrom::Start(location)) {
            Ok(_) => Ok(()),
            Err(e) => Err(ImageError::new(&format!(
                "Failed to seek to location: {}. Error: {}",
                location, e
            ))),
        };
    }

    fn write_zeroes(&mut self, start: u64, end: u64) -> Result<(), ImageError> {
        self.seek(start)?;

        let chunk = vec![0u8; ZERO_CHUNK_SIZE.min(end.saturating_sub(start)) as usize];
        let mut position = start;
        let mut file = self.file.borrow_mut();

        while position < end {
            let amount = (end - position).min(chunk.len() as u64) as usize;

            match file.write_all(&chunk[..amount]) {
                Ok(_) => (),
                Err(e) => {
                    return Err(ImageError::new(&format!(
                        "Failed to write null bytes. Error: {}",
                        e
                    )))
                }
            }

            position += amount as u64;
        }

        match file.flush() {
            Ok(_) => (),
            Err(e) => return Err(ImageError::new(&format!("Failed to flush. Error: {}", e))),
        }

        return Ok(());
    }

    fn check_bounds(&self, location: u64, amount: u64) -> Result<(), ImageError> {
        let end = match location.checked_add(amount) {
            Some(e) => e,
            None => return Err(ImageError::new("Address overflow")),
        };

        if self.disk_size()? < end {
            return Err(ImageError::new(&format!(
                "File is not large enough to access address: {}",
                end
            )));
        }

        return Ok(());
    }
}

impl DiskHandler<ImageError> for Handler {
    fn write_bytes(&mut self, bytes: &[u8], location: u64) -> Result<(), ImageError> {
        self.check_bounds(location, bytes.len() as u64)?;
        self.seek(location)?;

        let mut file = self.file.borrow_mut();

        match file.write_all(bytes) {
            Ok(_) => (),
            Err(e) => return Err(ImageError::new(&format!("Failed to write bytes. Error: {}", e))),
        }

        match file.flush() {
            Ok(_) => (),
            Err(e) => return Err(ImageError::new(&format!("Failed to flush. Error: {}", e))),
        }

        return Ok(());
    }

    fn read_bytes(&self, location: u64, amount: u64) -> Result<Vec<u8>, ImageError> {
        self.check_bounds(location, amount)?;
        self.seek(location)?;

        let mut result = vec![0u8; amount as usize];
        match self.file.borrow_mut().read_exact(&mut result) {
            Ok(_) => (),
            Err(e) => return Err(ImageError::new(&format!("Failed to read bytes. Error: {}", e))),
        }

        return Ok(result);
    }

    fn zero_range(&mut self, start: u64, end: u64) -> Result<(), ImageError> {
        if end < start {
            return Err(ImageError::new("The end of the range is before its start"));
        }

        self.check_bounds(start, end - start)?;

        return self.write_zeroes(start, end);
    }

    fn disk_size(&self) -> Result<u64, ImageError> {
        let b = self.file.borrow();
        let metadata = match b.metadata() {
            Ok(m) => m,
            Err(e) => {
                return Err(ImageError::new(&format!(
                    "Could not determine file size. Error: {}",
                    e
                )))
            }
        };

        return Ok(metadata.len());
    }
}
