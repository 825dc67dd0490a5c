use std::fmt::Formatter;
use vdisk::VDiskErrorConvertible;

/// Failure of the host file backing a disk image.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ImageError {
    message: String,
}

impl ImageError {
    pub fn new(message: &str) -> Self {
        return ImageError {
            message: String::from(message),
        };
    }
}

impl VDiskErrorConvertible for ImageError {}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.message);
    }
}
