use vdisk::VDiskError;
use vdisk_tool_lib::ImageError;

#[derive(Clone, Debug, PartialEq)]
pub struct ShellError {
    message: String,
}

impl ShellError {
    pub fn new(msg: &str) -> Self {
        return Self {
            message: msg.to_string(),
        };
    }

    pub fn message(&self) -> &str {
        return &self.message;
    }
}

impl From<VDiskError<ImageError>> for ShellError {
    fn from(e: VDiskError<ImageError>) -> Self {
        return Self::new(&e.to_string());
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.message);
    }
}
