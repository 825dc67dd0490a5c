mod error;
mod handler;
mod manager;
mod paths;
pub mod report;
mod session;
mod sizes;

pub use error::ImageError;
pub use handler::Handler;
pub use manager::Manager;
pub use paths::{create_parent_directories, expand_path};
pub use session::{DiskDump, Session, SessionResult, DUMP_LENGTH};
pub use sizes::{parse_size, sized_string_to_u64, u64_to_sized_string, SizeUnit};
