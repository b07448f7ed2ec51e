//! FileSystem abstraction for testable page conversion

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{FileSystem, FileType};
pub use real::RealFileSystem;
