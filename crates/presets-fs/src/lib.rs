//! Filesystem layer for CMake preset documents
//!
//! Provides forward-slash path handling, source root discovery and the
//! file reading capability the preset loader is built on.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod root;

pub use constants::PresetsFile;
pub use error::{Error, Result};
pub use io::{FileReader, FsReader, MemoryReader, read_json};
pub use path::NormalizedPath;
pub use root::SourceRoot;
