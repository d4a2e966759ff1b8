//! floppa-file - Local directory image source.

mod scan;
mod source;

pub use scan::is_image_file;
pub use source::DirectorySource;
