//! Core traits for image sources.

mod source;

pub use source::ImageSource;
