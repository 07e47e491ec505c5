/// Staged, looping GIF output
pub mod animation;
/// Command-line parsing and batch file processing
pub mod cli;
/// Hex color parsing for the background
pub mod color;
/// Defaults, control ranges and output naming
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Source image loading and normalization
pub mod image;
/// Terminal progress display
pub mod progress;
