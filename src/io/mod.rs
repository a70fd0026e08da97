//! Input/output operations, configuration and error handling

/// Command-line parsing, argument validation and run orchestration
pub mod cli;
/// Evolution constants and defaults
pub mod configuration;
/// Error taxonomy for all fatal conditions
pub mod error;
/// Image decoding, trimming and export
pub mod image;
/// Generation progress display
pub mod progress;
