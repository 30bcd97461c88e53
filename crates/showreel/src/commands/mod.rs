pub mod completion;
pub mod config;
pub mod devices;
pub mod tracks;
