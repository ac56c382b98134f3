pub mod app;
pub mod cpu;
mod error;
pub mod machine;

pub use app::GameBoyApp;
pub use error::{Error, Result};
pub use machine::{GameBoy, MachineConfig};

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
