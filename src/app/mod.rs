pub mod display;
pub mod player;
pub mod setup;

pub use display::sync_display_settings;
pub use player::sync_player_settings;
pub use setup::{setup, setup_resources};
