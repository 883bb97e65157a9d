pub mod collision;
pub mod countdown;
pub mod ground;
pub mod lens;
pub mod level;
pub mod lives;
pub mod locomotion;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod scene;
pub mod settings;
pub mod trigger;
pub mod ui;
