//! Configuration file parsing for Line Opener
//!
//! Settings live in `config.toml` (see [`settings::config_path`]); every
//! field is optional.

pub mod settings;
pub mod types;

pub use settings::{
    config_path, detect_editor, find_preset, find_preset_for_executable, load_settings,
    read_settings, EditorPreset, CONFIG_PATH_ENV, KNOWN_EDITORS,
};
pub use types::*;
