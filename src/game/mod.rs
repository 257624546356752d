//! Game Module
//!
//! The controls menus a game ships on top of the engine: gameplay actions
//! and their bundled bindings, the state the menus edit, and the screens.

pub mod actions;
pub mod screens;
pub mod state;

use crate::config::ConfigError;
use crate::menu::LayoutLibrary;

pub use actions::{ACTIONS, ActionInfo, actions_of, bundled_profile};
pub use screens::{
    BINDS_SCREEN, CONTROLS_SCREEN, ControlsCommands, PROFILES_SCREEN, register_controls_menu,
};
pub use state::{ControlsGame, RebindRequest};

/// Layouts for the controls screens.
pub const MENU_LAYOUTS_JSON: &str = include_str!("../../assets/menu_layouts.json");

pub fn bundled_layouts() -> Result<LayoutLibrary, ConfigError> {
    LayoutLibrary::from_json(MENU_LAYOUTS_JSON)
}
