//! Menu Forge Engine Library
//!
//! Input binding resolution and a data-driven menu interaction engine.
//! Physical inputs from keyboards, mice and gamepads are packed into
//! compact binding codes, mapped onto logical actions by user-editable
//! profiles, and fed into a stack of menu screens that are rebuilt from
//! plain builder functions.
//!
//! # Modules
//!
//! - [`input`] - Binding encoding, device snapshots, sampling and the winit bridge
//! - [`binds`] - Binding profiles, their persistent store and the edit path
//! - [`menu`] - Widgets, screens, the screen stack and the interaction runtime
//! - [`config`] - JSON-backed tuning for sampling, menus and the render surface
//! - [`geometry`] - Rectangles shared by surface mapping and hit testing
//!
//! # Example
//!
//! ```ignore
//! use menu_forge_engine::binds::JsonProfileStore;
//! use menu_forge_engine::game::{self, ControlsGame, CONTROLS_SCREEN};
//! use menu_forge_engine::input::SnapshotBuilder;
//! use menu_forge_engine::menu::{MenuIo, MenuSystem, NoTextInput, SilentCues};
//!
//! let config = EngineConfig::load("config.json")?;
//! let store = JsonProfileStore::open("profiles.json")?;
//! let mut controls = ControlsGame::new(store, config.input.clone());
//! let mut menu = MenuSystem::new(config.menu.clone());
//! game::register_controls_menu(&mut menu);
//! menu.push_screen(CONTROLS_SCREEN, 0);
//!
//! let layouts = game::bundled_layouts()?;
//! let mut builder = SnapshotBuilder::new();
//! // window events: builder.handle_window_event(&event);
//!
//! // Per frame
//! let input = controls.begin_frame(builder.snapshot());
//! let mut io = MenuIo {
//!     layouts: &layouts,
//!     cues: &mut SilentCues,
//!     text_input: &mut builder,
//! };
//! menu.update(dt, &input, &mut controls, viewport, &mut io);
//! ```

pub mod binds;
pub mod config;
pub mod geometry;
pub mod input;
pub mod menu;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the types most hosts touch
pub use binds::{BindingProfile, BindingProfiles, BindsActionType, JsonProfileStore, ProfileStore};
pub use config::{ConfigError, EngineConfig};
pub use geometry::Rect;
pub use input::{DeviceSampler, DeviceSnapshot, EncodedBinding, SnapshotBuilder};
pub use menu::{MenuIo, MenuSystem};
