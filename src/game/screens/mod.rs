//! Controls Screens
//!
//! The menus a player uses to tune input: a root screen with the deadzone,
//! invert-look and active-profile settings, a paged bindings list, and the
//! profile manager.

pub mod binds;
pub mod controls;
pub mod profiles;

use crate::binds::ProfileStore;
use crate::menu::{CommandId, MenuScreenDef, MenuSystem, ScreenId, ScreenStateOps};

use super::state::ControlsGame;

pub use binds::{BINDS_ROWS_PER_PAGE, BindsScreen, BindsState};
pub use controls::ControlsScreen;
pub use profiles::{ProfilesScreen, ProfilesState};

pub const CONTROLS_SCREEN: ScreenId = ScreenId(1);
pub const BINDS_SCREEN: ScreenId = ScreenId(2);
pub const PROFILES_SCREEN: ScreenId = ScreenId(3);

/// Ids of the commands the controls screens reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsCommands {
    pub apply_settings: CommandId,
    pub cycle_profile: CommandId,
    pub binds_type: CommandId,
    pub binds_page: CommandId,
    pub rebind: CommandId,
    pub clear_action: CommandId,
    pub select_profile: CommandId,
    pub activate_profile: CommandId,
    pub duplicate_profile: CommandId,
    pub rename_profile: CommandId,
    pub delete_profile: CommandId,
}

/// Register the controls screens and their commands. Push
/// [`CONTROLS_SCREEN`] to open the menu.
pub fn register_controls_menu<S: ProfileStore + 'static>(menu: &mut MenuSystem<ControlsGame<S>>) -> ControlsCommands {
    let commands = ControlsCommands {
        apply_settings: menu.register_command("controls.apply_settings", |ctx, _| {
            ctx.game.apply_settings();
        }),
        cycle_profile: menu.register_command("controls.cycle_profile", |ctx, step| {
            ctx.game.profiles.cycle_active(step as i32);
        }),
        binds_type: menu.register_command("binds.type", binds::cycle_type::<S>),
        binds_page: menu.register_command("binds.page", binds::turn_page::<S>),
        rebind: menu.register_command("binds.rebind", binds::rebind::<S>),
        clear_action: menu.register_command("binds.clear", binds::clear_action::<S>),
        select_profile: menu.register_command("profiles.select", profiles::select::<S>),
        activate_profile: menu.register_command("profiles.activate", profiles::activate::<S>),
        duplicate_profile: menu.register_command("profiles.duplicate", |ctx, _| {
            ctx.game.profiles.duplicate_active();
        }),
        rename_profile: menu.register_command("profiles.rename", profiles::rename::<S>),
        delete_profile: menu.register_command("profiles.delete", profiles::delete::<S>),
    };

    menu.register_screen(MenuScreenDef::new(
        CONTROLS_SCREEN,
        "controls",
        "controls",
        ControlsScreen { commands },
    ));
    menu.register_screen(
        MenuScreenDef::new(BINDS_SCREEN, "binds", "binds", BindsScreen { commands })
            .with_state(ScreenStateOps::of::<BindsState>()),
    );
    menu.register_screen(
        MenuScreenDef::new(PROFILES_SCREEN, "profiles", "profiles", ProfilesScreen { commands })
            .with_state(ScreenStateOps::of::<ProfilesState>()),
    );
    commands
}

/// Command payloads carry list indices; negative ones are dropped with a
/// warning.
fn payload_index(payload: i64) -> Option<usize> {
    let index = usize::try_from(payload).ok();
    if index.is_none() {
        log::warn!("ignoring negative index payload {payload}");
    }
    index
}
