//! Binds Module
//!
//! Logical game actions and the user-editable profiles that map physical
//! inputs onto them.
//!
//! Actions come in three shapes ([`BindsActionType`]), each with its own
//! independent table of action ids. A profile holds an ordered list of
//! (input code, action id) pairs per shape; one action may be reached through
//! any number of inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use menu_forge_engine::binds::{ActionId, BindingProfiles, JsonProfileStore, action_down};
//!
//! let store = JsonProfileStore::open("profiles.json")?;
//! let profiles = BindingProfiles::open(store, defaults::default_profile());
//! if action_down(&sampler, profiles.active(), ActionId(3)) {
//!     // Jump
//! }
//! ```

pub mod capture;
pub mod defaults;
pub mod editor;
pub mod labels;
pub mod profile;
pub mod query;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::input::EncodedBinding;

pub use capture::{AnalogCapture, first_moved_axis, first_pressed_input};
pub use defaults::{DEFAULT_PROFILE_NAME, default_profile};
pub use editor::{BindingProfiles, TOAST_DURATION, Toast};
pub use labels::{action_type_name, binding_label};
pub use profile::{BindSlot, BindingProfile};
pub use query::{action_axis_1d, action_axis_2d, action_down};
pub use store::{
    JsonProfileStore, MAX_PROFILE_NAME_LEN, MAX_PROFILES, MemoryProfileStore, ProfileError,
    ProfileInfo, ProfileStore,
};

/// Which of the three mapping tables an action id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindsActionType {
    Button,
    Analog1D,
    Analog2D,
}

impl BindsActionType {
    pub const ALL: [BindsActionType; 3] = [
        BindsActionType::Button,
        BindsActionType::Analog1D,
        BindsActionType::Analog2D,
    ];
}

/// A logical action id, unique only within one [`BindsActionType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u16);

/// One input code mapped to one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingPair {
    pub code: EncodedBinding,
    pub action: ActionId,
}

impl BindingPair {
    pub fn new(code: EncodedBinding, action: ActionId) -> Self {
        Self { code, action }
    }
}
