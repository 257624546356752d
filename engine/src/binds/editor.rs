//! Profile Editor
//!
//! The mutation path used by the binding screens. Every edit goes through
//! `ensure_writable`: when the active profile is read-only it is first forked
//! into "<name> (Custom)" (or "(Custom 2)", ...), which becomes active. Each
//! successful edit is saved and the active pointer rewritten.
//!
//! Failures never touch the stored data; they surface as a short-lived
//! [`Toast`].

use super::profile::{BindSlot, BindingProfile};
use super::store::{MAX_PROFILE_NAME_LEN, ProfileError, ProfileInfo, ProfileStore};
use super::{ActionId, BindsActionType};
use crate::input::EncodedBinding;

/// Seconds a toast stays visible.
pub const TOAST_DURATION: f32 = 3.0;

/// A short status message for the binding screens.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub is_error: bool,
    /// Seconds left before it disappears.
    pub remaining: f32,
}

/// Active profile plus its backing store.
pub struct BindingProfiles<S: ProfileStore> {
    store: S,
    default_name: String,
    active: BindingProfile,
    toast: Option<Toast>,
}

impl<S: ProfileStore> BindingProfiles<S> {
    /// Install `bundled` as the read-only default and load the profile the
    /// store last marked active, falling back to the default.
    pub fn open(mut store: S, mut bundled: BindingProfile) -> Self {
        bundled.read_only = true;
        if let Err(e) = store.save_profile(&bundled, true) {
            log::warn!("could not store default profile \"{}\": {e}", bundled.name);
        }

        let active = store
            .active_name()
            .and_then(|name| match store.load_profile(&name) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    log::warn!("active profile \"{name}\" unavailable: {e}");
                    None
                }
            })
            .unwrap_or_else(|| bundled.clone());
        log::info!("binding profile \"{}\" active", active.name);

        Self {
            store,
            default_name: bundled.name,
            active,
            toast: None,
        }
    }

    pub fn active(&self) -> &BindingProfile {
        &self.active
    }

    pub fn active_name(&self) -> &str {
        &self.active.name
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> Vec<ProfileInfo> {
        self.store.list_profiles()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Age the current toast.
    pub fn tick(&mut self, dt: f32) {
        if let Some(toast) = self.toast.as_mut() {
            toast.remaining -= dt;
            if toast.remaining <= 0.0 {
                self.toast = None;
            }
        }
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            is_error: false,
            remaining: TOAST_DURATION,
        });
    }

    fn report<T>(&mut self, result: Result<T, ProfileError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("profile operation failed: {e}");
                self.toast = Some(Toast {
                    text: e.to_string(),
                    is_error: true,
                    remaining: TOAST_DURATION,
                });
                None
            }
        }
    }

    /// First free name of the form "<base> (<tag>)", "<base> (<tag> 2)", ...
    fn unique_name(&self, base: &str, tag: &str) -> String {
        let taken = self.store.list_profiles();
        let mut n = 1;
        loop {
            let suffix = if n == 1 {
                format!(" ({tag})")
            } else {
                format!(" ({tag} {n})")
            };
            let room = MAX_PROFILE_NAME_LEN.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(room).collect();
            let candidate = format!("{}{suffix}", stem.trim_end());
            if !taken.iter().any(|p| p.name == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Store `profile` as a new writable profile and make it active.
    fn adopt(&mut self, mut profile: BindingProfile) -> Result<(), ProfileError> {
        profile.read_only = false;
        self.store.save_profile(&profile, false)?;
        self.store.set_active_name(&profile.name)?;
        self.active = profile;
        Ok(())
    }

    fn ensure_writable(&mut self) -> Result<(), ProfileError> {
        if !self.active.read_only {
            return Ok(());
        }
        let mut fork = self.active.clone();
        fork.name = self.unique_name(&self.active.name, "Custom");
        log::debug!("forking \"{}\" into \"{}\"", self.active.name, fork.name);
        self.adopt(fork)
    }

    /// Apply `edit` to a copy of the writable active profile and persist it.
    fn edit<T>(&mut self, edit: impl FnOnce(&mut BindingProfile) -> T) -> Result<T, ProfileError> {
        self.ensure_writable()?;
        let mut next = self.active.clone();
        let out = edit(&mut next);
        self.store.save_profile(&next, false)?;
        self.store.set_active_name(&next.name)?;
        self.active = next;
        Ok(out)
    }

    /// Map `code` to `action`, replacing an existing pair or appending.
    pub fn set_binding(
        &mut self,
        ty: BindsActionType,
        action: ActionId,
        code: EncodedBinding,
        slot: BindSlot,
    ) -> bool {
        let result = self.edit(|p| p.set_binding(ty, action, code, slot));
        self.report(result).is_some()
    }

    /// Remove the pair at `index` of the type's list.
    pub fn remove_binding(&mut self, ty: BindsActionType, index: usize) -> bool {
        if index >= self.active.pairs(ty).len() {
            return false;
        }
        let result = self.edit(|p| p.remove_binding(ty, index));
        self.report(result).flatten().is_some()
    }

    /// Drop every mapping of `action`.
    pub fn clear_action(&mut self, ty: BindsActionType, action: ActionId) -> bool {
        if self.active.codes_for(ty, action).next().is_none() {
            return false;
        }
        let result = self.edit(|p| p.clear_action(ty, action));
        self.report(result).is_some()
    }

    /// Create a writable copy of the default profile named `name` and
    /// activate it.
    pub fn create_profile(&mut self, name: &str) -> bool {
        let result = self.create_from_default(name);
        let ok = self.report(result).is_some();
        if ok {
            self.notify(format!("Created \"{name}\""));
        }
        ok
    }

    fn create_from_default(&mut self, name: &str) -> Result<(), ProfileError> {
        if self.store.contains(name) {
            return Err(ProfileError::NameTaken(name.to_string()));
        }
        let mut profile = self.store.load_profile(&self.default_name)?;
        profile.name = name.to_string();
        self.adopt(profile)
    }

    /// Copy the active profile under a fresh name and activate the copy.
    pub fn duplicate_active(&mut self) -> bool {
        let mut copy = self.active.clone();
        copy.name = self.unique_name(&self.active.name, "Copy");
        let name = copy.name.clone();
        let result = self.adopt(copy);
        let ok = self.report(result).is_some();
        if ok {
            self.notify(format!("Created \"{name}\""));
        }
        ok
    }

    pub fn rename_profile(&mut self, old: &str, new: &str) -> bool {
        let result = self.store.rename_profile(old, new);
        let ok = self.report(result).is_some();
        if ok && self.active.name == old {
            self.active.name = new.to_string();
        }
        ok
    }

    pub fn delete_profile(&mut self, name: &str) -> bool {
        let result = if name == self.active.name {
            Err(ProfileError::InUse(name.to_string()))
        } else {
            self.store.delete_profile(name)
        };
        let ok = self.report(result).is_some();
        if ok {
            self.notify(format!("Deleted \"{name}\""));
        }
        ok
    }

    pub fn activate(&mut self, name: &str) -> bool {
        if name == self.active.name {
            return true;
        }
        let result = self.store.load_profile(name).and_then(|profile| {
            self.store.set_active_name(name)?;
            Ok(profile)
        });
        match self.report(result) {
            Some(profile) => {
                log::info!("binding profile \"{name}\" active");
                self.active = profile;
                true
            }
            None => false,
        }
    }

    /// Activate the profile `step` places away in store order, wrapping.
    pub fn cycle_active(&mut self, step: i32) -> bool {
        let names: Vec<String> = self.list().into_iter().map(|p| p.name).collect();
        if names.len() < 2 {
            return false;
        }
        let current = names.iter().position(|n| *n == self.active.name).unwrap_or(0) as i32;
        let next = (current + step).rem_euclid(names.len() as i32) as usize;
        self.activate(&names[next])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binds::store::{MAX_PROFILES, MemoryProfileStore};

    fn bundled() -> BindingProfile {
        let mut p = BindingProfile::new("Default");
        p.set_binding(BindsActionType::Button, ActionId(1), EncodedBinding::from_raw(7), BindSlot::Append);
        p
    }

    fn open() -> BindingProfiles<MemoryProfileStore> {
        BindingProfiles::open(MemoryProfileStore::new(), bundled())
    }

    #[test]
    fn test_edit_forks_read_only_default() {
        let mut profiles = open();
        assert!(profiles.active().read_only);

        assert!(profiles.set_binding(
            BindsActionType::Button,
            ActionId(5),
            EncodedBinding::from_raw(42),
            BindSlot::Append,
        ));

        assert_eq!(profiles.active_name(), "Default (Custom)");
        assert!(!profiles.active().read_only);
        assert_eq!(profiles.store().active_name().as_deref(), Some("Default (Custom)"));
        let stored = profiles.store().load_profile("Default (Custom)").unwrap();
        assert!(stored.buttons.contains(&crate::binds::BindingPair::new(
            EncodedBinding::from_raw(42),
            ActionId(5)
        )));
        let default = profiles.store().load_profile("Default").unwrap();
        assert_eq!(default.codes_for(BindsActionType::Button, ActionId(5)).count(), 0);
    }

    #[test]
    fn test_second_fork_gets_numbered_name() {
        let mut profiles = open();
        profiles.set_binding(BindsActionType::Button, ActionId(2), EncodedBinding::from_raw(8), BindSlot::Append);
        assert!(profiles.activate("Default"));
        profiles.set_binding(BindsActionType::Button, ActionId(2), EncodedBinding::from_raw(9), BindSlot::Append);
        assert_eq!(profiles.active_name(), "Default (Custom 2)");
    }

    #[test]
    fn test_writable_profile_edited_in_place() {
        let mut profiles = open();
        profiles.set_binding(BindsActionType::Button, ActionId(2), EncodedBinding::from_raw(8), BindSlot::Append);
        let count = profiles.list().len();
        profiles.set_binding(BindsActionType::Button, ActionId(2), EncodedBinding::from_raw(9), BindSlot::Replace(1));
        assert_eq!(profiles.list().len(), count);
        assert_eq!(profiles.active().buttons[1].code, EncodedBinding::from_raw(9));
    }

    #[test]
    fn test_cannot_delete_active_or_default() {
        let mut profiles = open();
        assert!(!profiles.delete_profile("Default"));
        assert!(profiles.toast().is_some_and(|t| t.is_error));

        profiles.duplicate_active();
        let copy = profiles.active_name().to_string();
        assert!(!profiles.delete_profile(&copy));
        assert!(profiles.store().contains(&copy));

        assert!(profiles.activate("Default"));
        assert!(profiles.delete_profile(&copy));
    }

    #[test]
    fn test_toast_expires() {
        let mut profiles = open();
        profiles.rename_profile("Default", "Mine");
        assert!(profiles.toast().is_some());
        profiles.tick(TOAST_DURATION * 0.5);
        assert!(profiles.toast().is_some());
        profiles.tick(TOAST_DURATION);
        assert!(profiles.toast().is_none());
    }

    #[test]
    fn test_limit_blocks_fork_and_leaves_default() {
        let mut store = MemoryProfileStore::new();
        for i in 0..MAX_PROFILES - 1 {
            store.save_profile(&BindingProfile::new(format!("P{i}")), false).unwrap();
        }
        let mut profiles = BindingProfiles::open(store, bundled());
        assert!(!profiles.set_binding(
            BindsActionType::Button,
            ActionId(3),
            EncodedBinding::from_raw(5),
            BindSlot::Append,
        ));
        assert_eq!(profiles.active_name(), "Default");
        assert_eq!(profiles.active().buttons.len(), 1);
    }

    #[test]
    fn test_reopen_restores_active() {
        let mut profiles = open();
        profiles.create_profile("Racing");
        let store = profiles.store().clone();
        let reopened = BindingProfiles::open(store, bundled());
        assert_eq!(reopened.active_name(), "Racing");
    }

    #[test]
    fn test_cycle_active_wraps() {
        let mut profiles = open();
        profiles.create_profile("A");
        assert!(profiles.cycle_active(1));
        assert_eq!(profiles.active_name(), "Default");
        assert!(profiles.cycle_active(-1));
        assert_eq!(profiles.active_name(), "A");
    }
}
