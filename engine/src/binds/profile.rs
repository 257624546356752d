//! Binding Profile
//!
//! A named set of mappings, one ordered list per action shape.

use serde::{Deserialize, Serialize};

use super::{ActionId, BindingPair, BindsActionType};
use crate::input::EncodedBinding;

/// Where a new mapping goes when it is written into a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindSlot {
    /// Overwrite the pair at this index of the type's list. An index past the
    /// end appends instead.
    Replace(usize),
    /// Add a new pair at the end of the type's list.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingProfile {
    /// Unique, user-visible name.
    pub name: String,
    /// Bundled profiles are never edited in place.
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub buttons: Vec<BindingPair>,
    #[serde(default)]
    pub analog_1d: Vec<BindingPair>,
    #[serde(default)]
    pub analog_2d: Vec<BindingPair>,
}

impl BindingProfile {
    /// An empty, writable profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_only: false,
            buttons: Vec::new(),
            analog_1d: Vec::new(),
            analog_2d: Vec::new(),
        }
    }

    pub fn pairs(&self, ty: BindsActionType) -> &[BindingPair] {
        match ty {
            BindsActionType::Button => &self.buttons,
            BindsActionType::Analog1D => &self.analog_1d,
            BindsActionType::Analog2D => &self.analog_2d,
        }
    }

    fn pairs_mut(&mut self, ty: BindsActionType) -> &mut Vec<BindingPair> {
        match ty {
            BindsActionType::Button => &mut self.buttons,
            BindsActionType::Analog1D => &mut self.analog_1d,
            BindsActionType::Analog2D => &mut self.analog_2d,
        }
    }

    /// Input codes mapped to `action`, in list order.
    pub fn codes_for(
        &self,
        ty: BindsActionType,
        action: ActionId,
    ) -> impl Iterator<Item = EncodedBinding> + '_ {
        self.pairs(ty)
            .iter()
            .filter(move |p| p.action == action)
            .map(|p| p.code)
    }

    /// List indices of the pairs mapped to `action`.
    pub fn indices_for(&self, ty: BindsActionType, action: ActionId) -> Vec<usize> {
        self.pairs(ty)
            .iter()
            .enumerate()
            .filter(|(_, p)| p.action == action)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn total_bindings(&self) -> usize {
        self.buttons.len() + self.analog_1d.len() + self.analog_2d.len()
    }

    /// Write a mapping. Returns the list index it landed at.
    pub fn set_binding(
        &mut self,
        ty: BindsActionType,
        action: ActionId,
        code: EncodedBinding,
        slot: BindSlot,
    ) -> usize {
        let pairs = self.pairs_mut(ty);
        let pair = BindingPair::new(code, action);
        match slot {
            BindSlot::Replace(index) if index < pairs.len() => {
                pairs[index] = pair;
                index
            }
            _ => {
                pairs.push(pair);
                pairs.len() - 1
            }
        }
    }

    /// Remove the pair at `index`, `None` if out of range.
    pub fn remove_binding(&mut self, ty: BindsActionType, index: usize) -> Option<BindingPair> {
        let pairs = self.pairs_mut(ty);
        (index < pairs.len()).then(|| pairs.remove(index))
    }

    /// Drop every mapping for `action`.
    pub fn clear_action(&mut self, ty: BindsActionType, action: ActionId) -> usize {
        let pairs = self.pairs_mut(ty);
        let before = pairs.len();
        pairs.retain(|p| p.action != action);
        before - pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: u32) -> EncodedBinding {
        EncodedBinding::from_raw(raw)
    }

    #[test]
    fn test_multi_binding_per_action() {
        let mut p = BindingProfile::new("Test");
        p.set_binding(BindsActionType::Button, ActionId(1), code(7), BindSlot::Append);
        p.set_binding(BindsActionType::Button, ActionId(1), code(65), BindSlot::Append);
        p.set_binding(BindsActionType::Button, ActionId(2), code(5), BindSlot::Append);

        let codes: Vec<_> = p.codes_for(BindsActionType::Button, ActionId(1)).collect();
        assert_eq!(codes, vec![code(7), code(65)]);
        assert_eq!(p.indices_for(BindsActionType::Button, ActionId(2)), vec![2]);
        // Tables are independent.
        assert_eq!(p.codes_for(BindsActionType::Analog1D, ActionId(1)).count(), 0);
    }

    #[test]
    fn test_replace_and_out_of_range_replace() {
        let mut p = BindingProfile::new("Test");
        p.set_binding(BindsActionType::Button, ActionId(1), code(7), BindSlot::Append);
        let at = p.set_binding(BindsActionType::Button, ActionId(1), code(8), BindSlot::Replace(0));
        assert_eq!(at, 0);
        assert_eq!(p.buttons, vec![BindingPair::new(code(8), ActionId(1))]);

        let at = p.set_binding(BindsActionType::Button, ActionId(1), code(9), BindSlot::Replace(10));
        assert_eq!(at, 1);
        assert_eq!(p.buttons.len(), 2);
    }

    #[test]
    fn test_remove_binding() {
        let mut p = BindingProfile::new("Test");
        p.set_binding(BindsActionType::Analog2D, ActionId(0), code(1), BindSlot::Append);
        assert!(p.remove_binding(BindsActionType::Analog2D, 3).is_none());
        assert_eq!(
            p.remove_binding(BindsActionType::Analog2D, 0),
            Some(BindingPair::new(code(1), ActionId(0)))
        );
        assert_eq!(p.total_bindings(), 0);
    }

    #[test]
    fn test_json_shape_is_stable() {
        let mut p = BindingProfile::new("Pad");
        p.set_binding(BindsActionType::Button, ActionId(5), code(42), BindSlot::Append);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"code\":42"), "{json}");
        let back: BindingProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        let minimal: BindingProfile = serde_json::from_str(r#"{"name":"Old"}"#).unwrap();
        assert!(!minimal.read_only);
        assert_eq!(minimal.total_bindings(), 0);
    }
}
