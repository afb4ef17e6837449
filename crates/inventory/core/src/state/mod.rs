//! Authoritative inventory state.
//!
//! [`InventoryState`] pairs the ordered item storage with the identity index
//! and is the only place items can be removed, so the index never outlives
//! the items it points at. The loadout table sits beside it and is owned by
//! the simulator.
mod collection;
mod identity;
mod loadout;

pub use collection::{ItemCollection, ItemHandle, Iter};
pub use identity::IdentityIndex;
pub use loadout::{Loadout, LoadoutSlot, Team};

use crate::error::{InvariantViolation, fatal};
use crate::item::{Item, ItemId};

/// An item taken out of the inventory.
#[derive(Clone, Debug, PartialEq)]
pub struct Removed {
    pub item: Item,
    /// Identity the item carried at removal time.
    pub item_id: Option<ItemId>,
    /// Successor in display order, for continuing a sequential sweep.
    pub next: Option<ItemHandle>,
}

/// Item collection plus its identity index, mutated in lock-step.
#[derive(Clone, Debug, Default)]
pub struct InventoryState {
    items: ItemCollection,
    ids: IdentityIndex,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &ItemCollection {
        &self.items
    }

    pub fn ids(&self) -> &IdentityIndex {
        &self.ids
    }

    pub fn insert(&mut self, item: Item) -> ItemHandle {
        self.items.push_back(item)
    }

    /// Removes an item and its identity mapping together.
    ///
    /// Returns `None` for stale handles.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<Removed> {
        let (item, next) = self.items.remove(handle)?;
        let item_id = self.ids.remove_handle(handle);
        Some(Removed {
            item,
            item_id,
            next,
        })
    }

    pub fn move_to_back(&mut self, handle: ItemHandle) -> bool {
        self.items.move_to_back(handle)
    }

    /// Assigns an external id to a live item.
    ///
    /// # Panics
    ///
    /// Panics if `handle` no longer references an item.
    pub fn assign_id(&mut self, handle: ItemHandle, id: ItemId) {
        if !self.items.contains(handle) {
            fatal(InvariantViolation::StaleHandle(handle));
        }
        self.ids.assign(handle, id);
    }

    pub fn update_id(&mut self, old: ItemId, new: ItemId) -> bool {
        self.ids.update(old, new)
    }

    pub fn id(&self, handle: ItemHandle) -> Option<ItemId> {
        self.ids.id(handle)
    }

    /// Resolves an external id to a live handle.
    ///
    /// # Panics
    ///
    /// Panics if the index maps `id` to an item that is gone.
    pub fn resolve(&self, id: ItemId) -> Option<ItemHandle> {
        let handle = self.ids.handle(id)?;
        if !self.items.contains(handle) {
            fatal(InvariantViolation::DanglingIdentity(id));
        }
        Some(handle)
    }

    pub fn resolve_item(&self, id: ItemId) -> Option<(ItemHandle, &Item)> {
        let handle = self.resolve(id)?;
        self.items.get(handle).map(|item| (handle, item))
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&Item> {
        self.items.get(handle)
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut Item> {
        self.items.get_mut(handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    /// Verifies that every identity points at a live item and both index
    /// directions agree.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(id) = self.ids.find_desync() {
            return Err(InvariantViolation::IdentityDesync(id));
        }
        match self
            .ids
            .iter()
            .find(|&(_, handle)| !self.items.contains(handle))
        {
            Some((id, _)) => Err(InvariantViolation::DanglingIdentity(id)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{DefinitionId, ItemData};

    fn case() -> Item {
        Item::new(DefinitionId(4001), ItemData::Case)
    }

    #[test]
    fn removing_identified_item_drops_mapping() {
        let mut state = InventoryState::new();
        let handle = state.insert(case());
        state.assign_id(handle, ItemId(100));

        let removed = state.remove(handle).unwrap();
        assert_eq!(removed.item_id, Some(ItemId(100)));
        assert_eq!(state.resolve(ItemId(100)), None);
        assert!(state.ids().is_empty());
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn removing_unidentified_item_reports_no_id() {
        let mut state = InventoryState::new();
        let handle = state.insert(case());

        let removed = state.remove(handle).unwrap();
        assert_eq!(removed.item_id, None);
        assert!(state.remove(handle).is_none());
    }

    #[test]
    fn relocation_keeps_identity() {
        let mut state = InventoryState::new();
        let first = state.insert(case());
        state.insert(case());
        state.assign_id(first, ItemId(1));

        assert!(state.move_to_back(first));
        assert_eq!(state.resolve(ItemId(1)), Some(first));
        assert_eq!(state.items().last(), Some(first));
    }

    #[test]
    #[should_panic(expected = "inventory invariant violated")]
    fn assigning_to_removed_item_is_fatal() {
        let mut state = InventoryState::new();
        let handle = state.insert(case());
        state.remove(handle);
        state.assign_id(handle, ItemId(5));
    }

    #[test]
    fn random_add_remove_sequences_never_dangle() {
        let mut state = InventoryState::new();
        let mut live = Vec::new();
        let mut next_id = 1u64;

        // Deterministic pseudo-random walk over add/remove/assign operations.
        let mut roll = 0x2545_f491_4f6c_dd1du64;
        for _ in 0..500 {
            roll ^= roll << 13;
            roll ^= roll >> 7;
            roll ^= roll << 17;
            match roll % 3 {
                0 => live.push(state.insert(case())),
                1 if !live.is_empty() => {
                    let handle = live.swap_remove((roll as usize / 3) % live.len());
                    state.remove(handle);
                }
                _ if !live.is_empty() => {
                    let handle = live[(roll as usize / 3) % live.len()];
                    state.assign_id(handle, ItemId(next_id));
                    next_id += 1;
                }
                _ => {}
            }
            assert_eq!(state.check_invariants(), Ok(()));
        }
        assert_eq!(state.len(), live.len());
    }
}
