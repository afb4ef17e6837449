//! Bidirectional external-id ↔ handle index.

use std::collections::HashMap;

use slotmap::SecondaryMap;

use crate::item::ItemId;

use super::ItemHandle;

/// Two maps kept in lock-step: at most one handle per id, at most one id per handle.
///
/// The index never mutates items. Dropping a mapping when its item goes away
/// is the job of [`crate::state::InventoryState::remove`].
#[derive(Clone, Debug, Default)]
pub struct IdentityIndex {
    by_id: HashMap<ItemId, ItemHandle>,
    by_handle: SecondaryMap<ItemHandle, ItemId>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `id` to `handle`, replacing whatever either side was mapped to before.
    pub fn assign(&mut self, handle: ItemHandle, id: ItemId) {
        if let Some(previous_handle) = self.by_id.insert(id, handle)
            && previous_handle != handle
        {
            self.by_handle.remove(previous_handle);
        }
        if let Some(previous_id) = self.by_handle.insert(handle, id)
            && previous_id != id
        {
            self.by_id.remove(&previous_id);
        }
    }

    /// Relabels the mapping held by `old` as `new`.
    ///
    /// Returns false (and changes nothing) when `old` is unknown.
    pub fn update(&mut self, old: ItemId, new: ItemId) -> bool {
        let Some(handle) = self.by_id.remove(&old) else {
            return false;
        };
        self.by_handle.remove(handle);
        self.assign(handle, new);
        true
    }

    /// Drops the mapping for `handle`, returning the id it carried.
    pub fn remove_handle(&mut self, handle: ItemHandle) -> Option<ItemId> {
        let id = self.by_handle.remove(handle)?;
        self.by_id.remove(&id);
        Some(id)
    }

    /// Drops the mapping for `id`, returning the handle it pointed at.
    pub fn remove_id(&mut self, id: ItemId) -> Option<ItemHandle> {
        let handle = self.by_id.remove(&id)?;
        self.by_handle.remove(handle);
        Some(handle)
    }

    pub fn handle(&self, id: ItemId) -> Option<ItemHandle> {
        self.by_id.get(&id).copied()
    }

    pub fn id(&self, handle: ItemHandle) -> Option<ItemId> {
        self.by_handle.get(handle).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, ItemHandle)> + '_ {
        self.by_id.iter().map(|(&id, &handle)| (id, handle))
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_handle.clear();
    }

    /// Returns the first id whose two directions disagree, if any.
    pub fn find_desync(&self) -> Option<ItemId> {
        self.by_id
            .iter()
            .find(|&(id, &handle)| self.by_handle.get(handle) != Some(id))
            .map(|(&id, _)| id)
            .or_else(|| {
                self.by_handle
                    .iter()
                    .find(|&(handle, id)| self.by_id.get(id) != Some(&handle))
                    .map(|(_, &id)| id)
            })
    }

    pub fn is_consistent(&self) -> bool {
        self.find_desync().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles(count: usize) -> Vec<ItemHandle> {
        let mut arena: SlotMap<ItemHandle, ()> = SlotMap::with_key();
        (0..count).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn assign_round_trips() {
        let h = handles(1);
        let mut index = IdentityIndex::new();
        index.assign(h[0], ItemId(100));

        assert_eq!(index.handle(ItemId(100)), Some(h[0]));
        assert_eq!(index.id(h[0]), Some(ItemId(100)));
        assert!(index.is_consistent());
    }

    #[test]
    fn assign_is_last_writer_wins_for_id() {
        let h = handles(2);
        let mut index = IdentityIndex::new();
        index.assign(h[0], ItemId(1));
        index.assign(h[1], ItemId(1));

        assert_eq!(index.handle(ItemId(1)), Some(h[1]));
        assert_eq!(index.id(h[0]), None);
        assert_eq!(index.len(), 1);
        assert!(index.is_consistent());
    }

    #[test]
    fn reassigning_a_handle_drops_its_old_id() {
        let h = handles(1);
        let mut index = IdentityIndex::new();
        index.assign(h[0], ItemId(1));
        index.assign(h[0], ItemId(2));

        assert_eq!(index.handle(ItemId(1)), None);
        assert_eq!(index.id(h[0]), Some(ItemId(2)));
        assert!(index.is_consistent());
    }

    #[test]
    fn update_relabels_and_ignores_unknown_ids() {
        let h = handles(1);
        let mut index = IdentityIndex::new();
        index.assign(h[0], ItemId(1));

        assert!(index.update(ItemId(1), ItemId(9)));
        assert_eq!(index.handle(ItemId(9)), Some(h[0]));
        assert_eq!(index.handle(ItemId(1)), None);

        assert!(!index.update(ItemId(1), ItemId(10)));
        assert_eq!(index.handle(ItemId(10)), None);
        assert!(index.is_consistent());
    }

    #[test]
    fn update_onto_taken_id_overwrites() {
        let h = handles(2);
        let mut index = IdentityIndex::new();
        index.assign(h[0], ItemId(1));
        index.assign(h[1], ItemId(2));

        assert!(index.update(ItemId(1), ItemId(2)));
        assert_eq!(index.handle(ItemId(2)), Some(h[0]));
        assert_eq!(index.id(h[1]), None);
        assert_eq!(index.len(), 1);
        assert!(index.is_consistent());
    }

    #[test]
    fn removal_clears_both_directions() {
        let h = handles(2);
        let mut index = IdentityIndex::new();
        index.assign(h[0], ItemId(1));
        index.assign(h[1], ItemId(2));

        assert_eq!(index.remove_handle(h[0]), Some(ItemId(1)));
        assert_eq!(index.remove_id(ItemId(2)), Some(h[1]));
        assert_eq!(index.remove_handle(h[0]), None);
        assert!(index.is_empty());
        assert!(index.is_consistent());
    }
}
