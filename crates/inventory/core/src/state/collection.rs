//! Ordered item storage with stable handles.
//!
//! Items live in a generational slot map so that a handle stays valid across
//! insertion, removal, and relocation of *other* items, and goes stale (rather
//! than aliasing a new item) once its own item is removed. Display order is an
//! intrusive doubly-linked list threaded through the slots: the head is the
//! back of the inventory (oldest), the tail is the front (most recent).

use slotmap::{SlotMap, new_key_type};

use crate::item::Item;

new_key_type! {
    /// Opaque, generation-tagged reference to an item in [`ItemCollection`].
    pub struct ItemHandle;
}

#[derive(Clone, Debug)]
struct Node {
    item: Item,
    prev: Option<ItemHandle>,
    next: Option<ItemHandle>,
}

/// Ordered container of items.
///
/// Removal is crate-private: callers go through
/// [`crate::state::InventoryState::remove`] so the identity index can never
/// hold a handle this collection has already dropped.
#[derive(Clone, Debug, Default)]
pub struct ItemCollection {
    nodes: SlotMap<ItemHandle, Node>,
    head: Option<ItemHandle>,
    tail: Option<ItemHandle>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item to the front of display order.
    pub fn push_back(&mut self, item: Item) -> ItemHandle {
        let prev = self.tail;
        let handle = self.nodes.insert(Node {
            item,
            prev,
            next: None,
        });
        self.link_after_tail(handle, prev);
        handle
    }

    /// Erases an item, returning it together with the handle that followed it.
    pub(crate) fn remove(&mut self, handle: ItemHandle) -> Option<(Item, Option<ItemHandle>)> {
        if !self.nodes.contains_key(handle) {
            return None;
        }
        let next = self.unlink(handle);
        let node = self.nodes.remove(handle)?;
        Some((node.item, next))
    }

    /// Relocates an item to the tail of display order.
    ///
    /// Returns false if the handle is stale. The handle remains valid.
    pub fn move_to_back(&mut self, handle: ItemHandle) -> bool {
        if !self.nodes.contains_key(handle) {
            return false;
        }
        if self.tail == Some(handle) {
            return true;
        }
        self.unlink(handle);
        let prev = self.tail;
        if let Some(node) = self.nodes.get_mut(handle) {
            node.prev = prev;
            node.next = None;
        }
        self.link_after_tail(handle, prev);
        true
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&Item> {
        self.nodes.get(handle).map(|node| &node.item)
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut Item> {
        self.nodes.get_mut(handle).map(|node| &mut node.item)
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Oldest item (back of the inventory).
    pub fn first(&self) -> Option<ItemHandle> {
        self.head
    }

    /// Most recent item (front of the inventory).
    pub fn last(&self) -> Option<ItemHandle> {
        self.tail
    }

    /// Handle following `handle` in display order.
    pub fn next(&self, handle: ItemHandle) -> Option<ItemHandle> {
        self.nodes.get(handle).and_then(|node| node.next)
    }

    /// Iterates items in display order, back to front.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            collection: self,
            cursor: self.head,
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.iter().map(|(handle, _)| handle)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn link_after_tail(&mut self, handle: ItemHandle, prev: Option<ItemHandle>) {
        match prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev_node) => prev_node.next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
    }

    /// Detaches a node from the order list and returns its former successor.
    fn unlink(&mut self, handle: ItemHandle) -> Option<ItemHandle> {
        let (prev, next) = match self.nodes.get(handle) {
            Some(node) => (node.prev, node.next),
            None => return None,
        };

        match prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|next| self.nodes.get_mut(next)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        next
    }
}

/// Display-order iterator over `(handle, item)` pairs.
pub struct Iter<'a> {
    collection: &'a ItemCollection,
    cursor: Option<ItemHandle>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ItemHandle, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let node = self.collection.nodes.get(handle)?;
        self.cursor = node.next;
        Some((handle, &node.item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{DefinitionId, ItemData};

    fn item(definition: u32) -> Item {
        Item::new(DefinitionId(definition), ItemData::Collectible)
    }

    fn order(collection: &ItemCollection) -> Vec<u32> {
        collection
            .iter()
            .map(|(_, item)| item.definition.0)
            .collect()
    }

    #[test]
    fn push_back_preserves_insertion_order() {
        let mut collection = ItemCollection::new();
        collection.push_back(item(1));
        collection.push_back(item(2));
        collection.push_back(item(3));

        assert_eq!(order(&collection), vec![1, 2, 3]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn remove_returns_next_and_keeps_other_handles() {
        let mut collection = ItemCollection::new();
        let a = collection.push_back(item(1));
        let b = collection.push_back(item(2));
        let c = collection.push_back(item(3));

        let (removed, next) = collection.remove(b).unwrap();
        assert_eq!(removed.definition, DefinitionId(2));
        assert_eq!(next, Some(c));
        assert_eq!(order(&collection), vec![1, 3]);
        assert!(collection.get(a).is_some());
        assert!(collection.get(c).is_some());
        assert!(collection.get(b).is_none());

        // Removing the tail yields no successor.
        assert_eq!(collection.remove(c).unwrap().1, None);
        assert_eq!(collection.last(), Some(a));
    }

    #[test]
    fn stale_handle_does_not_alias_new_item() {
        let mut collection = ItemCollection::new();
        let a = collection.push_back(item(1));
        collection.remove(a);
        let b = collection.push_back(item(2));

        assert_ne!(a, b);
        assert!(collection.get(a).is_none());
        assert!(collection.remove(a).is_none());
        assert!(!collection.move_to_back(a));
    }

    #[test]
    fn move_to_back_relocates_without_invalidating() {
        let mut collection = ItemCollection::new();
        let a = collection.push_back(item(1));
        collection.push_back(item(2));
        collection.push_back(item(3));

        assert!(collection.move_to_back(a));
        assert_eq!(order(&collection), vec![2, 3, 1]);
        assert_eq!(collection.get(a).unwrap().definition, DefinitionId(1));
        assert_eq!(collection.last(), Some(a));
    }

    #[test]
    fn move_to_back_on_single_element_is_stable() {
        let mut collection = ItemCollection::new();
        let a = collection.push_back(item(1));

        assert!(collection.move_to_back(a));
        assert_eq!(order(&collection), vec![1]);
        assert_eq!(collection.first(), Some(a));
        assert_eq!(collection.last(), Some(a));
    }

    #[test]
    fn sequential_erase_visits_every_item() {
        let mut collection = ItemCollection::new();
        for definition in 1..=4 {
            collection.push_back(item(definition));
        }

        let mut cursor = collection.first();
        let mut seen = Vec::new();
        while let Some(handle) = cursor {
            let (removed, next) = collection.remove(handle).unwrap();
            seen.push(removed.definition.0);
            cursor = next;
        }

        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert!(collection.is_empty());
        assert_eq!(collection.first(), None);
    }
}
