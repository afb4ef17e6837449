//! Deferred notifications produced by inventory mutations.
//!
//! Mutations push [`Response`] records onto a [`ResponseQueue`]; the embedding
//! application drains the queue later, in FIFO order, to synchronize UI or
//! network state. Consumers are expected to `match` exhaustively so that a new
//! response kind is a compile error at every consumer.

use std::collections::VecDeque;

use crate::item::ItemId;
use crate::state::ItemHandle;

/// Immutable record of a completed mutation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Response {
    /// An item was appended to the inventory. It has no identity yet.
    ItemAdded { handle: ItemHandle },

    ItemRemoved { item_id: ItemId },

    ItemMovedToFront { item_id: ItemId },

    StatTrakUpdated { item_id: ItemId, stat_trak: i32 },

    /// A container was opened; the container (and key, if one was needed)
    /// are gone and `received` is the rolled item.
    ContainerOpened {
        container_id: ItemId,
        key_id: Option<ItemId>,
        received: ItemHandle,
    },

    StickerApplied {
        item_id: ItemId,
        sticker_id: ItemId,
        slot: u8,
        kit: u32,
    },

    StickerWorn { item_id: ItemId, slot: u8, wear: f32 },

    /// A sticker was scraped past full wear and is gone.
    StickerRemoved { item_id: ItemId, slot: u8 },

    PatchApplied {
        item_id: ItemId,
        patch_id: ItemId,
        slot: u8,
        patch: u32,
    },

    PatchRemoved { item_id: ItemId, slot: u8 },

    NameTagApplied {
        item_id: ItemId,
        name_tag_id: ItemId,
        name: String,
    },

    NameTagRemoved { item_id: ItemId },

    /// A pass was activated; viewer passes may grant a reward item.
    PassActivated {
        pass_id: ItemId,
        reward: Option<ItemHandle>,
    },
}

impl Response {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ItemAdded { .. } => "item_added",
            Self::ItemRemoved { .. } => "item_removed",
            Self::ItemMovedToFront { .. } => "item_moved_to_front",
            Self::StatTrakUpdated { .. } => "stat_trak_updated",
            Self::ContainerOpened { .. } => "container_opened",
            Self::StickerApplied { .. } => "sticker_applied",
            Self::StickerWorn { .. } => "sticker_worn",
            Self::StickerRemoved { .. } => "sticker_removed",
            Self::PatchApplied { .. } => "patch_applied",
            Self::PatchRemoved { .. } => "patch_removed",
            Self::NameTagApplied { .. } => "name_tag_applied",
            Self::NameTagRemoved { .. } => "name_tag_removed",
            Self::PassActivated { .. } => "pass_activated",
        }
    }
}

/// Append-only FIFO of responses, emptied only by [`ResponseQueue::drain`].
///
/// Growth is unbounded; drain at least once per simulation step.
#[derive(Clone, Debug, Default)]
pub struct ResponseQueue {
    responses: VecDeque<Response>,
}

impl ResponseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, response: Response) {
        tracing::trace!(kind = response.kind(), "queued response");
        self.responses.push_back(response);
    }

    /// Hands every queued response to `handler` in insertion order.
    ///
    /// The queue is empty on return. Returns the number of responses handled.
    pub fn drain<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(Response),
    {
        let mut handled = 0;
        while let Some(response) = self.responses.pop_front() {
            handler(response);
            handled += 1;
        }
        handled
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_is_fifo_and_empties_queue() {
        let mut queue = ResponseQueue::new();
        queue.push(Response::ItemRemoved { item_id: ItemId(1) });
        queue.push(Response::ItemMovedToFront { item_id: ItemId(2) });
        queue.push(Response::NameTagRemoved { item_id: ItemId(3) });

        let mut seen = Vec::new();
        let handled = queue.drain(|response| seen.push(response));

        assert_eq!(handled, 3);
        assert_eq!(
            seen,
            vec![
                Response::ItemRemoved { item_id: ItemId(1) },
                Response::ItemMovedToFront { item_id: ItemId(2) },
                Response::NameTagRemoved { item_id: ItemId(3) },
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn second_drain_handles_nothing() {
        let mut queue = ResponseQueue::new();
        queue.push(Response::ItemRemoved { item_id: ItemId(1) });

        assert_eq!(queue.drain(|_| {}), 1);
        assert_eq!(queue.drain(|_| panic!("queue should be empty")), 0);
    }
}
