//! Request ingress and notification egress.
//!
//! [`InventorySimulator`] is the single entry point embedding applications
//! talk to. It owns the inventory, loadout and response queue, turns each
//! request into at most one queued [`Response`], and hands queued responses
//! back through [`InventorySimulator::run`].

use crate::config::SimulatorConfig;
use crate::env::{Env, PcgRng, StaticData};
use crate::error::{InvariantViolation, SimulatorError, fatal};
use crate::item::{Item, ItemId};
use crate::response::{Response, ResponseQueue};
use crate::state::{InventoryState, ItemHandle, Iter, Loadout, LoadoutSlot, Team};
use crate::tool::{ToolOutcome, ToolUser, UseToolRequest};

/// Authoritative inventory model for one user.
///
/// Single-threaded; callers that share it across threads must serialize
/// access themselves.
#[derive(Debug, Default)]
pub struct InventorySimulator {
    inventory: InventoryState,
    loadout: Loadout,
    responses: ResponseQueue,
    config: SimulatorConfig,
    rng: PcgRng,
    /// Tool requests processed so far; mixed into container rolls.
    nonce: u64,
}

impl InventorySimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn inventory(&self) -> &InventoryState {
        &self.inventory
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    /// Items in display order, oldest first; the last item is the front.
    pub fn items(&self) -> Iter<'_> {
        self.inventory.items().iter()
    }

    pub fn item(&self, handle: ItemHandle) -> Option<&Item> {
        self.inventory.get(handle)
    }

    pub fn item_from_id(&self, id: ItemId) -> Option<ItemHandle> {
        self.inventory.resolve(id)
    }

    pub fn item_id(&self, handle: ItemHandle) -> Option<ItemId> {
        self.inventory.id(handle)
    }

    /// Number of responses waiting to be drained.
    pub fn pending_responses(&self) -> usize {
        self.responses.len()
    }

    // ===== request ingress =====

    /// Appends an item. It has no identity until [`Self::assign_item_id`].
    pub fn add_item(&mut self, item: Item) -> ItemHandle {
        let handle = self.inventory.insert(item);
        self.responses.push(Response::ItemAdded { handle });
        handle
    }

    /// Removes an item, dropping its identity and any loadout slots that
    /// point at it.
    ///
    /// Returns the next item in display order so a sweep can continue.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was already removed.
    pub fn remove_item(&mut self, handle: ItemHandle) -> Option<ItemHandle> {
        let Some(removed) = self.inventory.remove(handle) else {
            fatal(InvariantViolation::StaleHandle(handle));
        };
        let unequipped = self.loadout.unequip_handle(handle);
        if unequipped > 0 {
            tracing::debug!(?handle, unequipped, "removed item was equipped");
        }
        if let Some(item_id) = removed.item_id {
            self.responses.push(Response::ItemRemoved { item_id });
        }
        removed.next
    }

    /// Moves an item to the front of display order.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was already removed.
    pub fn move_to_front(&mut self, handle: ItemHandle) {
        if !self.inventory.move_to_back(handle) {
            fatal(InvariantViolation::StaleHandle(handle));
        }
        if let Some(item_id) = self.inventory.id(handle) {
            self.responses.push(Response::ItemMovedToFront { item_id });
        }
    }

    /// Overwrites an item's stat-trak counter.
    ///
    /// Items without a counter are left alone. The update is only reported
    /// for identified items.
    ///
    /// # Panics
    ///
    /// Panics if `handle` was already removed.
    pub fn update_stat_trak(&mut self, handle: ItemHandle, stat_trak: i32) {
        let Some(item) = self.inventory.get_mut(handle) else {
            fatal(InvariantViolation::StaleHandle(handle));
        };
        let Some(counter) = item.stat_trak_mut() else {
            return;
        };
        *counter = stat_trak;
        if let Some(item_id) = self.inventory.id(handle) {
            self.responses
                .push(Response::StatTrakUpdated { item_id, stat_trak });
        }
    }

    /// Gives a live item an external id, replacing any earlier owner of `id`.
    pub fn assign_item_id(&mut self, handle: ItemHandle, id: ItemId) {
        self.inventory.assign_id(handle, id);
    }

    /// Relabels an identity. Returns `false` (and changes nothing) if `old`
    /// is unknown.
    pub fn update_item_id(&mut self, old: ItemId, new: ItemId) -> bool {
        self.inventory.update_id(old, new)
    }

    pub fn equip_item_ct(&mut self, handle: ItemHandle, slot: LoadoutSlot) {
        self.equip(handle, slot, Team::CounterTerrorist);
    }

    pub fn equip_item_tt(&mut self, handle: ItemHandle, slot: LoadoutSlot) {
        self.equip(handle, slot, Team::Terrorist);
    }

    pub fn equip_item_no_team(&mut self, handle: ItemHandle, slot: LoadoutSlot) {
        self.equip(handle, slot, Team::NoTeam);
    }

    fn equip(&mut self, handle: ItemHandle, slot: LoadoutSlot, team: Team) {
        if !self.inventory.items().contains(handle) {
            fatal(InvariantViolation::StaleHandle(handle));
        }
        self.loadout.equip(handle, slot, team);
    }

    /// Applies a tool request against `schema`.
    ///
    /// Queues exactly one response on success and unequips whatever the
    /// tool consumed. Rejected requests change nothing and queue nothing;
    /// the reason is only logged.
    pub fn use_tool(&mut self, request: &UseToolRequest, schema: &dyn StaticData) {
        let nonce = self.nonce;
        self.nonce += 1;

        let env = Env::new(schema, &self.rng);
        let outcome =
            ToolUser::new(&mut self.inventory, env, &self.config, nonce).process(request);

        match outcome {
            Ok(ToolOutcome { response, consumed }) => {
                tracing::debug!(
                    action = %request.action,
                    kind = response.kind(),
                    consumed = consumed.len(),
                    nonce,
                    "tool applied"
                );
                for handle in consumed {
                    self.loadout.unequip_handle(handle);
                }
                self.responses.push(response);
            }
            Err(rejection) => {
                tracing::debug!(
                    action = %request.action,
                    code = rejection.error_code(),
                    severity = rejection.severity().as_str(),
                    nonce,
                    "tool request rejected: {rejection}"
                );
            }
        }
    }

    /// Empties the inventory, its identities and the loadout. Queues nothing.
    pub fn clear_inventory(&mut self) {
        self.inventory.clear();
        self.loadout.clear();
    }

    // ===== notification egress =====

    /// Hands every queued response to `handler`, oldest first.
    ///
    /// Returns how many responses were handled; a second call right after
    /// returns zero.
    pub fn run<F>(&mut self, handler: F) -> usize
    where
        F: FnMut(Response),
    {
        self.responses.drain(handler)
    }

    /// Drains the queue into a `Vec`.
    pub fn drain_responses(&mut self) -> Vec<Response> {
        let mut drained = Vec::with_capacity(self.responses.len());
        self.responses.drain(|response| drained.push(response));
        drained
    }
}
