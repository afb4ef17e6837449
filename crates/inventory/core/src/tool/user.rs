//! Tool-application state machine.
//!
//! Dispatch is by tool category and destination category. Every transition
//! validates first and mutates last, so a rejection leaves the inventory
//! exactly as it was. Items consumed or created inside a transition do not
//! produce their own `ItemRemoved`/`ItemAdded`; the single outcome response
//! carries their ids and handles instead.

use crate::config::SimulatorConfig;
use crate::env::{Capabilities, ContainerSchema, Env, ItemSchemaEntry, compute_seed};
use crate::error::{InvariantViolation, fatal};
use crate::item::{AppliedSticker, DefinitionId, Item, ItemCategory, ItemData, ItemId};
use crate::response::Response;
use crate::state::{InventoryState, ItemHandle};

use super::{StickerPlacement, ToolAction, ToolRejection, UseToolRequest};

type ToolResult = Result<Response, ToolRejection>;

// Roll contexts fed to `compute_seed`.
const ROLL_LOOT: u32 = 0;
const ROLL_WEAR: u32 = 1;
const ROLL_PATTERN: u32 = 2;
const ROLL_STAT_TRAK: u32 = 3;

/// Pattern seeds are drawn from this inclusive range.
const PATTERN_SEED_RANGE: (u32, u32) = (1, 1000);

/// An accepted tool request.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolOutcome {
    pub response: Response,
    /// Items removed by the transition, in removal order. Their handles are
    /// already stale.
    pub consumed: Vec<ItemHandle>,
}

/// Applies one tool request to an inventory.
///
/// Holds no state between requests; the simulator builds one per request.
pub struct ToolUser<'a> {
    inventory: &'a mut InventoryState,
    env: Env<'a>,
    config: &'a SimulatorConfig,
    nonce: u64,
    consumed: Vec<ItemHandle>,
}

impl<'a> ToolUser<'a> {
    /// `nonce` is the request sequence number mixed into container rolls.
    pub fn new(
        inventory: &'a mut InventoryState,
        env: Env<'a>,
        config: &'a SimulatorConfig,
        nonce: u64,
    ) -> Self {
        Self {
            inventory,
            env,
            config,
            nonce,
            consumed: Vec::new(),
        }
    }

    /// Routes a request to the matching transition.
    pub fn process(&mut self, request: &UseToolRequest) -> Result<ToolOutcome, ToolRejection> {
        self.consumed.clear();
        let response = self.dispatch(request)?;
        Ok(ToolOutcome {
            response,
            consumed: std::mem::take(&mut self.consumed),
        })
    }

    fn dispatch(&mut self, request: &UseToolRequest) -> ToolResult {
        match request.action {
            ToolAction::Use => self.use_item(request),
            ToolAction::WearSticker => {
                let destination = request
                    .destination
                    .ok_or(ToolRejection::MissingDestination)?;
                self.wear_sticker(destination, request.sticker_slot)
            }
            ToolAction::RemoveNameTag => {
                let destination = request
                    .destination
                    .ok_or(ToolRejection::MissingDestination)?;
                self.remove_name_tag(destination)
            }
        }
    }

    fn use_item(&mut self, request: &UseToolRequest) -> ToolResult {
        // Containers dispatch on the destination alone: keyless ones open
        // without any tool.
        if let Some(destination) = request.destination
            && let Ok((_, item)) = self.resolve(destination)
            && item.category() == ItemCategory::Case
        {
            return self.open_container(destination, request.tool);
        }

        let tool = request.tool.ok_or(ToolRejection::MissingTool)?;
        let category = self.resolve(tool)?.1.category();
        let destination = || request.destination.ok_or(ToolRejection::MissingDestination);

        match category {
            ItemCategory::Sticker => {
                self.apply_sticker(destination()?, tool, request.sticker_slot, request.placement)
            }
            ItemCategory::Patch => self.apply_patch(destination()?, tool, request.sticker_slot),
            ItemCategory::NameTag => self.add_name_tag(destination()?, tool, &request.name_tag),
            ItemCategory::OperationPass => self.activate_operation_pass(tool),
            ItemCategory::ViewerPass => self.activate_viewer_pass(tool),
            ItemCategory::StatTrakSwapTool => {
                let (primary, secondary) = request
                    .stat_trak_swap
                    .ok_or(ToolRejection::MissingDestination)?;
                self.swap_stat_trak(tool, primary, secondary)
            }
            ItemCategory::Key => {
                // Keys only act on containers, which were handled above
                let target = self.resolve(destination()?)?.1.category();
                Err(ToolRejection::CategoryMismatch {
                    tool: category,
                    destination: target,
                })
            }
            other => Err(ToolRejection::NotATool(other)),
        }
    }

    /// Rolls the container's loot, removes the container and its key, and
    /// appends the drop at the front.
    pub fn open_container(&mut self, container: ItemId, key: Option<ItemId>) -> ToolResult {
        let (container_handle, container_item) = self.resolve(container)?;
        let definition = container_item.definition;
        let schema = self
            .lookup(definition)?
            .container
            .as_ref()
            .ok_or(ToolRejection::NotAContainer(definition))?;

        let key = match schema.key {
            Some(required) => {
                let key_id = key.ok_or(ToolRejection::WrongKey {
                    expected: required,
                    found: None,
                })?;
                if key_id == container {
                    return Err(ToolRejection::SameItem(key_id));
                }
                let (key_handle, key_item) = self.resolve(key_id)?;
                if key_item.category() != ItemCategory::Key {
                    return Err(ToolRejection::CategoryMismatch {
                        tool: key_item.category(),
                        destination: ItemCategory::Case,
                    });
                }
                if key_item.definition != required {
                    return Err(ToolRejection::WrongKey {
                        expected: required,
                        found: Some(key_item.definition),
                    });
                }
                Some((key_id, key_handle))
            }
            None => None,
        };

        let dropped = self.roll_loot(container, definition, schema)?;

        self.consume(container_handle);
        if let Some((_, key_handle)) = key {
            self.consume(key_handle);
        }
        let received = self.inventory.insert(dropped);

        Ok(Response::ContainerOpened {
            container_id: container,
            key_id: key.map(|(key_id, _)| key_id),
            received,
        })
    }

    /// Writes the sticker's kit into an empty slot of the destination and
    /// consumes the sticker.
    pub fn apply_sticker(
        &mut self,
        destination: ItemId,
        sticker: ItemId,
        slot: u8,
        placement: StickerPlacement,
    ) -> ToolResult {
        if destination == sticker {
            return Err(ToolRejection::SameItem(sticker));
        }
        if !placement.is_valid() {
            return Err(ToolRejection::InvalidPlacement);
        }

        let (sticker_handle, sticker_item) = self.resolve(sticker)?;
        let ItemData::Sticker { kit } = sticker_item.data else {
            return Err(ToolRejection::NotATool(sticker_item.category()));
        };

        let (destination_handle, target) = self.resolve(destination)?;
        let entry = self.lookup(target.definition)?;
        if target.category() != ItemCategory::Skin
            || !entry.capabilities.contains(Capabilities::STICKERS)
        {
            return Err(ToolRejection::CategoryMismatch {
                tool: ItemCategory::Sticker,
                destination: target.category(),
            });
        }
        check_slot(slot, entry.sticker_slots, SimulatorConfig::MAX_STICKER_SLOTS)?;
        if target.sticker(slot).is_some() {
            return Err(ToolRejection::SlotOccupied(slot));
        }

        if let ItemData::Skin(skin) = &mut self.item_mut(destination_handle).data {
            skin.stickers[usize::from(slot)] = Some(AppliedSticker {
                kit,
                wear: placement.wear,
                scale: placement.scale,
                rotation: placement.rotation,
            });
        }
        self.consume(sticker_handle);

        Ok(Response::StickerApplied {
            item_id: destination,
            sticker_id: sticker,
            slot,
            kit,
        })
    }

    /// Writes the patch into an empty slot of the destination and consumes
    /// the patch.
    pub fn apply_patch(&mut self, destination: ItemId, patch: ItemId, slot: u8) -> ToolResult {
        if destination == patch {
            return Err(ToolRejection::SameItem(patch));
        }

        let (patch_handle, patch_item) = self.resolve(patch)?;
        let ItemData::Patch { patch: patch_kit } = patch_item.data else {
            return Err(ToolRejection::NotATool(patch_item.category()));
        };

        let (destination_handle, target) = self.resolve(destination)?;
        let entry = self.lookup(target.definition)?;
        if target.category() != ItemCategory::Agent
            || !entry.capabilities.contains(Capabilities::PATCHES)
        {
            return Err(ToolRejection::CategoryMismatch {
                tool: ItemCategory::Patch,
                destination: target.category(),
            });
        }
        check_slot(slot, entry.patch_slots, SimulatorConfig::MAX_PATCH_SLOTS)?;
        if target.patch(slot).is_some() {
            return Err(ToolRejection::SlotOccupied(slot));
        }

        if let ItemData::Agent(agent) = &mut self.item_mut(destination_handle).data {
            agent.patches[usize::from(slot)] = Some(patch_kit);
        }
        self.consume(patch_handle);

        Ok(Response::PatchApplied {
            item_id: destination,
            patch_id: patch,
            slot,
            patch: patch_kit,
        })
    }

    /// Sets the destination's display name and consumes the name tag.
    ///
    /// Surrounding whitespace is trimmed before the length check.
    pub fn add_name_tag(&mut self, destination: ItemId, name_tag: ItemId, name: &str) -> ToolResult {
        if destination == name_tag {
            return Err(ToolRejection::SameItem(name_tag));
        }
        let name = name.trim();
        let length = name.chars().count();
        if length == 0 || length > self.config.max_name_tag_length {
            return Err(ToolRejection::InvalidName);
        }

        let (tag_handle, tag_item) = self.resolve(name_tag)?;
        if tag_item.category() != ItemCategory::NameTag {
            return Err(ToolRejection::NotATool(tag_item.category()));
        }
        let (destination_handle, target) = self.resolve(destination)?;
        let entry = self.lookup(target.definition)?;
        if target.category() != ItemCategory::Skin || !entry.is_nameable() {
            return Err(ToolRejection::CategoryMismatch {
                tool: ItemCategory::NameTag,
                destination: target.category(),
            });
        }

        if let ItemData::Skin(skin) = &mut self.item_mut(destination_handle).data {
            skin.name_tag = Some(name.to_owned());
        }
        self.consume(tag_handle);

        Ok(Response::NameTagApplied {
            item_id: destination,
            name_tag_id: name_tag,
            name: name.to_owned(),
        })
    }

    /// Clears a display-name override.
    pub fn remove_name_tag(&mut self, destination: ItemId) -> ToolResult {
        let (handle, target) = self.resolve(destination)?;
        if target.name_tag().is_none() {
            return Err(ToolRejection::NoNameTag(destination));
        }

        if let ItemData::Skin(skin) = &mut self.item_mut(handle).data {
            skin.name_tag = None;
        }
        Ok(Response::NameTagRemoved {
            item_id: destination,
        })
    }

    /// Scrapes a sticker one step, removing it once fully worn. On agents the
    /// patch in `slot` is peeled off in one go.
    pub fn wear_sticker(&mut self, destination: ItemId, slot: u8) -> ToolResult {
        let step = self.config.sticker_wear_step;
        let (handle, target) = self.resolve(destination)?;
        let category = target.category();

        match &mut self.item_mut(handle).data {
            ItemData::Skin(skin) => {
                let entry = skin.stickers.get_mut(usize::from(slot)).ok_or(
                    ToolRejection::SlotOutOfRange {
                        slot,
                        available: SimulatorConfig::MAX_STICKER_SLOTS as u8,
                    },
                )?;
                let Some(sticker) = entry.as_mut() else {
                    return Err(ToolRejection::SlotEmpty(slot));
                };

                let wear = sticker.wear + step;
                if wear < 1.0 {
                    sticker.wear = wear;
                    return Ok(Response::StickerWorn {
                        item_id: destination,
                        slot,
                        wear,
                    });
                }
                *entry = None;
                Ok(Response::StickerRemoved {
                    item_id: destination,
                    slot,
                })
            }
            ItemData::Agent(agent) => {
                let entry = agent.patches.get_mut(usize::from(slot)).ok_or(
                    ToolRejection::SlotOutOfRange {
                        slot,
                        available: SimulatorConfig::MAX_PATCH_SLOTS as u8,
                    },
                )?;
                entry.take().ok_or(ToolRejection::SlotEmpty(slot))?;
                Ok(Response::PatchRemoved {
                    item_id: destination,
                    slot,
                })
            }
            _ => Err(ToolRejection::NotWearable(category)),
        }
    }

    /// Marks an operation pass active. The pass stays in the inventory.
    pub fn activate_operation_pass(&mut self, pass: ItemId) -> ToolResult {
        let (handle, _) = self.resolve(pass)?;
        match &mut self.item_mut(handle).data {
            ItemData::OperationPass { activated: true } => {
                Err(ToolRejection::AlreadyActivated(pass))
            }
            ItemData::OperationPass { activated } => {
                *activated = true;
                Ok(Response::PassActivated {
                    pass_id: pass,
                    reward: None,
                })
            }
            other => Err(ToolRejection::NotATool(other.category())),
        }
    }

    /// Marks a viewer pass active and grants its reward, if the schema names one.
    pub fn activate_viewer_pass(&mut self, pass: ItemId) -> ToolResult {
        let (handle, pass_item) = self.resolve(pass)?;
        match &pass_item.data {
            ItemData::ViewerPass { activated: false } => {}
            ItemData::ViewerPass { activated: true } => {
                return Err(ToolRejection::AlreadyActivated(pass));
            }
            other => return Err(ToolRejection::NotATool(other.category())),
        }
        let reward = self.lookup(pass_item.definition)?.pass_reward;

        if let ItemData::ViewerPass { activated } = &mut self.item_mut(handle).data {
            *activated = true;
        }
        let reward = reward.map(|definition| {
            self.inventory
                .insert(Item::new(definition, ItemData::Collectible))
        });

        Ok(Response::PassActivated {
            pass_id: pass,
            reward,
        })
    }

    /// Combines two stat-trak counters into `primary`, resets `secondary` to
    /// zero, and consumes the tool.
    pub fn swap_stat_trak(&mut self, tool: ItemId, primary: ItemId, secondary: ItemId) -> ToolResult {
        if primary == secondary {
            return Err(ToolRejection::SameItem(primary));
        }
        if tool == primary || tool == secondary {
            return Err(ToolRejection::SameItem(tool));
        }

        let (tool_handle, tool_item) = self.resolve(tool)?;
        if tool_item.category() != ItemCategory::StatTrakSwapTool {
            return Err(ToolRejection::NotATool(tool_item.category()));
        }
        let rule = self
            .lookup(tool_item.definition)?
            .stat_trak_transfer
            .unwrap_or_default();

        let (primary_handle, primary_item) = self.resolve(primary)?;
        let primary_value = primary_item
            .stat_trak()
            .ok_or(ToolRejection::NoStatTrak(primary))?;
        let (secondary_handle, secondary_item) = self.resolve(secondary)?;
        let secondary_value = secondary_item
            .stat_trak()
            .ok_or(ToolRejection::NoStatTrak(secondary))?;

        let combined = rule.combine(primary_value, secondary_value);
        self.set_stat_trak(primary_handle, combined);
        self.set_stat_trak(secondary_handle, 0);
        self.consume(tool_handle);

        Ok(Response::StatTrakUpdated {
            item_id: primary,
            stat_trak: combined,
        })
    }

    fn roll_loot(
        &self,
        container: ItemId,
        definition: DefinitionId,
        schema: &ContainerSchema,
    ) -> Result<Item, ToolRejection> {
        let rng = self.env.rng();
        let seed = |context| compute_seed(self.config.seed, self.nonce, container.0, context);

        let entry = schema
            .pick(u64::from(rng.next_u32(seed(ROLL_LOOT))))
            .ok_or(ToolRejection::EmptyLootTable(definition))?;
        let stat_trak = schema.stat_trak_chance > 0
            && rng.roll_d100(seed(ROLL_STAT_TRAK)) <= u32::from(schema.stat_trak_chance);
        let (min_seed, max_seed) = PATTERN_SEED_RANGE;

        let mut data = entry.item.clone();
        match &mut data {
            ItemData::Skin(skin) => {
                skin.wear = rng.unit_f32(seed(ROLL_WEAR));
                skin.seed = rng.range(seed(ROLL_PATTERN), min_seed, max_seed) as i32;
                if stat_trak && skin.stat_trak.is_none() {
                    skin.stat_trak = Some(0);
                }
            }
            ItemData::Gloves(gloves) => {
                gloves.wear = rng.unit_f32(seed(ROLL_WEAR));
                gloves.seed = rng.range(seed(ROLL_PATTERN), min_seed, max_seed) as i32;
            }
            ItemData::Music(music) => {
                if stat_trak && music.stat_trak.is_none() {
                    music.stat_trak = Some(0);
                }
            }
            _ => {}
        }
        Ok(Item::new(entry.definition, data))
    }

    fn resolve(&self, id: ItemId) -> Result<(ItemHandle, &Item), ToolRejection> {
        self.inventory
            .resolve_item(id)
            .ok_or(ToolRejection::UnresolvedItem(id))
    }

    fn lookup(&self, definition: DefinitionId) -> Result<&'a ItemSchemaEntry, ToolRejection> {
        self.env
            .lookup(definition)
            .ok_or(ToolRejection::UnknownDefinition(definition))
    }

    /// Item behind a handle resolved earlier in the same transition.
    fn item_mut(&mut self, handle: ItemHandle) -> &mut Item {
        match self.inventory.get_mut(handle) {
            Some(item) => item,
            None => fatal(InvariantViolation::StaleHandle(handle)),
        }
    }

    fn consume(&mut self, handle: ItemHandle) {
        if self.inventory.remove(handle).is_none() {
            fatal(InvariantViolation::StaleHandle(handle));
        }
        self.consumed.push(handle);
    }

    fn set_stat_trak(&mut self, handle: ItemHandle, value: i32) {
        if let Some(counter) = self.item_mut(handle).stat_trak_mut() {
            *counter = value;
        }
    }
}

fn check_slot(slot: u8, schema_slots: u8, max_slots: usize) -> Result<(), ToolRejection> {
    let available = usize::from(schema_slots).min(max_slots) as u8;
    if slot < available {
        Ok(())
    } else {
        Err(ToolRejection::SlotOutOfRange { slot, available })
    }
}
