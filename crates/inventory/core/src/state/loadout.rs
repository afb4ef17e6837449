//! Equip/loadout table.
//!
//! Maps `(team, slot)` to the item shown in that slot. Equipping is a display
//! selection, not an ownership transfer: the table never touches the item or
//! its identity, and it never produces responses.

use std::collections::BTreeMap;

use super::ItemHandle;

/// Team context a loadout slot belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Team {
    CounterTerrorist,
    Terrorist,
    /// Team-agnostic slots (music kit, collectible, ...).
    NoTeam,
}

/// Equip slot position within a team's loadout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutSlot(u8);

impl LoadoutSlot {
    /// Returns `None` for positions outside the loadout.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Loadout::MAX_SLOTS {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(&self) -> u8 {
        self.0
    }
}

/// Equipped item per team and slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    ct: BTreeMap<LoadoutSlot, ItemHandle>,
    tt: BTreeMap<LoadoutSlot, ItemHandle>,
    no_team: BTreeMap<LoadoutSlot, ItemHandle>,
}

impl Loadout {
    pub const MAX_SLOTS: usize = 57;

    pub fn new() -> Self {
        Self::default()
    }

    /// Equips an item, returning the previous occupant of the slot if any.
    pub fn equip(&mut self, handle: ItemHandle, slot: LoadoutSlot, team: Team) -> Option<ItemHandle> {
        self.table_mut(team).insert(slot, handle)
    }

    pub fn equip_ct(&mut self, handle: ItemHandle, slot: LoadoutSlot) -> Option<ItemHandle> {
        self.equip(handle, slot, Team::CounterTerrorist)
    }

    pub fn equip_tt(&mut self, handle: ItemHandle, slot: LoadoutSlot) -> Option<ItemHandle> {
        self.equip(handle, slot, Team::Terrorist)
    }

    pub fn equip_no_team(&mut self, handle: ItemHandle, slot: LoadoutSlot) -> Option<ItemHandle> {
        self.equip(handle, slot, Team::NoTeam)
    }

    /// Empties a slot, returning what was equipped there.
    pub fn unequip(&mut self, slot: LoadoutSlot, team: Team) -> Option<ItemHandle> {
        self.table_mut(team).remove(&slot)
    }

    /// Empties every slot (in every team) that shows `handle`.
    ///
    /// Returns the number of slots cleared.
    pub fn unequip_handle(&mut self, handle: ItemHandle) -> usize {
        [&mut self.ct, &mut self.tt, &mut self.no_team]
            .into_iter()
            .map(|table| {
                let before = table.len();
                table.retain(|_, equipped| *equipped != handle);
                before - table.len()
            })
            .sum()
    }

    pub fn get(&self, team: Team, slot: LoadoutSlot) -> Option<ItemHandle> {
        self.table(team).get(&slot).copied()
    }

    /// Occupied slots of one team, in slot order.
    pub fn slots(&self, team: Team) -> impl Iterator<Item = (LoadoutSlot, ItemHandle)> + '_ {
        self.table(team).iter().map(|(&slot, &handle)| (slot, handle))
    }

    pub fn clear(&mut self) {
        self.ct.clear();
        self.tt.clear();
        self.no_team.clear();
    }

    fn table(&self, team: Team) -> &BTreeMap<LoadoutSlot, ItemHandle> {
        match team {
            Team::CounterTerrorist => &self.ct,
            Team::Terrorist => &self.tt,
            Team::NoTeam => &self.no_team,
        }
    }

    fn table_mut(&mut self, team: Team) -> &mut BTreeMap<LoadoutSlot, ItemHandle> {
        match team {
            Team::CounterTerrorist => &mut self.ct,
            Team::Terrorist => &mut self.tt,
            Team::NoTeam => &mut self.no_team,
        }
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

    fn slot(index: u8) -> LoadoutSlot {
        LoadoutSlot::new(index).unwrap()
    }

    #[test]
    fn slot_bounds() {
        assert!(LoadoutSlot::new(0).is_some());
        assert!(LoadoutSlot::new(56).is_some());
        assert!(LoadoutSlot::new(57).is_none());
    }

    #[test]
    fn equip_overwrites_occupant() {
        let h = handles(2);
        let mut loadout = Loadout::new();

        assert_eq!(loadout.equip_ct(h[0], slot(2)), None);
        assert_eq!(loadout.equip_ct(h[1], slot(2)), Some(h[0]));
        assert_eq!(loadout.get(Team::CounterTerrorist, slot(2)), Some(h[1]));
    }

    #[test]
    fn teams_are_independent() {
        let h = handles(2);
        let mut loadout = Loadout::new();
        loadout.equip_ct(h[0], slot(0));
        loadout.equip_tt(h[1], slot(0));

        assert_eq!(loadout.get(Team::CounterTerrorist, slot(0)), Some(h[0]));
        assert_eq!(loadout.get(Team::Terrorist, slot(0)), Some(h[1]));
        assert_eq!(loadout.get(Team::NoTeam, slot(0)), None);
    }

    #[test]
    fn unequip_handle_clears_every_team() {
        let h = handles(2);
        let mut loadout = Loadout::new();
        loadout.equip_ct(h[0], slot(1));
        loadout.equip_tt(h[0], slot(1));
        loadout.equip_no_team(h[1], slot(54));

        assert_eq!(loadout.unequip_handle(h[0]), 2);
        assert_eq!(loadout.slots(Team::CounterTerrorist).count(), 0);
        assert_eq!(loadout.slots(Team::Terrorist).count(), 0);
        assert_eq!(loadout.get(Team::NoTeam, slot(54)), Some(h[1]));
    }
}
