use std::collections::BTreeMap;

use crate::ability::AbilityKey;

/// Per-ability cooldown counters.
///
/// Every round each counter advances by one and wraps back to 1 after
/// reaching its period, so with no interruptions an ability of period `P` is
/// ready on rounds `P, 2P, 3P, …`. Counters never exceed their period.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    slots: BTreeMap<AbilityKey, Slot>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    period: u32,
    counter: u32,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `key` with `period` (at least 1), counter reset to zero.
    pub fn insert(&mut self, key: AbilityKey, period: u32) {
        self.slots.insert(
            key,
            Slot {
                period: period.max(1),
                counter: 0,
            },
        );
    }

    /// Advance every counter by one round.
    pub fn tick(&mut self) {
        for slot in self.slots.values_mut() {
            slot.counter = if slot.counter >= slot.period {
                1
            } else {
                slot.counter + 1
            };
        }
    }

    pub fn is_ready(&self, key: AbilityKey) -> bool {
        self.slots
            .get(&key)
            .is_some_and(|slot| slot.counter == slot.period)
    }

    pub fn counter(&self, key: AbilityKey) -> Option<u32> {
        self.slots.get(&key).map(|slot| slot.counter)
    }

    pub fn period(&self, key: AbilityKey) -> Option<u32> {
        self.slots.get(&key).map(|slot| slot.period)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
