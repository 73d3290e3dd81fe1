use crate::ability::AbilityKind;
use crate::catalog::{AwakeningDef, ClassDef, PassiveEffect, RaceDef, WeaponDef, WeaponEffect};

/// Catalog entries resolved for one combatant at match start.
///
/// Owned copies, so a built combatant does not borrow the catalog.
/// `awakening` is present only when the awakening is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Kit {
    pub race: Option<RaceDef>,
    pub class: Option<ClassDef>,
    pub weapon: Option<WeaponDef>,
    pub passive: Option<PassiveEffect>,
    pub awakening: Option<AwakeningDef>,
}

impl Kit {
    pub fn ability(&self) -> Option<AbilityKind> {
        self.class.as_ref().map(|class| class.ability)
    }

    pub fn weapon_effects(&self) -> impl Iterator<Item = &WeaponEffect> {
        self.weapon.iter().flat_map(|weapon| weapon.effects.iter())
    }

    /// Additive crit chance from class, race, weapon and awakening.
    pub fn crit_chance(&self) -> f64 {
        self.class.as_ref().map_or(0.0, |c| c.crit_chance)
            + self.race.as_ref().map_or(0.0, |r| r.crit_chance)
            + self.weapon.as_ref().map_or(0.0, |w| w.crit_chance)
            + self.awakening.as_ref().map_or(0.0, |a| a.crit_chance)
    }

    /// Additive crit damage from weapon and awakening.
    pub fn crit_damage(&self) -> f64 {
        self.weapon.as_ref().map_or(0.0, |w| w.crit_damage)
            + self.awakening.as_ref().map_or(0.0, |a| a.crit_damage)
    }

    /// Incoming crit reduction from race and passive, capped at 1.
    pub fn crit_ward(&self) -> f64 {
        let race = self.race.as_ref().map_or(0.0, RaceDef::crit_ward);
        let passive = match self.passive {
            Some(PassiveEffect::CritWard { reduction }) => reduction,
            _ => 0.0,
        };
        (race + passive).clamp(0.0, 1.0)
    }

    pub fn damage_taken(&self) -> f64 {
        self.awakening.as_ref().map_or(1.0, |a| a.damage_taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RaceTrait;

    #[test]
    fn crit_ward_sums_race_and_passive() {
        let kit = Kit {
            race: Some(RaceDef::new("dwarf", "Dwarf").with_trait(RaceTrait::CritWard { reduction: 0.5 })),
            passive: Some(PassiveEffect::CritWard { reduction: 0.75 }),
            ..Kit::default()
        };
        assert_eq!(kit.crit_ward(), 1.0);
        assert_eq!(Kit::default().crit_ward(), 0.0);
        assert_eq!(Kit::default().damage_taken(), 1.0);
    }
}
