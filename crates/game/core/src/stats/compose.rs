//! Builds the effective stats of one combatant.

use super::block::BaseStats;
use super::pipeline::{Layer, LayerSource, Pipeline};
use super::spec::CombatantSpec;
use crate::catalog::{CatalogOracle, PassiveEffect};
use crate::error::CombatantError;
use crate::state::Kit;

/// Output of [`compose`]: effective stats plus everything the combat layer
/// needs from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    pub stats: BaseStats,
    /// The layers that produced `stats`, in application order.
    pub pipeline: Pipeline,
    pub kit: Kit,
    /// Human-readable notes for the intro step (unknown ids, awakening).
    pub notes: Vec<String>,
}

/// Validates `spec`, resolves its ids against `catalog` and folds the
/// composition pipeline over the raw record.
///
/// # Errors
///
/// Returns [`CombatantError`] when a stat field is missing or negative, or
/// when the composed max HP is zero.
pub fn compose(
    spec: &CombatantSpec,
    catalog: &(impl CatalogOracle + ?Sized),
) -> Result<Composition, CombatantError> {
    let raw = spec.stats.validate(&spec.name)?;
    let mut notes = Vec::new();

    let race = resolve(spec.race.as_deref(), "race", &mut notes, |id| catalog.race(id));
    let class = resolve(spec.class.as_deref(), "class", &mut notes, |id| catalog.class(id));
    let weapon = resolve(spec.weapon.as_deref(), "weapon", &mut notes, |id| {
        catalog.weapon(id)
    });

    let passive = spec.passive.as_ref().and_then(|slot| {
        match catalog.passive(&slot.id) {
            None => {
                notes.push(format!("unknown passive `{}` ignored", slot.id));
                None
            }
            Some(def) => {
                let effect = def.at_level(slot.level);
                if effect.is_none() {
                    notes.push(format!(
                        "passive `{}` has no level {} and is ignored",
                        slot.id, slot.level
                    ));
                }
                effect
            }
        }
    });

    let awakening = race
        .filter(|_| spec.awakening)
        .and_then(|race| catalog.awakening(&race.id))
        .filter(|def| def.unlocked_at(spec.level));
    if let Some(def) = awakening {
        notes.push(format!("{} awakening is active (level {})", def.race, def.level));
    }

    let mut pipeline = Pipeline::new();
    if let Some(race) = race {
        pipeline.push(Layer::Flat {
            source: LayerSource::Race,
            delta: race.flat,
        });
    }
    if let Some(class) = class {
        pipeline.push(Layer::Flat {
            source: LayerSource::Class,
            delta: class.flat,
        });
    }
    if !spec.allocation.is_zero() {
        pipeline.push(Layer::Flat {
            source: LayerSource::Allocation,
            delta: spec.allocation,
        });
    }
    if let Some(weapon) = weapon {
        pipeline.push(Layer::Flat {
            source: LayerSource::Weapon,
            delta: weapon.flat,
        });
        for conversion in &weapon.conversions {
            pipeline.push(Layer::Convert {
                source: LayerSource::Weapon,
                conversion: *conversion,
            });
        }
    }
    if let Some(awakening) = awakening {
        if let Some(race) = race {
            pipeline.push(Layer::Revoke {
                source: LayerSource::Awakening,
                delta: race.flat,
            });
        }
        pipeline.push(Layer::Flat {
            source: LayerSource::Awakening,
            delta: awakening.flat,
        });
        if !awakening.scale.is_zero() {
            pipeline.push(Layer::Scale {
                source: LayerSource::Awakening,
                scale: awakening.scale,
            });
        }
    }
    if let Some(PassiveEffect::StatBoost(scale)) = passive {
        pipeline.push(Layer::Scale {
            source: LayerSource::Passive,
            scale,
        });
    }
    if !spec.upgrade.is_zero() {
        pipeline.push(Layer::Scale {
            source: LayerSource::Upgrade,
            scale: spec.upgrade,
        });
    }

    let stats = BaseStats::from(pipeline.run(raw));
    if stats.hp == 0 {
        return Err(CombatantError::NonPositiveMaxHp {
            combatant: spec.name.clone(),
        });
    }

    let kit = Kit {
        race: race.cloned(),
        class: class.cloned(),
        weapon: weapon.cloned(),
        passive,
        awakening: awakening.cloned(),
    };

    Ok(Composition {
        stats,
        pipeline,
        kit,
        notes,
    })
}

fn resolve<'a, T>(
    id: Option<&str>,
    kind: &str,
    notes: &mut Vec<String>,
    lookup: impl FnOnce(&str) -> Option<&'a T>,
) -> Option<&'a T> {
    let id = id?;
    let found = lookup(id);
    if found.is_none() {
        notes.push(format!("unknown {kind} `{id}` ignored"));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityKind;
    use crate::catalog::{AwakeningDef, Catalog, ClassDef, PassiveDef, RaceDef, WeaponDef};
    use crate::stats::{Conversion, Stat, StatDelta, StatRecord, StatScale};

    fn catalog() -> Catalog {
        Catalog::new()
            .with_race(RaceDef::new("orc", "Orc").flat(StatDelta::new(20, 5, 0, 0, 0, 0)))
            .with_class(
                ClassDef::new(
                    "warrior",
                    "Warrior",
                    AbilityKind::Flurry {
                        hits: 3,
                        cap_blend: 0.5,
                    },
                )
                .flat(StatDelta::new(10, 3, 2, 0, 0, 0)),
            )
            .with_weapon(
                WeaponDef::new("bulwark_axe", "Bulwark Axe")
                    .flat(StatDelta::new(0, 4, 0, 0, 0, 0))
                    .convert(Conversion {
                        from: Stat::Def,
                        to: Stat::Auto,
                        percent: 50,
                    }),
            )
            .with_passive(PassiveDef::new(
                "might",
                "Might",
                vec![PassiveEffect::StatBoost(StatScale {
                    auto: 10,
                    ..StatScale::default()
                })],
            ))
            .with_awakening(
                AwakeningDef::new("orc", 30)
                    .flat(StatDelta::new(40, 10, 0, 0, 0, 0))
                    .scale(StatScale {
                        hp: 10,
                        ..StatScale::default()
                    }),
            )
    }

    fn orc(level: u32) -> CombatantSpec {
        CombatantSpec::new("Grok", StatRecord::full(100, 20, 10, 5, 5, 10))
            .race("orc")
            .class("warrior")
            .level(level)
            .weapon("bulwark_axe")
    }

    #[test]
    fn flat_layers_then_conversion() {
        let composed = compose(&orc(10), &catalog()).unwrap();
        // hp: 100 + 20 + 10
        assert_eq!(composed.stats.hp, 130);
        // auto: 20 + 5 + 3 + 4 = 32, def 12 → +6
        assert_eq!(composed.stats.auto, 38);
        assert!(composed.notes.is_empty());
        assert!(composed.kit.awakening.is_none());
    }

    #[test]
    fn awakening_supersedes_race_flat() {
        let composed = compose(&orc(30), &catalog()).unwrap();
        // hp: (100 + 10 + 40) × 1.1
        assert_eq!(composed.stats.hp, 165);
        // auto: 20 + 3 + 4 + 10 = 37, +6 from def conversion
        assert_eq!(composed.stats.auto, 43);
        assert!(composed.kit.awakening.is_some());
        assert_eq!(composed.notes.len(), 1);
    }

    #[test]
    fn awakening_can_be_disabled() {
        let composed = compose(&orc(30).without_awakening(), &catalog()).unwrap();
        assert_eq!(composed.stats.hp, 130);
    }

    #[test]
    fn passive_boost_then_upgrade() {
        let spec = orc(10)
            .passive("might", 1)
            .upgrade(StatScale {
                auto: 10,
                ..StatScale::default()
            });
        let composed = compose(&spec, &catalog()).unwrap();
        // 38 × 1.1 = 41 (trunc), × 1.1 = 45 (trunc)
        assert_eq!(composed.stats.auto, 45);
        assert_eq!(
            composed.pipeline.layers().last().map(Layer::source),
            Some(LayerSource::Upgrade)
        );
    }

    #[test]
    fn unknown_ids_are_noted_not_fatal() {
        let spec = CombatantSpec::new("Nym", StatRecord::full(80, 10, 5, 5, 5, 5))
            .race("gnome")
            .weapon("spoon")
            .passive("nope", 1);
        let composed = compose(&spec, &catalog()).unwrap();
        assert_eq!(composed.stats.hp, 80);
        assert_eq!(composed.notes.len(), 3);
        assert!(composed.notes[0].contains("gnome"));
    }

    #[test]
    fn oversized_records_clamp() {
        let spec = CombatantSpec::new(
            "Colossus",
            StatRecord::full(i64::MAX / 50, i64::MAX, 0, 0, 0, 0),
        )
        .upgrade(StatScale::uniform(10));
        let composed = compose(&spec, &catalog()).unwrap();
        assert_eq!(composed.stats.hp, u32::MAX);
        assert_eq!(composed.stats.auto, u32::MAX);
    }

    #[test]
    fn zero_max_hp_is_rejected() {
        let spec = CombatantSpec::new("Husk", StatRecord::full(0, 10, 5, 5, 5, 5));
        assert_eq!(
            compose(&spec, &catalog()).unwrap_err(),
            CombatantError::NonPositiveMaxHp {
                combatant: "Husk".into()
            }
        );
    }
}
