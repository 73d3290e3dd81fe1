//! Signature abilities and on-hit effects resolved one action at a time.

use duel_core::ability::take_action;
use duel_core::combat::{Exchange, Hit, resolve_hit};
use duel_core::engine::Journal;
use duel_core::state::Counter;
use duel_core::{
    AbilityKey, AbilityKind, Catalog, ClassDef, Combatant, CombatantSpec, DuelConfig, PassiveDef,
    PassiveEffect, RaceDef, RaceTrait, ScriptedRng, Side, StatRecord, WeaponDef, WeaponEffect,
};

fn catalog() -> Catalog {
    Catalog::new()
        .with_race(RaceDef::new("dwarf", "Dwarf").with_trait(RaceTrait::AbilityWard {
            extra_period: 1,
            damage_reduction: 0.2,
        }))
        .with_class(ClassDef::new(
            "cleric",
            "Cleric",
            AbilityKind::Mending {
                missing_hp: 0.5,
                cap_scale: 0.5,
            },
        ))
        .with_class(ClassDef::new(
            "warrior",
            "Warrior",
            AbilityKind::Flurry {
                hits: 3,
                cap_blend: 0.5,
            },
        ))
        .with_class(ClassDef::new(
            "monk",
            "Monk",
            AbilityKind::Retribution {
                return_fraction: 1.0,
                heal_fraction: 0.5,
            },
        ))
        .with_class(ClassDef::new(
            "ranger",
            "Ranger",
            AbilityKind::Beast {
                cap_fraction: 0.5,
                resist_ignore: 0.5,
                growth_per_attack: 4.0,
            },
        ))
        .with_class(ClassDef::new(
            "mage",
            "Mage",
            AbilityKind::ArcaneBurst {
                scale: 1.0,
                mitigation_ignore: 0.0,
            },
        ))
        .with_weapon(WeaponDef::new("echo_staff", "Echo Staff").with_effect(WeaponEffect::CastEcho {
            every: 2,
            bonus: 1.0,
        }))
        .with_weapon(WeaponDef::new("fang", "Fang").with_effect(WeaponEffect::LifeSteal {
            fraction: 0.5,
        }))
        .with_weapon(WeaponDef::new("spear", "Spear").with_effect(WeaponEffect::Mark {
            bonus: 0.5,
            rounds: 2,
        }))
        .with_weapon(WeaponDef::new("maul", "Maul").with_effect(WeaponEffect::StunEvery {
            attacks: 3,
            turns: 1,
        }))
        .with_passive(PassiveDef::new(
            "haunt",
            "Haunt",
            vec![PassiveEffect::SpectralMark { bonus: 0.5 }],
        ))
}

fn fighter(name: &str, hp: i64, auto: i64, def: i64, cap: i64, rescap: i64) -> CombatantSpec {
    CombatantSpec::new(name, StatRecord::full(hp, auto, def, cap, rescap, 10))
}

/// Build both sides and fix their opponent-dependent modifiers.
fn pair(a: CombatantSpec, b: CombatantSpec, config: &DuelConfig) -> (Combatant, Combatant) {
    let catalog = catalog();
    let mut first = Combatant::build(&a, Side::First, &catalog).unwrap();
    let mut second = Combatant::build(&b, Side::Second, &catalog).unwrap();
    first.prepare_against(&second, config);
    second.prepare_against(&first, config);
    (first, second)
}

fn lines(journal: &Journal) -> Vec<String> {
    journal.steps().iter().flat_map(|s| s.lines.clone()).collect()
}

fn count(lines: &[String], needle: &str) -> usize {
    lines.iter().filter(|l| l.contains(needle)).count()
}

#[test]
fn mending_heals_missing_hp_and_capacity() {
    let mut config = DuelConfig::default();
    config.cooldowns.mending = 1;
    let (mut cleric, mut target) = pair(
        fighter("Cleric", 100, 10, 0, 20, 0).class("cleric"),
        fighter("Target", 100, 0, 0, 0, 0),
        &config,
    );
    cleric.lose_hp(60);

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    take_action(&mut x, &mut cleric, &mut target);

    // 60 × 0.5 + 20 × 0.5
    assert_eq!(cleric.hp(), 80);
    assert_eq!(target.hp(), 100);
    assert!(lines(&journal).contains(&"Cleric mends 40 HP".to_owned()));
}

#[test]
fn flurry_opens_on_attack_then_blends_capacity() {
    let mut config = DuelConfig::default();
    config.cooldowns.flurry = 1;
    let (mut warrior, mut target) = pair(
        fighter("Warrior", 100, 40, 0, 20, 0).class("warrior"),
        fighter("Target", 500, 0, 40, 0, 0),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    take_action(&mut x, &mut warrior, &mut target);

    let lines = lines(&journal);
    // 40 − 20, then (40 + 10) − 20 twice
    assert_eq!(count(&lines, "with flurry for 20 physical"), 1);
    assert_eq!(count(&lines, "with flurry for 30 physical"), 2);
    assert_eq!(target.hp(), 420);
}

#[test]
fn ability_ward_stretches_and_softens_flurry() {
    let mut config = DuelConfig::default();
    config.cooldowns.flurry = 2;
    let (mut warrior, mut dwarf) = pair(
        fighter("Warrior", 100, 40, 0, 20, 0).class("warrior"),
        fighter("Dwarf", 500, 0, 40, 0, 0).race("dwarf"),
        &config,
    );
    assert_eq!(warrior.cooldowns.period(AbilityKey::Flurry), Some(3));

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    for _ in 0..3 {
        take_action(&mut x, &mut warrior, &mut dwarf);
    }

    let lines = lines(&journal);
    assert_eq!(count(&lines, "with a basic attack for 20"), 2);
    // 20 × 0.8, then 30 × 0.8 twice
    assert_eq!(count(&lines, "with flurry for 16 physical damage (warded)"), 1);
    assert_eq!(count(&lines, "with flurry for 24 physical damage (warded)"), 2);
    assert_eq!(dwarf.hp(), 500 - 40 - 64);
}

#[test]
fn retribution_returns_and_heals_from_the_bank() {
    let mut config = DuelConfig::default();
    config.cooldowns.retribution = 2;
    let (mut monk, mut brute) = pair(
        fighter("Monk", 200, 10, 0, 0, 0).class("monk"),
        fighter("Brute", 300, 0, 0, 0, 0),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    resolve_hit(&mut x, &mut brute, &mut monk, Hit::fixed("a cleave", 80.0));
    assert_eq!(monk.status.bank, 80);

    take_action(&mut x, &mut monk, &mut brute);
    assert_eq!(brute.hp(), 290);

    take_action(&mut x, &mut monk, &mut brute);
    assert_eq!(brute.hp(), 210);
    assert_eq!(monk.hp(), 160);
    assert_eq!(monk.status.bank, 0);
    assert_eq!(count(&lines(&journal), "Monk recovers 40 HP"), 1);
}

#[test]
fn retribution_with_empty_bank_swings_instead() {
    let mut config = DuelConfig::default();
    config.cooldowns.retribution = 1;
    let (mut monk, mut brute) = pair(
        fighter("Monk", 200, 10, 0, 0, 0).class("monk"),
        fighter("Brute", 300, 0, 0, 0, 0),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    take_action(&mut x, &mut monk, &mut brute);

    assert_eq!(brute.hp(), 290);
    assert_eq!(monk.status.counter(Counter::BasicAttacks), 1);
    assert_eq!(count(&lines(&journal), "Monk has nothing to avenge"), 1);
}

#[test]
fn beast_grows_with_basic_attacks() {
    let config = DuelConfig::default();
    let (mut ranger, mut target) = pair(
        fighter("Ranger", 100, 20, 0, 40, 0).class("ranger"),
        fighter("Target", 1000, 0, 0, 0, 20),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    take_action(&mut x, &mut ranger, &mut target);
    take_action(&mut x, &mut ranger, &mut target);

    let lines = lines(&journal);
    // 40 × 0.5 + 4 per basic attack, against half of 20 resistance
    assert_eq!(count(&lines, "with its beast for 19 magical"), 1);
    assert_eq!(count(&lines, "with its beast for 23 magical"), 1);
    assert_eq!(target.hp(), 1000 - 20 - 19 - 20 - 23);
}

#[test]
fn cast_echo_amplifies_every_second_cast() {
    let mut config = DuelConfig::default();
    config.cooldowns.arcane_burst = 1;
    let (mut mage, mut target) = pair(
        fighter("Mage", 100, 0, 0, 60, 0).class("mage").weapon("echo_staff"),
        fighter("Target", 1000, 0, 0, 0, 30),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    for _ in 0..3 {
        take_action(&mut x, &mut mage, &mut target);
    }

    let lines = lines(&journal);
    assert_eq!(count(&lines, "Mage's spell echoes"), 1);
    assert_eq!(count(&lines, "with arcane burst for 45 magical"), 2);
    assert_eq!(count(&lines, "with arcane burst for 90 magical"), 1);
    assert_eq!(target.hp(), 1000 - 180);
}

#[test]
fn lifesteal_heals_from_final_damage() {
    let config = DuelConfig::default();
    let (mut vampire, mut target) = pair(
        fighter("Vampire", 100, 50, 0, 0, 0).weapon("fang"),
        fighter("Target", 100, 0, 20, 0, 0),
        &config,
    );
    vampire.lose_hp(50);

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    take_action(&mut x, &mut vampire, &mut target);

    assert_eq!(target.hp(), 60);
    assert_eq!(vampire.hp(), 70);
    assert_eq!(count(&lines(&journal), "Vampire drains 20 HP"), 1);
}

#[test]
fn weapon_mark_boosts_until_it_expires() {
    let config = DuelConfig::default();
    let (mut hunter, mut prey) = pair(
        fighter("Hunter", 100, 40, 0, 0, 0).weapon("spear"),
        fighter("Prey", 1000, 0, 0, 0, 0),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::headless();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    let strike = Hit::physical("a thrust", 40.0, 0.0);

    assert_eq!(resolve_hit(&mut x, &mut hunter, &mut prey, strike).damage, 40);
    assert_eq!(prey.status.mark.map(|m| m.rounds), Some(2));
    assert_eq!(resolve_hit(&mut x, &mut hunter, &mut prey, strike).damage, 60);

    prey.status.tick_mark();
    prey.status.tick_mark();
    assert!(prey.status.mark.is_none());
    assert_eq!(resolve_hit(&mut x, &mut hunter, &mut prey, strike).damage, 40);
}

#[test]
fn spectral_mark_applies_once() {
    let config = DuelConfig::default();
    let (mut haunter, mut target) = pair(
        fighter("Haunter", 100, 40, 0, 0, 0).passive("haunt", 1),
        fighter("Target", 1000, 0, 0, 0, 0),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::recording();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);
    let strike = Hit::physical("a touch", 40.0, 0.0);

    let damage: Vec<u32> = (0..3)
        .map(|_| resolve_hit(&mut x, &mut haunter, &mut target, strike).damage)
        .collect();
    assert_eq!(damage, vec![40, 60, 60]);
    assert_eq!(target.status.spectral, Some(0.5));
    assert_eq!(count(&lines(&journal), "spectrally marked"), 1);
}

#[test]
fn stun_lands_on_every_third_landed_hit() {
    let config = DuelConfig::default();
    let (mut brute, mut target) = pair(
        fighter("Brute", 100, 30, 0, 0, 0).weapon("maul"),
        fighter("Target", 1000, 0, 0, 0, 0),
        &config,
    );

    let mut rng = ScriptedRng::never();
    let mut journal = Journal::headless();
    let mut x = Exchange::new(1, &config, &mut rng, &mut journal);

    take_action(&mut x, &mut brute, &mut target);
    target.status.dodge.arm();
    take_action(&mut x, &mut brute, &mut target);
    take_action(&mut x, &mut brute, &mut target);
    assert_eq!(brute.status.counter(Counter::HitsLanded), 2);
    assert_eq!(target.status.stunned_turns, 0);

    take_action(&mut x, &mut brute, &mut target);
    assert_eq!(brute.status.counter(Counter::HitsLanded), 3);
    assert_eq!(target.status.stunned_turns, 1);
}
