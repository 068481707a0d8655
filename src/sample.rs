//! A small self-contained roster for tests, demos, and benchmarks.
//!
//! Seven species cover the interesting corners of the type chart
//! (an immunity, a double weakness, wide speed and attack spreads) and
//! the move list exercises every capability block: plain damage,
//! priority, OHKO, healing, boosts, substitute, locking, and secondary
//! status riders.

use crate::data::{
    Accuracy, BaseStats, BoostSpec, BoostTarget, Catalogs, Category, ElemType, MoveCatalog,
    MoveDef, MoveId, SecondaryEffect, SpeciesCatalog, SpeciesDef, SpeciesId, TypeChart, UsageTable,
    VolatileSpec,
};
use crate::monster::{EvSpread, Monster, Nature, StatKey, Status};

fn species_catalog() -> SpeciesCatalog {
    let defs: [(&str, &[ElemType], [u32; 6]); 7] = [
        ("slugger", &[ElemType::Normal], [60, 60, 60, 60, 60, 60]),
        ("cindercub", &[ElemType::Fire], [55, 65, 50, 80, 60, 85]),
        (
            "sproutling",
            &[ElemType::Grass, ElemType::Poison],
            [60, 45, 55, 75, 70, 50],
        ),
        (
            "stonehide",
            &[ElemType::Rock, ElemType::Ground],
            [80, 100, 110, 30, 45, 30],
        ),
        ("gravewisp", &[ElemType::Ghost], [45, 35, 45, 90, 80, 90]),
        ("riptide", &[ElemType::Water], [70, 85, 70, 90, 75, 95]),
        (
            "zephyrix",
            &[ElemType::Electric, ElemType::Flying],
            [65, 60, 55, 95, 60, 110],
        ),
    ];

    let mut catalog = SpeciesCatalog::new();
    for (index, (name, types, [hp, atk, def, spa, spd, spe])) in defs.into_iter().enumerate() {
        catalog.register(SpeciesDef::new(
            SpeciesId::new(index as u32 + 1),
            name,
            types,
            BaseStats { hp, atk, def, spa, spd, spe },
        ));
    }
    catalog
}

fn move_catalog() -> MoveCatalog {
    let mut catalog = MoveCatalog::new();
    let mut register = |mv: MoveDef| catalog.register(mv);
    let mut id = 0u32;
    let mut next = move || {
        id += 1;
        MoveId::new(id)
    };

    register(MoveDef::new(
        next(),
        "tackle",
        Category::Physical,
        40,
        Accuracy::Always,
        ElemType::Normal,
    ));
    register(
        MoveDef::new(next(), "quickjab", Category::Physical, 40, Accuracy::Always, ElemType::Normal)
            .with_priority(1),
    );
    register(
        MoveDef::new(next(), "ember", Category::Special, 40, Accuracy::Always, ElemType::Fire)
            .with_secondary(SecondaryEffect {
                chance: 10,
                status: Some(Status::Burn),
                boosts: None,
                volatile: None,
            }),
    );
    register(MoveDef::new(
        next(),
        "watergun",
        Category::Special,
        40,
        Accuracy::Always,
        ElemType::Water,
    ));
    register(MoveDef::new(
        next(),
        "stormsurf",
        Category::Special,
        110,
        Accuracy::Percent(70),
        ElemType::Water,
    ));
    register(
        MoveDef::new(next(), "scorchjet", Category::Special, 80, Accuracy::Always, ElemType::Water)
            .with_thaws_target()
            .with_secondary(SecondaryEffect {
                chance: 30,
                status: Some(Status::Burn),
                boosts: None,
                volatile: None,
            }),
    );
    register(MoveDef::new(
        next(),
        "seedbomb",
        Category::Physical,
        80,
        Accuracy::Always,
        ElemType::Grass,
    ));
    register(MoveDef::new(
        next(),
        "shadowbolt",
        Category::Special,
        80,
        Accuracy::Always,
        ElemType::Ghost,
    ));
    register(
        MoveDef::new(next(), "voltsurge", Category::Special, 90, Accuracy::Percent(100), ElemType::Electric)
            .with_secondary(SecondaryEffect {
                chance: 10,
                status: Some(Status::Paralysis),
                boosts: None,
                volatile: None,
            }),
    );
    register(
        MoveDef::new(next(), "stunpulse", Category::Status, 0, Accuracy::Percent(90), ElemType::Electric)
            .with_secondary(SecondaryEffect {
                chance: 100,
                status: Some(Status::Paralysis),
                boosts: None,
                volatile: None,
            }),
    );
    register(
        MoveDef::new(next(), "toxin", Category::Status, 0, Accuracy::Percent(90), ElemType::Poison)
            .with_secondary(SecondaryEffect {
                chance: 100,
                status: Some(Status::Toxic),
                boosts: None,
                volatile: None,
            }),
    );
    register(
        MoveDef::new(next(), "sleepspore", Category::Status, 0, Accuracy::Percent(75), ElemType::Grass)
            .with_secondary(SecondaryEffect {
                chance: 100,
                status: Some(Status::Sleep),
                boosts: None,
                volatile: None,
            }),
    );
    register(
        MoveDef::new(next(), "wardance", Category::Status, 0, Accuracy::Always, ElemType::Normal)
            .with_boosts(BoostSpec::new(BoostTarget::User, &[(StatKey::Atk, 2)])),
    );
    register(
        MoveDef::new(next(), "regrow", Category::Status, 0, Accuracy::Always, ElemType::Grass)
            .with_heal(0.5),
    );
    register(
        MoveDef::new(next(), "decoy", Category::Status, 0, Accuracy::Always, ElemType::Normal)
            .with_volatile(VolatileSpec::named("substitute")),
    );
    register(
        MoveDef::new(next(), "rampage", Category::Physical, 110, Accuracy::Always, ElemType::Normal)
            .with_volatile(VolatileSpec::named("lockedmove")),
    );
    register(
        MoveDef::new(next(), "deathroll", Category::Physical, 0, Accuracy::Percent(30), ElemType::Normal)
            .with_ohko(),
    );

    catalog
}

fn usage_table(species: &SpeciesCatalog, moves: &MoveCatalog) -> UsageTable {
    let ranked: [(&str, &[&str]); 7] = [
        ("slugger", &["tackle", "wardance", "quickjab", "decoy"]),
        ("cindercub", &["ember", "tackle", "quickjab"]),
        ("sproutling", &["seedbomb", "sleepspore", "regrow"]),
        ("stonehide", &["tackle", "wardance"]),
        ("gravewisp", &["shadowbolt", "toxin"]),
        ("riptide", &["watergun", "stormsurf"]),
        ("zephyrix", &["voltsurge", "quickjab"]),
    ];

    let mut table = UsageTable::new();
    for (name, move_names) in ranked {
        let id = species.find_by_name(name).expect("sample species").id;
        let ids = move_names
            .iter()
            .map(|n| moves.find_by_name(n).expect("sample move").id)
            .collect();
        table.set_ranked(id, ids);
    }
    table
}

/// The full sample data set.
#[must_use]
pub fn catalogs() -> Catalogs {
    let species = species_catalog();
    let moves = move_catalog();
    let usage = usage_table(&species, &moves);
    Catalogs {
        species,
        moves,
        type_chart: TypeChart::standard(),
        usage,
    }
}

/// A level-100, zero-EV, neutral-nature member of the named sample
/// species carrying its usage-ranked moveset.
///
/// Panics on an unknown name; the sample roster is fixed.
#[must_use]
pub fn monster(name: &str, catalogs: &Catalogs) -> Monster {
    let species = catalogs.species.find_by_name(name).expect("sample species");
    let moves = catalogs.usage.ranked(species.id).to_vec();
    Monster::new(species.id, &moves, 100, Nature::Quirky, EvSpread::default(), catalogs)
        .expect("sample monster is valid")
}

/// Like [`monster`], but with an explicit moveset by name.
#[must_use]
pub fn monster_with(name: &str, move_names: &[&str], catalogs: &Catalogs) -> Monster {
    let species = catalogs.species.find_by_name(name).expect("sample species");
    let moves: Vec<MoveId> = move_names
        .iter()
        .map(|n| catalogs.moves.find_by_name(n).expect("sample move").id)
        .collect();
    Monster::new(species.id, &moves, 100, Nature::Quirky, EvSpread::default(), catalogs)
        .expect("sample monster is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_ranked_move_resolves() {
        let catalogs = catalogs();
        for species in catalogs.species.iter() {
            let ranked = catalogs.usage.ranked(species.id);
            assert!(!ranked.is_empty(), "{} has no ranked moves", species.name);
            for &mv in ranked {
                assert!(catalogs.moves.contains(mv));
            }
        }
    }

    #[test]
    fn test_roster_builds_monsters() {
        let catalogs = catalogs();
        for name in [
            "slugger",
            "cindercub",
            "sproutling",
            "stonehide",
            "gravewisp",
            "riptide",
            "zephyrix",
        ] {
            let m = monster(name, &catalogs);
            assert!(m.max_hp() > 0);
            assert!(!m.moves.is_empty());
        }
    }
}
