//! Move definitions and the move catalog.
//!
//! A move is a fixed record with optional capability blocks. Behavior is
//! the union of whichever blocks are present; the engine dispatches on
//! populated blocks, not on move identity. A damaging move with no
//! blocks applies only the base damage formula.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::types::ElemType;
use crate::monster::{StatKey, Status};

/// Unique identifier for a move definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveId(pub u32);

impl MoveId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Damage category of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Physical,
    Special,
    /// No base damage; only capability blocks apply.
    Status,
}

/// Accuracy of a move: guaranteed, or a percentage checked per use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accuracy {
    /// Never rolls, never misses.
    Always,
    /// Hits when `uniform(0, 100) < percent`.
    Percent(u8),
}

impl Accuracy {
    /// Probability of hitting, in [0, 1].
    #[must_use]
    pub fn hit_probability(self) -> f64 {
        match self {
            Accuracy::Always => 1.0,
            Accuracy::Percent(p) => f64::from(p) / 100.0,
        }
    }
}

/// Who a boost block applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostTarget {
    User,
    Target,
}

/// Stat-stage changes applied by a move or secondary effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostSpec {
    pub target: BoostTarget,
    /// (stat, stage delta) pairs. Stages are clamped to [-6, 6] at the
    /// single mutation site on the monster.
    pub stages: SmallVec<[(StatKey, i8); 2]>,
}

impl BoostSpec {
    #[must_use]
    pub fn new(target: BoostTarget, stages: &[(StatKey, i8)]) -> Self {
        Self {
            target,
            stages: SmallVec::from_slice(stages),
        }
    }
}

/// A volatile condition applied to the target on hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolatileSpec {
    /// Condition key. `"substitute"` and `"lockedmove"` get special
    /// handling; anything else is a named flag.
    pub name: String,
    /// Optional effect payload stored with a zeroed counter.
    pub effect: Option<String>,
}

impl VolatileSpec {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: None,
        }
    }

    #[must_use]
    pub fn with_effect(name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: Some(effect.into()),
        }
    }
}

/// A chance-gated rider resolved after the primary hit.
///
/// Rolls its own `uniform(0, 100) < chance` independent of the accuracy
/// roll, and is skipped entirely when the move was type-immune.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    pub chance: u8,
    /// Persistent status inflicted on the defender.
    pub status: Option<Status>,
    /// Stat stages applied on proc.
    pub boosts: Option<BoostSpec>,
    /// Volatile condition applied to the defender on proc.
    pub volatile: Option<VolatileSpec>,
}

/// A move definition: identity, base data, and capability blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveDef {
    pub id: MoveId,
    pub name: String,
    pub category: Category,
    pub base_power: u32,
    pub accuracy: Accuracy,
    /// Priority tier; higher acts first regardless of speed.
    pub priority: i8,
    pub elem: ElemType,

    // === Capability blocks ===
    /// Damage equals the defender's current HP, bypassing the formula.
    pub ohko: bool,
    /// Fraction of the user's max HP restored on use.
    pub heal: Option<f64>,
    pub boosts: Option<BoostSpec>,
    pub volatile: Option<VolatileSpec>,
    pub secondary: Option<SecondaryEffect>,
    /// Using this move thaws a frozen defender even when not fire-type.
    pub thaws_target: bool,
}

impl MoveDef {
    /// Create a move with no capability blocks.
    #[must_use]
    pub fn new(
        id: MoveId,
        name: impl Into<String>,
        category: Category,
        base_power: u32,
        accuracy: Accuracy,
        elem: ElemType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            base_power,
            accuracy,
            priority: 0,
            elem,
            ohko: false,
            heal: None,
            boosts: None,
            volatile: None,
            secondary: None,
            thaws_target: false,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_ohko(mut self) -> Self {
        self.ohko = true;
        self
    }

    #[must_use]
    pub fn with_heal(mut self, fraction: f64) -> Self {
        assert!((0.0..=1.0).contains(&fraction), "heal fraction out of range");
        self.heal = Some(fraction);
        self
    }

    #[must_use]
    pub fn with_boosts(mut self, boosts: BoostSpec) -> Self {
        self.boosts = Some(boosts);
        self
    }

    #[must_use]
    pub fn with_volatile(mut self, volatile: VolatileSpec) -> Self {
        self.volatile = Some(volatile);
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: SecondaryEffect) -> Self {
        self.secondary = Some(secondary);
        self
    }

    #[must_use]
    pub fn with_thaws_target(mut self) -> Self {
        self.thaws_target = true;
        self
    }

    /// Whether this move deals direct damage.
    #[must_use]
    pub fn is_damaging(&self) -> bool {
        self.category != Category::Status
    }
}

/// Registry of move definitions.
///
/// The catalog is closed-world: every id referenced by a team, an
/// observed event, or the usage table must resolve here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoveCatalog {
    moves: FxHashMap<MoveId, MoveDef>,
    next_id: u32,
}

impl MoveCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a move definition.
    ///
    /// Panics if a move with the same ID already exists.
    pub fn register(&mut self, mv: MoveDef) {
        if self.moves.contains_key(&mv.id) {
            panic!("Move with ID {:?} already registered", mv.id);
        }
        self.next_id = self.next_id.max(mv.id.0 + 1);
        self.moves.insert(mv.id, mv);
    }

    /// Next free auto-assignable id.
    #[must_use]
    pub fn next_id(&mut self) -> MoveId {
        let id = MoveId::new(self.next_id);
        self.next_id += 1;
        id
    }

    #[must_use]
    pub fn get(&self, id: MoveId) -> Option<&MoveDef> {
        self.moves.get(&id)
    }

    /// Get a move definition, panicking if not found.
    ///
    /// The data catalogs are assumed complete; a missing id is a fatal
    /// lookup failure.
    #[must_use]
    pub fn get_unchecked(&self, id: MoveId) -> &MoveDef {
        self.moves.get(&id).expect("Move not found in catalog")
    }

    #[must_use]
    pub fn contains(&self, id: MoveId) -> bool {
        self.moves.contains_key(&id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&MoveDef> {
        self.moves.values().find(|m| m.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveDef> {
        self.moves.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tackle() -> MoveDef {
        MoveDef::new(
            MoveId::new(1),
            "tackle",
            Category::Physical,
            40,
            Accuracy::Always,
            ElemType::Normal,
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = MoveCatalog::new();
        catalog.register(tackle());

        assert_eq!(catalog.get(MoveId::new(1)).unwrap().name, "tackle");
        assert!(catalog.get(MoveId::new(99)).is_none());
        assert!(catalog.contains(MoveId::new(1)));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut catalog = MoveCatalog::new();
        catalog.register(tackle());
        catalog.register(tackle());
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn test_get_unchecked_panics_on_missing() {
        let catalog = MoveCatalog::new();
        let _ = catalog.get_unchecked(MoveId::new(7));
    }

    #[test]
    fn test_find_by_name() {
        let mut catalog = MoveCatalog::new();
        catalog.register(tackle());

        assert!(catalog.find_by_name("tackle").is_some());
        assert!(catalog.find_by_name("hyperbeam").is_none());
    }

    #[test]
    fn test_capability_builders() {
        let mv = tackle()
            .with_priority(1)
            .with_heal(0.5)
            .with_secondary(SecondaryEffect {
                chance: 10,
                status: Some(Status::Burn),
                boosts: None,
                volatile: None,
            });

        assert_eq!(mv.priority, 1);
        assert_eq!(mv.heal, Some(0.5));
        assert_eq!(mv.secondary.as_ref().unwrap().chance, 10);
        assert!(mv.is_damaging());
    }

    #[test]
    fn test_status_moves_not_damaging() {
        let mv = MoveDef::new(
            MoveId::new(2),
            "growl",
            Category::Status,
            0,
            Accuracy::Always,
            ElemType::Normal,
        );
        assert!(!mv.is_damaging());
    }

    #[test]
    fn test_hit_probability() {
        assert_eq!(Accuracy::Always.hit_probability(), 1.0);
        assert_eq!(Accuracy::Percent(80).hit_probability(), 0.8);
    }

    #[test]
    fn test_serde_round_trip() {
        let mv = tackle().with_volatile(VolatileSpec::with_effect("confusion", "confusion"));
        let json = serde_json::to_string(&mv).unwrap();
        let back: MoveDef = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, back);
    }
}
