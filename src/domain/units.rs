// Unit catalog: the fixed roster of recruitable units and where they are built

use std::fmt;

/// Building a unit is recruited in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facility {
    Barracks,
    HallOfOrder,
}

/// The five unit kinds the planner composes armies from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    Axe,
    LightCavalry,
    MountedArcher,
    Berserker,
    Ram,
}

impl UnitKind {
    /// All kinds, in column order of the decision variables and the output table
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Axe,
        UnitKind::LightCavalry,
        UnitKind::MountedArcher,
        UnitKind::Berserker,
        UnitKind::Ram,
    ];

    /// Kinds whose attack share is steered by the strength weights
    pub const WEIGHTED: [UnitKind; 3] = [
        UnitKind::Axe,
        UnitKind::LightCavalry,
        UnitKind::MountedArcher,
    ];

    /// Position of this kind's decision variable
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitKind::Axe => "axe",
            UnitKind::LightCavalry => "lc",
            UnitKind::MountedArcher => "ma",
            UnitKind::Berserker => "serk",
            UnitKind::Ram => "ram",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static attributes of a unit kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub kind: UnitKind,
    pub attack_strength: u32,
    pub recruit_time_seconds: u32,
    pub food_cost: u32,
    pub facility: Facility,
}

const UNITS: [Unit; 5] = [
    Unit {
        kind: UnitKind::Axe,
        attack_strength: 45,
        recruit_time_seconds: 90,
        food_cost: 1,
        facility: Facility::Barracks,
    },
    Unit {
        kind: UnitKind::LightCavalry,
        attack_strength: 130,
        recruit_time_seconds: 360,
        food_cost: 4,
        facility: Facility::Barracks,
    },
    Unit {
        kind: UnitKind::MountedArcher,
        attack_strength: 150,
        recruit_time_seconds: 450,
        food_cost: 5,
        facility: Facility::Barracks,
    },
    Unit {
        kind: UnitKind::Berserker,
        attack_strength: 300,
        recruit_time_seconds: 1200,
        food_cost: 6,
        facility: Facility::HallOfOrder,
    },
    Unit {
        kind: UnitKind::Ram,
        attack_strength: 2,
        recruit_time_seconds: 480,
        food_cost: 5,
        facility: Facility::Barracks,
    },
];

/// Read-only view over the unit roster
pub struct UnitCatalog;

impl UnitCatalog {
    pub fn units() -> &'static [Unit; 5] {
        &UNITS
    }

    pub fn unit(kind: UnitKind) -> &'static Unit {
        &UNITS[kind.index()]
    }

    pub fn units_in(facility: Facility) -> impl Iterator<Item = &'static Unit> {
        UNITS.iter().filter(move |u| u.facility == facility)
    }

    pub fn barracks_units() -> impl Iterator<Item = &'static Unit> {
        Self::units_in(Facility::Barracks)
    }

    pub fn hall_of_order_units() -> impl Iterator<Item = &'static Unit> {
        Self::units_in(Facility::HallOfOrder)
    }
}
