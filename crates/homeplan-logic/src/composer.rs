//! Floor composition — which rooms go on which floor, in which zone.
//!
//! Composition is table-driven. [`floor_rules`] returns, for a supported
//! floor count, one [`FloorRule`] per storey (ground first). Each rule is an
//! ordered list of [`Slot`]s; expanding the slots in order yields the floor's
//! room list, so the table order is also the left-to-right placement order.
//!
//! # Extras pools
//!
//! Parsed extras are split into three disjoint, order-preserving pools before
//! any floor is composed:
//!
//! | pool | categories |
//! |------|------------|
//! | [`ExtrasPool::Ground`] | utility, pooja, closet |
//! | [`ExtrasPool::Top`] | terrace |
//! | [`ExtrasPool::Upper`] | everything else |
//!
//! Single-storey houses draw from [`ExtrasPool::Any`], the unfiltered list.
//! Every pool has a cursor. Floors are composed ground-up and each draw
//! consumes the next items from the cursor, so an extra taken by one floor is
//! never offered to a later one.

use crate::constants::{names, weights};
use crate::error::LayoutError;
use crate::features::ExtraFeature;
use crate::request::HouseParams;
use crate::rooms::{FloorSpec, RoomCategory, RoomSpec, Zone};

/// Which extras list a slot draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtrasPool {
    /// All extras, unfiltered.
    Any,
    Ground,
    Upper,
    Top,
}

impl ExtrasPool {
    /// Pool an extra of `category` belongs to on a multi-storey house.
    pub fn for_category(category: RoomCategory) -> ExtrasPool {
        match category {
            RoomCategory::Utility | RoomCategory::Pooja | RoomCategory::Closet => {
                ExtrasPool::Ground
            }
            RoomCategory::Terrace => ExtrasPool::Top,
            _ => ExtrasPool::Upper,
        }
    }
}

/// How many of the house's bedrooms a floor takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomTake {
    /// Every bedroom, master first.
    All,
    /// The first `min(bedrooms, n)` bedrooms, master first.
    UpTo(usize),
    /// Whatever `UpTo(n)` left over, at least one, all standard bedrooms.
    RemainderAfter(usize),
}

/// How many bathrooms a floor takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BathroomTake {
    /// Every bathroom: "Attached Bath", then "Bathroom 2", "Bathroom 3", ...
    All,
    /// `max(bathrooms - placed, 1)` bathrooms, numbered after the `placed`
    /// ones on lower floors. With `attached_first` the first is the attached bath.
    RemainderAfter { placed: usize, attached_first: bool },
}

/// One entry of a floor rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    Fixed {
        name: &'static str,
        category: RoomCategory,
        zone: Zone,
        weight: f64,
    },
    Bedrooms {
        take: BedroomTake,
        zone: Zone,
    },
    Bathrooms {
        take: BathroomTake,
        zone: Zone,
    },
    /// Present only when the house asked for a balcony.
    Balcony { zone: Zone, weight: f64 },
    /// Present only when the house asked for a garage.
    Garage { zone: Zone, weight: f64 },
    Extras {
        pool: ExtrasPool,
        take: usize,
        zone: Zone,
        weight: f64,
    },
}

/// Composition rule for one storey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorRule {
    pub label: &'static str,
    pub slots: &'static [Slot],
}

const fn fixed(name: &'static str, category: RoomCategory, zone: Zone, weight: f64) -> Slot {
    Slot::Fixed {
        name,
        category,
        zone,
        weight,
    }
}

const LIVING: Slot = fixed(names::LIVING, RoomCategory::Living, Zone::Bottom, weights::LIVING);
const DINING: Slot = fixed(names::DINING, RoomCategory::Dining, Zone::Bottom, weights::DINING);
const STAIRCASE: Slot = fixed(
    names::STAIRCASE,
    RoomCategory::Staircase,
    Zone::Top,
    weights::STAIRCASE,
);
const GARAGE: Slot = Slot::Garage {
    zone: Zone::Bottom,
    weight: weights::GARAGE,
};
const UPPER_BALCONY: Slot = Slot::Balcony {
    zone: Zone::Top,
    weight: weights::BALCONY_UPPER,
};

const GROUND_FLOOR_LABEL: &str = "Ground Floor Plan";
const FIRST_FLOOR_LABEL: &str = "First Floor Plan";
const SECOND_FLOOR_LABEL: &str = "Second Floor Plan";

/// Ground floor of every multi-storey house.
const MULTI_STOREY_GROUND: FloorRule = FloorRule {
    label: GROUND_FLOOR_LABEL,
    slots: &[
        LIVING,
        DINING,
        fixed(names::KITCHEN, RoomCategory::Kitchen, Zone::Top, weights::KITCHEN),
        fixed(names::BATHROOM, RoomCategory::Bathroom, Zone::Top, weights::BATHROOM),
        STAIRCASE,
        GARAGE,
        Slot::Extras {
            pool: ExtrasPool::Ground,
            take: 1,
            zone: Zone::Top,
            weight: weights::EXTRA_GROUND,
        },
    ],
};

static ONE_STOREY: [FloorRule; 1] = [FloorRule {
    label: GROUND_FLOOR_LABEL,
    slots: &[
        LIVING,
        DINING,
        fixed(names::KITCHEN, RoomCategory::Kitchen, Zone::Bottom, weights::KITCHEN),
        Slot::Bedrooms {
            take: BedroomTake::All,
            zone: Zone::Top,
        },
        Slot::Bathrooms {
            take: BathroomTake::All,
            zone: Zone::Top,
        },
        Slot::Balcony {
            zone: Zone::Top,
            weight: weights::BALCONY_SINGLE,
        },
        GARAGE,
        Slot::Extras {
            pool: ExtrasPool::Any,
            take: 2,
            zone: Zone::Top,
            weight: weights::EXTRA_SINGLE,
        },
    ],
}];

static TWO_STOREY: [FloorRule; 2] = [
    MULTI_STOREY_GROUND,
    FloorRule {
        label: FIRST_FLOOR_LABEL,
        slots: &[
            Slot::Bedrooms {
                take: BedroomTake::All,
                zone: Zone::Bottom,
            },
            Slot::Bathrooms {
                take: BathroomTake::RemainderAfter {
                    placed: 1,
                    attached_first: true,
                },
                zone: Zone::Top,
            },
            STAIRCASE,
            UPPER_BALCONY,
            Slot::Extras {
                pool: ExtrasPool::Upper,
                take: 2,
                zone: Zone::Top,
                weight: weights::EXTRA_UPPER,
            },
        ],
    },
];

static THREE_STOREY: [FloorRule; 3] = [
    MULTI_STOREY_GROUND,
    FloorRule {
        label: FIRST_FLOOR_LABEL,
        slots: &[
            Slot::Bedrooms {
                take: BedroomTake::UpTo(2),
                zone: Zone::Bottom,
            },
            fixed(
                names::ATTACHED_BATH,
                RoomCategory::Bathroom,
                Zone::Top,
                weights::BATHROOM,
            ),
            STAIRCASE,
            UPPER_BALCONY,
            Slot::Extras {
                pool: ExtrasPool::Upper,
                take: 1,
                zone: Zone::Top,
                weight: weights::EXTRA_UPPER,
            },
        ],
    },
    FloorRule {
        label: SECOND_FLOOR_LABEL,
        slots: &[
            Slot::Bedrooms {
                take: BedroomTake::RemainderAfter(2),
                zone: Zone::Bottom,
            },
            Slot::Bathrooms {
                take: BathroomTake::RemainderAfter {
                    placed: 2,
                    attached_first: false,
                },
                zone: Zone::Top,
            },
            STAIRCASE,
            fixed(names::TERRACE, RoomCategory::Terrace, Zone::Top, weights::TERRACE),
            Slot::Extras {
                pool: ExtrasPool::Upper,
                take: 1,
                zone: Zone::Top,
                weight: weights::EXTRA_UPPER,
            },
        ],
    },
];

/// Rules for a house of `floor_count` storeys, ground floor first.
pub fn floor_rules(floor_count: i64) -> Result<&'static [FloorRule], LayoutError> {
    match floor_count {
        1 => Ok(&ONE_STOREY),
        2 => Ok(&TWO_STOREY),
        3 => Ok(&THREE_STOREY),
        other => Err(LayoutError::InvalidFloorCount(other)),
    }
}

/// Floor counts present in the rule table.
pub fn supported_floor_counts() -> std::ops::RangeInclusive<i64> {
    1..=3
}

/// Extras split into pools, each with its own consumption cursor.
struct ExtrasPools<'a> {
    any: Vec<&'a ExtraFeature>,
    ground: Vec<&'a ExtraFeature>,
    upper: Vec<&'a ExtraFeature>,
    top: Vec<&'a ExtraFeature>,
    cursors: [usize; 4],
}

impl<'a> ExtrasPools<'a> {
    fn new(extras: &'a [ExtraFeature]) -> Self {
        let of = |pool: ExtrasPool| -> Vec<&'a ExtraFeature> {
            extras
                .iter()
                .filter(|e| ExtrasPool::for_category(e.category) == pool)
                .collect()
        };
        Self {
            any: extras.iter().collect(),
            ground: of(ExtrasPool::Ground),
            upper: of(ExtrasPool::Upper),
            top: of(ExtrasPool::Top),
            cursors: [0; 4],
        }
    }

    /// Take up to `count` not-yet-consumed extras from `pool`.
    fn draw(&mut self, pool: ExtrasPool, count: usize) -> Vec<&'a ExtraFeature> {
        let (items, slot) = match pool {
            ExtrasPool::Any => (&self.any, 0),
            ExtrasPool::Ground => (&self.ground, 1),
            ExtrasPool::Upper => (&self.upper, 2),
            ExtrasPool::Top => (&self.top, 3),
        };
        let start = self.cursors[slot].min(items.len());
        let end = (start + count).min(items.len());
        self.cursors[slot] = end;
        items[start..end].to_vec()
    }
}

/// Expand the floor rules for `params` into per-floor room lists.
pub fn compose_floors(
    params: &HouseParams,
    extras: &[ExtraFeature],
) -> Result<Vec<FloorSpec>, LayoutError> {
    let rules = floor_rules(params.floor_count as i64)?;
    let per_floor = params.total_area / rules.len() as f64;
    let mut pools = ExtrasPools::new(extras);

    let mut floors = Vec::with_capacity(rules.len());
    for rule in rules {
        let mut rooms = Vec::new();
        for slot in rule.slots {
            expand_slot(slot, params, &mut pools, &mut rooms)?;
        }
        log::debug!(
            "{}: {} rooms ({} top, {} bottom)",
            rule.label,
            rooms.len(),
            rooms.iter().filter(|r| r.zone() == Zone::Top).count(),
            rooms.iter().filter(|r| r.zone() == Zone::Bottom).count(),
        );
        floors.push(FloorSpec {
            label: rule.label.to_string(),
            rooms,
            area: per_floor,
        });
    }
    Ok(floors)
}

fn expand_slot(
    slot: &Slot,
    params: &HouseParams,
    pools: &mut ExtrasPools<'_>,
    rooms: &mut Vec<RoomSpec>,
) -> Result<(), LayoutError> {
    match *slot {
        Slot::Fixed {
            name,
            category,
            zone,
            weight,
        } => rooms.push(RoomSpec::new(name, category, zone, weight)?),
        Slot::Bedrooms { take, zone } => {
            let beds = params.bedrooms;
            let (first, count, master) = match take {
                BedroomTake::All => (0, beds, true),
                BedroomTake::UpTo(n) => (0, beds.min(n), true),
                BedroomTake::RemainderAfter(n) => {
                    let first = beds.min(n);
                    (first, beds.saturating_sub(first).max(1), false)
                }
            };
            for index in first..first + count {
                let (name, weight) = if master && index == 0 {
                    (names::bedroom(0), weights::MASTER_BEDROOM)
                } else {
                    (format!("Bedroom {}", index + 1), weights::BEDROOM)
                };
                rooms.push(RoomSpec::new(name, RoomCategory::Bedroom, zone, weight)?);
            }
        }
        Slot::Bathrooms { take, zone } => {
            let baths = params.bathrooms;
            let (placed, count, attached_first) = match take {
                BathroomTake::All => (0, baths, true),
                BathroomTake::RemainderAfter {
                    placed,
                    attached_first,
                } => (placed, baths.saturating_sub(placed).max(1), attached_first),
            };
            for i in 0..count {
                let name = if attached_first && i == 0 {
                    names::ATTACHED_BATH.to_string()
                } else {
                    names::numbered_bathroom(placed + i + 1)
                };
                rooms.push(RoomSpec::new(
                    name,
                    RoomCategory::Bathroom,
                    zone,
                    weights::BATHROOM,
                )?);
            }
        }
        Slot::Balcony { zone, weight } => {
            if params.has_balcony {
                rooms.push(RoomSpec::new(
                    names::BALCONY,
                    RoomCategory::Balcony,
                    zone,
                    weight,
                )?);
            }
        }
        Slot::Garage { zone, weight } => {
            if params.has_garage {
                rooms.push(RoomSpec::new(
                    names::GARAGE,
                    RoomCategory::Garage,
                    zone,
                    weight,
                )?);
            }
        }
        Slot::Extras {
            pool,
            take,
            zone,
            weight,
        } => {
            for extra in pools.draw(pool, take) {
                rooms.push(RoomSpec::new(
                    extra.name.clone(),
                    extra.category,
                    zone,
                    weight,
                )?);
            }
        }
    }
    Ok(())
}
