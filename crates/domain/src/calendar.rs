// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Month-grid state for the admin reservation calendar.
//!
//! Every bungalow shown for a month gets two day-state maps. Each map holds
//! exactly one entry per day of the month. A zero tag marks a free day. A
//! positive tag in the reservation map is the reservation occupying that
//! day. A positive tag in the block map is the owner block restriction
//! starting on that day.

use crate::dates::YearMonth;
use crate::types::{BungalowRestriction, RestrictionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Per-day tags for one bungalow over one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Date, i64)>", into = "Vec<(Date, i64)>")]
pub struct DayStateMap {
    days: BTreeMap<Date, i64>,
}

impl DayStateMap {
    /// A map with every day of `month` tagged 0.
    #[must_use]
    pub fn seeded(month: &YearMonth) -> Self {
        Self {
            days: month.days().map(|day| (day, 0)).collect(),
        }
    }

    /// The tag for `date`, or `None` if the day is outside the map.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<i64> {
        self.days.get(&date).copied()
    }

    /// Tags a day that is already present in the map.
    ///
    /// Returns `false` and leaves the map untouched for days outside it.
    pub fn tag(&mut self, date: Date, id: i64) -> bool {
        self.days.get_mut(&date).is_some_and(|slot| {
            *slot = id;
            true
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// All days with their tags, in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, i64)> + '_ {
        self.days.iter().map(|(day, tag)| (*day, *tag))
    }

    /// Days with a positive tag.
    pub fn tagged(&self) -> impl Iterator<Item = (Date, i64)> + '_ {
        self.iter().filter(|(_, tag)| *tag > 0)
    }
}

impl From<Vec<(Date, i64)>> for DayStateMap {
    fn from(entries: Vec<(Date, i64)>) -> Self {
        Self {
            days: entries.into_iter().collect(),
        }
    }
}

impl From<DayStateMap> for Vec<(Date, i64)> {
    fn from(map: DayStateMap) -> Self {
        map.days.into_iter().collect()
    }
}

/// Calendar state of one bungalow for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BungalowMonth {
    pub bungalow_id: i64,
    pub reservation_map: DayStateMap,
    pub block_map: DayStateMap,
}

/// Builds the reservation and block maps of a bungalow for a month.
///
/// Restrictions of other bungalows are ignored. Reservation restrictions tag
/// every day they cover inside the month; block restrictions tag only their
/// start day.
///
/// # Arguments
///
/// * `month` - The month being displayed
/// * `bungalow_id` - The bungalow whose maps are built
/// * `restrictions` - Restrictions intersecting the month
#[must_use]
pub fn build_bungalow_month(
    month: &YearMonth,
    bungalow_id: i64,
    restrictions: &[BungalowRestriction],
) -> BungalowMonth {
    let mut reservation_map: DayStateMap = DayStateMap::seeded(month);
    let mut block_map: DayStateMap = DayStateMap::seeded(month);

    for restriction in restrictions
        .iter()
        .filter(|r| r.bungalow_id() == bungalow_id)
    {
        match (restriction.kind(), restriction.reservation_id()) {
            (RestrictionKind::Reservation, Some(reservation_id)) => {
                for day in restriction.range().days() {
                    reservation_map.tag(day, reservation_id);
                }
            }
            (RestrictionKind::Block, _) => {
                block_map.tag(restriction.range().start(), restriction.id());
            }
            (RestrictionKind::Reservation, None) => {}
        }
    }

    BungalowMonth {
        bungalow_id,
        reservation_map,
        block_map,
    }
}
