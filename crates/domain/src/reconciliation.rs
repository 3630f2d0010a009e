// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::DayStateMap;
use crate::dates::{DateRange, YearMonth};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// A single day of a single bungalow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayRef {
    pub bungalow_id: i64,
    pub date: Date,
}

impl DayRef {
    #[must_use]
    pub const fn new(bungalow_id: i64, date: Date) -> Self {
        Self { bungalow_id, date }
    }
}

/// The block maps an admin was shown, kept until the edits come back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    month: YearMonth,
    block_maps: BTreeMap<i64, DayStateMap>,
}

impl BlockSnapshot {
    #[must_use]
    pub const fn new(month: YearMonth, block_maps: BTreeMap<i64, DayStateMap>) -> Self {
        Self { month, block_maps }
    }

    #[must_use]
    pub const fn month(&self) -> YearMonth {
        self.month
    }

    #[must_use]
    pub fn block_map(&self, bungalow_id: i64) -> Option<&DayStateMap> {
        self.block_maps.get(&bungalow_id)
    }

    /// Whether the snapshot shows a block on the given day.
    #[must_use]
    pub fn has_block(&self, day: DayRef) -> bool {
        self.block_map(day.bungalow_id)
            .and_then(|map| map.get(day.date))
            .is_some_and(|tag| tag > 0)
    }
}

/// The admin's edits to a calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarSubmission {
    /// Previously blocked days that should stay blocked.
    pub keep_blocks: BTreeSet<DayRef>,
    /// Days that should become blocked.
    pub add_blocks: BTreeSet<DayRef>,
}

/// A single change to the restriction store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOperation {
    /// Remove the block restriction with this id.
    Delete {
        bungalow_id: i64,
        date: Date,
        restriction_id: i64,
    },
    /// Create a block restriction covering `range`.
    Insert { bungalow_id: i64, range: DateRange },
}

/// Computes the store operations that turn a snapshot into the submitted state.
///
/// Every snapshot block whose day is not kept is deleted. Every added day
/// becomes a new one-day block, unless the snapshot already shows a block on
/// that day; such a day counts as kept. Deletes come before inserts.
///
/// The snapshot is whatever the admin last loaded. Two admins editing the
/// same month race, and the last submission wins.
///
/// # Errors
///
/// Returns `DomainError::DayOutsideCalendar` if an edit names a day outside
/// the snapshot month or a bungalow the snapshot does not show, and
/// `DomainError::DateArithmeticOverflow` if an added day has no following
/// day in the calendar. No operations are produced in either case.
pub fn reconcile(
    snapshot: &BlockSnapshot,
    submission: &CalendarSubmission,
) -> Result<Vec<BlockOperation>, DomainError> {
    let month_range: DateRange = snapshot.month.range();
    if let Some(day) = submission
        .keep_blocks
        .iter()
        .chain(&submission.add_blocks)
        .find(|day| {
            !month_range.contains(day.date) || !snapshot.block_maps.contains_key(&day.bungalow_id)
        })
    {
        return Err(DomainError::DayOutsideCalendar {
            bungalow_id: day.bungalow_id,
            date: day.date,
        });
    }

    let mut operations: Vec<BlockOperation> = Vec::new();

    for (bungalow_id, block_map) in &snapshot.block_maps {
        for (date, restriction_id) in block_map.tagged() {
            let day: DayRef = DayRef::new(*bungalow_id, date);
            if submission.keep_blocks.contains(&day) || submission.add_blocks.contains(&day) {
                continue;
            }
            operations.push(BlockOperation::Delete {
                bungalow_id: *bungalow_id,
                date,
                restriction_id,
            });
        }
    }

    for day in &submission.add_blocks {
        if snapshot.has_block(*day) {
            continue;
        }
        operations.push(BlockOperation::Insert {
            bungalow_id: day.bungalow_id,
            range: DateRange::one_day_block(day.date)?,
        });
    }

    Ok(operations)
}
