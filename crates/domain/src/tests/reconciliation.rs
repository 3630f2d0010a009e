// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BlockOperation, BlockSnapshot, CalendarSubmission, DateRange, DayRef, DayStateMap, DomainError,
    YearMonth, reconcile,
};
use std::collections::BTreeMap;
use time::macros::date;

/// January 2025, bungalow 1 blocked on the 5th by restriction 42.
fn snapshot_with_block() -> BlockSnapshot {
    let month: YearMonth = YearMonth::new(2025, 1).unwrap();
    let mut first: DayStateMap = DayStateMap::seeded(&month);
    first.tag(date!(2025 - 01 - 05), 42);
    let second: DayStateMap = DayStateMap::seeded(&month);

    let mut maps: BTreeMap<i64, DayStateMap> = BTreeMap::new();
    maps.insert(1, first);
    maps.insert(2, second);
    BlockSnapshot::new(month, maps)
}

#[test]
fn test_unkept_block_is_deleted() {
    let operations: Vec<BlockOperation> =
        reconcile(&snapshot_with_block(), &CalendarSubmission::default()).unwrap();

    assert_eq!(
        operations,
        vec![BlockOperation::Delete {
            bungalow_id: 1,
            date: date!(2025 - 01 - 05),
            restriction_id: 42,
        }]
    );
}

#[test]
fn test_kept_block_produces_no_operations() {
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    submission
        .keep_blocks
        .insert(DayRef::new(1, date!(2025 - 01 - 05)));

    let operations: Vec<BlockOperation> = reconcile(&snapshot_with_block(), &submission).unwrap();

    assert!(operations.is_empty());
}

#[test]
fn test_resubmitting_every_shown_block_is_idempotent() {
    let snapshot: BlockSnapshot = snapshot_with_block();
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    for bungalow_id in [1, 2] {
        for (date, _) in snapshot.block_map(bungalow_id).unwrap().tagged() {
            submission.keep_blocks.insert(DayRef::new(bungalow_id, date));
        }
    }

    assert!(reconcile(&snapshot, &submission).unwrap().is_empty());
}

#[test]
fn test_added_day_becomes_one_day_block() {
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    submission
        .keep_blocks
        .insert(DayRef::new(1, date!(2025 - 01 - 05)));
    submission
        .add_blocks
        .insert(DayRef::new(1, date!(2025 - 01 - 06)));

    let operations: Vec<BlockOperation> = reconcile(&snapshot_with_block(), &submission).unwrap();

    assert_eq!(
        operations,
        vec![BlockOperation::Insert {
            bungalow_id: 1,
            range: DateRange::parse("2025-01-06", "2025-01-07").unwrap(),
        }]
    );
}

#[test]
fn test_adding_already_blocked_day_keeps_it_without_duplicate() {
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    submission
        .add_blocks
        .insert(DayRef::new(1, date!(2025 - 01 - 05)));

    let operations: Vec<BlockOperation> = reconcile(&snapshot_with_block(), &submission).unwrap();

    assert!(operations.is_empty());
}

#[test]
fn test_zero_tags_never_produce_deletes() {
    let month: YearMonth = YearMonth::new(2025, 1).unwrap();
    let mut maps: BTreeMap<i64, DayStateMap> = BTreeMap::new();
    maps.insert(1, DayStateMap::seeded(&month));
    let snapshot: BlockSnapshot = BlockSnapshot::new(month, maps);

    let operations: Vec<BlockOperation> =
        reconcile(&snapshot, &CalendarSubmission::default()).unwrap();

    assert!(operations.is_empty());
}

#[test]
fn test_deletes_precede_inserts() {
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    submission
        .add_blocks
        .insert(DayRef::new(2, date!(2025 - 01 - 20)));

    let operations: Vec<BlockOperation> = reconcile(&snapshot_with_block(), &submission).unwrap();

    assert_eq!(operations.len(), 2);
    assert!(matches!(operations[0], BlockOperation::Delete { .. }));
    assert!(matches!(
        operations[1],
        BlockOperation::Insert { bungalow_id: 2, .. }
    ));
}

#[test]
fn test_snapshot_survives_json() {
    let snapshot: BlockSnapshot = snapshot_with_block();
    let json: String = serde_json::to_string(&snapshot).unwrap();
    let restored: BlockSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
    assert!(restored.has_block(DayRef::new(1, date!(2025 - 01 - 05))));
}

#[test]
fn test_add_outside_snapshot_month_is_rejected() {
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    submission
        .add_blocks
        .insert(DayRef::new(1, date!(2025 - 02 - 03)));

    let result = reconcile(&snapshot_with_block(), &submission);

    assert_eq!(
        result,
        Err(DomainError::DayOutsideCalendar {
            bungalow_id: 1,
            date: date!(2025 - 02 - 03),
        })
    );
}

#[test]
fn test_keep_for_unknown_bungalow_is_rejected() {
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    submission
        .keep_blocks
        .insert(DayRef::new(7, date!(2025 - 01 - 05)));

    assert!(matches!(
        reconcile(&snapshot_with_block(), &submission),
        Err(DomainError::DayOutsideCalendar { bungalow_id: 7, .. })
    ));
}

#[test]
fn test_add_on_last_representable_day_overflows() {
    let month: YearMonth = YearMonth::new(9999, 12).unwrap();
    let mut maps: BTreeMap<i64, DayStateMap> = BTreeMap::new();
    maps.insert(1, DayStateMap::seeded(&month));
    let snapshot: BlockSnapshot = BlockSnapshot::new(month, maps);
    let mut submission: CalendarSubmission = CalendarSubmission::default();
    submission
        .add_blocks
        .insert(DayRef::new(1, date!(9999 - 12 - 31)));

    assert!(matches!(
        reconcile(&snapshot, &submission),
        Err(DomainError::DateArithmeticOverflow { .. })
    ));
}
