// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_complete_draft, create_test_persistence, range};
use crate::{
    ApiError, CalendarEditRequest, CalendarMonth, DayRefRequest, ReconcileReport,
    apply_calendar_edits, build_calendar, finalize_reservation,
};
use bungalow_bliss_domain::{
    BlockSnapshot, CalendarSubmission, DayStateMap, RestrictionKind, YearMonth,
};
use bungalow_bliss_persistence::Persistence;
use std::collections::BTreeMap;
use time::macros::date;

fn january() -> YearMonth {
    YearMonth::new(2025, 1).unwrap()
}

fn day(bungalow_id: i64, date: &str) -> DayRefRequest {
    DayRefRequest {
        bungalow_id,
        date: date.to_string(),
    }
}

fn edits(keep: Vec<DayRefRequest>, add: Vec<DayRefRequest>) -> CalendarSubmission {
    CalendarEditRequest {
        year: 2025,
        month: 1,
        keep_blocks: keep,
        add_blocks: add,
    }
    .to_submission()
    .unwrap()
}

fn block_count(persistence: &mut Persistence, bungalow_id: i64) -> usize {
    persistence
        .list_restrictions_for_bungalow(bungalow_id, &january().range())
        .unwrap()
        .iter()
        .filter(|r| r.kind() == RestrictionKind::Block)
        .count()
}

#[test]
fn test_calendar_has_full_month_for_every_bungalow() {
    let mut persistence: Persistence = create_test_persistence();

    let calendar: CalendarMonth = build_calendar(&mut persistence, january()).unwrap();

    assert_eq!(calendar.rows.len(), 3);
    for (_, month) in &calendar.rows {
        assert_eq!(month.reservation_map.len(), 31);
        assert_eq!(month.block_map.len(), 31);
    }
}

#[test]
fn test_calendar_shows_reservations_and_blocks() {
    let mut persistence: Persistence = create_test_persistence();
    let summary = finalize_reservation(
        &mut persistence,
        &create_complete_draft(1, "2025-01-10", "2025-01-12"),
    )
    .unwrap();
    let block_id: i64 = persistence
        .insert_block(1, &range("2025-01-20", "2025-01-21"))
        .unwrap();

    let calendar: CalendarMonth = build_calendar(&mut persistence, january()).unwrap();
    let (_, eremite) = &calendar.rows[0];

    assert_eq!(
        eremite.reservation_map.get(date!(2025 - 01 - 11)),
        Some(summary.reservation_id)
    );
    assert_eq!(eremite.block_map.get(date!(2025 - 01 - 20)), Some(block_id));
    assert_eq!(eremite.block_map.get(date!(2025 - 01 - 21)), Some(0));

    let views = calendar.row_views();
    assert_eq!(views[0].block_map.get("2025-01-20"), Some(&block_id));
    assert_eq!(views[0].bungalow_name, "Eremite Hut");
}

/// Block on bungalow 1 at 2025-01-05; the submission does not keep it.
#[test]
fn test_unkept_block_is_deleted() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .insert_block(1, &range("2025-01-05", "2025-01-06"))
        .unwrap();
    let snapshot: BlockSnapshot = build_calendar(&mut persistence, january())
        .unwrap()
        .block_snapshot();

    let report: ReconcileReport =
        apply_calendar_edits(&mut persistence, &snapshot, &edits(vec![], vec![])).unwrap();

    assert_eq!(report.deleted, 1);
    assert_eq!(block_count(&mut persistence, 1), 0);
}

/// Block kept, one day added next to it.
#[test]
fn test_kept_block_stays_and_added_day_is_inserted() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .insert_block(1, &range("2025-01-05", "2025-01-06"))
        .unwrap();
    let snapshot: BlockSnapshot = build_calendar(&mut persistence, january())
        .unwrap()
        .block_snapshot();

    let report: ReconcileReport = apply_calendar_edits(
        &mut persistence,
        &snapshot,
        &edits(vec![day(1, "2025-01-05")], vec![day(1, "2025-01-06")]),
    )
    .unwrap();

    assert_eq!(
        report,
        ReconcileReport {
            inserted: 1,
            deleted: 0,
            failed: 0
        }
    );
    assert_eq!(block_count(&mut persistence, 1), 2);

    let restrictions = persistence
        .list_restrictions_for_bungalow(1, &range("2025-01-06", "2025-01-06"))
        .unwrap();
    assert!(
        restrictions
            .iter()
            .any(|r| r.range() == range("2025-01-06", "2025-01-07"))
    );
}

#[test]
fn test_resubmitting_shown_blocks_changes_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .insert_block(2, &range("2025-01-08", "2025-01-09"))
        .unwrap();
    persistence
        .insert_block(3, &range("2025-01-30", "2025-01-31"))
        .unwrap();
    let before: CalendarMonth = build_calendar(&mut persistence, january()).unwrap();

    let report: ReconcileReport = apply_calendar_edits(
        &mut persistence,
        &before.block_snapshot(),
        &edits(vec![day(2, "2025-01-08"), day(3, "2025-01-30")], vec![]),
    )
    .unwrap();

    assert_eq!(report, ReconcileReport::default());
    assert_eq!(build_calendar(&mut persistence, january()).unwrap(), before);
}

#[test]
fn test_failed_operation_does_not_stop_the_rest() {
    let mut persistence: Persistence = create_test_persistence();
    // Bungalow 99 was shown to the admin but has no row in the store.
    let mut maps: BTreeMap<i64, DayStateMap> = BTreeMap::new();
    maps.insert(2, DayStateMap::seeded(&january()));
    maps.insert(99, DayStateMap::seeded(&january()));
    let snapshot: BlockSnapshot = BlockSnapshot::new(january(), maps);

    let report: ReconcileReport = apply_calendar_edits(
        &mut persistence,
        &snapshot,
        &edits(vec![], vec![day(99, "2025-01-03"), day(2, "2025-01-04")]),
    )
    .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.inserted, 1);
    assert_eq!(block_count(&mut persistence, 2), 1);
}

#[test]
fn test_block_deleted_elsewhere_is_counted_as_failure() {
    let mut persistence: Persistence = create_test_persistence();
    let block_id: i64 = persistence
        .insert_block(1, &range("2025-01-05", "2025-01-06"))
        .unwrap();
    let snapshot: BlockSnapshot = build_calendar(&mut persistence, january())
        .unwrap()
        .block_snapshot();
    persistence.delete_block(block_id).unwrap();

    let report: ReconcileReport =
        apply_calendar_edits(&mut persistence, &snapshot, &edits(vec![], vec![])).unwrap();

    assert_eq!(report.failed, 1);
}

#[test]
fn test_malformed_edit_date_is_rejected() {
    let request: CalendarEditRequest = CalendarEditRequest {
        year: 2025,
        month: 1,
        keep_blocks: vec![],
        add_blocks: vec![day(1, "2025-01-32")],
    };
    assert!(request.to_submission().is_err());
    assert_eq!(request.target_month().unwrap(), january());
}

#[test]
fn test_edit_outside_snapshot_month_writes_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .insert_block(1, &range("2025-02-03", "2025-02-04"))
        .unwrap();
    let snapshot: BlockSnapshot = build_calendar(&mut persistence, january())
        .unwrap()
        .block_snapshot();

    let result = apply_calendar_edits(
        &mut persistence,
        &snapshot,
        &edits(vec![], vec![day(1, "2025-02-03"), day(2, "2025-01-10")]),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    let february: YearMonth = YearMonth::new(2025, 2).unwrap();
    assert_eq!(
        persistence
            .list_restrictions_for_bungalow(1, &february.range())
            .unwrap()
            .len(),
        1
    );
    assert_eq!(block_count(&mut persistence, 2), 0);
}

#[test]
fn test_edit_for_bungalow_not_in_snapshot_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let snapshot: BlockSnapshot = build_calendar(&mut persistence, january())
        .unwrap()
        .block_snapshot();

    let result = apply_calendar_edits(
        &mut persistence,
        &snapshot,
        &edits(vec![day(42, "2025-01-05")], vec![]),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
