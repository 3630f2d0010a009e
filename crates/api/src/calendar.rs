// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The admin reservation calendar: building month grids and applying block edits.

use bungalow_bliss_domain::{
    BlockOperation, BlockSnapshot, Bungalow, BungalowMonth, BungalowRestriction,
    CalendarSubmission, DayStateMap, YearMonth, build_bungalow_month, format_iso_date, reconcile,
};
use bungalow_bliss_persistence::Persistence;
use std::collections::BTreeMap;
use tracing::{error, info};

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{CalendarRowView, ReconcileReport};

/// Day-state maps of every bungalow for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub month: YearMonth,
    /// Bungalows paired with their maps, ordered by id.
    pub rows: Vec<(Bungalow, BungalowMonth)>,
}

impl CalendarMonth {
    /// The block maps to keep until the admin submits edits.
    #[must_use]
    pub fn block_snapshot(&self) -> BlockSnapshot {
        let block_maps: BTreeMap<i64, DayStateMap> = self
            .rows
            .iter()
            .map(|(bungalow, month)| (bungalow.id, month.block_map.clone()))
            .collect();
        BlockSnapshot::new(self.month, block_maps)
    }

    /// The rows keyed by formatted day, ready for rendering.
    #[must_use]
    pub fn row_views(&self) -> Vec<CalendarRowView> {
        self.rows
            .iter()
            .map(|(bungalow, month)| CalendarRowView::new(bungalow, month))
            .collect()
    }
}

/// Builds the reservation and block maps of every bungalow for `month`.
///
/// # Errors
///
/// Returns `ApiError::StorageFailure` if the store cannot be queried.
pub fn build_calendar(
    persistence: &mut Persistence,
    month: YearMonth,
) -> Result<CalendarMonth, ApiError> {
    let bungalows: Vec<Bungalow> = persistence.list_bungalows()?;
    let mut rows: Vec<(Bungalow, BungalowMonth)> = Vec::with_capacity(bungalows.len());

    for bungalow in bungalows {
        let restrictions: Vec<BungalowRestriction> =
            persistence.list_restrictions_for_bungalow(bungalow.id, &month.range())?;
        let maps: BungalowMonth = build_bungalow_month(&month, bungalow.id, &restrictions);
        rows.push((bungalow, maps));
    }

    Ok(CalendarMonth { month, rows })
}

/// Applies calendar edits against the block maps the admin was shown.
///
/// Operations run one at a time without a surrounding transaction. A
/// failing operation is logged and counted, and the remaining operations
/// still run. Nothing guards the snapshot against edits made by another
/// admin since it was taken, so concurrent edits are last-writer-wins.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the edits cannot be turned into
/// operations, including edits outside the snapshot's month or bungalows;
/// nothing is written in that case.
pub fn apply_calendar_edits(
    persistence: &mut Persistence,
    snapshot: &BlockSnapshot,
    submission: &CalendarSubmission,
) -> Result<ReconcileReport, ApiError> {
    let operations: Vec<BlockOperation> =
        reconcile(snapshot, submission).map_err(translate_domain_error)?;
    let mut report: ReconcileReport = ReconcileReport::default();

    for operation in &operations {
        match operation {
            BlockOperation::Delete {
                bungalow_id,
                date,
                restriction_id,
            } => match persistence.delete_block(*restriction_id) {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    error!(
                        bungalow_id,
                        restriction_id,
                        date = %format_iso_date(*date),
                        error = %e,
                        "Failed to delete block"
                    );
                    report.failed += 1;
                }
            },
            BlockOperation::Insert { bungalow_id, range } => {
                match persistence.insert_block(*bungalow_id, range) {
                    Ok(_) => report.inserted += 1,
                    Err(e) => {
                        error!(
                            bungalow_id,
                            date = %format_iso_date(range.start()),
                            error = %e,
                            "Failed to insert block"
                        );
                        report.failed += 1;
                    }
                }
            }
        }
    }

    info!(
        year = snapshot.month().year(),
        month = snapshot.month().month(),
        inserted = report.inserted,
        deleted = report.deleted,
        failed = report.failed,
        "Applied calendar edits"
    );

    Ok(report)
}
