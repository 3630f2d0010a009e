// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability searches.

use bungalow_bliss_domain::{Bungalow, DateRange, format_iso_date};
use bungalow_bliss_persistence::Persistence;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::request_response::AvailabilityResponse;

/// Finds every bungalow free for the whole of `range`.
///
/// An empty result is a valid answer, distinct from a storage failure.
///
/// # Errors
///
/// Returns `ApiError::StorageFailure` if the store cannot be queried.
pub fn search_availability(
    persistence: &mut Persistence,
    range: &DateRange,
) -> Result<Vec<Bungalow>, ApiError> {
    let bungalows: Vec<Bungalow> = persistence.list_available_bungalows(range)?;

    info!(
        start = %format_iso_date(range.start()),
        end = %format_iso_date(range.end()),
        available = bungalows.len(),
        "Searched availability"
    );

    Ok(bungalows)
}

/// Checks whether one bungalow is free for the whole of `range`.
///
/// # Errors
///
/// Returns `ApiError::StorageFailure` if the store cannot be queried.
pub fn check_availability(
    persistence: &mut Persistence,
    bungalow_id: i64,
    range: &DateRange,
) -> Result<AvailabilityResponse, ApiError> {
    let available: bool = persistence.is_bungalow_available(bungalow_id, range)?;

    debug!(bungalow_id, available, "Checked single bungalow availability");

    Ok(AvailabilityResponse {
        ok: available,
        message: String::new(),
        bungalow_id: bungalow_id.to_string(),
        start_date: format_iso_date(range.start()),
        end_date: format_iso_date(range.end()),
    })
}
