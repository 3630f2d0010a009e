// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrator pages: reservation lists, the reservation calendar and
//! per-reservation actions.
//!
//! Every handler takes an `AdminUser`, so anonymous requests never reach
//! the handler body.

use axum::{
    Form, Json,
    extract::{Path, Query, State as AxumState, rejection::JsonRejection},
    response::{IntoResponse, Redirect, Response},
};
use bungalow_bliss_api::{
    ApiError, CalendarEditRequest, CalendarMonth, ReconcileReport, ReservationFilter,
    ReservationView, apply_calendar_edits, build_calendar, delete_reservation as remove_reservation,
    get_reservation, list_reservations, mark_processed, update_reservation as save_contact,
};
use bungalow_bliss_domain::{
    BlockSnapshot, ContactDetails, FormErrors, YearMonth,
    validate_contact_details,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::AppState;
use crate::error::{HttpError, flash_redirect};
use crate::render::{FormData, TemplateData, render_page};
use crate::session::{AdminUser, BLOCK_SNAPSHOT, Flash, TypedSession};

const CALENDAR_PATH: &str = "/admin/reservations-calendar";

/// The admin page a reservation action was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservationSource {
    New,
    All,
    Calendar,
}

impl ReservationSource {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "all" => Some(Self::All),
            "cal" => Some(Self::Calendar),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::All => "all",
            Self::Calendar => "cal",
        }
    }
}

/// Optional calendar month carried through reservation actions.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    y: Option<String>,
    m: Option<String>,
}

impl MonthQuery {
    /// The month named by `y`/`m`, `Ok(None)` when `y` is absent.
    fn month(&self) -> Result<Option<YearMonth>, ()> {
        let Some(year) = self.y.as_deref().filter(|y| !y.is_empty()) else {
            return Ok(None);
        };
        let year: i32 = year.trim().parse().map_err(|_| ())?;
        let month: u8 = self
            .m
            .as_deref()
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(|_| ())?;
        YearMonth::new(year, month).map(Some).map_err(|_| ())
    }
}

/// Contact edits of a reservation, with the calendar month to return to.
#[derive(Debug, Default, Deserialize)]
pub struct ReservationEditForm {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    month: String,
}

fn calendar_path(month: YearMonth) -> String {
    format!("{CALENDAR_PATH}?y={}&m={}", month.year(), month.month())
}

/// Where to go after acting on a reservation.
fn back_to(source: ReservationSource, month: Option<YearMonth>) -> String {
    match (source, month) {
        (_, Some(month)) => calendar_path(month),
        (ReservationSource::Calendar, None) => CALENDAR_PATH.to_string(),
        (source, None) => format!("/admin/reservations-{}", source.as_str()),
    }
}

/// Parses the `{src}/{id}` path segments.
fn parse_target(src: &str, id: &str) -> Option<(ReservationSource, i64)> {
    let source: ReservationSource = ReservationSource::parse(src)?;
    let id: i64 = id.parse().ok().filter(|id: &i64| *id > 0)?;
    Some((source, id))
}

async fn invalid_target(session: &TypedSession) -> Result<Response, HttpError> {
    flash_redirect(
        session,
        Flash::Error,
        "Invalid reservation",
        Redirect::to("/admin/dashboard"),
    )
    .await
}

/// Redirects back with an error flash when the reservation is gone.
async fn action_failed(
    session: &TypedSession,
    err: ApiError,
    destination: &str,
) -> Result<Response, HttpError> {
    match err {
        ApiError::ResourceNotFound { message, .. } => {
            warn!(reason = %message, "Reservation action on missing reservation");
            flash_redirect(
                session,
                Flash::Error,
                "Reservation not found",
                Redirect::to(destination),
            )
            .await
        }
        e => Err(e.into()),
    }
}

/// Flashes the outcome of a reservation action and redirects back.
async fn finish_action(
    session: &TypedSession,
    result: Result<(), ApiError>,
    success: &str,
    destination: &str,
) -> Result<Response, HttpError> {
    match result {
        Ok(()) => flash_redirect(session, Flash::Success, success, Redirect::to(destination)).await,
        Err(e) => action_failed(session, e, destination).await,
    }
}

pub async fn dashboard(
    admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    let data: TemplateData = TemplateData::new().with_int("user_id", admin.user_id);
    render_page(&state, &session, "admin-dashboard.page", data).await
}

async fn reservation_list(
    state: &AppState,
    session: &TypedSession,
    filter: ReservationFilter,
    template: &str,
) -> Result<Response, HttpError> {
    let reservations: Vec<ReservationView> = {
        let mut persistence = state.persistence().await?;
        list_reservations(&mut persistence, filter)?
    };

    let data: TemplateData = TemplateData::new().with_data("reservations", &reservations)?;
    render_page(state, session, template, data).await
}

pub async fn new_reservations(
    _admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    reservation_list(
        &state,
        &session,
        ReservationFilter::New,
        "admin-new-reservations.page",
    )
    .await
}

pub async fn all_reservations(
    _admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    reservation_list(
        &state,
        &session,
        ReservationFilter::All,
        "admin-all-reservations.page",
    )
    .await
}

async fn render_reservation(
    state: &AppState,
    session: &TypedSession,
    source: ReservationSource,
    month: Option<YearMonth>,
    reservation: &ReservationView,
    form: FormData,
) -> Result<Response, HttpError> {
    let mut data: TemplateData = TemplateData::new()
        .with_string("src", source.as_str())
        .with_data("reservation", reservation)?
        .with_form(form);
    if let Some(month) = month {
        data = data
            .with_string("year", month.year().to_string())
            .with_string("month", month.month().to_string());
    }

    render_page(state, session, "admin-reservations-show.page", data).await
}

/// Shows one reservation with its edit form.
pub async fn show_reservation(
    _admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Path((src, id)): Path<(String, String)>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, HttpError> {
    let Some((source, reservation_id)) = parse_target(&src, &id) else {
        return invalid_target(&session).await;
    };
    let month: Option<YearMonth> = query.month().unwrap_or_default();

    let lookup: Result<ReservationView, ApiError> = {
        let mut persistence = state.persistence().await?;
        get_reservation(&mut persistence, reservation_id)
    };
    let reservation: ReservationView = match lookup {
        Ok(reservation) => reservation,
        Err(e) => return action_failed(&session, e, &back_to(source, month)).await,
    };

    let form: FormData = FormData::new()
        .with_value("full_name", reservation.full_name.clone())
        .with_value("email", reservation.email.clone())
        .with_value("phone", reservation.phone.clone());

    render_reservation(&state, &session, source, month, &reservation, form).await
}

/// Saves edited contact details of a reservation.
pub async fn update_reservation(
    admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Path((src, id)): Path<(String, String)>,
    Form(form): Form<ReservationEditForm>,
) -> Result<Response, HttpError> {
    let Some((source, reservation_id)) = parse_target(&src, &id) else {
        return invalid_target(&session).await;
    };
    let month: Option<YearMonth> = MonthQuery {
        y: Some(form.year.clone()),
        m: Some(form.month.clone()),
    }
    .month()
    .unwrap_or_default();
    let destination: String = back_to(source, month);

    let contact: ContactDetails = ContactDetails::new(&form.full_name, &form.email, &form.phone);
    let errors: FormErrors = validate_contact_details(&contact);

    if !errors.is_valid() {
        let lookup: Result<ReservationView, ApiError> = {
            let mut persistence = state.persistence().await?;
            get_reservation(&mut persistence, reservation_id)
        };
        let reservation: ReservationView = match lookup {
            Ok(reservation) => reservation,
            Err(e) => return action_failed(&session, e, &destination).await,
        };
        let form: FormData = FormData::new()
            .with_value("full_name", contact.full_name)
            .with_value("email", contact.email)
            .with_value("phone", contact.phone)
            .with_errors(errors);
        return render_reservation(&state, &session, source, month, &reservation, form).await;
    }

    let result: Result<(), ApiError> = {
        let mut persistence = state.persistence().await?;
        save_contact(&mut persistence, reservation_id, &contact)
    };
    if result.is_ok() {
        info!(user_id = admin.user_id, reservation_id, "Reservation edited");
    }

    finish_action(&session, result, "Changes saved", &destination).await
}

pub async fn process_reservation(
    admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Path((src, id)): Path<(String, String)>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, HttpError> {
    let Some((source, reservation_id)) = parse_target(&src, &id) else {
        return invalid_target(&session).await;
    };
    let destination: String = back_to(source, query.month().unwrap_or_default());

    let result: Result<(), ApiError> = {
        let mut persistence = state.persistence().await?;
        mark_processed(&mut persistence, reservation_id)
    };
    if result.is_ok() {
        info!(user_id = admin.user_id, reservation_id, "Reservation processed");
    }

    finish_action(&session, result, "Reservation marked as processed", &destination).await
}

pub async fn delete_reservation(
    admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Path((src, id)): Path<(String, String)>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, HttpError> {
    let Some((source, reservation_id)) = parse_target(&src, &id) else {
        return invalid_target(&session).await;
    };
    let destination: String = back_to(source, query.month().unwrap_or_default());

    let result: Result<(), ApiError> = {
        let mut persistence = state.persistence().await?;
        remove_reservation(&mut persistence, reservation_id)
    };
    if result.is_ok() {
        info!(user_id = admin.user_id, reservation_id, "Reservation deleted");
    }

    finish_action(&session, result, "Reservation deleted", &destination).await
}

/// Shows one month of reservations and owner blocks for every bungalow.
///
/// The block maps shown are kept in the session until the admin submits
/// edits for this month.
pub async fn calendar(
    _admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Query(query): Query<MonthQuery>,
) -> Result<Response, HttpError> {
    let month: YearMonth = match query.month() {
        Ok(Some(month)) => month,
        Ok(None) => YearMonth::containing(OffsetDateTime::now_utc().date())
            .map_err(|e| HttpError::internal(e.to_string()))?,
        Err(()) => {
            return flash_redirect(
                &session,
                Flash::Error,
                "Invalid month",
                Redirect::to(CALENDAR_PATH),
            )
            .await;
        }
    };

    let calendar: CalendarMonth = {
        let mut persistence = state.persistence().await?;
        build_calendar(&mut persistence, month)?
    };

    session
        .insert(&BLOCK_SNAPSHOT, &calendar.block_snapshot())
        .await?;

    let mut data: TemplateData = TemplateData::new()
        .with_int("year", i64::from(month.year()))
        .with_int("month", i64::from(month.month()))
        .with_int("days_in_month", i64::from(month.days_in_month()))
        .with_string("month_label", format!("{}-{:02}", month.year(), month.month()))
        .with_data("rows", &calendar.row_views())?;
    if let Some(previous) = month.previous() {
        data = data
            .with_int("previous_year", i64::from(previous.year()))
            .with_int("previous_month", i64::from(previous.month()));
    }
    if let Some(next) = month.next() {
        data = data
            .with_int("next_year", i64::from(next.year()))
            .with_int("next_month", i64::from(next.month()));
    }

    render_page(&state, &session, "admin-reservations-calendar.page", data).await
}

/// Applies calendar edits against the block maps last shown for the month.
///
/// The snapshot belongs to this session only; when two admins edit the same
/// month, the last submission wins.
pub async fn save_calendar(
    admin: AdminUser,
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    request: Result<Json<CalendarEditRequest>, JsonRejection>,
) -> Result<Response, HttpError> {
    let Ok(Json(request)) = request else {
        return flash_redirect(
            &session,
            Flash::Error,
            "Invalid calendar data",
            Redirect::to(CALENDAR_PATH),
        )
        .await;
    };

    let Ok(month) = request.target_month() else {
        return flash_redirect(
            &session,
            Flash::Error,
            "Invalid month",
            Redirect::to(CALENDAR_PATH),
        )
        .await;
    };
    let destination: String = calendar_path(month);

    let snapshot: Option<BlockSnapshot> = session.get(&BLOCK_SNAPSHOT).await?;
    let Some(snapshot) = snapshot.filter(|s| s.month() == month) else {
        warn!(
            user_id = admin.user_id,
            year = month.year(),
            month = month.month(),
            "Calendar edits without a matching snapshot"
        );
        return flash_redirect(
            &session,
            Flash::Error,
            "Calendar has expired, please reload and try again",
            Redirect::to(&destination),
        )
        .await;
    };

    let Ok(submission) = request.to_submission() else {
        return flash_redirect(
            &session,
            Flash::Error,
            "Invalid calendar data",
            Redirect::to(&destination),
        )
        .await;
    };

    let outcome: Result<ReconcileReport, ApiError> = {
        let mut persistence = state.persistence().await?;
        apply_calendar_edits(&mut persistence, &snapshot, &submission)
    };
    let report: ReconcileReport = match outcome {
        Ok(report) => report,
        Err(ApiError::InvalidInput { field, message }) => {
            warn!(
                user_id = admin.user_id,
                field = %field,
                reason = %message,
                "Rejected calendar edits"
            );
            return flash_redirect(
                &session,
                Flash::Error,
                "Invalid calendar data",
                Redirect::to(&destination),
            )
            .await;
        }
        Err(e) => return Err(e.into()),
    };
    session.remove(&BLOCK_SNAPSHOT).await?;

    info!(
        user_id = admin.user_id,
        inserted = report.inserted,
        deleted = report.deleted,
        failed = report.failed,
        "Calendar edits saved"
    );

    if report.failed > 0 {
        session
            .flash(Flash::Warning, "Some changes could not be saved")
            .await?;
    }

    flash_redirect(
        &session,
        Flash::Success,
        "Changes saved",
        Redirect::to(&destination),
    )
    .await
}
