// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest booking flow: search, choose a bungalow, enter contact details,
//! confirm.

use axum::{
    Form, Json,
    extract::{
        Path, Query, State as AxumState,
        rejection::{FormRejection, QueryRejection},
    },
    response::{IntoResponse, Redirect, Response},
};
use bungalow_bliss_api::{
    ApiError, AvailabilityResponse, BungalowInfo, ReservationSummary, check_availability,
    finalize_reservation, get_bungalow, reservation_notifications, search_availability,
};
use bungalow_bliss_domain::{
    Bungalow, ContactDetails, DateRange, DraftStage, FormErrors, ReservationDraft,
    format_iso_date, parse_bungalow_id, validate_contact_details,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::AppState;
use crate::error::{HttpError, flash_redirect};
use crate::render::{FormData, TemplateData, render_page};
use crate::session::{DRAFT, Flash, RESERVATION_SUMMARY, TypedSession};

const NO_DRAFT: &str = "Can't get reservation from session";

/// Whether the guest has got as far as choosing a bungalow.
fn has_bungalow(draft: &ReservationDraft) -> bool {
    draft.stage() >= DraftStage::BungalowChosen
}

/// Form data of the availability search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    start: String,
    #[serde(default)]
    end: String,
}

/// Form or query data of a single-bungalow availability check.
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityForm {
    #[serde(default)]
    bungalow_id: String,
    #[serde(default)]
    start: String,
    #[serde(default)]
    end: String,
}

/// Query of a direct booking link.
#[derive(Debug, Default, Deserialize)]
pub struct BookNowQuery {
    #[serde(default)]
    id: String,
    #[serde(default)]
    s: String,
    #[serde(default)]
    e: String,
}

/// Contact step of a reservation.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
}

/// Looks up a bungalow, treating an unknown id as absent.
async fn find_bungalow(state: &AppState, bungalow_id: i64) -> Result<Option<Bungalow>, HttpError> {
    let lookup: Result<Bungalow, ApiError> = {
        let mut persistence = state.persistence().await?;
        get_bungalow(&mut persistence, bungalow_id)
    };

    match lookup {
        Ok(bungalow) => Ok(Some(bungalow)),
        Err(ApiError::ResourceNotFound { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn contact_form(contact: Option<&ContactDetails>, errors: FormErrors) -> FormData {
    let contact: ContactDetails = contact.cloned().unwrap_or_default();
    FormData::new()
        .with_value("full_name", contact.full_name)
        .with_value("email", contact.email)
        .with_value("phone", contact.phone)
        .with_errors(errors)
}

async fn render_reservation_form(
    state: &AppState,
    session: &TypedSession,
    draft: &ReservationDraft,
    form: FormData,
) -> Result<Response, HttpError> {
    let range: DateRange = draft.range();
    let data: TemplateData = TemplateData::new()
        .with_string("start_date", format_iso_date(range.start()))
        .with_string("end_date", format_iso_date(range.end()))
        .with_string("bungalow_name", draft.bungalow_name().unwrap_or_default())
        .with_int("bungalow_id", draft.bungalow_id().unwrap_or_default())
        .with_form(form);

    render_page(state, session, "make-reservation.page", data).await
}

pub async fn search_page(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    render_page(&state, &session, "search-availability.page", TemplateData::new()).await
}

/// Searches all bungalows for the submitted dates and starts a draft.
pub async fn search(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Form(form): Form<SearchForm>,
) -> Result<Response, HttpError> {
    let Ok(range) = DateRange::parse(&form.start, &form.end) else {
        warn!(start = %form.start, end = %form.end, "Rejected search with invalid dates");
        return flash_redirect(
            &session,
            Flash::Error,
            "Can't parse dates",
            Redirect::temporary("/"),
        )
        .await;
    };

    let bungalows: Vec<Bungalow> = {
        let mut persistence = state.persistence().await?;
        search_availability(&mut persistence, &range)?
    };

    if bungalows.is_empty() {
        return flash_redirect(
            &session,
            Flash::Error,
            "No availability",
            Redirect::to("/reservation"),
        )
        .await;
    }

    session.insert(&DRAFT, &ReservationDraft::new(range)).await?;

    let infos: Vec<BungalowInfo> = bungalows.iter().map(BungalowInfo::from).collect();
    let data: TemplateData = TemplateData::new()
        .with_string("start_date", format_iso_date(range.start()))
        .with_string("end_date", format_iso_date(range.end()))
        .with_data("bungalows", &infos)?;

    render_page(&state, &session, "choose-bungalow.page", data).await
}

fn rejected_availability_request(rejection: &impl std::fmt::Display) -> Response {
    warn!(error = %rejection, "Unreadable availability request");
    Json(AvailabilityResponse::failure("Internal server error")).into_response()
}

pub async fn availability_json_query(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    query: Result<Query<AvailabilityForm>, QueryRejection>,
) -> Result<Response, HttpError> {
    match query {
        Ok(Query(form)) => availability_json(&state, &session, form).await,
        Err(rejection) => Ok(rejected_availability_request(&rejection)),
    }
}

pub async fn availability_json_form(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    form: Result<Form<AvailabilityForm>, FormRejection>,
) -> Result<Response, HttpError> {
    match form {
        Ok(Form(form)) => availability_json(&state, &session, form).await,
        Err(rejection) => Ok(rejected_availability_request(&rejection)),
    }
}

/// Answers whether one bungalow is free for the given dates.
async fn availability_json(
    state: &AppState,
    session: &TypedSession,
    form: AvailabilityForm,
) -> Result<Response, HttpError> {
    let (Ok(bungalow_id), Ok(range)) = (
        parse_bungalow_id(&form.bungalow_id),
        DateRange::parse(&form.start, &form.end),
    ) else {
        warn!(
            bungalow_id = %form.bungalow_id,
            start = %form.start,
            end = %form.end,
            "Rejected availability check with invalid parameters"
        );
        return flash_redirect(
            session,
            Flash::Error,
            "Invalid availability request",
            Redirect::temporary("/"),
        )
        .await;
    };

    let response: AvailabilityResponse = match state.persistence().await {
        Ok(mut persistence) => check_availability(&mut persistence, bungalow_id, &range)
            .unwrap_or_else(|e| {
                error!(bungalow_id, error = %e, "Availability check failed");
                AvailabilityResponse::failure("Error querying database")
            }),
        Err(_) => AvailabilityResponse::failure("Error querying database"),
    };

    Ok(Json(response).into_response())
}

/// Puts the chosen bungalow into the draft.
pub async fn choose_bungalow(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let Some(mut draft) = session.get(&DRAFT).await? else {
        return flash_redirect(&session, Flash::Error, NO_DRAFT, Redirect::temporary("/")).await;
    };

    let Ok(bungalow_id) = parse_bungalow_id(&id) else {
        return flash_redirect(
            &session,
            Flash::Error,
            "Invalid bungalow",
            Redirect::temporary("/"),
        )
        .await;
    };

    let Some(bungalow) = find_bungalow(&state, bungalow_id).await? else {
        return flash_redirect(
            &session,
            Flash::Error,
            "Can't find bungalow",
            Redirect::temporary("/"),
        )
        .await;
    };

    draft.choose_bungalow(bungalow.id);
    draft.set_bungalow_name(bungalow.name);
    session.insert(&DRAFT, &draft).await?;

    Ok(Redirect::to("/make-reservation").into_response())
}

/// Starts a draft straight from a bungalow page link.
pub async fn book_now(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Query(query): Query<BookNowQuery>,
) -> Result<Response, HttpError> {
    let (Ok(bungalow_id), Ok(range)) = (
        parse_bungalow_id(&query.id),
        DateRange::parse(&query.s, &query.e),
    ) else {
        return flash_redirect(
            &session,
            Flash::Error,
            "Invalid booking link",
            Redirect::temporary("/"),
        )
        .await;
    };

    let Some(bungalow) = find_bungalow(&state, bungalow_id).await? else {
        return flash_redirect(
            &session,
            Flash::Error,
            "Can't find bungalow",
            Redirect::temporary("/"),
        )
        .await;
    };

    let mut draft: ReservationDraft = ReservationDraft::for_bungalow(range, bungalow.id);
    draft.set_bungalow_name(bungalow.name);
    session.insert(&DRAFT, &draft).await?;

    Ok(Redirect::to("/make-reservation").into_response())
}

/// Shows the contact form for the draft.
pub async fn reservation_form(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    let draft: Option<ReservationDraft> = session.get(&DRAFT).await?;
    let Some(mut draft) = draft.filter(has_bungalow) else {
        return flash_redirect(
            &session,
            Flash::Error,
            NO_DRAFT,
            Redirect::temporary("/reservation"),
        )
        .await;
    };

    if draft.bungalow_name().is_none()
        && let Some(bungalow_id) = draft.bungalow_id()
    {
        let Some(bungalow) = find_bungalow(&state, bungalow_id).await? else {
            return flash_redirect(
                &session,
                Flash::Error,
                "Can't find bungalow",
                Redirect::temporary("/reservation"),
            )
            .await;
        };
        draft.set_bungalow_name(bungalow.name);
        session.insert(&DRAFT, &draft).await?;
    }

    let form: FormData = contact_form(draft.contact(), FormErrors::new());
    render_reservation_form(&state, &session, &draft, form).await
}

/// Validates the contact details and stores the reservation.
pub async fn make_reservation(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Form(form): Form<ContactForm>,
) -> Result<Response, HttpError> {
    let Some(mut draft) = session.get(&DRAFT).await? else {
        return flash_redirect(&session, Flash::Error, NO_DRAFT, Redirect::temporary("/")).await;
    };
    if !has_bungalow(&draft) {
        return flash_redirect(
            &session,
            Flash::Error,
            NO_DRAFT,
            Redirect::temporary("/reservation"),
        )
        .await;
    }

    let contact: ContactDetails = ContactDetails::new(&form.full_name, &form.email, &form.phone);
    let errors: FormErrors = validate_contact_details(&contact);
    draft.set_contact(contact);
    session.insert(&DRAFT, &draft).await?;

    if !errors.is_valid() {
        let form: FormData = contact_form(draft.contact(), errors);
        return render_reservation_form(&state, &session, &draft, form).await;
    }

    let outcome: Result<ReservationSummary, ApiError> = match state.persistence().await {
        Ok(mut persistence) => finalize_reservation(&mut persistence, &draft),
        Err(e) => Err(ApiError::StorageFailure { message: e.message }),
    };

    let summary: ReservationSummary = match outcome {
        Ok(summary) => summary,
        Err(ApiError::DomainRuleViolation { rule, message }) if rule == "bungalow_available" => {
            warn!(reason = %message, "Bungalow taken before reservation was stored");
            return flash_redirect(
                &session,
                Flash::Error,
                "The bungalow is no longer available for these dates",
                Redirect::to("/reservation"),
            )
            .await;
        }
        Err(e) => {
            error!(error = %e, "Failed to store reservation");
            return flash_redirect(
                &session,
                Flash::Error,
                "Can't insert reservation into database!",
                Redirect::temporary("/"),
            )
            .await;
        }
    };

    for message in reservation_notifications(&summary, &state.config.mail) {
        if let Err(e) = state.mailer.send(message) {
            error!(
                reservation_id = summary.reservation_id,
                error = %e,
                "Failed to queue mail"
            );
        }
    }

    session.remove(&DRAFT).await?;
    session.insert(&RESERVATION_SUMMARY, &summary).await?;

    info!(
        reservation_id = summary.reservation_id,
        bungalow_id = summary.bungalow_id,
        "Reservation completed"
    );

    Ok(Redirect::to("/reservation-summary").into_response())
}

/// Shows the stored reservation once.
pub async fn reservation_summary(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    let Some(summary) = session.pop(&RESERVATION_SUMMARY).await? else {
        return flash_redirect(&session, Flash::Error, NO_DRAFT, Redirect::temporary("/")).await;
    };

    let data: TemplateData = TemplateData::new().with_data("reservation", &summary)?;
    render_page(&state, &session, "reservation-summary.page", data).await
}
