// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Informational pages without their own data.

use axum::{extract::State as AxumState, response::Response};

use crate::AppState;
use crate::error::HttpError;
use crate::render::{TemplateData, render_page};
use crate::session::TypedSession;

async fn static_page(
    state: &AppState,
    session: &TypedSession,
    template: &str,
) -> Result<Response, HttpError> {
    render_page(state, session, template, TemplateData::new()).await
}

pub async fn home(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    static_page(&state, &session, "home.page").await
}

pub async fn about(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    static_page(&state, &session, "about.page").await
}

pub async fn contact(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    static_page(&state, &session, "contact.page").await
}

pub async fn eremite(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    static_page(&state, &session, "eremite.page").await
}

pub async fn couple(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    static_page(&state, &session, "couple.page").await
}

pub async fn family(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    static_page(&state, &session, "family.page").await
}
