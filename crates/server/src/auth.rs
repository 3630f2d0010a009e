// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrator login and logout.

use axum::{
    Form,
    extract::State as AxumState,
    response::{IntoResponse, Redirect, Response},
};
use bungalow_bliss_api::{AuthError, AuthenticatedUser, AuthenticationService};
use bungalow_bliss_domain::{FormErrors, validate_login};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;
use crate::error::{HttpError, flash_redirect};
use crate::render::{FormData, TemplateData, render_page};
use crate::session::{Flash, TypedSession, USER_ID};

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn login_page(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
) -> Result<Response, HttpError> {
    render_page(&state, &session, "login.page", TemplateData::new()).await
}

/// Checks the submitted credentials and logs the administrator in.
pub async fn login(
    AxumState(state): AxumState<AppState>,
    session: TypedSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, HttpError> {
    let errors: FormErrors = validate_login(&form.email, &form.password);
    if !errors.is_valid() {
        let data: TemplateData = TemplateData::new().with_form(
            FormData::new()
                .with_value("email", form.email)
                .with_errors(errors),
        );
        return render_page(&state, &session, "login.page", data).await;
    }

    let result: Result<AuthenticatedUser, AuthError> = {
        let mut persistence = state.persistence().await?;
        AuthenticationService::login(&mut persistence, &form.email, &form.password)
    };

    match result {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(&USER_ID, &user.user_id).await?;
            info!(user_id = user.user_id, "Administrator session started");
            flash_redirect(
                &session,
                Flash::Success,
                "Logged in successfully",
                Redirect::to("/"),
            )
            .await
        }
        Err(AuthError::AuthenticationFailed { .. }) => {
            flash_redirect(
                &session,
                Flash::Error,
                "Invalid credentials",
                Redirect::to("/user/login"),
            )
            .await
        }
        Err(AuthError::Backend { message }) => {
            error!(error = %message, "Login backend failure");
            Err(HttpError::internal("Internal server error"))
        }
    }
}

pub async fn logout(session: TypedSession) -> Result<Response, HttpError> {
    session.flush().await?;
    Ok(Redirect::to("/user/login").into_response())
}
