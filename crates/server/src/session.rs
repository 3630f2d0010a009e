// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed session access, flash messages and the admin guard.
//!
//! Every value the server keeps in a session is declared here as a
//! `SessionKey<T>`, so a key can only ever be read back as the type it was
//! written with.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use bungalow_bliss_api::ReservationSummary;
use bungalow_bliss_domain::{BlockSnapshot, ReservationDraft};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use tower_sessions::Session;
use tracing::debug;

use crate::AppState;
use crate::error::HttpError;

/// A named session slot holding a value of type `T`.
pub struct SessionKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SessionKey<T> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for SessionKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SessionKey<T> {}

/// The guest's reservation in progress.
pub const DRAFT: SessionKey<ReservationDraft> = SessionKey::new("reservation");
/// The stored reservation, shown once on the summary page.
pub const RESERVATION_SUMMARY: SessionKey<ReservationSummary> =
    SessionKey::new("reservation_summary");
/// Block maps of the calendar month last shown to the admin.
pub const BLOCK_SNAPSHOT: SessionKey<BlockSnapshot> = SessionKey::new("block_snapshot");
/// Id of the logged-in administrator.
pub const USER_ID: SessionKey<i64> = SessionKey::new("user_id");

const FLASH_SUCCESS: SessionKey<String> = SessionKey::new("flash");
const FLASH_WARNING: SessionKey<String> = SessionKey::new("warning");
const FLASH_ERROR: SessionKey<String> = SessionKey::new("error");

/// Session store failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store failure: {0}")]
    Store(#[from] tower_sessions::session::Error),
}

/// Flash message slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Success,
    Warning,
    Error,
}

impl Flash {
    const fn key(self) -> SessionKey<String> {
        match self {
            Self::Success => FLASH_SUCCESS,
            Self::Warning => FLASH_WARNING,
            Self::Error => FLASH_ERROR,
        }
    }
}

/// Flash messages taken from the session for one page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flashes {
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// A `tower_sessions::Session` that is only accessed through `SessionKey`s.
#[derive(Clone)]
pub struct TypedSession(Session);

impl TypedSession {
    /// Reads a value without removing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or the stored value does
    /// not decode as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &SessionKey<T>,
    ) -> Result<Option<T>, SessionError> {
        Ok(self.0.get::<T>(key.name).await?)
    }

    /// Stores a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or `value` cannot be encoded.
    pub async fn insert<T: Serialize + Sync>(
        &self,
        key: &SessionKey<T>,
        value: &T,
    ) -> Result<(), SessionError> {
        self.0.insert(key.name, value).await?;
        Ok(())
    }

    /// Discards a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn remove<T>(&self, key: &SessionKey<T>) -> Result<(), SessionError> {
        self.0.remove_value(key.name).await?;
        Ok(())
    }

    /// Removes and returns a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or the stored value does
    /// not decode as `T`.
    pub async fn pop<T: DeserializeOwned>(
        &self,
        key: &SessionKey<T>,
    ) -> Result<Option<T>, SessionError> {
        Ok(self.0.remove::<T>(key.name).await?)
    }

    /// Queues a flash message for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn flash(&self, kind: Flash, message: &str) -> Result<(), SessionError> {
        self.insert(&kind.key(), &message.to_string()).await
    }

    /// Takes every pending flash message.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn take_flashes(&self) -> Result<Flashes, SessionError> {
        Ok(Flashes {
            flash: self.pop(&Flash::Success.key()).await?,
            warning: self.pop(&Flash::Warning.key()).await?,
            error: self.pop(&Flash::Error.key()).await?,
        })
    }

    /// Whether an administrator is logged in on this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(self.get(&USER_ID).await?.is_some())
    }

    /// Issues a new session id, keeping the data.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn cycle_id(&self) -> Result<(), SessionError> {
        Ok(self.0.cycle_id().await?)
    }

    /// Deletes the session and all its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn flush(&self) -> Result<(), SessionError> {
        Ok(self.0.flush().await?)
    }
}

impl<S> FromRequestParts<S> for TypedSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self)
    }
}

/// Extractor for routes that need a logged-in administrator.
///
/// Anonymous requests get an error flash and a redirect to the login page.
pub struct AdminUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session: TypedSession = TypedSession::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let user_id: Option<i64> = session
            .get(&USER_ID)
            .await
            .map_err(|e| HttpError::from(e).into_response())?;

        if let Some(user_id) = user_id {
            return Ok(Self { user_id });
        }

        debug!(path = %parts.uri.path(), "Anonymous request for admin page");
        session
            .flash(Flash::Error, "Log in first!")
            .await
            .map_err(|e| HttpError::from(e).into_response())?;

        Err(Redirect::to("/user/login").into_response())
    }
}
