// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page rendering.
//!
//! Handlers describe a page as a template name plus a `TemplateData` bag and
//! leave the markup to a `Renderer`. The shipped `JsonRenderer` returns the
//! bag as a JSON document.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bungalow_bliss_domain::FormErrors;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::AppState;
use crate::error::HttpError;
use crate::session::{Flashes, TypedSession};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to encode template data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Submitted form values and their validation messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormData {
    pub values: BTreeMap<String, String>,
    pub errors: FormErrors,
}

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, field: &str, value: impl Into<String>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: FormErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// Everything a page template may read.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    pub string_map: BTreeMap<String, String>,
    pub int_map: BTreeMap<String, i64>,
    pub data: BTreeMap<String, serde_json::Value>,
    pub form: FormData,
    #[serde(flatten)]
    pub flashes: Flashes,
    pub is_authenticated: bool,
}

impl TemplateData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_string(mut self, key: &str, value: impl Into<String>) -> Self {
        self.string_map.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_int(mut self, key: &str, value: i64) -> Self {
        self.int_map.insert(key.to_string(), value);
        self
    }

    /// Adds a structured value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be encoded.
    pub fn with_data<T: Serialize>(mut self, key: &str, value: &T) -> Result<Self, RenderError> {
        self.data
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_form(mut self, form: FormData) -> Self {
        self.form = form;
        self
    }
}

/// Turns a named template and its data into a response body.
pub trait Renderer: Send + Sync {
    /// The `Content-Type` of rendered pages.
    fn content_type(&self) -> &'static str;

    /// Renders `template` with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be produced.
    fn render(&self, template: &str, data: &TemplateData) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct RenderedPage<'a> {
    template: &'a str,
    data: &'a TemplateData,
}

impl Renderer for JsonRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, template: &str, data: &TemplateData) -> Result<Vec<u8>, RenderError> {
        Ok(serde_json::to_vec(&RenderedPage { template, data })?)
    }
}

/// Renders a page, attaching pending flashes and the login state.
///
/// # Errors
///
/// Returns an error if the session or the renderer fails.
pub async fn render_page(
    state: &AppState,
    session: &TypedSession,
    template: &str,
    mut data: TemplateData,
) -> Result<Response, HttpError> {
    data.flashes = session.take_flashes().await?;
    data.is_authenticated = session.is_authenticated().await?;

    let body: Vec<u8> = state.renderer.render(template, &data)?;

    Ok((
        [(header::CONTENT_TYPE, state.renderer.content_type())],
        body,
    )
        .into_response())
}
