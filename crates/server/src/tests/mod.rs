// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router-level tests for the server.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, StatusCode, header},
    response::Response,
};
use bungalow_bliss_api::{AuthenticationService, MailMessage, finalize_reservation};
use bungalow_bliss_domain::{ContactDetails, DateRange, ReservationDraft};
use bungalow_bliss_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;

use crate::mail::Mailer;
use crate::render::JsonRenderer;
use crate::{AppConfig, AppState, build_router};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// A router plus the session cookie of one simulated browser.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub mail_rx: UnboundedReceiver<MailMessage>,
    cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AuthenticationService::ensure_admin(&mut persistence, "Owner", ADMIN_EMAIL, ADMIN_PASSWORD)
            .unwrap();

        let (mailer, mail_rx) = Mailer::new();
        let state: AppState =
            AppState::new(persistence, config, Arc::new(JsonRenderer), mailer);

        Self {
            router: build_router(state.clone()),
            state,
            mail_rx,
            cookie: None,
        }
    }

    /// Sends a request with the current session cookie and keeps any new one.
    pub async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }

        let response: Response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let set_cookie: &str = set_cookie.to_str().unwrap();
            let pair: &str = set_cookie.split(';').next().unwrap().trim();
            let expired: bool = set_cookie.contains("Max-Age=0") || pair.ends_with('=');
            self.cookie = if expired {
                None
            } else {
                Some(pair.to_string())
            };
        }

        response
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&mut self, uri: &str, body: &serde_json::Value) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn login(&mut self) {
        let response: Response = self
            .post_form(
                "/user/login",
                &format!("email={ADMIN_EMAIL}&password={ADMIN_PASSWORD}"),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    /// The data of the next rendered page, which carries the pending flashes.
    pub async fn flashes(&mut self) -> serde_json::Value {
        let response: Response = self.get("/about").await;
        page(response).await["data"].clone()
    }

    /// Stores a reservation directly, bypassing the booking pages.
    pub async fn insert_reservation(&self, bungalow_id: i64, start: &str, end: &str) -> i64 {
        let mut draft: ReservationDraft = ReservationDraft::for_bungalow(range(start, end), bungalow_id);
        draft.set_contact(ContactDetails::new("Pat Doe", "pat@example.com", "555-0100"));

        let mut persistence = self.state.persistence.lock().await;
        finalize_reservation(&mut persistence, &draft)
            .unwrap()
            .reservation_id
    }
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).expect("Valid test range")
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Response has no Location header")
        .to_str()
        .unwrap()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Asserts a rendered page and returns its JSON document.
pub async fn page(response: Response) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    json_body(response).await
}
