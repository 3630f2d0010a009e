// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! E-mail messages sent when a reservation is made.

use serde::{Deserialize, Serialize};

use crate::request_response::ReservationSummary;

/// Default sender address of outgoing mail.
pub const DEFAULT_MAIL_FROM: &str = "noreply@bungalow-bliss.com";

/// Default address that receives owner notifications.
pub const DEFAULT_OWNER_EMAIL: &str = "owner@bungalow-bliss.com";

/// Addresses used when composing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Sender of every message.
    pub from: String,
    /// Recipient of owner notifications.
    pub owner: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            from: DEFAULT_MAIL_FROM.to_string(),
            owner: DEFAULT_OWNER_EMAIL.to_string(),
        }
    }
}

/// An e-mail waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub content: String,
}

/// Composes the guest confirmation and the owner notification, in that order.
#[must_use]
pub fn reservation_notifications(
    summary: &ReservationSummary,
    settings: &MailSettings,
) -> [MailMessage; 2] {
    let guest: MailMessage = MailMessage {
        to: summary.email.clone(),
        from: settings.from.clone(),
        subject: String::from("Reservation Confirmation"),
        content: format!(
            "<strong>Reservation Confirmation</strong><br>\
             Dear {},<br>\
             this is to confirm your reservation of {} from {} to {}.",
            summary.full_name, summary.bungalow_name, summary.start_date, summary.end_date
        ),
    };

    let owner: MailMessage = MailMessage {
        to: settings.owner.clone(),
        from: settings.from.clone(),
        subject: String::from("Reservation Notification"),
        content: format!(
            "<strong>Reservation Notification</strong><br>\
             A reservation has been made for {} from {} to {} by {} ({}).",
            summary.bungalow_name,
            summary.start_date,
            summary.end_date,
            summary.full_name,
            summary.email
        ),
    };

    [guest, owner]
}
