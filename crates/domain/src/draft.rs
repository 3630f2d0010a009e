// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::DateRange;
use crate::error::DomainError;
use crate::types::{ContactDetails, NewReservation};
use serde::{Deserialize, Serialize};

/// How far a guest has progressed through the booking pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DraftStage {
    /// Dates chosen, no bungalow yet.
    DatesSet,
    /// A bungalow has been chosen for the dates.
    BungalowChosen,
    /// Contact data entered but not yet stored.
    ContactPending,
}

/// A reservation being assembled across several requests.
///
/// The draft lives in the guest's session and is discarded once the
/// reservation has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    range: DateRange,
    bungalow_id: Option<i64>,
    bungalow_name: Option<String>,
    contact: Option<ContactDetails>,
}

impl ReservationDraft {
    /// Starts a draft for the searched dates.
    #[must_use]
    pub const fn new(range: DateRange) -> Self {
        Self {
            range,
            bungalow_id: None,
            bungalow_name: None,
            contact: None,
        }
    }

    /// Starts a draft with the bungalow already chosen.
    #[must_use]
    pub fn for_bungalow(range: DateRange, bungalow_id: i64) -> Self {
        let mut draft: Self = Self::new(range);
        draft.choose_bungalow(bungalow_id);
        draft
    }

    /// Chooses the bungalow, forgetting any previously loaded name.
    pub fn choose_bungalow(&mut self, bungalow_id: i64) {
        self.bungalow_id = Some(bungalow_id);
        self.bungalow_name = None;
    }

    pub fn set_bungalow_name(&mut self, name: impl Into<String>) {
        self.bungalow_name = Some(name.into());
    }

    pub fn set_contact(&mut self, contact: ContactDetails) {
        self.contact = Some(contact);
    }

    #[must_use]
    pub const fn stage(&self) -> DraftStage {
        match (self.bungalow_id, &self.contact) {
            (None, _) => DraftStage::DatesSet,
            (Some(_), None) => DraftStage::BungalowChosen,
            (Some(_), Some(_)) => DraftStage::ContactPending,
        }
    }

    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    #[must_use]
    pub const fn bungalow_id(&self) -> Option<i64> {
        self.bungalow_id
    }

    #[must_use]
    pub fn bungalow_name(&self) -> Option<&str> {
        self.bungalow_name.as_deref()
    }

    #[must_use]
    pub const fn contact(&self) -> Option<&ContactDetails> {
        self.contact.as_ref()
    }

    /// The reservation to store for this draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DraftIncomplete` unless a bungalow and contact
    /// details have been supplied.
    pub fn to_new_reservation(&self) -> Result<NewReservation, DomainError> {
        let bungalow_id: i64 = self
            .bungalow_id
            .ok_or(DomainError::DraftIncomplete { missing: "bungalow" })?;
        let contact: ContactDetails = self
            .contact
            .clone()
            .ok_or(DomainError::DraftIncomplete {
                missing: "contact details",
            })?;
        Ok(NewReservation {
            bungalow_id,
            range: self.range,
            contact,
        })
    }
}
