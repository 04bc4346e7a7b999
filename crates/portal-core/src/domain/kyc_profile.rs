//! KYC profile domain entity
//!
//! The review cycle is pending -> approved | rejected -> (resubmit) ->
//! pending. A rejection always carries a reviewer comment; a pending or
//! approved profile never does.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycProfile {
    pub user_id: Uuid,

    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,

    pub passport_path: Option<String>,
    pub id_card_path: Option<String>,

    pub status: ReviewStatus,
    pub comment: Option<String>,

    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl KycProfile {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            birth_date: None,
            birth_place: None,
            nationality: None,
            address: None,
            city: None,
            postal_code: None,
            passport_path: None,
            id_card_path: None,
            status: ReviewStatus::Pending,
            comment: None,
            submitted_at: None,
            reviewed_at: None,
        }
    }

    /// Client saved the form. Any earlier review outcome is superseded and
    /// the previous rejection comment is cleared.
    pub fn submit(&mut self) {
        self.status = ReviewStatus::Pending;
        self.comment = None;
        self.submitted_at = Some(Utc::now());
        self.reviewed_at = None;
    }

    pub fn approve(&mut self) {
        self.status = ReviewStatus::Approved;
        self.comment = None;
        self.reviewed_at = Some(Utc::now());
    }

    pub fn reject(&mut self, comment: &str) -> Result<(), DomainError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(DomainError::ValidationError(
                "a rejection requires a comment".to_string(),
            ));
        }
        self.status = ReviewStatus::Rejected;
        self.comment = Some(comment.to_string());
        self.reviewed_at = Some(Utc::now());
        Ok(())
    }

    pub fn is_rejected(&self) -> bool {
        self.status == ReviewStatus::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_requires_comment() {
        let mut kyc = KycProfile::new(Uuid::new_v4());
        kyc.submit();
        assert!(kyc.reject("  ").is_err());
        assert_eq!(kyc.status, ReviewStatus::Pending);
    }

    #[test]
    fn test_rejection_then_resubmission_clears_comment() {
        let mut kyc = KycProfile::new(Uuid::new_v4());
        kyc.submit();
        assert_eq!(kyc.status, ReviewStatus::Pending);

        kyc.reject("photo illisible").unwrap();
        assert_eq!(kyc.status, ReviewStatus::Rejected);
        assert_eq!(kyc.comment.as_deref(), Some("photo illisible"));

        kyc.submit();
        assert_eq!(kyc.status, ReviewStatus::Pending);
        assert!(kyc.comment.is_none());
        assert!(kyc.reviewed_at.is_none());
    }

    #[test]
    fn test_approval_carries_no_comment() {
        let mut kyc = KycProfile::new(Uuid::new_v4());
        kyc.submit();
        kyc.reject("adresse manquante").unwrap();
        kyc.submit();
        kyc.approve();
        assert_eq!(kyc.status, ReviewStatus::Approved);
        assert!(kyc.comment.is_none());
        assert!(kyc.reviewed_at.is_some());
    }
}
