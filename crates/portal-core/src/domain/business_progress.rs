//! Business progress domain entity
//!
//! One row per (client, step); writes are upserts, the pair is never
//! duplicated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five fixed stages of a business-creation file, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProgressStep {
    #[default]
    #[serde(rename = "Validation des documents")]
    ValidationDesDocuments,
    #[serde(rename = "Rédaction des statuts")]
    RedactionDesStatuts,
    #[serde(rename = "Dépôt du capital")]
    DepotDuCapital,
    #[serde(rename = "Publication de l'annonce légale")]
    PublicationAnnonceLegale,
    #[serde(rename = "Immatriculation")]
    Immatriculation,
}

impl ProgressStep {
    pub const ALL: [ProgressStep; 5] = [
        ProgressStep::ValidationDesDocuments,
        ProgressStep::RedactionDesStatuts,
        ProgressStep::DepotDuCapital,
        ProgressStep::PublicationAnnonceLegale,
        ProgressStep::Immatriculation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStep::ValidationDesDocuments => "Validation des documents",
            ProgressStep::RedactionDesStatuts => "Rédaction des statuts",
            ProgressStep::DepotDuCapital => "Dépôt du capital",
            ProgressStep::PublicationAnnonceLegale => "Publication de l'annonce légale",
            ProgressStep::Immatriculation => "Immatriculation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|step| step.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProgressStatus {
    #[default]
    #[serde(rename = "à venir")]
    AVenir,
    #[serde(rename = "en cours")]
    EnCours,
    #[serde(rename = "validé")]
    Valide,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::AVenir => "à venir",
            ProgressStatus::EnCours => "en cours",
            ProgressStatus::Valide => "validé",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "à venir" => Some(ProgressStatus::AVenir),
            "en cours" => Some(ProgressStatus::EnCours),
            "validé" => Some(ProgressStatus::Valide),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProgress {
    pub client_id: Uuid,
    pub step: ProgressStep,
    pub status: ProgressStatus,
    pub date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl BusinessProgress {
    pub fn new(
        client_id: Uuid,
        step: ProgressStep,
        status: ProgressStatus,
        date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            client_id,
            step,
            status,
            date,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_steps_roundtrip() {
        for step in ProgressStep::ALL {
            assert_eq!(ProgressStep::from_str(step.as_str()), Some(step));
        }
        assert_eq!(ProgressStep::ALL.len(), 5);
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(ProgressStatus::Valide.as_str(), "validé");
        assert_eq!(ProgressStatus::from_str("en cours"), Some(ProgressStatus::EnCours));
        assert_eq!(ProgressStatus::from_str("terminé"), None);
    }
}
