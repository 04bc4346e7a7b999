//! Appointment domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    #[serde(rename = "confirmé")]
    Confirme,
    #[serde(rename = "à confirmer")]
    AConfirmer,
    #[default]
    #[serde(rename = "à venir")]
    AVenir,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirme => "confirmé",
            AppointmentStatus::AConfirmer => "à confirmer",
            AppointmentStatus::AVenir => "à venir",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "confirmé" => Some(AppointmentStatus::Confirme),
            "à confirmer" => Some(AppointmentStatus::AConfirmer),
            "à venir" => Some(AppointmentStatus::AVenir),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,

    /// Free-form type shown on the dashboard ("Rendez-vous juridique", ...).
    pub kind: String,
    pub date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub location: Option<String>,

    /// Optional call-to-action rendered next to the appointment.
    pub action_label: Option<String>,
    pub action_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        client_id: Uuid,
        kind: String,
        date: DateTime<Utc>,
        status: AppointmentStatus,
        location: Option<String>,
        action_label: Option<String>,
        action_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            kind,
            date,
            status,
            location,
            action_label,
            action_url,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(AppointmentStatus::Confirme.as_str(), "confirmé");
        assert_eq!(
            AppointmentStatus::from_str("à confirmer"),
            Some(AppointmentStatus::AConfirmer)
        );
        assert_eq!(AppointmentStatus::from_str("annulé"), None);
    }
}
