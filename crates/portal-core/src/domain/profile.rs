//! Profile domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Closed set of portal roles. Every dashboard and guard dispatches over
/// this enum, never over free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ChargeDeCompte,
    #[default]
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ChargeDeCompte => "charge_de_compte",
            Role::Client => "client",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "charge_de_compte" => Some(Role::ChargeDeCompte),
            "client" => Some(Role::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Profile {
    pub user_id: Uuid,

    pub first_name: String,
    pub last_name: String,

    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,

    pub role: Role,
    pub is_active: bool,

    /// Account manager this client is assigned to. Single-level, at most one.
    pub assigned_to: Option<Uuid>,
    pub calendly_link: Option<String>,

    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn new(
        user_id: Uuid,
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        role: Role,
        assigned_to: Option<Uuid>,
        calendly_link: Option<String>,
    ) -> Self {
        Self {
            user_id,
            first_name,
            last_name,
            email,
            phone,
            role,
            is_active: true,
            // Assignment only carries meaning for clients
            assigned_to: if role == Role::Client { assigned_to } else { None },
            calendly_link,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::ChargeDeCompte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_strings() {
        assert_eq!(Role::ChargeDeCompte.as_str(), "charge_de_compte");
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("superuser"), None);
    }

    #[test]
    fn test_assignment_ignored_for_non_clients() {
        let manager_id = Uuid::new_v4();
        let p = Profile::new(
            Uuid::new_v4(),
            "Anne".to_string(),
            "Morel".to_string(),
            "anne@exemple.fr".to_string(),
            None,
            Role::ChargeDeCompte,
            Some(manager_id),
            None,
        );
        assert!(p.assigned_to.is_none());
    }

    #[test]
    fn test_client_keeps_assignment() {
        let manager_id = Uuid::new_v4();
        let p = Profile::new(
            Uuid::new_v4(),
            "Karim".to_string(),
            "Bel".to_string(),
            "karim@exemple.fr".to_string(),
            Some("+33600000000".to_string()),
            Role::Client,
            Some(manager_id),
            None,
        );
        assert_eq!(p.assigned_to, Some(manager_id));
        assert_eq!(p.full_name(), "Karim Bel");
    }
}
