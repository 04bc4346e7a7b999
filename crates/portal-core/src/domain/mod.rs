//! # Portal Core - Domain Module
//!
//! Domain entities for the client portal.

pub mod account;
pub mod appointment;
pub mod business_progress;
pub mod kyc_profile;
pub mod profile;
pub mod reset_token;
pub mod upcoming_action;

// Re-export all entities and enums
pub use account::AuthAccount;
pub use appointment::{Appointment, AppointmentStatus};
pub use business_progress::{BusinessProgress, ProgressStatus, ProgressStep};
pub use kyc_profile::{KycProfile, ReviewStatus};
pub use profile::{Profile, Role};
pub use reset_token::PasswordResetToken;
pub use upcoming_action::UpcomingAction;
