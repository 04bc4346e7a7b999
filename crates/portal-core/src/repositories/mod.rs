//! Repository and outbound-service traits (ports)

pub mod account_repository;
pub mod action_repository;
pub mod appointment_repository;
pub mod document_store;
pub mod kyc_repository;
pub mod mailer;
pub mod profile_repository;
pub mod progress_repository;
pub mod reset_token_repository;

pub use account_repository::AccountRepository;
pub use action_repository::ActionRepository;
pub use appointment_repository::AppointmentRepository;
pub use document_store::{DocumentStore, StoredDocument};
pub use kyc_repository::KycRepository;
pub use mailer::Mailer;
pub use profile_repository::ProfileRepository;
pub use progress_repository::ProgressRepository;
pub use reset_token_repository::ResetTokenRepository;
