//! PostgreSQL repository implementations

pub mod account_repo_impl;
pub mod action_repo_impl;
pub mod appointment_repo_impl;
pub mod kyc_repo_impl;
pub mod profile_repo_impl;
pub mod progress_repo_impl;
pub mod reset_token_repo_impl;

pub use account_repo_impl::PgAccountRepository;
pub use action_repo_impl::PgActionRepository;
pub use appointment_repo_impl::PgAppointmentRepository;
pub use kyc_repo_impl::PgKycRepository;
pub use profile_repo_impl::PgProfileRepository;
pub use progress_repo_impl::PgProgressRepository;
pub use reset_token_repo_impl::PgResetTokenRepository;
