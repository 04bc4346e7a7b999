//! # Portal Infrastructure
//!
//! Database, storage, and email implementations (adapters).

pub mod database;
pub mod email;
pub mod storage;

pub use database::{
    create_pool, run_migrations, PgAccountRepository, PgActionRepository,
    PgAppointmentRepository, PgKycRepository, PgProfileRepository, PgProgressRepository,
    PgResetTokenRepository,
};
pub use email::SmtpMailer;
pub use storage::LocalDocumentStore;
