use std::sync::Arc;

use portal_core::repositories::{
    ActionRepository, AppointmentRepository, DocumentStore, KycRepository, ProfileRepository,
    ProgressRepository,
};
use portal_core::services::{AuthService, DeletionService, ProvisioningService, ReviewService};
use portal_security::signing::UrlSigner;
use portal_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub provisioning: Arc<ProvisioningService>,
    pub deletion: Arc<DeletionService>,
    pub review: Arc<ReviewService>,

    pub profiles: Arc<dyn ProfileRepository>,
    pub kyc: Arc<dyn KycRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub actions: Arc<dyn ActionRepository>,
    pub documents: Arc<dyn DocumentStore>,

    pub url_signer: UrlSigner,
    pub config: AppConfig,
}
