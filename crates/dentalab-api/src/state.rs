use std::sync::Arc;

use dentalab_core::repositories::{
    ClientRepository, LaboratoryRepository, OrderRepository, ProsthesisRepository,
    TechnicianRepository,
};
use dentalab_core::services::{
    ClientService, LaboratoryService, OrderService, ProsthesisService, TechnicianService,
};
use dentalab_security::JwtService;
use dentalab_shared::config::AppConfig;

/// Storage adapters the services are built on.
pub struct Repositories {
    pub laboratories: Arc<dyn LaboratoryRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub prostheses: Arc<dyn ProsthesisRepository>,
    pub technicians: Arc<dyn TechnicianRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub jwt: Arc<JwtService>,
    pub laboratories: Arc<LaboratoryService>,
    pub clients: Arc<ClientService>,
    pub orders: Arc<OrderService>,
    pub prostheses: Arc<ProsthesisService>,
    pub technicians: Arc<TechnicianService>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let jwt = Arc::new(JwtService::new(
            config.auth.jwt_secret.clone(),
            config.auth.leeway_secs,
        ));

        Self {
            laboratories: Arc::new(LaboratoryService::new(repos.laboratories.clone())),
            clients: Arc::new(ClientService::new(
                repos.clients.clone(),
                repos.laboratories.clone(),
            )),
            orders: Arc::new(OrderService::new(repos.orders, repos.clients)),
            prostheses: Arc::new(ProsthesisService::new(
                repos.prostheses,
                repos.laboratories.clone(),
            )),
            technicians: Arc::new(TechnicianService::new(repos.technicians, repos.laboratories)),
            jwt,
            config,
        }
    }
}
