use crate::service::{AnalysisService, AuthService, OrderService, ProductService};
use anyhow::{Context, Result};
use notifier::{EmailService, Notifier, PushClient, RealtimeHub};
use scheduler::ExpiryScheduler;
use shared::{
    abstract_trait::{
        DynAnalysisService, DynAuthService, DynEmailService, DynExpiryStore, DynHashing,
        DynJwtService, DynNotificationGateway, DynOrderRepository, DynOrderService,
        DynProductRepository, DynProductService, DynUserRepository,
    },
    config::{Config, ConnectionPool, Hashing},
    repository::{OrderRepository, ProductRepository, UserRepository},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub product_service: DynProductService,
    pub order_service: DynOrderService,
    pub analysis_service: DynAnalysisService,
    pub user_repository: DynUserRepository,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("product_service", &"DynProductService")
            .field("order_service", &"DynOrderService")
            .field("analysis_service", &"DynAnalysisService")
            .field("user_repository", &"DynUserRepository")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        pool: ConnectionPool,
        jwt: DynJwtService,
        hub: RealtimeHub,
        config: &Config,
    ) -> Result<Self> {
        let hashing = Arc::new(Hashing::new()) as DynHashing;

        let user_repository = Arc::new(UserRepository::new(pool.clone())) as DynUserRepository;
        let product_repository = Arc::new(ProductRepository::new(pool.clone()));
        let order_repository = Arc::new(OrderRepository::new(pool)) as DynOrderRepository;

        let push_client = PushClient::new(&config.push_config);
        let notification_gateway =
            Arc::new(Notifier::new(hub, push_client)) as DynNotificationGateway;

        let email_service = Arc::new(
            EmailService::new(&config.email_config)
                .context("Failed to initialize SMTP transport")?,
        ) as DynEmailService;

        // The product repository doubles as the scheduler's view of the
        // store, so expiry deletes hit the same rows the API serves.
        let expiry_scheduler = ExpiryScheduler::new(
            product_repository.clone() as DynExpiryStore,
            notification_gateway.clone(),
        );

        let product_service = Arc::new(ProductService::new(
            product_repository.clone() as DynProductRepository,
            expiry_scheduler,
            notification_gateway,
            config.base_url.clone(),
            config.upload_dir.clone(),
        )) as DynProductService;

        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            hashing,
            jwt,
            email_service,
            config.client_url.clone(),
        )) as DynAuthService;

        let order_service = Arc::new(OrderService::new(order_repository)) as DynOrderService;

        let analysis_service = Arc::new(AnalysisService::new(
            product_repository as DynProductRepository,
            config.ai_config.clone(),
            config.base_url.clone(),
        )) as DynAnalysisService;

        Ok(Self {
            auth_service,
            product_service,
            order_service,
            analysis_service,
            user_repository,
        })
    }
}
