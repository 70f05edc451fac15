use std::path::Path;

use async_trait::async_trait;
use scheduler::{ExpiryRequest, ExpiryScheduler};
use serde_json::json;
use shared::{
    abstract_trait::{DynNotificationGateway, DynProductRepository, ProductServiceTrait},
    domain::{
        requests::{CreateProductRequest, UploadedImage},
        responses::{ApiResponse, ProductResponse},
    },
    errors::ServiceError,
    utils::parse_expire_date,
};
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct ProductService {
    repository: DynProductRepository,
    scheduler: ExpiryScheduler,
    gateway: DynNotificationGateway,
    base_url: String,
    upload_dir: String,
}

impl ProductService {
    pub fn new(
        repository: DynProductRepository,
        scheduler: ExpiryScheduler,
        gateway: DynNotificationGateway,
        base_url: String,
        upload_dir: String,
    ) -> Self {
        Self {
            repository,
            scheduler,
            gateway,
            base_url,
            upload_dir,
        }
    }

    async fn store_image(&self, upload: &UploadedImage) -> Result<String, ServiceError> {
        let extension = Path::new(&upload.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let file_name = format!("{}.{extension}", Uuid::new_v4());

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| ServiceError::Internal(format!("Failed to create upload dir: {e}")))?;

        let disk_path = Path::new(&self.upload_dir).join(&file_name);
        tokio::fs::write(&disk_path, &upload.bytes)
            .await
            .map_err(|e| ServiceError::Internal(format!("Failed to store image: {e}")))?;

        info!("✅ Image stored: {}", disk_path.display());

        Ok(format!("/uploads/{file_name}"))
    }

    fn notify_created(&self, response: &ProductResponse) {
        let gateway = self.gateway.clone();
        let payload = json!(response);
        tokio::spawn(async move {
            if let Err(e) = gateway.publish_event("newProduct", payload).await {
                error!("❌ Failed to publish newProduct event: {e}");
            }
        });

        let gateway = self.gateway.clone();
        let body = format!("{} is now available at a discount price!", response.name);
        tokio::spawn(async move {
            if let Err(e) = gateway.send_push("🛒 New Product Added", &body).await {
                error!("❌ Failed to send new product push notification: {e}");
            }
        });
    }

    fn notify_deleted(&self, code: &str) {
        let gateway = self.gateway.clone();
        let payload = json!(code);
        tokio::spawn(async move {
            if let Err(e) = gateway.publish_event("productDeleted", payload).await {
                error!("❌ Failed to publish productDeleted event: {e}");
            }
        });

        let gateway = self.gateway.clone();
        let body = format!("Product {code} has been removed.");
        tokio::spawn(async move {
            if let Err(e) = gateway.send_push("🗑️ Product Removed", &body).await {
                error!("❌ Failed to send product removed push notification: {e}");
            }
        });
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn create_product(
        &self,
        request: &CreateProductRequest,
        image: Option<UploadedImage>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let image_path = match &image {
            Some(upload) => Some(self.store_image(upload).await?),
            None => None,
        };

        // An expire date that does not parse is stored as NULL; the
        // product still goes in and simply never expires.
        let expire_date = match request.expire_date.as_deref() {
            Some(raw) => {
                let parsed = parse_expire_date(raw);
                if parsed.is_none() {
                    warn!("⚠️ Unparseable expire date {raw:?} for {}", request.name);
                }
                parsed
            }
            None => None,
        };

        let product = self
            .repository
            .create_product(request, image_path, expire_date)
            .await?;

        self.scheduler.schedule(ExpiryRequest::from(&product)).await;

        let response = ProductResponse::from(product).resolve_image(&self.base_url);

        self.notify_created(&response);

        Ok(ApiResponse::success(
            "Product created successfully",
            response,
        ))
    }

    async fn get_products(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let products = self.repository.find_all().await?;

        let responses = products
            .into_iter()
            .map(|product| ProductResponse::from(product).resolve_image(&self.base_url))
            .collect();

        Ok(ApiResponse::success(
            "Products retrieved successfully",
            responses,
        ))
    }

    async fn delete_product(&self, code: &str) -> Result<ApiResponse<bool>, ServiceError> {
        let product = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with code {code} not found")))?;

        self.scheduler.cancel(product.product_id).await;

        // The expiry timer may win the race between lookup and delete.
        // In that case the row is already gone, the expiry notifications
        // have gone out, and this delete must not produce a second set.
        let deleted = self.repository.delete_by_id(product.product_id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!(
                "Product with code {code} not found"
            )));
        }

        self.notify_deleted(code);

        Ok(ApiResponse::success("Product deleted successfully", true))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex as StdMutex},
        time::Duration as StdDuration,
    };

    use chrono::{Duration as ChronoDuration, Utc};
    use serde_json::Value;
    use shared::{
        abstract_trait::{
            DynExpiryStore, ExpiryStoreTrait, NotificationGatewayTrait, ProductRepositoryTrait,
        },
        errors::{NotifyError, RepositoryError},
        model::Product,
    };
    use tokio::time::sleep;

    use super::*;

    #[derive(Default)]
    struct FakeProductRepository {
        rows: StdMutex<HashMap<i32, Product>>,
        next_id: StdMutex<i32>,
    }

    impl FakeProductRepository {
        fn contains(&self, product_id: i32) -> bool {
            self.rows.lock().unwrap().contains_key(&product_id)
        }
    }

    #[async_trait]
    impl ProductRepositoryTrait for FakeProductRepository {
        async fn create_product(
            &self,
            request: &CreateProductRequest,
            image: Option<String>,
            expire_date: Option<chrono::NaiveDateTime>,
        ) -> Result<Product, RepositoryError> {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;

            let product = Product {
                product_id: *next_id,
                code: request.code.clone(),
                name: request.name.clone(),
                description: request.description.clone(),
                ingredients: request.ingredients.clone(),
                price: request.price,
                discount_price: request.discount_price,
                image,
                expire_date,
                created_at: Some(Utc::now().naive_utc()),
            };

            self.rows
                .lock()
                .unwrap()
                .insert(product.product_id, product.clone());

            Ok(product)
        }

        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            let mut products: Vec<Product> =
                self.rows.lock().unwrap().values().cloned().collect();
            products.sort_by_key(|p| p.product_id);
            Ok(products)
        }

        async fn find_by_id(&self, product_id: i32) -> Result<Option<Product>, RepositoryError> {
            Ok(self.rows.lock().unwrap().get(&product_id).cloned())
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<Product>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|p| p.code == code)
                .cloned())
        }

        async fn delete_by_id(&self, product_id: i32) -> Result<bool, RepositoryError> {
            Ok(self.rows.lock().unwrap().remove(&product_id).is_some())
        }
    }

    #[async_trait]
    impl ExpiryStoreTrait for FakeProductRepository {
        async fn delete_by_id(&self, product_id: i32) -> Result<bool, RepositoryError> {
            ProductRepositoryTrait::delete_by_id(self, product_id).await
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        events: StdMutex<Vec<(String, Value)>>,
        pushes: StdMutex<Vec<(String, String)>>,
    }

    impl FakeGateway {
        fn event_names(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|(name, _)| name.clone())
                .collect()
        }
    }

    #[async_trait]
    impl NotificationGatewayTrait for FakeGateway {
        async fn publish_event(&self, event: &str, payload: Value) -> Result<(), NotifyError> {
            self.events
                .lock()
                .unwrap()
                .push((event.to_string(), payload));
            Ok(())
        }

        async fn send_push(&self, title: &str, body: &str) -> Result<(), NotifyError> {
            self.pushes
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn fixture() -> (ProductService, Arc<FakeProductRepository>, Arc<FakeGateway>) {
        let repository = Arc::new(FakeProductRepository::default());
        let gateway = Arc::new(FakeGateway::default());
        let scheduler = ExpiryScheduler::new(
            repository.clone() as DynExpiryStore,
            gateway.clone() as DynNotificationGateway,
        );
        let service = ProductService::new(
            repository.clone() as DynProductRepository,
            scheduler,
            gateway.clone() as DynNotificationGateway,
            "http://localhost:5000".to_string(),
            "./uploads".to_string(),
        );
        (service, repository, gateway)
    }

    fn create_request(code: &str, name: &str, expire_date: Option<String>) -> CreateProductRequest {
        CreateProductRequest {
            code: code.to_string(),
            name: name.to_string(),
            description: None,
            ingredients: None,
            price: 4999,
            discount_price: 3999,
            expire_date,
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn created_product_expires_and_is_removed() {
        let (service, repository, gateway) = fixture();

        let expire = (Utc::now() + ChronoDuration::seconds(2)).to_rfc3339();
        let response = service
            .create_product(&create_request("P1", "Milk", Some(expire)), None)
            .await
            .unwrap();
        let product_id = response.data.id;

        settle().await;
        assert!(repository.contains(product_id));

        sleep(StdDuration::from_secs(3)).await;
        settle().await;

        assert!(!repository.contains(product_id));
        assert_eq!(
            gateway.event_names(),
            vec!["newProduct".to_string(), "productExpired".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn product_without_expiry_is_never_removed() {
        let (service, repository, gateway) = fixture();

        let response = service
            .create_product(&create_request("P2", "Honey", None), None)
            .await
            .unwrap();
        let product_id = response.data.id;

        sleep(StdDuration::from_secs(3600)).await;
        settle().await;

        assert!(repository.contains(product_id));
        assert_eq!(gateway.event_names(), vec!["newProduct".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn unparseable_expiry_still_creates_product() {
        let (service, repository, _gateway) = fixture();

        let response = service
            .create_product(
                &create_request("P3", "Jam", Some("not a date".to_string())),
                None,
            )
            .await
            .unwrap();

        assert!(repository.contains(response.data.id));
        assert!(response.data.expire_date.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_delete_cancels_pending_expiry() {
        let (service, repository, gateway) = fixture();

        let expire = (Utc::now() + ChronoDuration::seconds(30)).to_rfc3339();
        let response = service
            .create_product(&create_request("P4", "Cheese", Some(expire)), None)
            .await
            .unwrap();
        let product_id = response.data.id;

        service.delete_product("P4").await.unwrap();
        settle().await;

        assert!(!repository.contains(product_id));

        // Past the original deadline nothing else may happen.
        sleep(StdDuration::from_secs(60)).await;
        settle().await;

        assert_eq!(
            gateway.event_names(),
            vec!["newProduct".to_string(), "productDeleted".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delete_after_expiry_reports_not_found() {
        let (service, _repository, gateway) = fixture();

        let expire = (Utc::now() + ChronoDuration::seconds(1)).to_rfc3339();
        service
            .create_product(&create_request("P5", "Butter", Some(expire)), None)
            .await
            .unwrap();

        sleep(StdDuration::from_secs(2)).await;
        settle().await;

        let err = service.delete_product("P5").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        // Exactly one lifecycle: created, then expired. No delete events.
        assert_eq!(
            gateway.event_names(),
            vec!["newProduct".to_string(), "productExpired".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delete_unknown_code_reports_not_found() {
        let (service, _repository, _gateway) = fixture();

        let err = service.delete_product("NOPE").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
