use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{CreateProductRequest, UploadedImage},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product,
};

pub type DynProductRepository = Arc<dyn ProductRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductRepositoryTrait {
    async fn create_product(
        &self,
        request: &CreateProductRequest,
        image: Option<String>,
        expire_date: Option<NaiveDateTime>,
    ) -> Result<Product, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, product_id: i32) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, RepositoryError>;
    async fn delete_by_id(&self, product_id: i32) -> Result<bool, RepositoryError>;
}

pub type DynProductService = Arc<dyn ProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductServiceTrait {
    async fn create_product(
        &self,
        request: &CreateProductRequest,
        image: Option<UploadedImage>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn get_products(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn delete_product(&self, code: &str) -> Result<ApiResponse<bool>, ServiceError>;
}
