use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::{
    abstract_trait::{ExpiryStoreTrait, ProductRepositoryTrait},
    config::ConnectionPool,
    domain::requests::CreateProductRequest,
    errors::RepositoryError,
    model::Product,
};

#[derive(Clone)]
pub struct ProductRepository {
    db: ConnectionPool,
}

impl ProductRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn create_product(
        &self,
        request: &CreateProductRequest,
        image: Option<String>,
        expire_date: Option<NaiveDateTime>,
    ) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (code, name, description, ingredients, price, discount_price, image, expire_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING product_id, code, name, description, ingredients, price, discount_price, image, expire_date, created_at
            "#,
        )
        .bind(&request.code)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.ingredients)
        .bind(request.price)
        .bind(request.discount_price)
        .bind(&image)
        .bind(expire_date)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::AlreadyExists(format!(
                    "Product code {} already exists",
                    request.code
                ))
            }
            _ => {
                error!("❌ Failed to create product: {e}");
                RepositoryError::from(e)
            }
        })?;

        info!("✅ Product created: {} ({})", product.name, product.code);

        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, code, name, description, ingredients, price, discount_price, image, expire_date, created_at
            FROM products
            ORDER BY product_id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {e}");
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(&self, product_id: i32) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, code, name, description, ingredients, price, discount_price, image, expire_date, created_at
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {product_id}: {e}");
            RepositoryError::from(e)
        })?;

        Ok(product)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, code, name, description, ingredients, price, discount_price, image, expire_date, created_at
            FROM products
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product by code {code}: {e}");
            RepositoryError::from(e)
        })?;

        Ok(product)
    }

    async fn delete_by_id(&self, product_id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {product_id}: {e}");
            RepositoryError::from(e)
        })?;

        let deleted = result.rows_affected() > 0;

        if deleted {
            info!("🗑️ Product deleted: {product_id}");
        }

        Ok(deleted)
    }
}

#[async_trait]
impl ExpiryStoreTrait for ProductRepository {
    async fn delete_by_id(&self, product_id: i32) -> Result<bool, RepositoryError> {
        ProductRepositoryTrait::delete_by_id(self, product_id).await
    }
}
