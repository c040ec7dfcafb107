//! Product catalog endpoints.

use myshop_core::ProductId;
use serde_json::Value;

use crate::models::Product;

use super::types::ProductInput;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /products`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unexpected body.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/products", &[]).await
    }

    /// `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get(&format!("/products/{id}"), &[]).await
    }

    /// `POST /products/add` (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks the admin role.
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.post("/products/add", &[], Some(input)).await
    }

    /// `PUT /products/{id}` (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the caller lacks
    /// the admin role.
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.put(&format!("/products/{id}"), &[], Some(input)).await
    }

    /// `DELETE /products/{id}` (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the caller lacks
    /// the admin role.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("/products/{id}")).await?;
        Ok(())
    }
}
