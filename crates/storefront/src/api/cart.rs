//! Cart endpoints.
//!
//! Reads are normalized through [`super::conversions`] before returning.
//! The [`CartBackend`] trait is the seam the cart state service depends on,
//! so tests can substitute a scripted backend.

use myshop_core::{CartItemId, ProductId};
use serde_json::Value;

use crate::models::CartItem;

use super::types::CartItemPayload;
use super::{ApiClient, ApiError, conversions};

/// The backend operations the cart state service needs.
pub trait CartBackend: Send + Sync {
    /// Fetch the current cart contents.
    fn fetch_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send;
    /// Add a product to the cart.
    fn add_item(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
    /// Change the quantity of a cart line.
    fn update_item(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
    /// Remove a cart line.
    fn remove_item(&self, item_id: CartItemId) -> impl Future<Output = Result<(), ApiError>> + Send;
    /// Empty the cart.
    fn clear(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl ApiClient {
    /// `GET /cart`, normalized.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or on transport failure.
    pub async fn get_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        let payloads: Vec<CartItemPayload> = self.get("/cart", &[]).await?;
        Ok(payloads.iter().map(conversions::cart_item).collect())
    }

    /// `POST /cart?productId=&quantity=`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or stock is exceeded.
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<(), ApiError> {
        let _: Value = self
            .post(
                "/cart",
                &[
                    ("productId", product_id.to_string()),
                    ("quantity", quantity.to_string()),
                ],
                None::<&()>,
            )
            .await?;
        Ok(())
    }

    /// `PUT /cart/{itemId}?quantity=`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart line does not exist.
    pub async fn update_cart_item(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let _: Value = self
            .put(
                &format!("/cart/{item_id}"),
                &[("quantity", quantity.to_string())],
                None::<&()>,
            )
            .await?;
        Ok(())
    }

    /// `DELETE /cart/{itemId}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart line does not exist.
    pub async fn remove_cart_item(&self, item_id: CartItemId) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("/cart/{item_id}")).await?;
        Ok(())
    }

    /// `DELETE /cart/clear`.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or on transport failure.
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        let _: Value = self.delete("/cart/clear").await?;
        Ok(())
    }
}

impl CartBackend for ApiClient {
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.get_cart().await
    }

    async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<(), ApiError> {
        self.add_to_cart(product_id, quantity).await
    }

    async fn update_item(&self, item_id: CartItemId, quantity: u32) -> Result<(), ApiError> {
        self.update_cart_item(item_id, quantity).await
    }

    async fn remove_item(&self, item_id: CartItemId) -> Result<(), ApiError> {
        self.remove_cart_item(item_id).await
    }

    async fn clear(&self) -> Result<(), ApiError> {
        self.clear_cart().await
    }
}
