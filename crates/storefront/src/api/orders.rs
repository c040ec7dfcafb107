//! Order endpoints.
//!
//! Every read passes through [`super::conversions::order`], so callers only
//! ever see the canonical [`crate::models::Order`] shape.

use myshop_core::{OrderId, OrderStatus};

use crate::models::Order;

use super::types::OrderPayload;
use super::{ApiClient, ApiError, conversions};

impl ApiClient {
    /// `POST /orders` - create an order from the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty or stock ran out.
    pub async fn create_order(&self) -> Result<Order, ApiError> {
        let payload: OrderPayload = self.post("/orders", &[], None::<&()>).await?;
        Ok(conversions::order(&payload))
    }

    /// `GET /orders` - the caller's own order history.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or on transport failure.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let payloads: Vec<OrderPayload> = self.get("/orders", &[]).await?;
        Ok(payloads.iter().map(conversions::order).collect())
    }

    /// `GET /orders/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or belongs to someone
    /// else.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        let payload: OrderPayload = self.get(&format!("/orders/{id}"), &[]).await?;
        Ok(conversions::order(&payload))
    }

    /// `GET /orders/admin` - every order in the shop (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks the admin role.
    pub async fn list_all_orders(&self) -> Result<Vec<Order>, ApiError> {
        let payloads: Vec<OrderPayload> = self.get("/orders/admin", &[]).await?;
        Ok(payloads.iter().map(conversions::order).collect())
    }

    /// `PUT /orders/admin/{id}/status?status=` (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the caller lacks the
    /// admin role.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let payload: OrderPayload = self
            .put(
                &format!("/orders/admin/{id}/status"),
                &[("status", status.to_string())],
                None::<&()>,
            )
            .await?;
        Ok(conversions::order(&payload))
    }
}
