//! Shop-wide order management against a live backend.
//!
//! Requires an admin account; set `MYSHOP_ADMIN_USERNAME` and
//! `MYSHOP_ADMIN_PASSWORD`, point `MYSHOP_API_BASE_URL` at the backend,
//! and run with `--ignored`.

use myshop_core::OrderStatus;
use myshop_integration_tests::test_context;

fn admin_credentials() -> (String, String) {
    let username =
        std::env::var("MYSHOP_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password =
        std::env::var("MYSHOP_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    (username, password)
}

#[tokio::test]
#[ignore = "Requires running backend"]
async fn test_admin_sees_all_orders() {
    let (api, auth) = test_context();
    let (username, password) = admin_credentials();
    auth.login(&username, &password).await.expect("admin login failed");
    assert!(auth.has_role("ADMIN"));

    // Admin listing must succeed even when empty.
    let _ = api.list_all_orders().await.expect("admin order list failed");
}

#[tokio::test]
#[ignore = "Requires running backend"]
async fn test_admin_can_advance_order_status() {
    let (api, auth) = test_context();
    let (username, password) = admin_credentials();
    auth.login(&username, &password).await.expect("admin login failed");

    let orders = api.list_all_orders().await.expect("admin order list failed");
    let Some(order) = orders.first() else {
        // Nothing to advance; the listing path is still covered above.
        return;
    };
    let id = order.id.expect("admin order without id");

    let updated = api
        .update_order_status(id, OrderStatus::Shipped)
        .await
        .expect("status update failed");
    assert_eq!(updated.status, OrderStatus::Shipped.as_str());
}

#[tokio::test]
#[ignore = "Requires running backend"]
async fn test_plain_user_cannot_list_all_orders() {
    let (api, auth) = test_context();
    // Anonymous caller: the admin listing must be rejected outright.
    auth.logout();
    let result = api.list_all_orders().await;
    assert!(result.is_err());
}
