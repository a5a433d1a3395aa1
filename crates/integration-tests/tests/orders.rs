//! Order status machine and the owner's field-level edit.

use platter_client::ApiError;
use platter_client::store::{MutateError, OrderList};
use platter_core::{OrderOwnerUpdate, OrderStatus};
use platter_integration_tests::TestContext;
use rust_decimal::Decimal;

#[tokio::test]
async fn pending_order_advances_through_confirm() {
    let ctx = TestContext::new().await;
    let restaurant = ctx.seed_restaurant("Casa Pepe");
    let order = ctx.seed_order(restaurant, OrderStatus::Pending, Decimal::new(1500, 2));

    let mut orders = OrderList::open(ctx.client.clone(), ctx.session.clone(), restaurant);
    orders.refresh().await.expect("initial fetch");

    let advanced = orders
        .advance(order)
        .await
        .expect("advance")
        .applied()
        .expect("applied");
    assert_eq!(advanced.status, OrderStatus::InProcess);
    assert_eq!(
        orders.get(order).map(|o| o.status),
        Some(OrderStatus::InProcess),
        "refetched list agrees with the transition response"
    );
}

#[tokio::test]
async fn each_status_walks_exactly_one_step_to_delivered() {
    let ctx = TestContext::new().await;
    let restaurant = ctx.seed_restaurant("Casa Pepe");
    let order = ctx.seed_order(restaurant, OrderStatus::Pending, Decimal::new(1500, 2));

    let mut orders = OrderList::open(ctx.client.clone(), ctx.session.clone(), restaurant);
    orders.refresh().await.expect("initial fetch");

    let expected = [
        OrderStatus::InProcess,
        OrderStatus::Sent,
        OrderStatus::Delivered,
    ];
    for status in expected {
        let advanced = orders.advance(order).await.expect("advance").applied().expect("applied");
        assert_eq!(advanced.status, status);
    }
}

#[tokio::test]
async fn delivered_order_fails_loudly_without_a_request() {
    let ctx = TestContext::new().await;
    let restaurant = ctx.seed_restaurant("Casa Pepe");
    let order = ctx.seed_order(restaurant, OrderStatus::Delivered, Decimal::new(1500, 2));

    let mut orders = OrderList::open(ctx.client.clone(), ctx.session.clone(), restaurant);
    orders.refresh().await.expect("initial fetch");

    let hits_before = ctx.state().hits;
    let err = orders.advance(order).await.expect_err("terminal state");
    assert!(matches!(
        err,
        MutateError::Mutation(ApiError::TerminalState(_))
    ));
    assert_eq!(ctx.state().hits, hits_before, "no endpoint exists to call");
}

#[tokio::test]
async fn owner_edit_with_zero_price_is_rejected_before_transport() {
    let ctx = TestContext::new().await;
    let restaurant = ctx.seed_restaurant("Casa Pepe");
    let order = ctx.seed_order(restaurant, OrderStatus::Pending, Decimal::new(1500, 2));

    let hits_before = ctx.state().hits;
    let payload = OrderOwnerUpdate {
        address: "2 Other St".to_owned(),
        price: Decimal::ZERO,
    };
    let err = ctx
        .client
        .update_order_by_owner(&ctx.session, order, &payload)
        .await
        .expect_err("zero price");

    let errors = err.validation_errors().expect("field errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().map(|e| e.msg.as_str()), Some("Price must be greater than 0"));
    assert_eq!(ctx.state().hits, hits_before);
}

#[tokio::test]
async fn owner_edit_updates_address_and_price_atomically() {
    let ctx = TestContext::new().await;
    let restaurant = ctx.seed_restaurant("Casa Pepe");
    let order = ctx.seed_order(restaurant, OrderStatus::Sent, Decimal::new(1500, 2));

    let mut orders = OrderList::open(ctx.client.clone(), ctx.session.clone(), restaurant);
    orders.refresh().await.expect("initial fetch");

    let payload = OrderOwnerUpdate {
        address: "2 Other St".to_owned(),
        price: Decimal::new(1250, 2),
    };
    orders.update(order, &payload).await.expect("update");

    let updated = orders.get(order).expect("order listed");
    assert_eq!(updated.address, "2 Other St");
    assert_eq!(updated.price, Decimal::new(1250, 2));
    // The edit never touches status.
    assert_eq!(updated.status, OrderStatus::Sent);
}

#[tokio::test]
async fn get_order_returns_the_server_record() {
    let ctx = TestContext::new().await;
    let restaurant = ctx.seed_restaurant("Casa Pepe");
    let order = ctx.seed_order(restaurant, OrderStatus::InProcess, Decimal::new(999, 2));

    let fetched = ctx.client.get_order(&ctx.session, order).await.expect("get order");
    assert_eq!(fetched.id, order);
    assert_eq!(fetched.status, OrderStatus::InProcess);
    assert_eq!(fetched.restaurant_id, restaurant);
}
