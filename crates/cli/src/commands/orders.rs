//! Order commands.

use platter_client::store::OrderList;
use platter_core::{Order, OrderId, OrderOwnerUpdate, RestaurantId};
use rust_decimal::Decimal;

use super::{CliError, connect};

#[allow(clippy::print_stdout)]
fn print_order(order: &Order) {
    println!(
        "{}  [{}]  {}  {:.2}",
        order.id, order.status, order.address, order.price
    );
}

/// Show one order.
pub async fn show(id: OrderId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let order = client.get_order(&session, id).await?;
    print_order(&order);
    Ok(())
}

/// Edit the owner-editable fields of an order.
pub async fn edit(id: OrderId, address: String, price: Decimal) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let payload = OrderOwnerUpdate { address, price };
    let updated = client.update_order_by_owner(&session, id, &payload).await?;
    tracing::info!("Order {} updated", updated.id);
    print_order(&updated);
    Ok(())
}

/// Advance an order to its next status and show the reconciled list.
pub async fn advance(restaurant: RestaurantId, id: OrderId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut orders = OrderList::open(client, session, restaurant);
    orders.refresh().await?;

    if let Some(advanced) = orders.advance(id).await?.applied() {
        tracing::info!("Order {} is now {}", advanced.id, advanced.status);
    }
    for order in orders.items() {
        print_order(order);
    }
    Ok(())
}
