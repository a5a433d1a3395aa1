//! Restaurant commands.

use platter_client::store::RestaurantList;
use platter_core::{CategoryId, Restaurant, RestaurantId, RestaurantPayload};
use rust_decimal::Decimal;

use super::{CliError, connect};

/// Arguments for creating a restaurant.
pub struct CreateArgs {
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub category: CategoryId,
    pub shipping_costs: Decimal,
    pub description: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[allow(clippy::print_stdout)]
fn print_restaurant(restaurant: &Restaurant) {
    println!(
        "{}  {}  {} ({})  shipping {:.2}",
        restaurant.id,
        restaurant.name,
        restaurant.address,
        restaurant.postal_code,
        restaurant.shipping_costs
    );
}

/// List the owner's restaurants.
pub async fn list() -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut restaurants = RestaurantList::open(client, session);
    restaurants.refresh().await?;
    for restaurant in restaurants.items() {
        print_restaurant(restaurant);
    }
    Ok(())
}

/// Show one restaurant with its products and schedules.
#[allow(clippy::print_stdout)]
pub async fn show(id: RestaurantId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let restaurant = client.get_restaurant_detail(&session, id).await?;
    print_restaurant(&restaurant);
    for schedule in &restaurant.schedules {
        println!(
            "  schedule {}  {} - {}",
            schedule.id, schedule.start_time, schedule.end_time
        );
    }
    for product in &restaurant.products {
        let scheduled = product
            .schedule_id
            .map_or_else(|| "unscheduled".to_owned(), |s| format!("schedule {s}"));
        println!("  product {}  {}  {:.2}  {}", product.id, product.name, product.price, scheduled);
    }
    Ok(())
}

/// List the available restaurant categories.
#[allow(clippy::print_stdout)]
pub async fn categories() -> Result<(), CliError> {
    let (client, session) = connect()?;
    for category in client.get_restaurant_categories(&session).await? {
        println!("{}  {}", category.id, category.name);
    }
    Ok(())
}

/// Create a restaurant and show the reconciled list.
pub async fn create(args: CreateArgs) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut restaurants = RestaurantList::open(client, session);
    restaurants.refresh().await?;

    let payload = RestaurantPayload {
        name: args.name,
        description: args.description,
        address: args.address,
        postal_code: args.postal_code,
        url: args.url,
        shipping_costs: args.shipping_costs,
        email: args.email,
        phone: args.phone,
        restaurant_category_id: args.category,
    };
    if let Some(created) = restaurants.create(&payload).await?.applied() {
        tracing::info!("Created restaurant {} ({})", created.id, created.name);
    }
    for restaurant in restaurants.items() {
        print_restaurant(restaurant);
    }
    Ok(())
}

/// Delete a restaurant and show the reconciled list.
pub async fn delete(id: RestaurantId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut restaurants = RestaurantList::open(client, session);
    restaurants.refresh().await?;

    restaurants.mark_for_deletion(id);
    restaurants.delete(id).await?;
    tracing::info!("Deleted restaurant {id}");
    for restaurant in restaurants.items() {
        print_restaurant(restaurant);
    }
    Ok(())
}

/// List a restaurant's orders.
#[allow(clippy::print_stdout)]
pub async fn orders(id: RestaurantId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    for order in client.get_restaurant_orders(&session, id).await? {
        println!(
            "{}  [{}]  {}  {:.2}",
            order.id, order.status, order.address, order.price
        );
    }
    Ok(())
}

/// Show today's analytics for a restaurant.
#[allow(clippy::print_stdout)]
pub async fn analytics(id: RestaurantId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let analytics = client.get_restaurant_analytics(&session, id).await?;
    println!("invoiced today:        {:.2}", analytics.invoiced_today);
    println!("pending orders:        {}", analytics.num_pending_orders);
    println!("delivered today:       {}", analytics.num_delivered_today_orders);
    println!("orders yesterday:      {}", analytics.num_yesterday_orders);
    Ok(())
}
