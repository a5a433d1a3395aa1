//! Integration test harness for Platter.
//!
//! Spins up an in-process axum mock of the platform backend and hands the
//! real [`OwnerClient`] a base URL pointing at it, so the tests under
//! `tests/` exercise the full protocol: verbs, paths, bearer auth, the
//! structured `{errors: [{param, msg}]}` rejection shape, and the
//! server-side behaviors the client must not try to predict (the default
//! flag moving between addresses, status transitions being
//! order-dependent, schedule deletion detaching products).
//!
//! The mock state is shared with the test through [`TestContext::state`],
//! which both seeds fixtures and injects failures (e.g. one failing list
//! fetch, to drive the committed-write/failed-refetch path).

use std::sync::{Arc, Mutex, MutexGuard};

use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use rust_decimal::Decimal;
use serde_json::json;

use platter_client::{ClientConfig, OwnerClient, SessionToken};
use platter_core::{
    AddressId, Analytics, CategoryId, NewAddress, Order, OrderId, OrderOwnerUpdate, OrderStatus,
    Product, ProductId, Restaurant, RestaurantCategory, RestaurantId, RestaurantPayload, Schedule,
    ScheduleId, SchedulePayload, ShippingAddress, TimeOfDay,
};

/// Bearer token the mock backend accepts.
pub const TEST_TOKEN: &str = "test-session-token";

/// A product row; the wire `Product` is derived from it per read.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub id: ProductId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: Decimal,
    pub availability: bool,
    pub schedule_id: Option<ScheduleId>,
}

impl ProductRecord {
    fn to_product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            availability: self.availability,
            schedule_id: self.schedule_id,
        }
    }
}

/// A schedule row; its `products` list is assembled at read time so it
/// always reflects the current associations.
#[derive(Debug, Clone)]
pub struct ScheduleRecord {
    pub id: ScheduleId,
    pub restaurant_id: RestaurantId,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// In-memory backend state.
#[derive(Debug, Default)]
pub struct BackendState {
    pub addresses: Vec<ShippingAddress>,
    pub orders: Vec<Order>,
    pub restaurants: Vec<Restaurant>,
    pub schedules: Vec<ScheduleRecord>,
    pub products: Vec<ProductRecord>,
    pub categories: Vec<RestaurantCategory>,
    next_id: i32,
    /// Total requests that reached the backend (auth middleware counts
    /// them), so tests can assert that client-side validation really
    /// rejected a payload *before* transport.
    pub hits: u64,
    /// When set, the next list fetch answers 500 once.
    pub fail_next_fetch: bool,
}

impl BackendState {
    /// Next fresh record ID.
    pub fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn take_fetch_failure(&mut self) -> bool {
        std::mem::take(&mut self.fail_next_fetch)
    }

    fn schedule_json(&self, record: &ScheduleRecord) -> Schedule {
        Schedule {
            id: record.id,
            restaurant_id: record.restaurant_id,
            start_time: record.start_time,
            end_time: record.end_time,
            products: self
                .products
                .iter()
                .filter(|p| p.schedule_id == Some(record.id))
                .map(ProductRecord::to_product)
                .collect(),
        }
    }
}

/// Shared handle to the mock backend state.
pub type SharedState = Arc<Mutex<BackendState>>;

/// One mock backend plus a real client pointed at it.
pub struct TestContext {
    pub client: OwnerClient,
    pub session: SessionToken,
    pub state: SharedState,
    base_url: String,
}

impl TestContext {
    /// Start a mock backend on an ephemeral port and connect a client.
    pub async fn new() -> Self {
        let state: SharedState = Arc::new(Mutex::new(BackendState::default()));
        let router = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock backend");
        });

        let base_url = format!("http://{addr}/");
        let client = OwnerClient::new(&ClientConfig::new(base_url.clone())).expect("build client");

        Self {
            client,
            session: SessionToken::new(TEST_TOKEN),
            state,
            base_url,
        }
    }

    /// Base URL of the mock backend, for building additional clients.
    #[must_use]
    pub fn client_base_url(&self) -> &str {
        &self.base_url
    }

    /// Lock the backend state for seeding or inspection.
    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("state lock")
    }

    /// Seed one shipping address; returns its ID.
    pub fn seed_address(&self, alias: &str, is_default: bool) -> AddressId {
        let mut state = self.state();
        let id = AddressId::new(state.next_id());
        state.addresses.push(ShippingAddress {
            id,
            alias: alias.to_owned(),
            street: "1 Main St".to_owned(),
            city: "Sevilla".to_owned(),
            province: "Sevilla".to_owned(),
            zip_code: "41001".to_owned(),
            is_default,
        });
        id
    }

    /// Seed one restaurant; returns its ID.
    pub fn seed_restaurant(&self, name: &str) -> RestaurantId {
        let mut state = self.state();
        let id = RestaurantId::new(state.next_id());
        state.restaurants.push(Restaurant {
            id,
            name: name.to_owned(),
            description: None,
            address: "Calle Betis 1".to_owned(),
            postal_code: "41010".to_owned(),
            url: None,
            shipping_costs: Decimal::new(250, 2),
            email: None,
            phone: None,
            restaurant_category_id: CategoryId::new(1),
            products: Vec::new(),
            schedules: Vec::new(),
        });
        id
    }

    /// Seed one order; returns its ID.
    pub fn seed_order(
        &self,
        restaurant_id: RestaurantId,
        status: OrderStatus,
        price: Decimal,
    ) -> OrderId {
        let mut state = self.state();
        let id = OrderId::new(state.next_id());
        state.orders.push(Order {
            id,
            status,
            address: "1 Main St".to_owned(),
            price,
            restaurant_id,
            created_at: None,
        });
        id
    }

    /// Seed one schedule; returns its ID.
    pub fn seed_schedule(
        &self,
        restaurant_id: RestaurantId,
        start_time: &str,
        end_time: &str,
    ) -> ScheduleId {
        let mut state = self.state();
        let id = ScheduleId::new(state.next_id());
        state.schedules.push(ScheduleRecord {
            id,
            restaurant_id,
            start_time: start_time.parse().expect("seed start time"),
            end_time: end_time.parse().expect("seed end time"),
        });
        id
    }

    /// Seed one product, optionally attached to a schedule; returns its ID.
    pub fn seed_product(
        &self,
        restaurant_id: RestaurantId,
        name: &str,
        schedule_id: Option<ScheduleId>,
    ) -> ProductId {
        let mut state = self.state();
        let id = ProductId::new(state.next_id());
        state.products.push(ProductRecord {
            id,
            restaurant_id,
            name: name.to_owned(),
            price: Decimal::new(950, 2),
            availability: true,
            schedule_id,
        });
        id
    }
}

fn router(state: SharedState) -> axum::Router {
    axum::Router::new()
        .route(
            "/shippingaddresses",
            get(list_addresses).post(create_address),
        )
        .route("/shippingaddresses/{id}/default", patch(set_default_address))
        .route("/shippingaddresses/{id}", axum::routing::delete(delete_address))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/by-owner", axum::routing::put(update_order_by_owner))
        .route("/orders/{id}/confirm", patch(confirm_order))
        .route("/orders/{id}/send", patch(send_order))
        .route("/orders/{id}/deliver", patch(deliver_order))
        .route("/users/myrestaurants", get(list_my_restaurants))
        .route("/restaurantCategories", get(list_categories))
        .route("/restaurants", axum::routing::post(create_restaurant))
        .route(
            "/restaurants/{rid}",
            get(get_restaurant_detail)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .route("/restaurants/{rid}/orders", get(list_restaurant_orders))
        .route("/restaurants/{rid}/analytics", get(restaurant_analytics))
        .route(
            "/restaurants/{rid}/schedules",
            get(list_schedules).post(create_schedule),
        )
        .route(
            "/restaurants/{rid}/schedules/{id}",
            axum::routing::put(update_schedule).delete(delete_schedule),
        )
        .layer(middleware::from_fn_with_state(Arc::clone(&state), auth))
        .with_state(state)
}

async fn auth(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    state.lock().expect("state lock").hits += 1;
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TEST_TOKEN}"));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

/// The backend's structured validation rejection.
fn validation_error(param: &str, msg: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": [{ "param": param, "msg": msg }] })),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} not found") })),
    )
        .into_response()
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response()
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

async fn list_addresses(State(state): State<SharedState>) -> Response {
    let mut state = state.lock().expect("state lock");
    if state.take_fetch_failure() {
        return server_error();
    }
    Json(state.addresses.clone()).into_response()
}

async fn create_address(
    State(state): State<SharedState>,
    Json(payload): Json<NewAddress>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    if state.addresses.iter().any(|a| a.alias == payload.alias) {
        return validation_error("alias", "Alias already exists");
    }
    if payload.is_default {
        for address in &mut state.addresses {
            address.is_default = false;
        }
    }
    let id = AddressId::new(state.next_id());
    let address = ShippingAddress {
        id,
        alias: payload.alias,
        street: payload.street,
        city: payload.city,
        province: payload.province,
        zip_code: payload.zip_code,
        is_default: payload.is_default,
    };
    state.addresses.push(address.clone());
    (StatusCode::CREATED, Json(address)).into_response()
}

async fn set_default_address(
    State(state): State<SharedState>,
    Path(id): Path<AddressId>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    if !state.addresses.iter().any(|a| a.id == id) {
        return not_found("address");
    }
    // The singleton invariant is enforced here, not in the client.
    for address in &mut state.addresses {
        address.is_default = address.id == id;
    }
    let address = state
        .addresses
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .expect("checked above");
    Json(address).into_response()
}

async fn delete_address(State(state): State<SharedState>, Path(id): Path<AddressId>) -> Response {
    let mut state = state.lock().expect("state lock");
    let before = state.addresses.len();
    state.addresses.retain(|a| a.id != id);
    if state.addresses.len() == before {
        return not_found("address");
    }
    Json(json!({ "message": "Address deleted" })).into_response()
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

async fn get_order(State(state): State<SharedState>, Path(id): Path<OrderId>) -> Response {
    let state = state.lock().expect("state lock");
    match state.orders.iter().find(|o| o.id == id) {
        Some(order) => Json(order.clone()).into_response(),
        None => not_found("order"),
    }
}

async fn update_order_by_owner(
    State(state): State<SharedState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<OrderOwnerUpdate>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    if payload.price <= Decimal::ZERO {
        return validation_error("price", "Price must be greater than 0");
    }
    match state.orders.iter_mut().find(|o| o.id == id) {
        Some(order) => {
            order.address = payload.address;
            order.price = payload.price;
            Json(order.clone()).into_response()
        }
        None => not_found("order"),
    }
}

fn transition_order(state: &SharedState, id: OrderId, expected: OrderStatus) -> Response {
    let mut state = state.lock().expect("state lock");
    let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
        return not_found("order");
    };
    if order.status != expected {
        return validation_error("status", "Order is not in a valid state for this transition");
    }
    match order.status.next_action() {
        Ok(action) => {
            order.status = action.resulting_status();
            Json(order.clone()).into_response()
        }
        Err(_) => validation_error("status", "Order is already delivered"),
    }
}

async fn confirm_order(State(state): State<SharedState>, Path(id): Path<OrderId>) -> Response {
    transition_order(&state, id, OrderStatus::Pending)
}

async fn send_order(State(state): State<SharedState>, Path(id): Path<OrderId>) -> Response {
    transition_order(&state, id, OrderStatus::InProcess)
}

async fn deliver_order(State(state): State<SharedState>, Path(id): Path<OrderId>) -> Response {
    transition_order(&state, id, OrderStatus::Sent)
}

// ---------------------------------------------------------------------------
// Restaurants
// ---------------------------------------------------------------------------

async fn list_my_restaurants(State(state): State<SharedState>) -> Response {
    let mut state = state.lock().expect("state lock");
    if state.take_fetch_failure() {
        return server_error();
    }
    Json(state.restaurants.clone()).into_response()
}

async fn list_categories(State(state): State<SharedState>) -> Response {
    let state = state.lock().expect("state lock");
    Json(state.categories.clone()).into_response()
}

async fn create_restaurant(
    State(state): State<SharedState>,
    Json(payload): Json<RestaurantPayload>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let id = RestaurantId::new(state.next_id());
    let restaurant = Restaurant {
        id,
        name: payload.name,
        description: payload.description,
        address: payload.address,
        postal_code: payload.postal_code,
        url: payload.url,
        shipping_costs: payload.shipping_costs,
        email: payload.email,
        phone: payload.phone,
        restaurant_category_id: payload.restaurant_category_id,
        products: Vec::new(),
        schedules: Vec::new(),
    };
    state.restaurants.push(restaurant.clone());
    (StatusCode::CREATED, Json(restaurant)).into_response()
}

async fn get_restaurant_detail(
    State(state): State<SharedState>,
    Path(id): Path<RestaurantId>,
) -> Response {
    let state = state.lock().expect("state lock");
    let Some(restaurant) = state.restaurants.iter().find(|r| r.id == id) else {
        return not_found("restaurant");
    };
    let mut detail = restaurant.clone();
    detail.products = state
        .products
        .iter()
        .filter(|p| p.restaurant_id == id)
        .map(ProductRecord::to_product)
        .collect();
    detail.schedules = state
        .schedules
        .iter()
        .filter(|s| s.restaurant_id == id)
        .map(|s| state.schedule_json(s))
        .collect();
    Json(detail).into_response()
}

async fn update_restaurant(
    State(state): State<SharedState>,
    Path(id): Path<RestaurantId>,
    Json(payload): Json<RestaurantPayload>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let Some(restaurant) = state.restaurants.iter_mut().find(|r| r.id == id) else {
        return not_found("restaurant");
    };
    restaurant.name = payload.name;
    restaurant.description = payload.description;
    restaurant.address = payload.address;
    restaurant.postal_code = payload.postal_code;
    restaurant.url = payload.url;
    restaurant.shipping_costs = payload.shipping_costs;
    restaurant.email = payload.email;
    restaurant.phone = payload.phone;
    restaurant.restaurant_category_id = payload.restaurant_category_id;
    Json(restaurant.clone()).into_response()
}

async fn delete_restaurant(
    State(state): State<SharedState>,
    Path(id): Path<RestaurantId>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let before = state.restaurants.len();
    state.restaurants.retain(|r| r.id != id);
    if state.restaurants.len() == before {
        return not_found("restaurant");
    }
    state.schedules.retain(|s| s.restaurant_id != id);
    state.products.retain(|p| p.restaurant_id != id);
    Json(json!({ "message": "Restaurant deleted" })).into_response()
}

async fn list_restaurant_orders(
    State(state): State<SharedState>,
    Path(id): Path<RestaurantId>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    if state.take_fetch_failure() {
        return server_error();
    }
    let orders: Vec<Order> = state
        .orders
        .iter()
        .filter(|o| o.restaurant_id == id)
        .cloned()
        .collect();
    Json(orders).into_response()
}

async fn restaurant_analytics(
    State(state): State<SharedState>,
    Path(id): Path<RestaurantId>,
) -> Response {
    let state = state.lock().expect("state lock");
    let orders: Vec<&Order> = state
        .orders
        .iter()
        .filter(|o| o.restaurant_id == id)
        .collect();
    let analytics = Analytics {
        invoiced_today: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .map(|o| o.price)
            .sum(),
        num_pending_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count() as i64,
        num_delivered_today_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .count() as i64,
        num_yesterday_orders: 0,
    };
    Json(analytics).into_response()
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

async fn list_schedules(
    State(state): State<SharedState>,
    Path(id): Path<RestaurantId>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    if state.take_fetch_failure() {
        return server_error();
    }
    let schedules: Vec<Schedule> = state
        .schedules
        .iter()
        .filter(|s| s.restaurant_id == id)
        .map(|s| state.schedule_json(s))
        .collect();
    Json(schedules).into_response()
}

fn parse_schedule_times(payload: &SchedulePayload) -> Result<(TimeOfDay, TimeOfDay), Response> {
    let start: TimeOfDay = payload
        .start_time
        .parse()
        .map_err(|_| validation_error("startTime", "Start time must match HH:mm:ss"))?;
    let end: TimeOfDay = payload
        .end_time
        .parse()
        .map_err(|_| validation_error("endTime", "End time must match HH:mm:ss"))?;
    Ok((start, end))
}

async fn create_schedule(
    State(state): State<SharedState>,
    Path(id): Path<RestaurantId>,
    Json(payload): Json<SchedulePayload>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    if !state.restaurants.iter().any(|r| r.id == id) {
        return not_found("restaurant");
    }
    let (start_time, end_time) = match parse_schedule_times(&payload) {
        Ok(times) => times,
        Err(response) => return response,
    };
    let schedule_id = ScheduleId::new(state.next_id());
    let record = ScheduleRecord {
        id: schedule_id,
        restaurant_id: id,
        start_time,
        end_time,
    };
    let body = state.schedule_json(&record);
    state.schedules.push(record);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_schedule(
    State(state): State<SharedState>,
    Path((rid, id)): Path<(RestaurantId, ScheduleId)>,
    Json(payload): Json<SchedulePayload>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let (start_time, end_time) = match parse_schedule_times(&payload) {
        Ok(times) => times,
        Err(response) => return response,
    };
    let Some(index) = state
        .schedules
        .iter()
        .position(|s| s.restaurant_id == rid && s.id == id)
    else {
        return not_found("schedule");
    };
    state.schedules[index].start_time = start_time;
    state.schedules[index].end_time = end_time;
    let record = state.schedules[index].clone();
    Json(state.schedule_json(&record)).into_response()
}

async fn delete_schedule(
    State(state): State<SharedState>,
    Path((rid, id)): Path<(RestaurantId, ScheduleId)>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    let before = state.schedules.len();
    state
        .schedules
        .retain(|s| !(s.restaurant_id == rid && s.id == id));
    if state.schedules.len() == before {
        return not_found("schedule");
    }
    // Cascade: deleting a schedule unschedules its products.
    for product in &mut state.products {
        if product.schedule_id == Some(id) {
            product.schedule_id = None;
        }
    }
    Json(json!({ "message": "Schedule deleted" })).into_response()
}
