//! Schedule commands.

use platter_client::store::ScheduleBoard;
use platter_core::{RestaurantId, Schedule, ScheduleId, SchedulePayload};

use super::{CliError, connect};

#[allow(clippy::print_stdout)]
fn print_schedule(schedule: &Schedule) {
    println!(
        "{}  {} - {}  ({} products associated)",
        schedule.id,
        schedule.start_time,
        schedule.end_time,
        schedule.products.len()
    );
}

/// List a restaurant's schedules.
pub async fn list(restaurant: RestaurantId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut board = ScheduleBoard::open(client, session, restaurant);
    board.refresh().await?;
    for schedule in board.items() {
        print_schedule(schedule);
    }
    Ok(())
}

/// Create a schedule and show the reconciled list.
pub async fn add(restaurant: RestaurantId, start: String, end: String) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut board = ScheduleBoard::open(client, session, restaurant);
    board.refresh().await?;

    let payload = SchedulePayload {
        start_time: start,
        end_time: end,
    };
    if let Some(created) = board.create(&payload).await?.applied() {
        tracing::info!(
            "Schedule {} - {} successfully created",
            created.start_time,
            created.end_time
        );
    }
    for schedule in board.items() {
        print_schedule(schedule);
    }
    Ok(())
}

/// Edit a schedule and show the reconciled list.
pub async fn edit(
    restaurant: RestaurantId,
    id: ScheduleId,
    start: String,
    end: String,
) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut board = ScheduleBoard::open(client, session, restaurant);
    board.refresh().await?;

    let payload = SchedulePayload {
        start_time: start,
        end_time: end,
    };
    board.update(id, &payload).await?;
    for schedule in board.items() {
        print_schedule(schedule);
    }
    Ok(())
}

/// Delete a schedule and show the reconciled list.
///
/// The refetched list is what proves the cascade: product counts on the
/// surviving schedules come from the fresh read, not from local math.
pub async fn delete(restaurant: RestaurantId, id: ScheduleId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut board = ScheduleBoard::open(client, session, restaurant);
    board.refresh().await?;

    board.mark_for_deletion(id);
    board.delete(id).await?;
    tracing::info!("Deleted schedule {id}");
    for schedule in board.items() {
        print_schedule(schedule);
    }
    Ok(())
}
