// Availability counter: free rooms of one type over a closed date window

use crate::model::DateInterval;
use crate::store::{RoomStore, StoreError};
use chrono::NaiveDate;
use tracing::{debug, warn};

// Free rooms of `room_type` in `hotel_id` over `window`, unclamped when overbooked.
// Inputs are expected to be validated already (non-empty ids, `from <= to`).
pub async fn count_available<S>(
    store: &S,
    hotel_id: &str,
    room_type: &str,
    window: &DateInterval,
) -> Result<i64, StoreError>
where
    S: RoomStore + ?Sized,
{
    let total = store.total_rooms(hotel_id, room_type).await?;
    subtract_occupied(store, hotel_id, room_type, window, total).await
}

// Single-day primitive shared with the search compressor
pub async fn available_on<S>(
    store: &S,
    hotel_id: &str,
    room_type: &str,
    day: NaiveDate,
) -> Result<i64, StoreError>
where
    S: RoomStore + ?Sized,
{
    count_available(store, hotel_id, room_type, &DateInterval::single(day)).await
}

// Same as `available_on` once the room total is known; avoids re-reading inventory per day
pub async fn available_on_with_total<S>(
    store: &S,
    hotel_id: &str,
    room_type: &str,
    day: NaiveDate,
    total_rooms: i64,
) -> Result<i64, StoreError>
where
    S: RoomStore + ?Sized,
{
    subtract_occupied(
        store,
        hotel_id,
        room_type,
        &DateInterval::single(day),
        total_rooms,
    )
    .await
}

async fn subtract_occupied<S>(
    store: &S,
    hotel_id: &str,
    room_type: &str,
    window: &DateInterval,
    total: i64,
) -> Result<i64, StoreError>
where
    S: RoomStore + ?Sized,
{
    let occupied = store
        .count_overlapping_bookings(hotel_id, room_type, window)
        .await?;
    let available = total - occupied;

    debug!(
        hotel_id,
        room_type,
        window = %window,
        total,
        occupied,
        available,
        "counted availability"
    );
    if available < 0 {
        warn!(
            hotel_id,
            room_type,
            window = %window,
            available,
            "negative availability, bookings exceed inventory"
        );
    }

    Ok(available)
}
