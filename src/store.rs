// Read surface over room inventory and bookings
// The availability counter and the search compressor only ever read through `RoomStore`

use crate::model::{Booking, DateInterval, Hotel};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    // Unreachable or timed out
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// Store trait; implementations must be shareable across tasks
#[async_trait]
pub trait RoomStore: Send + Sync + 'static {
    // Number of physical rooms of `room_type` in `hotel_id`
    async fn total_rooms(&self, hotel_id: &str, room_type: &str) -> Result<i64, StoreError>;

    // Number of bookings of `room_type` in `hotel_id` overlapping the closed window
    async fn count_overlapping_bookings(
        &self,
        hotel_id: &str,
        room_type: &str,
        window: &DateInterval,
    ) -> Result<i64, StoreError>;
}

#[derive(Debug, Default)]
pub struct StoreStats {
    pub room_lookups: AtomicUsize,
    pub booking_scans: AtomicUsize,
    pub bookings_examined: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StoreStatsReport {
    pub room_lookups: usize,
    pub booking_scans: usize,
    pub bookings_examined: usize,
}

// Key for both indexes: (hotel id, room type code)
pub type InventoryKey = (String, String);

pub fn inventory_key(hotel_id: &str, room_type: &str) -> InventoryKey {
    (hotel_id.to_string(), room_type.to_string())
}

// In-memory store filled once from the data files and read-only afterwards
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rooms: DashMap<InventoryKey, i64>,
    bookings: DashMap<InventoryKey, Vec<Booking>>,
    hotel_ids: DashSet<String>,
    stats: StoreStats,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(hotels: &[Hotel], bookings: &[Booking]) -> Self {
        let store = Self::new();
        for hotel in hotels {
            store.add_hotel(hotel);
        }
        for booking in bookings {
            store.add_booking(booking.clone());
        }
        store
    }

    pub fn add_hotel(&self, hotel: &Hotel) {
        // A repeated hotel id contributes its rooms to the same inventory
        self.hotel_ids.insert(hotel.id.clone());

        for room in &hotel.rooms {
            *self
                .rooms
                .entry(inventory_key(&hotel.id, &room.room_type))
                .or_insert(0) += 1;
        }
    }

    pub fn add_booking(&self, booking: Booking) {
        self.bookings
            .entry(inventory_key(&booking.hotel_id, &booking.room_type))
            .or_default()
            .push(booking);
    }

    pub fn hotel_count(&self) -> usize {
        self.hotel_ids.len()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn stats(&self) -> StoreStatsReport {
        StoreStatsReport {
            room_lookups: self.stats.room_lookups.load(Ordering::Relaxed),
            booking_scans: self.stats.booking_scans.load(Ordering::Relaxed),
            bookings_examined: self.stats.bookings_examined.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl RoomStore for InMemoryStore {
    async fn total_rooms(&self, hotel_id: &str, room_type: &str) -> Result<i64, StoreError> {
        self.stats.room_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .rooms
            .get(&inventory_key(hotel_id, room_type))
            .map(|count| *count.value())
            .unwrap_or(0))
    }

    async fn count_overlapping_bookings(
        &self,
        hotel_id: &str,
        room_type: &str,
        window: &DateInterval,
    ) -> Result<i64, StoreError> {
        self.stats.booking_scans.fetch_add(1, Ordering::Relaxed);
        let Some(bookings) = self.bookings.get(&inventory_key(hotel_id, room_type)) else {
            return Ok(0);
        };
        self.stats
            .bookings_examined
            .fetch_add(bookings.len(), Ordering::Relaxed);

        Ok(bookings
            .iter()
            .filter(|booking| booking.overlaps(window))
            .count() as i64)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn sample_store() -> InMemoryStore {
        InMemoryStore::from_records(
            &[hotel("H1", &[("SGL", 2), ("DBL", 3)]), hotel("H2", &[("SGL", 1)])],
            &[
                booking("H1", "SGL", "20240901", "20240903"),
                booking("H1", "SGL", "20240902", "20240905"),
                booking("H1", "DBL", "20240901", "20240902"),
                booking("H2", "SGL", "20240901", "20240910"),
            ],
        )
    }

    #[tokio::test]
    async fn test_total_rooms_per_type() {
        let store = sample_store();

        assert_eq!(store.total_rooms("H1", "SGL").await, Ok(2));
        assert_eq!(store.total_rooms("H1", "DBL").await, Ok(3));
        assert_eq!(store.total_rooms("H2", "SGL").await, Ok(1));
        // Unknown hotel or room type has no inventory
        assert_eq!(store.total_rooms("H2", "DBL").await, Ok(0));
        assert_eq!(store.total_rooms("H9", "SGL").await, Ok(0));
    }

    #[tokio::test]
    async fn test_overlapping_bookings_are_scoped_to_hotel_and_type() {
        let store = sample_store();
        let window = DateInterval::new(date("20240902"), date("20240902"));

        assert_eq!(
            store.count_overlapping_bookings("H1", "SGL", &window).await,
            Ok(2)
        );
        // DBL booking departs on the 2nd, so it no longer occupies that day
        assert_eq!(
            store.count_overlapping_bookings("H1", "DBL", &window).await,
            Ok(0)
        );
        assert_eq!(
            store.count_overlapping_bookings("H2", "SGL", &window).await,
            Ok(1)
        );
        assert_eq!(
            store.count_overlapping_bookings("H3", "SGL", &window).await,
            Ok(0)
        );
    }

    #[tokio::test]
    async fn test_counts_and_stats() {
        let store = sample_store();
        assert_eq!(store.hotel_count(), 2);
        assert_eq!(store.booking_count(), 4);

        let window = DateInterval::single(date("20240901"));
        store.total_rooms("H1", "SGL").await.unwrap();
        store
            .count_overlapping_bookings("H1", "SGL", &window)
            .await
            .unwrap();

        let stats = store.stats();
        assert_eq!(stats.room_lookups, 1);
        assert_eq!(stats.booking_scans, 1);
        assert_eq!(stats.bookings_examined, 2);
    }

    #[test]
    fn test_duplicate_hotel_adds_rooms() {
        let store = InMemoryStore::new();
        store.add_hotel(&hotel("H1", &[("SGL", 2)]));
        store.add_hotel(&hotel("H1", &[("SGL", 1)]));

        assert_eq!(store.hotel_count(), 1);
        assert_eq!(tokio_test::block_on(store.total_rooms("H1", "SGL")), Ok(3));
    }
}
