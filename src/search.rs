// Availability search: per-day occupancy over a horizon, compressed into ranges

use crate::availability::available_on_with_total;
use crate::model::{format_date, next_day, AvailabilityRange, DayAvailability};
use crate::query::QueryError;
use crate::store::RoomStore;
use chrono::{Days, NaiveDate};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

// Search configuration options
#[derive(Debug, Clone)]
pub struct SearchConfig {
    // Per-day reads allowed in flight at once; 1 reads the horizon sequentially
    pub concurrent_day_reads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            concurrent_day_reads: 1,
        }
    }
}

// Shared cancellation flag, checked before every per-day read
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), QueryError> {
        if self.is_cancelled() {
            return Err(QueryError::Cancelled);
        }
        Ok(())
    }
}

// Run currently being built by the scan
struct Run {
    begin: NaiveDate,
    end: NaiveDate,
    count: i64,
}

impl Run {
    fn start(day: &DayAvailability) -> Self {
        Self {
            begin: day.date,
            end: day.date,
            count: day.count,
        }
    }

    fn accepts(&self, day: &DayAvailability) -> bool {
        let contiguous = next_day(self.end) == Some(day.date);
        contiguous && day.count == self.count
    }

    // Fully booked (or overbooked) runs are dropped
    fn close(self, ranges: &mut Vec<AvailabilityRange>) {
        if self.count > 0 {
            ranges.push(AvailabilityRange::new(self.begin, self.end, self.count));
        }
    }
}

// Merges date-ordered days into runs; a count change or a missing day closes the run
pub fn compress(days: &[DayAvailability]) -> Vec<AvailabilityRange> {
    let mut ranges = Vec::new();
    let Some((first, rest)) = days.split_first() else {
        return ranges;
    };

    let mut run = Run::start(first);
    for day in rest {
        if run.accepts(day) {
            run.end = day.date;
        } else {
            run.close(&mut ranges);
            run = Run::start(day);
        }
    }
    run.close(&mut ranges);

    ranges
}

// Every day of the horizon: reference_date + 0 ..= reference_date + days_ahead
pub fn horizon(reference_date: NaiveDate, days_ahead: u32) -> Vec<NaiveDate> {
    (0..=u64::from(days_ahead))
        .map_while(|offset| reference_date.checked_add_days(Days::new(offset)))
        .collect()
}

// Any failed read or a cancellation aborts the whole search, no partial ranges
pub async fn search<S>(
    store: &S,
    hotel_id: &str,
    room_type: &str,
    reference_date: NaiveDate,
    days_ahead: u32,
    config: &SearchConfig,
    cancel: &CancelSignal,
) -> Result<Vec<AvailabilityRange>, QueryError>
where
    S: RoomStore + ?Sized,
{
    cancel.check()?;
    let total_rooms = store.total_rooms(hotel_id, room_type).await?;

    let days = daily_availability(
        store,
        hotel_id,
        room_type,
        horizon(reference_date, days_ahead),
        total_rooms,
        config,
        cancel,
    )
    .await?;

    let ranges = compress(&days);
    info!(
        hotel_id,
        room_type,
        reference_date = %format_date(reference_date),
        days_ahead,
        total_rooms,
        ranges = ranges.len(),
        "search completed"
    );
    Ok(ranges)
}

async fn daily_availability<S>(
    store: &S,
    hotel_id: &str,
    room_type: &str,
    days: Vec<NaiveDate>,
    total_rooms: i64,
    config: &SearchConfig,
    cancel: &CancelSignal,
) -> Result<Vec<DayAvailability>, QueryError>
where
    S: RoomStore + ?Sized,
{
    let concurrency = config.concurrent_day_reads.max(1);
    debug!(days = days.len(), concurrency, "reading daily availability");

    // `buffered` yields in input order, so the result stays sorted by date
    stream::iter(days)
        .map(|day| async move {
            cancel.check()?;
            let count = available_on_with_total(store, hotel_id, room_type, day, total_rooms).await?;
            Ok::<_, QueryError>(DayAvailability::new(day, count))
        })
        .buffered(concurrency)
        .try_collect()
        .await
}
