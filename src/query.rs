// Query types and dispatch between the two supported query kinds

use crate::availability::count_available;
use crate::model::{AvailabilityRange, DateInterval};
use crate::search::{search, CancelSignal, SearchConfig};
use crate::store::{RoomStore, StoreError};
use crate::validation::{validate_availability, validate_search};
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid query: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Query cancelled")]
    Cancelled,
}

// Free rooms of one type over a closed date window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub hotel_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub room_type: String,
}

// Ranges of constant availability from today up to `days_ahead` days later
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub hotel_id: String,
    pub room_type: String,
    pub days_ahead: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Availability(AvailabilityQuery),
    Search(SearchQuery),
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Query::Availability(_) => "AvailabilityQuery",
            Query::Search(_) => "SearchQuery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Available(i64),
    Ranges(Vec<AvailabilityRange>),
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Available(count) => write!(f, "Available rooms: {}", count),
            QueryOutcome::Ranges(ranges) => {
                let lines: Vec<String> = ranges.iter().map(ToString::to_string).collect();
                write!(f, "Search results:\n{}", lines.join("\n"))
            }
        }
    }
}

// Runs validated queries against an explicitly supplied store handle
pub struct QueryEngine<S: RoomStore + ?Sized> {
    store: Arc<S>,
    config: SearchConfig,
}

impl<S: RoomStore + ?Sized> QueryEngine<S> {
    pub fn new(store: Arc<S>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // `today` is the first day of a search horizon
    pub async fn execute(
        &self,
        query: &Query,
        today: NaiveDate,
        cancel: &CancelSignal,
    ) -> Result<QueryOutcome, QueryError> {
        match query {
            Query::Availability(q) => self.availability(q, cancel).await.map(QueryOutcome::Available),
            Query::Search(q) => self.search(q, today, cancel).await.map(QueryOutcome::Ranges),
        }
    }

    pub async fn availability(
        &self,
        query: &AvailabilityQuery,
        cancel: &CancelSignal,
    ) -> Result<i64, QueryError> {
        validate_availability(query).map_err(QueryError::Invalid)?;
        if cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }

        let window = DateInterval::new(query.from, query.to);
        let available =
            count_available(self.store.as_ref(), &query.hotel_id, &query.room_type, &window)
                .await?;
        info!(
            hotel_id = %query.hotel_id,
            room_type = %query.room_type,
            window = %window,
            available,
            "availability query completed"
        );
        Ok(available)
    }

    pub async fn search(
        &self,
        query: &SearchQuery,
        today: NaiveDate,
        cancel: &CancelSignal,
    ) -> Result<Vec<AvailabilityRange>, QueryError> {
        validate_search(query).map_err(QueryError::Invalid)?;
        let days_ahead = u32::try_from(query.days_ahead)
            .map_err(|_| QueryError::Invalid(vec!["DaysAhead can't be negative".to_string()]))?;

        search(
            self.store.as_ref(),
            &query.hotel_id,
            &query.room_type,
            today,
            days_ahead,
            &self.config,
            cancel,
        )
        .await
    }
}
