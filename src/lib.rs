// Hotel room availability: free-room counts over a date window and
// compressed availability ranges over a forward horizon

pub mod availability;
pub mod command;
pub mod loader;
pub mod model;
pub mod query;
pub mod search;
pub mod store;
pub mod validation;

// Re-export key types for convenience
pub use availability::{available_on, count_available};
pub use command::parse_command;
pub use loader::{DataFileLocation, DataLoadSummary, DataLoader, LoadError};
pub use model::{AvailabilityRange, Booking, DateInterval, DayAvailability, Hotel};
pub use query::{AvailabilityQuery, Query, QueryEngine, QueryError, QueryOutcome, SearchQuery};
pub use search::{compress, search, CancelSignal, SearchConfig};
pub use store::{InMemoryStore, RoomStore, StoreError};
pub use validation::{validate_availability, validate_search};
