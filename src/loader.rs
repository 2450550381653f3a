// Data ingestion: hotels and bookings JSON files into an in-memory store

use crate::model::{Booking, Hotel};
use crate::store::InMemoryStore;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid data file options:\n{}", .0.join("\n"))]
    InvalidOptions(Vec<String>),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataFileLocation {
    pub hotels: PathBuf,
    pub bookings: PathBuf,
}

impl DataFileLocation {
    pub fn new(hotels: impl Into<PathBuf>, bookings: impl Into<PathBuf>) -> Self {
        Self {
            hotels: hotels.into(),
            bookings: bookings.into(),
        }
    }

    // Collects every problem with both paths
    pub fn ensure_valid(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_path(
            &self.hotels,
            "Path to the hotels file is required (example: '--hotels hotels.json')",
            "Path to the hotels file does not exist",
            &mut errors,
        );
        check_path(
            &self.bookings,
            "Path to the bookings file is required (example: '--bookings bookings.json')",
            "Path to the bookings file does not exist",
            &mut errors,
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_path(path: &Path, missing: &str, not_found: &str, errors: &mut Vec<String>) {
    if path.as_os_str().is_empty() {
        errors.push(missing.to_string());
    } else if !path.is_file() {
        errors.push(format!("{}: {}", not_found, path.display()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLoadSummary {
    pub hotel_count: usize,
    pub booking_count: usize,
}

pub struct DataLoader;

impl DataLoader {
    pub fn load(location: &DataFileLocation) -> Result<(InMemoryStore, DataLoadSummary), LoadError> {
        location.ensure_valid().map_err(LoadError::InvalidOptions)?;

        let hotels: Vec<Hotel> = read_json(&location.hotels)?;
        let bookings: Vec<Booking> = read_json(&location.bookings)?;
        let (store, summary) = Self::load_records(&hotels, &bookings);

        info!(
            hotels = summary.hotel_count,
            bookings = summary.booking_count,
            "loaded hotel data"
        );
        Ok((store, summary))
    }

    pub fn load_records(hotels: &[Hotel], bookings: &[Booking]) -> (InMemoryStore, DataLoadSummary) {
        let store = InMemoryStore::from_records(hotels, bookings);
        let summary = DataLoadSummary {
            hotel_count: hotels.len(),
            booking_count: bookings.len(),
        };
        (store, summary)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// Sample data files shipped with the crate
pub const SAMPLE_HOTELS_PATH: &str = "samples/hotels.json";
pub const SAMPLE_BOOKINGS_PATH: &str = "samples/bookings.json";
