// Pre-checks run before a query touches the store
// Every problem is reported, not just the first one

use crate::query::{AvailabilityQuery, SearchQuery};

pub fn validate_availability(query: &AvailabilityQuery) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if query.hotel_id.trim().is_empty() {
        errors.push("HotelId is required".to_string());
    }

    if query.room_type.trim().is_empty() {
        errors.push("RoomType is required".to_string());
    }

    if query.from > query.to {
        errors.push("'To' date can't precede 'From' date".to_string());
    }

    into_result(errors)
}

pub fn validate_search(query: &SearchQuery) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if query.hotel_id.trim().is_empty() {
        errors.push("HotelId is required".to_string());
    }

    if query.room_type.trim().is_empty() {
        errors.push("RoomType is required".to_string());
    }

    if query.days_ahead < 0 {
        errors.push("DaysAhead can't be negative".to_string());
    }

    into_result(errors)
}

fn into_result(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::date;
    use test_case::test_case;

    fn availability(hotel_id: &str, from: &str, to: &str, room_type: &str) -> AvailabilityQuery {
        AvailabilityQuery {
            hotel_id: hotel_id.to_string(),
            from: date(from),
            to: date(to),
            room_type: room_type.to_string(),
        }
    }

    fn search(hotel_id: &str, room_type: &str, days_ahead: i32) -> SearchQuery {
        SearchQuery {
            hotel_id: hotel_id.to_string(),
            room_type: room_type.to_string(),
            days_ahead,
        }
    }

    #[test_case(availability("H1", "20240901", "20240903", "SGL"), vec![]; "#1 valid range")]
    #[test_case(availability("H1", "20240901", "20240901", "SGL"), vec![]; "#2 single day")]
    #[test_case(availability("", "20240901", "20240903", "SGL"), vec!["HotelId is required"]; "#3 missing hotel")]
    #[test_case(availability("H1", "20240901", "20240903", " "), vec!["RoomType is required"]; "#4 blank room type")]
    #[test_case(availability("H1", "20240903", "20240901", "SGL"), vec!["'To' date can't precede 'From' date"]; "#5 inverted range")]
    #[test_case(availability("", "20240903", "20240901", ""),
        vec!["HotelId is required", "RoomType is required", "'To' date can't precede 'From' date"]; "#6 everything wrong")]
    fn test_validate_availability(query: AvailabilityQuery, expected: Vec<&str>) {
        let result = validate_availability(&query);
        if expected.is_empty() {
            assert_eq!(result, Ok(()));
        } else {
            assert_eq!(result, Err(expected.into_iter().map(String::from).collect()));
        }
    }

    #[test_case(search("H1", "SGL", 365), vec![]; "#1 valid")]
    #[test_case(search("H1", "SGL", 0), vec![]; "#2 today only")]
    #[test_case(search("H1", "SGL", -1), vec!["DaysAhead can't be negative"]; "#3 negative horizon")]
    #[test_case(search("", "", 10), vec!["HotelId is required", "RoomType is required"]; "#4 missing ids")]
    fn test_validate_search(query: SearchQuery, expected: Vec<&str>) {
        let result = validate_search(&query);
        if expected.is_empty() {
            assert_eq!(result, Ok(()));
        } else {
            assert_eq!(result, Err(expected.into_iter().map(String::from).collect()));
        }
    }
}
