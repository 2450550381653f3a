// Interactive command syntax
//   Availability(H1, 20240901, SGL)
//   Availability(H1, 20240901-20240903, SGL)
//   Search(H1, 365, SGL)

use crate::model::parse_date;
use crate::query::{AvailabilityQuery, Query, SearchQuery};
use chrono::NaiveDate;

const AVAILABILITY_PREFIX: &str = "Availability(";
const SEARCH_PREFIX: &str = "Search(";

pub fn parse_command(input: &str) -> Result<Query, Vec<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(vec!["Input can't be empty".to_string()]);
    }

    if let Some(inside) = arguments(input, AVAILABILITY_PREFIX) {
        return parse_availability(inside).map(Query::Availability);
    }

    if let Some(inside) = arguments(input, SEARCH_PREFIX) {
        return parse_search(inside).map(Query::Search);
    }

    Err(vec!["Invalid command format".to_string()])
}

// Text between `Name(` and the closing `)`, command name matched case-insensitively
fn arguments<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) || !input.ends_with(')') {
        return None;
    }
    input.get(prefix.len()..input.len() - 1)
}

fn split_arguments(inside: &str) -> Vec<&str> {
    inside.split(',').map(str::trim).collect()
}

fn parse_availability(inside: &str) -> Result<AvailabilityQuery, Vec<String>> {
    let parts = split_arguments(inside);
    let &[hotel_id, date_or_range, room_type] = parts.as_slice() else {
        return Err(vec![
            "Availability command requires 3 arguments (HotelId, date or range, RoomType)"
                .to_string(),
        ]);
    };

    let (from, to) = match date_or_range.split_once('-') {
        Some((from, to)) => {
            if to.contains('-') {
                return Err(vec!["Invalid date range".to_string()]);
            }
            collect_dates(from.trim(), to.trim())?
        }
        None => {
            let day = date(date_or_range).map_err(|e| vec![e])?;
            (day, day)
        }
    };

    Ok(AvailabilityQuery {
        hotel_id: hotel_id.to_string(),
        from,
        to,
        room_type: room_type.to_string(),
    })
}

fn parse_search(inside: &str) -> Result<SearchQuery, Vec<String>> {
    let parts = split_arguments(inside);
    let &[hotel_id, days_ahead, room_type] = parts.as_slice() else {
        return Err(vec![
            "Search command requires 3 arguments (HotelId, DaysAhead, RoomType)".to_string(),
        ]);
    };

    let days_ahead = days_ahead
        .parse::<i32>()
        .map_err(|_| vec!["Unable to parse days ahead".to_string()])?;

    Ok(SearchQuery {
        hotel_id: hotel_id.to_string(),
        room_type: room_type.to_string(),
        days_ahead,
    })
}

// Both ends are checked so a bad range reports every bad date
fn collect_dates(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate), Vec<String>> {
    match (date(from), date(to)) {
        (Ok(from), Ok(to)) => Ok((from, to)),
        (from, to) => Err([from.err(), to.err()].into_iter().flatten().collect()),
    }
}

fn date(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("Invalid date '{}', expected 'yyyyMMdd'", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::date as d;
    use test_case::test_case;

    #[test_case("Availability(H1, 20240901, SGL)", "H1", "20240901", "20240901", "SGL"; "#1 single date")]
    #[test_case("Availability(H1, 20240901-20240903, DBL)", "H1", "20240901", "20240903", "DBL"; "#2 date range")]
    #[test_case("  availability( H22 , 20250301 - 20250305 , SGL )  ", "H22", "20250301", "20250305", "SGL"; "#3 spaces and lowercase")]
    #[test_case("AVAILABILITY(H1,20240903-20240901,SGL)", "H1", "20240903", "20240901", "SGL"; "#4 inverted range is left to validation")]
    fn test_parse_availability(input: &str, hotel_id: &str, from: &str, to: &str, room_type: &str) {
        let expected = Query::Availability(AvailabilityQuery {
            hotel_id: hotel_id.to_string(),
            from: d(from),
            to: d(to),
            room_type: room_type.to_string(),
        });
        assert_eq!(parse_command(input), Ok(expected));
    }

    #[test_case("Search(H1, 365, SGL)", "H1", 365, "SGL"; "#1 year ahead")]
    #[test_case("search(H1,0,DBL)", "H1", 0, "DBL"; "#2 today only")]
    #[test_case("Search(H1, -3, SGL)", "H1", -3, "SGL"; "#3 negative is left to validation")]
    fn test_parse_search(input: &str, hotel_id: &str, days_ahead: i32, room_type: &str) {
        let expected = Query::Search(SearchQuery {
            hotel_id: hotel_id.to_string(),
            room_type: room_type.to_string(),
            days_ahead,
        });
        assert_eq!(parse_command(input), Ok(expected));
    }

    #[test_case("", "Input can't be empty"; "#1 empty")]
    #[test_case("   ", "Input can't be empty"; "#2 blank")]
    #[test_case("Book(H1, 20240901, SGL)", "Invalid command format"; "#3 unknown command")]
    #[test_case("Search(H1, 365, SGL", "Invalid command format"; "#4 missing parenthesis")]
    #[test_case("Availability(H1, SGL)", "Availability command requires 3 arguments (HotelId, date or range, RoomType)"; "#5 availability arity")]
    #[test_case("Availability(H1, 20240901-20240902-20240903, SGL)", "Invalid date range"; "#6 three dates")]
    #[test_case("Availability(H1, 2024-09-01, SGL)", "Invalid date range"; "#7 iso date")]
    #[test_case("Availability(H1, 20240931, SGL)", "Invalid date '20240931', expected 'yyyyMMdd'"; "#8 no such day")]
    #[test_case("Search(H1, SGL)", "Search command requires 3 arguments (HotelId, DaysAhead, RoomType)"; "#9 search arity")]
    #[test_case("Search(H1, soon, SGL)", "Unable to parse days ahead"; "#10 days ahead not a number")]
    fn test_parse_errors(input: &str, message: &str) {
        assert_eq!(parse_command(input), Err(vec![message.to_string()]));
    }

    #[test]
    fn test_bad_range_reports_both_dates() {
        assert_eq!(
            parse_command("Availability(H1, 2024090-2024099, SGL)"),
            Err(vec![
                "Invalid date '2024090', expected 'yyyyMMdd'".to_string(),
                "Invalid date '2024099', expected 'yyyyMMdd'".to_string(),
            ])
        );
    }

    #[test]
    fn test_non_ascii_input_does_not_panic() {
        assert_eq!(
            parse_command("Séarch(H1, 1, SGL)"),
            Err(vec!["Invalid command format".to_string()])
        );
    }
}
