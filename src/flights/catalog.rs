use serde::{Deserialize, Serialize};

/// A single entry in the mock flight inventory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub airline: &'static str,
    pub flight_number: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub depart: &'static str,
    pub arrive: &'static str,
    pub duration: &'static str,
    pub stops: u32,
    pub fare_class: &'static str,
    pub price: u32,
    pub currency: &'static str,
    pub miles: u32,
}

/// Query parameters for `GET /search`. Absent params match everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub depart: Option<String>,
    #[serde(rename = "fareClass")]
    pub fare_class: Option<String>,
}

// Toy in-memory database of flights.
pub const FLIGHTS: &[Flight] = &[
    Flight {
        airline: "Delta Air Lines",
        flight_number: "DL123",
        from: "JFK",
        to: "LAX",
        depart: "2025-07-01",
        arrive: "2025-07-01",
        duration: "6h 10m",
        stops: 0,
        fare_class: "economy",
        price: 350,
        currency: "USD",
        miles: 25000,
    },
    Flight {
        airline: "United Airlines",
        flight_number: "UA456",
        from: "JFK",
        to: "LAX",
        depart: "2025-07-01",
        arrive: "2025-07-01",
        duration: "6h 20m",
        stops: 1,
        fare_class: "economy",
        price: 330,
        currency: "USD",
        miles: 24000,
    },
    Flight {
        airline: "American Airlines",
        flight_number: "AA789",
        from: "JFK",
        to: "LAX",
        depart: "2025-07-01",
        arrive: "2025-07-01",
        duration: "6h 5m",
        stops: 0,
        fare_class: "economy",
        price: 370,
        currency: "USD",
        miles: 26000,
    },
    Flight {
        airline: "Air Canada",
        flight_number: "AC101",
        from: "YYZ",
        to: "YVR",
        depart: "2025-07-02",
        arrive: "2025-07-02",
        duration: "5h 10m",
        stops: 0,
        fare_class: "business",
        price: 800,
        currency: "CAD",
        miles: 40000,
    },
    Flight {
        airline: "Lufthansa",
        flight_number: "LH400",
        from: "FRA",
        to: "JFK",
        depart: "2025-07-03",
        arrive: "2025-07-03",
        duration: "8h 30m",
        stops: 0,
        fare_class: "first",
        price: 2500,
        currency: "EUR",
        miles: 90000,
    },
    Flight {
        airline: "Avianca",
        flight_number: "AV244",
        from: "BOG",
        to: "LIM",
        depart: "2025-07-04",
        arrive: "2025-07-04",
        duration: "3h 10m",
        stops: 0,
        fare_class: "economy",
        price: 200,
        currency: "USD",
        miles: 15000,
    },
];

/// Linear filter over the catalog. Airport codes and fare class match
/// case-insensitively; the departure date is compared as an exact string.
pub fn search(query: &SearchQuery) -> Vec<Flight> {
    FLIGHTS
        .iter()
        .filter(|f| {
            query
                .from
                .as_deref()
                .map_or(true, |v| f.from.eq_ignore_ascii_case(v))
                && query
                    .to
                    .as_deref()
                    .map_or(true, |v| f.to.eq_ignore_ascii_case(v))
                && query.depart.as_deref().map_or(true, |v| f.depart == v)
                && query
                    .fare_class
                    .as_deref()
                    .map_or(true, |v| f.fare_class.eq_ignore_ascii_case(v))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        from: Option<&str>,
        to: Option<&str>,
        depart: Option<&str>,
        fare_class: Option<&str>,
    ) -> SearchQuery {
        SearchQuery {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            depart: depart.map(str::to_string),
            fare_class: fare_class.map(str::to_string),
        }
    }

    #[test]
    fn empty_query_returns_whole_catalog() {
        let results = search(&SearchQuery::default());
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn airport_codes_match_case_insensitively() {
        let results = search(&query(Some("jfk"), Some("lax"), None, None));
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|f| f.from == "JFK" && f.to == "LAX"));
    }

    #[test]
    fn fare_class_filter_is_case_insensitive() {
        let results = search(&query(None, None, None, Some("BUSINESS")));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].flight_number, "AC101");
    }

    #[test]
    fn depart_date_matches_exactly() {
        let results = search(&query(None, None, Some("2025-07-03"), None));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].airline, "Lufthansa");

        let none = search(&query(None, None, Some("2025-07"), None));
        assert!(none.is_empty());
    }

    #[test]
    fn filters_combine_conjunctively() {
        let results = search(&query(Some("JFK"), Some("LAX"), None, Some("economy")));
        assert_eq!(results.len(), 3);

        let none = search(&query(Some("JFK"), Some("LAX"), None, Some("first")));
        assert!(none.is_empty());
    }

    #[test]
    fn flight_serializes_camel_case() {
        let json = serde_json::to_value(&FLIGHTS[0]).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["flightNumber"], "DL123");
        assert_eq!(obj["fareClass"], "economy");
        assert_eq!(obj["miles"], 25000);
    }
}
