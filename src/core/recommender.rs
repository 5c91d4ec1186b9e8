use crate::core::filters::matches_place_query;
use crate::models::{Place, PlaceQuery, RecommendationSet, Table};

/// Number of places returned when no limit is configured
pub const DEFAULT_LIMIT: usize = 5;

/// Largest number of places a recommendation may return
pub const MAX_LIMIT: usize = 5;

/// Tourism recommender: hard filters, then rating descending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    limit: usize,
}

impl Recommender {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Top places for a query
    ///
    /// The sort is stable so equally rated places keep table order. No
    /// surviving rows is a valid, empty result.
    pub fn recommend<'a>(&self, table: &'a Table<Place>, query: &PlaceQuery) -> RecommendationSet<'a> {
        let mut places: Vec<&Place> = table
            .iter()
            .filter(|place| matches_place_query(place, query))
            .collect();

        let total_matches = places.len();

        places.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        places.truncate(self.limit);

        tracing::debug!(
            "Recommending {} of {} places (category={:?}, city={:?}, max_price={:?})",
            places.len(),
            total_matches,
            query.category,
            query.city,
            query.max_price
        );

        RecommendationSet { places, total_matches }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_place(name: &str, city: &str, price: f64, rating: f64) -> Place {
        Place {
            place_name: name.to_string(),
            category: "Taman Hiburan".to_string(),
            city: city.to_string(),
            price,
            time_minutes: 60.0,
            rating,
        }
    }

    #[test]
    fn test_excludes_places_over_budget() {
        let table = Table::new(vec![
            create_place("Dufan", "Jakarta", 150000.0, 4.6),
            create_place("Monas", "Jakarta", 50000.0, 4.4),
        ]);
        let query = PlaceQuery {
            city: "Jakarta".to_string(),
            max_price: Some(100000.0),
            ..Default::default()
        };

        let result = Recommender::default().recommend(&table, &query);

        assert_eq!(result.len(), 1);
        assert_eq!(result.places[0].place_name, "Monas");
    }

    #[test]
    fn test_sorted_by_rating_with_stable_ties() {
        let table = Table::new(vec![
            create_place("A", "Bandung", 0.0, 4.0),
            create_place("B", "Bandung", 0.0, 4.8),
            create_place("C", "Bandung", 0.0, 4.0),
            create_place("D", "Bandung", 0.0, 4.5),
        ]);

        let result = Recommender::default().recommend(&table, &PlaceQuery::default());
        let names: Vec<&str> = result.places.iter().map(|p| p.place_name.as_str()).collect();

        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_respects_limit() {
        let table: Table<Place> = (0..12)
            .map(|i| create_place(&i.to_string(), "Semarang", 0.0, i as f64 / 4.0))
            .collect();

        let result = Recommender::default().recommend(&table, &PlaceQuery::default());

        assert_eq!(result.len(), 5);
        assert_eq!(result.total_matches, 12);
        assert_eq!(result.places[0].place_name, "11");
    }

    #[test]
    fn test_no_survivors_is_empty_not_error() {
        let table = Table::new(vec![create_place("Dufan", "Jakarta", 0.0, 4.6)]);
        let query = PlaceQuery {
            city: "Surabaya".to_string(),
            ..Default::default()
        };

        let result = Recommender::default().recommend(&table, &query);

        assert!(result.is_empty());
        assert_eq!(result.total_matches, 0);
    }
}
