use crate::core::distance::same_category;
use crate::models::{ClinicalQuery, ClinicalRecord, Place, PlaceQuery};

/// Case-insensitive substring test; an empty needle matches everything
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Hard demographic filter for clinical rows
///
/// Only fields present on the query constrain the row.
#[inline]
pub fn matches_demographics(record: &ClinicalRecord, query: &ClinicalQuery) -> bool {
    if let Some(gender) = query.gender.as_deref() {
        if !same_category(&record.gender, gender) {
            return false;
        }
    }

    if let Some(age) = query.age.as_deref() {
        if !same_category(&record.age, age) {
            return false;
        }
    }

    true
}

/// Hard filter for tourism rows: category, city and price ceiling
#[inline]
pub fn matches_place_query(place: &Place, query: &PlaceQuery) -> bool {
    if !contains_ignore_case(&place.category, &query.category) {
        return false;
    }

    if !contains_ignore_case(&place.city, &query.city) {
        return false;
    }

    match query.max_price {
        Some(max_price) => place.price <= max_price,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_place(category: &str, city: &str, price: f64) -> Place {
        Place {
            place_name: "Test".to_string(),
            category: category.to_string(),
            city: city.to_string(),
            price,
            time_minutes: 0.0,
            rating: 4.5,
        }
    }

    fn create_record(gender: &str, age: &str) -> ClinicalRecord {
        ClinicalRecord {
            reference_score: 10,
            gender: gender.to_string(),
            age: age.to_string(),
            attributes: Default::default(),
        }
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Taman Hiburan", "hiburan"));
        assert!(contains_ignore_case("Jakarta", ""));
        assert!(!contains_ignore_case("Bandung", "jakarta"));
    }

    #[test]
    fn test_demographics_filter() {
        let record = create_record("Female", "18-24");

        assert!(matches_demographics(&record, &ClinicalQuery::new(5, None, None)));
        assert!(matches_demographics(&record, &ClinicalQuery::new(5, Some("female"), Some("18-24"))));
        assert!(!matches_demographics(&record, &ClinicalQuery::new(5, Some("male"), None)));
        assert!(!matches_demographics(&record, &ClinicalQuery::new(5, None, Some("25-34"))));
    }

    #[test]
    fn test_place_filter_price_ceiling() {
        let cheap = create_place("Taman Hiburan", "Jakarta", 50000.0);
        let pricey = create_place("Taman Hiburan", "Jakarta", 150000.0);
        let query = PlaceQuery {
            category: String::new(),
            city: "jakarta".to_string(),
            max_price: Some(100000.0),
        };

        assert!(matches_place_query(&cheap, &query));
        assert!(!matches_place_query(&pricey, &query));
    }

    #[test]
    fn test_place_filter_unbounded_price() {
        let place = create_place("Budaya", "Yogyakarta", 1_000_000.0);
        let query = PlaceQuery::default();

        assert!(matches_place_query(&place, &query));
    }
}
