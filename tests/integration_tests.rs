// Integration tests for Pakar Algo

use pakar_algo::core::{Matcher, MatchError, Recommender};
use pakar_algo::models::{ClinicalQuery, MatchMode, PlaceQuery};
use pakar_algo::services::{read_clinical, read_places, ClinicalColumns};

const ANXIETY_CSV: &str = "\
Gender,Age,Anxiety Value,Diagnosis
M,18-24,3,Minimal
F,18-24,8,Mild
M,25-34,12,Moderate
F,25-34,12,Moderate
F,35-44,19,Severe
";

const TOURISM_CSV: &str = "\
Place_Name,Category,City,Price,Time_Minutes,Rating
Dunia Fantasi,Taman Hiburan,Jakarta,270000,360,4.6
Atlantis Water Adventure,Taman Hiburan,Jakarta,50000,180,4.5
Ocean Ecopark,Taman Hiburan,Jakarta,150000,120,4.0
Trans Studio Bandung,Taman Hiburan,Bandung,280000,,4.6
Kebun Binatang Ragunan,Cagar Alam,Jakarta,4000,,4.5
Taman Impian Jaya Ancol,Taman Hiburan,Jakarta,25000,,4.5
Sea World,Taman Hiburan,Jakarta,100000,90,4.4
Kidzania,Taman Hiburan,Jakarta,90000,,4.2
";

fn anxiety_table() -> pakar_algo::Table<pakar_algo::ClinicalRecord> {
    read_clinical(ANXIETY_CSV.as_bytes(), &ClinicalColumns::new("Anxiety Value")).unwrap()
}

#[test]
fn test_modes_agree_without_demographics() {
    let table = anxiety_table();
    let matcher = Matcher::default();

    for score in 0..=21 {
        let query = ClinicalQuery::new(score, None, None);
        let hard = matcher.find_best_match(&table, &query, MatchMode::HardFilter).unwrap();
        let soft = matcher.find_best_match(&table, &query, MatchMode::SoftPenalty).unwrap();

        assert_eq!(hard.index, soft.index, "modes disagree for score {}", score);
    }
}

#[test]
fn test_soft_mode_never_fails_on_unknown_demographics() {
    let table = anxiety_table();
    let matcher = Matcher::default();
    let query = ClinicalQuery::new(10, Some("nonbinary"), Some("65+"));

    let soft = matcher.find_best_match(&table, &query, MatchMode::SoftPenalty).unwrap();
    assert_eq!(soft.distance.score_diff, 2);
    assert_eq!(soft.distance.total, 202);

    assert_eq!(
        matcher.find_best_match(&table, &query, MatchMode::HardFilter),
        Err(MatchError::NoMatchFound)
    );
}

#[test]
fn test_demographics_steer_between_equal_scores() {
    let table = anxiety_table();
    let matcher = Matcher::default();

    let query = ClinicalQuery::new(12, Some("f"), Some("25-34"));
    let result = matcher.find_best_match(&table, &query, MatchMode::SoftPenalty).unwrap();

    assert_eq!(result.index, 3);
    assert_eq!(result.record.attributes["Diagnosis"], "Moderate");
}

#[test]
fn test_matching_is_idempotent() {
    let table = anxiety_table();
    let matcher = Matcher::default();
    let query = ClinicalQuery::new(9, Some("M"), None);

    let first = matcher.find_best_match(&table, &query, MatchMode::SoftPenalty).unwrap();
    let second = matcher.find_best_match(&table, &query, MatchMode::SoftPenalty).unwrap();

    assert_eq!(first, second);
    assert_eq!(table, anxiety_table(), "table must not change across queries");
}

#[test]
fn test_recommendations_sorted_limited_and_filtered() {
    let table = read_places(TOURISM_CSV.as_bytes()).unwrap();
    let query = PlaceQuery {
        category: "hiburan".to_string(),
        city: "jakarta".to_string(),
        max_price: Some(200000.0),
    };

    let result = Recommender::default().recommend(&table, &query);

    assert_eq!(result.total_matches, 5);
    assert!(result.len() <= 5);
    for pair in result.places.windows(2) {
        assert!(pair[0].rating >= pair[1].rating, "not sorted by rating");
    }
    for place in &result.places {
        assert!(place.price <= 200000.0);
        assert_eq!(place.city, "Jakarta");
        assert!(place.category.contains("Hiburan"));
    }

    // Equal ratings keep dataset order
    let names: Vec<&str> = result.places.iter().map(|p| p.place_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Atlantis Water Adventure",
            "Taman Impian Jaya Ancol",
            "Sea World",
            "Kidzania",
            "Ocean Ecopark",
        ]
    );
}
