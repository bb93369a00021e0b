//! Integration tests for the recommender.
//!
//! These check the ranking guarantees against both hand-written scenarios and
//! a larger catalog with many tied scores.

use data_loader::{Catalog, DataError, Dataset, SimilarityMatrix};
use rayon::prelude::*;
use recommender::{RecommendError, Recommendation, SimilaritySource, recommend};
use std::sync::Arc;

fn abc_catalog() -> Catalog {
    Catalog::from_records(vec![(1, "A"), (2, "B"), (3, "C")])
}

fn titles(recs: &[Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.movie.title.as_str()).collect()
}

/// 40 movies with scores drawn from five levels, so ties are everywhere
fn create_tied_dataset() -> Dataset {
    let n = 40;
    let catalog = Catalog::from_records((0..n).map(|i| (1000 + i as u32, format!("Movie {}", i))));
    let rows: Vec<Vec<f32>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| ((i * 7 + j * 13) % 5) as f32 / 4.0)
                .collect()
        })
        .collect();
    let similarity = SimilarityMatrix::from_rows(rows).unwrap();
    Dataset::new(catalog, similarity).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_top_two() {
    let catalog = abc_catalog();
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.2],
        vec![0.9, 1.0, 0.4],
        vec![0.2, 0.4, 1.0],
    ])
    .unwrap();

    let recs = recommend(&catalog, &matrix, "A", 2).unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].movie.id, 2);
    assert_eq!(recs[0].movie.title, "B");
    assert_eq!(recs[0].score, 0.9);
    assert_eq!(recs[1].movie.id, 3);
    assert_eq!(recs[1].movie.title, "C");
    assert_eq!(recs[1].score, 0.2);
}

#[test]
fn test_scenario_count_capped_at_catalog_size() {
    let catalog = abc_catalog();
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.2],
        vec![0.9, 1.0, 0.4],
        vec![0.2, 0.4, 1.0],
    ])
    .unwrap();

    let recs = recommend(&catalog, &matrix, "A", 10).unwrap();
    assert_eq!(titles(&recs), vec!["B", "C"]);
}

#[test]
fn test_scenario_tie_keeps_catalog_order() {
    let catalog = abc_catalog();
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.5, 0.5],
        vec![0.5, 1.0, 0.5],
        vec![0.5, 0.5, 1.0],
    ])
    .unwrap();

    let recs = recommend(&catalog, &matrix, "A", 2).unwrap();
    assert_eq!(titles(&recs), vec!["B", "C"]);
}

#[test]
fn test_scenario_unknown_title() {
    let catalog = abc_catalog();
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.2],
        vec![0.9, 1.0, 0.4],
        vec![0.2, 0.4, 1.0],
    ])
    .unwrap();

    let result = recommend(&catalog, &matrix, "Z", 5);
    assert!(matches!(
        result,
        Err(RecommendError::Data(DataError::NotFound { ref title })) if title == "Z"
    ));
}

#[test]
fn test_query_excluded_even_when_self_score_is_low() {
    let catalog = abc_catalog();
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![0.0, 0.9, 0.2],
        vec![0.9, 1.0, 0.4],
        vec![0.2, 0.4, 1.0],
    ])
    .unwrap();

    let recs = recommend(&catalog, &matrix, "A", 3).unwrap();
    assert_eq!(titles(&recs), vec!["B", "C"]);
}

// ============================================================================
// Properties over a tie-heavy catalog
// ============================================================================

#[test]
fn test_never_recommends_query() {
    let dataset = create_tied_dataset();
    let catalog = dataset.catalog();

    for title in catalog.all_titles() {
        let recs = recommend(catalog, dataset.similarity(), title, 39).unwrap();
        assert!(recs.iter().all(|r| r.movie.title != title));
    }
}

#[test]
fn test_length_is_min_of_count_and_n_minus_one() {
    let dataset = create_tied_dataset();
    let catalog = dataset.catalog();
    let n = catalog.len();

    for title in ["Movie 0", "Movie 17", "Movie 39"] {
        for k in [1, 2, 5, 38, 39, 40, 100] {
            let recs = recommend(catalog, dataset.similarity(), title, k).unwrap();
            assert_eq!(recs.len(), k.min(n - 1), "title={} k={}", title, k);
        }
    }
}

#[test]
fn test_sorted_by_score_then_index() {
    let dataset = create_tied_dataset();
    let catalog = dataset.catalog();

    for title in catalog.all_titles() {
        let recs = recommend(catalog, dataset.similarity(), title, 39).unwrap();
        for pair in recs.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.score >= b.score);
            if a.score == b.score {
                assert!(a.movie.index < b.movie.index);
            }
        }
    }
}

#[test]
fn test_scores_match_matrix_row() {
    let dataset = create_tied_dataset();
    let query = dataset.catalog().find_index_by_title("Movie 11").unwrap();
    let row = dataset.similarity().row(query).unwrap();

    let recs = recommend(dataset.catalog(), dataset.similarity(), "Movie 11", 10).unwrap();
    for rec in &recs {
        assert_eq!(rec.score, row[rec.movie.index]);
    }
}

#[test]
fn test_deterministic_across_calls() {
    let dataset = create_tied_dataset();

    let first = recommend(dataset.catalog(), dataset.similarity(), "Movie 3", 12).unwrap();
    for _ in 0..10 {
        let again = recommend(dataset.catalog(), dataset.similarity(), "Movie 3", 12).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_concurrent_callers_see_same_results() {
    let source = SimilaritySource::new(Arc::new(create_tied_dataset()));
    let all_titles: Vec<String> = source
        .catalog()
        .all_titles()
        .into_iter()
        .map(String::from)
        .collect();

    let sequential: Vec<Vec<Recommendation>> = all_titles
        .iter()
        .map(|t| source.recommend(t, 5).unwrap())
        .collect();
    let parallel: Vec<Vec<Recommendation>> = all_titles
        .par_iter()
        .map(|t| source.recommend(t, 5).unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_duplicate_title_uses_first_row() {
    let catalog = Catalog::from_records(vec![(1, "Dup"), (2, "X"), (3, "Dup"), (4, "Y")]);
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.1, 0.2],
        vec![0.9, 1.0, 0.3, 0.3],
        vec![0.1, 0.3, 1.0, 0.8],
        vec![0.2, 0.3, 0.8, 1.0],
    ])
    .unwrap();

    let recs = recommend(&catalog, &matrix, "Dup", 1).unwrap();
    assert_eq!(recs[0].movie.id, 2);
}
