//! HotpotQA-format dataset files and seeded split sampling
//!
//! A dataset file is a JSON array of objects carrying `_id`, `question`,
//! `answer`, `type` and `level` fields. Train and test samples are drawn
//! from the train file without overlap; validation comes from its own
//! file.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::domain::{DomainError, Question};

pub const DEFAULT_TRAIN_SIZE: usize = 800;
pub const DEFAULT_VALIDATION_SIZE: usize = 200;
pub const DEFAULT_TEST_SIZE: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;

/// Sample sizes and the RNG seed used to draw them
#[derive(Debug, Clone)]
pub struct SplitSizes {
    pub train: usize,
    pub validation: usize,
    pub test: usize,
    pub seed: u64,
}

impl Default for SplitSizes {
    fn default() -> Self {
        Self {
            train: DEFAULT_TRAIN_SIZE,
            validation: DEFAULT_VALIDATION_SIZE,
            test: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// The three seeded samples drawn from the dataset files
#[derive(Debug)]
pub struct DatasetSplits {
    pub train: Vec<Question>,
    pub validation: Vec<Question>,
    pub test: Vec<Question>,
}

/// Load every question from a HotpotQA-format JSON file
pub fn load_questions(path: &Path) -> Result<Vec<Question>, DomainError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| DomainError::dataset(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&raw)
        .map_err(|e| DomainError::dataset(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load the dataset files and draw seeded train/validation/test samples.
///
/// Train and test are disjoint subsets of the train file; if the file is
/// too small to fill both, train is filled first and test takes whatever
/// remains. The same seed always yields the same splits.
pub fn load_splits(
    train_path: &Path,
    validation_path: &Path,
    sizes: &SplitSizes,
) -> Result<DatasetSplits, DomainError> {
    let train_pool = load_questions(train_path)?;
    let validation_pool = load_questions(validation_path)?;

    let mut rng = StdRng::seed_from_u64(sizes.seed);

    let combined = (sizes.train + sizes.test).min(train_pool.len());
    let picked = rand::seq::index::sample(&mut rng, train_pool.len(), combined).into_vec();
    let train_count = sizes.train.min(picked.len());

    let train: Vec<Question> = picked[..train_count]
        .iter()
        .map(|&i| train_pool[i].clone())
        .collect();
    let test: Vec<Question> = picked[train_count..]
        .iter()
        .map(|&i| train_pool[i].clone())
        .collect();

    let validation_count = sizes.validation.min(validation_pool.len());
    let validation: Vec<Question> =
        rand::seq::index::sample(&mut rng, validation_pool.len(), validation_count)
            .into_iter()
            .map(|i| validation_pool[i].clone())
            .collect();

    info!(
        "Loaded splits: train={}, validation={}, test={} (seed {})",
        train.len(),
        validation.len(),
        test.len(),
        sizes.seed
    );

    Ok(DatasetSplits {
        train,
        validation,
        test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn write_dataset(name: &str, count: usize) -> PathBuf {
        let items: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "_id": format!("{}-{}", name, i),
                    "question": format!("Question {}?", i),
                    "answer": format!("Answer {}", i),
                    "type": "bridge",
                    "level": "medium",
                })
            })
            .collect();

        let path = std::env::temp_dir().join(format!("qa-dataset-{}-{}.json", name, uuid::Uuid::new_v4()));
        fs::write(&path, serde_json::to_string(&items).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_questions_maps_dataset_field_names() {
        let path = write_dataset("load", 3);
        let questions = load_questions(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].id.as_str(), "load-0");
        assert_eq!(questions[0].text, "Question 0?");
        assert_eq!(questions[0].gold_answer, "Answer 0");
        assert_eq!(questions[0].category.as_deref(), Some("bridge"));
        assert_eq!(questions[0].difficulty.as_deref(), Some("medium"));
    }

    #[test]
    fn test_load_questions_missing_file_is_dataset_error() {
        let error = load_questions(Path::new("/nonexistent/dataset.json")).unwrap_err();
        assert!(matches!(error, DomainError::Dataset { .. }));
        assert!(error.to_string().contains("/nonexistent/dataset.json"));
    }

    #[test]
    fn test_load_questions_invalid_json_is_dataset_error() {
        let path = std::env::temp_dir().join(format!("qa-dataset-bad-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, "not json").unwrap();

        let error = load_questions(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(error, DomainError::Dataset { .. }));
        assert!(error.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_train_and_test_are_disjoint() {
        let train_path = write_dataset("train", 50);
        let validation_path = write_dataset("val", 20);

        let sizes = SplitSizes {
            train: 20,
            validation: 10,
            test: 20,
            seed: 42,
        };
        let splits = load_splits(&train_path, &validation_path, &sizes).unwrap();
        fs::remove_file(&train_path).unwrap();
        fs::remove_file(&validation_path).unwrap();

        assert_eq!(splits.train.len(), 20);
        assert_eq!(splits.test.len(), 20);
        assert_eq!(splits.validation.len(), 10);

        let train_ids: HashSet<&str> = splits.train.iter().map(|q| q.id.as_str()).collect();
        let test_ids: HashSet<&str> = splits.test.iter().map(|q| q.id.as_str()).collect();
        assert!(train_ids.is_disjoint(&test_ids));
    }

    #[test]
    fn test_same_seed_reproduces_splits() {
        let train_path = write_dataset("train", 30);
        let validation_path = write_dataset("val", 10);

        let sizes = SplitSizes {
            train: 10,
            validation: 5,
            test: 10,
            seed: 7,
        };
        let first = load_splits(&train_path, &validation_path, &sizes).unwrap();
        let second = load_splits(&train_path, &validation_path, &sizes).unwrap();
        fs::remove_file(&train_path).unwrap();
        fs::remove_file(&validation_path).unwrap();

        let ids = |qs: &[Question]| -> Vec<String> {
            qs.iter().map(|q| q.id.as_str().to_string()).collect()
        };
        assert_eq!(ids(&first.train), ids(&second.train));
        assert_eq!(ids(&first.validation), ids(&second.validation));
        assert_eq!(ids(&first.test), ids(&second.test));
    }

    #[test]
    fn test_small_pool_fills_train_before_test() {
        let train_path = write_dataset("train", 12);
        let validation_path = write_dataset("val", 3);

        let sizes = SplitSizes {
            train: 10,
            validation: 5,
            test: 10,
            seed: 42,
        };
        let splits = load_splits(&train_path, &validation_path, &sizes).unwrap();
        fs::remove_file(&train_path).unwrap();
        fs::remove_file(&validation_path).unwrap();

        assert_eq!(splits.train.len(), 10);
        assert_eq!(splits.test.len(), 2);
        assert_eq!(splits.validation.len(), 3);
    }
}
