/**
This module loads classification results from JSON files. A result file contains a list of
objects, one per document, each holding the source text, the ground-truth entities and the
entities predicted by the model under evaluation. Parsing happens entirely outside of the scoring
functions: the scorer only ever sees lists of entities.
*/
use crate::entity::Entity;
use crate::metrics::{evaluate, InconsistentLengthError};
use num::Float;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

/// One document of a result file: the source text, the ground-truth entities found in it and the
/// entities a model predicted for it. The ground truth is stored under the JSON name `true`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Instance {
    pub text: String,
    #[serde(rename = "true")]
    pub truth: Vec<Entity<'static>>,
    pub predicted: Vec<Entity<'static>>,
}

#[derive(Debug)]
/// Enum error encompassing the failures that can happen when loading and scoring a result file.
pub enum DatasetError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file content is not a valid list of instances.
    Json(serde_json::Error),
    /// The parsed dataset could not be evaluated.
    Evaluation(InconsistentLengthError),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(io_err) => write!(f, "Could not read the result file: {}", io_err),
            Self::Json(json_err) => write!(f, "Could not parse the result file: {}", json_err),
            Self::Evaluation(length_err) => Display::fmt(length_err, f),
        }
    }
}
impl Error for DatasetError {}

impl From<std::io::Error> for DatasetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
impl From<InconsistentLengthError> for DatasetError {
    fn from(value: InconsistentLengthError) -> Self {
        Self::Evaluation(value)
    }
}

/// Reads a JSON result file and parses it into a list of instances.
pub fn parse_json<P: AsRef<Path>>(path: P) -> Result<Vec<Instance>, DatasetError> {
    let content = fs::read_to_string(path)?;
    let instances = serde_json::from_str(&content)?;
    Ok(instances)
}

/// Evaluates the classification results stored in a JSON file and returns the micro-averaged F1
/// score of the whole file.
pub fn evaluate_json<F: Float, P: AsRef<Path>>(path: P) -> Result<F, DatasetError> {
    let instances = parse_json(path)?;
    let mut y_true = Vec::with_capacity(instances.len());
    let mut y_pred = Vec::with_capacity(instances.len());
    for instance in instances {
        y_true.push(instance.truth);
        y_pred.push(instance.predicted);
    }
    Ok(evaluate(&y_true, &y_pred)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_INSTANCE: &str = r#"[
        {
            "text": "a b",
            "true": [{"text": "a", "type": "NAME", "start": 0}],
            "predicted": [{"text": "a", "type": "LOCATION", "start": 0}]
        }
    ]"#;

    #[test]
    fn test_parse_single_instance() {
        let instances: Vec<Instance> = serde_json::from_str(SINGLE_INSTANCE).unwrap();
        assert_eq!(instances.len(), 1);
        let instance = &instances[0];
        assert_eq!(instance.text, "a b");
        assert_eq!(instance.truth, vec![Entity::new("a", "NAME", 0)]);
        assert_eq!(instance.predicted, vec![Entity::new("a", "LOCATION", 0)]);
    }

    #[test]
    fn test_malformed_content_is_a_json_error() {
        let result: Result<Vec<Instance>, _> = serde_json::from_str("{not json");
        assert!(result.is_err());
        let wrapped = DatasetError::from(result.unwrap_err());
        assert!(matches!(wrapped, DatasetError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = parse_json("no/such/file.json");
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }
}
