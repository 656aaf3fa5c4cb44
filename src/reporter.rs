/**
This module gives a few tools to prettyprint the per-tag metrics and the overall micro-averaged
metrics of an evaluation.
*/
use serde::{Deserialize, Serialize};
use std::cmp::PartialOrd;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;
use std::hash::Hash;

/// The reporter holds the metrics of every tag found in the dataset and the overall metrics. It
/// can be used to display the results (i.e. prettyprint them) as if they were collected into a
/// dataframe and can be consumed to obtain a `HashSet` containing the metrics. The reporter is
/// built with the `classification_report` function.
///
/// # Example
///
/// ```rust
/// use nereval::{classification_report, Entity};
///
/// let y_true = vec![vec![Entity::new("DIN908", "Productname", 18)]];
/// let y_pred = vec![vec![Entity::new("DIN908", "Productname", 18)]];
///
/// let reporter = classification_report(&y_true, &y_pred).unwrap();
///
/// let expected_report = "Class, Precision, Recall, Fscore, Support
/// Overall_Micro, 1, 1, 1, 1
/// Productname, 1, 1, 1, 1\n";
///
/// assert_eq!(expected_report, reporter.to_string());
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Reporter {
    pub(crate) classes: BTreeSet<ClassMetricsInner>,
}

/// By converting the reporter into a `HashSet` of `ClassMetrics`, you lose the ordering
/// implemented for the reporter. If you mean to consume the data without prettyprinting it, this
/// is not a problem.
impl From<Reporter> for HashSet<ClassMetrics> {
    fn from(value: Reporter) -> Self {
        value.classes.into_iter().map(ClassMetrics::from).collect()
    }
}

impl Reporter {
    pub(crate) fn insert(&mut self, metrics: ClassMetricsInner) -> bool {
        self.classes.insert(metrics)
    }
}

/// The Reporter struct acts as a dataframe when displayed.
impl Display for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Class, Precision, Recall, Fscore, Support")?;
        for v in self.classes.iter().rev() {
            //Must call `.rev()` because the iter is in ascending order
            writeln!(f, "{}", v)?
        }
        Ok(())
    }
}

#[derive(Debug)]
/// Datastructure holding the metrics of a given tag.
pub struct ClassMetrics {
    /// The tag, such as "PER", "GEO", "Productname", or "Overall_Micro" for the overall row.
    pub class: String,
    /// The average used to compute this row. Per-tag rows carry no average.
    pub average: Average,
    /// Precision metric
    pub precision: f32,
    /// Recall metric
    pub recall: f32,
    /// Fscore metric
    pub fscore: f32,
    /// Number of ground-truth entities carrying the tag
    pub support: usize,
}

impl Hash for ClassMetrics {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.average.hash(state)
    }
}

impl PartialEq for ClassMetrics {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.average == other.average
    }
}
impl Eq for ClassMetrics {}

impl From<ClassMetricsInner> for ClassMetrics {
    fn from(value: ClassMetricsInner) -> Self {
        Self {
            class: value.class,
            average: value.average,
            precision: value.precision,
            recall: value.recall,
            fscore: value.fscore,
            support: value.support,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// ClassMetricsInner holds the metrics of a single tag. Rows can't be constructed outside the
/// crate and implement a special version of the `Display` trait, allowing them to be treated as
/// the line of a dataframe. Equality and ordering look only at the tag and the average, so a
/// reporter holds at most one row per tag.
pub(crate) struct ClassMetricsInner {
    pub(crate) class: String,
    pub(crate) average: Average,
    pub(crate) precision: f32,
    pub(crate) recall: f32,
    pub(crate) fscore: f32,
    pub(crate) support: usize,
}

impl PartialEq for ClassMetricsInner {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.average == other.average
    }
}
impl Eq for ClassMetricsInner {}

#[allow(clippy::non_canonical_partial_ord_impl)]
impl PartialOrd for ClassMetricsInner {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.average.cmp(&other.average) {
            std::cmp::Ordering::Equal => self.class.partial_cmp(&other.class),
            v => Some(v),
        }
    }
}

impl Ord for ClassMetricsInner {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

impl ClassMetricsInner {
    pub(crate) fn new_overall(precision: f32, recall: f32, fscore: f32, support: usize) -> Self {
        ClassMetricsInner {
            class: Average::Micro.to_string(),
            average: Average::Micro,
            precision,
            recall,
            fscore,
            support,
        }
    }
}

/// The ClassMetricsInner struct acts as a line in a dataframe when displayed.
impl Display for ClassMetricsInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.class, self.precision, self.recall, self.fscore, self.support
        )
    }
}

/// The type of averaging behind a row of the report. Per-tag rows are computed from the counts of
/// a single tag and carry `None`; the overall row sums the counts of the whole dataset before
/// dividing and carries `Micro`.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum Average {
    None,
    Micro,
}

impl Display for Average {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Micro => write!(f, "Overall_Micro"),
        }
    }
}

/// Average implements partial ordering. This is used during the reporting to represent the rows
/// with an `average` other than `None` as `Greater` than those with `None`, so that the overall
/// row is displayed first.
#[allow(clippy::non_canonical_partial_ord_impl)]
impl PartialOrd for Average {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Self::None, Self::None) => Some(std::cmp::Ordering::Equal),
            (Self::None, _) => Some(std::cmp::Ordering::Less),
            (_, Self::None) => Some(std::cmp::Ordering::Greater),
            _ => Some(std::cmp::Ordering::Equal),
        }
    }
}
impl Ord for Average {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_row_displays_first() {
        let mut reporter = Reporter::default();
        reporter.insert(ClassMetricsInner {
            class: String::from("Dimension"),
            average: Average::None,
            precision: 0.0,
            recall: 0.5,
            fscore: 0.0,
            support: 1,
        });
        reporter.insert(ClassMetricsInner::new_overall(0.5, 0.5, 0.5, 3));
        reporter.insert(ClassMetricsInner {
            class: String::from("Productname"),
            average: Average::None,
            precision: 1.0,
            recall: 1.0,
            fscore: 1.0,
            support: 2,
        });
        let expected = "Class, Precision, Recall, Fscore, Support
Overall_Micro, 0.5, 0.5, 0.5, 3
Productname, 1, 1, 1, 2
Dimension, 0, 0.5, 0, 1\n";
        assert_eq!(reporter.to_string(), expected);
    }

    #[test]
    fn test_one_row_per_tag() {
        let mut reporter = Reporter::default();
        let row = ClassMetricsInner {
            class: String::from("Productname"),
            average: Average::None,
            precision: 1.0,
            recall: 1.0,
            fscore: 1.0,
            support: 2,
        };
        assert!(reporter.insert(row.clone()));
        assert!(!reporter.insert(row));
    }

    #[test]
    fn test_into_hashset_keeps_every_row() {
        let mut reporter = Reporter::default();
        reporter.insert(ClassMetricsInner::new_overall(1.0, 1.0, 1.0, 1));
        reporter.insert(ClassMetricsInner {
            class: String::from("Productname"),
            average: Average::None,
            precision: 1.0,
            recall: 1.0,
            fscore: 1.0,
            support: 1,
        });
        let rows: std::collections::HashSet<ClassMetrics> = reporter.into();
        assert_eq!(rows.len(), 2);
    }
}
