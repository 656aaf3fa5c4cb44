/**
This module computes the metrics of a ground-truth sequence and a predicted sequence of entities.
Matching gives partial credit: an entity can be recaptured on the text axis (exact surface form at
the exact offset) and on the type axis (same tag with overlapping spans), and each axis is worth
one credit unit. The per-document counts are summed over the whole dataset before computing
precision, recall and the F1 score, making the final score a micro-average.
*/
use crate::entity::Entity;
use crate::reporter::{Average, ClassMetricsInner, Reporter};
use ahash::{random_state::RandomState, HashMap as AHashMap};
use itertools::multizip;
use num::Float;
use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Error type returned when the two datasets do not hold the same number of documents.
pub struct InconsistentLengthError(pub(crate) usize, pub(crate) usize);

impl Display for InconsistentLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inconsistent length between the two datasets. `y_true` holds {} documents, `y_pred` holds {}",
            self.0, self.1
        )
    }
}
impl Error for InconsistentLengthError {}

/// Determines whether the spans of two entities overlap, i.e. whether the half-open character
/// ranges `x.start..x.end()` and `y.start..y.end()` share at least one character. Touching spans
/// (the end of one equal to the start of the other) do not overlap. This function is symmetric.
pub fn has_overlap(x: &Entity, y: &Entity) -> bool {
    x.start < y.end() && y.start < x.end()
}

/// Asserts that the entity boundaries are correct, regardless of the entity tag: same surface
/// form, same starting offset.
pub fn correct_text(x: &Entity, y: &Entity) -> bool {
    x.text == y.text && x.start == y.start
}

/// Asserts that the entity tags match and that the surface forms of the two entities overlap.
/// Exact boundaries are not required.
pub fn correct_type(x: &Entity, y: &Entity) -> bool {
    x.tag == y.tag && has_overlap(x, y)
}

/// Scans the predictions in order and returns the credits awarded to a single truth entity. The
/// scan stops at the first prediction satisfying either criterion; that prediction settles both
/// axes at once. A prediction satisfying only one criterion therefore consumes the other axis too.
fn match_credits(x: &Entity, y_pred: &[Entity]) -> (bool, bool) {
    for y in y_pred {
        let text_match = correct_text(x, y);
        let type_match = correct_type(x, y);
        if text_match || type_match {
            return (text_match, type_match);
        }
    }
    (false, false)
}

/// Computes the count of correctly predicted entities on two axes: text and type.
///
/// For every entity of `y_true`, the predictions are scanned in their original order and the
/// first prediction recognized by either criterion is the only one counted for that entity. At
/// most one text credit and at most one type credit is awarded per truth entity, both coming from
/// that single prediction. Because the stopping point depends on which list is scanned, this
/// function is *not* symmetric in its arguments.
///
/// Returns `(count_text, count_type)`, each in `0..=y_true.len()`.
pub fn count_correct(y_true: &[Entity], y_pred: &[Entity]) -> (usize, usize) {
    let mut count_text = 0;
    let mut count_type = 0;
    for x in y_true {
        let (text_match, type_match) = match_credits(x, y_pred);
        count_text += usize::from(text_match);
        count_type += usize::from(type_match);
    }
    (count_text, count_type)
}

fn fraction<F: Float>(numerator: usize, denominator: usize) -> F {
    if denominator == 0 {
        return F::zero();
    }
    let numerator = F::from(numerator).expect("a count is always convertible to a float");
    let denominator = F::from(denominator).expect("a count is always convertible to a float");
    numerator / denominator
}

/// Fraction of the predicted credit units that were correct. A total of zero predicted units
/// yields a precision of 0 rather than an error.
pub fn precision<F: Float>(correct: usize, actual: usize) -> F {
    fraction(correct, actual)
}

/// Fraction of the possible credit units that were recaptured. A total of zero possible units
/// yields a recall of 0 rather than an error.
pub fn recall<F: Float>(correct: usize, possible: usize) -> F {
    fraction(correct, possible)
}

/// Harmonic mean of precision and recall. Defined as 0 when both inputs are 0.
pub fn f1<F: Float>(precision: F, recall: F) -> F {
    let denominator = precision + recall;
    if denominator == F::zero() {
        return F::zero();
    }
    let two = F::one() + F::one();
    two * (precision * recall) / denominator
}

/// Running totals of the micro-average. Per-document counts combine by plain summation, so the
/// order in which documents are tallied cannot change the aggregate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct MatchCounts {
    /// Credit units awarded, text and type axes summed together.
    correct: usize,
    /// Credit units offered by the predictions: two per predicted entity.
    actual: usize,
    /// Credit units offered by the ground truth: two per truth entity.
    possible: usize,
}

impl MatchCounts {
    fn of_document(y_true: &[Entity], y_pred: &[Entity]) -> Self {
        let mut counts = MatchCounts::default();
        counts.tally(y_true, y_pred);
        counts
    }

    fn tally(&mut self, y_true: &[Entity], y_pred: &[Entity]) {
        let (count_text, count_type) = count_correct(y_true, y_pred);
        self.correct += count_text + count_type;
        // every entity carries one text credit and one type credit
        self.possible += y_true.len() * 2;
        self.actual += y_pred.len() * 2;
    }

    fn merge(&mut self, other: &MatchCounts) {
        self.correct += other.correct;
        self.actual += other.actual;
        self.possible += other.possible;
    }

    fn fscore<F: Float>(&self) -> F {
        f1(
            precision(self.correct, self.actual),
            recall(self.correct, self.possible),
        )
    }
}

/// Evaluates the classification results of a whole dataset. Each row of `y_true` holds the ground
/// truth entities of one document and the matching row of `y_pred` holds the entities a model
/// predicted for the same document.
///
/// Returns the micro-averaged F1 score over both credit axes, a float in `[0, 1]`. The counts are
/// summed across the whole dataset before the ratios are computed; documents are never averaged
/// individually. Datasets of unequal length are refused.
///
/// # Example
/// ```rust
/// use nereval::{evaluate, Entity};
///
/// let y_true = vec![vec![Entity::new("a", "b", 0), Entity::new("b", "b", 2)]];
/// let y_pred = vec![vec![Entity::new("b", "b", 2)]];
/// let score: f64 = evaluate(&y_true, &y_pred).unwrap();
/// assert_eq!(score, 0.6666666666666666);
/// ```
pub fn evaluate<F: Float>(
    y_true: &[Vec<Entity>],
    y_pred: &[Vec<Entity>],
) -> Result<F, InconsistentLengthError> {
    if y_true.len() != y_pred.len() {
        return Err(InconsistentLengthError(y_true.len(), y_pred.len()));
    }
    let mut counts = MatchCounts::default();
    for (truth, pred) in y_true.iter().zip(y_pred) {
        counts.tally(truth, pred);
    }
    Ok(counts.fscore())
}

/// Compares two models document by document for a paired sign test. Every document is scored as a
/// one-document dataset for each model and the two F1 scores are compared: a strictly higher
/// score for model A counts one `better` document, a strictly lower score one `worse` document
/// and ties count neither. The counts `(better, worse)` feed a binomial test performed by the
/// caller.
///
/// The three sequences are iterated pairwise and iteration stops at the shortest one.
pub fn sign_test(
    truth: &[Vec<Entity>],
    model_a: &[Vec<Entity>],
    model_b: &[Vec<Entity>],
) -> (usize, usize) {
    let mut better = 0;
    let mut worse = 0;
    for (t, a, b) in multizip((truth, model_a, model_b)) {
        let score_a: f64 = MatchCounts::of_document(t, a).fscore();
        let score_b: f64 = MatchCounts::of_document(t, b).fscore();
        if score_a > score_b {
            better += 1;
        } else if score_a < score_b {
            worse += 1;
        }
    }
    (better, worse)
}

#[derive(Debug, Default, Clone, Copy)]
struct ClassTally {
    counts: MatchCounts,
    support: usize,
}

impl ClassTally {
    fn record_truth(&mut self, text_match: bool, type_match: bool) {
        self.counts.correct += usize::from(text_match) + usize::from(type_match);
        self.counts.possible += 2;
        self.support += 1;
    }

    fn record_prediction(&mut self) {
        self.counts.actual += 2;
    }
}

/// Evaluates a whole dataset and breaks the counts down by tag, returning a `Reporter` with one
/// row per tag and an overall micro-averaged row equal to the result of [`evaluate`].
///
/// The credits a truth entity earns are attributed to the tag of the truth entity, even on the
/// tag-agnostic text axis, and the credit units a prediction offers are attributed to the tag of
/// the prediction. The per-tag counts therefore sum exactly to the overall counts. `support` is
/// the number of ground-truth entities carrying the tag.
pub fn classification_report(
    y_true: &[Vec<Entity>],
    y_pred: &[Vec<Entity>],
) -> Result<Reporter, InconsistentLengthError> {
    if y_true.len() != y_pred.len() {
        return Err(InconsistentLengthError(y_true.len(), y_pred.len()));
    }
    let mut tallies: AHashMap<String, ClassTally> = AHashMap::with_hasher(RandomState::new());
    for (truth, pred) in y_true.iter().zip(y_pred) {
        for x in truth {
            let (text_match, type_match) = match_credits(x, pred);
            match tallies.get_mut(x.tag.as_ref()) {
                Some(tally) => tally.record_truth(text_match, type_match),
                None => {
                    let mut tally = ClassTally::default();
                    tally.record_truth(text_match, type_match);
                    tallies.insert(x.tag.to_string(), tally);
                }
            }
        }
        for y in pred {
            match tallies.get_mut(y.tag.as_ref()) {
                Some(tally) => tally.record_prediction(),
                None => {
                    let mut tally = ClassTally::default();
                    tally.record_prediction();
                    tallies.insert(y.tag.to_string(), tally);
                }
            }
        }
    }
    let mut reporter = Reporter::default();
    let mut overall = MatchCounts::default();
    let mut total_support = 0;
    for (tag, tally) in tallies {
        overall.merge(&tally.counts);
        total_support += tally.support;
        reporter.insert(ClassMetricsInner {
            class: tag,
            average: Average::None,
            precision: precision(tally.counts.correct, tally.counts.actual),
            recall: recall(tally.counts.correct, tally.counts.possible),
            fscore: tally.counts.fscore(),
            support: tally.support,
        });
    }
    reporter.insert(ClassMetricsInner::new_overall(
        precision(overall.correct, overall.actual),
        recall(overall.correct, overall.possible),
        overall.fscore(),
        total_support,
    ));
    Ok(reporter)
}
