/*!
This library scores named-entity-recognition predictions against a ground truth with the partial
credit matching scheme of the MUC evaluations. It was built for comparing sequence models whose
outputs rarely line up perfectly with the annotation: a prediction is rewarded separately for
finding the right characters and for finding the right category, so nearly-right predictions
still earn part of the score.

# Matching scheme
Every ground-truth entity can be recaptured on two independent axes:
* **text**: a prediction has exactly the same surface form at exactly the same offset. The tag
    plays no role on this axis.
* **type**: a prediction carries the same tag and its span overlaps the truth span. Exact
    boundaries are not required, but touching spans do not overlap.

For a given truth entity, the predictions are scanned in their original order and the first one
recognized by either axis settles both axes at once; later predictions are never considered for
that entity. Each axis is worth one credit unit, each truth entity offers two possible units and
each predicted entity offers two actual units. Precision, recall and the F1 score are computed
from the unit counts summed over the whole dataset, making the final score a micro-average.

# Terminology
* An entity is a labeled span of text: a surface form, a tag (such as `LOC`, `PER` or
    `Productname`) and a starting character offset.
* A document pairs the ground-truth entities of one text with the entities a model predicted for
    the same text.
* A dataset is two lists of documents of equal length, `y_true[i]` corresponding to `y_pred[i]`.

# Example
```rust
use nereval::{evaluate, Entity};

let y_true = vec![vec![
    Entity::new("CILINDRISCHE PLUG", "Productname", 0),
    Entity::new("DIN908", "Productname", 18),
    Entity::new("M10X1", "Dimension", 25),
]];
let y_pred = vec![vec![
    Entity::new("CILINDRISCHE", "Productname", 0),
    Entity::new("PLUG", "Productname", 13),
    Entity::new("DIN908", "Productname", 18),
    Entity::new("M10X1", "Productname", 25),
    Entity::new("foo", "Productname", 35),
]];

let score: f64 = evaluate(&y_true, &y_pred).unwrap();
assert_eq!(score, 0.5);
```

Result files produced by a model can also be scored directly from disk with [`evaluate_json`],
and [`classification_report`] breaks the same counts down by tag.
*/

mod dataset;
mod entity;
mod metrics;
mod reporter;

// The public api starts here
pub use entity::Entity;

pub use metrics::{
    classification_report, correct_text, correct_type, count_correct, evaluate, f1, has_overlap,
    precision, recall, sign_test, InconsistentLengthError,
};

pub use reporter::{Average, ClassMetrics, Reporter};

pub use dataset::{evaluate_json, parse_json, DatasetError, Instance};
