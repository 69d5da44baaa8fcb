use crate::data::label::ClassLabel;
use crate::error::{Error, Result};
use crate::train::classifier::Classifier;

/// The winning class for one input, with the scores it was chosen from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class: ClassLabel,
    pub index: usize,
    pub scores: Vec<f64>,
}

/// Scores `features` with `model` and decodes the highest score.
pub fn predict<C: Classifier + ?Sized>(model: &mut C, features: &[f64]) -> Result<Prediction> {
    let scores = model.score(features)?;
    decode(scores)
}

/// Maps a score vector to its class: index of the maximum, first one on ties.
pub fn decode(scores: Vec<f64>) -> Result<Prediction> {
    if scores.len() != ClassLabel::COUNT {
        return Err(Error::Prediction(format!(
            "expected {} scores, got {}",
            ClassLabel::COUNT,
            scores.len()
        )));
    }
    if scores.iter().any(|s| s.is_nan()) {
        return Err(Error::Prediction(format!("scores contain NaN: {:?}", scores)));
    }

    let index = argmax(&scores);
    let class = ClassLabel::from_index(index)
        .ok_or_else(|| Error::Prediction(format!("no class at index {index}")))?;
    Ok(Prediction { class, index, scores })
}

/// Index of the maximum element in a slice; the earliest index wins ties.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &x)| {
            if x > best { (i, x) } else { (best_i, best) }
        })
        .0
}
