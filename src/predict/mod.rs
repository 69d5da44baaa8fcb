pub mod predictor;

pub use predictor::{decode, predict, Prediction};
