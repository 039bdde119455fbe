//! # Tenglish Predict
//!
//! Next-word prediction over the notes corpus.
//!
//! A separate Random-Indexing variant from the note-indexing path:
//! trained in one batch pass over every note, with fixed per-word
//! signatures, direction-encoding rotation, and centroid removal.
//! Those steps need the whole corpus at once, which is why prediction
//! is a retrain-on-demand model rather than an incremental index.

mod error;
mod predictor;
mod trainer;

pub use error::{PredictError, Result};
pub use trainer::{PredictionModel, TrainerConfig};
