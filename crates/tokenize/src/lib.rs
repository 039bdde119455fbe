//! # Tenglish Tokenize
//!
//! Input normalization and script-based language partitioning for
//! code-mixed Telugu-English text.
//!
//! ## Pipeline
//!
//! ```text
//! Raw text
//!     │
//!     ├──> normalize_input (trim, collapse whitespace, strip controls)
//!     │      └─> clean text
//!     │
//!     └──> tokenize + partition
//!            ├─> Latin bucket (ASCII tokens, case-folded)
//!            └─> Other bucket (everything else, unmodified)
//! ```
//!
//! The partition is a script heuristic, not language identification:
//! a token is `Latin` iff every character's code point is below 128.

mod normalize;
mod partition;

pub use normalize::{normalize_input, tokenize};
pub use partition::{partition, Partition, Script};
