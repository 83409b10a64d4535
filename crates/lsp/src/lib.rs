//! Editor queries for robolang.
//!
//! Answers hover requests for label references in teach-pendant programs.
//! Every query is a pure function over an already-parsed, immutable tree,
//! so an integration layer may call them from any number of threads.

pub mod convert;
pub mod hover;

pub use hover::compute_label_hover;
