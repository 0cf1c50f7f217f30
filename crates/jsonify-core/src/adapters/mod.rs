//! Dependent tool adapters
//!
//! Each adapter derives its view from a [`DocumentSnapshot`](crate::store::DocumentSnapshot)
//! without owning the document. The converter, scanner, and explainer each
//! make one round trip to the model service and keep their result in a
//! private latest-result-wins slot; the performance analyzer
//! ([`crate::analyzer`]) is the pure, synchronous fourth adapter.

pub mod converter;
pub mod explainer;
pub mod scanner;

pub use converter::{ConversionResult, Converter};
pub use explainer::ErrorExplainer;
pub use scanner::SecurityScanner;
