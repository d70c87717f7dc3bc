// Image classification: trait-based abstraction for swappable providers.
//
// The ImageClassifier trait defines the interface. SightengineClassifier
// implements it against the Sightengine check endpoint. Tests (and a
// future second provider) implement the trait in-process without touching
// the rest of the pipeline.

pub mod sightengine;
pub mod traits;

pub use sightengine::SightengineClassifier;
pub use traits::ImageClassifier;
