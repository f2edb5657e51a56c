// Adapters layer: concrete implementations for external collaborators.

pub mod ocr;

pub use ocr::CommandTextExtractor;
