//! Signal-processing pipeline: FFT analysis, magnitude scaling, and
//! temporal smoothing of bar heights.

pub mod analyzer;
pub mod pipeline;
pub mod scale;
pub mod smooth;

pub use analyzer::SpectralAnalyzer;
pub use pipeline::{SpectrumPipeline, StepOutput};
pub use scale::scale_spectrum;
pub use smooth::{blend, FrameAccumulator, Smoother};
