mod resample;
mod sample_spline;
mod segment_frames;

pub use resample::EqualDistanceResample;
pub use sample_spline::SampleSpline;
pub use segment_frames::{twisted_normal, SegmentFrames};
