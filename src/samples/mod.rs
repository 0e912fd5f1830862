//! Sample providers: where `(input, target)` pairs come from.
//!
//! Trainers pull one [`Sample`] at a time through [`SampleProvider`].  Any
//! `FnMut() -> Sample` closure is a provider, and the demo tasks ship as
//! small context objects that own their own [`RandomSource`](crate::random::RandomSource).

pub mod digits;
pub mod points;

pub use digits::{DigitDataset, DigitSampler};
pub use points::PointRegion;

/// One labeled example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

/// Pull-based source of training examples.
pub trait SampleProvider {
    fn sample(&mut self) -> Sample;
}

impl<F> SampleProvider for F
where
    F: FnMut() -> Sample,
{
    fn sample(&mut self) -> Sample {
        self()
    }
}

/// Index of the largest element, first one on ties.  Empty slices give 0.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &x)| if x > bv { (i, x) } else { (bi, bv) })
        .0
}
