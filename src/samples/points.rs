use crate::random::RandomSource;
use super::{Sample, SampleProvider};

/// 2D region task: is `x + y` within `[-band, band]`?
///
/// Points are drawn uniformly from `[-extent, extent)²`.  The target is one-hot:
/// `[1, 0]` inside the band, `[0, 1]` outside.
#[derive(Debug, Clone)]
pub struct PointRegion {
    rng: RandomSource,
    extent: f64,
    band: f64,
}

impl PointRegion {
    pub const INPUTS: usize = 2;
    pub const OUTPUTS: usize = 2;

    pub fn new(rng: RandomSource) -> PointRegion {
        PointRegion { rng, extent: 10.0, band: 5.0 }
    }

    pub fn with_extent(mut self, extent: f64) -> PointRegion {
        self.extent = extent;
        self
    }

    pub fn with_band(mut self, band: f64) -> PointRegion {
        self.band = band;
        self
    }

    pub fn label(&self, x: f64, y: f64) -> Vec<f64> {
        if (-self.band..=self.band).contains(&(x + y)) {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        }
    }
}

impl SampleProvider for PointRegion {
    fn sample(&mut self) -> Sample {
        let x = self.rng.uniform_real(-self.extent, self.extent);
        let y = self.rng.uniform_real(-self.extent, self.extent);
        let target = self.label(x, y);
        Sample::new(vec![x, y], target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_inside() {
        let p = PointRegion::new(RandomSource::seeded(0));
        assert_eq!(p.label(2.5, 2.5), vec![1.0, 0.0]);
        assert_eq!(p.label(-5.0, 0.0), vec![1.0, 0.0]);
        assert_eq!(p.label(5.0, 0.1), vec![0.0, 1.0]);
        assert_eq!(p.label(-9.0, -9.0), vec![0.0, 1.0]);
    }

    #[test]
    fn samples_are_consistent_with_labels() {
        let mut p = PointRegion::new(RandomSource::seeded(12));
        let mut inside = 0;
        for _ in 0..1_000 {
            let s = p.sample();
            assert!(s.input.iter().all(|v| (-10.0..10.0).contains(v)));
            assert_eq!(s.target, p.label(s.input[0], s.input[1]));
            inside += (s.target[0] == 1.0) as usize;
        }
        // the band covers 7/16 of the square
        assert!((300..600).contains(&inside), "{inside}");
    }
}
