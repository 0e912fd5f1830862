use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::random::RandomSource;
use super::{Sample, SampleProvider};

pub const SIDE: usize = 28;
pub const PIXELS: usize = SIDE * SIDE;
pub const CLASSES: usize = 10;

/// Handwritten digits stored as raw bytes: the image file is a run of 28×28 greyscale
/// blocks, the label file one byte (0-9) per image.  No header in either file.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitDataset {
    images: Vec<Vec<u8>>,
    labels: Vec<u8>,
}

/// One dataset entry as exchanged with the demo front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitEntry {
    #[serde(rename = "Image")]
    pub image: Vec<u8>,
    #[serde(rename = "Label")]
    pub label: u8,
}

impl DigitDataset {
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(images_path: P, labels_path: Q) -> Result<DigitDataset> {
        let images = fs::read(images_path.as_ref())?;
        let labels = fs::read(labels_path.as_ref())?;
        let dataset = DigitDataset::from_bytes(&images, &labels)?;
        info!("loaded {} digit images from {}", dataset.len(), images_path.as_ref().display());
        Ok(dataset)
    }

    pub fn from_bytes(image_bytes: &[u8], label_bytes: &[u8]) -> Result<DigitDataset> {
        let tail = image_bytes.len() % PIXELS;
        if tail != 0 {
            warn!("ignoring {tail} trailing bytes after the last full image");
        }
        let images: Vec<Vec<u8>> = image_bytes.chunks_exact(PIXELS).map(<[u8]>::to_vec).collect();

        if images.is_empty() {
            return Err(NetError::Dataset("no complete images".into()));
        }
        if images.len() != label_bytes.len() {
            return Err(NetError::Dataset(format!(
                "{} images but {} labels",
                images.len(),
                label_bytes.len()
            )));
        }
        if let Some((i, &l)) = label_bytes.iter().enumerate().find(|(_, &l)| l as usize >= CLASSES) {
            return Err(NetError::Dataset(format!("label {l} at index {i} is not a digit")));
        }

        Ok(DigitDataset {
            images,
            labels: label_bytes.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<DigitEntry> {
        Some(DigitEntry {
            image: self.images.get(index)?.clone(),
            label: *self.labels.get(index)?,
        })
    }

    /// Flattened row-major pixels and a one-hot target.  Pixels are divided by 255
    /// when `normalize` is set, otherwise passed through as 0-255.
    pub fn sample_at(&self, index: usize, normalize: bool) -> Option<Sample> {
        (index < self.len()).then(|| self.sample_in_range(index, normalize))
    }

    /// `index` must be below `len()`.
    fn sample_in_range(&self, index: usize, normalize: bool) -> Sample {
        let image = &self.images[index];
        let label = self.labels[index] as usize;
        let scale = if normalize { 1.0 / 255.0 } else { 1.0 };
        let input = image.iter().map(|&p| p as f64 * scale).collect();
        let mut target = vec![0.0; CLASSES];
        target[label] = 1.0;
        Sample::new(input, target)
    }
}

/// Draws uniformly random entries from a borrowed [`DigitDataset`].
#[derive(Debug)]
pub struct DigitSampler<'a> {
    dataset: &'a DigitDataset,
    rng: RandomSource,
    normalize: bool,
}

impl<'a> DigitSampler<'a> {
    pub fn new(dataset: &'a DigitDataset, rng: RandomSource) -> DigitSampler<'a> {
        DigitSampler { dataset, rng, normalize: true }
    }

    pub fn raw_pixels(mut self) -> DigitSampler<'a> {
        self.normalize = false;
        self
    }
}

impl SampleProvider for DigitSampler<'_> {
    fn sample(&mut self) -> Sample {
        // loading rejects empty datasets, so the drawn index is always in range
        let index = self.rng.index(self.dataset.len());
        self.dataset.sample_in_range(index, self.normalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(n: usize) -> (Vec<u8>, Vec<u8>) {
        let images = (0..n).flat_map(|i| vec![i as u8 * 10; PIXELS]).collect();
        let labels = (0..n).map(|i| (i % CLASSES) as u8).collect();
        (images, labels)
    }

    #[test]
    fn parses_images_and_labels() {
        let (images, labels) = bytes(3);
        let ds = DigitDataset::from_bytes(&images, &labels).unwrap();
        assert_eq!(ds.len(), 3);
        let entry = ds.entry(2).unwrap();
        assert_eq!(entry.label, 2);
        assert_eq!(entry.image.len(), PIXELS);
        assert!(entry.image.iter().all(|&p| p == 20));
        assert!(ds.entry(3).is_none());
    }

    #[test]
    fn samples_are_one_hot_and_scaled() {
        let (images, labels) = bytes(2);
        let ds = DigitDataset::from_bytes(&images, &labels).unwrap();
        let s = ds.sample_at(1, true).unwrap();
        assert_eq!(s.target, vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((s.input[0] - 10.0 / 255.0).abs() < 1e-12);
        assert_eq!(ds.sample_at(1, false).unwrap().input[0], 10.0);
        assert!(ds.sample_at(2, true).is_none());
    }

    #[test]
    fn trailing_partial_image_is_ignored() {
        let (mut images, labels) = bytes(2);
        images.extend_from_slice(&[1, 2, 3]);
        assert_eq!(DigitDataset::from_bytes(&images, &labels).unwrap().len(), 2);
    }

    #[test]
    fn mismatched_counts_and_bad_labels_fail() {
        let (images, mut labels) = bytes(2);
        assert!(matches!(DigitDataset::from_bytes(&images, &labels[..1]), Err(NetError::Dataset(_))));
        labels[0] = 12;
        assert!(matches!(DigitDataset::from_bytes(&images, &labels), Err(NetError::Dataset(_))));
        assert!(matches!(DigitDataset::from_bytes(&[], &[]), Err(NetError::Dataset(_))));
    }

    #[test]
    fn sampler_draws_valid_entries() {
        let (images, labels) = bytes(5);
        let ds = DigitDataset::from_bytes(&images, &labels).unwrap();
        let mut sampler = DigitSampler::new(&ds, RandomSource::seeded(3)).raw_pixels();
        for _ in 0..50 {
            let s = sampler.sample();
            let label = crate::samples::argmax(&s.target);
            assert_eq!(s.input[0], label as f64 * 10.0);
        }
    }

    #[test]
    fn entry_json_uses_front_end_field_names() {
        let entry = DigitEntry { image: vec![0, 255], label: 7 };
        assert_eq!(serde_json::to_string(&entry).unwrap(), r#"{"Image":[0,255],"Label":7}"#);
    }
}
