//! Hand-off of frequency maps to tag-cloud renderers.

use serde::Serialize;
use symdex_common::{Result, error::Error};

use super::TextSubset;
use crate::{index::SymbolIndex, level::Level};

/// Consumes `(symbol, count)` pairs and produces a rendering.
pub trait CloudRenderer {
    type Output;

    fn render(&self, weights: &[(String, u64)]) -> Result<Self::Output>;
}

/// One entry of a [`WeightedCloud`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudTag {
    pub symbol: String,
    pub count: u64,
    /// Size class in `1..=classes`, larger for more frequent symbols.
    pub class: u32,
}

/// Buckets counts into size classes on a logarithmic scale.
///
/// The least frequent symbol gets class 1 and the most frequent gets
/// `classes`. When all counts are equal every tag gets class 1.
#[derive(Debug, Clone, Copy)]
pub struct WeightedCloud {
    classes: u32,
}

impl WeightedCloud {
    pub fn new(classes: u32) -> Result<WeightedCloud> {
        if classes == 0 {
            return Err(Error::invalid_arg("classes", "at least one class is required"));
        }
        Ok(WeightedCloud { classes })
    }

    pub fn classes(&self) -> u32 {
        self.classes
    }

    fn class_of(&self, count: u64, min: f64, span: f64) -> u32 {
        if span <= 0.0 {
            return 1;
        }
        let ratio = ((count as f64).ln() - min) / span;
        1 + (ratio * (self.classes - 1) as f64).round() as u32
    }
}

impl Default for WeightedCloud {
    fn default() -> Self {
        WeightedCloud { classes: 6 }
    }
}

impl CloudRenderer for WeightedCloud {
    type Output = Vec<CloudTag>;

    fn render(&self, weights: &[(String, u64)]) -> Result<Vec<CloudTag>> {
        let counts = weights.iter().map(|(_, count)| *count).filter(|&c| c > 0);
        let (Some(min), Some(max)) = (counts.clone().min(), counts.max()) else {
            return Ok(Vec::new());
        };
        let min = (min as f64).ln();
        let span = (max as f64).ln() - min;

        let mut tags: Vec<CloudTag> = weights
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(symbol, count)| CloudTag {
                symbol: symbol.clone(),
                count: *count,
                class: self.class_of(*count, min, span),
            })
            .collect();
        tags.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(tags)
    }
}

impl SymbolIndex {
    /// Computes the frequencies at `target` and hands them to `renderer`.
    pub fn cloud<R: CloudRenderer>(
        &self,
        subset: &TextSubset,
        target: Level,
        renderer: &R,
    ) -> Result<R::Output> {
        let weights = self.export(subset, target)?;
        renderer.render(&weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|&(s, n)| (s.to_owned(), n)).collect()
    }

    #[test]
    fn test_classes_span_the_range() {
        let cloud = WeightedCloud::new(3).unwrap();
        let tags = cloud
            .render(&weights(&[("rare", 1), ("mid", 10), ("common", 100)]))
            .unwrap();
        let classes: Vec<(&str, u32)> = tags.iter().map(|t| (t.symbol.as_str(), t.class)).collect();
        assert_eq!(classes, vec![("common", 3), ("mid", 2), ("rare", 1)]);
    }

    #[test]
    fn test_equal_counts() {
        let tags = WeightedCloud::default()
            .render(&weights(&[("a", 4), ("b", 4)]))
            .unwrap();
        assert!(tags.iter().all(|t| t.class == 1));
    }

    #[test]
    fn test_empty_and_invalid() {
        assert!(WeightedCloud::default().render(&[]).unwrap().is_empty());
        assert!(WeightedCloud::new(0).is_err());
    }
}
