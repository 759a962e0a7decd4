use crate::error::Result;
use crate::math::tolerance::almost_equal_default;
use crate::roof::Roof;
use crate::topology::{EdgeCurve, FaceSide};

use super::classify_roof::ClassifyRoof;
use super::EdgeInfo;

/// Maps an edge picked on one skin to its counterpart on another.
///
/// Users pick edges on the top skin while the layout runs on the bottom
/// one; the counterpart is the classified straight edge with the same
/// length, a parallel direction and the nearest midpoint.
pub struct MostSimilarEdge<'a> {
    roof: &'a Roof,
    side: FaceSide,
}

impl<'a> MostSimilarEdge<'a> {
    /// Creates a new `MostSimilarEdge` operation looking on `side`.
    #[must_use]
    pub fn new(roof: &'a Roof, side: FaceSide) -> Self {
        Self { roof, side }
    }

    /// Classifies the skin and returns the counterpart of `picked`, with its
    /// relations filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the roof's topology references missing entities.
    pub fn execute(&self, picked: &EdgeCurve) -> Result<Option<EdgeInfo>> {
        let infos = ClassifyRoof::new(self.roof, self.side).execute()?;
        Ok(Self::among(picked, &infos).cloned())
    }

    /// The classified edge of `infos` most similar to `picked`.
    ///
    /// Only straight curves are compared; `None` for a curved pick or when
    /// no edge has the same length and direction.
    #[must_use]
    pub fn among<'e>(picked: &EdgeCurve, infos: &'e [EdgeInfo]) -> Option<&'e EdgeInfo> {
        let picked = picked.as_segment()?;
        let dir = picked.direction();
        let mid = picked.midpoint();
        infos
            .iter()
            .filter_map(|info| {
                let candidate = info.curve.as_segment()?;
                if !almost_equal_default(candidate.length(), picked.length())
                    || !almost_equal_default(candidate.direction().dot(&dir).abs(), 1.0)
                {
                    return None;
                }
                Some((info, (candidate.midpoint() - mid).norm()))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(info, _)| info)
    }
}
