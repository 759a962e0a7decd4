use std::f64::consts::PI;

use tracing::debug;

use crate::geometry::curve::Segment;
use crate::math::angle::angle_between;
use crate::math::tolerance::almost_equal;
use crate::math::{Point3, ANGLE_TOLERANCE_MERGE, ROOF_TOLERANCE};
use crate::topology::EdgeCurve;

use super::EdgeInfo;

/// Merges classified edges that are collinear fragments of one line.
///
/// A pair merges when both are straight, share a line type, are not the same
/// curve, run parallel (either sense) and touch or overlap. The merged edge
/// spans the pair's farthest endpoints and carries the union of their
/// underlying edges and relations. Pairs are merged until none is left, so
/// the result is a fixed point.
pub(crate) fn merge_collinear(mut infos: Vec<EdgeInfo>) -> Vec<EdgeInfo> {
    while let Some((i, j, curve)) = find_pair(&infos) {
        // j > i, so removing j first keeps i valid.
        let second = infos.remove(j);
        let first = infos.remove(i);
        debug!(
            line_type = ?first.line_type,
            length = curve.length(),
            "merged collinear edge fragments"
        );

        let curve = EdgeCurve::Segment(curve);
        if let Some(existing) = infos.iter_mut().find(|e| e.curve.almost_equal(&curve)) {
            absorb(existing, &first);
            absorb(existing, &second);
            continue;
        }

        let mut merged = EdgeInfo {
            edges: Vec::new(),
            curve,
            related_ridge_eaves: Vec::new(),
            related_panel_faces: Vec::new(),
            ..first.clone()
        };
        absorb(&mut merged, &first);
        absorb(&mut merged, &second);
        infos.push(merged);
    }
    infos
}

fn find_pair(infos: &[EdgeInfo]) -> Option<(usize, usize, Segment)> {
    for (i, a) in infos.iter().enumerate() {
        for (j, b) in infos.iter().enumerate().skip(i + 1) {
            if !mergeable(a, b) {
                continue;
            }
            if let Some(span) = spanning_segment(a, b) {
                return Some((i, j, span));
            }
        }
    }
    None
}

fn mergeable(a: &EdgeInfo, b: &EdgeInfo) -> bool {
    if a.line_type != b.line_type || a.curve.almost_equal(&b.curve) {
        return false;
    }
    let (Some(sa), Some(sb)) = (a.curve.as_segment(), b.curve.as_segment()) else {
        return false;
    };
    let Some(angle) = angle_between(&sa.direction(), &sb.direction()) else {
        return false;
    };
    if !almost_equal(angle, 0.0, ANGLE_TOLERANCE_MERGE) && !almost_equal(angle, PI, ANGLE_TOLERANCE_MERGE) {
        return false;
    }
    collinear_and_touching(sa, sb)
}

/// Whether `b` lies on `a`'s line and the two share at least one point.
fn collinear_and_touching(a: &Segment, b: &Segment) -> bool {
    let on_line = |p: &Point3| (a.project_unbound(p) - p).norm() <= ROOF_TOLERANCE;
    if !on_line(b.start()) || !on_line(b.end()) {
        return false;
    }
    let dir = a.direction();
    let t0 = (b.start() - a.start()).dot(&dir);
    let t1 = (b.end() - a.start()).dot(&dir);
    let (lo, hi) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
    lo <= a.length() + ROOF_TOLERANCE && hi >= -ROOF_TOLERANCE
}

/// Segment between the most distant endpoint pair of two curves.
fn spanning_segment(a: &EdgeInfo, b: &EdgeInfo) -> Option<Segment> {
    let mut best = None;
    let mut max = f64::MIN;
    for i in 0..2 {
        let p = a.curve.endpoint(i);
        for j in 0..2 {
            let q = b.curve.endpoint(j);
            let d = (q - p).norm();
            if d > max {
                max = d;
                best = Some((p, q));
            }
        }
    }
    let (p, q) = best?;
    Segment::new(p, q).ok()
}

fn absorb(target: &mut EdgeInfo, source: &EdgeInfo) {
    for &edge in &source.edges {
        if !target.edges.contains(&edge) {
            target.edges.push(edge);
        }
    }
    for &eave in &source.related_ridge_eaves {
        if !target.related_ridge_eaves.contains(&eave) {
            target.related_ridge_eaves.push(eave);
        }
    }
    for &face in &source.related_panel_faces {
        if !target.related_panel_faces.contains(&face) {
            target.related_panel_faces.push(face);
        }
    }
}
