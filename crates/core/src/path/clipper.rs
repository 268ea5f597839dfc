//! Intersection of clip paths.
//!
//! Both operands are flattened to polygons, every edge is split at the
//! points where it meets another edge, and each resulting sub-edge is kept
//! if the region inside both polygons lies on exactly one of its sides.
//! Kept edges are oriented with the interior on their left and chained into
//! closed contours, so the result describes the same region under either
//! winding rule.

use ordered_float::OrderedFloat;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::builder::{GraphicsPath, WindingRule};
use crate::utils::{EPSILON, Point, point_eq};

/// Parameter tolerance when locating intersection points on an edge.
const T_EPSILON: f64 = 1e-9;

/// Grid points are snapped to when comparing vertices.
const SNAP_SCALE: f64 = 1e7;

type VertexKey = (OrderedFloat<f64>, OrderedFloat<f64>);

fn vertex_key(p: Point) -> VertexKey {
    let snap = |v: f64| OrderedFloat((v * SNAP_SCALE).round() / SNAP_SCALE);
    (snap(p.0), snap(p.1))
}

#[inline]
fn sub(a: Point, b: Point) -> Point {
    (a.0 - b.0, a.1 - b.1)
}

#[inline]
fn cross(a: Point, b: Point) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

#[inline]
fn dot(a: Point, b: Point) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

#[inline]
fn norm(a: Point) -> f64 {
    a.0.hypot(a.1)
}

/// A flattened path together with the rule deciding its interior.
struct Polygon {
    contours: Vec<Vec<Point>>,
    rule: WindingRule,
}

impl Polygon {
    fn new(path: &GraphicsPath, tolerance: f64) -> Self {
        let contours = path
            .flatten(tolerance)
            .into_iter()
            .filter_map(|mut contour| {
                contour.dedup_by(|a, b| point_eq(*a, *b));
                if contour.len() > 1 && point_eq(contour[0], contour[contour.len() - 1]) {
                    contour.pop();
                }
                (contour.len() > 2).then_some(contour)
            })
            .collect();
        Self {
            contours,
            rule: path.winding_rule(),
        }
    }

    fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Edges of all contours, including the implicit closing edges.
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.contours.iter().flat_map(|c| {
            c.iter()
                .zip(c.iter().cycle().skip(1))
                .map(|(a, b)| (*a, *b))
        })
    }

    fn winding_number(&self, p: Point) -> i32 {
        let mut winding = 0;
        for (a, b) in self.edges() {
            let side = cross(sub(b, a), sub(p, a));
            if a.1 <= p.1 {
                if b.1 > p.1 && side > 0.0 {
                    winding += 1;
                }
            } else if b.1 <= p.1 && side < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    fn contains(&self, p: Point) -> bool {
        self.rule.contains(self.winding_number(p))
    }
}

/// Points where two edges meet. Collinear overlapping edges yield the
/// endpoints of each edge that lie inside the other one.
fn edge_intersections(e1: (Point, Point), e2: (Point, Point)) -> SmallVec<[Point; 2]> {
    let mut points = SmallVec::new();
    let (p, q) = e1;
    let (r, s) = e2;
    let d1 = sub(q, p);
    let d2 = sub(s, r);
    let len1 = norm(d1);
    let len2 = norm(d2);
    let denom = cross(d1, d2);
    if denom.abs() > 1e-12 * len1 * len2 {
        let w = sub(r, p);
        let t = cross(w, d2) / denom;
        let u = cross(w, d1) / denom;
        let range = -T_EPSILON..=1.0 + T_EPSILON;
        if range.contains(&t) && range.contains(&u) {
            // prefer existing vertices over computed points
            let point = if t.abs() <= T_EPSILON {
                p
            } else if (1.0 - t).abs() <= T_EPSILON {
                q
            } else if u.abs() <= T_EPSILON {
                r
            } else if (1.0 - u).abs() <= T_EPSILON {
                s
            } else {
                (p.0 + t * d1.0, p.1 + t * d1.1)
            };
            points.push(point);
        }
    } else if cross(sub(r, p), d1).abs() <= 1e-9 * len1 {
        let inside = |pt: Point, origin: Point, dir: Point, len: f64| {
            let t = dot(sub(pt, origin), dir) / (len * len);
            t > T_EPSILON && t < 1.0 - T_EPSILON
        };
        for pt in [r, s] {
            if inside(pt, p, d1, len1) {
                points.push(pt);
            }
        }
        for pt in [p, q] {
            if inside(pt, r, d2, len2) {
                points.push(pt);
            }
        }
    }
    points
}

/// Removes vertices lying on the straight line between their neighbours.
fn merge_collinear(mut points: Vec<Point>) -> Vec<Point> {
    let mut i = 0;
    while points.len() >= 3 && i < points.len() {
        let n = points.len();
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let d1 = sub(cur, prev);
        let d2 = sub(next, cur);
        let limit = 1e-9 * (norm(d1) * norm(d2)).max(EPSILON);
        if cross(d1, d2).abs() <= limit && dot(d1, d2) >= 0.0 {
            points.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
    points
}

/// Computes intersections of closed paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathIntersector {
    /// Maximum deviation of the polygons curves are flattened to
    tolerance: f64,
}

impl Default for PathIntersector {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl PathIntersector {
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Returns the region inside both `a` and `b`.
    ///
    /// Each operand is evaluated under its own winding rule; the result
    /// carries `rule`. Open subpaths are treated as closed. The result is
    /// empty if the operands don't overlap.
    pub fn intersect(&self, a: &GraphicsPath, b: &GraphicsPath, rule: WindingRule) -> GraphicsPath {
        let mut result = GraphicsPath::with_winding_rule(rule);
        let pa = Polygon::new(a, self.tolerance);
        let pb = Polygon::new(b, self.tolerance);
        if pa.is_empty() || pb.is_empty() {
            return result;
        }

        let edges: Vec<(Point, Point)> = pa
            .edges()
            .chain(pb.edges())
            .filter(|(p, q)| !point_eq(*p, *q))
            .collect();
        let mut splits: Vec<Vec<Point>> = edges.iter().map(|(p, q)| vec![*p, *q]).collect();
        for i in 0..edges.len() {
            for j in i + 1..edges.len() {
                for point in edge_intersections(edges[i], edges[j]) {
                    splits[i].push(point);
                    splits[j].push(point);
                }
            }
        }

        let mut kept: Vec<(Point, Point)> = Vec::new();
        let mut seen: FxHashSet<(VertexKey, VertexKey)> = FxHashSet::default();
        for (&(p, q), points) in edges.iter().zip(splits.iter_mut()) {
            let dir = sub(q, p);
            let len_sq = dot(dir, dir);
            points.sort_by(|u, v| {
                let tu = dot(sub(*u, p), dir) / len_sq;
                let tv = dot(sub(*v, p), dir) / len_sq;
                tu.total_cmp(&tv)
            });
            points.dedup_by(|u, v| vertex_key(*u) == vertex_key(*v));
            for pair in points.windows(2) {
                let (s, e) = (pair[0], pair[1]);
                let d = sub(e, s);
                let len = norm(d);
                if len <= EPSILON {
                    continue;
                }
                let offset = (len * 1e-3).clamp(1e-9, 1e-4);
                let normal = (-d.1 / len * offset, d.0 / len * offset);
                let mid = ((s.0 + e.0) / 2.0, (s.1 + e.1) / 2.0);
                let left = (mid.0 + normal.0, mid.1 + normal.1);
                let right = (mid.0 - normal.0, mid.1 - normal.1);
                let inside_left = pa.contains(left) && pb.contains(left);
                let inside_right = pa.contains(right) && pb.contains(right);
                let edge = match (inside_left, inside_right) {
                    (true, false) => (s, e),
                    (false, true) => (e, s),
                    _ => continue,
                };
                if seen.insert((vertex_key(edge.0), vertex_key(edge.1))) {
                    kept.push(edge);
                }
            }
        }

        let mut outgoing: FxHashMap<VertexKey, Vec<usize>> = FxHashMap::default();
        for (i, (s, _)) in kept.iter().enumerate() {
            outgoing.entry(vertex_key(*s)).or_default().push(i);
        }
        let mut used = vec![false; kept.len()];
        for first in 0..kept.len() {
            if used[first] {
                continue;
            }
            used[first] = true;
            let start_key = vertex_key(kept[first].0);
            let mut contour = vec![kept[first].0];
            let mut current = kept[first].1;
            while vertex_key(current) != start_key {
                contour.push(current);
                let next = outgoing
                    .get(&vertex_key(current))
                    .and_then(|ids| ids.iter().copied().find(|&id| !used[id]));
                match next {
                    Some(id) => {
                        used[id] = true;
                        current = kept[id].1;
                    }
                    None => break,
                }
            }
            let contour = merge_collinear(contour);
            if let Some((head, tail)) = contour.split_first()
                && tail.len() >= 2
            {
                result.move_to(head.0, head.1);
                for p in tail {
                    result.line_to(p.0, p.1);
                }
                result.close_path();
            }
        }
        result
    }
}
