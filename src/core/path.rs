use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Ordered outline of a drawable shape in chart-local pixels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length of the polyline through all points.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }

    /// Resamples the outline to `count` points spaced at equal arc length.
    #[must_use]
    pub fn resample_uniform(&self, count: usize) -> Self {
        let Some(&first) = self.points.first() else {
            return Self::empty();
        };
        if count == 0 {
            return Self::empty();
        }
        let total = self.arc_length();
        if count == 1 || total == 0.0 {
            return Self::new(vec![first; count]);
        }

        let mut points = Vec::with_capacity(count);
        let mut segment = 0;
        let mut walked = 0.0;
        for index in 0..count {
            let target = total * index as f64 / (count - 1) as f64;
            while segment + 2 < self.points.len()
                && walked + self.points[segment].distance_to(self.points[segment + 1]) < target
            {
                walked += self.points[segment].distance_to(self.points[segment + 1]);
                segment += 1;
            }
            let start = self.points[segment];
            let end = self.points[(segment + 1).min(self.points.len() - 1)];
            let length = start.distance_to(end);
            let t = if length == 0.0 {
                0.0
            } else {
                ((target - walked) / length).clamp(0.0, 1.0)
            };
            points.push(start.lerp(end, t));
        }
        Self::new(points)
    }

    /// Grows the outline to `count` points by splitting its segments.
    ///
    /// Original vertices are kept; extra points go to segments in proportion
    /// to their length and sit evenly spaced inside each segment.
    #[must_use]
    pub fn extend_to(&self, count: usize) -> Self {
        let current = self.points.len();
        if current == 0 || count <= current {
            return self.clone();
        }
        if current == 1 {
            return Self::new(vec![self.points[0]; count]);
        }

        let inserts = distribute_inserts(&self.points, count - current);
        let mut points = Vec::with_capacity(count);
        points.push(self.points[0]);
        for (pair, extra) in self.points.windows(2).zip(inserts) {
            for step in 1..=extra {
                points.push(pair[0].lerp(pair[1], step as f64 / (extra + 1) as f64));
            }
            points.push(pair[1]);
        }
        Self::new(points)
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// How two outlines are brought to a common point count before blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Resampling {
    /// Split the shorter outline's segments until both have the larger count.
    #[default]
    ExtendToLongest,
    /// Resample both outlines to `resolution` points at equal arc length.
    Uniform { resolution: usize },
}

/// Blends two outlines that may differ in point count.
#[derive(Debug, Clone, PartialEq)]
pub struct PathInterpolator {
    from: Path,
    to: Path,
    resampled_from: Path,
    resampled_to: Path,
}

impl PathInterpolator {
    #[must_use]
    pub fn new(from: &Path, to: &Path, resampling: Resampling) -> Self {
        let (resampled_from, resampled_to) = if from.is_empty() || to.is_empty() {
            (Path::empty(), Path::empty())
        } else {
            match resampling {
                Resampling::ExtendToLongest => {
                    let count = from.len().max(to.len());
                    (from.extend_to(count), to.extend_to(count))
                }
                Resampling::Uniform { resolution } => {
                    let count = resolution.max(2);
                    (from.resample_uniform(count), to.resample_uniform(count))
                }
            }
        };

        Self {
            from: from.clone(),
            to: to.clone(),
            resampled_from,
            resampled_to,
        }
    }

    /// Common point count used for positions strictly between the ends.
    #[must_use]
    pub fn resampled_len(&self) -> usize {
        self.resampled_from.len()
    }

    #[must_use]
    pub fn resampled(&self) -> (&Path, &Path) {
        (&self.resampled_from, &self.resampled_to)
    }

    /// Outline at `position`; `0` and `1` return the input outlines themselves.
    #[must_use]
    pub fn at(&self, position: f64) -> Path {
        if self.resampled_from.is_empty() {
            return Path::empty();
        }
        if position == 0.0 {
            return self.from.clone();
        }
        if position == 1.0 {
            return self.to.clone();
        }

        self.resampled_from
            .points
            .iter()
            .zip(&self.resampled_to.points)
            .map(|(start, end)| start.lerp(*end, position))
            .collect::<Vec<_>>()
            .into()
    }
}

/// One-shot outline interpolation with the default resampling.
#[must_use]
pub fn interpolate_path(from: &Path, to: &Path, position: f64) -> Path {
    PathInterpolator::new(from, to, Resampling::default()).at(position)
}

fn distribute_inserts(points: &[Point], extra: usize) -> Vec<usize> {
    let lengths: Vec<f64> = points
        .windows(2)
        .map(|pair| pair[0].distance_to(pair[1]))
        .collect();
    let total: f64 = lengths.iter().sum();
    let segments = lengths.len();

    let shares: Vec<f64> = if total > 0.0 {
        lengths
            .iter()
            .map(|length| extra as f64 * length / total)
            .collect()
    } else {
        vec![extra as f64 / segments as f64; segments]
    };

    let mut inserts: Vec<usize> = shares.iter().map(|share| share.floor() as usize).collect();
    let mut remaining = extra - inserts.iter().sum::<usize>();

    // Largest remainder first; ties keep segment order.
    let mut order: Vec<usize> = (0..segments).collect();
    order.sort_by(|left, right| {
        let left_rem = shares[*left] - shares[*left].floor();
        let right_rem = shares[*right] - shares[*right].floor();
        right_rem.total_cmp(&left_rem).then(left.cmp(right))
    });
    for index in order.into_iter().cycle() {
        if remaining == 0 {
            break;
        }
        inserts[index] += 1;
        remaining -= 1;
    }
    inserts
}
