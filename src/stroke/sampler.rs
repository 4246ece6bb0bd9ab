use crate::foundation::core::{Canvas, Point};

/// Extract every numeric token from an SVG path string, ignoring path commands.
///
/// Tokens are `[+-]?(digits[.digits] | .digits)`. Exponents are not recognised, so `1e5`
/// yields `1` and `5`.
pub fn path_numbers(path: &str) -> Vec<f64> {
    let bytes = path.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let start = i;
        let mut j = i;
        if matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }

        let digits_from = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let int_digits = j - digits_from;

        if int_digits > 0 {
            if j < bytes.len() && bytes[j] == b'.' {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
            }
        } else if j + 1 < bytes.len() && bytes[j] == b'.' && bytes[j + 1].is_ascii_digit() {
            j += 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
        } else {
            i += 1;
            continue;
        }

        // The token is ASCII by construction; "10." parses as 10.
        let text = path[start..j].trim_end_matches('.');
        if let Ok(v) = text.parse::<f64>() {
            out.push(v);
        }
        i = j;
    }

    out
}

/// Consecutive numeric pairs of `path`, as waypoints. A trailing odd number is dropped.
pub fn path_waypoints(path: &str) -> Vec<Point> {
    path_numbers(path)
        .chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect()
}

/// Horizontal line across `canvas` at mid-height, used when a path has too little geometry.
pub fn fallback_line(num_points: usize, canvas: Canvas) -> Vec<Point> {
    let w = f64::from(canvas.width);
    let y = f64::from(canvas.height) / 2.0;
    (0..num_points)
        .map(|i| Point::new(i as f64 * w / num_points as f64, y))
        .collect()
}

/// Result of sampling a stroke path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSamples {
    /// Evenly spaced points, in path order.
    pub points: Vec<Point>,
    /// `true` when the path had fewer than two waypoints and [`fallback_line`] was used.
    pub fallback: bool,
}

/// Sample `num_points` points along the polyline through the waypoints of `path`.
///
/// Path commands are ignored: curves are treated as straight chords between their numeric
/// pairs. Samples are spaced uniformly by segment count, not by arc length, so every segment
/// receives the same share of samples regardless of its length.
pub fn sample_path(path: &str, num_points: usize, canvas: Canvas) -> PathSamples {
    let waypoints = path_waypoints(path);
    if waypoints.len() < 2 {
        return PathSamples {
            points: fallback_line(num_points, canvas),
            fallback: true,
        };
    }

    let segments = waypoints.len() - 1;
    let denom = num_points.saturating_sub(1).max(1) as f64;
    let points = (0..num_points)
        .map(|i| {
            let t = i as f64 / denom;
            let pos = t * segments as f64;
            let seg = (pos.floor() as usize).min(segments - 1);
            let seg_t = pos - seg as f64;
            waypoints[seg].lerp(waypoints[seg + 1], seg_t)
        })
        .collect();

    PathSamples {
        points,
        fallback: false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/sampler.rs"]
mod tests;
