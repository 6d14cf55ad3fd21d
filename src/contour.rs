//! Contour line extraction for gridded data.
//!
//! Marching squares over a regular lattice, producing line segments that
//! are connected into polylines and optionally smoothed before stroking.
//! Lattice coordinates are abstract; the map scales them to pixels.

/// A point in lattice/pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// A complete contour line (polyline) at a single level
#[derive(Debug, Clone)]
pub struct Contour {
    pub level: f32,
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Generate contour levels covering `[min_value, max_value]` at a fixed
/// interval, starting from the first multiple of the interval above the
/// minimum.
pub fn generate_contour_levels(min_value: f32, max_value: f32, interval: f32) -> Vec<f32> {
    if interval <= 0.0 || max_value <= min_value {
        return vec![];
    }
    let start = (min_value / interval).ceil() * interval;
    let mut levels = Vec::new();
    let mut level = start;
    while level <= max_value {
        levels.push(level);
        level += interval;
    }
    levels
}

/// Pick a "nice" contour interval for a data range, targeting roughly the
/// requested number of levels. Candidate mantissas are 1, 2, 2.5 and 5.
pub fn nice_interval(min_value: f32, max_value: f32, target_levels: usize) -> f32 {
    let span = max_value - min_value;
    if span <= 0.0 || target_levels == 0 {
        return 1.0;
    }
    let raw = span / target_levels as f32;
    let magnitude = 10.0f32.powf(raw.log10().floor());
    for mantissa in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let candidate = mantissa * magnitude;
        if candidate >= raw {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// Generate contour levels automatically from a data range.
pub fn auto_levels(min_value: f32, max_value: f32) -> Vec<f32> {
    let interval = nice_interval(min_value, max_value, 10);
    generate_contour_levels(min_value, max_value, interval)
}

/// Marching squares over a row-major lattice, extracting the segments of a
/// single contour level. Cells touching NaN values are skipped.
pub fn march_squares(data: &[f32], width: usize, height: usize, level: f32) -> Vec<Segment> {
    if width < 2 || height < 2 || data.len() != width * height {
        return vec![];
    }

    let mut segments = Vec::new();

    for y in 0..(height - 1) {
        for x in 0..(width - 1) {
            let tl = data[y * width + x];
            let tr = data[y * width + x + 1];
            let bl = data[(y + 1) * width + x];
            let br = data[(y + 1) * width + x + 1];

            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut cell_index = 0u8;
            if tl >= level {
                cell_index |= 1;
            }
            if tr >= level {
                cell_index |= 2;
            }
            if br >= level {
                cell_index |= 4;
            }
            if bl >= level {
                cell_index |= 8;
            }

            segments.extend(cell_segments(
                cell_index, x as f32, y as f32, tl, tr, br, bl, level,
            ));
        }
    }

    segments
}

/// Segments for one marching-squares cell, with edge crossings found by
/// linear interpolation.
#[allow(clippy::too_many_arguments)]
fn cell_segments(
    cell_index: u8,
    x: f32,
    y: f32,
    tl: f32,
    tr: f32,
    br: f32,
    bl: f32,
    level: f32,
) -> Vec<Segment> {
    let top = edge_crossing(x, y, x + 1.0, y, tl, tr, level);
    let right = edge_crossing(x + 1.0, y, x + 1.0, y + 1.0, tr, br, level);
    let bottom = edge_crossing(x, y + 1.0, x + 1.0, y + 1.0, bl, br, level);
    let left = edge_crossing(x, y, x, y + 1.0, tl, bl, level);

    match cell_index {
        0 | 15 => vec![],
        1 | 14 => vec![Segment {
            start: left,
            end: top,
        }],
        2 | 13 => vec![Segment {
            start: top,
            end: right,
        }],
        3 | 12 => vec![Segment {
            start: left,
            end: right,
        }],
        4 | 11 => vec![Segment {
            start: right,
            end: bottom,
        }],
        // Saddle cases produce two separate segments
        5 => vec![
            Segment {
                start: left,
                end: top,
            },
            Segment {
                start: right,
                end: bottom,
            },
        ],
        6 | 9 => vec![Segment {
            start: top,
            end: bottom,
        }],
        7 | 8 => vec![Segment {
            start: left,
            end: bottom,
        }],
        10 => vec![
            Segment {
                start: top,
                end: right,
            },
            Segment {
                start: left,
                end: bottom,
            },
        ],
        _ => vec![],
    }
}

fn edge_crossing(x1: f32, y1: f32, x2: f32, y2: f32, val1: f32, val2: f32, level: f32) -> Point {
    if (val2 - val1).abs() < 1e-6 {
        return Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    }
    let t = ((level - val1) / (val2 - val1)).clamp(0.0, 1.0);
    Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

/// Connect unordered segments into continuous polylines.
pub fn connect_segments(segments: Vec<Segment>) -> Vec<Contour> {
    if segments.is_empty() {
        return vec![];
    }

    let mut contours = Vec::new();
    let mut used = vec![false; segments.len()];
    let epsilon = 0.001;

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }

        let mut points = vec![segments[start_idx].start, segments[start_idx].end];
        used[start_idx] = true;

        let mut changed = true;
        while changed {
            changed = false;
            let current_end = *points.last().unwrap();

            for (i, seg) in segments.iter().enumerate() {
                if used[i] {
                    continue;
                }
                if distance(seg.start, current_end) < epsilon {
                    points.push(seg.end);
                    used[i] = true;
                    changed = true;
                    break;
                } else if distance(seg.end, current_end) < epsilon {
                    points.push(seg.start);
                    used[i] = true;
                    changed = true;
                    break;
                }
            }
        }

        let closed = distance(points[0], *points.last().unwrap()) < epsilon;
        if points.len() >= 2 {
            contours.push(Contour {
                level: 0.0, // set by the caller
                points,
                closed,
            });
        }
    }

    contours
}

/// Chaikin's corner-cutting smoothing.
pub fn smooth_contour(contour: &Contour, iterations: u32) -> Contour {
    if iterations == 0 || contour.points.len() < 3 {
        return contour.clone();
    }

    let mut points = contour.points.clone();

    for _ in 0..iterations {
        let mut new_points = Vec::with_capacity(points.len() * 2);

        for i in 0..points.len() {
            let p1 = points[i];
            let p2 = if contour.closed {
                points[(i + 1) % points.len()]
            } else if i + 1 < points.len() {
                points[i + 1]
            } else {
                break;
            };

            new_points.push(Point::new(
                0.75 * p1.x + 0.25 * p2.x,
                0.75 * p1.y + 0.25 * p2.y,
            ));
            new_points.push(Point::new(
                0.25 * p1.x + 0.75 * p2.x,
                0.25 * p1.y + 0.75 * p2.y,
            ));
        }

        if !contour.closed && !points.is_empty() {
            new_points.insert(0, points[0]);
            if let Some(&last) = points.last() {
                new_points.push(last);
            }
        }

        points = new_points;
    }

    Contour {
        level: contour.level,
        points,
        closed: contour.closed,
    }
}

/// Extract smoothed contours for every level.
pub fn generate_all_contours(
    data: &[f32],
    width: usize,
    height: usize,
    levels: &[f32],
    smoothing_passes: u32,
) -> Vec<Contour> {
    let mut all_contours = Vec::new();

    for &level in levels {
        let segments = march_squares(data, width, height, level);
        let mut contours = connect_segments(segments);
        for contour in &mut contours {
            contour.level = level;
            if smoothing_passes > 0 {
                *contour = smooth_contour(contour, smoothing_passes);
            }
        }
        all_contours.extend(contours);
    }

    all_contours
}

fn distance(a: Point, b: Point) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Total polyline length of a contour, used for label placement.
pub fn contour_length(contour: &Contour) -> f32 {
    contour
        .points
        .windows(2)
        .map(|w| distance(w[0], w[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_contour_levels() {
        let levels = generate_contour_levels(0.0, 20.0, 5.0);
        assert_eq!(levels, vec![0.0, 5.0, 10.0, 15.0, 20.0]);

        let levels = generate_contour_levels(2.0, 18.0, 5.0);
        assert_eq!(levels, vec![5.0, 10.0, 15.0]);

        assert!(generate_contour_levels(5.0, 5.0, 1.0).is_empty());
        assert!(generate_contour_levels(0.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn test_nice_interval() {
        assert!((nice_interval(0.0, 100.0, 10) - 10.0).abs() < 1e-4);
        assert!((nice_interval(0.0, 1.0, 10) - 0.1).abs() < 1e-4);
        assert!((nice_interval(0.0, 22.0, 10) - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_auto_levels_cover_range() {
        let levels = auto_levels(5280.0, 5920.0);
        assert!(!levels.is_empty());
        assert!(levels[0] >= 5280.0);
        assert!(*levels.last().unwrap() <= 5920.0);
    }

    #[test]
    fn test_march_squares_flat_field() {
        let data = vec![5.0; 9];
        let segments = march_squares(&data, 3, 3, 5.0);
        assert_eq!(segments.len(), 0);
    }

    #[test]
    fn test_march_squares_peak() {
        let data = vec![
            0.0, 0.0, 0.0, //
            0.0, 10.0, 0.0, //
            0.0, 0.0, 0.0,
        ];
        let segments = march_squares(&data, 3, 3, 5.0);
        assert!(!segments.is_empty());

        let contours = connect_segments(segments);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
    }

    #[test]
    fn test_march_squares_skips_nan_cells() {
        let data = vec![
            0.0,
            f32::NAN,
            0.0, //
            0.0,
            10.0,
            0.0, //
            0.0,
            0.0,
            0.0,
        ];
        let segments = march_squares(&data, 3, 3, 5.0);
        // Only cells not touching the NaN corner contribute
        for seg in &segments {
            assert!(seg.start.y >= 1.0 || seg.start.x >= 1.0);
        }
    }

    #[test]
    fn test_smoothing_grows_point_count() {
        let contour = Contour {
            level: 0.0,
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 0.0),
            ],
            closed: false,
        };
        let smoothed = smooth_contour(&contour, 1);
        assert!(smoothed.points.len() > contour.points.len());
        // Open contours keep their endpoints
        assert_eq!(smoothed.points[0], contour.points[0]);
        assert_eq!(smoothed.points.last(), contour.points.last());
    }
}
