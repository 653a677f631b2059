//! Raster round-trip utilities for testing qrpath output.
//!
//! This crate provides shared comparison logic used by both the test harness
//! and the xtask gallery: it reads compiled SVG path data back into stroke
//! segments, paints them onto a module grid the way a renderer with
//! `stroke-width = cell` would, and diffs that grid against the source matrix.

use miette::Diagnostic;
use thiserror::Error;

/// Tolerance for coordinate snapping, in cells.
/// Path data is written with 10 significant figures, so endpoints land a
/// hair away from the grid on fractional cell sizes.
pub const SNAP_TOLERANCE: f64 = 0.01;

/// A module grid: `grid[row][col]`, `true` = painted.
pub type Grid = Vec<Vec<bool>>;

/// A horizontal stroke read back from path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub x0: f64,
    pub x1: f64,
    pub y: f64,
}

/// Problems found while reading path data or painting it.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("unexpected token {token:?} at position {index}")]
    #[diagnostic(code(qrpath_compare::unexpected_token))]
    UnexpectedToken { token: String, index: usize },

    #[error("path data ended in the middle of a command")]
    #[diagnostic(code(qrpath_compare::truncated))]
    Truncated,

    #[error("line-to without a preceding move-to at position {index}")]
    #[diagnostic(code(qrpath_compare::dangling_line))]
    DanglingLine { index: usize },

    #[error("stroke from ({x0}, {y}) to ({x1}, {y1}) is not horizontal")]
    #[diagnostic(code(qrpath_compare::not_horizontal))]
    NotHorizontal { x0: f64, x1: f64, y: f64, y1: f64 },

    #[error("stroke at y={y} is not centered on a row")]
    #[diagnostic(code(qrpath_compare::off_grid))]
    OffGrid { y: f64 },
}

fn parse_number(token: &str, index: usize) -> Result<f64, CompareError> {
    token.parse().map_err(|_| CompareError::UnexpectedToken {
        token: token.to_string(),
        index,
    })
}

/// Read `M x y L x y ...` path data into horizontal strokes.
pub fn parse_path_data(d: &str) -> Result<Vec<Stroke>, CompareError> {
    let tokens: Vec<&str> = d.split_whitespace().collect();
    let mut strokes = Vec::new();
    let mut pen: Option<(f64, f64)> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        let (cmd, x) = token.split_at(token.chars().next().map_or(0, char::len_utf8));
        let y = tokens.get(i + 1).ok_or(CompareError::Truncated)?;
        let x = parse_number(x, i)?;
        let y = parse_number(y, i + 1)?;

        match cmd {
            "M" => pen = Some((x, y)),
            "L" => {
                let (x0, y0) = pen.take().ok_or(CompareError::DanglingLine { index: i })?;
                if (y0 - y).abs() > f64::EPSILON * y.abs().max(1.0) {
                    return Err(CompareError::NotHorizontal { x0, x1: x, y: y0, y1: y });
                }
                strokes.push(Stroke { x0, x1: x, y });
            }
            _ => {
                return Err(CompareError::UnexpectedToken {
                    token: token.to_string(),
                    index: i,
                });
            }
        }
        i += 2;
    }

    if pen.is_some() {
        return Err(CompareError::Truncated);
    }
    Ok(strokes)
}

/// Result of painting strokes onto a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub grid: Grid,
    /// Cells painted by more than one stroke
    pub overpainted: Vec<(usize, usize)>,
    /// Painted cells that lie outside the grid, as signed `(row, col)`
    pub outside: Vec<(i64, i64)>,
}

fn snap(value: f64) -> Option<f64> {
    let rounded = value.round();
    ((value - rounded).abs() <= SNAP_TOLERANCE).then_some(rounded)
}

/// Paint strokes of width `cell` onto an `n` x `n` grid.
///
/// Paint falling outside the grid is recorded in [`Raster::outside`].
pub fn rasterize(strokes: &[Stroke], n: usize, cell: f64) -> Result<Raster, CompareError> {
    let mut hits = vec![vec![0u32; n]; n];
    let mut outside = Vec::new();
    let in_grid = |i: i64| i >= 0 && (i as usize) < n;

    for stroke in strokes {
        let off_grid = CompareError::OffGrid { y: stroke.y };
        // Row centers sit at (row + 0.5) * cell
        let row = snap(stroke.y / cell - 0.5).ok_or(off_grid.clone())? as i64;
        let (a, b) = if stroke.x0 <= stroke.x1 {
            (stroke.x0, stroke.x1)
        } else {
            (stroke.x1, stroke.x0)
        };
        let start = snap(a / cell).ok_or(off_grid.clone())? as i64;
        let end = snap(b / cell).ok_or(off_grid)? as i64;

        for col in start..end {
            if in_grid(row) && in_grid(col) {
                hits[row as usize][col as usize] += 1;
            } else {
                outside.push((row, col));
            }
        }
    }

    let mut overpainted = Vec::new();
    let grid = hits
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, &count)| {
                    if count > 1 {
                        overpainted.push((r, c));
                    }
                    count > 0
                })
                .collect()
        })
        .collect();

    Ok(Raster {
        grid,
        overpainted,
        outside,
    })
}

/// Cell-level differences between an expected grid and a painted one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridDiff {
    /// Dark in the matrix, unpainted in the raster
    pub missing: Vec<(usize, usize)>,
    /// Painted in the raster, light in the matrix
    pub extra: Vec<(usize, usize)>,
}

impl GridDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    pub fn format_report(&self) -> String {
        let mut out = String::new();
        if !self.missing.is_empty() {
            out.push_str(&format!("{} missing cells: {:?}\n", self.missing.len(), self.missing));
        }
        if !self.extra.is_empty() {
            out.push_str(&format!("{} extra cells: {:?}\n", self.extra.len(), self.extra));
        }
        out
    }
}

/// Compare two grids cell by cell. Grids of different shapes compare over
/// the cells of `expected`; absent cells count as unpainted.
pub fn diff_grids(expected: &[Vec<bool>], actual: &[Vec<bool>]) -> GridDiff {
    let mut diff = GridDiff::default();
    for (r, row) in expected.iter().enumerate() {
        for (c, &want) in row.iter().enumerate() {
            let got = actual.get(r).and_then(|row| row.get(c)).copied().unwrap_or(false);
            match (want, got) {
                (true, false) => diff.missing.push((r, c)),
                (false, true) => diff.extra.push((r, c)),
                _ => {}
            }
        }
    }
    diff
}

/// Outcome of a full round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundTrip {
    /// Every dark cell painted exactly once, nothing else painted
    Exact,
    Mismatch {
        diff: GridDiff,
        overpainted: Vec<(usize, usize)>,
        outside: Vec<(i64, i64)>,
    },
}

impl RoundTrip {
    pub fn is_exact(&self) -> bool {
        matches!(self, RoundTrip::Exact)
    }
}

/// Parse `d`, paint it with `cell`-wide strokes and compare against `expected`.
pub fn round_trip(d: &str, expected: &[Vec<bool>], cell: f64) -> Result<RoundTrip, CompareError> {
    let strokes = parse_path_data(d)?;
    let raster = rasterize(&strokes, expected.len(), cell)?;
    let diff = diff_grids(expected, &raster.grid);
    if diff.is_empty() && raster.overpainted.is_empty() && raster.outside.is_empty() {
        Ok(RoundTrip::Exact)
    } else {
        Ok(RoundTrip::Mismatch {
            diff,
            overpainted: raster.overpainted,
            outside: raster.outside,
        })
    }
}

/// Extract the `d` attribute of the first `<path>` in an SVG document.
pub fn extract_path_data(svg: &str) -> Option<&str> {
    let start = svg.find("<path")?;
    let rest = &svg[start..];
    let attr = rest.find(" d=\"")? + 4;
    let rest = &rest[attr..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Extract the `stroke-width` of the first `<path>` in an SVG document.
pub fn extract_stroke_width(svg: &str) -> Option<f64> {
    let start = svg.find("<path")?;
    let rest = &svg[start..];
    let attr = rest.find("stroke-width=\"")? + "stroke-width=\"".len();
    let rest = &rest[attr..];
    let end = rest.find('"')?;
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> Grid {
        rows.iter()
            .map(|r| r.iter().map(|&b| b == 1).collect())
            .collect()
    }

    #[test]
    fn parses_compiled_path() {
        let strokes = parse_path_data("M0 5 L10 5 M20 5 L30 5").unwrap();
        assert_eq!(
            strokes,
            vec![
                Stroke { x0: 0.0, x1: 10.0, y: 5.0 },
                Stroke { x0: 20.0, x1: 30.0, y: 5.0 },
            ]
        );
    }

    #[test]
    fn rejects_dangling_line() {
        assert_eq!(
            parse_path_data("L1 1"),
            Err(CompareError::DanglingLine { index: 0 })
        );
    }

    #[test]
    fn rejects_open_move() {
        assert_eq!(parse_path_data("M0 5"), Err(CompareError::Truncated));
        assert_eq!(parse_path_data("M0"), Err(CompareError::Truncated));
    }

    #[test]
    fn rejects_slanted_stroke() {
        assert!(matches!(
            parse_path_data("M0 5 L10 6"),
            Err(CompareError::NotHorizontal { .. })
        ));
    }

    #[test]
    fn empty_path_is_empty_raster() {
        let raster = rasterize(&parse_path_data("").unwrap(), 2, 1.0).unwrap();
        assert_eq!(raster.grid, grid(&[&[0, 0], &[0, 0]]));
    }

    #[test]
    fn round_trip_of_three_by_three() {
        let expected = grid(&[&[1, 0, 1], &[0, 1, 0], &[1, 1, 1]]);
        let d = "M0 5 L10 5 M20 5 L30 5 M10 15 L20 15 M0 25 L30 25";
        assert_eq!(round_trip(d, &expected, 10.0), Ok(RoundTrip::Exact));
    }

    #[test]
    fn detects_missing_and_extra_cells() {
        let expected = grid(&[&[1, 1], &[0, 0]]);
        let result = round_trip("M0 0.5 L1 0.5 M0 1.5 L1 1.5", &expected, 1.0).unwrap();
        let RoundTrip::Mismatch {
            diff,
            overpainted,
            outside,
        } = result
        else {
            panic!("expected mismatch");
        };
        assert_eq!(diff.missing, vec![(0, 1)]);
        assert_eq!(diff.extra, vec![(1, 0)]);
        assert!(overpainted.is_empty());
        assert!(outside.is_empty());
        assert!(diff.format_report().contains("1 missing cells"));
    }

    #[test]
    fn detects_overpaint() {
        let expected = grid(&[&[1, 1], &[0, 0]]);
        let result = round_trip("M0 0.5 L2 0.5 M1 0.5 L2 0.5", &expected, 1.0).unwrap();
        let RoundTrip::Mismatch {
            diff, overpainted, ..
        } = result
        else {
            panic!("expected mismatch");
        };
        assert!(diff.is_empty());
        assert_eq!(overpainted, vec![(0, 1)]);
    }

    #[test]
    fn paint_past_the_edges_is_not_exact() {
        let expected = grid(&[&[1, 1], &[0, 0]]);
        let result = round_trip("M0 0.5 L5 0.5 M0 7.5 L2 7.5", &expected, 1.0).unwrap();
        let RoundTrip::Mismatch { diff, outside, .. } = result else {
            panic!("expected mismatch");
        };
        assert!(diff.is_empty());
        assert_eq!(outside, vec![(0, 2), (0, 3), (0, 4), (7, 0), (7, 1)]);

        let raster = rasterize(&[Stroke { x0: -1.0, x1: 1.0, y: 0.5 }], 1, 1.0).unwrap();
        assert_eq!(raster.grid, grid(&[&[1]]));
        assert_eq!(raster.outside, vec![(0, -1)]);
    }

    #[test]
    fn off_grid_stroke_is_an_error() {
        assert_eq!(
            rasterize(&[Stroke { x0: 0.0, x1: 1.0, y: 0.8 }], 2, 1.0),
            Err(CompareError::OffGrid { y: 0.8 })
        );
    }

    #[test]
    fn extracts_path_attributes() {
        let svg = concat!(
            r#"<svg><rect width="4"/>"#,
            r#"<path transform="translate(1 1)" d="M0 2 L4 2" stroke="black" stroke-width="4"/></svg>"#
        );
        assert_eq!(extract_path_data(svg), Some("M0 2 L4 2"));
        assert_eq!(extract_stroke_width(svg), Some(4.0));
        assert_eq!(extract_path_data("<svg></svg>"), None);
    }
}
