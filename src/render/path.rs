//! Matrix to stroke-path compiler.
//!
//! Every maximal horizontal run of dark modules in a row becomes one
//! `M x0 y L x1 y` segment through the vertical center of that row. Drawn with
//! a stroke width of one cell, each segment paints exactly the cells of its run,
//! so the whole code is a single `<path>` with one segment per run instead of
//! one rectangle per module.
//!
//! For a row `i` and a run covering columns `start..end` (end exclusive):
//!
//! ```text
//! move-to (C * start, C * i + C / 2)
//! line-to (C * end,   C * i + C / 2)
//! ```
//!
//! A run touching the right edge closes at `C * N`. A single dark cell still
//! yields a move/line pair one cell long.

use std::fmt;
use std::ops::Range;

use glam::{DVec2, dvec2};

use super::svg::fmt_num_hi;
use crate::matrix::Matrix;
use crate::types::Length;

/// One drawing instruction in render-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
}

impl PathCommand {
    pub fn point(self) -> DVec2 {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (letter, p) = match self {
            PathCommand::MoveTo(p) => ('M', p),
            PathCommand::LineTo(p) => ('L', p),
        };
        write!(f, "{}{} {}", letter, fmt_num_hi(p.x), fmt_num_hi(p.y))
    }
}

/// A horizontal stroke from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

/// Compiled path: an immutable list of move/line commands.
///
/// `Display` writes SVG path data (`M0 5 L10 5 M20 5 L30 5`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathDescriptor {
    commands: Vec<PathCommand>,
}

impl PathDescriptor {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Pair each move-to with the line-to that closes it.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.commands.chunks_exact(2).filter_map(|pair| match pair {
            [PathCommand::MoveTo(start), PathCommand::LineTo(end)] => Some(Segment {
                start: *start,
                end: *end,
            }),
            _ => None,
        })
    }

    /// SVG path data string.
    pub fn to_path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", cmd)?;
        }
        Ok(())
    }
}

/// Incremental builder for stroke segments.
///
/// Tracks whether the pen is down so a segment can only be closed after it
/// was opened; closing twice is a no-op rather than a duplicate command.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    pen_down: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
            pen_down: false,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.pen_down
    }

    /// Start a segment at `p`.
    pub fn move_to(&mut self, p: DVec2) {
        self.commands.push(PathCommand::MoveTo(p));
        self.pen_down = true;
    }

    /// Close the open segment at `p`. Ignored when no segment is open.
    pub fn line_to(&mut self, p: DVec2) {
        if self.pen_down {
            self.commands.push(PathCommand::LineTo(p));
            self.pen_down = false;
        }
    }

    pub fn build(self) -> PathDescriptor {
        debug_assert!(!self.pen_down, "path built with an open segment");
        PathDescriptor {
            commands: self.commands,
        }
    }
}

/// Iterator over the maximal runs of `true` in a row, as column ranges.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    row: &'a [bool],
    col: usize,
}

impl Iterator for Runs<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let rest = self.row.get(self.col..)?;
        let start = self.col + rest.iter().position(|&m| m)?;
        let len = self.row[start..]
            .iter()
            .position(|&m| !m)
            .unwrap_or(self.row.len() - start);
        self.col = start + len;
        Some(start..start + len)
    }
}

/// Maximal runs of dark modules in `row`.
pub fn row_runs(row: &[bool]) -> Runs<'_> {
    Runs { row, col: 0 }
}

/// Compile `matrix` into one stroke segment per run, for cells of `cell_size`.
///
/// Total over well-formed matrices; `Matrix` construction already guarantees
/// a square grid.
pub fn compile_path(matrix: &Matrix, cell_size: Length) -> PathDescriptor {
    let c = cell_size.raw();
    let mut builder = PathBuilder::new();
    let mut runs_total = 0usize;

    for (i, row) in matrix.rows().enumerate() {
        let y = c * i as f64 + c / 2.0;
        let mut runs_in_row = 0usize;

        for run in row_runs(row) {
            builder.move_to(dvec2(c * run.start as f64, y));
            builder.line_to(dvec2(c * run.end as f64, y));
            runs_in_row += 1;
        }

        crate::log::trace!(row = i, runs = runs_in_row, "compiled row");
        runs_total += runs_in_row;
    }

    let path = builder.build();
    crate::log::debug!(
        n = matrix.width(),
        cell_size = c,
        runs = runs_total,
        commands = path.len(),
        "compiled matrix path"
    );
    path
}
