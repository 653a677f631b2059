//! Data-driven path compiler tests.
//!
//! Each `tests/fixtures/*.qrm` file holds a header line (`cell C` or `size S`),
//! the matrix as rows of `0`/`1`, a `---` separator, and the expected path data.
//! Lines starting with `#` are comments.

use datatest_stable::Utf8Path;
use qrpath::{Length, Matrix, compile_path};
use qrpath_compare::{RoundTrip, round_trip};

/// How the fixture sizes its cells
enum Scale {
    Cell(f64),
    Size(f64),
}

struct Fixture {
    scale: Scale,
    rows: Vec<Vec<bool>>,
    expected: String,
}

fn parse_fixture(source: &str) -> Result<Fixture, String> {
    let mut lines = source
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with('#'));

    let header = lines.next().ok_or("missing header line")?;
    let scale = match header.split_once(' ') {
        Some(("cell", v)) => Scale::Cell(v.parse().map_err(|e| format!("bad cell: {e}"))?),
        Some(("size", v)) => Scale::Size(v.parse().map_err(|e| format!("bad size: {e}"))?),
        _ => return Err(format!("bad header {header:?}")),
    };

    let mut rows = Vec::new();
    for line in lines.by_ref() {
        if line == "---" {
            break;
        }
        let row = line
            .chars()
            .map(|c| match c {
                '1' => Ok(true),
                '0' => Ok(false),
                other => Err(format!("bad module {other:?}")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    let expected = lines.collect::<Vec<_>>().join(" ").trim().to_string();
    Ok(Fixture {
        scale,
        rows,
        expected,
    })
}

/// Format a colored inline diff using dissimilar
fn format_inline_diff(expected: &str, actual: &str) -> String {
    use dissimilar::Chunk;

    let mut output = String::new();
    output.push_str("\n=== Inline Diff (expected vs compiled) ===\n");
    output.push_str("Legend: [-expected only-] [+compiled only+] [unchanged]\n\n");

    for chunk in dissimilar::diff(expected, actual) {
        match chunk {
            Chunk::Equal(s) => output.push_str(s),
            Chunk::Delete(s) => {
                output.push_str("\x1b[31m[-");
                output.push_str(s);
                output.push_str("-]\x1b[0m");
            }
            Chunk::Insert(s) => {
                output.push_str("\x1b[32m[+");
                output.push_str(s);
                output.push_str("+]\x1b[0m");
            }
        }
    }
    output.push('\n');
    output
}

fn test_path_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let fixture = parse_fixture(&source).map_err(|e| format!("{path}: {e}"))?;

    let matrix = Matrix::from_rows(&fixture.rows)?;
    let cell = match fixture.scale {
        Scale::Cell(c) => Length(c),
        Scale::Size(s) => Length(s).per(matrix.width()).ok_or("empty matrix")?,
    };

    let compiled = compile_path(&matrix, cell).to_path_data();
    if compiled != fixture.expected {
        return Err(format!(
            "path mismatch for {}:\n{}",
            path,
            format_inline_diff(&fixture.expected, &compiled)
        )
        .into());
    }

    match round_trip(&compiled, &fixture.rows, cell.raw())? {
        RoundTrip::Exact => Ok(()),
        RoundTrip::Mismatch {
            diff,
            overpainted,
            outside,
        } => Err(format!(
            "raster mismatch for {}:\n{}overpainted: {:?}\noutside the grid: {:?}",
            path,
            diff.format_report(),
            overpainted,
            outside
        )
        .into()),
    }
}

datatest_stable::harness! {
    { test = test_path_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.qrm$" },
}
