//! Module matrices and the generator seam.
//!
//! The QR encoding algorithm itself lives outside this crate. Everything here
//! treats it as a function from `(value, level)` to a square grid of booleans.

use std::fmt;
use std::str::FromStr;

use crate::errors::GenerationError;

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EcLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl FromStr for EcLevel {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(EcLevel::L),
            "M" | "m" => Ok(EcLevel::M),
            "Q" | "q" => Ok(EcLevel::Q),
            "H" | "h" => Ok(EcLevel::H),
            other => Err(GenerationError::InvalidErrorCorrectionLevel {
                level: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(s)
    }
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// A square, row-major grid of modules. `true` is a dark ("on") module.
///
/// Always at least 1x1; construction rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    width: usize,
    modules: Vec<bool>,
}

impl Matrix {
    /// Build a matrix from row-major rows.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GenerationError>
    where
        R: AsRef<[bool]>,
    {
        let mut modules = Vec::new();
        let mut rows_seen = 0;
        let mut width = None;

        for row in rows {
            let row = row.as_ref();
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(GenerationError::MalformedMatrix {
                        rows: rows_seen + 1,
                        width: row.len(),
                    });
                }
                Some(_) => {}
            }
            modules.extend_from_slice(row);
            rows_seen += 1;
        }

        let width = width.unwrap_or(0);
        if rows_seen == 0 || width != rows_seen {
            return Err(GenerationError::MalformedMatrix {
                rows: rows_seen,
                width,
            });
        }

        Ok(Self { width, modules })
    }

    /// Build a matrix from a flat row-major module buffer of `width * width` entries.
    pub fn from_modules(width: usize, modules: Vec<bool>) -> Result<Self, GenerationError> {
        if width == 0 || modules.len() != width * width {
            return Err(GenerationError::MalformedMatrix {
                rows: if width == 0 { 0 } else { modules.len() / width },
                width,
            });
        }
        Ok(Self { width, modules })
    }

    /// Number of modules along one side (N).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row `i`, or `None` past the last row.
    pub fn row(&self, i: usize) -> Option<&[bool]> {
        let start = i.checked_mul(self.width)?;
        self.modules.get(start..start.checked_add(self.width)?)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks_exact(self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.width && col < self.width {
            Some(self.modules[row * self.width + col])
        } else {
            None
        }
    }

    /// Count of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Anything that can turn a value into a module matrix.
///
/// Implemented for closures so tests and alternative encoders can plug in
/// without a wrapper type.
pub trait MatrixGenerator {
    fn generate(&self, value: &str, ecl: EcLevel) -> Result<Matrix, GenerationError>;
}

impl<F> MatrixGenerator for F
where
    F: Fn(&str, EcLevel) -> Result<Matrix, GenerationError>,
{
    fn generate(&self, value: &str, ecl: EcLevel) -> Result<Matrix, GenerationError> {
        self(value, ecl)
    }
}

/// Generator backed by the `qrcode` crate. No quiet zone is added.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrMatrixGenerator;

impl MatrixGenerator for QrMatrixGenerator {
    fn generate(&self, value: &str, ecl: EcLevel) -> Result<Matrix, GenerationError> {
        let code = qrcode::QrCode::with_error_correction_level(value, ecl.into())
            .map_err(|e| GenerationError::from_qr(e, ecl))?;

        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        Matrix::from_modules(code.width(), modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ec_level_parses_known_levels() {
        assert_eq!("L".parse::<EcLevel>(), Ok(EcLevel::L));
        assert_eq!("q".parse::<EcLevel>(), Ok(EcLevel::Q));
        assert_eq!(" H ".parse::<EcLevel>(), Ok(EcLevel::H));
        assert_eq!(EcLevel::default(), EcLevel::M);
    }

    #[test]
    fn ec_level_rejects_unknown() {
        assert_eq!(
            "X".parse::<EcLevel>(),
            Err(GenerationError::InvalidErrorCorrectionLevel {
                level: "X".to_string()
            })
        );
    }

    #[test]
    fn from_rows_accepts_square() {
        let m = Matrix::from_rows([[true, false], [false, true]]).unwrap();
        assert_eq!(m.width(), 2);
        assert_eq!(m.row(1), Some(&[false, true][..]));
        assert_eq!(m.row(2), None);
        assert_eq!(m.row(usize::MAX), None);
        assert_eq!(m.get(0, 0), Some(true));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.dark_count(), 2);
    }

    #[test]
    fn from_rows_rejects_empty() {
        let rows: Vec<Vec<bool>> = Vec::new();
        assert_eq!(
            Matrix::from_rows(rows),
            Err(GenerationError::MalformedMatrix { rows: 0, width: 0 })
        );
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let rows = vec![vec![true, true], vec![true]];
        assert_eq!(
            Matrix::from_rows(rows),
            Err(GenerationError::MalformedMatrix { rows: 2, width: 1 })
        );
    }

    #[test]
    fn from_rows_rejects_non_square() {
        let rows = vec![vec![true, true, true], vec![true, false, true]];
        assert_eq!(
            Matrix::from_rows(rows),
            Err(GenerationError::MalformedMatrix { rows: 2, width: 3 })
        );
    }

    #[test]
    fn qr_generator_produces_version_1_for_short_text() {
        let m = QrMatrixGenerator.generate("hi", EcLevel::M).unwrap();
        // Version 1 is 21x21 modules
        assert_eq!(m.width(), 21);
        assert_eq!(m.rows().count(), 21);
        // Finder pattern top-left corner is dark
        assert_eq!(m.get(0, 0), Some(true));
    }

    #[test]
    fn qr_generator_reports_capacity_overflow() {
        let value = "x".repeat(4000);
        let err = QrMatrixGenerator.generate(&value, EcLevel::H).unwrap_err();
        assert_eq!(err, GenerationError::DataTooLong { ecl: EcLevel::H });
    }

    #[test]
    fn closures_are_generators() {
        let fixed = |_: &str, _: EcLevel| Matrix::from_rows([[true]]);
        let m = fixed.generate("anything", EcLevel::L).unwrap();
        assert_eq!(m.width(), 1);
    }
}
