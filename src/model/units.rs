/// Canonical physical unit every calibrated axis is expressed in.
pub const METERS: &str = "m";

/// Result of normalizing a native unit token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitScale {
    /// Multiply native values by `factor` to obtain values in `unit`.
    Physical { factor: f64, unit: &'static str },
    /// The token is not a known length unit; the axis is reported in pixels.
    Pixels,
}

impl UnitScale {
    pub fn is_physical(self) -> bool {
        matches!(self, Self::Physical { .. })
    }
}

/// Maps a native unit token onto meters.
///
/// Tolerates case, surrounding whitespace, brackets and the underscore
/// spelling some EMD writers use (`[n_m]`). Tokens that are not a known
/// length unit, including the empty string, yield [`UnitScale::Pixels`].
pub fn normalize_unit(token: &str) -> UnitScale {
    let cleaned = token
        .trim()
        .trim_matches(|c| c == '[' || c == ']')
        .chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let factor = match cleaned.as_str() {
        // micro sign, greek mu, and the latin-1 mis-decoding of the micro sign
        "um" | "µm" | "μm" | "âµm" | "micron" | "microns" | "micrometer" | "micrometers"
        | "micrometre" | "micrometres" => 1e-6,
        "m" | "meter" | "meters" | "metre" | "metres" => 1.0,
        "nm" | "nanometer" | "nanometers" | "nanometre" | "nanometres" => 1e-9,
        // `Å` (U+00C5) and the angstrom sign (U+212B) both lowercase to `å`
        "a" | "ang" | "å" | "angstrom" | "angstroms" | "ångström" | "ångströms" => 1e-10,
        _ => return UnitScale::Pixels,
    };
    UnitScale::Physical {
        factor,
        unit: METERS,
    }
}
