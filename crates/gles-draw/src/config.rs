/// How the sample-coverage value is turned into a per-sample bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CoverageLadder {
    /// Accumulate an `f32` threshold sample by sample.
    #[default]
    Float,
    /// Round `samples * coverage` exactly. Differs from `Float` only when `f32` rounding of the
    /// accumulated coverage lands on the other side of a threshold.
    Exact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererConfig {
    pub coverage_ladder: CoverageLadder,
}

impl RendererConfig {
    /// Environment variable selecting [`CoverageLadder::Exact`].
    pub const EXACT_COVERAGE_ENV: &'static str = "GLES_DRAW_EXACT_COVERAGE";

    pub fn from_env() -> Self {
        let coverage_ladder = if env_var_truthy(Self::EXACT_COVERAGE_ENV) {
            CoverageLadder::Exact
        } else {
            CoverageLadder::Float
        };
        Self { coverage_ladder }
    }
}

fn env_var_truthy(name: &str) -> bool {
    let Ok(raw) = std::env::var(name) else {
        return false;
    };
    is_truthy(&raw)
}

fn is_truthy(raw: &str) -> bool {
    let v = raw.trim();
    v == "1"
        || v.eq_ignore_ascii_case("true")
        || v.eq_ignore_ascii_case("yes")
        || v.eq_ignore_ascii_case("on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for v in ["1", "true", " TRUE ", "Yes", "on"] {
            assert!(is_truthy(v), "{v:?} should be truthy");
        }
        for v in ["", "0", "false", "off", "2"] {
            assert!(!is_truthy(v), "{v:?} should not be truthy");
        }
    }

    #[test]
    fn default_uses_float_ladder() {
        assert_eq!(RendererConfig::default().coverage_ladder, CoverageLadder::Float);
    }
}
