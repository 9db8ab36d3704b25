use serde::Serialize;

/// Twelve sample weights of a pretend 7B model layer.
pub const SAMPLE_WEIGHTS: [f64; 12] = [
    0.123_456_78,
    -0.987_654_32,
    0.555_555_55,
    -0.111_111_11,
    0.000_000_01,
    0.888_888_88,
    -0.444_444_44,
    0.333_333_33,
    0.777_777_77,
    -0.222_222_22,
    0.666_666_66,
    -0.555_555_55,
];

/// Simulated numeric precision tiers, from lossless to most compressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantizationLevel {
    FullPrecision,
    Half,
    Int8,
    Int4,
}

/// Visual tone a front end should render a weight cell with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    Slate,
    Indigo,
    Blue,
    Red,
}

/// Narrative metadata for a precision tier. Static, not derived from weights.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LevelProfile {
    pub name: &'static str,
    pub model_size: &'static str,
    pub ram: &'static str,
    pub precision_loss: &'static str,
    pub hardware: &'static str,
}

/// One weight after simulated quantization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuantizedWeight {
    pub display_value: String,
    pub style: StyleTag,
}

impl QuantizationLevel {
    pub const ALL: [Self; 4] = [Self::FullPrecision, Self::Half, Self::Int8, Self::Int4];

    #[must_use]
    pub const fn profile(self) -> LevelProfile {
        match self {
            Self::FullPrecision => LevelProfile {
                name: "FP32",
                model_size: "28 GB",
                ram: "32 GB",
                precision_loss: "0%",
                hardware: "Server GPU (A100)",
            },
            Self::Half => LevelProfile {
                name: "FP16",
                model_size: "14 GB",
                ram: "16 GB",
                precision_loss: "0.01%",
                hardware: "Desktop GPU (RTX 4090)",
            },
            Self::Int8 => LevelProfile {
                name: "INT8",
                model_size: "7 GB",
                ram: "8 GB",
                precision_loss: "0.5%",
                hardware: "Laptop (MacBook M1)",
            },
            Self::Int4 => LevelProfile {
                name: "INT4",
                model_size: "3.5 GB",
                ram: "4 GB",
                precision_loss: "3-5%",
                hardware: "Phone (iPhone 15)",
            },
        }
    }

    #[must_use]
    pub const fn style(self) -> StyleTag {
        match self {
            Self::FullPrecision => StyleTag::Slate,
            Self::Half => StyleTag::Indigo,
            Self::Int8 => StyleTag::Blue,
            Self::Int4 => StyleTag::Red,
        }
    }

    /// Render a single weight at this precision.
    #[must_use]
    pub fn render(self, w: f64) -> String {
        match self {
            Self::FullPrecision => to_fixed(w, 8),
            Self::Half => to_fixed(w, 4),
            // symmetric linear quantizer over [-1, 1], round half up
            Self::Int8 => format!("{:.2}", (w * 127.0 + 0.5).floor() / 127.0),
            // sign bit only
            Self::Int4 => String::from(if w > 0.0 { "1" } else { "0" }),
        }
    }
}

impl std::str::FromStr for QuantizationLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fp32" | "full" => Ok(Self::FullPrecision),
            "fp16" | "half" => Ok(Self::Half),
            "int8" => Ok(Self::Int8),
            "int4" => Ok(Self::Int4),
            other => anyhow::bail!("unknown quantization level: {other}"),
        }
    }
}

/// Format `w` with `digits` decimals, rounding exact ties away from zero.
///
/// `{:.N}` alone rounds a tie such as `0.03125` to even (`0.0312`).
fn to_fixed(w: f64, digits: usize) -> String {
    let magnitude = w.abs();
    // every finite f64 has at most 1074 fractional digits
    let exact = format!("{magnitude:.1074}");
    let is_tie = exact.split_once('.').is_some_and(|(_, frac)| {
        frac.get(digits..)
            .and_then(|rest| rest.strip_prefix('5'))
            .is_some_and(|rest| rest.bytes().all(|b| b == b'0'))
    });
    let magnitude = if is_tie { magnitude.next_up() } else { magnitude };
    let sign = if w < 0.0 { "-" } else { "" };
    format!("{sign}{magnitude:.digits$}")
}

/// Reduce `weights` to the display precision of `level`.
#[must_use]
pub fn quantize(weights: &[f64], level: QuantizationLevel) -> Vec<QuantizedWeight> {
    weights
        .iter()
        .map(|&w| QuantizedWeight {
            display_value: level.render(w),
            style: level.style(),
        })
        .collect()
}
