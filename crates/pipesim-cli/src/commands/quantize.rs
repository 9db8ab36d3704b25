use std::io::Write;

use serde::Serialize;

use pipesim_lib::output::{ConsoleOutput, write_json};
use pipesim_lib::quantize::{
    LevelProfile, QuantizationLevel, QuantizedWeight, SAMPLE_WEIGHTS, quantize,
};

use super::Format;

#[derive(Serialize)]
struct LevelReport {
    level: QuantizationLevel,
    profile: LevelProfile,
    weights: Vec<QuantizedWeight>,
}

/// Run the `pipesim quantize` command.
pub fn run_quantize<OUT, ERR>(
    level: Option<QuantizationLevel>,
    weights: &[f64],
    format: Format,
    output: &mut dyn ConsoleOutput<OUT, ERR>,
) -> anyhow::Result<()>
where
    OUT: Write,
    ERR: Write,
{
    let weights = if weights.is_empty() {
        &SAMPLE_WEIGHTS[..]
    } else {
        weights
    };
    let levels = level.map_or_else(|| QuantizationLevel::ALL.to_vec(), |l| vec![l]);

    let reports: Vec<LevelReport> = levels
        .into_iter()
        .map(|level| LevelReport {
            level,
            profile: level.profile(),
            weights: quantize(weights, level),
        })
        .collect();

    match format {
        Format::Json => write_json(output.stdout(), &reports)?,
        Format::Text => {
            let out = output.stdout();
            for report in &reports {
                let p = &report.profile;
                writeln!(
                    out,
                    "{}: size {}, ram {}, loss {}, runs on {}",
                    p.name, p.model_size, p.ram, p.precision_loss, p.hardware
                )?;
                let values: Vec<&str> = report
                    .weights
                    .iter()
                    .map(|w| w.display_value.as_str())
                    .collect();
                writeln!(out, "  {}", values.join(" "))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_util::run_cli;

    #[test]
    fn try_run_quantize_single_level() {
        let (stdout, _) = run_cli(&[
            "pipesim",
            "quantize",
            "-l",
            "int8",
            "--weights",
            "0.5,-0.98765432",
        ])
        .unwrap();
        assert_eq!(
            stdout,
            "INT8: size 7 GB, ram 8 GB, loss 0.5%, runs on Laptop (MacBook M1)\n  0.50 -0.98\n"
        );
    }

    #[test]
    fn try_run_quantize_sample_weights_int4() {
        let (stdout, _) = run_cli(&["pipesim", "quantize", "--level", "int4"]).unwrap();
        assert!(stdout.ends_with("  1 0 1 0 1 1 0 1 1 0 1 0\n"), "{stdout}");
    }

    #[test]
    fn try_run_quantize_all_levels() {
        let (stdout, _) = run_cli(&["pipesim", "quantize", "--weights=0.25"]).unwrap();
        assert_eq!(stdout.lines().count(), 8);
        assert!(stdout.contains("  0.25000000\n"));
        assert!(stdout.contains("  0.2500\n"));
        assert!(stdout.contains("  0.25\n"));
        assert!(stdout.contains("  1\n"));
    }

    #[test]
    fn try_run_quantize_json_styles() {
        let (stdout, _) =
            run_cli(&["pipesim", "--json", "quantize", "-l", "fp16", "--weights", "-0.5"]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(parsed[0]["level"], "half");
        assert_eq!(parsed[0]["weights"][0]["display_value"], "-0.5000");
        assert_eq!(parsed[0]["weights"][0]["style"], "indigo");
    }

    #[test]
    fn try_run_quantize_rejects_unknown_level() {
        assert!(run_cli(&["pipesim", "quantize", "-l", "int2"]).is_err());
    }
}
