use std::env;
use std::path::PathBuf;

use datafit_core::{FormatHints, QualityConfig};
use datafit_eval::QualityService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut csv_path: Option<PathBuf> = None;
    let mut delimiter = b',';

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--delimiter" => {
                let value = args.next().ok_or("missing --delimiter value")?;
                delimiter = *value.as_bytes().first().ok_or("empty --delimiter value")?;
            }
            _ => {
                if csv_path.is_none() {
                    csv_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let csv_path = csv_path.ok_or("missing csv path")?;
    let bytes = std::fs::read(&csv_path)?;

    let hints = FormatHints {
        delimiter,
        ..FormatHints::default()
    };
    let service = QualityService::new(QualityConfig::default())?;
    let result = service.evaluate_raw(&bytes, &hints)?;

    println!("quality_score={}", result.quality_score);
    println!("ok_for_model={}", result.ok_for_model);
    for flag in result.flags.raised() {
        println!("flag={flag}");
    }
    Ok(())
}
