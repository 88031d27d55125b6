use anyhow::{Context, bail};

use fight_picker::catalog;
use fight_picker::config::{self, AppConfig};
use fight_picker::predict::{PredictRequest, request_prediction};

// One-shot prediction without the terminal UI:
//   predict "<fighter1>" "<fighter2>"
fn main() -> anyhow::Result<()> {
    config::load_env_files();
    let cfg = AppConfig::from_env();

    let mut args = std::env::args().skip(1);
    let (Some(fighter1), Some(fighter2)) = (args.next(), args.next()) else {
        bail!("usage: predict <fighter1> <fighter2>");
    };
    if fighter1 == fighter2 {
        bail!("pick two different fighters");
    }

    let fighters = match &cfg.fighter_data_path {
        Some(path) => catalog::load_catalog_file(path)?,
        None => catalog::embedded_catalog()?,
    };
    for name in [&fighter1, &fighter2] {
        if !fighters.iter().any(|f| &f.name == name) {
            eprintln!("warning: {name} is not in the fighter catalog");
        }
    }

    let request = PredictRequest { fighter1, fighter2 };
    let result = request_prediction(&cfg, &request)
        .with_context(|| format!("prediction via {} failed", cfg.predict_url))?;

    println!("Winner: {}", result.winner);
    if let Some(loser) = &result.loser {
        println!("Loser: {loser}");
    }
    println!("Probability: {}%", result.percent());
    Ok(())
}
