use crate::conf::{ConfigError, ConfigOverrides, load_config};
use miette::Report;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(Some(&path), &ConfigOverrides::default()) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ baseline {}", cfg.baseline);
            println!("✔ rw2 {}", cfg.rw2);
            println!(
                "✔ correlation window {}s ({:?})",
                cfg.correlation.window_secs, cfg.correlation.match_policy
            );
            Ok(())
        }
        Err(err) => {
            eprint!("{}", render_config_error(err, plain));
            std::process::exit(1);
        }
    }
}

/// Plain mode prints the bare message; otherwise the error goes through
/// miette's report handler. Hints are appended in both modes.
pub fn render_config_error(err: ConfigError, plain: bool) -> String {
    let hint = config_error_hint(&err);
    let mut out = if plain {
        format!("{err}\n")
    } else {
        format!("\n{:?}\n", Report::new(err))
    };
    if let Some(hint) = hint {
        out.push_str(&format!("\n{hint}\n"));
    }
    out
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidDataRate { .. } => Some(
            "Data rates are indices from 0 (slowest) to 5 (fastest).\n\
             \n\
             Example:\n\
             \n\
             [baseline]\n\
             data_rate = 0",
        ),

        ConfigError::InvalidTxPower { .. } => Some(
            "Transmit powers are indices from 0 to 7.\n\
             \n\
             Example:\n\
             \n\
             [rw2]\n\
             tx_power = 0",
        ),

        ConfigError::InvalidWindow(_) => Some(
            "The correlation window is the longest gap, in seconds, between a send\n\
             and the receive that confirms it.\n\
             \n\
             Example:\n\
             \n\
             [correlation]\n\
             window_secs = 3.0",
        ),

        ConfigError::Parse { .. } => Some(
            "Known sections are [baseline], [rw2] and [correlation].\n\
             \n\
             Run `adrscope config init` to write a file with every key.",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
