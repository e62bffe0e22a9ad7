use portfolio3d::{AppConfig, run};

const SEED_VAR: &str = "PORTFOLIO3D_SEED";

fn config_from_env() -> AppConfig {
    let config = AppConfig::new();
    match std::env::var(SEED_VAR) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(seed) => config.seed(seed),
            Err(e) => {
                log::warn!("[app] ignoring {}={:?}: {}", SEED_VAR, raw, e);
                config
            }
        },
        Err(_) => config,
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(config_from_env()) {
        log::error!("[app] {}", e);
        std::process::exit(1);
    }
}
