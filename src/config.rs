use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_USERS_FILE: &str = "users.json";
pub const DEFAULT_JUNIOR_QUESTIONS_FILE: &str = "國中2000單字.csv";
pub const DEFAULT_SENIOR_QUESTIONS_FILE: &str = "高中5000單字.csv";
pub const DEFAULT_GACHA_FILE: &str = "轉蛋.csv";
pub const DEFAULT_SUPER_RARE_RATE: f64 = 0.05;

/// Runtime configuration, read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub users_file: PathBuf,
    pub junior_questions_file: PathBuf,
    pub senior_questions_file: PathBuf,
    pub gacha_file: PathBuf,
    pub super_rare_rate: f64,
    pub rng_seed: Option<u64>,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| ".".to_string()));
        let file = |key: &str, default: &str| {
            resolve(&data_dir, &lookup(key).unwrap_or_else(|| default.to_string()))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("⚠️  Invalid PORT '{}', using 5000", raw);
                5000
            }),
            None => 5000,
        };

        let super_rare_rate = match lookup("GACHA_SUPER_RARE_RATE") {
            Some(raw) => match raw.parse::<f64>() {
                Ok(rate) if rate.is_finite() => rate.clamp(0.0, 1.0),
                _ => {
                    log::warn!(
                        "⚠️  Invalid GACHA_SUPER_RARE_RATE '{}', using {}",
                        raw,
                        DEFAULT_SUPER_RARE_RATE
                    );
                    DEFAULT_SUPER_RARE_RATE
                }
            },
            None => DEFAULT_SUPER_RARE_RATE,
        };

        let rng_seed = lookup("RNG_SEED").and_then(|raw| match raw.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                log::warn!("⚠️  Invalid RNG_SEED '{}', draws stay unseeded", raw);
                None
            }
        });

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            users_file: file("USERS_FILE", DEFAULT_USERS_FILE),
            junior_questions_file: file("JUNIOR_QUESTIONS_FILE", DEFAULT_JUNIOR_QUESTIONS_FILE),
            senior_questions_file: file("SENIOR_QUESTIONS_FILE", DEFAULT_SENIOR_QUESTIONS_FILE),
            gacha_file: file("GACHA_FILE", DEFAULT_GACHA_FILE),
            super_rare_rate,
            rng_seed,
            allowed_origins,
        }
    }
}

fn resolve(data_dir: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
