use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    models::{GachaResult, GachaRow, Rarity},
    services::table::read_table,
    utils::{AppError, RandomSource},
};

/// Two-stage reward draw: roll a rarity first, then pick uniformly among the
/// rows of that rarity. The rare rate therefore does not depend on how many
/// rows each tier has.
pub struct GachaService {
    table_file: PathBuf,
    super_rare_rate: f64,
    random: Arc<dyn RandomSource>,
}

impl GachaService {
    pub fn new(table_file: impl Into<PathBuf>, super_rare_rate: f64, random: Arc<dyn RandomSource>) -> Self {
        Self {
            table_file: table_file.into(),
            super_rare_rate,
            random,
        }
    }

    pub fn roll_rarity(&self) -> Rarity {
        if self.random.roll() < self.super_rare_rate {
            Rarity::SuperRare
        } else {
            Rarity::Common
        }
    }

    pub async fn draw(&self) -> Result<GachaResult, AppError> {
        let rows: Vec<GachaRow> = read_table(&self.table_file).await?.ok_or_else(|| {
            AppError::NotFound(format!("找不到轉蛋資料檔（{}）", self.table_name()))
        })?;

        let rarity = self.roll_rarity();
        let mut matching: Vec<GachaRow> = rows.into_iter().filter(|row| row.is(rarity)).collect();
        if matching.is_empty() {
            return Err(AppError::NoMatchingRarity(format!(
                "沒有符合稀有度 '{}' 的角色",
                rarity.label()
            )));
        }

        let row = matching.swap_remove(self.random.pick(matching.len()));
        log::debug!("🎰 Drew {} ({})", row.character, rarity.label());

        Ok(GachaResult {
            character: row.character,
            image: row.image,
            rarity,
        })
    }

    fn table_name(&self) -> String {
        self.table_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.table_file.display().to_string())
    }
}
