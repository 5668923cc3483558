use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    models::{Question, QuestionRow, Tier},
    services::table::read_table,
    utils::{AppError, RandomSource},
};

/// Draws random questions from the junior and senior tables.
pub struct QuestionService {
    junior_file: PathBuf,
    senior_file: PathBuf,
    random: Arc<dyn RandomSource>,
}

impl QuestionService {
    pub fn new(
        junior_file: impl Into<PathBuf>,
        senior_file: impl Into<PathBuf>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            junior_file: junior_file.into(),
            senior_file: senior_file.into(),
            random,
        }
    }

    pub fn table_for(&self, tier: Tier) -> &Path {
        match tier {
            Tier::Junior => &self.junior_file,
            Tier::Senior => &self.senior_file,
        }
    }

    /// One uniformly chosen question, or `Ok(None)` when the tier's table is
    /// missing or has no rows.
    pub async fn draw(&self, tier: Tier) -> Result<Option<Question>, AppError> {
        let path = self.table_for(tier);
        let mut rows: Vec<QuestionRow> = match read_table(path).await? {
            Some(rows) if !rows.is_empty() => rows,
            Some(_) => {
                log::warn!("⚠️  Question table {} has no rows", path.display());
                return Ok(None);
            }
            None => {
                log::warn!("⚠️  Question table {} not found", path.display());
                return Ok(None);
            }
        };

        let index = self.random.pick(rows.len());
        let question = Question::try_from(rows.swap_remove(index))?;
        Ok(Some(question))
    }
}
