use actix_web::web;
use std::sync::Arc;

use crate::{
    config::AppConfig,
    database::JsonFileUserRepository,
    services::{GachaService, QuestionService, UserService},
    utils::{RandomSource, SeededRandom, ThreadRandom},
};

/// Shared handler state. Built once and cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<AppConfig>,
    pub questions: web::Data<QuestionService>,
    pub gacha: web::Data<GachaService>,
    pub users: web::Data<UserService>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let random: Arc<dyn RandomSource> = match config.rng_seed {
            Some(seed) => {
                log::info!("🎲 Using seeded random source ({})", seed);
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        };
        Self::with_random(config, random)
    }

    pub fn with_random(config: AppConfig, random: Arc<dyn RandomSource>) -> Self {
        let questions = QuestionService::new(
            &config.junior_questions_file,
            &config.senior_questions_file,
            random.clone(),
        );
        let gacha = GachaService::new(&config.gacha_file, config.super_rare_rate, random);
        let users = UserService::new(Arc::new(JsonFileUserRepository::new(&config.users_file)));

        Self {
            config: web::Data::new(config),
            questions: web::Data::new(questions),
            gacha: web::Data::new(gacha),
            users: web::Data::new(users),
        }
    }

    pub fn attach(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.config.clone())
            .app_data(self.questions.clone())
            .app_data(self.gacha.clone())
            .app_data(self.users.clone());
    }
}
