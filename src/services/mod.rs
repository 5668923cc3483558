pub mod gacha_service;
pub mod question_service;
pub mod table;
pub mod user_service;

pub use gacha_service::*;
pub use question_service::*;
pub use user_service::*;
