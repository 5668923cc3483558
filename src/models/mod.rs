pub mod gacha;
pub mod question;
pub mod response;
pub mod user;

pub use gacha::*;
pub use question::*;
pub use response::*;
pub use user::*;
