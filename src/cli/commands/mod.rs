mod admin;
mod forge;
mod init_db;

pub use admin::{AdminOutcome, admin, cmd_admin};
pub use forge::{SAMPLE_MOVIES, cmd_forge, forge};
pub use init_db::{cmd_init_db, init_db};
