//! Database initialization command handler

use std::io::Write;

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_init_db(config: &Config, drop_existing: bool) -> anyhow::Result<()> {
    let store = Store::connect(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    init_db(&store, drop_existing, &mut std::io::stdout()).await
}

pub async fn init_db(store: &Store, drop_existing: bool, out: &mut impl Write) -> anyhow::Result<()> {
    store.init_schema(drop_existing).await?;
    writeln!(out, "Initialized database.")?;
    Ok(())
}
