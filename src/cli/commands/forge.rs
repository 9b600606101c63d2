//! Sample data command handler

use std::io::Write;

use crate::config::Config;
use crate::db::Store;
use crate::models::movie::MovieInput;

/// (title, year) pairs inserted by `watchlist forge`.
pub const SAMPLE_MOVIES: [(&str, &str); 10] = [
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
    ("Devils on the Doorstep", "1999"),
    ("WALL-E", "2008"),
    ("The Pork of Music", "2012"),
];

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    forge(&store, &mut std::io::stdout()).await
}

pub async fn forge(store: &Store, out: &mut impl Write) -> anyhow::Result<()> {
    let inputs = SAMPLE_MOVIES
        .iter()
        .map(|(title, year)| MovieInput::parse(title, year))
        .collect::<Result<Vec<_>, _>>()?;

    let added = store.add_movies(&inputs).await?;
    tracing::info!("Seeded {} sample movies", added);

    writeln!(out, "Done.")?;
    Ok(())
}
