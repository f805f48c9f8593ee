use tabled::Table;

use crate::{
    Res,
    config::Config,
    info,
    paginate::Limit,
    types::{AlbumTableRow, ArtistTableRow, Group},
};

use super::{connect, spinner};

pub async fn artist(config: &Config, id: &str, related: bool) -> Res<()> {
    let mut client = connect(config).await?;

    let pb = spinner("Fetching artist...");
    let result = client.get_artist(id).await;
    pb.finish_and_clear();
    let artist = result?;

    println!("{}", Table::new([ArtistTableRow::from(&artist)]));

    if related {
        let pb = spinner("Fetching related artists...");
        let result = client.get_artist_related_artists(id).await;
        pb.finish_and_clear();

        info!("Artists related to {}", artist.artist.name);
        let rows: Vec<ArtistTableRow> = result?.iter().map(ArtistTableRow::from).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

pub async fn artist_albums(
    config: &Config,
    id: &str,
    groups: &[Group],
    limit: Limit,
    offset: u32,
) -> Res<()> {
    let mut client = connect(config).await?;

    let pb = spinner("Fetching artist albums...");
    let result = client
        .get_artist_albums(id, groups, config.market.as_deref(), limit, offset)
        .await;
    pb.finish_and_clear();

    let rows: Vec<AlbumTableRow> = result?.iter().map(AlbumTableRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
