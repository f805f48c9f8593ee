use tabled::Table;

use crate::{
    Res,
    config::Config,
    info,
    paginate::Limit,
    types::{AlbumTableRow, TrackTableRow},
};

use super::{connect, spinner};

pub async fn album(config: &Config, id: &str) -> Res<()> {
    let mut client = connect(config).await?;

    let pb = spinner("Fetching album...");
    let result = client.get_album(id, config.market.as_deref()).await;
    pb.finish_and_clear();
    let album = result?;

    info!(
        "{} ({}) - {} tracks, {}",
        album.album.name, album.album.release_date, album.album.total_tracks, album.label
    );
    let rows: Vec<TrackTableRow> = album
        .tracks
        .items
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow::new(i + 1, t))
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn albums(config: &Config, ids: &[String]) -> Res<()> {
    let mut client = connect(config).await?;

    let pb = spinner("Fetching albums...");
    let result = client.get_albums(ids, config.market.as_deref()).await;
    pb.finish_and_clear();

    let rows: Vec<AlbumTableRow> = result?.iter().map(|a| AlbumTableRow::from(&a.album)).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn tracks(config: &Config, id: &str, limit: Limit, offset: u32) -> Res<()> {
    let mut client = connect(config).await?;

    let pb = spinner("Fetching album tracks...");
    let result = client
        .get_album_tracks(id, config.market.as_deref(), limit, offset)
        .await;
    pb.finish_and_clear();

    let first = offset as usize + 1;
    let rows: Vec<TrackTableRow> = result?
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow::new(first + i, t))
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn saved_albums(config: &Config, limit: Limit, offset: u32) -> Res<()> {
    let mut client = connect(config).await?;

    let pb = spinner("Fetching saved albums...");
    let result = client
        .get_users_saved_albums(config.market.as_deref(), limit, offset)
        .await;
    pb.finish_and_clear();

    let rows: Vec<AlbumTableRow> = result?
        .iter()
        .map(|saved| AlbumTableRow::from(&saved.album.album))
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn new_releases(config: &Config, limit: Limit, offset: u32) -> Res<()> {
    let mut client = connect(config).await?;

    let pb = spinner("Fetching new releases...");
    let result = client.get_new_releases(limit, offset).await;
    pb.finish_and_clear();

    let rows: Vec<AlbumTableRow> = result?.iter().map(AlbumTableRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
