use std::collections::HashMap;

use serde_json::json;

use crate::{
    ApiReference,
    auth::Scope,
    batch::ALBUM_BATCH_SIZE,
    client::market_params,
    error::{Error, Result},
    paginate::{Limit, PageRequestPlan},
    types::{AlbumData, SavedAlbum, SeveralAlbums, SimplifiedAlbum, SimplifiedTrack},
};

impl ApiReference {
    /// Catalog information for a single album, with every track.
    ///
    /// The album response embeds only the first page of its tracks; longer
    /// albums get the rest from the album tracks endpoint.
    pub async fn get_album(&mut self, id: &str, market: Option<&str>) -> Result<AlbumData> {
        let requester = self.ensure_valid_token().await?;

        let request = requester
            .get(&format!("/albums/{}", id))
            .query(&market_params(market));
        let mut album: AlbumData = requester.fetch(request).await?;

        let plan = PageRequestPlan::new(
            format!("/albums/{}/tracks", id),
            market_params(market),
            0,
            Limit::All,
            album.tracks.total,
        );
        let first = std::mem::take(&mut album.tracks.items);
        album.tracks.items = self.paginator(&requester).complete(first, &plan, None).await?;

        Ok(album)
    }

    /// Several albums by ID, in the order of `ids`.
    pub async fn get_albums<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        market: Option<&str>,
    ) -> Result<Vec<AlbumData>> {
        let requester = self.ensure_valid_token().await?;
        let ids = owned_ids(ids);

        self.batcher(&requester, ALBUM_BATCH_SIZE)
            .run(
                &ids,
                |r, group| {
                    r.get("/albums")
                        .query(&[("ids", group.join(","))])
                        .query(&market_params(market))
                },
                |body, _| Ok(serde_json::from_value::<SeveralAlbums>(body)?.albums),
            )
            .await
    }

    pub async fn get_album_tracks(
        &mut self,
        id: &str,
        market: Option<&str>,
        limit: Limit,
        offset: u32,
    ) -> Result<Vec<SimplifiedTrack>> {
        let requester = self.ensure_valid_token().await?;

        self.paginator(&requester)
            .fetch_all(
                &format!("/albums/{}/tracks", id),
                market_params(market),
                limit,
                offset,
                None,
            )
            .await
    }

    /// Albums saved in the current user's library.
    pub async fn get_users_saved_albums(
        &mut self,
        market: Option<&str>,
        limit: Limit,
        offset: u32,
    ) -> Result<Vec<SavedAlbum>> {
        self.check_scopes(&[Scope::UserLibraryRead])?;
        let requester = self.ensure_valid_token().await?;

        self.paginator(&requester)
            .fetch_all("/me/albums", market_params(market), limit, offset, None)
            .await
    }

    pub async fn save_albums_for_user<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<()> {
        self.check_scopes(&[Scope::UserLibraryModify])?;
        let requester = self.ensure_valid_token().await?;
        let ids = owned_ids(ids);

        self.batcher(&requester, ALBUM_BATCH_SIZE)
            .run_unit(&ids, |r, group| r.put("/me/albums").json(&json!({ "ids": group })))
            .await
    }

    pub async fn remove_users_saved_albums<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<()> {
        self.check_scopes(&[Scope::UserLibraryModify])?;
        let requester = self.ensure_valid_token().await?;
        let ids = owned_ids(ids);

        self.batcher(&requester, ALBUM_BATCH_SIZE)
            .run_unit(&ids, |r, group| {
                r.delete("/me/albums").json(&json!({ "ids": group }))
            })
            .await
    }

    /// Whether each album is saved in the current user's library, keyed by ID.
    pub async fn check_users_saved_albums<S: AsRef<str>>(
        &mut self,
        ids: &[S],
    ) -> Result<HashMap<String, bool>> {
        self.check_scopes(&[Scope::UserLibraryRead])?;
        let requester = self.ensure_valid_token().await?;
        let ids = owned_ids(ids);

        let flags = self
            .batcher(&requester, ALBUM_BATCH_SIZE)
            .run(
                &ids,
                |r, group| {
                    r.get("/me/albums/contains")
                        .query(&[("ids", group.join(","))])
                },
                |body, group| {
                    let saved: Vec<bool> = serde_json::from_value(body)?;
                    if saved.len() != group.len() {
                        return Err(Error::RemoteRequestFailed(format!(
                            "expected {} saved flags, got {}",
                            group.len(),
                            saved.len()
                        )));
                    }
                    Ok(group.iter().cloned().zip(saved).collect::<Vec<_>>())
                },
            )
            .await?;

        Ok(flags.into_iter().collect())
    }

    /// New album releases featured in Spotify.
    pub async fn get_new_releases(&mut self, limit: Limit, offset: u32) -> Result<Vec<SimplifiedAlbum>> {
        let requester = self.ensure_valid_token().await?;

        self.paginator(&requester)
            .fetch_all("/browse/new-releases", Vec::new(), limit, offset, Some("albums"))
            .await
    }
}

pub(crate) fn owned_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter().map(|id| id.as_ref().to_string()).collect()
}
