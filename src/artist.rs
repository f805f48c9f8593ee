use crate::{
    ApiReference,
    album::owned_ids,
    batch::ARTIST_BATCH_SIZE,
    client::market_params,
    error::Result,
    paginate::Limit,
    types::{ArtistData, Group, SeveralArtists, SimplifiedAlbum, TopTracks, Track},
};

impl ApiReference {
    pub async fn get_artist(&mut self, id: &str) -> Result<ArtistData> {
        let requester = self.ensure_valid_token().await?;
        requester
            .fetch(requester.get(&format!("/artists/{}", id)))
            .await
    }

    /// Several artists by ID, in the order of `ids`.
    pub async fn get_artists<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<Vec<ArtistData>> {
        let requester = self.ensure_valid_token().await?;
        let ids = owned_ids(ids);

        self.batcher(&requester, ARTIST_BATCH_SIZE)
            .run(
                &ids,
                |r, group| r.get("/artists").query(&[("ids", group.join(","))]),
                |body, _| Ok(serde_json::from_value::<SeveralArtists>(body)?.artists),
            )
            .await
    }

    /// An artist's albums, optionally restricted to some album groups.
    pub async fn get_artist_albums(
        &mut self,
        id: &str,
        include_groups: &[Group],
        market: Option<&str>,
        limit: Limit,
        offset: u32,
    ) -> Result<Vec<SimplifiedAlbum>> {
        let requester = self.ensure_valid_token().await?;

        let mut params = market_params(market);
        if !include_groups.is_empty() {
            let groups = include_groups
                .iter()
                .map(Group::as_str)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("include_groups".to_string(), groups));
        }

        self.paginator(&requester)
            .fetch_all(&format!("/artists/{}/albums", id), params, limit, offset, None)
            .await
    }

    pub async fn get_artist_top_tracks(&mut self, id: &str, market: Option<&str>) -> Result<Vec<Track>> {
        let requester = self.ensure_valid_token().await?;
        let request = requester
            .get(&format!("/artists/{}/top-tracks", id))
            .query(&market_params(market));

        Ok(requester.fetch::<TopTracks>(request).await?.tracks)
    }

    /// Artists similar to the given one, based on listening history.
    pub async fn get_artist_related_artists(&mut self, id: &str) -> Result<Vec<ArtistData>> {
        let requester = self.ensure_valid_token().await?;
        let request = requester.get(&format!("/artists/{}/related-artists", id));

        Ok(requester.fetch::<SeveralArtists>(request).await?.artists)
    }
}
