//! Multi-ID endpoints split long ID lists into fixed-size groups, one request
//! per group, all in flight together.

use futures::{StreamExt, TryStreamExt, stream};
use reqwest::RequestBuilder;
use serde_json::Value;

use crate::{
    client::Requester,
    error::{Error, Result},
};

/// IDs per request for several-albums and the library endpoints.
pub const ALBUM_BATCH_SIZE: usize = 20;
/// IDs per request for several-artists.
pub const ARTIST_BATCH_SIZE: usize = 100;

/// Consecutive groups of at most `size` IDs, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan<'a> {
    groups: Vec<&'a [String]>,
}

impl<'a> BatchPlan<'a> {
    pub fn new(ids: &'a [String], size: usize) -> Self {
        Self {
            groups: ids.chunks(size.max(1)).collect(),
        }
    }

    pub fn groups(&self) -> &[&'a [String]] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub struct BatchChunker<'a> {
    requester: &'a Requester,
    size: usize,
    max_concurrency: usize,
}

impl<'a> BatchChunker<'a> {
    pub fn new(requester: &'a Requester, size: usize, max_concurrency: usize) -> Self {
        Self {
            requester,
            size: size.max(1),
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Runs one request per group and concatenates the decoded results.
    ///
    /// `build` creates the request for a group, `decode` turns that group's
    /// response body into items and receives the group's own IDs, so
    /// positional answers line up with the right IDs. Results come back in
    /// submission order, which is input order. Any failing group fails the
    /// whole call.
    pub async fn run<T, B, D>(&self, ids: &[String], build: B, decode: D) -> Result<Vec<T>>
    where
        B: Fn(&Requester, &[String]) -> RequestBuilder,
        D: Fn(Value, &[String]) -> Result<Vec<T>>,
    {
        let plan = BatchPlan::new(ids, self.size);
        let decode = &decode;

        let groups: Vec<Vec<T>> = stream::iter(plan.groups().iter().copied())
            .map(|group| {
                let request = build(self.requester, group);
                async move {
                    let body = self.requester.send(request).await?;
                    decode(body, group)
                }
            })
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        Ok(groups.into_iter().flatten().collect())
    }

    /// Like [`BatchChunker::run`] for endpoints that answer with no content.
    pub async fn run_unit<B>(&self, ids: &[String], build: B) -> Result<()>
    where
        B: Fn(&Requester, &[String]) -> RequestBuilder,
    {
        self.run(ids, build, |_, _| Ok::<Vec<()>, Error>(Vec::new()))
            .await
            .map(|_| ())
    }
}
