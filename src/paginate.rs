//! Offset pagination with concurrent follow-up pages.
//!
//! The Web API caps a page at 50 items. Fetching a longer collection starts
//! with one probe request, which also reveals `total`. The remaining pages are
//! then requested concurrently and merged back in offset order.

use futures::{StreamExt, TryStreamExt, stream};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    client::Requester,
    error::{Error, Result},
    types::Page,
};

pub const MAX_PAGE_SIZE: u32 = 50;

/// How many items a paginated operation should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    All,
    Count(u32),
}

impl Limit {
    /// Page size of the probe request.
    pub fn first_page_size(&self) -> u32 {
        match self {
            Limit::All => MAX_PAGE_SIZE,
            Limit::Count(n) => (*n).min(MAX_PAGE_SIZE),
        }
    }
}

impl Default for Limit {
    fn default() -> Self {
        Limit::Count(20)
    }
}

impl From<u32> for Limit {
    fn from(n: u32) -> Self {
        Limit::Count(n)
    }
}

impl From<Option<u32>> for Limit {
    fn from(n: Option<u32>) -> Self {
        n.map_or(Limit::All, Limit::Count)
    }
}

/// The follow-up requests needed after a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequestPlan {
    pub path: String,
    pub fixed_params: Vec<(String, String)>,
    pub offsets: Vec<u32>,
    end: u32,
}

impl PageRequestPlan {
    /// Plans the pages after a probe at `start` that reported `total` items.
    ///
    /// The probe covers `start..start + 50`. Nothing follows unless more than
    /// one page was asked for. The range never extends past `total`, nor past
    /// `start + n` for [`Limit::Count`].
    pub fn new(
        path: impl Into<String>,
        fixed_params: Vec<(String, String)>,
        start: u32,
        limit: Limit,
        total: u32,
    ) -> Self {
        let end = match limit {
            Limit::All => total,
            Limit::Count(n) if n > MAX_PAGE_SIZE => start.saturating_add(n).min(total),
            Limit::Count(_) => start,
        };

        let offsets = (start.saturating_add(MAX_PAGE_SIZE)..end)
            .step_by(MAX_PAGE_SIZE as usize)
            .collect();

        Self {
            path: path.into(),
            fixed_params,
            offsets,
            end,
        }
    }

    /// `limit` for the page starting at `offset`; trimmed on the last page.
    pub fn page_limit(&self, offset: u32) -> u32 {
        self.end.saturating_sub(offset).min(MAX_PAGE_SIZE)
    }

    pub fn request_count(&self) -> usize {
        self.offsets.len()
    }
}

pub struct PaginationEngine<'a> {
    requester: &'a Requester,
    max_concurrency: usize,
}

impl<'a> PaginationEngine<'a> {
    pub fn new(requester: &'a Requester, max_concurrency: usize) -> Self {
        Self {
            requester,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Fetches up to `limit` items starting at `offset`.
    ///
    /// `envelope` names the key the page is wrapped under, for endpoints such
    /// as new releases that answer `{"albums": {...page...}}`.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        fixed_params: Vec<(String, String)>,
        limit: Limit,
        offset: u32,
        envelope: Option<&str>,
    ) -> Result<Vec<T>> {
        if limit == Limit::Count(0) {
            return Ok(Vec::new());
        }

        let probe: Page<T> = self
            .fetch_page(path, &fixed_params, offset, limit.first_page_size(), envelope)
            .await?;

        let plan = PageRequestPlan::new(path, fixed_params, offset, limit, probe.total);
        self.complete(probe.items, &plan, envelope).await
    }

    /// Fetches every page of `plan` concurrently and appends them to `first`.
    ///
    /// Fails with the first error observed; no partial result is returned.
    pub async fn complete<T: DeserializeOwned>(
        &self,
        first: Vec<T>,
        plan: &PageRequestPlan,
        envelope: Option<&str>,
    ) -> Result<Vec<T>> {
        if plan.offsets.is_empty() {
            return Ok(first);
        }

        let mut pages: Vec<(u32, Vec<T>)> = stream::iter(plan.offsets.iter().copied())
            .map(|offset| async move {
                let page: Page<T> = self
                    .fetch_page(
                        &plan.path,
                        &plan.fixed_params,
                        offset,
                        plan.page_limit(offset),
                        envelope,
                    )
                    .await?;
                Ok::<_, Error>((offset, page.items))
            })
            .buffer_unordered(self.max_concurrency)
            .try_collect()
            .await?;

        // completion order is arbitrary
        pages.sort_unstable_by_key(|(offset, _)| *offset);

        let mut items = first;
        for (_, page) in pages {
            items.extend(page);
        }
        Ok(items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        fixed_params: &[(String, String)],
        offset: u32,
        limit: u32,
        envelope: Option<&str>,
    ) -> Result<Page<T>> {
        let request = self
            .requester
            .get(path)
            .query(fixed_params)
            .query(&[("limit", limit), ("offset", offset)]);

        let mut body = self.requester.send(request).await?;
        if let Some(key) = envelope {
            body = body.get_mut(key).map(Value::take).unwrap_or(Value::Null);
        }

        Ok(serde_json::from_value(body)?)
    }
}
