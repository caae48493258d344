// Single-threaded driver: feeds events to the page and executes its effects.
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::client::Effect;
use crate::client::cache::{QueryCache, QueryKey};
use crate::client::composer::ComposerEvent;
use crate::client::page::{HomePage, PageEvent, PageView};
use crate::client::rpc::RpcClient;
use crate::models::post::PostWithAuthor;

pub struct FeedApp<C: RpcClient> {
    rpc: C,
    cache: QueryCache,
    page: HomePage,
    notices: Vec<String>,
}

impl<C: RpcClient> FeedApp<C> {
    pub fn new(rpc: C) -> Self {
        Self {
            rpc,
            cache: QueryCache::new(),
            page: HomePage::new(),
            notices: Vec::new(),
        }
    }

    pub async fn mount(&mut self) {
        let effects = self.page.mount();
        self.run(effects).await;
    }

    /// Reduces `event` without executing anything; pair with [`FeedApp::run`].
    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        self.page.dispatch(event)
    }

    pub async fn dispatch(&mut self, event: PageEvent) {
        let effects = self.handle(event);
        self.run(effects).await;
    }

    /// Executes effects in order, including the ones their completions produce.
    pub async fn run(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let follow_up = match effect {
                Effect::FetchFeed => self.fetch_feed().await,
                Effect::InvalidateFeed => {
                    self.cache.invalidate(&QueryKey::posts_get_all());
                    self.fetch_feed().await
                }
                Effect::CreatePost { request_id, content } => {
                    let outcome = self.rpc.create_post(&content).await;
                    self.page.dispatch(PageEvent::Composer(ComposerEvent::CreateFinished {
                        request_id,
                        outcome,
                    }))
                }
                Effect::Notify(message) => {
                    warn!("notice: {}", message);
                    self.notices.push(message);
                    Vec::new()
                }
            };
            queue.extend(follow_up);
        }
    }

    async fn fetch_feed(&mut self) -> Vec<Effect> {
        let key = QueryKey::posts_get_all();
        if let Some(rows) = self.cache.get_fresh::<Vec<PostWithAuthor>>(&key) {
            debug!("posts.getAll served from cache");
            return self.page.dispatch(PageEvent::FeedFetched(Some(rows)));
        }

        let result = self.rpc.get_all_posts().await;
        let rows = match result {
            Ok(rows) => {
                if let Err(e) = self.cache.set(key, &rows) {
                    warn!("could not cache posts.getAll: {}", e);
                }
                Some(rows)
            }
            Err(e) => {
                warn!("posts.getAll failed: {}", e);
                None
            }
        };
        self.page.dispatch(PageEvent::FeedFetched(rows))
    }

    pub fn view(&self, now: DateTime<Utc>) -> PageView {
        self.page.view(now)
    }

    pub fn page(&self) -> &HomePage {
        &self.page
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn rpc(&self) -> &C {
        &self.rpc
    }

    /// Error notices raised so far, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}
