// src/pipeline/refresh.rs

//! Stale-while-revalidate refresh orchestration.
//!
//! The scheduler shows the cached payload immediately when one exists,
//! fetches in the background, and re-renders only when the content
//! digest changes. An unchanged response triggers a bounded repoll to
//! outrun upstream propagation lag right after a publish. A fetch
//! failure falls back only when no cache exists; cache takes precedence
//! over a transient error.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::Result;
use crate::models::{Config, MenuDocument};
use crate::parser::MenuParser;
use crate::pipeline::content_digest;
use crate::services::FetchText;
use crate::storage::MenuCache;

/// Consumer of refresh results.
///
/// The renderer behind this trait owns the loading indicator: loading is
/// visible until the first callback fires, whichever one that is.
pub trait RenderSink {
    /// Cached content shown ahead of the network refresh.
    fn cache_shown(&mut self, doc: &MenuDocument);

    /// Fresh (or first) content rendered.
    fn rendered(&mut self, doc: &MenuDocument);

    /// No cache existed and the fetch failed; show the static fallback.
    fn fallback(&mut self);
}

/// Terminal state of one refresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh content was rendered and cached
    Refreshed,
    /// No change detected; previously rendered content stands
    Unchanged,
    /// No cache existed and the fetch failed; fallback was signalled
    FellBack,
}

/// One-shot refresh scheduler.
///
/// `run` consumes the scheduler, so a single instance can never issue
/// concurrent or repeated refresh flows; the triggering event cannot
/// re-arm. Repoll attempts are strictly sequential, each subject to the
/// same per-attempt timeout as the initial fetch.
pub struct MenuRefresher {
    fetcher: Arc<dyn FetchText>,
    cache: Arc<dyn MenuCache>,
    parser: MenuParser,
    repoll_attempts: u32,
    repoll_delay: Duration,
}

impl MenuRefresher {
    /// Create a scheduler over the given fetch and cache backends.
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn FetchText>,
        cache: Arc<dyn MenuCache>,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            cache,
            parser: MenuParser::new(&config.parser)?,
            repoll_attempts: config.fetch.repoll_attempts,
            repoll_delay: Duration::from_millis(config.fetch.repoll_delay_ms),
        })
    }

    /// Run the refresh flow once.
    pub async fn run<S: RenderSink>(self, sink: &mut S) -> Result<RefreshOutcome> {
        let cached = match self.cache.read().await {
            Ok(cached) => cached,
            Err(error) => {
                log::warn!("Cache read failed, treating as empty: {error}");
                None
            }
        };

        if let Some(raw) = &cached {
            sink.cache_shown(&self.parser.parse(raw));
        }

        let fresh = match self.fetcher.fetch_text().await {
            Ok(text) => text,
            Err(error) => {
                log::error!("Menu fetch failed: {error}");
                return Ok(if cached.is_some() {
                    // The cached render stays in place
                    RefreshOutcome::Unchanged
                } else {
                    sink.fallback();
                    RefreshOutcome::FellBack
                });
            }
        };

        let fresh_digest = content_digest(&fresh);
        let changed = match &cached {
            Some(raw) => content_digest(raw) != fresh_digest,
            None => true,
        };

        if changed {
            log::info!("Menu content changed, rendering fresh copy");
            sink.rendered(&self.parser.parse(&fresh));
            self.store(&fresh).await;
            return Ok(RefreshOutcome::Refreshed);
        }

        log::debug!("Menu unchanged, entering bounded repoll");
        self.repoll(&fresh_digest, sink).await
    }

    /// Wait for the one-shot visibility trigger, then run.
    ///
    /// A dropped sender means no trigger region exists; the flow starts
    /// at once.
    pub async fn run_on_visible<S: RenderSink>(
        self,
        visible: oneshot::Receiver<()>,
        sink: &mut S,
    ) -> Result<RefreshOutcome> {
        let _ = visible.await;
        self.run(sink).await
    }

    /// Callback-based entry point.
    pub async fn start<A, B, C>(
        self,
        on_cache_shown: A,
        on_rendered: B,
        on_fallback: C,
    ) -> Result<RefreshOutcome>
    where
        A: FnMut(&MenuDocument),
        B: FnMut(&MenuDocument),
        C: FnMut(),
    {
        let mut sink = CallbackSink {
            on_cache_shown,
            on_rendered,
            on_fallback,
        };
        self.run(&mut sink).await
    }

    /// Up to `repoll_attempts` follow-up fetches, each after a fixed
    /// delay. The first digest that differs from the baseline renders
    /// and stops; exhausting all attempts stops silently.
    async fn repoll<S: RenderSink>(&self, baseline: &str, sink: &mut S) -> Result<RefreshOutcome> {
        for attempt in 1..=self.repoll_attempts {
            tokio::time::sleep(self.repoll_delay).await;

            match self.fetcher.fetch_text().await {
                Ok(text) => {
                    if content_digest(&text) != baseline {
                        log::info!("Menu changed on repoll attempt {attempt}");
                        sink.rendered(&self.parser.parse(&text));
                        self.store(&text).await;
                        return Ok(RefreshOutcome::Refreshed);
                    }
                    log::debug!("Repoll attempt {attempt}: no change");
                }
                Err(error) => {
                    log::warn!("Repoll attempt {attempt} failed: {error}");
                }
            }
        }

        Ok(RefreshOutcome::Unchanged)
    }

    /// Persist fresh text; a failed write is reported and ignored.
    async fn store(&self, raw: &str) {
        if let Err(error) = self.cache.write(raw).await {
            log::warn!("Cache write failed (continuing): {error}");
        }
    }
}

struct CallbackSink<A, B, C> {
    on_cache_shown: A,
    on_rendered: B,
    on_fallback: C,
}

impl<A, B, C> RenderSink for CallbackSink<A, B, C>
where
    A: FnMut(&MenuDocument),
    B: FnMut(&MenuDocument),
    C: FnMut(),
{
    fn cache_shown(&mut self, doc: &MenuDocument) {
        (self.on_cache_shown)(doc);
    }

    fn rendered(&mut self, doc: &MenuDocument) {
        (self.on_rendered)(doc);
    }

    fn fallback(&mut self) {
        (self.on_fallback)();
    }
}
