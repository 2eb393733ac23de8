use std::sync::Arc;

use anyhow::{Context, bail};
use gloo::net::http::Request;
use gloo::storage::{LocalStorage, Storage};
use hanbunko_core::{CachedWordList, WordLen, WordPool};

use crate::utils::StorageKey;

/// Relative to the served app root; trunk copies `static/` through as-is.
pub(crate) const WORDS_URL: &str = "static/words.txt";

/// The bundled list is 8-letter words, split 4 and 4.
pub(crate) const WORD_LEN: WordLen = 8;

impl StorageKey for CachedWordList {
    const KEY: &'static str = "hanbunko:words";
}

/// Loads the word pool: the versioned local-storage copy when it is usable,
/// otherwise a fresh fetch that then refreshes the copy best effort.
///
/// Cache trouble of any kind only means a refetch. An unreachable or
/// unusable source is the one fatal outcome, reported to the caller.
pub(crate) async fn load_word_pool() -> anyhow::Result<Arc<WordPool>> {
    if let Some(pool) = cached_pool() {
        log::debug!("word list served from local storage ({} words)", pool.len());
        return Ok(Arc::new(pool));
    }

    let text = fetch_words(WORDS_URL).await?;
    let pool = WordPool::from_text(&text, WORD_LEN).context("word list source is unusable")?;
    log::debug!("word list fetched ({} words)", pool.len());

    let entry = CachedWordList::wrap(text, WORD_LEN);
    if let Err(err) = LocalStorage::set(CachedWordList::KEY, &entry) {
        log::warn!("could not cache the word list: {:?}", err);
    }

    Ok(Arc::new(pool))
}

fn cached_pool() -> Option<WordPool> {
    let entry: CachedWordList = LocalStorage::get(CachedWordList::KEY).ok()?;
    entry.into_pool(WORD_LEN)
}

async fn fetch_words(url: &str) -> anyhow::Result<String> {
    let res = Request::get(url)
        .send()
        .await
        .with_context(|| format!("fetching {url}"))?;
    if !res.ok() {
        bail!("fetching {url}: HTTP {}", res.status());
    }
    res.text().await.with_context(|| format!("reading {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanbunko_core::{RandomRoundGenerator, RoundConfig, RoundGenerator};

    #[test]
    fn storage_key_uses_the_app_namespace() {
        assert_eq!(<CachedWordList as StorageKey>::KEY, "hanbunko:words");
    }

    #[test]
    fn the_bundled_list_parses_and_deals_a_round() {
        let text = include_str!("../static/words.txt");
        let pool = WordPool::from_text(text, WORD_LEN).unwrap();

        // no entry may fall to the length filter
        let lines = text.lines().filter(|line| !line.trim().is_empty()).count();
        assert_eq!(pool.len(), lines);

        let config = RoundConfig::new(6, 30, pool.len());
        let layout = RandomRoundGenerator::new(1).generate(&pool, config).unwrap();
        assert_eq!(layout.tile_count(), 12);
    }
}
