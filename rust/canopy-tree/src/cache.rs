//! Lazy block cache keyed by (attribute name, block ordinal).

use std::sync::{Arc, Mutex};

use ahash::AHashMap;
use canopy_common::Result;
use canopy_parquet::ColumnBlock;

/// Bounded cache of materialized column blocks.
///
/// Entries are inserted on first access to any row of a block and never
/// altered afterwards; when the resident-block bound is exceeded, the least
/// recently used entry is dropped whole. Misses run their load outside the
/// lock and re-check on insert, so two threads racing on the same key may
/// both read but the first inserted entry wins and both observe it.
pub struct BlockCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: AHashMap<(Arc<str>, usize), Slot>,
    tick: u64,
}

struct Slot {
    block: Arc<ColumnBlock>,
    last_used: u64,
}

impl BlockCache {
    /// `max_resident_blocks` bounds the number of (attribute, block) entries
    /// kept in memory at once; at least one entry is always allowed.
    pub fn new(max_resident_blocks: usize) -> BlockCache {
        BlockCache {
            capacity: max_resident_blocks.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("block cache lock").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached block for `(attr, block)`, running `load` on a miss.
    ///
    /// On a hit the underlying source is not touched. The load is a single
    /// bulk read of exactly one column block, performed by the caller's
    /// closure.
    pub fn get_or_load(
        &self,
        attr: &Arc<str>,
        block: usize,
        load: impl FnOnce() -> Result<ColumnBlock>,
    ) -> Result<Arc<ColumnBlock>> {
        let key = (attr.clone(), block);
        {
            let mut inner = self.inner.lock().expect("block cache lock");
            inner.tick += 1;
            let tick = inner.tick;
            if let Some(slot) = inner.entries.get_mut(&key) {
                slot.last_used = tick;
                return Ok(slot.block.clone());
            }
        }

        let loaded = Arc::new(load()?);

        let mut inner = self.inner.lock().expect("block cache lock");
        inner.tick += 1;
        let tick = inner.tick;
        // a racing loader may have inserted meanwhile; its entry wins
        let slot = inner.entries.entry(key).or_insert(Slot {
            block: loaded,
            last_used: tick,
        });
        slot.last_used = tick;
        let result = slot.block.clone();

        while inner.entries.len() > self.capacity {
            let Some(victim) = inner
                .entries
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            log::debug!("evicting cached block ({}, {})", victim.0, victim.1);
            inner.entries.remove(&victim);
        }
        Ok(result)
    }
}
