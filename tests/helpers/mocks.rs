//! In-memory doubles for the storage ports, shared across test binaries.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use taxonomy_poc::error::{Result, TaxonomyError};
use taxonomy_poc::ports::{RankSource, SpecimenStore, TaxonStore};
use taxonomy_poc::rank::Rank;
use taxonomy_poc::specimen::TypeSpecimen;
use taxonomy_poc::taxon::Taxon;

// ── Fixtures ──────────────────────────────────────────────────────

pub fn rank(id: i32, name: &str, is_major: bool, major_parent: i32, direct_parent: i32) -> Rank {
    Rank {
        id,
        name: name.into(),
        is_major,
        major_parent,
        direct_parent,
        display_name: {
            let mut label = name.to_string();
            label[..1].make_ascii_uppercase();
            label
        },
    }
}

/// The four-rank ladder: Species(1) -> Genus(2) -> Family(3) -> Kingdom(4).
/// Family is not major; the major ladder is Species -> Genus -> Kingdom.
pub fn ladder() -> Vec<Rank> {
    vec![
        rank(1, "species", true, 2, 2),
        rank(2, "genus", true, 4, 3),
        rank(3, "family", false, 4, 4),
        rank(4, "kingdom", true, 4, 4),
    ]
}

pub fn taxon(rank_id: i32, id: i64, name: &str, parent: i64, current: i64) -> Taxon {
    Taxon {
        rank_id,
        id,
        name: name.into(),
        author: "Latreille".into(),
        year: 1802,
        parent,
        current,
    }
}

// ── MockRankSource ────────────────────────────────────────────────

/// Counting rank source with failure injection and an optional per-call
/// delay to widen the initialization race window.
pub struct MockRankSource {
    all: Vec<Rank>,
    calls: AtomicUsize,
    fail_calls: Vec<usize>,
    delay: Option<Duration>,
}

impl MockRankSource {
    pub fn new(all: Vec<Rank>) -> Self {
        Self {
            all,
            calls: AtomicUsize::new(0),
            fail_calls: Vec::new(),
            delay: None,
        }
    }

    /// Fail the first `n` load calls with `StoreUnavailable`.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_calls = (0..n).collect();
        self
    }

    /// Succeed `n` load calls, then fail the one after them.
    pub fn failing_after_success(mut self, n: usize) -> Self {
        self.fail_calls = vec![n];
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total load calls observed, fetches of the major-only set included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankSource for MockRankSource {
    async fn load_ranks(&self, major_only: bool) -> Result<Vec<Rank>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_calls.contains(&index) {
            return Err(TaxonomyError::StoreUnavailable(anyhow::anyhow!(
                "injected outage"
            )));
        }

        // The major-only restriction is applied here, store-side, matching
        // the real loader's filtered query.
        if major_only {
            Ok(self.all.iter().filter(|r| r.is_major).cloned().collect())
        } else {
            Ok(self.all.clone())
        }
    }
}

// ── MockTaxonStore ────────────────────────────────────────────────

/// Taxa keyed by (rank id, taxon id); link rows kept as plain tuples.
#[derive(Default)]
pub struct MockTaxonStore {
    taxa: Mutex<HashMap<(i32, i64), Taxon>>,
    links: Mutex<Vec<(i32, i64, i64)>>,
}

impl MockTaxonStore {
    pub fn with_taxa(taxa: Vec<Taxon>) -> Self {
        let store = Self::default();
        {
            let mut map = store.taxa.lock().unwrap();
            for t in taxa {
                map.insert((t.rank_id, t.id), t);
            }
        }
        store
    }

    pub fn link(&self, rank_id: i32, taxon_id: i64, specimen_id: i64) {
        self.links.lock().unwrap().push((rank_id, taxon_id, specimen_id));
    }

    pub fn links(&self) -> Vec<(i32, i64, i64)> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaxonStore for MockTaxonStore {
    async fn search_by_name(&self, rank: &Rank, pattern: &str) -> Result<Vec<Taxon>> {
        let needle = pattern.to_lowercase();
        Ok(self
            .taxa
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.rank_id == rank.id && t.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, rank: &Rank, id: i64) -> Result<Option<Taxon>> {
        Ok(self.taxa.lock().unwrap().get(&(rank.id, id)).cloned())
    }

    async fn direct_children(
        &self,
        child_rank: &Rank,
        parent_id: i64,
        current_only: bool,
    ) -> Result<Vec<Taxon>> {
        Ok(self
            .taxa
            .lock()
            .unwrap()
            .values()
            .filter(|t| {
                t.rank_id == child_rank.id
                    && t.parent == parent_id
                    && (!current_only || t.is_current())
            })
            .cloned()
            .collect())
    }

    async fn set_current(&self, rank: &Rank, id: i64, current: i64) -> Result<()> {
        match self.taxa.lock().unwrap().get_mut(&(rank.id, id)) {
            Some(t) => {
                t.current = current;
                Ok(())
            }
            None => Err(TaxonomyError::NotFound(format!("{} {id}", rank.name))),
        }
    }

    async fn type_ids(&self, rank: &Rank, taxon_id: i64) -> Result<Vec<i64>> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, t, _)| *r == rank.id && *t == taxon_id)
            .map(|(_, _, s)| *s)
            .collect())
    }

    async fn assign_type(&self, rank: &Rank, taxon_id: i64, specimen_id: i64) -> Result<()> {
        self.link(rank.id, taxon_id, specimen_id);
        Ok(())
    }
}

// ── MockSpecimenStore ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockSpecimenStore {
    specimens: Mutex<HashMap<i64, TypeSpecimen>>,
    next_id: AtomicUsize,
}

impl MockSpecimenStore {
    pub fn with_specimens(specimens: Vec<TypeSpecimen>) -> Self {
        let store = Self::default();
        {
            let mut map = store.specimens.lock().unwrap();
            let mut max_id = 0;
            for s in specimens {
                max_id = max_id.max(s.id);
                map.insert(s.id, s);
            }
            store.next_id.store(max_id as usize, Ordering::SeqCst);
        }
        store
    }
}

#[async_trait]
impl SpecimenStore for MockSpecimenStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<TypeSpecimen>> {
        Ok(self.specimens.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, name: &str, author: &str, year: i32) -> Result<TypeSpecimen> {
        let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1) as i64;
        let specimen = TypeSpecimen {
            id,
            name: name.into(),
            author: author.into(),
            year,
        };
        self.specimens.lock().unwrap().insert(id, specimen.clone());
        Ok(specimen)
    }
}
