//! Batch matching over lists of raw names
//!
//! Groups names that score at least `min_similarity` against each other and
//! ranks candidates against a query name.

use crate::error::{MetaphoneError, Result};
use crate::name::Name;
use crate::observer::SimObserver;
use crate::scoring::NameMatcher;
use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Candidate count above which ranking runs in parallel.
const PARALLEL_THRESHOLD: usize = 100;

/// Result of a deduplication pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NameGroups {
    /// Groups of names considered the same person, largest first
    pub groups: Vec<Vec<String>>,
    /// Names with no duplicate
    pub unique: Vec<String>,
    /// Inputs that contain no letters
    pub invalid: Vec<String>,
    /// Σ (group size - 1)
    pub total_duplicates: usize,
}

/// Deduplication methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupMethod {
    /// Compare all pairs (O(N^2)).
    BruteForce,
    /// Sort by phonetic key and compare each name with the next
    /// `window_size` ones only.
    SortedNeighborhood { window_size: usize },
}

/// A candidate scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMatch {
    pub text: String,
    pub score: f64,
    /// Position of the candidate in the input slice
    pub index: usize,
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }

    /// Members of each set, in input order, sets ordered by first member.
    fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut slot: AHashMap<usize, usize> = AHashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for i in 0..self.parent.len() {
            let root = self.find(i);
            let at = *slot.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[at].push(i);
        }
        groups
    }
}

fn validate_similarity(value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MetaphoneError::InvalidParameter {
            name: "min_similarity",
            reason: format!("must be in range [0.0, 1.0], got {value}"),
        });
    }
    Ok(())
}

/// Group raw names that refer to the same person.
///
/// Two names are linked when their similarity, in either direction, reaches
/// `min_similarity`; groups are the transitive closure of those links.
///
/// # Examples
/// ```
/// use metaphone_br::dedup::{find_duplicate_names, DedupMethod};
/// use metaphone_br::NameMatcher;
///
/// let items: Vec<String> = ["Maria Souza", "Maria de Souza", "Pedro Silva"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let result =
///     find_duplicate_names(&items, &NameMatcher::default(), 0.9, DedupMethod::BruteForce).unwrap();
/// assert_eq!(result.groups, vec![vec!["Maria Souza", "Maria de Souza"]]);
/// assert_eq!(result.unique, vec!["Pedro Silva"]);
/// ```
pub fn find_duplicate_names<O: SimObserver>(
    items: &[String],
    matcher: &NameMatcher<'_, O>,
    min_similarity: f64,
    method: DedupMethod,
) -> Result<NameGroups> {
    validate_similarity(min_similarity)?;
    if let DedupMethod::SortedNeighborhood { window_size: 0 } = method {
        return Err(MetaphoneError::InvalidParameter {
            name: "window_size",
            reason: "must be at least 1".to_string(),
        });
    }

    let parsed: Vec<Result<Name>> = items.par_iter().map(|raw| matcher.parse(raw)).collect();
    let mut invalid = Vec::new();
    let mut valid: Vec<(usize, Name)> = Vec::with_capacity(items.len());
    for (i, name) in parsed.into_iter().enumerate() {
        match name {
            Ok(name) => valid.push((i, name)),
            Err(_) => invalid.push(items[i].clone()),
        }
    }

    let is_dup = |a: &Name, b: &Name| {
        reaches(matcher, a, b, min_similarity) || reaches(matcher, b, a, min_similarity)
    };
    let is_dup = &is_dup;

    let pairs: Vec<(usize, usize)> = match method {
        DedupMethod::BruteForce => {
            let n = valid.len();
            let valid = &valid;
            (0..n)
                .into_par_iter()
                .flat_map(|i| {
                    (i + 1..n)
                        .into_par_iter()
                        .filter(move |&j| is_dup(&valid[i].1, &valid[j].1))
                        .map(move |j| (i, j))
                })
                .collect()
        }
        DedupMethod::SortedNeighborhood { window_size } => {
            let mut order: Vec<(String, usize)> = valid
                .iter()
                .enumerate()
                .map(|(k, (_, name))| (name.phonetic_key(), k))
                .collect();
            order.par_sort_unstable();
            let n = order.len();
            let (order, valid) = (&order, &valid);
            (0..n)
                .into_par_iter()
                .flat_map(|i| {
                    let end = i.saturating_add(1).saturating_add(window_size).min(n);
                    (i + 1..end).into_par_iter().filter_map(move |j| {
                        let (a, b) = (order[i].1, order[j].1);
                        is_dup(&valid[a].1, &valid[b].1).then_some((a, b))
                    })
                })
                .collect()
        }
    };

    let mut uf = UnionFind::new(valid.len());
    for (a, b) in pairs {
        uf.union(a, b);
    }

    let mut groups = Vec::new();
    let mut unique = Vec::new();
    for members in uf.groups() {
        let texts: Vec<String> = members.iter().map(|&k| items[valid[k].0].clone()).collect();
        if texts.len() > 1 {
            groups.push(texts);
        } else {
            unique.extend(texts);
        }
    }
    // Stable, so equal-size groups keep input order
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    let total_duplicates = groups.iter().map(|g| g.len() - 1).sum();

    tracing::debug!(
        items = items.len(),
        ?method,
        groups = groups.len(),
        invalid = invalid.len(),
        "name deduplication"
    );

    Ok(NameGroups {
        groups,
        unique,
        invalid,
        total_duplicates,
    })
}

fn reaches<O: SimObserver>(matcher: &NameMatcher<'_, O>, a: &Name, b: &Name, min: f64) -> bool {
    matcher.sim(a, b).is_ok_and(|score| score >= min)
}

/// Rank candidates by similarity to `query`.
///
/// Candidates that fail to parse or score below `min_similarity` are left
/// out. Results are sorted by descending score, ties by input position, and
/// truncated to `limit` when given.
pub fn find_best_matches<O: SimObserver>(
    query: &str,
    candidates: &[String],
    matcher: &NameMatcher<'_, O>,
    limit: Option<usize>,
    min_similarity: f64,
) -> Result<Vec<NameMatch>> {
    validate_similarity(min_similarity)?;
    let query = matcher.parse(query)?;

    let rank = |(index, text): (usize, &String)| {
        let score = matcher.sim_str(&query, text).ok()?;
        (score >= min_similarity).then(|| NameMatch {
            text: text.clone(),
            score,
            index,
        })
    };

    let mut results: Vec<NameMatch> = if candidates.len() >= PARALLEL_THRESHOLD {
        candidates.par_iter().enumerate().filter_map(rank).collect()
    } else {
        candidates.iter().enumerate().filter_map(rank).collect()
    };

    results.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    tracing::debug!(
        candidates = candidates.len(),
        matches = results.len(),
        "best match search"
    );
    Ok(results)
}
