//! Python bindings, built with the `python` feature.
//!
//! Exceptions raised from Rust errors:
//!
//! ```text
//! MetaphoneBrError (base)
//!   ├── ValidationError          bad threshold or batch parameter
//!   ├── InvalidNameError         input without letters
//!   └── UndefinedSimilarityError nothing left to weigh
//! ```

use crate::config::{MatchConfig, DEFAULT_LEV_THRESHOLD};
use crate::dedup::{self, DedupMethod};
use crate::error::MetaphoneError;
use crate::scoring::{self, NameMatcher};
use crate::{algorithms, Name};
use pyo3::create_exception;
use pyo3::prelude::*;

create_exception!(metaphone_br, MetaphoneBrError, pyo3::exceptions::PyException);
create_exception!(metaphone_br, ValidationError, MetaphoneBrError);
create_exception!(metaphone_br, InvalidNameError, MetaphoneBrError);
create_exception!(metaphone_br, UndefinedSimilarityError, MetaphoneBrError);

/// Input size from which `method="auto"` switches to sorted neighborhood.
const SNM_AUTO_THRESHOLD: usize = 2000;

impl From<MetaphoneError> for PyErr {
    fn from(err: MetaphoneError) -> Self {
        let msg = err.to_string();
        match err {
            MetaphoneError::InvalidName(_) => InvalidNameError::new_err(msg),
            MetaphoneError::UndefinedSimilarity { .. } => UndefinedSimilarityError::new_err(msg),
            MetaphoneError::InvalidRule { .. }
            | MetaphoneError::InvalidThreshold(_)
            | MetaphoneError::InvalidParameter { .. } => ValidationError::new_err(msg),
        }
    }
}

fn build_matcher(
    lev_threshold: f64,
    prepositions: Option<Vec<String>>,
) -> PyResult<NameMatcher<'static>> {
    let mut config = MatchConfig::default().with_threshold(lev_threshold);
    if let Some(prepositions) = prepositions {
        config = config.with_prepositions(prepositions);
    }
    Ok(NameMatcher::new(config)?)
}

/// Result from deduplication operation.
#[pyclass(name = "DeduplicationResult")]
#[derive(Clone, Debug)]
pub struct PyNameGroups {
    #[pyo3(get)]
    pub groups: Vec<Vec<String>>,
    #[pyo3(get)]
    pub unique: Vec<String>,
    /// Inputs without any letter
    #[pyo3(get)]
    pub invalid: Vec<String>,
    #[pyo3(get)]
    pub total_duplicates: usize,
}

#[pymethods]
impl PyNameGroups {
    fn __repr__(&self) -> String {
        format!(
            "DeduplicationResult(groups={}, unique={}, invalid={}, total_duplicates={})",
            self.groups.len(),
            self.unique.len(),
            self.invalid.len(),
            self.total_duplicates
        )
    }
}

impl From<dedup::NameGroups> for PyNameGroups {
    fn from(result: dedup::NameGroups) -> Self {
        Self {
            groups: result.groups,
            unique: result.unique,
            invalid: result.invalid,
            total_duplicates: result.total_duplicates,
        }
    }
}

/// Phonetic code of a single word.
#[pyfunction]
fn pack(word: &str) -> String {
    algorithms::phonetic::pack(word)
}

/// Split a name into `(words, codes)`.
#[pyfunction]
fn parse(name: &str) -> PyResult<(Vec<String>, Vec<String>)> {
    let name = Name::parse(name)?;
    Ok((name.words().to_vec(), name.codes().to_vec()))
}

#[pyfunction]
#[pyo3(signature = (code1, code2, lev_threshold=DEFAULT_LEV_THRESHOLD))]
fn is_sim(code1: &str, code2: &str, lev_threshold: f64) -> bool {
    scoring::is_sim_with(code1, code2, lev_threshold)
}

#[pyfunction]
fn word_sim(w1: &str, w2: &str) -> f64 {
    scoring::word_sim(w1, w2)
}

/// Similarity of two raw names in `[0, 1]`.
#[pyfunction]
#[pyo3(signature = (name1, name2, lev_threshold=DEFAULT_LEV_THRESHOLD, prepositions=None))]
fn similarity(
    name1: &str,
    name2: &str,
    lev_threshold: f64,
    prepositions: Option<Vec<String>>,
) -> PyResult<f64> {
    let matcher = build_matcher(lev_threshold, prepositions)?;
    Ok(matcher.sim_raw(name1, name2)?)
}

/// Group names that refer to the same person.
#[pyfunction]
#[pyo3(signature = (items, min_similarity=0.8, method="auto", window_size=50, lev_threshold=DEFAULT_LEV_THRESHOLD))]
fn find_duplicates(
    py: Python<'_>,
    items: Vec<String>,
    min_similarity: f64,
    method: &str,
    window_size: usize,
    lev_threshold: f64,
) -> PyResult<PyNameGroups> {
    let method = match method.to_lowercase().as_str() {
        "brute_force" => DedupMethod::BruteForce,
        "snm" | "sorted_neighborhood" => DedupMethod::SortedNeighborhood { window_size },
        "auto" if items.len() < SNM_AUTO_THRESHOLD => DedupMethod::BruteForce,
        "auto" => DedupMethod::SortedNeighborhood { window_size },
        _ => {
            return Err(ValidationError::new_err(format!(
                "Unknown deduplication method: '{}'. Valid: auto, brute_force, snm",
                method
            )))
        }
    };
    let matcher = build_matcher(lev_threshold, None)?;
    let result = py.allow_threads(|| {
        dedup::find_duplicate_names(&items, &matcher, min_similarity, method)
    })?;
    Ok(result.into())
}

#[pymodule]
fn metaphone_br(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("MetaphoneBrError", py.get_type::<MetaphoneBrError>())?;
    m.add("ValidationError", py.get_type::<ValidationError>())?;
    m.add("InvalidNameError", py.get_type::<InvalidNameError>())?;
    m.add("UndefinedSimilarityError", py.get_type::<UndefinedSimilarityError>())?;

    m.add_class::<PyNameGroups>()?;

    m.add_function(wrap_pyfunction!(pack, m)?)?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(is_sim, m)?)?;
    m.add_function(wrap_pyfunction!(word_sim, m)?)?;
    m.add_function(wrap_pyfunction!(similarity, m)?)?;
    m.add_function(wrap_pyfunction!(find_duplicates, m)?)?;
    Ok(())
}
