//! Bridge between the session and the ranking function.
//!
//! [`filter`] turns a corpus and a query byte string into a [`ResultList`]: the
//! indices of matching corpus entries in rank order. It is a pure function of
//! its inputs and is called after every edit, so it must stay cheap.
//!
//! # Matching
//!
//! - **Substring mode**: an entry matches if it contains the query, comparing
//!   ASCII letters case-insensitively. Results keep corpus order.
//! - **Fuzzy mode**: an entry matches if the query is a case-insensitive
//!   subsequence of it. Results are ordered by the Skim score, best first, with
//!   ties kept in corpus order.
//!
//! An empty query matches everything, in corpus order, in both modes.
//!
//! # Example
//!
//! ```
//! use zofi::domain::Corpus;
//! use zofi::filter::filter;
//!
//! let corpus = Corpus::Commands(vec!["abc".into(), "xab".into(), "zzz".into()]);
//! let results = filter(&corpus, b"ab", false);
//! assert_eq!(results.indices(), &[0, 1]);
//! ```

use crate::domain::Corpus;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Matching entries of a corpus, as indices, in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList {
    hits: Vec<usize>,
}

impl ResultList {
    /// Every entry of a corpus of `len` entries, in corpus order.
    #[must_use]
    pub fn unfiltered(len: usize) -> Self {
        Self {
            hits: (0..len).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Corpus index of the result at rank `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.hits.get(position).copied()
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.hits
    }
}

/// Filters the whole corpus against `query`.
#[must_use]
pub fn filter(corpus: &Corpus, query: &[u8], fuzzy: bool) -> ResultList {
    rank(corpus, 0..corpus.len(), query, fuzzy)
}

/// Filters only the entries of `previous` against `query`.
///
/// Valid when the query `previous` was built from is a prefix of `query`:
/// anything that matches the longer query also matched the shorter one, so
/// the output equals `filter(corpus, query, fuzzy)`.
#[must_use]
pub fn refine(corpus: &Corpus, previous: &ResultList, query: &[u8], fuzzy: bool) -> ResultList {
    rank(corpus, previous.indices().iter().copied(), query, fuzzy)
}

fn rank(
    corpus: &Corpus,
    candidates: impl Iterator<Item = usize>,
    query: &[u8],
    fuzzy: bool,
) -> ResultList {
    let query = String::from_utf8_lossy(query);
    let _span = tracing::debug_span!(
        "filter",
        corpus_len = corpus.len(),
        query_len = query.len(),
        fuzzy = fuzzy
    )
    .entered();

    let mut hits: Vec<usize> = if query.is_empty() {
        candidates.filter(|&i| i < corpus.len()).collect()
    } else if fuzzy {
        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, usize)> = candidates
            .filter_map(|i| {
                let text = corpus.display(i)?;
                matcher.fuzzy_match(text, &query).map(|score| (score, i))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        return finish(scored.into_iter().map(|(_, i)| i).collect());
    } else {
        candidates
            .filter(|&i| {
                corpus
                    .display(i)
                    .is_some_and(|text| find_ignore_ascii_case(text, &query).is_some())
            })
            .collect()
    };

    hits.sort_unstable();
    finish(hits)
}

fn finish(hits: Vec<usize>) -> ResultList {
    tracing::debug!(result_count = hits.len(), "filter applied");
    ResultList { hits }
}

/// Byte offset of the first occurrence of `needle` in `haystack`, comparing
/// ASCII letters case-insensitively.
///
/// The returned offset always lies on a character boundary, and so does
/// `offset + needle.len()`.
///
/// # Example
///
/// ```
/// use zofi::filter::find_ignore_ascii_case;
///
/// assert_eq!(find_ignore_ascii_case("Open Terminal", "TERM"), Some(5));
/// assert_eq!(find_ignore_ascii_case("abc", "x"), None);
/// ```
#[must_use]
pub fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let (hay, pat) = (haystack.as_bytes(), needle.as_bytes());
    if pat.is_empty() {
        return Some(0);
    }
    if pat.len() > hay.len() {
        return None;
    }
    hay.windows(pat.len())
        .position(|window| window.eq_ignore_ascii_case(pat))
}
