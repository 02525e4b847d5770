use crate::core::{filters::apply_must_have, scoring::score_listing};
use crate::models::{Listing, MustHave, Pagination, Preferences, ScoredListing};
use std::cmp::Ordering;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 50;

/// Page selection after clamping: page >= 1, limit in [1, MAX_LIMIT]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Build from raw user input; fractional values are truncated
    pub fn clamped(page: Option<f64>, limit: Option<f64>) -> Self {
        let page = page
            .filter(|p| p.is_finite())
            .map(|p| p.trunc().clamp(1.0, u32::MAX as f64) as u32)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| l.is_finite())
            .map(|l| l.trunc().clamp(1.0, MAX_LIMIT as f64) as u32)
            .unwrap_or(DEFAULT_LIMIT);

        Self { page, limit }
    }

    fn offset(&self) -> usize {
        (self.page as usize).saturating_sub(1).saturating_mul(self.limit as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredListing>,
    pub pagination: Pagination,
    pub total_candidates: usize,
}

/// Hard-filter, score and rank candidates
///
/// # Pipeline Stages
/// 1. Must-have filtering (order preserving)
/// 2. Scoring against preferences
/// 3. Stable sort: score desc, then match percentage desc
pub fn rank_listings(
    candidates: Vec<Listing>,
    must_have: &MustHave,
    preferences: &Preferences,
) -> Vec<ScoredListing> {
    let mut ranked: Vec<ScoredListing> = apply_must_have(candidates, must_have)
        .into_iter()
        .map(|listing| {
            let result = score_listing(&listing, preferences);
            ScoredListing {
                listing,
                score: result.score,
                match_percentage: result.match_percentage,
                explanation: result.explanation,
            }
        })
        .collect();

    // sort_by is stable, so exact ties keep catalog order
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.match_percentage.cmp(&a.match_percentage))
    });

    ranked
}

/// Cut one page out of a ranked list
pub fn paginate(ranked: Vec<ScoredListing>, request: PageRequest) -> (Vec<ScoredListing>, Pagination) {
    let total = ranked.len();
    let limit = request.limit.max(1) as usize;
    let total_pages = (total + limit - 1) / limit;

    let items: Vec<ScoredListing> = ranked
        .into_iter()
        .skip(request.offset())
        .take(limit)
        .collect();

    let pagination = Pagination {
        page: request.page,
        limit: limit as u32,
        total,
        total_pages,
        has_next: (request.page as usize) < total_pages,
        has_prev: request.page > 1,
    };

    (items, pagination)
}

/// Run the full in-memory pipeline over catalog candidates
pub fn find_matches(
    candidates: Vec<Listing>,
    must_have: &MustHave,
    preferences: &Preferences,
    request: PageRequest,
) -> MatchResult {
    let total_candidates = candidates.len();
    let ranked = rank_listings(candidates, must_have, preferences);
    let (matches, pagination) = paginate(ranked, request);

    MatchResult {
        matches,
        pagination,
        total_candidates,
    }
}
