use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

pub(crate) const DEFAULT_PAGE_SIZE: u64 = 10;
pub(crate) const MAX_PAGE_SIZE: u64 = 100;

/// Normalized page window. Built from raw query strings so that junk input
/// degrades to defaults instead of a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page: u64,
    pub(crate) size: u64,
}

impl PageRequest {
    /// `page` floors at 1, `size` clamps to `1..=100`. Anything that does
    /// not parse as an integer falls back to the default (page 1, size 10).
    pub(crate) fn parse(page: Option<&str>, size: Option<&str>) -> Self {
        let page = parse_param(page).unwrap_or(1).max(1) as u64;
        let size = parse_param(size)
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u64;
        Self { page, size }
    }

    pub(crate) fn first(size: u64) -> Self {
        Self {
            page: 1,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

fn parse_param(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Pagination {
    pub(crate) page: u64,
    pub(crate) size: u64,
    pub(crate) total: u64,
    pub(crate) total_pages: u64,
    pub(crate) has_next: bool,
    pub(crate) has_previous: bool,
}

impl Pagination {
    pub(crate) fn new(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.size);
        Self {
            page: request.page,
            size: request.size,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        }
    }
}

/// Designated text fields scanned by the term filter. Every listable
/// resource exposes at most two.
pub(crate) trait TermMatch {
    fn term_fields(&self) -> [Option<&str>; 2];
}

pub(crate) type Predicate<'f, T> = Box<dyn Fn(&T) -> bool + 'f>;

/// Blank categorical values behave as absent filters.
pub(crate) fn active_filter(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub(crate) fn normalized_term(term: Option<&str>) -> Option<String> {
    term.map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
}

fn matches_term<T: TermMatch>(item: &T, needle: &str) -> bool {
    item.term_fields()
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Term filter: case-insensitive substring over the designated fields.
/// A blank term matches everything.
pub(crate) fn filter_by_term<'a, T: TermMatch>(items: &'a [T], term: Option<&str>) -> Vec<&'a T> {
    match normalized_term(term) {
        Some(needle) => items
            .iter()
            .filter(|item| matches_term(*item, &needle))
            .collect(),
        None => items.iter().collect(),
    }
}

/// Categorical filters AND together and stop early once nothing is left.
pub(crate) fn apply_filters<'a, T>(
    mut matched: Vec<&'a T>,
    predicates: &[Predicate<'_, T>],
) -> Vec<&'a T> {
    for predicate in predicates {
        if matched.is_empty() {
            break;
        }
        matched.retain(|item| predicate(item));
    }
    matched
}

pub(crate) fn filter_items<'a, T: TermMatch>(
    items: &'a [T],
    term: Option<&str>,
    predicates: &[Predicate<'_, T>],
) -> Vec<&'a T> {
    apply_filters(filter_by_term(items, term), predicates)
}

/// Slices one page out of the filtered set, preserving its order, and
/// computes the page metadata. A window past the end yields empty data with
/// the metadata intact.
pub(crate) fn paginate<T: Clone>(items: &[&T], request: PageRequest) -> (Vec<T>, Pagination) {
    let pagination = Pagination::new(request, items.len() as u64);
    let offset = (request.page as usize)
        .saturating_sub(1)
        .saturating_mul(request.size as usize);
    let data = items
        .iter()
        .skip(offset)
        .take(request.size as usize)
        .map(|item| (*item).clone())
        .collect();
    (data, pagination)
}

/// Occurrence count per category value. Callers pass the term-filtered set,
/// not the fully filtered one: facet counts deliberately ignore the active
/// categorical filters so they stay stable while the operator switches
/// filter values.
pub(crate) fn facet_counts<T>(
    items: &[&T],
    category: impl Fn(&T) -> &str,
) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(category(item).to_string()).or_insert(0u64) += 1;
    }
    counts
}
