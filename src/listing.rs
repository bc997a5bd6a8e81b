//! Derived views over a fetched repository listing.
//!
//! The listing is never modified; every view is recomputed from the full
//! collection, the search term, the sort key, and the page.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ToolError;
use crate::github::GitHubRepo;

/// Repositories shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// The single active sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Name, ascending.
    #[default]
    Name,
    /// Star count, descending.
    Stars,
    /// Creation time, newest first.
    Created,
}

impl FromStr for SortKey {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "stars" => Ok(SortKey::Stars),
            "created" => Ok(SortKey::Created),
            other => Err(ToolError::InvalidRequest(format!(
                "unknown sort key '{}' (expected name, stars or created)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Name => "name",
            SortKey::Stars => "stars",
            SortKey::Created => "created",
        };
        f.write_str(name)
    }
}

/// Whether a repository matches a search term (case-insensitive, name or description).
pub fn matches_search(repo: &GitHubRepo, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    repo.name.to_lowercase().contains(&term)
        || repo
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&term))
}

/// Keep the repositories matching `term`, in input order.
pub fn filter_repos<'a, I>(repos: I, term: &str) -> Vec<&'a GitHubRepo>
where
    I: IntoIterator<Item = &'a GitHubRepo>,
{
    repos
        .into_iter()
        .filter(|r| matches_search(r, term))
        .collect()
}

fn compare(a: &GitHubRepo, b: &GitHubRepo, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Stars => b.stargazers_count.cmp(&a.stargazers_count),
        // GitHub timestamps are fixed-width UTC, so string order is time order.
        SortKey::Created => b.created_at.cmp(&a.created_at),
    }
}

/// Sort in place; equal keys keep their input order.
pub fn sort_repos(repos: &mut [&GitHubRepo], key: SortKey) {
    repos.sort_by(|a, b| compare(a, b, key));
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The 1-based `page` of `items`; out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// One page of a derived view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage<'a> {
    pub items: Vec<&'a GitHubRepo>,
    /// The requested page, 1-based.
    pub page: usize,
    pub total_pages: usize,
    /// Repositories matching the search before pagination.
    pub total_matches: usize,
}

impl ListingPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Filter, sort, and paginate `repos`.
pub fn derive_view<'a>(
    repos: &'a [GitHubRepo],
    term: &str,
    key: SortKey,
    page: usize,
    page_size: usize,
) -> ListingPage<'a> {
    let mut matched = filter_repos(repos, term);
    sort_repos(&mut matched, key);

    ListingPage {
        items: paginate(&matched, page, page_size).to_vec(),
        page,
        total_pages: page_count(matched.len(), page_size),
        total_matches: matched.len(),
    }
}

/// A change to the listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    Search(String),
    Sort(SortKey),
    GoToPage(usize),
    NextPage,
    PreviousPage,
}

/// View state for the listing: search, sort, and page.
///
/// Changing the search term or the sort key returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingView {
    pub search: String,
    pub sort: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListingView {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: SortKey::Name,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Set the initial sort order.
    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Apply one action.
    pub fn apply(&mut self, action: ListingAction) {
        match action {
            ListingAction::Search(term) => {
                self.search = term;
                self.page = 1;
            }
            ListingAction::Sort(key) => {
                self.sort = key;
                self.page = 1;
            }
            ListingAction::GoToPage(page) => self.page = page.max(1),
            ListingAction::NextPage => self.page = self.page.saturating_add(1),
            ListingAction::PreviousPage => self.page = self.page.saturating_sub(1).max(1),
        }
    }

    /// Compute the current page over `repos`.
    pub fn view<'a>(&self, repos: &'a [GitHubRepo]) -> ListingPage<'a> {
        derive_view(repos, &self.search, self.sort, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, description: Option<&str>, stars: u64, created: &str) -> GitHubRepo {
        GitHubRepo {
            id: 0,
            name: name.into(),
            full_name: format!("octocat/{}", name),
            html_url: format!("https://github.com/octocat/{}", name),
            description: description.map(Into::into),
            stargazers_count: stars,
            created_at: created.into(),
            language: None,
            fork: false,
            is_private: false,
        }
    }

    fn sample() -> Vec<GitHubRepo> {
        vec![
            repo("zeta", Some("A Rust parser"), 3, "2021-05-01T00:00:00Z"),
            repo("alpha", None, 10, "2019-01-01T00:00:00Z"),
            repo("Parsec", Some("combinators"), 3, "2023-02-11T08:30:00Z"),
            repo("beta", Some("nothing here"), 0, "2022-12-31T23:59:59Z"),
        ]
    }

    fn names(items: &[&GitHubRepo]) -> Vec<String> {
        items.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let repos = sample();
        assert_eq!(filter_repos(&repos, "").len(), 4);
    }

    #[test]
    fn test_filter_name_or_description_case_insensitive() {
        let repos = sample();
        let matched = filter_repos(&repos, "PARS");
        assert_eq!(names(&matched), vec!["zeta", "Parsec"]);
    }

    #[test]
    fn test_filter_missing_description() {
        let repos = sample();
        assert!(filter_repos(&repos, "rust").iter().all(|r| r.name == "zeta"));
        assert!(filter_repos(&repos, "none").is_empty());
    }

    #[test]
    fn test_sort_by_name() {
        let repos = sample();
        let mut items = filter_repos(&repos, "");
        sort_repos(&mut items, SortKey::Name);
        assert_eq!(names(&items), vec!["Parsec", "alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_sort_by_stars_is_stable() {
        let repos = sample();
        let mut items = filter_repos(&repos, "");
        sort_repos(&mut items, SortKey::Stars);
        assert_eq!(names(&items), vec!["alpha", "zeta", "Parsec", "beta"]);
    }

    #[test]
    fn test_sort_by_created_newest_first() {
        let repos = sample();
        let mut items = filter_repos(&repos, "");
        sort_repos(&mut items, SortKey::Created);
        assert_eq!(names(&items), vec!["Parsec", "beta", "zeta", "alpha"]);
    }

    #[test]
    fn test_paginate_twelve_items() {
        let items: Vec<i32> = (1..=12).collect();
        assert_eq!(paginate(&items, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 3, 5), &[11, 12]);
        assert!(paginate(&items, 4, 5).is_empty());
        assert!(paginate(&items, 0, 5).is_empty());
        assert_eq!(page_count(items.len(), 5), 3);
    }

    #[test]
    fn test_page_count_edges() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(3, 0), 0);
    }

    #[test]
    fn test_derive_view() {
        let repos = sample();
        let page = derive_view(&repos, "", SortKey::Stars, 1, 3);
        assert_eq!(names(&page.items), vec!["alpha", "zeta", "Parsec"]);
        assert_eq!(page.total_matches, 4);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("stars".parse::<SortKey>().unwrap(), SortKey::Stars);
        assert_eq!(" Created ".parse::<SortKey>().unwrap(), SortKey::Created);
        assert!("size".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Created.to_string(), "created");
    }

    #[test]
    fn test_view_search_and_sort_reset_page() {
        let mut view = ListingView::new(2);
        view.apply(ListingAction::GoToPage(3));
        assert_eq!(view.page, 3);

        view.apply(ListingAction::Search("a".into()));
        assert_eq!(view.page, 1);

        view.apply(ListingAction::NextPage);
        view.apply(ListingAction::Sort(SortKey::Stars));
        assert_eq!(view.page, 1);
        assert_eq!(view.sort, SortKey::Stars);
    }

    #[test]
    fn test_view_page_navigation_bounds() {
        let mut view = ListingView::default();
        view.apply(ListingAction::PreviousPage);
        assert_eq!(view.page, 1);
        view.apply(ListingAction::GoToPage(0));
        assert_eq!(view.page, 1);
        view.apply(ListingAction::NextPage);
        assert_eq!(view.page, 2);
    }

    #[test]
    fn test_view_out_of_range_page_is_empty() {
        let repos = sample();
        let mut view = ListingView::new(5);
        view.apply(ListingAction::GoToPage(2));
        let page = view.view(&repos);
        assert!(page.is_empty());
        assert_eq!(page.total_matches, 4);
    }
}
