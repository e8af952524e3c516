//! Endpoint monitor: filtering, pagination and the summary bar.

use crate::entities::MonitoredEndpoint;
use crate::value_objects::{EndpointStatus, StatusFilter, TeamFilter};
use std::collections::BTreeSet;

/// Cards shown per page in the monitor grid
pub const CARDS_PER_PAGE: usize = 8;

/// Search text plus team and status selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointFilter {
    /// Matched case-insensitively against name or URL. Not trimmed.
    pub search: String,
    pub team: TeamFilter,
    pub status: StatusFilter,
}

impl EndpointFilter {
    pub fn matches(&self, endpoint: &MonitoredEndpoint) -> bool {
        self.matches_with_needle(endpoint, &self.search.to_lowercase())
    }

    fn matches_with_needle(&self, endpoint: &MonitoredEndpoint, needle: &str) -> bool {
        endpoint.matches_search(needle)
            && self.team.matches(&endpoint.team)
            && self.status.matches(endpoint.status)
    }

    /// Matching endpoints in input order
    pub fn apply<'a>(&self, endpoints: &'a [MonitoredEndpoint]) -> Vec<&'a MonitoredEndpoint> {
        let needle = self.search.to_lowercase();
        endpoints
            .iter()
            .filter(|e| self.matches_with_needle(e, &needle))
            .collect()
    }
}

/// `ceil(count / page_size)`; zero for an empty list
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Items of 1-based `page`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
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

/// Counts per status over a set of endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub healthy: usize,
    pub warning: usize,
    pub down: usize,
}

impl StatusSummary {
    pub fn from_endpoints<'a, I>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = &'a MonitoredEndpoint>,
    {
        endpoints
            .into_iter()
            .fold(Self::default(), |mut acc, endpoint| {
                match endpoint.status {
                    EndpointStatus::Up => acc.healthy += 1,
                    EndpointStatus::Warning => acc.warning += 1,
                    EndpointStatus::Down => acc.down += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.healthy + self.warning + self.down
    }
}

/// Distinct team names, sorted
pub fn team_options(endpoints: &[MonitoredEndpoint]) -> Vec<String> {
    endpoints
        .iter()
        .map(|e| e.team.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// State behind the endpoint monitor screen
#[derive(Debug, Clone)]
pub struct MonitorView {
    endpoints: Vec<MonitoredEndpoint>,
    filter: EndpointFilter,
    current_page: usize,
    page_size: usize,
}

impl Default for MonitorView {
    fn default() -> Self {
        Self::new(CARDS_PER_PAGE)
    }
}

impl MonitorView {
    pub fn new(page_size: usize) -> Self {
        Self {
            endpoints: Vec::new(),
            filter: EndpointFilter::default(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Vec<MonitoredEndpoint>) -> Self {
        self.replace_endpoints(endpoints);
        self
    }

    pub fn endpoints(&self) -> &[MonitoredEndpoint] {
        &self.endpoints
    }

    pub fn filter(&self) -> &EndpointFilter {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.current_page = 1;
    }

    pub fn set_team(&mut self, team: TeamFilter) {
        self.filter.team = team;
        self.current_page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.current_page = 1;
    }

    pub fn cycle_team(&mut self) {
        let next = self.filter.team.cycle(&self.team_options());
        self.set_team(next);
    }

    pub fn cycle_status(&mut self) {
        let next = self.filter.status.cycle();
        self.set_status(next);
    }

    /// Clamped to `[1, max(total_pages, 1)]`
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    /// Full replacement after a refresh; the page is clamped, filters kept
    pub fn replace_endpoints(&mut self, endpoints: Vec<MonitoredEndpoint>) {
        self.endpoints = endpoints;
        self.set_page(self.current_page);
    }

    pub fn filtered(&self) -> Vec<&MonitoredEndpoint> {
        self.filter.apply(&self.endpoints)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    pub fn page_items(&self) -> Vec<&MonitoredEndpoint> {
        let filtered = self.filtered();
        paginate(&filtered, self.page_size, self.current_page).to_vec()
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_endpoints(self.filtered())
    }

    pub fn team_options(&self) -> Vec<String> {
        team_options(&self.endpoints)
    }

    pub fn find(&self, id: &str) -> Option<&MonitoredEndpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(id: usize, team: &str, status: EndpointStatus) -> MonitoredEndpoint {
        MonitoredEndpoint {
            id: format!("ep-{id}"),
            name: format!("Service {id}"),
            url: format!("https://svc{id}.example.com/health"),
            status,
            response_time_ms: 100 + id as u64,
            last_check: "just now".to_string(),
            team: team.to_string(),
        }
    }

    fn sample(count: usize) -> Vec<MonitoredEndpoint> {
        (0..count)
            .map(|i| {
                let status = match i % 3 {
                    0 => EndpointStatus::Up,
                    1 => EndpointStatus::Warning,
                    _ => EndpointStatus::Down,
                };
                endpoint(i, if i % 2 == 0 { "Alpha" } else { "Beta" }, status)
            })
            .collect()
    }

    #[test]
    fn test_paginate_bounds() {
        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(&items, 4, 1), &[1, 2, 3, 4]);
        assert_eq!(paginate(&items, 4, 3), &[9, 10]);
        assert!(paginate(&items, 4, 4).is_empty());
        assert!(paginate(&items, 4, 0).is_empty());
        assert!(paginate(&items, 0, 1).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 8), 0);
        assert_eq!(total_pages(8, 8), 1);
        assert_eq!(total_pages(9, 8), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_search_matches_name_or_url_case_insensitive() {
        let endpoints = sample(12);
        let filter = EndpointFilter {
            search: "SVC1".to_string(),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&endpoints).iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["ep-1", "ep-10", "ep-11"]);

        let filter = EndpointFilter {
            search: "service 3".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&endpoints).len(), 1);
    }

    #[test]
    fn test_search_is_not_trimmed() {
        let endpoints = sample(3);
        let filter = EndpointFilter {
            search: " service".to_string(),
            ..Default::default()
        };
        assert!(filter.apply(&endpoints).is_empty());
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut view = MonitorView::default().with_endpoints(sample(30));
        view.set_page(3);
        assert_eq!(view.current_page(), 3);

        view.set_search("service");
        assert_eq!(view.current_page(), 1);

        view.set_page(2);
        view.set_team(TeamFilter::Team("Alpha".into()));
        assert_eq!(view.current_page(), 1);

        view.set_page(2);
        view.cycle_status();
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut view = MonitorView::default().with_endpoints(sample(20));
        assert_eq!(view.total_pages(), 3);
        view.set_page(99);
        assert_eq!(view.current_page(), 3);
        view.set_page(0);
        assert_eq!(view.current_page(), 1);

        let mut empty = MonitorView::default();
        empty.set_page(5);
        assert_eq!(empty.current_page(), 1);
        assert!(empty.page_items().is_empty());
    }

    #[test]
    fn test_refresh_clamps_page() {
        let mut view = MonitorView::default().with_endpoints(sample(30));
        view.set_page(4);
        view.replace_endpoints(sample(9));
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.page_items().len(), 1);
    }

    #[test]
    fn test_summary_follows_filter() {
        let mut view = MonitorView::default().with_endpoints(sample(9));
        assert_eq!(
            view.summary(),
            StatusSummary {
                healthy: 3,
                warning: 3,
                down: 3
            }
        );

        view.set_status(StatusFilter::Only(EndpointStatus::Down));
        let summary = view.summary();
        assert_eq!(summary.down, 3);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_team_options_and_lookup() {
        let view = MonitorView::default().with_endpoints(sample(5));
        assert_eq!(view.team_options(), vec!["Alpha", "Beta"]);
        assert_eq!(view.find("ep-2").map(|e| e.team.as_str()), Some("Alpha"));
        assert!(view.find("ep-99").is_none());
    }

    #[test]
    fn test_page_navigation() {
        let mut view = MonitorView::default().with_endpoints(sample(17));
        view.next_page();
        view.next_page();
        view.next_page();
        assert_eq!(view.current_page(), 3);
        view.prev_page();
        assert_eq!(view.current_page(), 2);
    }
}
