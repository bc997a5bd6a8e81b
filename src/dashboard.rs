//! A user's dashboard: profile, repositories, badges, and provisioning.

use tracing::{info, warn};

use crate::error::Result;
use crate::github::{GitHubRepo, GitHubUser, ProvisionApi, RepoOps, UserOps};
use crate::listing::{ListingAction, ListingPage, ListingView};
use crate::provision::{ProvisionReport, ProvisionRequest, provision};
use crate::stats::{Badge, load_dashboard};
use crate::status::StatusMessage;

/// Fetched state for one username.
///
/// Each refresh only replaces the pieces that were fetched successfully.
pub struct Dashboard<A> {
    api: A,
    username: String,
    user: Option<GitHubUser>,
    repositories: Vec<GitHubRepo>,
    badges: Vec<Badge>,
    view: ListingView,
}

impl<A> Dashboard<A> {
    pub fn new(api: A, username: impl Into<String>) -> Self {
        Self {
            api,
            username: username.into(),
            user: None,
            repositories: Vec::new(),
            badges: Vec::new(),
            view: ListingView::default(),
        }
    }

    /// Use a preconfigured listing view.
    pub fn with_view(mut self, view: ListingView) -> Self {
        self.view = view;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Switch to another user; previously fetched data stays until the next refresh.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn user(&self) -> Option<&GitHubUser> {
        self.user.as_ref()
    }

    pub fn repositories(&self) -> &[GitHubRepo] {
        &self.repositories
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn listing_view(&self) -> &ListingView {
        &self.view
    }

    /// Change the search, sort, or page.
    pub fn apply(&mut self, action: ListingAction) {
        self.view.apply(action);
    }

    /// The current page of the repository listing.
    pub fn view(&self) -> ListingPage<'_> {
        self.view.view(&self.repositories)
    }
}

impl<A> Dashboard<A>
where
    A: UserOps + RepoOps + Sync,
{
    /// Fetch profile, repositories, and badges. Returns one status per failed leg.
    pub fn refresh(&mut self) -> Vec<StatusMessage> {
        let snapshot = load_dashboard(&self.api, &self.username);
        let mut statuses = Vec::new();

        match snapshot.user {
            Ok(user) => self.user = Some(user),
            Err(e) => {
                warn!(username = %self.username, error = %e, "user lookup failed");
                statuses.push(StatusMessage::error(format!(
                    "Error fetching user statistics: {}",
                    e
                )));
            }
        }

        match snapshot.repositories {
            Ok(repos) => self.repositories = repos,
            Err(e) => {
                warn!(username = %self.username, error = %e, "repository listing failed");
                statuses.push(StatusMessage::error(format!(
                    "Error fetching repositories: {}",
                    e
                )));
            }
        }

        match snapshot.badges {
            Ok(badges) => self.badges = badges,
            Err(e) => {
                warn!(username = %self.username, error = %e, "badge URLs could not be built");
                statuses.push(StatusMessage::error(format!(
                    "Error building stat badges: {}",
                    e
                )));
            }
        }

        statuses
    }

    /// Re-fetch only the repository listing, keeping the old one on failure.
    pub fn refresh_repositories(&mut self) -> Result<usize> {
        match self.api.list_user_repos(&self.username) {
            Ok(repos) => {
                self.repositories = repos;
                Ok(self.repositories.len())
            }
            Err(e) => {
                warn!(
                    username = %self.username,
                    status = ?e.status(),
                    error = %e,
                    "repository listing failed"
                );
                Err(e)
            }
        }
    }
}

impl<A> Dashboard<A>
where
    A: UserOps + ProvisionApi + Sync,
{
    /// Run a provisioning workflow, then refresh the listing once if it got past creation.
    ///
    /// A failed refresh keeps the old listing and is reported in
    /// [`ProvisionReport::listing_refresh`].
    pub fn provision(&mut self, request: &ProvisionRequest) -> Result<ProvisionReport> {
        let mut report = provision(&self.api, request)?;

        match self.refresh_repositories() {
            Ok(count) => info!(username = %self.username, count, "listing refreshed"),
            Err(e) => {
                report.listing_refresh = Some(StatusMessage::error(format!(
                    "Error fetching repositories: {}",
                    e
                )));
            }
        }

        Ok(report)
    }
}
