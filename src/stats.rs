//! User statistics and third-party stat/trophy badges.

use std::fmt;
use std::thread;
use tracing::{debug, warn};
use url::Url;

use crate::error::Result;
use crate::github::{GitHubRepo, GitHubUser, RepoOps, UserOps};

/// A third-party badge service rendering stats for a username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Stats,
    TopLanguages,
    Trophies,
    Streak,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 4] = [
        BadgeKind::Stats,
        BadgeKind::TopLanguages,
        BadgeKind::Trophies,
        BadgeKind::Streak,
    ];

    /// Service endpoint and the query parameter carrying the username.
    fn endpoint(self) -> (&'static str, &'static str) {
        match self {
            BadgeKind::Stats => ("https://github-readme-stats.vercel.app/api", "username"),
            BadgeKind::TopLanguages => (
                "https://github-readme-stats.vercel.app/api/top-langs/",
                "username",
            ),
            BadgeKind::Trophies => ("https://github-profile-trophy.vercel.app/", "username"),
            BadgeKind::Streak => ("https://github-readme-streak-stats.herokuapp.com/", "user"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BadgeKind::Stats => "GitHub Stats",
            BadgeKind::TopLanguages => "Most Used Languages",
            BadgeKind::Trophies => "GitHub Trophies",
            BadgeKind::Streak => "Contribution Streak",
        }
    }
}

/// A badge image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub url: Url,
}

impl Badge {
    pub fn new(kind: BadgeKind, username: &str) -> Result<Self> {
        let (base, param) = kind.endpoint();
        let url = Url::parse_with_params(base, &[(param, username)])?;
        Ok(Self { kind, url })
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.url)
    }
}

/// Every stat and trophy badge for `username`.
pub fn badges_for(username: &str) -> Result<Vec<Badge>> {
    BadgeKind::ALL
        .iter()
        .map(|kind| Badge::new(*kind, username))
        .collect()
}

/// The three independent legs of a dashboard load.
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub user: Result<GitHubUser>,
    pub repositories: Result<Vec<GitHubRepo>>,
    pub badges: Result<Vec<Badge>>,
}

/// Fetch the profile, the repository list, and the badges concurrently.
///
/// Each leg's failure stays in its own slot.
pub fn load_dashboard<A>(api: &A, username: &str) -> DashboardSnapshot
where
    A: UserOps + RepoOps + Sync,
{
    thread::scope(|scope| {
        let user = scope.spawn(|| api.get_user(username));
        let repositories = scope.spawn(|| api.list_user_repos(username));
        let badges = badges_for(username);

        let snapshot = DashboardSnapshot {
            user: join(user),
            repositories: join(repositories),
            badges,
        };
        debug!(
            username,
            user_ok = snapshot.user.is_ok(),
            repositories_ok = snapshot.repositories.is_ok(),
            "dashboard loaded"
        );
        snapshot
    })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    match handle.join() {
        Ok(result) => result,
        Err(panic) => {
            warn!("dashboard fetch panicked");
            std::panic::resume_unwind(panic)
        }
    }
}
