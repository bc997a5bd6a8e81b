//! CLI for the GitHub tool.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use github_tool::prelude::*;
use github_tool::provision::failure_status;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ghtool")]
#[command(author, version, about = "Inspect GitHub users and provision repositories", long_about = None)]
struct Cli {
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub API base URL (GitHub Enterprise or a proxy)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Token for write calls
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListingArgs {
    /// Case-insensitive search over names and descriptions
    #[arg(short, long, default_value = "")]
    search: String,

    /// Sort order (name, stars, created)
    #[arg(long)]
    sort: Option<SortKey>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Repositories per page
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a user's public statistics
    Stats {
        /// GitHub username
        user: Option<String>,
    },

    /// List, search, sort, and paginate a user's repositories
    Repos {
        /// GitHub username
        user: Option<String>,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Print stat and trophy badge URLs
    Badges {
        /// GitHub username
        user: Option<String>,
    },

    /// Fetch statistics, repositories, and badges together
    Dashboard {
        /// GitHub username
        user: Option<String>,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Create a repository, upload files, and tag a release
    Create {
        /// Repository name
        name: String,

        /// Make the repository private
        #[arg(long)]
        private: bool,

        /// Initialize the repository with a README
        #[arg(long)]
        readme: bool,

        /// File to upload (repeatable)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Upload every file directly inside this directory
        #[arg(long)]
        files_from: Option<PathBuf>,

        /// Release tag to create after uploading
        #[arg(short, long)]
        release: Option<String>,

        /// Refresh this user's repository listing afterwards
        #[arg(long)]
        owner: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = github_tool::logging::init_tracing(&cli.log_level, &cli.log_format) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    let client = GitHubClient::from_config(&config);

    match cli.command {
        Commands::Stats { user } => cmd_stats(&client, &username(user, &config)?),
        Commands::Repos { user, listing } => {
            cmd_repos(&client, &username(user, &config)?, listing_view(&listing, &config))
        }
        Commands::Badges { user } => cmd_badges(&username(user, &config)?),
        Commands::Dashboard { user, listing } => cmd_dashboard(
            client,
            &username(user, &config)?,
            listing_view(&listing, &config),
        ),
        Commands::Create {
            name,
            private,
            readme,
            files,
            files_from,
            release,
            owner,
        } => {
            let mut actions = vec![
                FormAction::SetToken(config.token.clone().unwrap_or_default()),
                FormAction::SetRepoName(name),
                FormAction::SetPrivate(private),
                FormAction::SetIncludeReadme(readme),
            ];
            for path in files {
                actions.push(FormAction::AddFiles(vec![UploadFile::from_path(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?]));
            }
            if let Some(dir) = files_from {
                actions.push(FormAction::AddFiles(
                    UploadFile::from_dir(&dir)
                        .with_context(|| format!("Failed to read {}", dir.display()))?,
                ));
            }
            if let Some(tag) = release {
                actions.push(FormAction::SetReleaseTag(tag));
            }

            let form = ProvisionForm::new().with_actions(actions);
            let owner = owner.or_else(|| config.username.clone());
            cmd_create(client, &form, owner)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ToolConfig> {
    let mut config = ToolConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_process_env();

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(token) = cli.token.as_ref().filter(|t| !t.is_empty()) {
        config.token = Some(token.clone());
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn username(user: Option<String>, config: &ToolConfig) -> Result<String> {
    match user.or_else(|| config.username.clone()) {
        Some(user) => Ok(user),
        None => bail!("No username given and none configured"),
    }
}

fn listing_view(args: &ListingArgs, config: &ToolConfig) -> ListingView {
    let mut view = ListingView::new(args.page_size.unwrap_or(config.listing.page_size))
        .sorted_by(args.sort.unwrap_or(config.listing.sort));
    if !args.search.is_empty() {
        view.apply(ListingAction::Search(args.search.clone()));
    }
    view.apply(ListingAction::GoToPage(args.page));
    view
}

fn print_user(user: &GitHubUser) {
    println!("Username:             {}", user.login);
    println!("Name:                 {}", user.name.as_deref().unwrap_or("-"));
    println!("Public Repositories:  {}", user.public_repos);
    println!("Followers:            {}", user.followers);
    println!("Following:            {}", user.following);
    println!("Location:             {}", user.location.as_deref().unwrap_or("-"));
    println!("Profile:              {}", user.html_url);
}

fn print_page(page: &ListingPage<'_>) {
    if page.is_empty() {
        println!("No repositories on page {}.", page.page);
    }
    for repo in &page.items {
        println!(
            "{:<40} {:>6} stars  {}  {}",
            repo.full_name,
            repo.stargazers_count,
            repo.created_at,
            repo.description.as_deref().unwrap_or("")
        );
    }
    println!(
        "\nPage {} of {} ({} matching)",
        page.page, page.total_pages, page.total_matches
    );
}

fn cmd_stats(client: &GitHubClient, user: &str) -> Result<ExitCode> {
    let user = client
        .get_user(user)
        .context("Error fetching user statistics")?;
    print_user(&user);
    Ok(ExitCode::SUCCESS)
}

fn cmd_repos(client: &GitHubClient, user: &str, view: ListingView) -> Result<ExitCode> {
    let repos = client
        .list_user_repos(user)
        .context("Error fetching repositories")?;
    print_page(&view.view(&repos));
    Ok(ExitCode::SUCCESS)
}

fn cmd_badges(user: &str) -> Result<ExitCode> {
    for badge in badges_for(user).context("Error building stat badges")? {
        println!("{}", badge);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_dashboard(client: GitHubClient, user: &str, view: ListingView) -> Result<ExitCode> {
    let mut dashboard = Dashboard::new(client, user).with_view(view);
    let statuses = dashboard.refresh();

    if let Some(user) = dashboard.user() {
        println!("GitHub User Statistics\n");
        print_user(user);
        println!();
    }
    if !dashboard.badges().is_empty() {
        println!("GitHub Statistics\n");
        for badge in dashboard.badges() {
            println!("{}", badge);
        }
        println!();
    }
    if !dashboard.repositories().is_empty() {
        println!("Repositories\n");
        print_page(&dashboard.view());
    }

    for status in &statuses {
        eprintln!("{}", status);
    }
    Ok(if statuses.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_create(client: GitHubClient, form: &ProvisionForm, owner: Option<String>) -> Result<ExitCode> {
    let request = form.to_request().context("Invalid repository request")?;
    let client = if form.token.is_empty() {
        client
    } else {
        client.with_token(&form.token)
    };

    let result = match owner {
        Some(owner) => {
            let mut dashboard = Dashboard::new(client, owner);
            let result = dashboard.provision(&request);
            if let Ok(report) = &result {
                match &report.listing_refresh {
                    Some(status) => eprintln!("{}", status),
                    None => println!(
                        "{} now has {} repositories",
                        dashboard.username(),
                        dashboard.repositories().len()
                    ),
                }
            }
            result
        }
        None => provision(&client, &request),
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", failure_status(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("Repository: {}", report.repository.html_url);
    for upload in &report.uploads {
        let mark = if upload.outcome.is_success() { "ok" } else { "FAILED" };
        println!("  upload {:<30} {}", upload.name, mark);
    }
    if let Some(readme) = &report.readme {
        println!(
            "  README.md {}",
            if readme.is_success() { "ok" } else { "FAILED" }
        );
    }
    if let Some(release) = &report.release {
        println!(
            "  release {} {}",
            request.tag().unwrap_or_default(),
            if release.is_success() { "ok" } else { "FAILED" }
        );
    }

    let status = report.status();
    println!("\n{}", status);
    Ok(if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}
