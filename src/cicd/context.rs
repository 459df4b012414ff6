//! CI environment discovery
//!
//! The context is read once at startup and passed by value, so nothing else
//! in the crate looks at process environment variables.

use std::collections::HashMap;

/// Owner and name of the reviewed repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDetails {
    /// Account or organisation owning the repository
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoDetails {
    /// Parse an `owner/repo` slug; anything other than exactly two parts is rejected
    ///
    /// # Examples
    ///
    /// ```
    /// use pr_bot::cicd::RepoDetails;
    ///
    /// let details = RepoDetails::from_slug("acme/widgets").unwrap();
    /// assert_eq!(details.owner, "acme");
    /// assert!(RepoDetails::from_slug("acme").is_none());
    /// ```
    pub fn from_slug(slug: &str) -> Option<Self> {
        let mut parts = slug.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) => Some(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => None,
        }
    }
}

/// Facts about the CI build the bot runs in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    /// Running on Travis CI
    pub is_ci: bool,
    /// The build was triggered by a pull request
    pub is_pull_request: bool,
    /// Repository the build belongs to
    pub repo_details: Option<RepoDetails>,
    /// Target branch of the pull request, or the pushed branch
    pub git_branch: Option<String>,
    /// Head commit of the pull request
    pub pull_request_sha: Option<String>,
    /// Pull request number
    pub pull_request_number: Option<String>,
    /// Result of the preceding test phase, when reported
    pub is_successful_run: Option<bool>,
}

impl CiContext {
    /// Read the context from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build the context from an explicit variable map
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use pr_bot::cicd::CiContext;
    ///
    /// let vars = HashMap::from([
    ///     ("TRAVIS".to_string(), "true".to_string()),
    ///     ("TRAVIS_EVENT_TYPE".to_string(), "pull_request".to_string()),
    ///     ("TRAVIS_PULL_REQUEST".to_string(), "42".to_string()),
    /// ]);
    /// let ctx = CiContext::from_vars(&vars);
    /// assert!(ctx.is_pull_request_build());
    /// assert_eq!(ctx.pull_request_number.as_deref(), Some("42"));
    /// ```
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).map(String::as_str);

        Self {
            is_ci: get("TRAVIS") == Some("true"),
            is_pull_request: get("TRAVIS_EVENT_TYPE") == Some("pull_request"),
            repo_details: get("TRAVIS_REPO_SLUG").and_then(RepoDetails::from_slug),
            git_branch: get("TRAVIS_BRANCH").map(str::to_string),
            pull_request_sha: get("TRAVIS_PULL_REQUEST_SHA").map(str::to_string),
            pull_request_number: get("TRAVIS_PULL_REQUEST")
                .filter(|value| !value.is_empty() && *value != "false")
                .map(str::to_string),
            is_successful_run: get("TRAVIS_TEST_RESULT").map(|value| value == "0"),
        }
    }

    /// Results should go to the review comment rather than the console
    pub fn is_pull_request_build(&self) -> bool {
        self.is_ci && self.is_pull_request
    }
}
