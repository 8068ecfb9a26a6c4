//! GitHub-specific `Accept` media types.

/// Preview media type for the branch protection API.
pub const LUKE_CAGE: &str = "application/vnd.github.luke-cage-preview+json";

/// Preview media type for GitHub App endpoints.
pub const MACHINE_MAN: &str = "application/vnd.github.machine-man-preview+json";

/// Default media type sent with every request.
pub const GITHUB_JSON: &str = "application/vnd.github+json";
