//! Pull request check classification and failure labelling.
//!
//! GitHub reports one check-run per run attempt, and the same check name can
//! appear in several check suites. [`CheckBuckets::classify`] folds those
//! runs into five disjoint sets of names, and [`label_pr_failures`] keeps the
//! pull request's `failure: *` labels in line with the failing set.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::Result;
use crate::traits::GitHubApi;
use crate::types::{CheckConclusion, CheckRun};

/// Classification of a single check.
///
/// Variants are ordered by precedence: when one name has runs in several
/// buckets it ends up in the greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    Neutral,
    Skipped,
    Successful,
    Running,
    Failing,
}

impl Bucket {
    /// Bucket for one run, or `None` for state combinations that are not classified.
    #[must_use]
    pub const fn of(run: &CheckRun) -> Option<Self> {
        if run.status.is_running() {
            return Some(Self::Running);
        }

        match run.conclusion {
            Some(conclusion) if conclusion.is_failure() => Some(Self::Failing),
            Some(CheckConclusion::Success) => Some(Self::Successful),
            Some(CheckConclusion::Skipped) => Some(Self::Skipped),
            Some(CheckConclusion::Neutral) => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// Check names of a pull request, partitioned by outcome.
///
/// The five sets are pairwise disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckBuckets {
    pub successful: BTreeSet<String>,
    pub failing: BTreeSet<String>,
    pub running: BTreeSet<String>,
    pub skipped: BTreeSet<String>,
    pub neutral: BTreeSet<String>,
}

impl CheckBuckets {
    /// Classify check runs, resolving duplicate names by [`Bucket`] precedence.
    #[must_use]
    pub fn classify<'a>(runs: impl IntoIterator<Item = &'a CheckRun>) -> Self {
        let mut best: BTreeMap<&str, Bucket> = BTreeMap::new();

        for run in runs {
            let Some(bucket) = Bucket::of(run) else {
                debug!(check = %run.name, status = ?run.status, conclusion = ?run.conclusion, "unclassified check run");
                continue;
            };

            best.entry(run.name.as_str())
                .and_modify(|current| *current = (*current).max(bucket))
                .or_insert(bucket);
        }

        let mut buckets = Self::default();
        for (name, bucket) in best {
            buckets.set_mut(bucket).insert(name.to_string());
        }
        buckets
    }

    /// The set holding names classified as `bucket`.
    #[must_use]
    pub const fn set(&self, bucket: Bucket) -> &BTreeSet<String> {
        match bucket {
            Bucket::Neutral => &self.neutral,
            Bucket::Skipped => &self.skipped,
            Bucket::Successful => &self.successful,
            Bucket::Running => &self.running,
            Bucket::Failing => &self.failing,
        }
    }

    fn set_mut(&mut self, bucket: Bucket) -> &mut BTreeSet<String> {
        match bucket {
            Bucket::Neutral => &mut self.neutral,
            Bucket::Skipped => &mut self.skipped,
            Bucket::Successful => &mut self.successful,
            Bucket::Running => &mut self.running,
            Bucket::Failing => &mut self.failing,
        }
    }
}

/// Matches jobs running against a Python pre-release, e.g. `Python 3.10-dev`
/// or `ubuntu / Python 3.9.0a1`. Their failures are expected and never labelled.
static PYTHON_PRERELEASE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)python\s*\d+\.\d+(?:.*(?:dev|alpha|beta|rc)|\.?\d*(?:a|b)\d)").unwrap()
});

/// How a [`LabelRule`] matches a check name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    Exact(&'static str),
    Prefix(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct LabelRule {
    pattern: Match,
    label: &'static str,
}

/// Rules are tried in order; the first match wins.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule { pattern: Match::Exact("Flake8"), label: "failure: flake8" },
    LabelRule { pattern: Match::Exact("docs"), label: "failure: docs" },
    LabelRule { pattern: Match::Prefix("mypy"), label: "failure: mypy" },
    LabelRule { pattern: Match::Prefix("ubuntu"), label: "failure: Linux" },
    LabelRule { pattern: Match::Prefix("windows"), label: "failure: Windows" },
];

/// Map a check name to the failure label it is responsible for.
///
/// Returns `None` for unrecognised checks and for Python pre-release jobs.
#[must_use]
pub fn map_to_label(check_name: &str) -> Option<&'static str> {
    if PYTHON_PRERELEASE.is_match(check_name) {
        return None;
    }

    LABEL_RULES
        .iter()
        .find(|rule| match rule.pattern {
            Match::Exact(name) => check_name == name,
            Match::Prefix(prefix) => check_name.starts_with(prefix),
        })
        .map(|rule| rule.label)
}

fn labels_for(checks: &BTreeSet<String>) -> BTreeSet<String> {
    checks
        .iter()
        .filter_map(|name| map_to_label(name))
        .map(str::to_string)
        .collect()
}

/// The label changes needed to bring a pull request in line with its checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPlan {
    /// Failure labels to remove because their checks now pass.
    pub remove: BTreeSet<String>,

    /// The label set the pull request should end up with.
    pub desired: BTreeSet<String>,
}

impl LabelPlan {
    /// Work out label changes from classified checks and the current labels.
    ///
    /// A label is removed only when a check mapping to it succeeded, it is
    /// currently applied, and no failing check still maps to it.
    #[must_use]
    pub fn compute(buckets: &CheckBuckets, current: &BTreeSet<String>) -> Self {
        let failure_labels = labels_for(&buckets.failing);
        let success_labels = labels_for(&buckets.successful);

        let remove = success_labels
            .iter()
            .filter(|label| current.contains(*label) && !failure_labels.contains(*label))
            .cloned()
            .collect();

        let desired = current
            .difference(&success_labels)
            .cloned()
            .chain(failure_labels)
            .collect();

        Self { remove, desired }
    }
}

/// Classify the checks on the head commit of a pull request.
///
/// # Errors
/// Returns error if the pull request or its check runs cannot be fetched.
pub async fn get_checks_for_pr<G: GitHubApi>(
    api: &G,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<CheckBuckets> {
    let pr = api.get_pr(owner, repo, number).await?;
    let runs = api.get_check_runs(owner, repo, &pr.head_sha).await?;

    Ok(CheckBuckets::classify(&runs))
}

/// Label a pull request with the checks that are failing, and remove labels
/// for checks that have since passed.
///
/// Removals are issued before the addition; the two are not atomic. Returns
/// the label set the pull request was given.
///
/// # Errors
/// Returns the first API error encountered, unchanged.
pub async fn label_pr_failures<G: GitHubApi>(
    api: &G,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<BTreeSet<String>> {
    let buckets = get_checks_for_pr(api, owner, repo, number).await?;

    let current: BTreeSet<String> = api
        .list_issue_labels(owner, repo, number)
        .await?
        .into_iter()
        .map(|label| label.name)
        .collect();

    let plan = LabelPlan::compute(&buckets, &current);

    for label in &plan.remove {
        info!(owner, repo, number, label = %label, "removing failure label");
        api.remove_issue_label(owner, repo, number, label).await?;
    }

    if !plan.desired.is_empty() {
        let labels: Vec<String> = plan.desired.iter().cloned().collect();
        info!(owner, repo, number, labels = ?labels, "applying labels");
        api.add_issue_labels(owner, repo, number, &labels).await?;
    }

    Ok(plan.desired)
}
