//! Source control and CI metadata of the checkout being analysed

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, Oid, Repository, StatusOptions};
use serde::Serialize;
use tracing::{debug, warn};

const SHORT_SHA_LEN: usize = 7;

/// Build traceability facts attached to the project descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit_short_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_remote_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub ci: CiInfo,
    pub build_timestamp: DateTime<Utc>,
}

/// Build metadata exposed by a CI provider through environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CiInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_build_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_build_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_build_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_event_name: Option<String>,
}

/// Environment variable names a provider uses for each [`CiInfo`] field
struct CiProvider {
    name: &'static str,
    marker: &'static str,
    build_id: &'static str,
    build_number: &'static str,
    build_url: Option<&'static str>,
    job_name: &'static str,
    actor: Option<&'static str>,
}

const CI_PROVIDERS: &[CiProvider] = &[
    CiProvider {
        name: "GitHub Actions",
        marker: "GITHUB_ACTIONS",
        build_id: "GITHUB_RUN_ID",
        build_number: "GITHUB_RUN_NUMBER",
        build_url: None,
        job_name: "GITHUB_WORKFLOW",
        actor: Some("GITHUB_ACTOR"),
    },
    CiProvider {
        name: "GitLab CI",
        marker: "GITLAB_CI",
        build_id: "CI_PIPELINE_ID",
        build_number: "CI_PIPELINE_IID",
        build_url: Some("CI_PIPELINE_URL"),
        job_name: "CI_JOB_NAME",
        actor: Some("GITLAB_USER_LOGIN"),
    },
    CiProvider {
        name: "Jenkins",
        marker: "JENKINS_HOME",
        build_id: "BUILD_ID",
        build_number: "BUILD_NUMBER",
        build_url: Some("BUILD_URL"),
        job_name: "JOB_NAME",
        actor: None,
    },
    CiProvider {
        name: "Travis CI",
        marker: "TRAVIS",
        build_id: "TRAVIS_BUILD_ID",
        build_number: "TRAVIS_BUILD_NUMBER",
        build_url: Some("TRAVIS_BUILD_WEB_URL"),
        job_name: "TRAVIS_JOB_NAME",
        actor: None,
    },
    CiProvider {
        name: "CircleCI",
        marker: "CIRCLECI",
        build_id: "CIRCLE_WORKFLOW_ID",
        build_number: "CIRCLE_BUILD_NUM",
        build_url: Some("CIRCLE_BUILD_URL"),
        job_name: "CIRCLE_JOB",
        actor: Some("CIRCLE_USERNAME"),
    },
    CiProvider {
        name: "Azure Pipelines",
        marker: "TF_BUILD",
        build_id: "BUILD_BUILDID",
        build_number: "BUILD_BUILDNUMBER",
        build_url: None,
        job_name: "BUILD_DEFINITIONNAME",
        actor: Some("BUILD_REQUESTEDFOR"),
    },
];

/// Collect build metadata for the repository containing `project_root`.
///
/// The repository is discovered upwards from `project_root`. Returns `None`
/// when no repository is found or it cannot be read; a repository without
/// commits still yields the timestamp, branch and CI facts.
pub fn collect_build_info(project_root: &Path) -> Option<BuildInfo> {
    let repo = match Repository::discover(project_root) {
        Ok(repo) => repo,
        Err(err) if err.code() == ErrorCode::NotFound => {
            debug!(path = %project_root.display(), "no git repository, skipping build info");
            return None;
        }
        Err(err) => {
            warn!(path = %project_root.display(), error = %err, "cannot open git repository");
            return None;
        }
    };

    let mut info = BuildInfo {
        ci: detect_ci(|key| std::env::var(key).ok()),
        build_timestamp: Utc::now(),
        ..BuildInfo::default()
    };
    read_git(&repo, &mut info);
    Some(info)
}

fn read_git(repo: &Repository, info: &mut BuildInfo) {
    let head = match repo.head() {
        Ok(head) => head,
        Err(err) => {
            // unborn branch: HEAD names a branch that has no commit yet
            debug!(error = %err, "HEAD does not resolve to a commit");
            info.git_branch = unborn_branch(repo);
            return;
        }
    };

    if head.is_branch() {
        info.git_branch = head.shorthand().map(str::to_string);
    }

    match head.peel_to_commit() {
        Ok(commit) => {
            let sha = commit.id().to_string();
            info.git_commit_short_sha = sha.get(..SHORT_SHA_LEN).map(str::to_string);
            info.git_commit_sha = Some(sha);
            info.git_commit_message = commit.summary().map(str::to_string);
            info.git_commit_author = commit.author().name().map(str::to_string);
            info.git_commit_time = Utc.timestamp_opt(commit.time().seconds(), 0).single();
            info.git_tag = tag_at(repo, commit.id());
        }
        Err(err) => warn!(error = %err, "cannot read HEAD commit"),
    }

    info.git_dirty = is_dirty(repo);
    info.git_remote_url = repo
        .find_remote("origin")
        .ok()
        .and_then(|remote| remote.url().map(str::to_string));
}

fn unborn_branch(repo: &Repository) -> Option<String> {
    let head = repo.find_reference("HEAD").ok()?;
    let target = head.symbolic_target()?;
    target.strip_prefix("refs/heads/").map(str::to_string)
}

/// First tag, in name order, whose peeled target is `commit`.
fn tag_at(repo: &Repository, commit: Oid) -> Option<String> {
    let names = repo.tag_names(None).ok()?;
    names.iter().flatten().find_map(|name| {
        let target = repo
            .find_reference(&format!("refs/tags/{name}"))
            .and_then(|reference| reference.peel_to_commit())
            .ok()?;
        (target.id() == commit).then(|| name.to_string())
    })
}

fn is_dirty(repo: &Repository) -> Option<bool> {
    let mut options = StatusOptions::new();
    options.include_untracked(true).include_ignored(false);

    match repo.statuses(Some(&mut options)) {
        Ok(statuses) => Some(!statuses.is_empty()),
        Err(err) => {
            debug!(error = %err, "cannot compute working tree status");
            None
        }
    }
}

/// Detect the CI provider from environment lookups, first marker wins.
pub fn detect_ci(lookup: impl Fn(&str) -> Option<String>) -> CiInfo {
    let Some(provider) = CI_PROVIDERS
        .iter()
        .find(|provider| lookup(provider.marker).is_some())
    else {
        return CiInfo::default();
    };

    let build_id = lookup(provider.build_id);
    let build_url = match provider.build_url {
        Some(key) => lookup(key),
        None if provider.marker == "GITHUB_ACTIONS" => lookup("GITHUB_REPOSITORY")
            .zip(build_id.clone())
            .map(|(repo, run)| format!("https://github.com/{repo}/actions/runs/{run}")),
        None => None,
    };
    let event_name = (provider.marker == "GITHUB_ACTIONS")
        .then(|| lookup("GITHUB_EVENT_NAME"))
        .flatten();

    CiInfo {
        ci_provider: Some(provider.name.to_string()),
        ci_build_id: build_id,
        ci_build_number: lookup(provider.build_number),
        ci_build_url: build_url,
        ci_job_name: lookup(provider.job_name),
        ci_actor: provider.actor.and_then(&lookup),
        ci_event_name: event_name,
    }
}
