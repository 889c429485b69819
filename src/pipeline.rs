//! Orchestrator for a complete generation run
//!
//! A run has four stages:
//! 1. Load the declaration and locate the engine profile
//! 2. Resolve the declaration model (identity, dependencies, link catalogs)
//! 3. Render every artifact
//! 4. Plan every reconciliation, then commit the plans
//!
//! Every artifact is planned before the first write, so a configuration,
//! render or merge failure leaves the repository untouched.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::declaration;
use crate::defaults;
use crate::error::Result;
use crate::locate::{SearchEntry, SearchPath};
use crate::model::DeclarationModel;
use crate::reconcile::{self, Plan};
use crate::render;

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Repository root the artifacts are written under.
    pub root: PathBuf,
    /// Declaration file; defaults to `.scaffold.yaml` under the root.
    pub declaration: Option<PathBuf>,
    /// Injected engine profile.
    pub profile: Option<PathBuf>,
    /// Whether the per-user registered profile is searched.
    pub registered_profile: bool,
}

impl Options {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            declaration: None,
            profile: None,
            registered_profile: true,
        }
    }

    pub fn with_declaration(mut self, path: impl Into<PathBuf>) -> Self {
        self.declaration = Some(path.into());
        self
    }

    pub fn with_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile = Some(path.into());
        self
    }

    /// Skip the per-user registered profile.
    pub fn without_registered_profile(mut self) -> Self {
        self.registered_profile = false;
        self
    }

    /// The declaration file this run reads.
    pub fn declaration_path(&self) -> PathBuf {
        self.declaration
            .clone()
            .unwrap_or_else(|| self.root.join(defaults::DECLARATION_FILE_NAME))
    }

    /// Profile search path for this run.
    pub fn search_path(&self) -> SearchPath {
        let root = absolute(&self.root);
        if self.registered_profile {
            SearchPath::standard(self.profile.clone(), &root)
        } else {
            SearchPath::with_registered(self.profile.clone(), &root, None)
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Planned reconciliations of a run.
#[derive(Debug, Clone)]
pub struct Report {
    pub repository_name: String,
    pub profile_source: SearchEntry,
    pub plans: Vec<Plan>,
}

impl Report {
    /// Plans whose commit would modify the repository.
    pub fn drifted(&self) -> Vec<&Plan> {
        self.plans.iter().filter(|p| p.is_change()).collect()
    }
}

/// Resolve, render and plan without writing anything.
pub fn prepare(options: &Options) -> Result<Report> {
    let declaration = declaration::from_file(options.declaration_path())?;
    let located = options.search_path().locate()?;

    let model = DeclarationModel::new(&declaration, &located.profile)?;
    let resolution = model.resolve()?;
    let artifacts = render::render(&resolution)?;

    let plans = artifacts
        .iter()
        .map(|artifact| reconcile::plan(&options.root, artifact))
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "Planned {} artifacts for '{}'",
        plans.len(),
        resolution.descriptor.repository_name
    );

    Ok(Report {
        repository_name: resolution.descriptor.repository_name,
        profile_source: located.source,
        plans,
    })
}

/// Full run: plan everything, then write what changed.
pub fn generate(options: &Options) -> Result<Report> {
    let report = prepare(options)?;
    for plan in &report.plans {
        plan.commit()?;
    }
    info!(
        "Generated {} artifacts for '{}' ({} changed)",
        report.plans.len(),
        report.repository_name,
        report.drifted().len()
    );
    Ok(report)
}

/// Plan only; the caller decides what drift means.
pub fn check(options: &Options) -> Result<Report> {
    prepare(options)
}
