//! # Repo Scaffold Library
//!
//! Generates the build and documentation configuration of a Java library
//! repository from a small declaration, so that a family of repositories
//! shares conventions without copying boilerplate. It backs the
//! `repo-scaffold` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use repo_scaffold::declaration;
//! use repo_scaffold::model::DeclarationModel;
//! use repo_scaffold::profile::Profile;
//! use repo_scaffold::render;
//!
//! let declaration = declaration::parse(
//!     ".scaffold.yaml",
//!     "schema: 3\nproject: { name: hookless, jdk: 17 }\ndependencies: [guava]\n",
//! )
//! .unwrap();
//! let profile = Profile::builtin().unwrap();
//!
//! let resolution = DeclarationModel::new(&declaration, &profile)
//!     .unwrap()
//!     .resolve()
//!     .unwrap();
//! assert_eq!(resolution.dependencies.len(), 1);
//!
//! let artifacts = render::render(&resolution).unwrap();
//! assert_eq!(artifacts[0].path, std::path::Path::new("pom.xml"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Declaration (`declaration`)**: the `.scaffold.yaml` a repository
//!   writes, in any of three schema generations.
//! - **Engine profile (`profile`, `locate`)**: ecosystem and family defaults,
//!   found through an explicit search path.
//! - **Declaration model (`model`)**: layers the declaration over the
//!   profile and resolves identity, dependencies and link catalogs.
//! - **Registry (`registry`)**: curated dependency symbols and the ordered,
//!   conflict-checked dependency set.
//! - **Link catalogs (`links`)**: labeled javadoc and documentation links.
//! - **Synthesizer (`render`)**: pure rendering of every artifact.
//! - **Reconciler (`reconcile`, `markers`)**: plans and writes artifacts,
//!   preserving manual regions.
//!
//! ## Execution Flow
//!
//! [`pipeline::generate`] loads the declaration, locates the profile,
//! resolves the model, renders every artifact, plans every reconciliation
//! and only then writes. Any failure before the writes leaves the
//! repository untouched.

pub mod declaration;
pub mod defaults;
pub mod error;
pub mod links;
pub mod locate;
pub mod markers;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod reconcile;
pub mod registry;
pub mod render;
pub mod suggestions;
pub mod template;

#[cfg(test)]
mod markers_proptest;
