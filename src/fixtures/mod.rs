//! Fixture tree discovery.
//!
//! Walks `<root>/<group>/<suite>/<task>` through the [`ServiceContext`]
//! ports and produces a [`FixtureTree`]: for every task, the named fixture
//! files it resolves to, its merged options, and any JSON sidecars.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use fixtree::context::ServiceContext;
//! use fixtree::fixtures::{self, preset};
//!
//! let ctx = ServiceContext::live();
//! let options = preset::lookup("babel")?;
//! let tree = fixtures::build(&ctx, Path::new("test/fixtures"), &options)?;
//! for (group, suites) in &tree {
//!     println!("{group}: {} suites", suites.len());
//! }
//! # Ok::<(), fixtree::fixtures::FixtureError>(())
//! ```
//!
//! [`ServiceContext`]: crate::context::ServiceContext

pub mod data;
mod error;
pub mod merge;
mod model;
mod options;
pub mod preset;
pub mod resolver;
pub mod settings;
mod spec;
pub mod walker;

pub use error::FixtureError;
pub use model::{Fixture, FixtureTree, Suite, Task};
pub use options::{
    default_ignore, BuildOptions, DeriveOptions, NamePredicate, TaskPredicate,
    DEFAULT_OPTIONS_BASENAME, RESERVED_TASK_FIELDS,
};
pub use settings::{BuildSettings, FixtureSettings};
pub use spec::{ContentRule, FixtureSpec, TaskFileRule};
pub use walker::{build, build_group};
