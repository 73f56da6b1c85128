//! `deps.edn` generation.
//!
//! Each named configuration becomes one alias under `:aliases`:
//!
//! ```text
//! {:aliases {:hello {:extra-paths ["src/main/clojure" "target/classes"]
//!                    :extra-deps {org.clojure/clojure {:mvn/version "1.10.1"}}
//!                    :main-opts ["-m" "hello.core"]}}}
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::dependency::DeclaredDependency;
use crate::core::goal_state::GoalState;
use crate::core::project::BuildLayout;
use crate::core::scope::ScopeFilter;
use crate::ops::classpath::{assemble, PathStyle};
use crate::ops::configure::NamedConfigurations;
use crate::util::edn::{Edn, DEFAULT_WIDTH};
use crate::util::fs::{absolutize, relative_path, write_string};
use crate::util::process::split_args;

/// File name used when the manifest target is a directory.
pub const MANIFEST_FILE_NAME: &str = "deps.edn";

/// Build the manifest for a set of named configurations.
///
/// Aliases are ordered by execution id.
pub fn build_manifest(
    configs: &NamedConfigurations,
    dependencies: &[DeclaredDependency],
    layout: &BuildLayout,
) -> Edn {
    let aliases = configs
        .iter()
        .map(|(id, state)| (Edn::keyword(id.as_str()), build_alias(state, dependencies, layout)))
        .collect();

    Edn::Map(vec![(Edn::keyword("aliases"), Edn::Map(aliases))])
}

fn build_alias(state: &GoalState, dependencies: &[DeclaredDependency], layout: &BuildLayout) -> Edn {
    let mut fields = Vec::new();

    let paths = assemble(state, None, PathStyle::Relative, layout);
    if !paths.is_empty() {
        fields.push((Edn::keyword("extra-paths"), Edn::strings(paths)));
    }

    let filter = ScopeFilter::for_kind(state.scope());
    let mut deps: BTreeMap<String, Edn> = BTreeMap::new();
    for dep in dependencies.iter().filter(|d| filter.includes(d.scope)) {
        deps.entry(dep.symbol())
            .or_insert_with(|| dependency_coordinate(dep, layout.root()));
    }
    if !deps.is_empty() {
        let entries = deps
            .into_iter()
            .map(|(symbol, coordinate)| (Edn::symbol(symbol), coordinate))
            .collect();
        fields.push((Edn::keyword("extra-deps"), Edn::Map(entries)));
    }

    if let Some(args) = state.arguments() {
        let opts = split_args(args);
        if !opts.is_empty() {
            fields.push((Edn::keyword("main-opts"), Edn::strings(opts)));
        }
    }

    Edn::Map(fields)
}

fn dependency_coordinate(dep: &DeclaredDependency, root: &Path) -> Edn {
    match dep.path {
        Some(ref path) => {
            let relative = relative_path(root, &absolutize(root, path));
            Edn::Map(vec![(
                Edn::keyword("local/root"),
                Edn::string(relative.display().to_string()),
            )])
        }
        None => Edn::Map(vec![(
            Edn::keyword("mvn/version"),
            Edn::string(dep.version.as_str()),
        )]),
    }
}

/// Render a manifest as pretty-printed EDN with a trailing newline.
pub fn render_manifest(manifest: &Edn) -> String {
    let mut out = manifest.to_pretty_string(DEFAULT_WIDTH);
    out.push('\n');
    out
}

/// Get the file a manifest written to `target` ends up in.
pub fn manifest_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(MANIFEST_FILE_NAME)
    } else {
        target.to_path_buf()
    }
}

/// Write rendered manifest content, replacing any existing file.
///
/// Returns the path written.
pub fn write_manifest(target: &Path, content: &str) -> Result<PathBuf> {
    let path = manifest_path(target);
    write_string(&path, content)?;
    Ok(path)
}
