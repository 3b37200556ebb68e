//! Interface configuration.
//!
//! An [`InterfaceConfig`] names an interface, the primitive entry point outer
//! tooling should wrap, and the author-facing aliases routed to each
//! declaration surface. Every field has a default reproducing the classic BDD
//! names, so a YAML file only needs the parts it changes:
//!
//! ```yaml
//! name: bddParams
//! aliases:
//!   declare: [it, specify, scenario]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::Mode;
use crate::ParamsError;

pub const DEFAULT_INTERFACE: &str = "bddParams";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    pub name: String,
    pub description: String,
    /// The name under which the primitive single-case entry is exposed. Outer
    /// tooling that wraps test declarations must wrap this one, not the
    /// author-facing alias, so parameter expansion is not intercepted twice.
    pub primitive_entry: String,
    pub aliases: AliasTable,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_INTERFACE.to_string(),
            description: "BDD with test params".to_string(),
            primitive_entry: "_it".to_string(),
            aliases: AliasTable::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasTable {
    pub declare: Vec<String>,
    pub declare_only: Vec<String>,
    pub declare_skip: Vec<String>,
    pub primitive: Vec<String>,
    pub primitive_only: Vec<String>,
    pub primitive_skip: Vec<String>,
    pub suite: Vec<String>,
    pub suite_only: Vec<String>,
    pub suite_skip: Vec<String>,
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            declare: names(&["it", "specify"]),
            declare_only: names(&["it.only", "specify.only"]),
            declare_skip: names(&["xit", "xspecify", "it.skip", "specify.skip"]),
            primitive: names(&["_it", "_specify"]),
            primitive_only: names(&["_it.only", "_specify.only"]),
            primitive_skip: names(&["_xit", "_xspecify", "_it.skip", "_specify.skip"]),
            suite: names(&["describe", "context"]),
            suite_only: names(&["describe.only", "context.only"]),
            suite_skip: names(&["xdescribe", "xcontext", "describe.skip", "context.skip"]),
        }
    }
}

/// Which part of the declaration surface an alias reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Author-facing declarations, with parameter expansion.
    Declare,
    /// Single-case registration, bypassing expansion.
    Primitive,
    Suite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub surface: Surface,
    pub mode: Mode,
}

impl AliasTable {
    pub fn resolve(&self, alias: &str) -> Option<Route> {
        let table = [
            (&self.declare, Surface::Declare, Mode::Normal),
            (&self.declare_only, Surface::Declare, Mode::Only),
            (&self.declare_skip, Surface::Declare, Mode::Skip),
            (&self.primitive, Surface::Primitive, Mode::Normal),
            (&self.primitive_only, Surface::Primitive, Mode::Only),
            (&self.primitive_skip, Surface::Primitive, Mode::Skip),
            (&self.suite, Surface::Suite, Mode::Normal),
            (&self.suite_only, Surface::Suite, Mode::Only),
            (&self.suite_skip, Surface::Suite, Mode::Skip),
        ];
        table
            .into_iter()
            .find(|(aliases, _, _)| aliases.iter().any(|a| a == alias))
            .map(|(_, surface, mode)| Route { surface, mode })
    }
}

impl InterfaceConfig {
    pub fn resolve(&self, alias: &str) -> Option<Route> {
        self.aliases.resolve(alias)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ParamsError> {
        serde_yaml::from_str(text).map_err(|e| ParamsError::load("interface config", e))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ParamsError> {
        let origin = path.as_ref().display().to_string();
        let text = fs::read_to_string(path.as_ref()).map_err(|e| ParamsError::load(&origin, e))?;
        serde_yaml::from_str(&text).map_err(|e| ParamsError::load(origin, e))
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let config = InterfaceConfig::default();
        let route = |alias| config.resolve(alias).map(|r| (r.surface, r.mode));
        assert_eq!(route("it"), Some((Surface::Declare, Mode::Normal)));
        assert_eq!(route("specify.only"), Some((Surface::Declare, Mode::Only)));
        assert_eq!(route("xit"), Some((Surface::Declare, Mode::Skip)));
        assert_eq!(route("_it"), Some((Surface::Primitive, Mode::Normal)));
        assert_eq!(route("_xspecify"), Some((Surface::Primitive, Mode::Skip)));
        assert_eq!(route("xcontext"), Some((Surface::Suite, Mode::Skip)));
        assert_eq!(route("test"), None);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = InterfaceConfig::from_yaml_str(
            "name: scenarios\naliases:\n  declare: [scenario]\n",
        )
        .unwrap();
        assert_eq!(config.name, "scenarios");
        assert_eq!(config.primitive_entry, "_it");
        assert!(config.resolve("it").is_none());
        assert_eq!(
            config.resolve("scenario").map(|r| r.surface),
            Some(Surface::Declare)
        );
        assert_eq!(
            config.resolve("xit").map(|r| r.mode),
            Some(Mode::Skip)
        );
    }

    #[test]
    fn test_bad_yaml_is_a_load_error() {
        let err = InterfaceConfig::from_yaml_str("aliases: 3").unwrap_err();
        assert_eq!(err.error_type(), crate::ErrorType::Load);
    }
}
