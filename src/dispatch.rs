//! Explicit interface registration.
//!
//! A host that selects its declaration interface by name asks a [`Dispatcher`]
//! for it. Nothing is registered as a side effect of linking this crate: the
//! host builds a dispatcher, registers the configs it wants and attaches the
//! chosen one to its own registration API.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{InterfaceConfig, DEFAULT_INTERFACE};
use crate::host::Host;
use crate::interface::Interface;
use crate::{err_msg, ParamsError};

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    interfaces: BTreeMap<String, InterfaceConfig>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher with the default `bddParams` interface registered.
    pub fn with_defaults() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(InterfaceConfig::default());
        dispatcher
    }

    /// Registers `config` under its name, returning any config it replaces.
    pub fn register(&mut self, config: InterfaceConfig) -> Option<InterfaceConfig> {
        debug!(interface = %config.name, primitive = %config.primitive_entry, "registering interface");
        self.interfaces.insert(config.name.clone(), config)
    }

    pub fn route(&self, name: &str) -> Option<&InterfaceConfig> {
        self.interfaces.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        self.interfaces
            .values()
            .map(|c| (c.name.as_str(), c.description.as_str()))
            .collect()
    }

    /// The entry outer tooling should wrap for the named interface.
    pub fn wrap_target(&self, name: &str) -> Option<&str> {
        self.route(name).map(|c| c.primitive_entry.as_str())
    }

    /// Binds the named interface to `host`.
    pub fn attach<'h, H: Host + ?Sized>(
        &self,
        name: &str,
        host: &'h mut H,
    ) -> Result<Interface<'h, H>, ParamsError> {
        let config = self
            .route(name)
            .cloned()
            .ok_or_else(|| err_msg!(UnknownInterface, name))?;
        Ok(Interface::with_config(host, config))
    }

    pub fn attach_default<'h, H: Host + ?Sized>(
        &self,
        host: &'h mut H,
    ) -> Result<Interface<'h, H>, ParamsError> {
        self.attach(DEFAULT_INTERFACE, host)
    }
}
