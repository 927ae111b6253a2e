//! Build trigger the host framework drives.
//!
//! The host decides when to build. It constructs a [`Plugin`] once with its own
//! version, which fixes the set of lifecycle events the plugin answers to, and
//! then calls [`Plugin::on_event`] as events fire. A triggered pass runs to
//! completion before control returns to the host.

use semver::Version;
use tracing::debug;

use crate::error::BuildError;
use crate::hooks::{self, HookError};
use crate::manifest::UnitStore;
use crate::pass::{self, PassOptions, PassReport};
use crate::toolchain::Toolchain;

pub struct Plugin<T> {
  host_version: Version,
  hooks: Vec<&'static str>,
  toolchain: T,
  options: PassOptions,
}

impl<T: Toolchain> Plugin<T> {
  /// Evaluate the hook table for `host_version`.
  pub fn new(host_version: &str, toolchain: T, options: PassOptions) -> Result<Self, HookError> {
    let host_version = hooks::parse_host_version(host_version)?;
    let hooks = hooks::hooks_for(&host_version)?;
    debug!(host_version = %host_version, hooks = ?hooks, "registered lifecycle hooks");
    Ok(Self {
      host_version,
      hooks,
      toolchain,
      options,
    })
  }

  pub fn host_version(&self) -> &Version {
    &self.host_version
  }

  /// Lifecycle events this plugin builds on.
  pub fn hooks(&self) -> &[&'static str] {
    &self.hooks
  }

  pub fn handles(&self, event: &str) -> bool {
    self.hooks.iter().any(|hook| *hook == event)
  }

  /// Run a build pass now.
  pub async fn trigger<S: UnitStore>(&self, store: &mut S) -> Result<PassReport, BuildError> {
    pass::run(store, &self.toolchain, &self.options).await
  }

  /// Run a build pass if `event` is one this plugin is registered for.
  ///
  /// Returns `Ok(None)` for events it ignores.
  pub async fn on_event<S: UnitStore>(&self, event: &str, store: &mut S) -> Result<Option<PassReport>, BuildError> {
    if !self.handles(event) {
      debug!(event, "event not registered, ignoring");
      return Ok(None);
    }
    self.trigger(store).await.map(Some)
  }
}
