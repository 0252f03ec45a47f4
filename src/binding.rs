//! Action profiles: named actions bound to controller controls.
//!
//! A profile is plain TOML:
//!
//! ```toml
//! name = "menu"
//! description = "Menu navigation"
//!
//! [[bindings]]
//! control = "cross"
//! action = "confirm"
//!
//! [[bindings]]
//! control = "circle"
//! action = "back"
//! ```
//!
//! `control` is a name from [`codes::CONTROLS`](crate::codes::CONTROLS) or a raw
//! numeric code. Use [`Dispatcher::bind_action`](crate::Dispatcher::bind_action)
//! to attach a handler to every control of an action.

use crate::codes;
use crate::error::{Error, Result};
use crate::event::EventIdentity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Maps a control to a named action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub control: String,
    pub action: String,
}

impl Binding {
    /// Resolves `control` to an identity.
    pub fn identity(&self) -> Result<EventIdentity> {
        codes::lookup(&self.control)
            .or_else(|| self.control.parse::<u16>().ok().map(EventIdentity::new))
            .ok_or_else(|| Error::Config(format!("unknown control `{}`", self.control)))
    }
}

/// Serializable set of bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl ActionProfile {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Distinct action names, sorted.
    pub fn actions(&self) -> BTreeSet<&str> {
        self.bindings.iter().map(|b| b.action.as_str()).collect()
    }

    /// Identities bound to `action`, in profile order.
    ///
    /// Fails if a bound control is unknown or nothing is bound to `action`.
    pub fn resolve(&self, action: &str) -> Result<Vec<EventIdentity>> {
        let identities = self
            .bindings
            .iter()
            .filter(|b| b.action == action)
            .map(Binding::identity)
            .collect::<Result<Vec<_>>>()?;
        if identities.is_empty() {
            return Err(Error::Config(format!(
                "profile `{}` binds nothing to action `{action}`",
                self.name
            )));
        }
        Ok(identities)
    }
}
