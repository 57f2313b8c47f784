use thiserror::Error;

use crate::config::{EntryPoint, HostConfig};
use crate::load::RemoteResource;

/// Failure raised by the host while accepting a map.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct HostError(pub String);

/// File handed to the host via a simulated drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropFile<'a> {
    pub name: &'a str,
    pub mime: &'a str,
    pub contents: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Element(String),
    /// Drop target id was missing from the document.
    Body,
}

/// Which delivery path accepted the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationOutcome {
    EntryPoint(String),
    SimulatedDrop(DropTarget),
}

/// Global namespace and DOM of the host page.
pub trait HostSurface {
    fn is_callable(&self, path: &str) -> bool;

    fn call_with_text(&self, path: &str, text: &str) -> Result<(), HostError>;

    /// Call `path(<value at state_path>, text)`.
    fn call_with_state(&self, path: &str, state_path: &str, text: &str) -> Result<(), HostError>;

    /// Dispatch a bubbling, cancelable `drop` carrying `file` at `target_id`.
    fn dispatch_drop(&self, target_id: &str, file: &DropFile<'_>) -> Result<DropTarget, HostError>;
}

impl EntryPoint {
    pub fn is_available<H: HostSurface + ?Sized>(&self, host: &H) -> bool {
        host.is_callable(&self.path)
    }

    pub fn invoke<H: HostSurface + ?Sized>(&self, host: &H, text: &str) -> Result<(), HostError> {
        match &self.state_arg {
            Some(state) => host.call_with_state(&self.path, state, text),
            None => host.call_with_text(&self.path, text),
        }
    }
}

/// Hand `resource` to the first callable entry point, else simulate a drop.
///
/// Only one entry point is ever invoked; an exception from it is not retried
/// against the remaining candidates.
pub fn deliver<H: HostSurface + ?Sized>(
    host: &H,
    config: &HostConfig,
    resource: &RemoteResource,
    file_name: &str,
) -> Result<IntegrationOutcome, HostError> {
    if let Some(entry) = config.entry_points.iter().find(|e| e.is_available(host)) {
        entry.invoke(host, &resource.text)?;
        return Ok(IntegrationOutcome::EntryPoint(entry.path.clone()));
    }

    let file = DropFile {
        name: file_name,
        mime: "text/plain",
        contents: &resource.text,
    };
    let target = host.dispatch_drop(&config.drop_target_id, &file)?;
    Ok(IntegrationOutcome::SimulatedDrop(target))
}
