//! Immersive (AR/VR) session capability
//!
//! A backend either starts a session or says why it can't. A failure
//! never touches the regular views; the caller only reports it.

use std::fmt;
use thiserror::Error;

/// Kind of immersive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmersiveMode {
    Ar,
    Vr,
}

impl fmt::Display for ImmersiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImmersiveMode::Ar => f.write_str("AR"),
            ImmersiveMode::Vr => f.write_str("VR"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImmersiveError {
    #[error("{0} sessions are not supported on this display")]
    Unsupported(ImmersiveMode),
}

/// Handle to an active session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmersiveSession {
    pub mode: ImmersiveMode,
}

pub trait ImmersiveBackend {
    fn is_supported(&self, mode: ImmersiveMode) -> bool;

    fn begin(&mut self, mode: ImmersiveMode) -> Result<ImmersiveSession, ImmersiveError>;
}

/// Ask `backend` for a session, checking support before starting one
pub fn request_session(
    backend: &mut dyn ImmersiveBackend,
    mode: ImmersiveMode,
) -> Result<ImmersiveSession, ImmersiveError> {
    if !backend.is_supported(mode) {
        tracing::debug!(%mode, "immersive mode not supported");
        return Err(ImmersiveError::Unsupported(mode));
    }
    backend.begin(mode)
}

/// Terminal display: no immersive runtime available
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl ImmersiveBackend for TerminalDisplay {
    fn is_supported(&self, _mode: ImmersiveMode) -> bool {
        false
    }

    fn begin(&mut self, mode: ImmersiveMode) -> Result<ImmersiveSession, ImmersiveError> {
        tracing::info!(%mode, "immersive session requested on terminal display");
        Err(ImmersiveError::Unsupported(mode))
    }
}
