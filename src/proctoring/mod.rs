//! Client-side proctoring supervisor.
//!
//! A [`Proctor`] acquires camera, microphone and fullscreen through a host
//! [`ProctoringEnvironment`] and hands back a [`ReadyGate`]. The gate is the only
//! way to issue the begin-session call, and [`ReadyGate::monitor`] turns it into a
//! running [`MonitorHandle`] that ends the session on the first violation.
//!
//! The checks are advisory. Nothing here is corroborated by the server.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub mod policy;
mod supervisor;


pub use supervisor::{MonitorHandle, MonitorOutcome, Proctor, ReadyGate, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Camera,
    Microphone,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Camera => f.write_str("Camera"),
            Device::Microphone => f.write_str("Microphone"),
        }
    }
}

/// Event sources a supervisor subscribes to while a session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSource {
    Visibility,
    Fullscreen,
    CameraTrack,
    MicrophoneTrack,
    Keyboard,
    Clipboard,
    ContextMenu,
}

impl SignalSource {
    pub const ALL: [SignalSource; 7] = [
        SignalSource::Visibility,
        SignalSource::Fullscreen,
        SignalSource::CameraTrack,
        SignalSource::MicrophoneTrack,
        SignalSource::Keyboard,
        SignalSource::Clipboard,
        SignalSource::ContextMenu,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyStroke {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardAction {
    Copy,
    Paste,
    Cut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    VisibilityChanged { hidden: bool },
    FullscreenChanged { active: bool },
    TrackEnded(Device),
    Key(KeyStroke),
    Clipboard(ClipboardAction),
    ContextMenu { target: Option<String> },
}

/// What the host should do with an event after the listener ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Default,
    Prevent,
    /// Suppress the event and dispatch a primary click on the same target.
    ClickInstead,
}

/// Listeners run on the host's UI thread and must return immediately.
pub type Listener = Arc<dyn Fn(&BrowserEvent) -> Disposition + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EnvironmentError(pub String);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("Camera and Microphone access are mandatory to start the test: {0}")]
    Media(EnvironmentError),
    #[error("Fullscreen mode is mandatory to start the test: {0}")]
    Fullscreen(EnvironmentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Visibility,
    Fullscreen,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Visibility => "visibility",
            ViolationKind::Fullscreen => "fullscreen",
        }
    }
}

/// Why a monitored session was ended on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Violation(ViolationKind),
    DeviceFailure(Device),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Violation(kind) => write!(f, "violation: {}", kind.as_str()),
            Termination::DeviceFailure(device) => write!(f, "device failure: {device}"),
        }
    }
}

/// Host surface the supervisor drives. A browser shell implements this on
/// top of its media, fullscreen and DOM event APIs.
#[async_trait]
pub trait ProctoringEnvironment: Send + Sync + 'static {
    /// Resolves once the user granted camera and microphone capture.
    async fn request_media(&self) -> Result<(), EnvironmentError>;

    async fn request_fullscreen(&self) -> Result<(), EnvironmentError>;

    fn add_listener(&self, source: SignalSource, listener: Listener) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);

    /// Stops every captured media track.
    fn release_media(&self);

    fn navigate_away(&self);
}
