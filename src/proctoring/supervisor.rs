use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};

use super::{
    policy, AcquisitionError, BrowserEvent, Disposition, Listener, ListenerId,
    ProctoringEnvironment, SignalSource, Termination,
};

const WATCHED: [SignalSource; 4] = [
    SignalSource::Visibility,
    SignalSource::Fullscreen,
    SignalSource::CameraTrack,
    SignalSource::MicrophoneTrack,
];

const INTERCEPTED: [SignalSource; 3] =
    [SignalSource::Keyboard, SignalSource::Clipboard, SignalSource::ContextMenu];

pub struct Proctor<E> {
    env: Arc<E>,
}

impl<E: ProctoringEnvironment> Proctor<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }

    /// Requests media capture, then fullscreen. Both are mandatory; a
    /// fullscreen refusal releases the media that was already granted.
    pub async fn acquire(self) -> Result<ReadyGate<E>, AcquisitionError> {
        if let Err(err) = self.env.request_media().await {
            tracing::warn!(error = %err, "Media capture refused");
            return Err(AcquisitionError::Media(err));
        }

        if let Err(err) = self.env.request_fullscreen().await {
            tracing::warn!(error = %err, "Fullscreen refused");
            self.env.release_media();
            return Err(AcquisitionError::Fullscreen(err));
        }

        Ok(ReadyGate { env: self.env })
    }
}

/// Proof that every device and fullscreen were granted.
pub struct ReadyGate<E> {
    env: Arc<E>,
}

impl<E: ProctoringEnvironment> ReadyGate<E> {
    /// Runs the begin-session call. It can only be reached through a gate.
    pub async fn begin_session<F, Fut, T>(&self, begin: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        begin().await
    }

    /// Registers every listener and starts the monitoring task. Must be
    /// called from within a tokio runtime.
    pub fn monitor(self) -> MonitorHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let mut subscriptions = Vec::with_capacity(WATCHED.len() + INTERCEPTED.len());
        for source in WATCHED {
            let events_tx = events_tx.clone();
            let listener: Listener = Arc::new(move |event: &BrowserEvent| {
                let _ = events_tx.send(event.clone());
                Disposition::Default
            });
            subscriptions.push(Subscription::register(self.env.clone(), source, listener));
        }
        for source in INTERCEPTED {
            let listener: Listener = Arc::new(policy::disposition);
            subscriptions.push(Subscription::register(self.env.clone(), source, listener));
        }
        drop(events_tx);

        let task = tokio::spawn(run_monitor(self.env, subscriptions, events_rx, cancel_rx));

        MonitorHandle { cancel: cancel_tx, task }
    }
}

/// A registered listener. Dropping it deregisters the listener.
pub struct Subscription<E: ProctoringEnvironment> {
    env: Arc<E>,
    id: ListenerId,
}

impl<E: ProctoringEnvironment> Subscription<E> {
    pub fn register(env: Arc<E>, source: SignalSource, listener: Listener) -> Self {
        let id = env.add_listener(source, listener);
        Self { env, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<E: ProctoringEnvironment> Drop for Subscription<E> {
    fn drop(&mut self) {
        self.env.remove_listener(self.id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// Torn down by the owner (submit or navigation).
    Closed,
    Terminated(Termination),
}

/// Owner side of a running monitor. Dropping the handle cancels monitoring.
pub struct MonitorHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<MonitorOutcome>,
}

impl MonitorHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until a violation or device failure ends the session.
    pub async fn terminated(self) -> Result<MonitorOutcome, JoinError> {
        let MonitorHandle { cancel, task } = self;
        let outcome = task.await;
        drop(cancel);
        outcome
    }

    /// Tears the monitor down. Returns the termination instead if one
    /// already happened.
    pub async fn close(self) -> Result<MonitorOutcome, JoinError> {
        let _ = self.cancel.send(true);
        self.task.await
    }
}

async fn run_monitor<E: ProctoringEnvironment>(
    env: Arc<E>,
    subscriptions: Vec<Subscription<E>>,
    mut events: mpsc::UnboundedReceiver<BrowserEvent>,
    mut cancel: watch::Receiver<bool>,
) -> MonitorOutcome {
    loop {
        tokio::select! {
            biased;
            _ = cancel.changed() => {
                drop(subscriptions);
                env.release_media();
                tracing::debug!("Proctoring monitor closed");
                return MonitorOutcome::Closed;
            }
            event = events.recv() => {
                let Some(event) = event else {
                    drop(subscriptions);
                    env.release_media();
                    return MonitorOutcome::Closed;
                };
                if let Some(termination) = policy::termination_for(&event) {
                    drop(subscriptions);
                    env.release_media();
                    env.navigate_away();
                    tracing::warn!(reason = %termination, "Exam session terminated");
                    return MonitorOutcome::Terminated(termination);
                }
            }
        }
    }
}
