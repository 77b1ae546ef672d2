use std::sync::{Mutex, MutexGuard, PoisonError};

use restyle::{Notice, OutboundMessage, StylesPayload, UiBridge};

/// One call made on the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Shown { width: u32, height: u32 },
    Posted(OutboundMessage),
    Notified(Notice),
    Closed,
}

/// Records every UI call in order.
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UiEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, event: UiEvent) {
        self.lock().push(event);
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.lock().clone()
    }

    /// Drops the recorded history.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn shown(&self) -> Option<(u32, u32)> {
        self.lock().iter().find_map(|e| match e {
            UiEvent::Shown { width, height } => Some((*width, *height)),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Notified(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn payloads(&self) -> Vec<StylesPayload> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Posted(OutboundMessage::PostStyles(payload)) => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_payload(&self) -> Option<StylesPayload> {
        self.payloads().pop()
    }

    pub fn closed(&self) -> bool {
        self.lock().iter().any(|e| matches!(e, UiEvent::Closed))
    }
}

impl UiBridge for RecordingUi {
    fn show(&self, width: u32, height: u32) {
        self.record(UiEvent::Shown { width, height });
    }

    fn post(&self, message: OutboundMessage) {
        self.record(UiEvent::Posted(message));
    }

    fn notify(&self, notice: &Notice) {
        self.record(UiEvent::Notified(notice.clone()));
    }

    fn close(&self) {
        self.record(UiEvent::Closed);
    }
}
