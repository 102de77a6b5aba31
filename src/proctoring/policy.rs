//! Pure decisions applied to host events.

use super::{BrowserEvent, ClipboardAction, Disposition, KeyStroke, Termination, ViolationKind};

pub fn key_disposition(stroke: &KeyStroke) -> Disposition {
    let key = stroke.key.as_str();

    if key == "F12" {
        return Disposition::Prevent;
    }
    if stroke.ctrl && stroke.shift && key.eq_ignore_ascii_case("i") {
        return Disposition::Prevent;
    }
    if stroke.meta && stroke.alt && key == "i" {
        return Disposition::Prevent;
    }
    if (stroke.ctrl || stroke.meta) && matches!(key, "c" | "v" | "x") {
        return Disposition::Prevent;
    }

    Disposition::Default
}

pub fn clipboard_disposition(action: ClipboardAction) -> Disposition {
    match action {
        ClipboardAction::Copy | ClipboardAction::Paste | ClipboardAction::Cut => {
            Disposition::Prevent
        }
    }
}

/// Interception applied synchronously inside a listener.
pub fn disposition(event: &BrowserEvent) -> Disposition {
    match event {
        BrowserEvent::Key(stroke) => key_disposition(stroke),
        BrowserEvent::Clipboard(action) => clipboard_disposition(*action),
        BrowserEvent::ContextMenu { .. } => Disposition::ClickInstead,
        BrowserEvent::VisibilityChanged { .. }
        | BrowserEvent::FullscreenChanged { .. }
        | BrowserEvent::TrackEnded(_) => Disposition::Default,
    }
}

/// Returns the termination an event forces, if any.
pub fn termination_for(event: &BrowserEvent) -> Option<Termination> {
    match event {
        BrowserEvent::VisibilityChanged { hidden: true } => {
            Some(Termination::Violation(ViolationKind::Visibility))
        }
        BrowserEvent::FullscreenChanged { active: false } => {
            Some(Termination::Violation(ViolationKind::Fullscreen))
        }
        BrowserEvent::TrackEnded(device) => Some(Termination::DeviceFailure(*device)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proctoring::Device;

    #[test]
    fn devtools_shortcuts_are_blocked() {
        assert_eq!(key_disposition(&KeyStroke::new("F12")), Disposition::Prevent);
        assert_eq!(key_disposition(&KeyStroke::new("I").ctrl().shift()), Disposition::Prevent);
        assert_eq!(key_disposition(&KeyStroke::new("i").ctrl().shift()), Disposition::Prevent);
        assert_eq!(key_disposition(&KeyStroke::new("i").meta().alt()), Disposition::Prevent);
    }

    #[test]
    fn clipboard_shortcuts_are_blocked_for_ctrl_and_meta() {
        for key in ["c", "v", "x"] {
            assert_eq!(key_disposition(&KeyStroke::new(key).ctrl()), Disposition::Prevent);
            assert_eq!(key_disposition(&KeyStroke::new(key).meta()), Disposition::Prevent);
        }
    }

    #[test]
    fn ordinary_typing_passes_through() {
        assert_eq!(key_disposition(&KeyStroke::new("c")), Disposition::Default);
        assert_eq!(key_disposition(&KeyStroke::new("i").ctrl()), Disposition::Default);
        assert_eq!(key_disposition(&KeyStroke::new("a").ctrl()), Disposition::Default);
        assert_eq!(key_disposition(&KeyStroke::new("Enter")), Disposition::Default);
    }

    #[test]
    fn clipboard_events_and_context_menu_are_intercepted() {
        assert_eq!(
            disposition(&BrowserEvent::Clipboard(ClipboardAction::Paste)),
            Disposition::Prevent
        );
        assert_eq!(
            disposition(&BrowserEvent::ContextMenu { target: Some("option-b".into()) }),
            Disposition::ClickInstead
        );
    }

    #[test]
    fn only_leaving_the_exam_view_terminates() {
        assert_eq!(
            termination_for(&BrowserEvent::VisibilityChanged { hidden: true }),
            Some(Termination::Violation(ViolationKind::Visibility))
        );
        assert_eq!(termination_for(&BrowserEvent::VisibilityChanged { hidden: false }), None);
        assert_eq!(
            termination_for(&BrowserEvent::FullscreenChanged { active: false }),
            Some(Termination::Violation(ViolationKind::Fullscreen))
        );
        assert_eq!(termination_for(&BrowserEvent::FullscreenChanged { active: true }), None);
        assert_eq!(
            termination_for(&BrowserEvent::TrackEnded(Device::Microphone)),
            Some(Termination::DeviceFailure(Device::Microphone))
        );
        assert_eq!(termination_for(&BrowserEvent::Key(KeyStroke::new("F12"))), None);
    }
}
