use crate::form::{Focus, Submission};

/// Confirmation line written by the Clear action.
pub const CLEARED_MESSAGE: &str = "Input fields cleared.";

/// The three form buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    Clear,
    Exit,
}

impl Action {
    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Action::Submit => "Record",
            Action::Clear => "Clear",
            Action::Exit => "Exit",
        }
    }

    /// The action behind a focused button, if focus is on one.
    pub fn for_focus(focus: Focus) -> Option<Self> {
        match focus {
            Focus::Record => Some(Action::Submit),
            Focus::Clear => Some(Action::Clear),
            Focus::Exit => Some(Action::Exit),
            _ => None,
        }
    }
}

/// Capabilities a host wires to the form buttons.
///
/// The event source (key bindings, a test harness) only ever talks to this
/// trait through [`dispatch`].
pub trait ActionHandler {
    fn on_submit(&mut self);
    fn on_clear(&mut self);
    fn on_exit(&mut self);
}

pub fn dispatch<H: ActionHandler + ?Sized>(handler: &mut H, action: Action) {
    tracing::debug!(?action, "dispatching action");
    match action {
        Action::Submit => handler.on_submit(),
        Action::Clear => handler.on_clear(),
        Action::Exit => handler.on_exit(),
    }
}

/// Console lines written by the Record action.
pub fn record_lines(submission: &Submission) -> Vec<String> {
    vec![
        "Submit Clicked!".to_string(),
        format!("  Username: {}", submission.username),
        format!("  Password: {}", submission.password),
        format!("  Other Info: {}", submission.url),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls(Vec<&'static str>);

    impl ActionHandler for Calls {
        fn on_submit(&mut self) {
            self.0.push("submit");
        }
        fn on_clear(&mut self) {
            self.0.push("clear");
        }
        fn on_exit(&mut self) {
            self.0.push("exit");
        }
    }

    #[test]
    fn dispatch_routes_each_action() {
        let mut calls = Calls::default();
        dispatch(&mut calls, Action::Clear);
        dispatch(&mut calls, Action::Submit);
        dispatch(&mut calls, Action::Exit);
        assert_eq!(calls.0, vec!["clear", "submit", "exit"]);
    }

    #[test]
    fn buttons_map_to_actions() {
        assert_eq!(Action::for_focus(Focus::Record), Some(Action::Submit));
        assert_eq!(Action::for_focus(Focus::Clear), Some(Action::Clear));
        assert_eq!(Action::for_focus(Focus::Exit), Some(Action::Exit));
        assert_eq!(Action::for_focus(Focus::Url), None);
    }

    #[test]
    fn record_lines_echo_fields() {
        let sub = Submission {
            username: "alice".into(),
            password: "pw".into(),
            url: "http://example.test".into(),
        };
        assert_eq!(
            record_lines(&sub),
            vec![
                "Submit Clicked!",
                "  Username: alice",
                "  Password: pw",
                "  Other Info: http://example.test",
            ]
        );
    }

    #[test]
    fn record_lines_with_empty_fields() {
        let lines = record_lines(&Submission::default());
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "  Username: ");
    }
}
