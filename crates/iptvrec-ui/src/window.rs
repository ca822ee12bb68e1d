use ratatui::Frame;

use iptvrec_core::actions::Action;
use iptvrec_core::form::{Focus, Form};
use iptvrec_core::transcript::Transcript;

use crate::form::{render_button, render_field};
use crate::header::{render_header, HeaderView};
use crate::layout::window_layout;
use crate::output::render_output;

/// Horizontal inset of the form column.
pub const FORM_MARGIN: u16 = 1;

/// Everything the window draws in one frame.
pub struct WindowView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub clock_label: &'a str,
    pub clock_running: bool,
    pub status_line: &'a str,
    pub form: &'a Form,
    pub transcript: &'a Transcript,
}

pub fn render_window(f: &mut Frame, view: WindowView<'_>) {
    let rects = window_layout(f.area(), FORM_MARGIN);
    let focus = view.form.focus();

    render_header(
        f,
        rects.header,
        HeaderView {
            title: view.title,
            subtitle: view.subtitle,
            clock_label: view.clock_label,
            clock_running: view.clock_running,
        },
    );

    render_field(f, rects.username, &view.form.username, focus == Focus::Username);
    render_field(f, rects.password, &view.form.password, focus == Focus::Password);
    render_field(f, rects.url, &view.form.url, focus == Focus::Url);

    render_button(f, rects.record, Action::Submit.label(), focus == Focus::Record);
    render_button(f, rects.clear, Action::Clear.label(), focus == Focus::Clear);
    if rects.output.height >= 3 {
        render_output(f, rects.output, view.transcript, view.status_line);
    }
    render_button(f, rects.exit, Action::Exit.label(), focus == Focus::Exit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(width: u16, height: u16, form: &Form, transcript: &Transcript, clock: &str) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_window(
                    f,
                    WindowView {
                        title: "IPTV Stream download",
                        subtitle: "Time",
                        clock_label: clock,
                        clock_running: true,
                        status_line: "clock running",
                        form,
                        transcript,
                    },
                )
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn text_of(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol().to_string()).collect()
    }

    #[test]
    fn shows_title_clock_and_buttons() {
        let form = Form::default();
        let transcript = Transcript::default();
        let text = text_of(&draw(60, 30, &form, &transcript, "12:34:56"));
        assert!(text.contains("IPTV Stream download"));
        assert!(text.contains("12:34:56"));
        assert!(text.contains("Record"));
        assert!(text.contains("Clear"));
        assert!(text.contains("Exit"));
    }

    #[test]
    fn empty_fields_show_placeholders() {
        let form = Form::default();
        let transcript = Transcript::default();
        let text = text_of(&draw(60, 30, &form, &transcript, "00:00:00"));
        assert!(text.contains("Username"));
        assert!(text.contains("Password"));
        assert!(text.contains("URL"));
    }

    #[test]
    fn password_is_never_drawn_in_clear() {
        let mut form = Form::default();
        form.username.set_value("alice");
        form.password.set_value("hunter2");
        let transcript = Transcript::default();
        let text = text_of(&draw(60, 30, &form, &transcript, "00:00:00"));
        assert!(text.contains("alice"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("•••••••"));
    }

    #[test]
    fn transcript_lines_appear_in_output_pane() {
        let form = Form::default();
        let mut transcript = Transcript::default();
        transcript.println("Input fields cleared.");
        let text = text_of(&draw(60, 30, &form, &transcript, "Stopped"));
        assert!(text.contains("Input fields cleared."));
        assert!(text.contains("OUTPUT"));
        assert!(text.contains("Stopped"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let form = Form::default();
        let transcript = Transcript::default();
        draw(8, 4, &form, &transcript, "Timer Finished");
    }
}
