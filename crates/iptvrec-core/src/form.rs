/// Single-line editable text entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
    placeholder: String,
    masked: bool,
}

const MASK_CHAR: char = '•';

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
            masked: false,
        }
    }

    /// A field whose contents render as mask characters.
    pub fn masked(placeholder: impl Into<String>) -> Self {
        Self {
            masked: true,
            ..Self::new(placeholder)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Byte offset of the cursor within [`value`](TextField::value).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text as it should appear on screen.
    pub fn display_text(&self) -> String {
        if self.masked {
            self.value.chars().map(|_| MASK_CHAR).collect()
        } else {
            self.value.clone()
        }
    }

    /// Text left of the cursor as displayed; used for cursor placement.
    pub fn display_prefix(&self) -> String {
        let prefix = &self.value[..self.cursor];
        if self.masked {
            prefix.chars().map(|_| MASK_CHAR).collect()
        } else {
            prefix.to_string()
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.value.len();
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Focusable widgets, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Username,
    Password,
    Url,
    Record,
    Clear,
    Exit,
}

impl Focus {
    pub const ORDER: [Focus; 6] = [
        Focus::Username,
        Focus::Password,
        Focus::Url,
        Focus::Record,
        Focus::Clear,
        Focus::Exit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }

    pub fn is_field(self) -> bool {
        matches!(self, Focus::Username | Focus::Password | Focus::Url)
    }
}

/// Snapshot of the three field values taken on Record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Submission {
    pub username: String,
    pub password: String,
    pub url: String,
}

/// Placeholder text for the three entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub username: String,
    pub password: String,
    pub url: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            username: "Username".into(),
            password: "Password".into(),
            url: "URL".into(),
        }
    }
}

/// The username / password / URL form.
#[derive(Debug, Clone)]
pub struct Form {
    pub username: TextField,
    pub password: TextField,
    pub url: TextField,
    focus: Focus,
}

impl Default for Form {
    fn default() -> Self {
        Self::new(Placeholders::default())
    }
}

impl Form {
    pub fn new(placeholders: Placeholders) -> Self {
        Self {
            username: TextField::new(placeholders.username),
            password: TextField::masked(placeholders.password),
            url: TextField::new(placeholders.url),
            focus: Focus::Username,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// The field under focus, if focus is on a field rather than a button.
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::Username => Some(&mut self.username),
            Focus::Password => Some(&mut self.password),
            Focus::Url => Some(&mut self.url),
            _ => None,
        }
    }

    pub fn submission(&self) -> Submission {
        Submission {
            username: self.username.value().to_string(),
            password: self.password.value().to_string(),
            url: self.url.value().to_string(),
        }
    }

    /// Empty all three fields. Focus is left where it is.
    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
        self.url.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_handle_multibyte() {
        let mut f = TextField::new("x");
        for c in "añb".chars() {
            f.insert_char(c);
        }
        assert_eq!(f.value(), "añb");
        f.cursor_left();
        f.backspace();
        assert_eq!(f.value(), "ab");
        assert_eq!(f.cursor(), 1);
    }

    #[test]
    fn cursor_moves_by_char() {
        let mut f = TextField::new("x");
        f.set_value("éé");
        f.cursor_left();
        assert_eq!(f.cursor(), 2);
        f.cursor_left();
        f.cursor_left();
        assert_eq!(f.cursor(), 0);
        f.cursor_right();
        assert_eq!(f.cursor(), 2);
        f.cursor_end();
        f.cursor_right();
        assert_eq!(f.cursor(), 4);
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut f = TextField::new("x");
        f.set_value("abc");
        f.cursor_home();
        f.delete();
        assert_eq!(f.value(), "bc");
        f.cursor_end();
        f.delete();
        assert_eq!(f.value(), "bc");
    }

    #[test]
    fn masked_field_hides_value() {
        let mut f = TextField::masked("Password");
        f.set_value("hunter2");
        assert_eq!(f.display_text(), "•••••••");
        assert_eq!(f.value(), "hunter2");
        f.cursor_left();
        assert_eq!(f.display_prefix().chars().count(), 6);
    }

    #[test]
    fn focus_wraps_both_directions() {
        assert_eq!(Focus::Exit.next(), Focus::Username);
        assert_eq!(Focus::Username.prev(), Focus::Exit);
        assert_eq!(Focus::Url.next(), Focus::Record);
    }

    #[test]
    fn only_fields_are_editable() {
        let mut form = Form::default();
        assert!(form.focused_field_mut().is_some());
        form.set_focus(Focus::Record);
        assert!(form.focused_field_mut().is_none());
        assert!(!Focus::Clear.is_field());
    }

    #[test]
    fn password_entry_is_masked_by_default() {
        let form = Form::default();
        assert!(form.password.is_masked());
        assert!(!form.username.is_masked());
        assert_eq!(form.url.placeholder(), "URL");
    }

    #[test]
    fn submission_snapshots_values() {
        let mut form = Form::default();
        form.username.set_value("alice");
        form.password.set_value("s3cret");
        form.url.set_value("http://example.test/live.m3u8");
        let sub = form.submission();
        assert_eq!(sub.username, "alice");
        assert_eq!(sub.password, "s3cret");
        assert_eq!(sub.url, "http://example.test/live.m3u8");
    }

    #[test]
    fn clear_empties_all_fields() {
        let mut form = Form::default();
        form.username.set_value("a");
        form.password.set_value("b");
        form.url.set_value("c");
        form.set_focus(Focus::Clear);
        form.clear();
        assert!(form.username.is_empty() && form.password.is_empty() && form.url.is_empty());
        assert_eq!(form.username.cursor(), 0);
        assert_eq!(form.focus(), Focus::Clear);
    }
}
