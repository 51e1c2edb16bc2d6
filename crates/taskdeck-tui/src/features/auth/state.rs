use crate::common::TextField;

pub const FALLBACK_ERROR: &str = "Something went wrong";
pub const ACCOUNT_CREATED: &str = "Account created! Please login.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    /// Fields shown in this mode, top to bottom.
    pub fn fields(self) -> &'static [AuthField] {
        match self {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Register => &[AuthField::FullName, AuthField::Email, AuthField::Password],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    FullName,
    Email,
    Password,
}

impl AuthField {
    pub fn label(self) -> &'static str {
        match self {
            AuthField::FullName => "Full Name",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
        }
    }
}

/// The single status slot under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMessage {
    Error(String),
    Notice(String),
}

impl AuthMessage {
    pub fn text(&self) -> &str {
        match self {
            AuthMessage::Error(text) | AuthMessage::Notice(text) => text,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub mode: AuthMode,
    pub submitting: bool,
    pub message: Option<AuthMessage>,
    pub email: TextField,
    pub password: TextField,
    pub full_name: TextField,
    pub focus: Option<AuthField>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            focus: Some(AuthField::Email),
            ..Self::default()
        }
    }

    /// Auth screen showing an error, e.g. after the session was rejected.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            message: Some(AuthMessage::Error(message.into())),
            ..Self::new()
        }
    }

    pub fn focused(&self) -> AuthField {
        self.focus
            .filter(|f| self.mode.fields().contains(f))
            .unwrap_or(AuthField::Email)
    }

    pub fn field(&self, field: AuthField) -> &TextField {
        match field {
            AuthField::FullName => &self.full_name,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: AuthField) -> &mut TextField {
        match field {
            AuthField::FullName => &mut self.full_name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    /// Moves focus by `delta` fields, wrapping around.
    pub fn move_focus(&mut self, delta: isize) {
        let fields = self.mode.fields();
        let current = fields
            .iter()
            .position(|f| *f == self.focused())
            .unwrap_or(0);
        let len = fields.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        self.focus = Some(fields[next]);
    }

    /// Switches between login and register. Drafts are kept.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.focus = Some(self.focused());
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    /// First required field left blank in the current mode.
    pub fn first_missing_field(&self) -> Option<AuthField> {
        self.mode
            .fields()
            .iter()
            .copied()
            .find(|f| self.field(*f).is_blank())
    }
}
