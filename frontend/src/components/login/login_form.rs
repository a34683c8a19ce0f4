//! Login/registration form state
//!
//! Holds both views' fields and notices and validates a submit before any
//! request is made.

use studyapp_shared::Credentials;

const MSG_SIGN_IN_BLANK: &str = "Tên đăng nhập và mật khẩu không được để trống.";
const MSG_REGISTER_BLANK: &str = "Vui lòng điền đầy đủ thông tin.";
const MSG_PASSWORD_MISMATCH: &str = "Mật khẩu và xác nhận mật khẩu không khớp.";
const MSG_REGISTERED: &str = "Đăng ký thành công! Vui lòng đăng nhập.";
pub const MSG_SIGN_IN_FAILED: &str = "Tên đăng nhập hoặc mật khẩu không đúng.";
pub const MSG_REGISTER_FAILED: &str = "Đăng ký thất bại.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    SignIn,
    Register,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub mode: FormMode,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn is_register(&self) -> bool {
        self.mode == FormMode::Register
    }

    /// Switches view and starts over with empty fields.
    pub fn toggle_mode(&mut self) {
        let mode = match self.mode {
            FormMode::SignIn => FormMode::Register,
            FormMode::Register => FormMode::SignIn,
        };
        *self = Self {
            mode,
            ..Self::default()
        };
    }

    /// Clears notices and checks the fields for the current view.
    pub fn begin_submit(&mut self) -> Result<Credentials, &'static str> {
        self.error = None;
        self.notice = None;

        let checked = self.validate();
        match &checked {
            Ok(_) => self.submitting = true,
            Err(msg) => self.error = Some(msg.to_string()),
        }
        checked
    }

    fn validate(&self) -> Result<Credentials, &'static str> {
        let blank = self.username.trim().is_empty() || self.password.trim().is_empty();
        match self.mode {
            FormMode::SignIn if blank => Err(MSG_SIGN_IN_BLANK),
            FormMode::Register if blank || self.confirm_password.trim().is_empty() => {
                Err(MSG_REGISTER_BLANK)
            }
            FormMode::Register if self.password != self.confirm_password => {
                Err(MSG_PASSWORD_MISMATCH)
            }
            _ => Ok(Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
            }),
        }
    }

    /// Back to sign-in with empty fields and a success notice.
    pub fn registered(&mut self) {
        *self = Self {
            notice: Some(MSG_REGISTERED.to_string()),
            ..Self::default()
        };
    }

    /// Shows `message`, or `fallback` when the backend gave none.
    pub fn failed(&mut self, message: Option<&str>, fallback: &str) {
        self.submitting = false;
        let text = message.filter(|m| !m.trim().is_empty()).unwrap_or(fallback);
        self.error = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(mode: FormMode) -> LoginForm {
        LoginForm {
            mode,
            username: "lan".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let mut form = LoginForm {
            username: "  ".to_string(),
            password: "x".to_string(),
            ..LoginForm::default()
        };
        assert_eq!(form.begin_submit(), Err(MSG_SIGN_IN_BLANK));
        assert_eq!(form.error.as_deref(), Some(MSG_SIGN_IN_BLANK));
        assert!(!form.submitting);
    }

    #[test]
    fn test_sign_in_ignores_confirmation() {
        let mut form = filled(FormMode::SignIn);
        form.confirm_password.clear();
        let creds = form.begin_submit().unwrap();
        assert_eq!(creds.username, "lan");
        assert!(form.submitting);
    }

    #[test]
    fn test_register_checks_confirmation() {
        let mut form = filled(FormMode::Register);
        form.confirm_password = "other".to_string();
        assert_eq!(form.begin_submit(), Err(MSG_PASSWORD_MISMATCH));

        form.confirm_password.clear();
        assert_eq!(form.begin_submit(), Err(MSG_REGISTER_BLANK));
    }

    #[test]
    fn test_registered_switches_back_and_clears() {
        let mut form = filled(FormMode::Register);
        form.begin_submit().unwrap();
        form.registered();

        assert_eq!(form.mode, FormMode::SignIn);
        assert!(form.username.is_empty() && form.password.is_empty());
        assert_eq!(form.notice.as_deref(), Some(MSG_REGISTERED));
        assert!(!form.submitting);
    }

    #[test]
    fn test_toggle_clears_fields_and_notices() {
        let mut form = filled(FormMode::SignIn);
        form.error = Some("x".to_string());
        form.toggle_mode();
        assert_eq!(
            form,
            LoginForm {
                mode: FormMode::Register,
                ..LoginForm::default()
            }
        );
    }

    #[test]
    fn test_failure_prefers_backend_message() {
        let mut form = filled(FormMode::SignIn);
        form.failed(Some("Tài khoản bị khóa"), MSG_SIGN_IN_FAILED);
        assert_eq!(form.error.as_deref(), Some("Tài khoản bị khóa"));

        form.failed(None, MSG_SIGN_IN_FAILED);
        assert_eq!(form.error.as_deref(), Some(MSG_SIGN_IN_FAILED));
    }
}
