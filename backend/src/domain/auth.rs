//! Authentication primitives: login credentials and route access rules.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Shortest password accepted at login.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Path prefix guarded by the session check.
pub const PROTECTED_PREFIX: &str = "/dashboard";

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Domain error returned when login payload values are malformed.
///
/// Callers must not echo these back to clients; a malformed payload is
/// reported exactly like a wrong password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or not shaped like an address.
    InvalidEmail,
    /// Password was shorter than [`PASSWORD_MIN_LEN`] characters.
    PasswordTooShort { min: usize },
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `email` is trimmed and shaped like `local@domain.tld`.
/// - `password` holds at least [`PASSWORD_MIN_LEN`] characters and keeps
///   caller-provided whitespace.
///
/// # Examples
/// ```
/// use invoice_dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("user@nextmail.com", "123456").unwrap();
/// assert_eq!(creds.email(), "user@nextmail.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if !email_regex().is_match(email) {
            return Err(LoginValidationError::InvalidEmail);
        }
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(LoginValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }

        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look the user up.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of the session check for a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Let the request through.
    Allow,
    /// Protected path without a session.
    RedirectToLogin,
    /// Login page requested while already signed in.
    RedirectToDashboard,
}

/// Decide whether a request for `path` may proceed.
///
/// `/dashboard` and everything below it requires a session; the login page
/// bounces signed-in users back to the dashboard.
///
/// # Examples
/// ```
/// use invoice_dashboard::domain::auth::{route_access, RouteAccess};
///
/// assert_eq!(route_access("/dashboard/invoices", false), RouteAccess::RedirectToLogin);
/// assert_eq!(route_access("/login", true), RouteAccess::RedirectToDashboard);
/// assert_eq!(route_access("/", false), RouteAccess::Allow);
/// ```
#[must_use]
pub fn route_access(path: &str, logged_in: bool) -> RouteAccess {
    if is_within(path, PROTECTED_PREFIX) {
        if logged_in {
            RouteAccess::Allow
        } else {
            RouteAccess::RedirectToLogin
        }
    } else if logged_in && is_within(path, LOGIN_PATH) {
        RouteAccess::RedirectToDashboard
    } else {
        RouteAccess::Allow
    }
}

fn is_within(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
