use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{AUTH_TIME_KEY, AUTH_TOKEN_KEY, CREDENTIALS_KEY},
    domain::password::validate_new_password,
    entities::{
        credentials::{ChangePasswordRequest, Credentials, ForgotPasswordRequest, LoginRequest, MessageResponse},
        session::{SessionMarker, SessionResponse},
    },
    errors::AuthError,
    repositories::{
        relay::{MessageRelay, OutboundMessage},
        storage::{JsonStorage, StorageRepository},
    },
    utils::{clock::Clock, email::is_loose_email},
};

const RESET_LINK_SENT: &str = "A reset link has been sent to your email (simulated).";

/// Single-admin credential check plus the persisted session marker.
pub struct AuthHandler {
    storage: Arc<dyn StorageRepository>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn MessageRelay>,
    session_duration: Duration,
}

impl AuthHandler {
    pub fn new(
        storage: Arc<dyn StorageRepository>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn MessageRelay>,
        session_duration: Duration,
    ) -> Self {
        AuthHandler {
            storage,
            clock,
            notifier,
            session_duration,
        }
    }

    pub fn session_duration(&self) -> Duration {
        self.session_duration
    }

    /// The stored credential record, or the factory default when none was saved.
    pub fn credentials(&self) -> Result<Credentials, AuthError> {
        Ok(self.storage.load_json(CREDENTIALS_KEY)?.unwrap_or_default())
    }

    /// Checks the submitted pair against the credential record and, on a
    /// match, persists a fresh session marker.
    pub fn login(&self, request: LoginRequest) -> Result<SessionResponse, AuthError> {
        request.validate()?;

        let credentials = self.credentials()?;
        if !credentials.matches(&request.username, &request.password) {
            tracing::warn!("Rejected admin login attempt");
            return Err(AuthError::WrongCredentials);
        }

        let marker = SessionMarker {
            token: Uuid::new_v4().simple().to_string(),
            issued_at: self.clock.now(),
        };
        self.storage.save_json(AUTH_TOKEN_KEY, &marker.token)?;
        self.storage.save_json(AUTH_TIME_KEY, &marker.issued_at.timestamp_millis())?;

        tracing::info!("Admin logged in successfully");
        Ok(SessionResponse::new(&marker, self.session_duration))
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.clear_session()?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// The live session marker, if any. An expired marker is cleared and
    /// reported as absent.
    pub fn current_session(&self) -> Result<Option<SessionMarker>, AuthError> {
        match self.load_marker()? {
            Some(marker) if marker.is_expired(self.clock.now(), self.session_duration) => {
                tracing::info!("Admin session expired");
                self.clear_session()?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Resolves a bearer token to the live session.
    pub fn verify_session(&self, token: &str) -> Result<SessionMarker, AuthError> {
        let marker = self.load_marker()?.ok_or(AuthError::InvalidSession)?;

        if marker.is_expired(self.clock.now(), self.session_duration) {
            self.clear_session()?;
            return Err(AuthError::SessionExpired);
        }
        if marker.token != token {
            return Err(AuthError::InvalidSession);
        }
        Ok(marker)
    }

    /// Replaces the password, keeping the username. Callers must hold a
    /// verified session.
    pub fn change_password(&self, _session: &SessionMarker, request: ChangePasswordRequest) -> Result<(), AuthError> {
        let credentials = self.credentials()?;

        if request.current_password != credentials.password {
            return Err(AuthError::IncorrectCurrentPassword);
        }
        validate_new_password(&request.new_password, &request.confirm_password)?;

        let updated = Credentials {
            username: credentials.username,
            password: request.new_password,
        };
        self.storage.save_json(CREDENTIALS_KEY, &updated)?;

        tracing::info!("Admin password changed");
        Ok(())
    }

    /// Accepts any well-formed address and reports success. Nothing is
    /// recovered; the notice goes through the simulated relay.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> Result<MessageResponse, AuthError> {
        let email = request.email.trim();
        if !is_loose_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        let notice = OutboundMessage {
            service_id: self.notifier.name().to_string(),
            template_id: "password_reset".to_string(),
            template_params: BTreeMap::from([("email".to_string(), email.to_string())]),
        };
        self.notifier.send(&notice).await?;

        Ok(MessageResponse::new(RESET_LINK_SENT))
    }

    fn load_marker(&self) -> Result<Option<SessionMarker>, AuthError> {
        let token: Option<String> = self.storage.load_json(AUTH_TOKEN_KEY)?;
        let issued_ms: Option<i64> = self.storage.load_json(AUTH_TIME_KEY)?;

        let marker = match (token, issued_ms) {
            (Some(token), Some(ms)) => DateTime::<Utc>::from_timestamp_millis(ms)
                .map(|issued_at| SessionMarker { token, issued_at }),
            _ => None,
        };
        Ok(marker)
    }

    fn clear_session(&self) -> Result<(), AuthError> {
        self.storage.remove_item(AUTH_TOKEN_KEY)?;
        self.storage.remove_item(AUTH_TIME_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::RelayError,
        repositories::relay::{MockMessageRelay, RelayReceipt},
        storage::memory_store::MemoryStore,
        utils::clock::ManualClock,
    };
    use chrono::TimeZone;

    struct Fixture {
        clock: Arc<ManualClock>,
        storage: Arc<MemoryStore>,
        auth: AuthHandler,
    }

    fn fixture_with(relay: MockMessageRelay) -> Fixture {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()));
        let storage = Arc::new(MemoryStore::new());
        let auth = AuthHandler::new(storage.clone(), clock.clone(), Arc::new(relay), Duration::hours(24));
        Fixture { clock, storage, auth }
    }

    fn fixture() -> Fixture {
        let mut relay = MockMessageRelay::new();
        relay.expect_name().return_const("simulated");
        fixture_with(relay)
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest { username: username.into(), password: password.into() }
    }

    fn change(current: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: current.into(),
            new_password: new.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn default_credentials_log_in_and_wrong_password_does_not() {
        let f = fixture();

        let err = f.auth.login(login("admin", "wrongpass")).unwrap_err();
        assert_eq!(err, AuthError::WrongCredentials);
        assert_eq!(err.to_string(), "Invalid username or password.");
        assert!(f.auth.current_session().unwrap().is_none());

        let session = f.auth.login(login("admin", "admin123")).unwrap();
        let marker = f.auth.current_session().unwrap().unwrap();
        assert_eq!(marker.token, session.token);
        assert_eq!(session.expires_at, marker.issued_at + Duration::hours(24));
    }

    #[test]
    fn empty_fields_report_the_login_failure_message() {
        let f = fixture();

        let err = f.auth.login(login("", "")).unwrap_err();
        assert_eq!(err, AuthError::WrongCredentials);
        assert_eq!(err.to_string(), "Invalid username or password.");
    }

    #[test]
    fn credentials_are_case_sensitive() {
        let f = fixture();
        assert!(f.auth.login(login("Admin", "admin123")).is_err());
    }

    #[test]
    fn each_login_issues_a_fresh_marker() {
        let f = fixture();
        let first = f.auth.login(login("admin", "admin123")).unwrap();
        let second = f.auth.login(login("admin", "admin123")).unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(f.auth.verify_session(&first.token).unwrap_err(), AuthError::InvalidSession);
        assert!(f.auth.verify_session(&second.token).is_ok());
    }

    #[test]
    fn markers_expire_after_a_day_and_are_cleared() {
        let f = fixture();
        let session = f.auth.login(login("admin", "admin123")).unwrap();

        f.clock.advance(Duration::hours(23));
        assert!(f.auth.verify_session(&session.token).is_ok());

        f.clock.advance(Duration::hours(1));
        assert_eq!(f.auth.verify_session(&session.token).unwrap_err(), AuthError::SessionExpired);
        assert!(f.storage.get_item(AUTH_TOKEN_KEY).unwrap().is_none());
        assert!(f.auth.current_session().unwrap().is_none());
    }

    #[test]
    fn logout_clears_the_marker() {
        let f = fixture();
        let session = f.auth.login(login("admin", "admin123")).unwrap();

        f.auth.logout().unwrap();

        assert_eq!(f.auth.verify_session(&session.token).unwrap_err(), AuthError::InvalidSession);
    }

    #[test]
    fn change_password_enforces_each_rule() {
        let f = fixture();
        f.auth.login(login("admin", "admin123")).unwrap();
        let marker = f.auth.current_session().unwrap().unwrap();

        assert_eq!(
            f.auth.change_password(&marker, change("nope", "newpass1", "newpass1")),
            Err(AuthError::IncorrectCurrentPassword)
        );
        assert_eq!(
            f.auth.change_password(&marker, change("admin123", "ab", "ab")),
            Err(AuthError::PasswordTooShort(6))
        );
        assert_eq!(
            f.auth.change_password(&marker, change("admin123", "newpass1", "newpass2")),
            Err(AuthError::PasswordMismatch)
        );

        f.auth.change_password(&marker, change("admin123", "newpass1", "newpass1")).unwrap();

        assert_eq!(f.auth.credentials().unwrap().username, "admin");
        assert!(f.auth.login(login("admin", "admin123")).is_err());
        assert!(f.auth.login(login("admin", "newpass1")).is_ok());
    }

    #[tokio::test]
    async fn forgot_password_validates_email_then_reports_success() {
        let mut relay = MockMessageRelay::new();
        relay.expect_name().return_const("simulated");
        relay
            .expect_send()
            .withf(|message| message.template_params["email"] == "owner@site.dev")
            .times(1)
            .returning(|_| Ok(RelayReceipt::ok()));
        let f = fixture_with(relay);

        let err = f.auth.forgot_password(ForgotPasswordRequest { email: "owner".into() }).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address.");

        let response = f.auth
            .forgot_password(ForgotPasswordRequest { email: "owner@site.dev".into() })
            .await
            .unwrap();
        assert_eq!(response.message, RESET_LINK_SENT);
    }

    #[tokio::test]
    async fn relay_failures_surface_as_notification_errors() {
        let mut relay = MockMessageRelay::new();
        relay.expect_name().return_const("simulated");
        relay
            .expect_send()
            .returning(|_| Err(RelayError::Transport("offline".into())));
        let f = fixture_with(relay);

        let err = f.auth.forgot_password(ForgotPasswordRequest { email: "a@b.co".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Notification(_)));
    }
}
