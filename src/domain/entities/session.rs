use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Persisted proof of an admin login: an opaque token plus the time it
/// was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionMarker {
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl SessionMarker {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.issued_at)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        self.age(now) >= lifetime
    }

    pub fn expires_at(&self, lifetime: Duration) -> DateTime<Utc> {
        self.issued_at + lifetime
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn new(marker: &SessionMarker, lifetime: Duration) -> Self {
        SessionResponse {
            token: marker.token.clone(),
            token_type: "Bearer".to_string(),
            issued_at: marker.issued_at,
            expires_at: marker.expires_at(lifetime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_expires_at_exactly_its_lifetime() {
        let issued_at = Utc::now();
        let marker = SessionMarker { token: "t".into(), issued_at };
        let lifetime = Duration::hours(24);

        assert!(!marker.is_expired(issued_at + Duration::hours(23), lifetime));
        assert!(marker.is_expired(issued_at + Duration::hours(24), lifetime));
        assert_eq!(marker.expires_at(lifetime), issued_at + lifetime);
    }
}
