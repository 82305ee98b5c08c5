use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::option_fields::OptionField;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyGrowth {
    pub projects: i64,
    pub blogs: i64,
    pub visits: i64,
    pub certificates: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSnapshot {
    pub site_visits: u64,
    pub online_users: u64,
    pub monthly_growth: MonthlyGrowth,
}

/// Admin edit of the analytics figures.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct UpdateAnalyticsRequest {
    pub site_visits: OptionField<u64>,
    pub online_users: OptionField<u64>,
    pub monthly_growth: OptionField<MonthlyGrowth>,
}

impl UpdateAnalyticsRequest {
    pub fn apply(self, analytics: &mut AnalyticsSnapshot) {
        self.site_visits.apply_to(&mut analytics.site_visits);
        self.online_users.apply_to(&mut analytics.online_users);
        self.monthly_growth.apply_to(&mut analytics.monthly_growth);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PresenceUpdate {
    pub session_id: Uuid,
    pub online_users: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageLoadResponse {
    pub session_id: Uuid,
    pub site_visits: u64,
    pub online_users: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}
