//! Premium subscription status with a short-lived local cache.
//!
//! Every accessor goes through [`PremiumService::premium_status`], which never
//! fails: transport and server errors degrade to a free, inactive status.

use crate::api::{ApiError, ChatApi};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumState {
    Active,
    #[default]
    #[serde(other)]
    Inactive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Free,
    Monthly,
    Lifetime,
    Admin,
    #[serde(other)]
    Other,
}

impl PlanType {
    /// Plans the user can change through the billing portal.
    pub fn is_manageable(self) -> bool {
        matches!(self, PlanType::Monthly | PlanType::Lifetime)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumStatus {
    #[serde(default)]
    pub premium_status: PremiumState,
    #[serde(default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub premium_activated_at: Option<String>,
    #[serde(default)]
    pub subscription_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PremiumStatus {
    pub fn free_with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.premium_status == PremiumState::Active
    }
}

/// `color` and `text_color` are CSS values, usable directly in an inline style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PremiumBadge {
    pub text: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub text_color: &'static str,
}

impl PremiumBadge {
    pub fn style(&self) -> String {
        format!("background: {}; color: {};", self.color, self.text_color)
    }
}

const MONTHLY_BADGE: PremiumBadge = PremiumBadge {
    text: "Premium",
    emoji: "⭐",
    color: "linear-gradient(90deg, #a855f7, #3b82f6)",
    text_color: "#ffffff",
};

const LIFETIME_BADGE: PremiumBadge = PremiumBadge {
    text: "Lifetime",
    emoji: "💎",
    color: "linear-gradient(90deg, #fbbf24, #f97316)",
    text_color: "#ffffff",
};

const ADMIN_BADGE: PremiumBadge = PremiumBadge {
    text: "Admin",
    emoji: "👑",
    color: "linear-gradient(90deg, #ef4444, #ec4899)",
    text_color: "#ffffff",
};

/// Badge for a plan; unknown or free plans fall back to the monthly badge.
pub fn badge_for_plan(plan: PlanType) -> PremiumBadge {
    match plan {
        PlanType::Lifetime => LIFETIME_BADGE,
        PlanType::Admin => ADMIN_BADGE,
        PlanType::Monthly | PlanType::Free | PlanType::Other => MONTHLY_BADGE,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionInfo {
    pub is_premium: bool,
    pub plan_type: PlanType,
    pub activated_at: Option<String>,
    pub source: Option<String>,
    pub can_manage: bool,
}

impl From<&PremiumStatus> for SubscriptionInfo {
    fn from(status: &PremiumStatus) -> Self {
        Self {
            is_premium: status.is_active(),
            plan_type: status.plan_type,
            activated_at: status.premium_activated_at.clone(),
            source: Some(
                status
                    .subscription_source
                    .clone()
                    .unwrap_or_else(|| "stripe".to_string()),
            ),
            can_manage: status.plan_type.is_manageable(),
        }
    }
}

struct CachedStatus {
    status: PremiumStatus,
    fetched_at: Instant,
}

pub struct PremiumService {
    api: Arc<dyn ChatApi>,
    cache_timeout: Duration,
    cache: Mutex<Option<CachedStatus>>,
}

impl PremiumService {
    pub fn new(api: Arc<dyn ChatApi>, cache_timeout: Duration) -> Self {
        Self {
            api,
            cache_timeout,
            cache: Mutex::new(None),
        }
    }

    /// Current status, served from cache while fresh.
    ///
    /// The cache lock is held across the fetch so concurrent stale callers share one request.
    pub async fn premium_status(&self) -> PremiumStatus {
        let mut cache = self.cache.lock().await;
        if let Some(entry) = cache.as_ref()
            && entry.fetched_at.elapsed() < self.cache_timeout
        {
            return entry.status.clone();
        }

        let fetched = match self.api.fetch_premium_status().await {
            Ok(response) if response.success => response.premium_status.ok_or_else(|| {
                ApiError::Rejected("Premium status missing from response".to_string())
            }),
            Ok(_) => Err(ApiError::Rejected(
                "Failed to fetch premium status".to_string(),
            )),
            Err(err) => Err(err),
        };

        match fetched {
            Ok(status) => {
                tracing::debug!(plan = ?status.plan_type, "premium status refreshed");
                *cache = Some(CachedStatus {
                    status: status.clone(),
                    fetched_at: Instant::now(),
                });
                status
            }
            Err(err) => {
                tracing::error!("Error fetching premium status: {err}");
                PremiumStatus::free_with_error(err.to_string())
            }
        }
    }

    pub async fn is_premium_user(&self) -> bool {
        self.premium_status().await.is_active()
    }

    pub async fn plan_type(&self) -> PlanType {
        self.premium_status().await.plan_type
    }

    pub async fn user_roles(&self) -> Vec<String> {
        self.premium_status().await.roles
    }

    /// `None` unless the subscription is active.
    pub async fn premium_badge(&self) -> Option<PremiumBadge> {
        let status = self.premium_status().await;
        status.is_active().then(|| badge_for_plan(status.plan_type))
    }

    pub async fn subscription_info(&self) -> SubscriptionInfo {
        SubscriptionInfo::from(&self.premium_status().await)
    }

    pub async fn clear_cache(&self) {
        *self.cache.lock().await = None;
    }
}
