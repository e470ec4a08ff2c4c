use chrono::{DateTime, Utc};

pub const DEFAULT_NAMESPACE: &str = "tawsilet";

/// Derives the channel name that ties a call's initiation push to every
/// later action push for the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelNameGenerator {
    namespace: String,
}

impl Default for ChannelNameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl ChannelNameGenerator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `<namespace>_voip_<orderId>_<driverId>_<callerId>_<epochMillis>`.
    ///
    /// Names are only as unique as the millisecond clock: two calls with
    /// the same ids inside one millisecond collide. Empty ids leave an
    /// empty segment.
    pub fn generate(&self, order_id: &str, driver_id: &str, caller_id: &str) -> String {
        self.generate_at(order_id, driver_id, caller_id, Utc::now())
    }

    pub fn generate_at(
        &self,
        order_id: &str,
        driver_id: &str,
        caller_id: &str,
        timestamp: DateTime<Utc>,
    ) -> String {
        format!(
            "{}_voip_{}_{}_{}_{}",
            self.namespace,
            order_id,
            driver_id,
            caller_id,
            timestamp.timestamp_millis()
        )
    }
}
