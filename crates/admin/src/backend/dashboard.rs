//! Dashboard aggregate.

use shopdesk_core::DashboardSnapshot;
use tracing::instrument;

use super::{BackendClient, BackendError, routes};

impl BackendClient {
    /// Fetch record counts and the latest registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn get_dashboard_snapshot(&self) -> Result<DashboardSnapshot, BackendError> {
        let mut envelope = self.get(routes::DASHBOARD).await?;
        envelope.take("dashData")
    }
}
