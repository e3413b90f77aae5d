//! Dashboard screen.

use super::{Console, ConsoleError};
use crate::state::Collection;

impl Console {
    /// Fetch the dashboard counts and latest users.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the fetch fails.
    pub async fn load_dashboard(&mut self) -> Result<(), ConsoleError> {
        self.ensure_authenticated()?;
        let ticket = self.state.begin_fetch(Collection::Dashboard);
        match self.client.get_dashboard_snapshot().await {
            Ok(snapshot) => {
                self.state.apply_dashboard(ticket, snapshot);
                self.succeed("Dashboard updated");
                Ok(())
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }
}
