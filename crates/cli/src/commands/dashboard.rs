//! Dashboard screen.

use std::io::Write;

use shopdesk_admin::Console;

use super::{CliError, require_login};
use crate::render;

pub async fn show(console: &mut Console, out: &mut impl Write) -> Result<(), CliError> {
    require_login(console)?;
    console.load_dashboard().await?;
    if let Some(snapshot) = console.state().dashboard() {
        render::dashboard(out, snapshot)?;
    }
    Ok(())
}
