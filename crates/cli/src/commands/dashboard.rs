use super::HubContext;
use anyhow::{anyhow, Result};
use clap::Args;
use domain::ConfigRepository;
use std::sync::Arc;
use tracing::info;
use ui::TUIApp;

/// Interactive terminal dashboard
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Cards per page in the endpoint monitor
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl DashboardCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let client = ctx.client()?;
        let store: Arc<dyn ConfigRepository> = ctx.store().clone();
        let page_size = self
            .page_size
            .filter(|size| *size > 0)
            .unwrap_or(ctx.settings.monitor.page_size);
        let refresh_interval = ctx.settings.refresh_interval();

        info!(page_size, ?refresh_interval, "Starting dashboard");

        // The UI loop blocks; keep the runtime's other workers free for requests
        tokio::task::block_in_place(move || {
            let mut app = TUIApp::new(client, store, page_size, refresh_interval)
                .map_err(|e| anyhow!("Failed to start dashboard: {e}"))?;
            app.run().map_err(|e| anyhow!("Dashboard error: {e}"))
        })
    }
}
