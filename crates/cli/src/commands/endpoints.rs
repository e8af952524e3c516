use super::{request_failed, HubContext};
use crate::util;
use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use domain::{DomainError, EndpointStatus, MonitorView, MonitoredEndpoint, StatusFilter, TeamFilter};

#[derive(Debug, Args)]
pub struct EndpointsCommand {
    #[command(subcommand)]
    pub command: EndpointsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum EndpointsSubcommand {
    /// Monitored endpoints with status summary, filters and paging
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on name or URL
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Exact team name, or "all"
        #[arg(long, short = 't', default_value = "all")]
        team: TeamFilter,

        /// up, warning, down or all
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,

        /// Print the filtered records as JSON, unpaged
        #[arg(long)]
        json: bool,
    },

    /// Details of one endpoint
    Show { id: String },
}

impl EndpointsCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let endpoints = fetch(ctx).await?;
        let mut view = MonitorView::new(ctx.settings.monitor.page_size).with_endpoints(endpoints);

        match &self.command {
            EndpointsSubcommand::List {
                search,
                team,
                status,
                page,
                json,
            } => {
                view.set_search(search.as_str());
                view.set_team(team.clone());
                view.set_status(*status);
                view.set_page(*page);

                if *json {
                    return util::print_json(&view.filtered());
                }
                print_list(&view);
                Ok(())
            }
            EndpointsSubcommand::Show { id } => match view.find(id) {
                Some(endpoint) => {
                    print_details(endpoint);
                    Ok(())
                }
                None => Err(DomainError::EndpointNotFound(id.clone()).into()),
            },
        }
    }
}

async fn fetch(ctx: &HubContext) -> Result<Vec<MonitoredEndpoint>> {
    let client = ctx.client()?;
    let spinner = util::spinner("Loading endpoints...");
    let result = client.fetch_endpoints().await;
    spinner.finish_and_clear();
    result.map_err(request_failed)
}

fn status_badge(status: EndpointStatus) -> console::StyledObject<String> {
    let text = format!("● {}", status.label());
    match status {
        EndpointStatus::Up => style(text).green(),
        EndpointStatus::Warning => style(text).yellow(),
        EndpointStatus::Down => style(text).red(),
    }
}

fn print_list(view: &MonitorView) {
    let summary = view.summary();
    println!(
        "{}  {}  {}",
        style(format!("● Healthy {}", summary.healthy)).green(),
        style(format!("● Warning {}", summary.warning)).yellow(),
        style(format!("● Down {}", summary.down)).red(),
    );
    println!(
        "{} {} | {}",
        style("Filters:").dim(),
        view.filter().team,
        view.filter().status
    );
    println!();

    let items = view.page_items();
    if items.is_empty() {
        println!("No endpoints match the current filters");
        return;
    }

    for endpoint in items {
        println!(
            "{:<12} {} {}",
            endpoint.id,
            style(&endpoint.name).bold(),
            status_badge(endpoint.status)
        );
        println!(
            "             {} | {} ms | {} | {}",
            endpoint.url, endpoint.response_time_ms, endpoint.last_check, endpoint.team
        );
    }

    println!();
    println!(
        "Page {} of {} ({} endpoints)",
        view.current_page(),
        view.total_pages().max(1),
        view.filtered().len()
    );
}

fn print_details(endpoint: &MonitoredEndpoint) {
    util::heading(&endpoint.name);
    println!("  id:            {}", endpoint.id);
    println!("  url:           {}", endpoint.url);
    println!("  status:        {}", status_badge(endpoint.status));
    println!("  response time: {} ms", endpoint.response_time_ms);
    println!("  last check:    {}", endpoint.last_check);
    println!("  team:          {}", endpoint.team);
}
