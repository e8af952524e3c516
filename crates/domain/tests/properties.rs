//! Property and scenario tests for the pure hub logic

use domain::{
    build_prompt, paginate, prompt_spec, total_pages, ConfigField, EndpointConfig, EndpointFilter,
    EndpointStatus, JiraStory, MonitorView, MonitoredEndpoint, PartialEndpointConfig, StatusFilter,
    TeamFilter, CARDS_PER_PAGE, TOOLS,
};
use proptest::prelude::*;

const TEAMS: [&str; 10] = [
    "Payments", "Identity", "Search", "Checkout", "Catalog", "Mobile", "Platform", "Data",
    "Growth", "Support",
];

fn status_strategy() -> impl Strategy<Value = EndpointStatus> {
    prop_oneof![
        Just(EndpointStatus::Up),
        Just(EndpointStatus::Warning),
        Just(EndpointStatus::Down),
    ]
}

fn endpoints_strategy() -> impl Strategy<Value = Vec<MonitoredEndpoint>> {
    proptest::collection::vec(
        ("[a-zA-Z ]{0,10}", "[a-z]{1,6}", 0usize..TEAMS.len(), status_strategy()),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, host, team, status))| MonitoredEndpoint {
                id: format!("ep-{i}"),
                name,
                url: format!("https://{host}.example.com"),
                status,
                response_time_ms: 50,
                last_check: "now".to_string(),
                team: TEAMS[team].to_string(),
            })
            .collect()
    })
}

fn filter_strategy() -> impl Strategy<Value = EndpointFilter> {
    (
        "[a-zA-Z ]{0,3}",
        proptest::option::of(0usize..TEAMS.len()),
        proptest::option::of(status_strategy()),
    )
        .prop_map(|(search, team, status)| EndpointFilter {
            search,
            team: team
                .map(|t| TeamFilter::Team(TEAMS[t].to_string()))
                .unwrap_or(TeamFilter::All),
            status: status.map(StatusFilter::Only).unwrap_or(StatusFilter::All),
        })
}

proptest! {
    #[test]
    fn resolved_config_has_every_field_and_overrides_win(
        overrides in proptest::collection::vec(proptest::option::of("[ -~]{0,16}"), ConfigField::ALL.len())
    ) {
        let mut blob = serde_json::Map::new();
        for (field, value) in ConfigField::ALL.iter().zip(&overrides) {
            if let Some(value) = value {
                blob.insert(field.key().to_string(), serde_json::Value::String(value.clone()));
            }
        }
        let partial = PartialEndpointConfig::parse(&serde_json::Value::Object(blob).to_string()).unwrap();

        let defaults = EndpointConfig::default();
        let resolved = partial.merge_over(&defaults);

        for (field, value) in ConfigField::ALL.iter().zip(&overrides) {
            match value {
                Some(v) => prop_assert_eq!(resolved.get(*field), v.as_str()),
                None => prop_assert_eq!(resolved.get(*field), defaults.get(*field)),
            }
        }
    }

    #[test]
    fn filtering_is_idempotent(endpoints in endpoints_strategy(), filter in filter_strategy()) {
        let once: Vec<MonitoredEndpoint> = filter.apply(&endpoints).into_iter().cloned().collect();
        let twice: Vec<MonitoredEndpoint> = filter.apply(&once).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_changes_reset_page(
        endpoints in endpoints_strategy(),
        page in 1usize..10,
        search in "[a-z]{0,3}",
        which in 0u8..3,
    ) {
        let mut view = MonitorView::new(CARDS_PER_PAGE).with_endpoints(endpoints);
        view.set_page(page);
        match which {
            0 => view.set_search(search),
            1 => view.cycle_team(),
            _ => view.cycle_status(),
        }
        prop_assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn pages_partition_the_list(items in proptest::collection::vec(any::<u16>(), 0..100), size in 1usize..12) {
        let pages = total_pages(items.len(), size);
        let mut joined = Vec::new();
        for page in 1..=pages {
            let chunk = paginate(&items, size, page);
            prop_assert!(chunk.len() <= size);
            prop_assert!(!chunk.is_empty());
            joined.extend_from_slice(chunk);
        }
        prop_assert_eq!(joined, items.clone());
        prop_assert!(paginate(&items, size, pages + 1).is_empty());
    }

    #[test]
    fn plain_prompt_is_system_then_user(tool in 0usize..TOOLS.len(), input in "[a-zA-Z0-9 .,?]{1,40}") {
        let id = TOOLS[tool].id;
        let spec = prompt_spec(id).unwrap();
        let prompt = build_prompt(id, Some(&input), None, None, None);

        let expected = format!(
            "{}\n\n{}",
            spec.system_prompt,
            spec.user_prompt_template.replacen("{content}", &input, 1)
        );
        prop_assert_eq!(&prompt, &expected);
        prop_assert!(!prompt.contains("Files to analyze"));
    }
}

#[test]
fn down_filter_over_fifteen_endpoints_fits_one_page() {
    let endpoints: Vec<MonitoredEndpoint> = (0..15)
        .map(|i| MonitoredEndpoint {
            id: format!("ep-{i}"),
            name: format!("Service {i}"),
            url: format!("https://svc{i}.example.com/health"),
            status: if i % 4 == 0 {
                EndpointStatus::Down
            } else if i % 4 == 1 {
                EndpointStatus::Warning
            } else {
                EndpointStatus::Up
            },
            response_time_ms: 120,
            last_check: "30s ago".to_string(),
            team: TEAMS[i % TEAMS.len()].to_string(),
        })
        .collect();

    let mut view = MonitorView::new(CARDS_PER_PAGE).with_endpoints(endpoints.clone());
    view.set_search("");
    view.set_team(TeamFilter::All);
    view.set_status(StatusFilter::Only(EndpointStatus::Down));

    let filtered = view.filtered();
    let expected: Vec<&MonitoredEndpoint> = endpoints
        .iter()
        .filter(|e| e.status == EndpointStatus::Down)
        .collect();
    assert_eq!(filtered, expected);
    assert!(filtered.len() <= CARDS_PER_PAGE);
    assert_eq!(view.total_pages(), 1);
    assert_eq!(view.summary().down, filtered.len());
    assert_eq!(view.team_options().len(), 10);
}

#[test]
fn test_generator_prompt_with_jira_story() {
    let story = JiraStory {
        title: "T".to_string(),
        description: "D".to_string(),
        acceptance_criteria: vec!["A1".to_string(), "A2".to_string()],
        ..Default::default()
    };

    let prompt = build_prompt("test-generator", Some("Login must work"), Some(&story), None, None);

    assert!(prompt.contains("Generate test cases for the Jira story: T"));
    assert!(prompt.contains("Acceptance Criteria:\nA1\nA2"));
    let user_section = prompt_spec("test-generator")
        .unwrap()
        .user_prompt_template
        .replacen("{content}", "Login must work", 1);
    assert!(prompt.ends_with(&user_section));
}
