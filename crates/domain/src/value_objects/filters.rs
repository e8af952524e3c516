//! Filter selections for the endpoint monitor

use super::EndpointStatus;
use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

/// Team selection: every team, or exactly one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

impl TeamFilter {
    /// Exact (case-sensitive) team match
    pub fn matches(&self, team: &str) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(name) => name == team,
        }
    }

    /// Next selection when cycling through `options` (All first)
    pub fn cycle(&self, options: &[String]) -> TeamFilter {
        match self {
            TeamFilter::All => options
                .first()
                .map(|t| TeamFilter::Team(t.clone()))
                .unwrap_or(TeamFilter::All),
            TeamFilter::Team(current) => {
                let next = options
                    .iter()
                    .position(|t| t == current)
                    .and_then(|idx| options.get(idx + 1));
                match next {
                    Some(team) => TeamFilter::Team(team.clone()),
                    None => TeamFilter::All,
                }
            }
        }
    }
}

impl fmt::Display for TeamFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamFilter::All => f.write_str("All Teams"),
            TeamFilter::Team(name) => f.write_str(name),
        }
    }
}

impl FromStr for TeamFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("all") {
            TeamFilter::All
        } else {
            TeamFilter::Team(s.to_string())
        })
    }
}

/// Status selection: every status, or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(EndpointStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: EndpointStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// All -> up -> warning -> down -> All
    pub fn cycle(&self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Only(EndpointStatus::Up),
            StatusFilter::Only(EndpointStatus::Up) => StatusFilter::Only(EndpointStatus::Warning),
            StatusFilter::Only(EndpointStatus::Warning) => StatusFilter::Only(EndpointStatus::Down),
            StatusFilter::Only(EndpointStatus::Down) => StatusFilter::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All Status"),
            StatusFilter::Only(status) => f.write_str(status.label()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<EndpointStatus>().map(StatusFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_cycle_wraps_to_all() {
        let teams = vec!["Alpha".to_string(), "Beta".to_string()];
        let f = TeamFilter::All.cycle(&teams);
        assert_eq!(f, TeamFilter::Team("Alpha".into()));
        let f = f.cycle(&teams);
        assert_eq!(f, TeamFilter::Team("Beta".into()));
        assert_eq!(f.cycle(&teams), TeamFilter::All);
        assert_eq!(TeamFilter::All.cycle(&[]), TeamFilter::All);
    }

    #[test]
    fn test_team_match_is_exact() {
        let f = TeamFilter::Team("Payments".into());
        assert!(f.matches("Payments"));
        assert!(!f.matches("payments"));
        assert!(TeamFilter::All.matches("anything"));
    }

    #[test]
    fn test_status_filter_parse_and_cycle() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "down".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(EndpointStatus::Down)
        );
        let mut f = StatusFilter::All;
        for _ in 0..4 {
            f = f.cycle();
        }
        assert_eq!(f, StatusFilter::All);
    }
}
