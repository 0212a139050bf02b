use std::fmt;
use std::str::FromStr;

use crate::model::{Component, Job, JobPriority, JobStatus, Ship, ShipStatus};

/// One filter dimension; `All` lets everything through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr<Err = String>> FromStr for Filter<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(v) => v.fmt(f),
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipQuery {
    pub search: String,
    pub status: Filter<ShipStatus>,
}

impl ShipQuery {
    /// Search covers name, IMO number and flag.
    pub fn matches(&self, ship: &Ship) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || contains_ci(&ship.name, &needle)
            || ship.imo.contains(&needle)
            || contains_ci(&ship.flag, &needle);
        matches_search && self.status.matches(&ship.status)
    }

    pub fn apply<'a>(&self, ships: &'a [Ship]) -> Vec<&'a Ship> {
        ships.iter().filter(|s| self.matches(s)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub search: String,
    pub status: Filter<JobStatus>,
    pub priority: Filter<JobPriority>,
}

impl JobQuery {
    /// Search covers the owning ship's name, the component's name, the job
    /// type and the description. Ship and component are looked up in the
    /// given collections.
    pub fn matches(&self, job: &Job, ships: &[Ship], components: &[Component]) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty() || {
            let ship_name = ships.iter().find(|s| s.id == job.ship_id).map(|s| &s.name);
            let component_name = components
                .iter()
                .find(|c| c.id == job.component_id)
                .map(|c| &c.name);
            ship_name.is_some_and(|n| contains_ci(n, &needle))
                || component_name.is_some_and(|n| contains_ci(n, &needle))
                || contains_ci(job.job_type.label(), &needle)
                || contains_ci(&job.description, &needle)
        };
        matches_search && self.status.matches(&job.status) && self.priority.matches(&job.priority)
    }

    pub fn apply<'a>(
        &self,
        jobs: &'a [Job],
        ships: &[Ship],
        components: &[Component],
    ) -> Vec<&'a Job> {
        jobs.iter()
            .filter(|j| self.matches(j, ships, components))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_filter_parses_all_sentinel() {
        assert_eq!("all".parse::<Filter<JobStatus>>(), Ok(Filter::All));
        assert_eq!("ALL".parse::<Filter<JobStatus>>(), Ok(Filter::All));
        assert_eq!(
            "Completed".parse::<Filter<JobStatus>>(),
            Ok(Filter::Only(JobStatus::Completed))
        );
        assert!("bogus".parse::<Filter<JobStatus>>().is_err());
    }

    #[test]
    fn test_ship_search_is_case_insensitive() {
        let ships = seed::ships();
        let query = ShipQuery {
            search: "panama".to_string(),
            status: Filter::All,
        };
        assert_eq!(query.apply(&ships).len(), 2);

        let query = ShipQuery {
            search: "9164".to_string(),
            status: Filter::All,
        };
        let found = query.apply(&ships);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Maersk Alabama");
    }

    #[test]
    fn test_ship_search_and_status_are_conjunctive() {
        let ships = seed::ships();
        let query = ShipQuery {
            search: "panama".to_string(),
            status: Filter::Only(ShipStatus::UnderMaintenance),
        };
        assert!(query.apply(&ships).is_empty());
    }

    #[test]
    fn test_job_search_reaches_ship_and_component_names() {
        let (ships, components, jobs) = (seed::ships(), seed::components(), seed::jobs());
        let by_ship = JobQuery {
            search: "alabama".to_string(),
            ..Default::default()
        };
        let found = by_ship.apply(&jobs, &ships, &components);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "j2");

        let by_component = JobQuery {
            search: "MAIN ENGINE".to_string(),
            ..Default::default()
        };
        assert_eq!(by_component.apply(&jobs, &ships, &components)[0].id, "j1");

        let by_type = JobQuery {
            search: "repair".to_string(),
            ..Default::default()
        };
        assert_eq!(by_type.apply(&jobs, &ships, &components).len(), 1);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let (ships, components, jobs) = (seed::ships(), seed::components(), seed::jobs());
        assert_eq!(JobQuery::default().apply(&jobs, &ships, &components).len(), 2);
    }
}
