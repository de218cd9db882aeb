//! Name resolution - identifiers to canonical entities

use crate::normalize::normalize;
use patnet_domain::traits::NameService;
use patnet_domain::Entity;
use std::fmt::Display;
use tracing::{debug, warn};

/// Outcome of resolving the co-applicants of one publication
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Distinct canonical entities, first-seen order
    pub entities: Vec<Entity>,

    /// Identifiers dropped because the service had no usable name
    pub unresolved: usize,
}

impl Resolution {
    /// Whether fewer than two entities remain
    pub fn is_degenerate(&self) -> bool {
        self.entities.len() < 2
    }
}

/// Resolve and canonicalize co-applicant identifiers
///
/// Identifiers the service cannot name (no name, an error, or a name that
/// normalizes to nothing) are dropped and counted. Entities are deduplicated
/// by exact string equality after normalization.
pub async fn resolve_entities<N>(names: &N, identifiers: &[String]) -> Resolution
where
    N: NameService,
    N::Error: Display,
{
    let mut resolution = Resolution::default();

    for identifier in identifiers {
        let display_name = match names.resolve(identifier).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                debug!("No name for {}", identifier);
                resolution.unresolved += 1;
                continue;
            }
            Err(e) => {
                warn!("Resolving {} failed: {}", identifier, e);
                resolution.unresolved += 1;
                continue;
            }
        };

        let Ok(entity) = Entity::new(normalize(&display_name)) else {
            debug!("Name '{}' of {} normalizes to nothing", display_name, identifier);
            resolution.unresolved += 1;
            continue;
        };

        if !resolution.entities.contains(&entity) {
            resolution.entities.push(entity);
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use patnet_sparql::MockNameService;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn names(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(Entity::as_str).collect()
    }

    #[tokio::test]
    async fn test_resolve_and_normalize() {
        let service = MockNameService::new();
        service.add_name("a", "ACME CO.,");
        service.add_name("b", "Beta Limited");

        let resolution = resolve_entities(&service, &ids(&["a", "b"])).await;
        assert_eq!(names(&resolution.entities), vec!["Acme Co.", "Beta Ltd."]);
        assert_eq!(resolution.unresolved, 0);
        assert!(!resolution.is_degenerate());
    }

    #[tokio::test]
    async fn test_unresolved_identifiers_are_dropped() {
        let service = MockNameService::new();
        service.add_name("a", "Acme");
        service.add_name("blank", "\"  \"");
        service.add_error("broken");

        let resolution = resolve_entities(&service, &ids(&["a", "missing", "broken", "blank"])).await;
        assert_eq!(names(&resolution.entities), vec!["Acme"]);
        assert_eq!(resolution.unresolved, 3);
        assert!(resolution.is_degenerate());
        assert_eq!(service.call_count(), 4);
    }

    #[tokio::test]
    async fn test_names_collapsing_to_one_entity() {
        let service = MockNameService::new();
        service.add_name("x1", "X");
        service.add_name("x2", "x");

        let resolution = resolve_entities(&service, &ids(&["x1", "x2"])).await;
        assert_eq!(names(&resolution.entities), vec!["X"]);
        assert!(resolution.is_degenerate());
    }

    #[tokio::test]
    async fn test_first_seen_order() {
        let service = MockNameService::new();
        for (id, name) in [("1", "Zeta"), ("2", "Alpha"), ("3", "zeta"), ("4", "Mu")] {
            service.add_name(id, name);
        }

        let resolution = resolve_entities(&service, &ids(&["1", "2", "3", "4"])).await;
        assert_eq!(names(&resolution.entities), vec!["Zeta", "Alpha", "Mu"]);
    }
}
