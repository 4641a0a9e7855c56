//! Groups loaded at startup from a JSON fixture file.

use std::path::Path;

use anyhow::Context as _;
use yatube_core::domain::NewGroup;
use yatube_core::error::RepoError;
use yatube_core::ports::GroupRepository;

/// Parse a fixture: a JSON array of `{"title", "slug", "description"}` objects.
pub fn parse_groups(json: &str) -> serde_json::Result<Vec<NewGroup>> {
    serde_json::from_str(json)
}

pub async fn load_groups_fixture(path: &Path) -> anyhow::Result<Vec<NewGroup>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading groups fixture {}", path.display()))?;
    parse_groups(&raw).with_context(|| format!("parsing groups fixture {}", path.display()))
}

/// Create the groups whose slug is not taken yet. Returns how many were created.
pub async fn seed_groups(
    groups: &dyn GroupRepository,
    fixture: Vec<NewGroup>,
) -> Result<usize, RepoError> {
    let mut created = 0;
    for group in fixture {
        if groups.find_by_slug(&group.slug).await?.is_some() {
            tracing::debug!(slug = %group.slug, "Group already exists");
            continue;
        }
        let group = groups.create(group).await?;
        tracing::info!(group_id = group.id, slug = %group.slug, "Group created");
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatube_infra::database::InMemoryGroupRepository;

    const FIXTURE: &str = r#"[
        {"title": "Тестовая группа", "slug": "test_group", "description": "Тестовое описание"},
        {"title": "Котики", "slug": "cats"}
    ]"#;

    #[test]
    fn test_parse_groups_defaults_description() {
        let groups = parse_groups(FIXTURE).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].description, "Тестовое описание");
        assert_eq!(groups[1].slug, "cats");
        assert!(groups[1].description.is_empty());
    }

    #[tokio::test]
    async fn test_seed_groups_is_idempotent() {
        let repo = InMemoryGroupRepository::new();

        let first = seed_groups(&repo, parse_groups(FIXTURE).unwrap()).await.unwrap();
        let second = seed_groups(&repo, parse_groups(FIXTURE).unwrap()).await.unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 0);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }
}
