#[cfg(test)]
mod tests {
    use crate::database::entity::{group, post, user};
    use crate::database::postgres_repo::{
        PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use yatube_core::domain::{NewGroup, NewPost, Post};
    use yatube_core::error::RepoError;
    use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

    fn post_model(id: i64, author_id: uuid::Uuid, group_id: Option<i64>) -> post::Model {
        post::Model {
            id,
            author_id,
            group_id,
            text: "Тестовый текст".to_owned(),
            pub_date: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(7, author_id, Some(1))]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        let post = result.expect("post should be found");
        assert_eq!(post.id, 7);
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.group_id, Some(1));
        assert_eq!(post.text, "Тестовый текст");
    }

    #[tokio::test]
    async fn test_create_post_returns_assigned_id() {
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(42, author_id, None)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let created = repo
            .create(NewPost::new(author_id, "Тестовый текст".into(), None))
            .await
            .unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(created.group_id, None);
    }

    #[tokio::test]
    async fn test_find_group_by_slug() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![group::Model {
                id: 1,
                title: "Тестовая группа".to_owned(),
                slug: "test_group".to_owned(),
                description: "Тестовое описание".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresGroupRepository::new(db);
        let group = repo.find_by_slug("test_group").await.unwrap().unwrap();

        assert_eq!(group.id, 1);
        assert_eq!(group.to_string(), "Тестовая группа");
    }

    #[tokio::test]
    async fn test_create_group() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![group::Model {
                id: 3,
                title: "Новая".to_owned(),
                slug: "new".to_owned(),
                description: String::new(),
            }]])
            .into_connection();

        let repo = PostgresGroupRepository::new(db);
        let group = repo.create(NewGroup::new("Новая", "new")).await.unwrap();
        assert_eq!(group.id, 3);
        assert_eq!(group.slug, "new");
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let now = chrono::Utc::now();
        let id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id,
                username: "Batman".to_owned(),
                email: "batman@example.com".to_owned(),
                password_hash: "hash".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let user = repo.find_by_username("Batman").await.unwrap().unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.email, "batman@example.com");
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, i64>::delete(&repo, 404).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
