//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use yatube_core::domain::{Group, NewGroup, NewPost, Page, PageRequest, Post, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{GroupRepository, PostFilter, PostRepository, UserRepository};

use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL group repository.
pub type PostgresGroupRepository = PostgresBaseRepository<GroupEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        tracing::debug!(username = %user.username, "Creating user");

        let active: user::ActiveModel = user.into();
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Username"))?;

        Ok(model.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.split_once('@') {
            Some((local, domain)) if local.chars().count() > 1 => {
                let first: String = local.chars().take(1).collect();
                format!("{first}***@{domain}")
            }
            Some((_, domain)) => format!("***@{domain}"),
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn create(&self, group: NewGroup) -> Result<Group, RepoError> {
        tracing::debug!(slug = %group.slug, "Creating group");

        let active: group::ActiveModel = group.into();
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Group slug"))?;

        Ok(model.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let result = GroupEntity::find()
            .order_by_asc(group::Column::Title)
            .order_by_asc(group::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn filtered_posts(filter: PostFilter) -> Select<PostEntity> {
    let select = PostEntity::find();
    match filter {
        PostFilter::All => select,
        PostFilter::Group(group_id) => select.filter(post::Column::GroupId.eq(group_id)),
        PostFilter::Author(author_id) => select.filter(post::Column::AuthorId.eq(author_id)),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Post"))?;

        tracing::debug!(post_id = model.id, "Post created");
        Ok(model.into())
    }

    async fn list(&self, filter: PostFilter, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let count = filtered_posts(filter)
            .count(&self.db)
            .await
            .map_err(query_error)?;
        let page = page.clamp(count);

        let rows = filtered_posts(filter)
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::Id)
            .offset(page.offset())
            .limit(page.per_page)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        let posts = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(posts, page, count))
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        filtered_posts(PostFilter::Author(author_id))
            .count(&self.db)
            .await
            .map_err(query_error)
    }
}
