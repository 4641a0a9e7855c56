//! In-memory repositories - used when no database is configured and in tests.
//!
//! Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Group, NewGroup, NewPost, Page, PageRequest, Post, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{
    BaseRepository, GroupRepository, PostFilter, PostRepository, UserRepository,
};

/// In-memory user store keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<BTreeMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|u| u.id != entity.id && u.username == entity.username);
        if taken {
            return Err(RepoError::Constraint("Username already exists".to_string()));
        }
        let slot = store.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("Username already exists".to_string()));
        }
        if store.contains_key(&user.id) {
            return Err(RepoError::Constraint("User already exists".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }
}

/// In-memory group store with a sequence for new ids.
pub struct InMemoryGroupRepository {
    store: RwLock<BTreeMap<i64, Group>>,
    next_id: AtomicI64,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryGroupRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Group, i64> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn update(&self, entity: Group) -> Result<Group, RepoError> {
        let mut store = self.store.write().await;
        let taken = store
            .values()
            .any(|g| g.id != entity.id && g.slug == entity.slug);
        if taken {
            return Err(RepoError::Constraint("Group slug already exists".to_string()));
        }
        let slot = store.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn create(&self, group: NewGroup) -> Result<Group, RepoError> {
        let mut store = self.store.write().await;
        if store.values().any(|g| g.slug == group.slug) {
            return Err(RepoError::Constraint("Group slug already exists".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let group = group.into_group(id);
        store.insert(id, group.clone());
        Ok(group)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|g| g.slug == slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let mut groups: Vec<Group> = self.store.read().await.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(groups)
    }
}

/// In-memory post store with a sequence for new ids.
pub struct InMemoryPostRepository {
    store: RwLock<BTreeMap<i64, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let slot = store.get_mut(&entity.id).ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let post = post.into_post(id);
        self.store.write().await.insert(id, post.clone());
        Ok(post)
    }

    async fn list(&self, filter: PostFilter, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .store
            .read()
            .await
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        // Newest first; ids break ties between posts created in the same instant.
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));

        Ok(Page::from_items(posts, page))
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|p| p.author_id == author_id).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[tokio::test]
    async fn test_group_slug_is_unique() {
        let repo = InMemoryGroupRepository::new();
        repo.create(NewGroup::new("Тестовая группа", "test_group"))
            .await
            .unwrap();

        let result = repo.create(NewGroup::new("Дубль", "test_group")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_groups_listed_by_title() {
        let repo = InMemoryGroupRepository::new();
        repo.create(NewGroup::new("Beta", "beta")).await.unwrap();
        repo.create(NewGroup::new("Alpha", "alpha")).await.unwrap();

        let titles: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
        assert_eq!(repo.find_by_slug("beta").await.unwrap().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("Batman".into(), "b@cave.org".into(), "hash".into()))
            .await
            .unwrap();

        let result = repo
            .create(User::new("Batman".into(), "other@cave.org".into(), "hash".into()))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(repo.find_by_email("b@cave.org").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_posts_listed_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let mut old = NewPost::new(author, "old".into(), None);
        old.pub_date = Utc::now() - Duration::hours(1);
        repo.create(NewPost::new(author, "new".into(), None))
            .await
            .unwrap();
        repo.create(old).await.unwrap();
        let same_instant = repo
            .create(NewPost::new(author, "newest".into(), None))
            .await
            .unwrap();

        let page = repo
            .list(PostFilter::All, PageRequest::new(1, 10))
            .await
            .unwrap();
        let texts: Vec<_> = page.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["newest", "new", "old"]);
        assert_eq!(page.object_list[0].id, same_instant.id);
    }

    #[tokio::test]
    async fn test_list_filters_by_group_and_author() {
        let repo = InMemoryPostRepository::new();
        let batman = Uuid::new_v4();
        let robin = Uuid::new_v4();
        repo.create(NewPost::new(batman, "in group".into(), Some(1)))
            .await
            .unwrap();
        repo.create(NewPost::new(batman, "no group".into(), None))
            .await
            .unwrap();
        repo.create(NewPost::new(robin, "other group".into(), Some(2)))
            .await
            .unwrap();

        let page = PageRequest::new(1, 10);
        let group = repo.list(PostFilter::Group(1), page).await.unwrap();
        assert_eq!(group.count, 1);
        assert_eq!(group.object_list[0].text, "in group");

        let by_batman = repo.list(PostFilter::Author(batman), page).await.unwrap();
        assert!(by_batman.iter().all(|p| p.author_id == batman));
        assert_eq!(by_batman.count, 2);
        assert_eq!(repo.count_by_author(robin).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_paginates_and_clamps() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        for i in 0..13 {
            repo.create(NewPost::new(author, format!("post {i}"), None))
                .await
                .unwrap();
        }

        let first = repo
            .list(PostFilter::All, PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(first.object_list.len(), 10);
        assert!(first.has_next);

        let beyond = repo
            .list(PostFilter::All, PageRequest::new(99, 10))
            .await
            .unwrap();
        assert_eq!(beyond.number, 2);
        assert_eq!(beyond.object_list.len(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let ghost = NewPost::new(Uuid::new_v4(), "ghost".into(), None).into_post(404);

        let result = repo.update(ghost).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
