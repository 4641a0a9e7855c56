//! Post pages: listings, detail and the create/edit form.

use std::collections::HashMap;

use actix_web::{Either, HttpResponse, http::header, web};
use serde::Deserialize;
use uuid::Uuid;

use yatube_core::domain::{Author, FeedEntry, Group, Page, PageRequest, Post};
use yatube_core::forms::{PostForm, PostFormData};
use yatube_core::ports::PostFilter;

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;
use crate::templates::{TemplateResponse, base_context};
use crate::urls;

pub const INDEX_TEMPLATE: &str = "posts/index.html";
pub const GROUP_LIST_TEMPLATE: &str = "posts/group_list.html";
pub const PROFILE_TEMPLATE: &str = "posts/profile.html";
pub const POST_DETAIL_TEMPLATE: &str = "posts/post_detail.html";
pub const POST_FORM_TEMPLATE: &str = "posts/create_post.html";

/// `?page=` query of the listing pages.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    fn request(&self, state: &AppState) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), state.posts_per_page)
    }
}

/// Resolves authors and groups of posts, caching each lookup.
struct FeedResolver<'a> {
    state: &'a AppState,
    authors: HashMap<Uuid, Author>,
    groups: HashMap<i64, Group>,
}

impl<'a> FeedResolver<'a> {
    fn new(state: &'a AppState) -> Self {
        Self {
            state,
            authors: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    async fn load(&mut self, post: &Post) -> AppResult<()> {
        if !self.authors.contains_key(&post.author_id) {
            let user = self
                .state
                .users
                .find_by_id(post.author_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!("Author of post {} is missing", post.id))
                })?;
            self.authors.insert(user.id, Author::from(&user));
        }

        if let Some(group_id) = post.group_id {
            if !self.groups.contains_key(&group_id) {
                if let Some(group) = self.state.groups.find_by_id(group_id).await? {
                    self.groups.insert(group_id, group);
                }
            }
        }

        Ok(())
    }

    fn assemble(&self, post: Post) -> AppResult<FeedEntry> {
        let author = self
            .authors
            .get(&post.author_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Author of post {} is missing", post.id)))?;
        let group = post.group_id.and_then(|id| self.groups.get(&id).cloned());

        Ok(FeedEntry {
            post,
            author,
            group,
        })
    }

    async fn entry(&mut self, post: Post) -> AppResult<FeedEntry> {
        self.load(&post).await?;
        self.assemble(post)
    }

    async fn page(&mut self, page: Page<Post>) -> AppResult<Page<FeedEntry>> {
        for post in page.iter() {
            self.load(post).await?;
        }
        page.try_map(|post| self.assemble(post))
    }
}

async fn feed_page(
    state: &AppState,
    filter: PostFilter,
    request: PageRequest,
) -> AppResult<Page<FeedEntry>> {
    let page = state.posts.list(filter, request).await?;
    FeedResolver::new(state).page(page).await
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<TemplateResponse> {
    let page_obj = feed_page(&state, PostFilter::All, query.request(&state)).await?;

    let mut context = base_context(viewer.0.as_ref());
    context.insert("page_obj", &page_obj);
    Ok(TemplateResponse::new(INDEX_TEMPLATE, context))
}

/// GET /group/{slug}/
pub async fn group_list(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<TemplateResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Group {slug}")))?;

    let page_obj = feed_page(&state, PostFilter::Group(group.id), query.request(&state)).await?;

    let mut context = base_context(viewer.0.as_ref());
    context.insert("group", &group);
    context.insert("page_obj", &page_obj);
    Ok(TemplateResponse::new(GROUP_LIST_TEMPLATE, context))
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<TemplateResponse> {
    let username = path.into_inner();
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {username}")))?;

    let page_obj = feed_page(&state, PostFilter::Author(user.id), query.request(&state)).await?;

    let mut context = base_context(viewer.0.as_ref());
    context.insert("author", &Author::from(&user));
    context.insert("post_count", &page_obj.count);
    context.insert("page_obj", &page_obj);
    Ok(TemplateResponse::new(PROFILE_TEMPLATE, context))
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<i64>,
) -> AppResult<TemplateResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {post_id}")))?;

    let post_count = state.posts.count_by_author(post.author_id).await?;
    let can_edit = viewer
        .0
        .as_ref()
        .is_some_and(|identity| identity.user_id == post.author_id);
    let entry = FeedResolver::new(&state).entry(post).await?;

    let mut context = base_context(viewer.0.as_ref());
    context.insert("post", &entry);
    context.insert("post_count", &post_count);
    context.insert("can_edit", &can_edit);
    Ok(TemplateResponse::new(POST_DETAIL_TEMPLATE, context))
}

fn form_page(
    identity: &Identity,
    form: &PostForm,
    editing: Option<&Post>,
) -> TemplateResponse {
    let mut context = base_context(Some(identity));
    context.insert("form", form);
    context.insert("is_edit", &editing.is_some());
    if let Some(post) = editing {
        context.insert("post", post);
    }
    TemplateResponse::new(POST_FORM_TEMPLATE, context)
}

/// GET /create/
pub async fn post_create_form(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<TemplateResponse> {
    let groups = state.groups.list_all().await?;
    let form = PostForm::unbound(None, &groups);
    Ok(form_page(&identity, &form, None))
}

/// POST /create/
pub async fn post_create(
    state: web::Data<AppState>,
    identity: Identity,
    request_id: RequestId,
    data: web::Form<PostFormData>,
) -> AppResult<Either<HttpResponse, TemplateResponse>> {
    let groups = state.groups.list_all().await?;
    let form = PostForm::bind(None, &groups, &data);

    if !form.is_valid() {
        tracing::debug!(
            request_id = %request_id.as_str(),
            errors = ?form.errors(),
            "Rejected new post"
        );
        return Ok(Either::Right(form_page(&identity, &form, None)));
    }

    let post = form.save(state.posts.as_ref(), identity.user_id).await?;
    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = post.id,
        author = %identity.username,
        "Post created"
    );

    Ok(Either::Left(redirect(urls::profile(&identity.username))))
}

async fn editable_post(state: &AppState, post_id: i64) -> AppResult<Post> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {post_id}")))
}

/// GET /posts/{post_id}/edit/
pub async fn post_edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<Either<HttpResponse, TemplateResponse>> {
    let post = editable_post(&state, path.into_inner()).await?;
    if post.author_id != identity.user_id {
        return Ok(Either::Left(redirect(urls::post_detail(post.id))));
    }

    let groups = state.groups.list_all().await?;
    let form = PostForm::unbound(Some(&post), &groups);
    Ok(Either::Right(form_page(&identity, &form, Some(&post))))
}

/// POST /posts/{post_id}/edit/
pub async fn post_edit(
    state: web::Data<AppState>,
    identity: Identity,
    request_id: RequestId,
    path: web::Path<i64>,
    data: web::Form<PostFormData>,
) -> AppResult<Either<HttpResponse, TemplateResponse>> {
    let post = editable_post(&state, path.into_inner()).await?;
    if post.author_id != identity.user_id {
        tracing::warn!(
            request_id = %request_id.as_str(),
            post_id = post.id,
            user = %identity.username,
            "Edit attempt by non-author"
        );
        return Ok(Either::Left(redirect(urls::post_detail(post.id))));
    }

    let groups = state.groups.list_all().await?;
    let form = PostForm::bind(Some(&post), &groups, &data);
    if !form.is_valid() {
        return Ok(Either::Right(form_page(&identity, &form, Some(&post))));
    }

    let saved = form.save(state.posts.as_ref(), identity.user_id).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = saved.id, "Post updated");

    Ok(Either::Left(redirect(urls::post_detail(saved.id))))
}
