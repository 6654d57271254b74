//! Blog API Handlers
//!
//! A post carries one cover image and up to two videos. Update follows the
//! same retained-asset merge protocol as products: `existingVideos` names the
//! kept files, new uploads are appended after them.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Blog, BlogCreate, BlogUpdate};
use crate::db::repository::BlogRepository;
use crate::db::repository::blog::MAX_BLOG_VIDEOS;
use crate::media::{MediaKind, MultipartForm, merge_assets};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// POST /blog/add-blog - 创建博客 (multipart)
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<AppResponse<Blog>>)> {
    let form = MultipartForm::read(&mut multipart).await?;

    let title = form.require_text("title")?;
    let description = form.require_text("description")?;
    let tag = form.require_text("tag")?;
    let read_time = form.require_text("readTime")?;

    let image_file = form
        .file("image")
        .ok_or_else(|| AppError::validation("a cover image is required"))?;
    let video_files = form.files("videos");
    if video_files.len() > MAX_BLOG_VIDEOS {
        return Err(AppError::validation(format!(
            "at most {} videos allowed",
            MAX_BLOG_VIDEOS
        )));
    }

    let image = state
        .media
        .save(MediaKind::Blog, &image_file.filename, &image_file.bytes)?;
    let videos = video_files
        .iter()
        .map(|f| state.media.save(MediaKind::BlogVideo, &f.filename, &f.bytes))
        .collect::<Result<Vec<_>, _>>()?;

    let repo = BlogRepository::new(state.get_db());
    let blog = repo
        .create(BlogCreate {
            title,
            description,
            tag,
            read_time,
            image,
            videos,
        })
        .await?;

    Ok((StatusCode::CREATED, ok_with_message(blog, "blog created")))
}

/// GET /blog/get-blog - 博客列表 (最新在前)
pub async fn get_all(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Blog>>>> {
    let repo = BlogRepository::new(state.get_db());
    Ok(ok(repo.find_all().await?))
}

/// GET /blog/get-blog/:slug - 按 slug 获取博客
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<Blog>>> {
    let repo = BlogRepository::new(state.get_db());
    let blog = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Blog {}", slug)))?;
    Ok(ok(blog))
}

/// PUT /blog/update-blog/:id - 更新博客 (multipart)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<Blog>>> {
    let form = MultipartForm::read(&mut multipart).await?;

    let existing_videos = form.json_list("existingVideos")?;
    let new_video_files = form.files("videos");

    // Cap checked before any file is written
    let videos_decided = existing_videos.is_some() || !new_video_files.is_empty();
    if videos_decided {
        let retained = existing_videos.as_deref().unwrap_or(&[]);
        if retained.len() + new_video_files.len() > MAX_BLOG_VIDEOS {
            return Err(AppError::validation(format!(
                "at most {} videos allowed",
                MAX_BLOG_VIDEOS
            )));
        }
    }

    let image = match form.file("image") {
        Some(file) => Some(state.media.save(MediaKind::Blog, &file.filename, &file.bytes)?),
        None => None,
    };
    let new_videos = new_video_files
        .iter()
        .map(|f| state.media.save(MediaKind::BlogVideo, &f.filename, &f.bytes))
        .collect::<Result<Vec<_>, _>>()?;

    let videos =
        videos_decided.then(|| merge_assets(existing_videos.unwrap_or_default(), new_videos));

    let data = BlogUpdate {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        tag: form.text("tag").map(str::to_string),
        read_time: form.text("readTime").map(str::to_string),
        image,
        videos,
    };

    let repo = BlogRepository::new(state.get_db());
    let blog = repo.update(&id, data).await?;

    Ok(ok_with_message(blog, "blog updated"))
}

/// DELETE /blog/delete-blog/:id - 删除博客
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = BlogRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(ok_with_message(true, "blog deleted"))
}
