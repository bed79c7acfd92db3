use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::comments::detail::{format_coordinates, format_timestamp};
use crate::features::comments::models::Comment;
use crate::features::comments::thread::Composer;
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::Report;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// `dd/mm/yyyy HH:MM`
    pub created_at_display: String,
    pub user_id: String,
    pub user_name: String,
}

impl From<Comment> for CommentResponseDto {
    fn from(c: Comment) -> Self {
        Self {
            created_at_display: format_timestamp(&c.created_at),
            id: c.id,
            content: c.content,
            created_at: c.created_at,
            user_id: c.user_id,
            user_name: c.user_name,
        }
    }
}

/// Request DTO for adding a comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCommentDto {
    pub content: String,
}

/// Report with its comments, as shown when a marker is opened
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDetailResponseDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub created_at_display: String,
    pub coordinates_display: String,
    pub comments: Vec<CommentResponseDto>,
    pub composer: Composer,
}

impl ReportDetailResponseDto {
    pub fn new(report: Report, comments: Vec<Comment>, composer: Composer) -> Self {
        Self {
            created_at_display: format_timestamp(&report.created_at),
            coordinates_display: format_coordinates(report.latitude, report.longitude),
            report: report.into(),
            comments: comments.into_iter().map(CommentResponseDto::from).collect(),
            composer,
        }
    }
}
