//! Comment and reply use cases.

use crate::config::ToolParams;
use crate::ports::drive_gateway::DriveGateway;
use crate::use_cases::error::UseCaseError;
use crate::use_cases::search_files::ListInput;
use crate::use_cases::shared::require_id;
use gdrive_domain::{Comment, Page, Reply};
use std::sync::Arc;

/// Use case for comments and replies
pub struct CommentsUseCase {
    gateway: Arc<dyn DriveGateway>,
    params: ToolParams,
}

impl CommentsUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>, params: ToolParams) -> Self {
        Self { gateway, params }
    }

    pub async fn add(&self, file_id: &str, content: &str) -> Result<Comment, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let content = require_id("content", content)?;
        Ok(self.gateway.create_comment(&file_id, &content).await?)
    }

    pub async fn list(
        &self,
        file_id: &str,
        input: ListInput,
    ) -> Result<Page<Comment>, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        Ok(self
            .gateway
            .list_comments(
                &file_id,
                self.params.page_size(input.page_size),
                input.page_token.as_deref(),
            )
            .await?)
    }

    pub async fn delete(&self, file_id: &str, comment_id: &str) -> Result<(), UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let comment_id = require_id("commentId", comment_id)?;
        Ok(self.gateway.delete_comment(&file_id, &comment_id).await?)
    }

    pub async fn reply(
        &self,
        file_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<Reply, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let comment_id = require_id("commentId", comment_id)?;
        let content = require_id("content", content)?;
        Ok(self
            .gateway
            .create_reply(&file_id, &comment_id, &content)
            .await?)
    }

    pub async fn list_replies(
        &self,
        file_id: &str,
        comment_id: &str,
        input: ListInput,
    ) -> Result<Page<Reply>, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let comment_id = require_id("commentId", comment_id)?;
        Ok(self
            .gateway
            .list_replies(
                &file_id,
                &comment_id,
                self.params.page_size(input.page_size),
                input.page_token.as_deref(),
            )
            .await?)
    }

    pub async fn delete_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<(), UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let comment_id = require_id("commentId", comment_id)?;
        let reply_id = require_id("replyId", reply_id)?;
        Ok(self
            .gateway
            .delete_reply(&file_id, &comment_id, &reply_id)
            .await?)
    }
}
