//! In-memory Drive used by the use case tests.

use crate::ports::drive_gateway::{
    CopyTarget, DriveGateway, FileQuery, FileUpdate, GatewayError, NewFile, ShareOptions,
    SharedDriveUpdate,
};
use async_trait::async_trait;
use gdrive_domain::{
    About, Change, ChangeList, Comment, DriveFile, NewPermission, Page, Permission, Reply,
    Revision, Role, SharedDrive, StorageQuota,
};
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
struct StoredFile {
    meta: DriveFile,
    content: Vec<u8>,
    trashed: bool,
    permissions: Vec<Permission>,
    comments: Vec<Comment>,
}

#[derive(Default)]
struct State {
    files: BTreeMap<String, StoredFile>,
    drives: BTreeMap<String, SharedDrive>,
    next_id: usize,
    last_query: Option<FileQuery>,
    last_export_mime: Option<String>,
    uploads: Vec<(String, String)>,
}

/// Fake gateway with failure injection and concurrency tracking
#[derive(Default)]
pub(crate) struct FakeDrive {
    state: Mutex<State>,
    failing: Mutex<HashSet<String>>,
    /// Bump the version of a file after its content is read
    concurrent_writer: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeDrive {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_file(self, id: &str, name: &str, mime: &str, content: &str) -> Self {
        self.insert(
            DriveFile::new(id)
                .with_name(name)
                .with_mime_type(mime)
                .with_parents(["root"])
                .with_version("1"),
            content.as_bytes().to_vec(),
        );
        self
    }

    pub(crate) fn insert(&self, mut meta: DriveFile, content: Vec<u8>) {
        if meta.size.is_none() && !meta.mime_type.as_deref().unwrap_or("").contains("google-apps")
        {
            meta.size = Some(content.len().to_string());
        }
        let mut state = self.state.lock().unwrap();
        state.files.insert(
            meta.id.clone(),
            StoredFile {
                meta,
                content,
                trashed: false,
                permissions: Vec::new(),
                comments: Vec::new(),
            },
        );
    }

    /// Every call addressing `id` fails with a not-found error
    pub(crate) fn fail_on(self, id: &str) -> Self {
        self.failing.lock().unwrap().insert(id.to_string());
        self
    }

    pub(crate) fn with_concurrent_writer(self) -> Self {
        *self.concurrent_writer.lock().unwrap() = true;
        self
    }

    pub(crate) fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    pub(crate) fn content(&self, id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .files
            .get(id)
            .map(|f| String::from_utf8_lossy(&f.content).into_owned())
    }

    pub(crate) fn file(&self, id: &str) -> Option<DriveFile> {
        self.state.lock().unwrap().files.get(id).map(|f| f.meta.clone())
    }

    pub(crate) fn is_trashed(&self, id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .files
            .get(id)
            .is_some_and(|f| f.trashed)
    }

    pub(crate) fn exists(&self, id: &str) -> bool {
        self.state.lock().unwrap().files.contains_key(id)
    }

    pub(crate) fn last_query(&self) -> Option<FileQuery> {
        self.state.lock().unwrap().last_query.clone()
    }

    pub(crate) fn last_export_mime(&self) -> Option<String> {
        self.state.lock().unwrap().last_export_mime.clone()
    }

    /// (file id, content type) of every content upload
    pub(crate) fn uploads(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn add_drive(&self, id: &str, name: &str) {
        self.state.lock().unwrap().drives.insert(
            id.to_string(),
            SharedDrive {
                id: id.to_string(),
                name: Some(name.to_string()),
                extra: Default::default(),
            },
        );
    }

    async fn enter(&self, id: &str) -> Result<InFlight<'_>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let guard = InFlight(&self.in_flight);
        let delay = *self.delay.lock().unwrap();
        match delay {
            Some(d) => tokio::time::sleep(d).await,
            None => tokio::task::yield_now().await,
        }
        if self.failing.lock().unwrap().contains(id) {
            return Err(GatewayError::NotFound(format!("File not found: {}.", id)));
        }
        Ok(guard)
    }

    fn not_found(id: &str) -> GatewayError {
        GatewayError::NotFound(format!("File not found: {}.", id))
    }

    fn next_id(state: &mut State, prefix: &str) -> String {
        state.next_id += 1;
        format!("{}{}", prefix, state.next_id)
    }

    fn bump_version(meta: &mut DriveFile) {
        let next = meta
            .version
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
            + 1;
        meta.version = Some(next.to_string());
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DriveGateway for FakeDrive {
    async fn list_files(&self, query: &FileQuery) -> Result<Page<DriveFile>, GatewayError> {
        let _g = self.enter("").await?;
        let mut state = self.state.lock().unwrap();
        state.last_query = Some(query.clone());

        let start: usize = query
            .page_token
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0);
        let visible: Vec<DriveFile> = state
            .files
            .values()
            .filter(|f| !f.trashed)
            .map(|f| f.meta.clone())
            .collect();
        let size = query.page_size.max(1) as usize;
        let end = (start + size).min(visible.len());
        let next = (end < visible.len()).then(|| end.to_string());
        Ok(Page::new(visible[start.min(end)..end].to_vec(), next))
    }

    async fn get_file(&self, file_id: &str) -> Result<DriveFile, GatewayError> {
        let _g = self.enter(file_id).await?;
        let state = self.state.lock().unwrap();
        let file = state.files.get(file_id).ok_or_else(|| Self::not_found(file_id))?;
        let mut meta = file.meta.clone();
        meta.extra.insert("trashed".into(), json!(file.trashed));
        Ok(meta)
    }

    async fn create_file(&self, file: &NewFile) -> Result<DriveFile, GatewayError> {
        self.create_file_with_content(file, Vec::new(), "application/octet-stream")
            .await
    }

    async fn create_file_with_content(
        &self,
        file: &NewFile,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<DriveFile, GatewayError> {
        let _g = self.enter(&file.name).await?;
        let id = {
            let mut state = self.state.lock().unwrap();
            let id = Self::next_id(&mut state, "new");
            state.uploads.push((id.clone(), content_type.to_string()));
            id
        };
        let parents = if file.parents.is_empty() {
            vec!["root".to_string()]
        } else {
            file.parents.clone()
        };
        let meta = DriveFile::new(&id)
            .with_name(&file.name)
            .with_mime_type(file.mime_type.clone().unwrap_or_else(|| content_type.to_string()))
            .with_parents(parents)
            .with_version("1");
        self.insert(meta, content);
        self.file(&id).ok_or_else(|| Self::not_found(&id))
    }

    async fn update_file(
        &self,
        file_id: &str,
        update: &FileUpdate,
    ) -> Result<DriveFile, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        if let Some(name) = &update.name {
            file.meta.name = Some(name.clone());
        }
        if let Some(starred) = update.starred {
            file.meta.extra.insert("starred".into(), json!(starred));
        }
        if let Some(trashed) = update.trashed {
            file.trashed = trashed;
        }
        if let Some(restriction) = &update.content_restriction {
            file.meta
                .extra
                .insert("contentRestrictions".into(), json!([restriction]));
        }
        file.meta.parents.retain(|p| !update.remove_parents.contains(p));
        file.meta.parents.extend(update.add_parents.iter().cloned());
        Self::bump_version(&mut file.meta);
        Ok(file.meta.clone())
    }

    async fn update_content(
        &self,
        file_id: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<DriveFile, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        state
            .uploads
            .push((file_id.to_string(), content_type.to_string()));
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        file.content = content;
        Self::bump_version(&mut file.meta);
        Ok(file.meta.clone())
    }

    async fn copy_file(
        &self,
        file_id: &str,
        target: &CopyTarget,
    ) -> Result<DriveFile, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let source = state
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| Self::not_found(file_id))?;
        let id = Self::next_id(&mut state, "copy");
        let mut meta = source.meta.clone();
        meta.id = id.clone();
        meta.name = Some(
            target
                .name
                .clone()
                .unwrap_or_else(|| format!("Copy of {}", source.meta.display_name())),
        );
        if !target.parents.is_empty() {
            meta.parents = target.parents.clone();
        }
        state.files.insert(
            id,
            StoredFile {
                meta: meta.clone(),
                ..source
            },
        );
        Ok(meta)
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), GatewayError> {
        let _g = self.enter(file_id).await?;
        self.state
            .lock()
            .unwrap()
            .files
            .remove(file_id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(file_id))
    }

    async fn empty_trash(&self) -> Result<(), GatewayError> {
        let _g = self.enter("").await?;
        self.state.lock().unwrap().files.retain(|_, f| !f.trashed);
        Ok(())
    }

    async fn export_file(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        state.last_export_mime = Some(mime_type.to_string());
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        let content = file.content.clone();
        if *self.concurrent_writer.lock().unwrap() {
            Self::bump_version(&mut file.meta);
        }
        Ok(content)
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        let content = file.content.clone();
        if *self.concurrent_writer.lock().unwrap() {
            Self::bump_version(&mut file.meta);
        }
        Ok(content)
    }

    async fn list_revisions(
        &self,
        file_id: &str,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> Result<Page<Revision>, GatewayError> {
        let meta = self.get_file(file_id).await?;
        let revision = Revision {
            id: meta.version.unwrap_or_default(),
            ..Default::default()
        };
        Ok(Page::new(vec![revision], None))
    }

    async fn get_start_page_token(&self) -> Result<String, GatewayError> {
        let _g = self.enter("").await?;
        Ok("100".to_string())
    }

    async fn list_changes(
        &self,
        page_token: &str,
        _page_size: u32,
    ) -> Result<ChangeList, GatewayError> {
        let _g = self.enter(page_token).await?;
        Ok(ChangeList {
            changes: vec![Change {
                file_id: Some("f1".to_string()),
                ..Default::default()
            }],
            next_page_token: None,
            new_start_page_token: Some("101".to_string()),
        })
    }

    async fn list_permissions(&self, file_id: &str) -> Result<Vec<Permission>, GatewayError> {
        let _g = self.enter(file_id).await?;
        let state = self.state.lock().unwrap();
        let file = state.files.get(file_id).ok_or_else(|| Self::not_found(file_id))?;
        Ok(file.permissions.clone())
    }

    async fn create_permission(
        &self,
        file_id: &str,
        permission: &NewPermission,
        _options: &ShareOptions,
    ) -> Result<Permission, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "perm");
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        let created = Permission {
            id,
            role: Some(permission.role.as_str().to_string()),
            grantee_type: Some(permission.grantee_type.as_str().to_string()),
            email_address: permission.email_address.clone(),
            domain: permission.domain.clone(),
            extra: Default::default(),
        };
        file.permissions.push(created.clone());
        Ok(created)
    }

    async fn update_permission(
        &self,
        file_id: &str,
        permission_id: &str,
        role: Role,
    ) -> Result<Permission, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        let permission = file
            .permissions
            .iter_mut()
            .find(|p| p.id == permission_id)
            .ok_or_else(|| {
                GatewayError::NotFound(format!("Permission not found: {}.", permission_id))
            })?;
        permission.role = Some(role.as_str().to_string());
        Ok(permission.clone())
    }

    async fn delete_permission(
        &self,
        file_id: &str,
        permission_id: &str,
    ) -> Result<(), GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        let before = file.permissions.len();
        file.permissions.retain(|p| p.id != permission_id);
        if file.permissions.len() == before {
            return Err(GatewayError::NotFound(format!(
                "Permission not found: {}.",
                permission_id
            )));
        }
        Ok(())
    }

    async fn create_comment(
        &self,
        file_id: &str,
        content: &str,
    ) -> Result<Comment, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "c");
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        let comment = Comment {
            id,
            content: Some(content.to_string()),
            ..Default::default()
        };
        file.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(
        &self,
        file_id: &str,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> Result<Page<Comment>, GatewayError> {
        let _g = self.enter(file_id).await?;
        let state = self.state.lock().unwrap();
        let file = state.files.get(file_id).ok_or_else(|| Self::not_found(file_id))?;
        Ok(Page::new(file.comments.clone(), None))
    }

    async fn delete_comment(&self, file_id: &str, comment_id: &str) -> Result<(), GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        file.comments.retain(|c| c.id != comment_id);
        Ok(())
    }

    async fn create_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<Reply, GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "r");
        let file = state
            .files
            .get_mut(file_id)
            .ok_or_else(|| Self::not_found(file_id))?;
        let comment = file
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| GatewayError::NotFound(format!("Comment not found: {}.", comment_id)))?;
        let reply = Reply {
            id,
            content: Some(content.to_string()),
            ..Default::default()
        };
        comment.replies.push(reply.clone());
        Ok(reply)
    }

    async fn list_replies(
        &self,
        file_id: &str,
        comment_id: &str,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> Result<Page<Reply>, GatewayError> {
        let _g = self.enter(file_id).await?;
        let state = self.state.lock().unwrap();
        let file = state.files.get(file_id).ok_or_else(|| Self::not_found(file_id))?;
        let comment = file
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| GatewayError::NotFound(format!("Comment not found: {}.", comment_id)))?;
        Ok(Page::new(comment.replies.clone(), None))
    }

    async fn delete_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<(), GatewayError> {
        let _g = self.enter(file_id).await?;
        let mut state = self.state.lock().unwrap();
        if let Some(comment) = state
            .files
            .get_mut(file_id)
            .and_then(|f| f.comments.iter_mut().find(|c| c.id == comment_id))
        {
            comment.replies.retain(|r| r.id != reply_id);
        }
        Ok(())
    }

    async fn list_drives(
        &self,
        _page_size: u32,
        _page_token: Option<&str>,
    ) -> Result<Page<SharedDrive>, GatewayError> {
        let _g = self.enter("").await?;
        Ok(Page::new(
            self.state.lock().unwrap().drives.values().cloned().collect(),
            None,
        ))
    }

    async fn get_drive(&self, drive_id: &str) -> Result<SharedDrive, GatewayError> {
        let _g = self.enter(drive_id).await?;
        self.state
            .lock()
            .unwrap()
            .drives
            .get(drive_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("Shared drive not found: {}", drive_id)))
    }

    async fn create_drive(&self, name: &str) -> Result<SharedDrive, GatewayError> {
        let _g = self.enter(name).await?;
        let id = {
            let mut state = self.state.lock().unwrap();
            Self::next_id(&mut state, "drive")
        };
        self.add_drive(&id, name);
        self.get_drive(&id).await
    }

    async fn update_drive(
        &self,
        drive_id: &str,
        update: &SharedDriveUpdate,
    ) -> Result<SharedDrive, GatewayError> {
        let _g = self.enter(drive_id).await?;
        let mut state = self.state.lock().unwrap();
        let drive = state
            .drives
            .get_mut(drive_id)
            .ok_or_else(|| {
                GatewayError::NotFound(format!("Shared drive not found: {}", drive_id))
            })?;
        if let Some(name) = &update.name {
            drive.name = Some(name.clone());
        }
        Ok(drive.clone())
    }

    async fn delete_drive(&self, drive_id: &str) -> Result<(), GatewayError> {
        let _g = self.enter(drive_id).await?;
        self.state
            .lock()
            .unwrap()
            .drives
            .remove(drive_id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::NotFound(format!("Shared drive not found: {}", drive_id)))
    }

    async fn about(&self) -> Result<About, GatewayError> {
        let _g = self.enter("").await?;
        Ok(About {
            user: None,
            storage_quota: Some(StorageQuota {
                limit: Some("1000".to_string()),
                usage: Some("250".to_string()),
                usage_in_drive: Some("200".to_string()),
                usage_in_drive_trash: Some("50".to_string()),
            }),
            extra: Default::default(),
        })
    }
}
