//! In-memory store fixtures for service-level tests

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rela::{
    Config, Error, Result, Store,
    database::{Collection, Document, DocumentStore, Filter, MemoryStore},
    models::{
        boards::CreateBoardRequest,
        ownership::Scope,
        tasks::{CreateTaskRequest, Task},
        users::{AuthTokens, RegisterUser},
        workspace_members::AssignTaskRequest,
        workspaces::{CreateWorkspaceRequest, Workspace},
    },
    services::{boards, tasks, users, workspaces},
};
use uuid::Uuid;

use crate::common::helpers::{STRONG_PASSWORD, generate_test_email, test_config};

/// A fresh store plus config for one test
///
/// # Example
/// ```no_run
/// #[tokio::test]
/// async fn test_something() {
///     let test_store = TestStore::new();
///     let alice = test_store.register("Alice").await;
/// }
/// ```
pub struct TestStore {
    pub store: Arc<MemoryStore>,
    pub config: Config,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            config: test_config(),
        }
    }

    pub fn store(&self) -> &Store {
        self.store.as_ref()
    }

    /// Registration payload with a unique email
    pub fn generate_user(&self, name: &str) -> RegisterUser {
        RegisterUser {
            name: name.to_string(),
            email: generate_test_email(),
            password: STRONG_PASSWORD.to_string(),
        }
    }

    /// Registers a user and returns their tokens
    pub async fn register(&self, name: &str) -> AuthTokens {
        users::register_user(self.store(), &self.config, self.generate_user(name))
            .await
            .expect("Failed to register test user")
    }

    /// Creates a workspace with a unique name owned by `owner_id`
    pub async fn create_workspace(&self, owner_id: Uuid) -> Workspace {
        workspaces::create_workspace(
            self.store(),
            owner_id,
            CreateWorkspaceRequest {
                name: crate::common::generate_workspace_name("Workspace"),
            },
        )
        .await
        .expect("Failed to create test workspace")
    }

    /// Adds `user_id` to a workspace through a real invite
    pub async fn join(&self, workspace: &Workspace, user_id: Uuid) -> Workspace {
        let invite = rela::services::workspace_members::create_invite(
            self.store(),
            &self.config.jwt,
            workspace.id,
            workspace.owner_id,
        )
        .await
        .expect("Failed to create invite");

        rela::services::workspace_members::accept_invite(
            self.store(),
            &self.config.jwt,
            &invite.token,
            user_id,
        )
        .await
        .expect("Failed to accept invite")
    }

    /// Creates a board and task in `workspace` and has the owner assign it to `assignee`
    pub async fn assigned_task(&self, workspace: &Workspace, assignee: Uuid) -> Task {
        let scope = Scope::Workspace(workspace.id);
        let board = boards::create_board(
            self.store(),
            workspace.owner_id,
            scope,
            CreateBoardRequest {
                name: "Shared".to_string(),
            },
        )
        .await
        .expect("Failed to create board");
        let task = tasks::create_task(
            self.store(),
            workspace.owner_id,
            scope,
            CreateTaskRequest {
                name: "Assigned".to_string(),
                description: None,
                board_id: board.id,
                deadline: None,
            },
        )
        .await
        .expect("Failed to create task");

        tasks::assign_task(
            self.store(),
            workspace.id,
            workspace.owner_id,
            AssignTaskRequest {
                task_id: task.id,
                user_id: assignee,
            },
        )
        .await
        .expect("Failed to assign task")
    }
}

/// Store whose deletes in one collection can be made to fail
///
/// Used to interrupt cascades halfway through.
pub struct FailingStore {
    inner: MemoryStore,
    failing: Collection,
    armed: AtomicBool,
}

impl FailingStore {
    pub fn new(failing: Collection) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing,
            armed: AtomicBool::new(false),
        }
    }

    /// Makes every following delete in the failing collection error out
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(&self, collection: Collection, id: Uuid, document: Document) -> Result<()> {
        self.inner.insert(collection, id, document).await
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        self.inner.find(collection, filter).await
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        self.inner.find_one(collection, filter).await
    }

    async fn replace(&self, collection: Collection, id: Uuid, document: Document) -> Result<bool> {
        self.inner.replace(collection, id, document).await
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        if collection == self.failing && self.armed.load(Ordering::SeqCst) {
            return Err(Error::Internal(format!("injected delete failure in {}", collection)));
        }
        self.inner.delete(collection, filter).await
    }

    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }
}
