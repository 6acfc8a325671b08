use rela::{
    Store, load_config,
    database::MemoryStore,
    models::{
        boards::CreateBoardRequest,
        ownership::Scope,
        tasks::CreateTaskRequest,
        users::RegisterUser,
        workspace_members::AssignTaskRequest,
        workspaces::CreateWorkspaceRequest,
    },
    services::{boards, tasks, users, workspace_members, workspaces},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    println!("Loaded configuration:");
    println!("{}", config);
    println!();

    let memory = MemoryStore::new();
    let store: &Store = &memory;

    let alice = users::register_user(
        store,
        &config,
        RegisterUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "SecurePass123!".to_string(),
        },
    )
    .await?;
    let bob = users::register_user(
        store,
        &config,
        RegisterUser {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "SecurePass123!".to_string(),
        },
    )
    .await?;
    println!("✓ Registered Alice ({}) and Bob ({})", alice.user_id, bob.user_id);

    let workspace = workspaces::create_workspace(
        store,
        alice.user_id,
        CreateWorkspaceRequest { name: "Launch".to_string() },
    )
    .await?;
    println!("✓ Alice created workspace '{}'", workspace.name);

    let invite = workspace_members::create_invite(store, &config.jwt, workspace.id, alice.user_id).await?;
    workspace_members::accept_invite(store, &config.jwt, &invite.token, bob.user_id).await?;
    println!("✓ Bob joined through an invite (expires {})", invite.expires_at);

    let scope = Scope::Workspace(workspace.id);
    let board = boards::create_board(
        store,
        alice.user_id,
        scope,
        CreateBoardRequest { name: "Sprint 1".to_string() },
    )
    .await?;
    let task = tasks::create_task(
        store,
        bob.user_id,
        scope,
        CreateTaskRequest {
            name: "Write release notes".to_string(),
            description: None,
            board_id: board.id,
            deadline: None,
        },
    )
    .await?;
    println!("✓ Bob filed '{}' on board '{}'", task.name, board.name);

    let task = tasks::assign_task(
        store,
        workspace.id,
        alice.user_id,
        AssignTaskRequest { task_id: task.id, user_id: bob.user_id },
    )
    .await?;
    println!("✓ Alice assigned the task to {:?}", task.assigned_to);

    workspace_members::promote_member(store, workspace.id, alice.user_id, bob.user_id).await?;
    println!("✓ Bob now owns the workspace");

    let deletion = workspaces::delete_workspace(store, workspace.id, bob.user_id).await?;
    println!(
        "✓ Bob deleted the workspace ({} boards, {} tasks removed)",
        deletion.boards_deleted, deletion.tasks_deleted
    );

    Ok(())
}
