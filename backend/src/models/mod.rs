pub mod boards;
pub mod ownership;
pub mod tasks;
pub mod users;
pub mod workspace_members;
pub mod workspaces;
