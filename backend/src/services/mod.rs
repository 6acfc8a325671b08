pub mod boards;
pub mod cookies;
pub mod jwt;
pub mod ownership;
pub mod reconcile;
pub mod tasks;
pub mod users;
pub mod workspace_members;
pub mod workspaces;
