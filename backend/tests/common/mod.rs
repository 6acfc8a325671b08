#![allow(dead_code)]

pub mod helpers;
pub mod store;

pub use helpers::{
    accept_invite, create_board, create_invite, create_task, create_workspace, generate_test_email,
    generate_workspace_name, register_user, test_config, STRONG_PASSWORD,
};
pub use store::{FailingStore, TestStore};
pub use test_app::TestApp;
