//! splitcut CLI library
//!
//! 共通ワークフロー（splitcut-common）のネイティブ実行環境

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod markers;
pub mod workflow;
