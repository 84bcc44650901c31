pub mod repo;

pub use repo::{log_lines, GitRepo, LogFormat, LogRange};
