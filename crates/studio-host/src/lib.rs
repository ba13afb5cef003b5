//! StudioDesk host: configuration, logging, dependency wiring and the
//! commands the UI shell invokes.
//!
//! StudioDesk 宿主层：配置、日志、依赖装配与界面命令。

pub mod bootstrap;
pub mod commands;
