//! Storefront Server - 电商目录与后台管理服务端
//!
//! # 架构概述
//!
//! 本模块是 Storefront Server 的主入口，提供以下核心功能：
//!
//! - **目录存储** (`db`): 嵌入式 SurrealDB 文档存储，商品/系列/评论/博客/横幅/留言
//! - **媒体管道** (`media`): multipart 上传、按类型分目录落盘、文件名引用
//! - **查询层** (`api/products`): 过滤、排序、分页、评分聚合
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── media/         # 媒体上传管道
//! ├── utils/         # 错误、日志、slug 工具
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod media;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use media::{MediaKind, MediaStore};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在任何 tracing 调用之前执行
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}
