use std::path::PathBuf;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::media::MediaStore;

/// 服务器状态 - 持有所有共享服务的引用
///
/// ServerState 是目录服务的核心数据结构，使用 Clone 浅拷贝
/// 注入到每个请求处理器。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | media | MediaStore | 媒体文件存储 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 媒体文件存储
    pub media: MediaStore,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: Surreal<Db>, media: MediaStore) -> Self {
        Self { config, db, media }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/, uploads/)
    /// 2. 数据库 (work_dir/database/catalog.db)
    /// 3. 媒体存储 (work_dir/uploads)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("catalog.db");
        let db_service = DbService::open(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let media = MediaStore::new(config.uploads_dir());

        Self::new(config.clone(), db_service.db, media)
    }

    /// 初始化服务器状态 (内存数据库)
    ///
    /// 用于集成测试：数据不落盘，媒体目录仍指向 work_dir/uploads
    pub async fn initialize_in_memory(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_service = DbService::open_memory()
            .await
            .expect("Failed to initialize in-memory database");

        let media = MediaStore::new(config.uploads_dir());

        Self::new(config.clone(), db_service.db, media)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}
