use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::booking::{AvailabilityService, ReservationService};
use crate::catalog::ClassCatalog;
use crate::core::Config;
use crate::db::{DbService, ReservationStore, SurrealReservationStore};
use crate::supporters::SupporterService;
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | catalog | Arc<ClassCatalog> | 班级/时段目录与容量策略 |
/// | store | Arc<dyn ReservationStore> | 预约存储边界 |
/// | availability | AvailabilityService | 时段余量缓存 |
/// | reservations | ReservationService | 预约提交与管理 |
/// | supporters | SupporterService | 体验团申请 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 班级/时段目录
    pub catalog: Arc<ClassCatalog>,
    /// 预约存储 (注入边界，测试时替换为内存实现)
    pub store: Arc<dyn ReservationStore>,
    /// 时段余量缓存
    pub availability: AvailabilityService,
    /// 预约服务
    pub reservations: ReservationService,
    /// 体验团服务
    pub supporters: SupporterService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (DATABASE_PATH, 默认 work_dir/database/booking.db)
    /// 3. 班级目录 (CATALOG_PATH, 未设置时使用内置目录)
    /// 4. 各服务 (Store, Availability, Reservation, Supporter)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.resolved_database_path();
        let db_service = DbService::new(&db_path).await?;
        let db = db_service.db;

        let catalog = Arc::new(match &config.catalog_path {
            Some(path) => ClassCatalog::from_json_file(path)
                .map_err(|e| AppError::internal(format!("Failed to load catalog: {e}")))?,
            None => ClassCatalog::default(),
        });
        tracing::info!(
            classes = catalog.classes.len(),
            overrides = catalog.capacity_overrides.len(),
            "Class catalog loaded"
        );

        let store: Arc<dyn ReservationStore> = Arc::new(SurrealReservationStore::new(
            db.clone(),
            config.snapshot_channel_capacity,
        ));
        let availability = AvailabilityService::new(catalog.clone());
        let reservations =
            ReservationService::new(store.clone(), catalog.clone(), availability.clone());
        let supporters = SupporterService::new(db.clone());

        Ok(Self {
            config: config.clone(),
            db,
            catalog,
            store,
            availability,
            reservations,
            supporters,
        })
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用
    ///
    /// 启动的任务：
    /// - 快照订阅循环 (AvailabilityService)
    pub async fn start_background_tasks(&self) -> AppResult<()> {
        self.availability
            .start(&self.store)
            .await
            .map_err(|e| AppError::database(format!("Failed to subscribe to store: {e}")))?;
        Ok(())
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
