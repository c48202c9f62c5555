use std::path::PathBuf;

/// 服务器配置 - 预约后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/verygood/booking | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/database/booking.db | 数据库路径, ":memory:" 为内存引擎 |
/// | CATALOG_PATH | (内置目录) | 班级/时段目录 JSON 文件 |
/// | SNAPSHOT_CHANNEL_CAPACITY | 64 | 快照广播通道容量 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/booking HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库路径 (":memory:" 使用内存引擎)
    pub database_path: Option<String>,
    /// 班级/时段目录 JSON 文件路径 (未设置时使用内置目录)
    pub catalog_path: Option<String>,
    /// 快照广播通道容量
    pub snapshot_channel_capacity: usize,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/verygood/booking".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            catalog_path: std::env::var("CATALOG_PATH").ok(),
            snapshot_channel_capacity: std::env::var("SNAPSHOT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(64),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录 ({work_dir}/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 ({work_dir}/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 解析数据库路径
    ///
    /// 未设置 DATABASE_PATH 时使用 {work_dir}/database/booking.db
    pub fn resolved_database_path(&self) -> String {
        match &self.database_path {
            Some(p) => p.clone(),
            None => self
                .database_dir()
                .join("booking.db")
                .to_string_lossy()
                .into_owned(),
        }
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_dir_structure_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.ensure_work_dir_structure().unwrap();
        assert!(config.database_dir().is_dir());
        assert!(config.log_dir().is_dir());
    }

    #[test]
    fn database_path_defaults_under_work_dir() {
        let mut config = Config::with_overrides("/tmp/booking-test", 0);
        config.database_path = None;
        assert_eq!(
            config.resolved_database_path(),
            "/tmp/booking-test/database/booking.db"
        );

        config.database_path = Some(":memory:".into());
        assert_eq!(config.resolved_database_path(), ":memory:");
    }
}
