//! VeryGood Booking Server
//!
//! Backend for the chocolate shop's marketing pages: the kids baking
//! class reservation form, the supporters giveaway form and the admin
//! dashboard.
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── catalog/       # 班级/时段目录与容量策略
//! ├── booking/       # 时段统计 (tally) 与提交准入 (guard)
//! ├── supporters/    # 体验团申请
//! ├── db/            # 存储层 (SurrealDB + 内存实现)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志
//! ```
//!
//! Change propagation is push-based: every mutation of the reservation
//! collection re-reads the full record set and broadcasts it as a
//! snapshot; the availability service folds each snapshot into a fresh
//! slot tally.

pub mod api;
pub mod booking;
pub mod catalog;
pub mod core;
pub mod db;
pub mod supporters;
pub mod utils;

// Re-export 公共类型
pub use booking::{AvailabilityService, ReservationService, SlotTally, SubmissionError};
pub use catalog::ClassCatalog;
pub use core::{Config, Server, ServerState};
pub use db::{MemoryReservationStore, ReservationStore, SnapshotSubscription};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
 _   __                  _____                 __
| | / /__ ______ __ __  / ___/__  ___  ___ __/ /
| |/ / -_) __/ // // /_/ (_ / _ \/ _ \/ _ `/ _ \
|___/\__/_/  \_, //_(_)\___/\___/\___/\_,_/\___/
            /___/        booking server
    "#
    );
}
