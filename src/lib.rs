//! Academy Scheduler - 课程排课与复制引擎
//!
//! 基于 Actix Web 构建的排课服务：课次时间冲突检查、按每周课表批量生成课次、
//! 整门课程（课次与教学内容）复制，以及基于角色优先级的授权。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 操作者识别中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（排课、复制、授权）
//! - `storage`: 数据存储层（SeaORM / 内存）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
