// 日志工具模块
//
// 按 `[log]` 配置段启动 flexi_logger 文件日志，并保存句柄以便退出前 flush

use crate::config::{Config, LogConfig};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use parking_lot::Mutex;

/// 全局日志句柄
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = parking_lot::const_mutex(None);

/// 初始化日志系统
///
/// 重复初始化时保留已有的日志句柄，直接返回成功
///
/// # Arguments
/// * `config` - 应用配置，使用其中的 `[log]` 配置段
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut guard = LOGGER_HANDLE.lock();
    if guard.is_some() {
        return Ok(());
    }

    let handle = build_logger(&config.log)?.start()?;
    *guard = Some(handle);
    drop(guard);

    log::info!(
        "日志系统初始化完成: {}/{} (级别 {}, 数据块裁剪 {})",
        config.log.dir,
        config.log.file,
        config.log.level,
        if config.optimizer.enable_chunk_pruning { "启用" } else { "禁用" }
    );
    Ok(())
}

fn build_logger(log_config: &LogConfig) -> Result<Logger, flexi_logger::FlexiLoggerError> {
    Ok(Logger::try_with_str(&log_config.level)?
        .log_to_file(
            FileSpec::default()
                .basename(&log_config.file)
                .directory(&log_config.dir),
        )
        .rotate(
            Criterion::Size(log_config.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(log_config.max_files),
        )
        .write_mode(WriteMode::Async)
        .append())
}

/// 调整运行中的日志级别，例如临时打开 `trace` 观察裁剪规则的备忘录命中
pub fn set_level(spec: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut guard = LOGGER_HANDLE.lock();
    match guard.as_mut() {
        Some(handle) => {
            handle.parse_new_spec(spec)?;
            Ok(())
        }
        None => Err("日志系统尚未初始化".into()),
    }
}

/// 刷新并关闭日志系统
pub fn shutdown() {
    if let Some(handle) = LOGGER_HANDLE.lock().take() {
        handle.flush();
    }
}

pub fn is_initialized() -> bool {
    LOGGER_HANDLE.lock().is_some()
}
