// ==========================================
// 入库追踪系统 - 主入口
// ==========================================
// 职责: 打开默认数据目录, 输出批次与完成状态
// 界面层作为独立协作方, 通过库接口接入
// ==========================================

use anyhow::{anyhow, Context};
use inbound_tracker::app::{get_default_data_dir, AppState};
use inbound_tracker::logging;

const LOG_FORMAT_ENV: &str = "INBOUND_TRACKER_LOG_FORMAT";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统 (INBOUND_TRACKER_LOG_FORMAT=json 输出 JSON)
    match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    tracing::info!("==================================================");
    tracing::info!("{}", inbound_tracker::APP_NAME);
    tracing::info!("系统版本: {}", inbound_tracker::VERSION);
    tracing::info!("==================================================");

    let data_dir = get_default_data_dir();
    tracing::info!("使用数据目录: {}", data_dir.display());

    let state = AppState::open(&data_dir).map_err(|e| anyhow!(e))?;

    // 文件读取放到阻塞线程池
    let batch_api = state.batch_api.clone();
    let (batches, status) = tokio::task::spawn_blocking(move || {
        let batches = batch_api.list_batches().context("读取批次失败")?;
        let status = batch_api.completion_map().context("计算完成状态失败")?;
        Ok::<_, anyhow::Error>((batches, status))
    })
    .await
    .context("读取任务异常退出")??;

    if batches.is_empty() {
        tracing::info!("暂无批次");
    }
    for batch in &batches {
        let complete = status.get(&batch.date).copied().unwrap_or(true);
        tracing::info!(
            date = %batch.date,
            skus = batch.skus.len(),
            complete,
            "批次"
        );
    }

    state.shutdown().await;
    tracing::info!("已退出");
    Ok(())
}
