// ==========================================
// 入库追踪系统 - 审计日志异步写入器
// ==========================================
// 职责: 接收业务操作产生的审计条目, 由独立任务顺序写盘
// 红线: 调用方不等待、不因审计失败而失败
// 约束: 写入仍经过审计集合锁 (经由 AuditWriter)
// ==========================================

use crate::domain::{AuditAction, AuditLog};
use crate::repository::audit_log_repo::AuditLogRepository;
use crate::repository::error::RepositoryResult;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// 默认队列容量
pub const DEFAULT_AUDIT_QUEUE_CAPACITY: usize = 256;

// ==========================================
// AuditWriter - 审计写入 Trait
// ==========================================

/// 审计条目的持久化出口
///
/// 生产环境由 `AuditLogRepository` 实现; 测试可注入失败的实现
pub trait AuditWriter: Send + Sync {
    fn write(&self, entry: AuditLog) -> RepositoryResult<()>;
}

impl AuditWriter for AuditLogRepository {
    fn write(&self, entry: AuditLog) -> RepositoryResult<()> {
        self.append(entry)?;
        Ok(())
    }
}

enum SinkMessage {
    Entry(AuditLog),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

// ==========================================
// AuditSink - 审计写入器句柄
// ==========================================
#[derive(Clone)]
pub struct AuditSink {
    tx: mpsc::Sender<SinkMessage>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AuditSink {
    /// 启动写入任务
    ///
    /// 必须在 tokio 运行时内调用
    pub fn spawn(writer: Arc<dyn AuditWriter>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(writer, rx));
        tracing::info!(capacity, "审计写入任务已启动");

        Self {
            tx,
            worker: Arc::new(Mutex::new(Some(handle))),
        }
    }

    /// 记录审计条目 (不阻塞, 不返回错误)
    ///
    /// 队列已满或写入任务已停止时丢弃条目并告警
    pub fn log(&self, user: &str, action: &str, details: Option<String>) {
        let entry = AuditLog::new(user, action, details);
        match self.tx.try_send(SinkMessage::Entry(entry)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(user, action, "审计队列已满, 条目被丢弃");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!(user, action, "审计写入任务已停止, 条目被丢弃");
            }
        }
    }

    /// 按操作类型记录
    pub fn log_action(&self, user: &str, action: AuditAction, details: Option<String>) {
        self.log(user, action.as_str(), details)
    }

    /// 等待此前入队的条目全部处理完毕
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(SinkMessage::Flush(done_tx)).await.is_err() {
            tracing::warn!("审计写入任务已停止, flush 跳过");
            return;
        }
        let _ = done_rx.await;
    }

    /// 处理完已入队条目后停止写入任务
    pub async fn shutdown(&self) {
        if self.tx.send(SinkMessage::Shutdown).await.is_err() {
            tracing::debug!("审计写入任务已停止");
        }

        let handle = match self.worker.lock() {
            Ok(mut guard) => guard.take(),
            Err(e) => {
                tracing::error!("审计写入任务句柄锁获取失败: {}", e);
                None
            }
        };

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!("审计写入任务异常退出: {}", e);
            }
            tracing::info!("审计写入任务已停止");
        }
    }
}

async fn run_worker(writer: Arc<dyn AuditWriter>, mut rx: mpsc::Receiver<SinkMessage>) {
    while let Some(message) = rx.recv().await {
        match message {
            SinkMessage::Entry(entry) => {
                let action = entry.action.clone();
                let writer = writer.clone();
                match tokio::task::spawn_blocking(move || writer.write(entry)).await {
                    Ok(Ok(())) => tracing::debug!(action = %action, "审计条目已写入"),
                    Ok(Err(e)) => tracing::error!(action = %action, "审计条目写入失败: {}", e),
                    Err(e) => tracing::error!(action = %action, "审计写入线程异常: {}", e),
                }
            }
            SinkMessage::Flush(done) => {
                let _ = done.send(());
            }
            SinkMessage::Shutdown => break,
        }
    }
}
