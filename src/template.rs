//! 模板回调：用一份模板消除每个调用点重复的追踪样板
//!
//! 调用方只提供业务逻辑和一条消息，begin / end / exception
//! 的配对由模板统一完成。

use std::fmt;
use std::sync::Arc;

use crate::tracer::LogTrace;

/// 被追踪的业务逻辑单元
///
/// 闭包形态（`FnOnce() -> Result<T, E>`）通过覆盖实现自动满足本 trait；
/// 需要命名类型（携带状态、复用逻辑）时也可以手动实现。
/// 两种形态的追踪行为完全一致。
pub trait TraceCallback<T, E> {
    /// 执行业务逻辑
    fn call(self) -> Result<T, E>;
}

impl<T, E, F> TraceCallback<T, E> for F
where
    F: FnOnce() -> Result<T, E>,
{
    fn call(self) -> Result<T, E> {
        self()
    }
}

/// 追踪模板
///
/// 持有一个共享的追踪器，`execute` 负责 begin → 业务逻辑 → end 的
/// 完整流程；业务逻辑失败时改走 exception 路径，然后把同一个错误
/// 原样返回给调用方。模板从不吞掉、包装或转换业务错误。
pub struct TraceTemplate {
    trace: Arc<dyn LogTrace>,
}

impl TraceTemplate {
    /// 创建模板
    ///
    /// # 参数
    /// * `trace` - 共享的追踪器，通常整个进程注入同一个实例
    pub fn new(trace: Arc<dyn LogTrace>) -> Self {
        Self { trace }
    }

    /// 在追踪包裹下执行一个业务逻辑单元
    ///
    /// 成功与失败两条路径都会结束追踪，深度计数在任一路径上
    /// 都被正确归还。
    ///
    /// # 参数
    /// * `message` - 可读的操作名，如 `"OrderService.order_item()"`
    /// * `callback` - 业务逻辑
    ///
    /// # 返回
    /// 业务逻辑自身的结果，原样透传
    pub fn execute<T, E, C>(&self, message: &str, callback: C) -> Result<T, E>
    where
        C: TraceCallback<T, E>,
        E: fmt::Display,
    {
        let status = self.trace.begin(message);

        match callback.call() {
            Ok(value) => {
                self.trace.end(status);
                Ok(value)
            }
            Err(e) => {
                self.trace.exception(status, &e);
                Err(e)
            }
        }
    }
}

impl Clone for TraceTemplate {
    fn clone(&self) -> Self {
        Self {
            trace: Arc::clone(&self.trace),
        }
    }
}
