//! 显式传递追踪器
//!
//! 环境上下文变体的前身：没有任何环境状态，父调用必须从
//! [`TraceStatus`] 中取出 `TraceId` 手动传给子调用。
//! 在环境传播不适用的边界（比如追踪ID被跨边界递交过来）仍然有用。

use std::fmt;
use std::time::Instant;

use crate::sink::{TraceSink, TracingSink};
use crate::status::TraceStatus;
use crate::tracer::{complete_line, start_line};
use crate::trace_id::TraceId;

/// 显式传递追踪器
///
/// 输出格式与 [`ThreadLocalLogTrace`](crate::ThreadLocalLogTrace)
/// 完全一致，区别只在追踪ID的来源：`begin` 总是开启新的根级事务，
/// 嵌套调用通过 [`begin_child`](Self::begin_child) 从父ID派生。
pub struct ManualLogTrace {
    sink: Box<dyn TraceSink>,
}

impl ManualLogTrace {
    /// 创建追踪器，日志行经由 `tracing` 门面输出
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// 创建追踪器并注入自定义输出端
    pub fn with_sink<S: TraceSink + 'static>(sink: S) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// 开启新的根级追踪
    pub fn begin(&self, message: &str) -> TraceStatus {
        self.begin_trace(TraceId::new(), message)
    }

    /// 从父追踪ID派生，开启深一级的追踪
    ///
    /// # 参数
    /// * `parent` - 父调用的追踪ID，取自父调用 `begin` 返回的状态
    /// * `message` - 日志消息
    pub fn begin_child(&self, parent: &TraceId, message: &str) -> TraceStatus {
        self.begin_trace(parent.next_level(), message)
    }

    fn begin_trace(&self, trace_id: TraceId, message: &str) -> TraceStatus {
        let start_time = Instant::now();
        self.sink.emit(&start_line(&trace_id, message));

        TraceStatus::new(trace_id, start_time, message.to_string())
    }

    /// 正常结束一次追踪
    pub fn end(&self, status: TraceStatus) {
        self.complete(status, None);
    }

    /// 异常结束一次追踪
    pub fn exception(&self, status: TraceStatus, error: &dyn fmt::Display) {
        self.complete(status, Some(error));
    }

    fn complete(&self, status: TraceStatus, error: Option<&dyn fmt::Display>) {
        let elapsed_ms = status.start_time().elapsed().as_millis();
        self.sink.emit(&complete_line(&status, elapsed_ms, error));
    }
}

impl Default for ManualLogTrace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_begin_child_derives_from_parent() {
        let sink = MemorySink::new();
        let trace = ManualLogTrace::with_sink(sink.clone());

        let status1 = trace.begin("hello");
        let status2 = trace.begin_child(status1.trace_id(), "world");

        // 子追踪与父追踪共享事务标识，深度加一
        assert_eq!(status2.trace_id().id(), status1.trace_id().id());
        assert_eq!(status2.trace_id().level(), 1);

        trace.end(status2);
        trace.end(status1);

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("] |-->world"));
        assert!(lines[2].contains("] |<--world time = "));
    }

    #[test]
    fn test_separate_begins_get_separate_identities() {
        let sink = MemorySink::new();
        let trace = ManualLogTrace::with_sink(sink.clone());

        // 不经过 begin_child 的两次 begin 是两个独立事务
        let status1 = trace.begin("first");
        let status2 = trace.begin("second");
        assert_ne!(status1.trace_id().id(), status2.trace_id().id());

        trace.end(status2);
        trace.end(status1);
    }

    #[test]
    fn test_exception_line_contains_error_text() {
        let sink = MemorySink::new();
        let trace = ManualLogTrace::with_sink(sink.clone());

        let status = trace.begin("hello");
        trace.exception(status, &"item not found");

        let lines = sink.lines();
        assert!(!lines[1].contains('|'), "根级异常行不应有缩进");
        assert!(
            lines[1].ends_with("ex = item not found"),
            "异常行应以错误描述结尾: {}",
            lines[1]
        );
    }
}
