//! 追踪器引擎
//!
//! 产出三种日志行：开始、正常结束、异常结束。每行以 `[<id>]` 开头，
//! 其后是按调用深度计算的缩进、标记符和消息；结束行还带有耗时，
//! 异常行额外带有错误描述。
//!
//! `ThreadLocalLogTrace` 是环境上下文变体：`begin` 自动读写线程槽位，
//! 调用方不需要手动传递追踪ID。

use std::fmt;
use std::time::Instant;

use crate::context;
use crate::sink::{TraceSink, TracingSink};
use crate::status::TraceStatus;
use crate::trace_id::TraceId;

const START_PREFIX: &str = "-->";
const COMPLETE_PREFIX: &str = "<--";
const EX_PREFIX: &str = "<X-";

/// 按追踪深度生成缩进
///
/// - LEVEL 0: 空串
/// - LEVEL 1: `|-->`
/// - LEVEL 2: `|   |-->`
///
/// 前 `level - 1` 个单元是 `"|   "`，最后一个单元是 `"|" + prefix`。
fn add_space(prefix: &str, level: u32) -> String {
    let mut buf = String::new();
    for i in 0..level {
        if i == level - 1 {
            buf.push('|');
            buf.push_str(prefix);
        } else {
            buf.push_str("|   ");
        }
    }
    buf
}

/// 格式化开始行
pub(crate) fn start_line(trace_id: &TraceId, message: &str) -> String {
    format!(
        "[{}] {}{}",
        trace_id.id(),
        add_space(START_PREFIX, trace_id.level()),
        message
    )
}

/// 格式化结束行（正常或异常）
pub(crate) fn complete_line(
    status: &TraceStatus,
    elapsed_ms: u128,
    error: Option<&dyn fmt::Display>,
) -> String {
    let trace_id = status.trace_id();
    match error {
        None => format!(
            "[{}] {}{} time = {}ms",
            trace_id.id(),
            add_space(COMPLETE_PREFIX, trace_id.level()),
            status.message(),
            elapsed_ms
        ),
        Some(e) => format!(
            "[{}] {}{} time = {}ms ex = {}",
            trace_id.id(),
            add_space(EX_PREFIX, trace_id.level()),
            status.message(),
            elapsed_ms,
            e
        ),
    }
}

/// 日志追踪器接口
///
/// `begin` 返回的 [`TraceStatus`] 必须被移动传入 `end` 或 `exception`
/// 恰好一次，且应对应本线程最近一次未结束的 `begin`。
/// 传入次序错乱的状态不会被检测：行内容仍取自状态值本身，
/// 但环境上下文变体的深度计数会因此错位（见各实现的文档）。
pub trait LogTrace: Send + Sync {
    /// 开始一次追踪并输出开始行
    fn begin(&self, message: &str) -> TraceStatus;

    /// 正常结束一次追踪并输出结束行
    fn end(&self, status: TraceStatus);

    /// 异常结束一次追踪并输出带错误描述的结束行
    ///
    /// 追踪器只记录错误，不改变它；错误的传播由调用方负责。
    fn exception(&self, status: TraceStatus, error: &dyn fmt::Display);
}

/// 环境上下文追踪器
///
/// 追踪ID保存在线程本地槽位中：首次 `begin` 生成新的根级ID，
/// 嵌套 `begin` 自动加深一级，`end`/`exception` 回退一级。
/// 根级追踪结束时槽位被整体清空，避免线程池复用线程时
/// 把旧事务的ID泄漏给下一个事务。
///
/// 已知风险：一次 `begin` 若永远没有对应的 `end`/`exception`，
/// 该线程的槽位会永久停留在加深后的状态。
pub struct ThreadLocalLogTrace {
    sink: Box<dyn TraceSink>,
}

impl ThreadLocalLogTrace {
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

    /// 同步线程槽位中的追踪ID
    ///
    /// - 槽位为空：生成新的根级ID
    /// - 槽位非空：派生下一级ID
    ///
    /// 写回槽位后返回本次追踪使用的ID。
    fn sync_trace_id(&self) -> TraceId {
        let trace_id = match context::current_trace_id() {
            None => TraceId::new(),
            Some(current) => current.next_level(),
        };
        context::set_current(trace_id.clone());
        trace_id
    }

    /// 释放线程槽位中的一级深度
    ///
    /// - 根级：整体清空槽位
    /// - 其余：派生上一级ID写回
    ///
    /// 槽位为空说明 `end`/`exception` 没有对应的 `begin`，
    /// 这里选择容忍：输出一条告警，不触碰槽位。
    fn release_trace_id(&self) {
        match context::current_trace_id() {
            None => {
                tracing::warn!(
                    "end/exception called with no trace in progress on this thread; \
                     ambient context left untouched"
                );
            }
            Some(current) if current.is_root_level() => context::clear_current(),
            Some(current) => context::set_current(current.previous_level()),
        }
    }

    /// 输出结束行并释放一级深度
    ///
    /// 成功和失败路径共用：两条路径都必须归还深度。
    fn complete(&self, status: TraceStatus, error: Option<&dyn fmt::Display>) {
        let elapsed_ms = status.start_time().elapsed().as_millis();
        self.sink.emit(&complete_line(&status, elapsed_ms, error));
        self.release_trace_id();
    }
}

impl LogTrace for ThreadLocalLogTrace {
    fn begin(&self, message: &str) -> TraceStatus {
        let trace_id = self.sync_trace_id();
        let start_time = Instant::now();
        self.sink.emit(&start_line(&trace_id, message));

        TraceStatus::new(trace_id, start_time, message.to_string())
    }

    fn end(&self, status: TraceStatus) {
        self.complete(status, None);
    }

    fn exception(&self, status: TraceStatus, error: &dyn fmt::Display) {
        self.complete(status, Some(error));
    }
}

impl Default for ThreadLocalLogTrace {
    fn default() -> Self {
        Self::new()
    }
}
