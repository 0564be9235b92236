//! 进行中追踪的状态记录

use std::time::Instant;

use crate::trace_id::TraceId;

/// 追踪状态
///
/// `begin` 返回的不可变凭据，记录了追踪ID、开始时间和日志消息。
/// 每个已开始、未结束的调用恰好对应一个 `TraceStatus`；
/// 它必须被移动传入 `end` 或 `exception` 恰好一次，所有权语义
/// 保证它不会被重复结束。
#[derive(Debug)]
pub struct TraceStatus {
    trace_id: TraceId,
    start_time: Instant,
    message: String,
}

impl TraceStatus {
    pub(crate) fn new(trace_id: TraceId, start_time: Instant, message: String) -> Self {
        Self {
            trace_id,
            start_time,
            message,
        }
    }

    /// 获取本次追踪的追踪ID
    ///
    /// 显式传递模式下，调用方从这里取出 `TraceId` 传给嵌套调用。
    #[inline]
    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    /// 获取开始时间
    #[inline]
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// 获取日志消息
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessors() {
        let trace_id = TraceId::from_parts("0af76519", 1);
        let start = Instant::now();
        let status = TraceStatus::new(trace_id.clone(), start, "OrderService.order_item()".to_string());

        assert_eq!(status.trace_id(), &trace_id);
        assert_eq!(status.start_time(), start);
        assert_eq!(status.message(), "OrderService.order_item()");
    }
}
