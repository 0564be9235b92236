//! 追踪ID上下文管理
//!
//! 使用 `std::thread_local` 为每个工作线程维护一个独立的追踪ID槽位。
//! 槽位不跨线程共享，因此读写无需任何锁。

use std::cell::RefCell;

use crate::trace_id::TraceId;

// 每个线程独立持有当前的trace_id，空槽表示该线程上没有进行中的追踪
thread_local! {
    static CURRENT_TRACE_ID: RefCell<Option<TraceId>> = const { RefCell::new(None) };
}

/// 获取当前线程的追踪ID
///
/// 返回槽位中追踪ID的克隆；当前线程没有进行中的追踪时返回 `None`。
/// 这是唯一对外暴露的读取入口，槽位的写入只允许追踪器自己进行。
///
/// # 返回
/// 当前线程的追踪ID，或 `None`
pub fn current_trace_id() -> Option<TraceId> {
    CURRENT_TRACE_ID.with(|slot| slot.borrow().clone())
}

/// 写入当前线程的追踪ID槽位
pub(crate) fn set_current(trace_id: TraceId) {
    CURRENT_TRACE_ID.with(|slot| *slot.borrow_mut() = Some(trace_id));
}

/// 清空当前线程的追踪ID槽位
///
/// 根级追踪结束时必须整体移除槽位值，而不是留下一个深度为0的ID。
/// 线程池会复用线程，残留的ID会泄漏到下一个不相关的事务中。
pub(crate) fn clear_current() {
    CURRENT_TRACE_ID.with(|slot| *slot.borrow_mut() = None);
}
