//! 调用深度感知的执行追踪模块
//!
//! 为嵌套方法调用记录开始、正常结束和异常结束三种日志行，
//! 每行携带共享的事务标识、与嵌套深度成比例的缩进以及耗时。
//! 环境上下文变体通过线程本地槽位传播追踪ID，业务代码不需要
//! 手动在调用链上传递任何参数。
//!
//! ## Usage
//!
//! ### 基础用法：环境上下文追踪
//! ```
//! use log_trace::{LogTrace, ThreadLocalLogTrace};
//!
//! let trace = ThreadLocalLogTrace::new();
//!
//! let status1 = trace.begin("OrderController.request()");
//! let status2 = trace.begin("OrderService.order_item()");
//! // [b7ad6b71] OrderController.request()
//! // [b7ad6b71] |-->OrderService.order_item()
//!
//! trace.end(status2);
//! trace.end(status1);
//! // [b7ad6b71] |<--OrderService.order_item() time = 0ms
//! // [b7ad6b71] OrderController.request() time = 0ms
//! ```
//!
//! ### 模板回调：追踪样板只写一次
//! ```
//! use std::sync::Arc;
//! use log_trace::{ThreadLocalLogTrace, TraceTemplate};
//!
//! let template = TraceTemplate::new(Arc::new(ThreadLocalLogTrace::new()));
//!
//! let result: Result<String, String> = template.execute("OrderService.order_item()", || {
//!     // 业务逻辑；失败时错误会被记录后原样返回
//!     Ok("ok".to_string())
//! });
//! assert_eq!(result, Ok("ok".to_string()));
//! ```
//!
//! ### 显式传递：跨边界手动递交追踪ID
//! ```
//! use log_trace::ManualLogTrace;
//!
//! let trace = ManualLogTrace::new();
//!
//! let status1 = trace.begin("OrderController.request()");
//! let status2 = trace.begin_child(status1.trace_id(), "OrderService.order_item()");
//!
//! trace.end(status2);
//! trace.end(status1);
//! ```

mod context;
mod manual;
mod sink;
mod status;
mod template;
mod trace_id;
mod tracer;

pub use context::current_trace_id;
pub use manual::ManualLogTrace;
pub use sink::{MemorySink, TraceSink, TracingSink};
pub use status::TraceStatus;
pub use template::{TraceCallback, TraceTemplate};
pub use trace_id::TraceId;
pub use tracer::{LogTrace, ThreadLocalLogTrace};
