//! 日志输出端
//!
//! 追踪器只负责产出格式化好的日志行，行的去向由注入的 `TraceSink` 决定。
//! 默认通过 `tracing` 门面输出；测试用 `MemorySink` 收集行内容做断言。

use std::sync::{Arc, Mutex};

/// 追踪日志的输出端
///
/// 实现方接收一条已格式化完成的日志行。输出被视为同步的
/// fire-and-forget 副作用，不允许失败传播回追踪器。
pub trait TraceSink: Send + Sync {
    /// 输出一条日志行
    fn emit(&self, line: &str);
}

/// 默认输出端：转发到 `tracing` 门面
///
/// 每条追踪日志行以 `info` 级别发出，具体落地（控制台、文件、
/// 结构化收集器）由进程安装的 subscriber 决定。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!("{line}");
    }
}

/// 内存输出端
///
/// 把所有日志行按顺序收集到内存中，克隆共享同一份缓冲区。
/// 用于测试中对行内容和顺序做精确断言。
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// 创建一个空的内存输出端
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取目前收集到的所有日志行的快照
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("MemorySink lock poisoned").clone()
    }

    /// 清空已收集的日志行
    pub fn clear(&self) {
        self.lines.lock().expect("MemorySink lock poisoned").clear();
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .expect("MemorySink lock poisoned")
            .push(line.to_string());
    }
}
