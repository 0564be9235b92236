//! TraceId 核心结构体定义

use std::fmt;

/// 追踪ID结构体
///
/// 一个逻辑事务的标识（`id`）加上当前调用深度（`level`）。
/// `id` 在事务内所有嵌套调用之间保持不变，只有 `level` 随派生变化。
///
/// 不可变值类型：所有"修改"都返回一个新的 `TraceId`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId {
    id: String,
    level: u32,
}

impl TraceId {
    /// 生成新的根级追踪ID
    ///
    /// 从128位随机数中截取前8个小写十六进制字符作为事务标识，
    /// 对于日志场景的事务量来说碰撞概率可以忽略不计。
    ///
    /// # 返回
    /// `level == 0` 的新追踪ID
    #[inline]
    pub fn new() -> Self {
        Self {
            id: Self::create_id(),
            level: 0,
        }
    }

    /// 生成8字符的小写十六进制事务标识
    #[inline]
    fn create_id() -> String {
        let raw = fastrand::u128(..);
        let mut id = format!("{raw:032x}");
        id.truncate(8);
        id
    }

    /// 派生下一级（更深一层）的追踪ID
    ///
    /// # 返回
    /// `id` 相同、`level + 1` 的新追踪ID
    #[inline]
    pub fn next_level(&self) -> Self {
        Self {
            id: self.id.clone(),
            level: self.level + 1,
        }
    }

    /// 派生上一级（浅一层）的追踪ID
    ///
    /// 只应在 `level >= 1` 时调用。在根级上调用属于使用错误：
    /// debug 构建会触发断言，release 构建会饱和为 0（结果没有意义，
    /// 仅避免回绕）。
    ///
    /// # 返回
    /// `id` 相同、`level - 1` 的新追踪ID
    #[inline]
    pub fn previous_level(&self) -> Self {
        debug_assert!(self.level > 0, "previous_level called on a root TraceId");
        Self {
            id: self.id.clone(),
            level: self.level.saturating_sub(1),
        }
    }

    /// 当前是否为根级（`level == 0`）
    #[inline]
    pub fn is_root_level(&self) -> bool {
        self.level == 0
    }

    /// 获取事务标识字符串
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 获取当前调用深度
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// 从已有标识和深度构造追踪ID
    ///
    /// 仅用于测试，不进行格式验证。
    #[cfg(test)]
    pub(crate) fn from_parts(id: &str, level: u32) -> Self {
        Self {
            id: id.to_string(),
            level,
        }
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_id_creation() {
        let trace_id = TraceId::new();

        // 验证标识长度：必须是 8 个字符
        assert_eq!(trace_id.id().len(), 8);

        // 验证只包含小写十六进制字符
        assert!(trace_id
            .id()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && (c.is_ascii_digit() || c.is_ascii_lowercase())));

        // 新建的追踪ID必须处于根级
        assert_eq!(trace_id.level(), 0);
        assert!(trace_id.is_root_level());
    }

    #[test]
    fn test_next_level_keeps_identity() {
        let root = TraceId::new();
        let child = root.next_level();

        assert_eq!(child.id(), root.id(), "派生不应改变事务标识");
        assert_eq!(child.level(), 1);
        assert!(!child.is_root_level());
    }

    #[test]
    fn test_next_previous_round_trip() {
        let root = TraceId::new();
        let round_trip = root.next_level().previous_level();

        // next 之后 previous 应还原为等价的追踪ID
        assert_eq!(round_trip, root);
    }

    #[test]
    fn test_deep_nesting_levels() {
        let mut current = TraceId::from_parts("0af76519", 0);
        for expected in 1..=5 {
            current = current.next_level();
            assert_eq!(current.level(), expected);
            assert_eq!(current.id(), "0af76519");
        }
    }

    #[test]
    fn test_trace_id_display() {
        let trace_id = TraceId::from_parts("0af76519", 2);
        assert_eq!(format!("{}", trace_id), "0af76519");
    }

    #[test]
    fn test_trace_id_uniqueness() {
        // 测试生成的标识的唯一性
        let mut ids = std::collections::HashSet::new();
        for _ in 0..1000 {
            let trace_id = TraceId::new();
            assert!(
                ids.insert(trace_id.id().to_string()),
                "Generated duplicate trace ID"
            );
        }
    }

    #[test]
    fn test_additional_impls() {
        // 测试 Default trait
        let default_id = TraceId::default();
        assert_eq!(default_id.id().len(), 8);
        assert!(default_id.is_root_level());

        // 测试 Clone 和 PartialEq traits
        let id1 = TraceId::new();
        let id2 = id1.clone();
        let id3 = TraceId::new();
        assert_eq!(id1, id2, "Cloned ID should be equal to the original");
        assert_ne!(id1, id3, "Different IDs should not be equal");
    }
}
