use thiserror::Error;

/// 筛选命令的错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// 对未选中的标签切换模式
    #[error("标签 '{0}' 未被选中，无法切换模式")]
    NotSelected(String),

    /// 索引中不存在的标签
    #[error("索引中不存在标签 '{0}'")]
    UnknownTag(String),
}
