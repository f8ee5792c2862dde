use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// 条目在文档中的位置，作为条目标识
pub type ItemId = usize;

/// 页面中的一个可筛选条目（经历、时间线事件等）
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    /// 按文档顺序排列的标签文本，可能有重复
    pub tags: Vec<String>,
}

impl Item {
    pub fn new<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_tag(&self, label: &str) -> bool {
        self.tags.iter().any(|tag| tag == label)
    }

    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }
}

/// 单个标签的统计记录
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TagRecord {
    /// 标签文本
    pub label: String,
    /// 拥有该标签的条目数
    pub count: usize,
    /// 拥有该标签的条目
    pub items: BTreeSet<ItemId>,
}

impl TagRecord {
    fn new(label: String) -> Self {
        Self {
            label,
            count: 0,
            items: BTreeSet::new(),
        }
    }

    /// 记录一个拥有该标签的条目，同一条目只计一次
    pub(crate) fn add_item(&mut self, item: ItemId) {
        if self.items.insert(item) {
            self.count += 1;
        }
    }
}

/// 标签索引: 标签文本 -> 标签记录
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TagIndex {
    records: HashMap<String, TagRecord>,
}

impl TagIndex {
    pub(crate) fn record_mut(&mut self, label: &str) -> &mut TagRecord {
        self.records
            .entry(label.to_string())
            .or_insert_with(|| TagRecord::new(label.to_string()))
    }

    pub fn get(&self, label: &str) -> Option<&TagRecord> {
        self.records.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.records.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &TagRecord> {
        self.records.values()
    }

    /// 按数量降序排列，数量相同时按标签字母序（不区分大小写）
    pub fn sorted(&self) -> Vec<&TagRecord> {
        let mut records: Vec<&TagRecord> = self.records.values().collect();
        records.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
                .then_with(|| a.label.cmp(&b.label))
        });
        records
    }
}

/// 选中标签的匹配方式
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelectionMode {
    /// 至少包含其中一个
    #[default]
    Any,
    /// 必须全部包含
    Must,
    /// 不能包含
    None,
}

impl SelectionMode {
    /// 循环顺序: ANY → MUST → NONE → ANY
    pub fn next(self) -> Self {
        match self {
            SelectionMode::Any => SelectionMode::Must,
            SelectionMode::Must => SelectionMode::None,
            SelectionMode::None => SelectionMode::Any,
        }
    }

    /// 模式按钮上显示的文本
    pub fn label(self) -> &'static str {
        match self {
            SelectionMode::Any => "ANY",
            SelectionMode::Must => "MUST",
            SelectionMode::None => "NONE",
        }
    }

    /// 模式按钮的附加样式类，ANY 使用默认样式
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            SelectionMode::Any => None,
            SelectionMode::Must => Some("must-mode"),
            SelectionMode::None => Some("none-mode"),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 当前的筛选状态
///
/// 选中集合就是 `modes` 的键集合，取消选中时模式一并删除。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    modes: BTreeMap<String, SelectionMode>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 选中标签，已选中时保留原有模式
    pub fn select(&mut self, tag: &str) {
        self.modes
            .entry(tag.to_string())
            .or_insert(SelectionMode::Any);
    }

    /// 取消选中，返回标签之前是否被选中
    pub fn deselect(&mut self, tag: &str) -> bool {
        self.modes.remove(tag).is_some()
    }

    /// 切换已选中标签的模式，返回新模式
    pub fn cycle_mode(&mut self, tag: &str) -> Result<SelectionMode, FilterError> {
        let mode = self
            .modes
            .get_mut(tag)
            .ok_or_else(|| FilterError::NotSelected(tag.to_string()))?;
        *mode = mode.next();
        Ok(*mode)
    }

    pub fn clear(&mut self) {
        self.modes.clear();
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.modes.contains_key(tag)
    }

    pub fn mode_of(&self, tag: &str) -> Option<SelectionMode> {
        self.modes.get(tag).copied()
    }

    /// 选中的标签及其模式，按标签排序
    pub fn selections(&self) -> impl Iterator<Item = (&str, SelectionMode)> {
        self.modes.iter().map(|(tag, mode)| (tag.as_str(), *mode))
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("正则表达式无效"));

/// 筛选面板中的一行
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    /// 标签文本
    pub label: String,
    /// 条目数
    pub count: usize,
    /// 复选框的元素 ID
    pub control_id: String,
}

impl TagRow {
    pub fn from_record(record: &TagRecord) -> Self {
        Self {
            label: record.label.clone(),
            count: record.count,
            control_id: control_id(&record.label),
        }
    }
}

/// 标签复选框的元素 ID: 空白替换为 `-` 并转小写
pub fn control_id(label: &str) -> String {
    format!("tag-{}", WHITESPACE.replace_all(label, "-").to_lowercase())
}
