use tracing::debug;

use crate::models::{Item, TagIndex};

/// 标签索引构建器
#[derive(Debug, Default)]
pub struct TagIndexBuilder {
    items: Vec<Item>,
}

impl TagIndexBuilder {
    /// 创建新的标签索引构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加条目，条目 ID 为添加顺序
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// 按文档顺序添加标签文本，文本会去除首尾空白
    ///
    /// 只含空白的标签保留为空标签，条目仍算作有标签。
    pub fn add_tags<S: AsRef<str>>(&mut self, raw_tags: impl IntoIterator<Item = S>) {
        let tags = raw_tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_string());
        self.add_item(Item::new(tags));
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// 构建标签索引
    pub fn build(&self) -> TagIndex {
        build_index(&self.items)
    }

    /// 交出条目列表，不构建索引
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// 构建索引并交出条目列表
    pub fn finish(self) -> (TagIndex, Vec<Item>) {
        let index = self.build();
        (index, self.items)
    }
}

/// 扫描条目，建立标签到条目集合的映射
///
/// 同一条目上重复出现的标签只计一次，没有条目或没有标签时返回空索引。
pub fn build_index(items: &[Item]) -> TagIndex {
    let mut index = TagIndex::default();

    for (id, item) in items.iter().enumerate() {
        for tag in &item.tags {
            index.record_mut(tag).add_item(id);
        }
    }

    debug!(items = items.len(), tags = index.len(), "标签索引构建完成");
    index
}
