//! 筛选面板控制器
//!
//! `FilterPanel` 持有标签索引、筛选状态和面板状态，把用户操作转换为状态变更，
//! 再通过 [`PanelView`] 同步到界面。界面实现可以是 DOM，也可以是测试用的记录器。

use tracing::{debug, warn};

use crate::builder::build_index;
use crate::error::FilterError;
use crate::evaluator::compute_visibility;
use crate::models::{FilterState, Item, SelectionMode, TagIndex, TagRow};

/// 模式按钮的显示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeControl {
    /// 隐藏，并恢复为 ANY 和默认样式
    Hidden,
    /// 显示当前模式
    Shown(SelectionMode),
}

/// 筛选面板的显示层
pub trait PanelView {
    /// 按给定顺序重建标签列表
    fn render_rows(&mut self, rows: &[TagRow]);

    /// 设置某行复选框的勾选状态
    fn set_checked(&mut self, label: &str, checked: bool);

    /// 更新某行的模式按钮
    fn set_mode_control(&mut self, label: &str, control: ModeControl);

    /// 显示或隐藏某行（用于标签搜索）
    fn set_row_visible(&mut self, label: &str, visible: bool);

    /// 将可见性应用到条目，下标即条目 ID
    fn apply_visibility(&mut self, visible: &[bool]);

    /// 打开或关闭面板及遮罩
    fn set_panel_open(&mut self, open: bool);

    /// 清空搜索框
    fn clear_search(&mut self);
}

/// 筛选面板控制器
pub struct FilterPanel<V> {
    index: TagIndex,
    items: Vec<Item>,
    state: FilterState,
    search: String,
    open: bool,
    view: V,
}

impl<V: PanelView> FilterPanel<V> {
    /// 基于页面条目创建控制器并建立索引
    pub fn new(items: Vec<Item>, view: V) -> Self {
        let index = build_index(&items);
        Self::with_index(index, items, view)
    }

    /// 使用已构建好的索引，索引须由同一组条目构建
    pub fn with_index(index: TagIndex, items: Vec<Item>, view: V) -> Self {
        Self {
            index,
            items,
            state: FilterState::new(),
            search: String::new(),
            open: false,
            view,
        }
    }

    pub fn index(&self) -> &TagIndex {
        &self.index
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 面板中的行，按数量降序、标签升序
    pub fn rows(&self) -> Vec<TagRow> {
        self.index
            .sorted()
            .into_iter()
            .map(TagRow::from_record)
            .collect()
    }

    /// 当前各条目的可见性
    pub fn visibility(&self) -> Vec<bool> {
        compute_visibility(&self.items, &self.state)
    }

    pub fn visible_count(&self) -> usize {
        self.visibility().into_iter().filter(|visible| *visible).count()
    }

    /// 渲染标签列表
    pub fn render_tag_list(&mut self) {
        let rows = self.rows();
        self.view.render_rows(&rows);
        debug!(rows = rows.len(), "标签列表已渲染");
    }

    /// 勾选或取消勾选标签
    pub fn on_toggle(&mut self, label: &str, checked: bool) -> Result<(), FilterError> {
        self.ensure_known(label)?;

        if checked {
            self.state.select(label);
            let mode = self.state.mode_of(label).unwrap_or_default();
            self.view.set_mode_control(label, ModeControl::Shown(mode));
        } else {
            self.state.deselect(label);
            self.view.set_mode_control(label, ModeControl::Hidden);
        }
        self.view.set_checked(label, checked);

        debug!(tag = label, checked, selected = self.state.len(), "标签选择已更新");
        self.apply();
        Ok(())
    }

    /// 切换标签模式 ANY → MUST → NONE → ANY
    pub fn on_mode_cycle(&mut self, label: &str) -> Result<SelectionMode, FilterError> {
        let mode = self.state.cycle_mode(label)?;
        self.view.set_mode_control(label, ModeControl::Shown(mode));

        debug!(tag = label, mode = %mode, "标签模式已切换");
        self.apply();
        Ok(mode)
    }

    /// 按标签文本过滤面板中的行，不影响条目可见性
    pub fn on_search(&mut self, text: &str) {
        self.search = text.to_string();
        let needle = text.to_lowercase();

        for record in self.index.records() {
            let visible = record.label.to_lowercase().contains(&needle);
            self.view.set_row_visible(&record.label, visible);
        }
    }

    /// 清除所有筛选条件
    pub fn clear_all(&mut self) {
        self.state.clear();

        for record in self.index.records() {
            self.view.set_checked(&record.label, false);
            self.view.set_mode_control(&record.label, ModeControl::Hidden);
        }

        debug!("筛选条件已清除");
        self.apply();
    }

    /// 切换面板开关，返回切换后是否打开
    pub fn toggle_panel(&mut self) -> bool {
        if self.open {
            self.close_panel();
        } else {
            self.open_panel();
        }
        self.open
    }

    pub fn open_panel(&mut self) {
        self.open = true;
        self.view.set_panel_open(true);
    }

    /// 关闭面板，同时清空搜索并恢复所有行
    pub fn close_panel(&mut self) {
        self.open = false;
        self.view.set_panel_open(false);
        self.view.clear_search();
        self.on_search("");
    }

    fn ensure_known(&self, label: &str) -> Result<(), FilterError> {
        if self.index.contains(label) {
            Ok(())
        } else {
            warn!(tag = label, "忽略未知标签");
            Err(FilterError::UnknownTag(label.to_string()))
        }
    }

    fn apply(&mut self) {
        let visible = self.visibility();
        self.view.apply_visibility(&visible);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// 记录所有界面更新的测试视图
    #[derive(Debug, Default)]
    pub(crate) struct RecordingView {
        pub rows: Vec<TagRow>,
        pub checked: HashMap<String, bool>,
        pub modes: HashMap<String, ModeControl>,
        pub row_visible: HashMap<String, bool>,
        pub items: Vec<bool>,
        pub open: bool,
        pub search_cleared: usize,
    }

    impl PanelView for RecordingView {
        fn render_rows(&mut self, rows: &[TagRow]) {
            self.rows = rows.to_vec();
        }

        fn set_checked(&mut self, label: &str, checked: bool) {
            self.checked.insert(label.to_string(), checked);
        }

        fn set_mode_control(&mut self, label: &str, control: ModeControl) {
            self.modes.insert(label.to_string(), control);
        }

        fn set_row_visible(&mut self, label: &str, visible: bool) {
            self.row_visible.insert(label.to_string(), visible);
        }

        fn apply_visibility(&mut self, visible: &[bool]) {
            self.items = visible.to_vec();
        }

        fn set_panel_open(&mut self, open: bool) {
            self.open = open;
        }

        fn clear_search(&mut self) {
            self.search_cleared += 1;
        }
    }

    /// A{x,y}, B{y}, C{}
    fn panel() -> FilterPanel<RecordingView> {
        let items = vec![Item::new(["x", "y"]), Item::new(["y"]), Item::default()];
        FilterPanel::new(items, RecordingView::default())
    }

    #[test]
    fn renders_rows_by_count_then_label() {
        let items = vec![
            Item::new(["Rust", "Go"]),
            Item::new(["Rust", "Docker"]),
            Item::new(["Go", "AWS"]),
        ];
        let mut panel = FilterPanel::new(items, RecordingView::default());
        panel.render_tag_list();

        let labels: Vec<&str> = panel.view().rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Go", "Rust", "AWS", "Docker"]);
        assert_eq!(panel.view().rows[0].count, 2);
        assert_eq!(panel.view().rows[0].control_id, "tag-go");
    }

    #[test]
    fn prebuilt_index_from_builder_drives_the_panel() {
        let mut builder = crate::builder::TagIndexBuilder::new();
        builder.add_tags([" x ", "y"]);
        builder.add_tags(["y"]);
        let (index, items) = builder.finish();

        let mut panel = FilterPanel::with_index(index, items, RecordingView::default());
        assert_eq!(panel.index().get("y").map(|r| r.count), Some(2));

        panel.on_toggle("x", true).unwrap();
        assert_eq!(panel.view().items, vec![true, false]);
    }

    #[test]
    fn toggling_shows_mode_control_and_filters() {
        let mut panel = panel();
        panel.on_toggle("x", true).unwrap();

        assert_eq!(panel.view().items, vec![true, false, false]);
        assert_eq!(
            panel.view().modes["x"],
            ModeControl::Shown(SelectionMode::Any)
        );
        assert_eq!(panel.view().checked["x"], true);

        panel.on_toggle("x", false).unwrap();
        assert_eq!(panel.view().items, vec![true, true, true]);
        assert_eq!(panel.view().modes["x"], ModeControl::Hidden);
        assert!(panel.state().is_empty());
    }

    #[test]
    fn mode_cycle_updates_control_and_visibility() {
        let mut panel = panel();
        panel.on_toggle("x", true).unwrap();
        panel.on_toggle("y", true).unwrap();
        assert_eq!(panel.on_mode_cycle("x"), Ok(SelectionMode::Must));
        assert_eq!(panel.on_mode_cycle("y"), Ok(SelectionMode::Must));

        assert_eq!(panel.view().items, vec![true, false, false]);
        assert_eq!(
            panel.view().modes["y"],
            ModeControl::Shown(SelectionMode::Must)
        );
    }

    #[test]
    fn none_on_shared_tag_hides_all() {
        let mut panel = panel();
        panel.on_toggle("y", true).unwrap();
        panel.on_mode_cycle("y").unwrap();
        panel.on_mode_cycle("y").unwrap();

        assert_eq!(panel.state().mode_of("y"), Some(SelectionMode::None));
        assert_eq!(panel.view().items, vec![false, false, false]);
        assert_eq!(panel.visible_count(), 0);
    }

    #[test]
    fn cycling_unselected_tag_changes_nothing() {
        let mut panel = panel();
        assert_eq!(
            panel.on_mode_cycle("x"),
            Err(FilterError::NotSelected("x".to_string()))
        );
        assert!(panel.view().modes.is_empty());
        assert!(panel.view().items.is_empty());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut panel = panel();
        assert_eq!(
            panel.on_toggle("zzz", true),
            Err(FilterError::UnknownTag("zzz".to_string()))
        );
        assert!(panel.state().is_empty());
    }

    #[test]
    fn clear_all_restores_everything() {
        let mut panel = panel();
        panel.on_toggle("x", true).unwrap();
        panel.on_toggle("y", true).unwrap();
        panel.on_mode_cycle("y").unwrap();
        panel.on_mode_cycle("y").unwrap();

        panel.clear_all();

        assert!(panel.state().is_empty());
        assert_eq!(panel.view().items, vec![true, true, true]);
        assert_eq!(panel.view().checked["x"], false);
        assert_eq!(panel.view().checked["y"], false);
        assert_eq!(panel.view().modes["y"], ModeControl::Hidden);
    }

    #[test]
    fn search_filters_rows_case_insensitively() {
        let items = vec![Item::new(["Rust", "TypeScript", "rustdoc"])];
        let mut panel = FilterPanel::new(items, RecordingView::default());
        panel.on_toggle("Rust", true).unwrap();
        let before = panel.view().items.clone();

        panel.on_search("RUST");

        let rows = &panel.view().row_visible;
        assert_eq!(rows["Rust"], true);
        assert_eq!(rows["rustdoc"], true);
        assert_eq!(rows["TypeScript"], false);
        assert_eq!(panel.view().items, before);
        assert!(panel.state().is_selected("Rust"));
    }

    #[test]
    fn closing_panel_clears_search() {
        let mut panel = panel();
        assert!(panel.toggle_panel());
        assert!(panel.view().open);

        panel.on_search("x");
        assert_eq!(panel.view().row_visible["y"], false);

        assert!(!panel.toggle_panel());
        assert!(!panel.view().open);
        assert_eq!(panel.view().search_cleared, 1);
        assert_eq!(panel.search_text(), "");
        assert!(panel.view().row_visible.values().all(|visible| *visible));
    }
}
