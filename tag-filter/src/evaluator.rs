use std::collections::HashSet;

use crate::models::{FilterState, Item, SelectionMode};

/// 按模式分组的选中标签
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buckets<'a> {
    /// 至少命中一个
    pub any: Vec<&'a str>,
    /// 必须全部命中
    pub must: Vec<&'a str>,
    /// 一个都不能命中
    pub none: Vec<&'a str>,
}

impl<'a> Buckets<'a> {
    pub fn from_state(state: &'a FilterState) -> Self {
        let mut buckets = Buckets::default();
        for (tag, mode) in state.selections() {
            match mode {
                SelectionMode::Any => buckets.any.push(tag),
                SelectionMode::Must => buckets.must.push(tag),
                SelectionMode::None => buckets.none.push(tag),
            }
        }
        buckets
    }

    /// 判断一个条目是否通过筛选
    ///
    /// 依次检查 NONE、ANY、MUST，遇到第一个失败即返回。
    pub fn matches(&self, item: &Item) -> bool {
        // 有筛选条件时，无标签条目一律隐藏
        if item.is_untagged() {
            return false;
        }

        let tags: HashSet<&str> = item.tags.iter().map(String::as_str).collect();

        if self.none.iter().any(|tag| tags.contains(tag)) {
            return false;
        }

        if !self.any.is_empty() && !self.any.iter().any(|tag| tags.contains(tag)) {
            return false;
        }

        self.must.iter().all(|tag| tags.contains(tag))
    }
}

/// 计算每个条目的可见性，结果下标即条目 ID
pub fn compute_visibility(items: &[Item], state: &FilterState) -> Vec<bool> {
    if state.is_empty() {
        return vec![true; items.len()];
    }

    let buckets = Buckets::from_state(state);
    items.iter().map(|item| buckets.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A{x,y}, B{y}, C{}
    fn sample_items() -> Vec<Item> {
        vec![Item::new(["x", "y"]), Item::new(["y"]), Item::default()]
    }

    fn state_with(selections: &[(&str, SelectionMode)]) -> FilterState {
        let mut state = FilterState::new();
        for (tag, mode) in selections {
            state.select(tag);
            while state.mode_of(tag) != Some(*mode) {
                state.cycle_mode(tag).unwrap();
            }
        }
        state
    }

    #[test]
    fn empty_selection_shows_everything() {
        let items = sample_items();
        assert_eq!(
            compute_visibility(&items, &FilterState::new()),
            vec![true, true, true]
        );
        assert!(compute_visibility(&[], &FilterState::new()).is_empty());
    }

    #[test]
    fn any_on_x_shows_only_a() {
        let state = state_with(&[("x", SelectionMode::Any)]);
        assert_eq!(
            compute_visibility(&sample_items(), &state),
            vec![true, false, false]
        );
    }

    #[test]
    fn must_on_x_and_y_requires_both() {
        let state = state_with(&[("x", SelectionMode::Must), ("y", SelectionMode::Must)]);
        assert_eq!(
            compute_visibility(&sample_items(), &state),
            vec![true, false, false]
        );
    }

    #[test]
    fn none_on_y_hides_everything() {
        let state = state_with(&[("y", SelectionMode::None)]);
        assert_eq!(
            compute_visibility(&sample_items(), &state),
            vec![false, false, false]
        );
    }

    #[test]
    fn none_dominates_any_and_must() {
        let items = vec![Item::new(["x", "y", "z"]), Item::new(["x", "y"])];
        let state = state_with(&[
            ("x", SelectionMode::Any),
            ("y", SelectionMode::Must),
            ("z", SelectionMode::None),
        ]);
        assert_eq!(compute_visibility(&items, &state), vec![false, true]);
    }

    #[test]
    fn buckets_combine_as_conjunction() {
        let items = vec![
            Item::new(["rust", "wasm"]),
            Item::new(["go", "wasm"]),
            Item::new(["rust"]),
            Item::new(["python", "wasm"]),
        ];
        let state = state_with(&[
            ("rust", SelectionMode::Any),
            ("go", SelectionMode::Any),
            ("wasm", SelectionMode::Must),
        ]);
        assert_eq!(
            compute_visibility(&items, &state),
            vec![true, true, false, false]
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let items = sample_items();
        let state = state_with(&[("x", SelectionMode::Any), ("y", SelectionMode::Must)]);
        let first = compute_visibility(&items, &state);
        let second = compute_visibility(&items, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn adding_must_never_reveals_items() {
        let items = vec![
            Item::new(["a", "b"]),
            Item::new(["a"]),
            Item::new(["b", "c"]),
            Item::new(["c"]),
            Item::default(),
        ];
        let bases: Vec<Vec<(&str, SelectionMode)>> = vec![
            vec![("a", SelectionMode::Any)],
            vec![("c", SelectionMode::None)],
            vec![("a", SelectionMode::Any), ("c", SelectionMode::Any)],
            vec![("b", SelectionMode::Must)],
        ];

        for base in bases {
            let before = compute_visibility(&items, &state_with(&base));
            for extra in ["a", "b", "c"] {
                if base.iter().any(|(tag, _)| *tag == extra) {
                    continue;
                }
                let mut selections = base.clone();
                selections.push((extra, SelectionMode::Must));
                let after = compute_visibility(&items, &state_with(&selections));
                for (was, now) in before.iter().zip(&after) {
                    assert!(*was || !*now, "MUST {} 使隐藏条目重新可见", extra);
                }
            }
        }
    }

    #[test]
    fn buckets_partition_by_mode() {
        let state = state_with(&[
            ("a", SelectionMode::Any),
            ("b", SelectionMode::Must),
            ("c", SelectionMode::None),
            ("d", SelectionMode::Any),
        ]);
        let buckets = Buckets::from_state(&state);
        assert_eq!(buckets.any, vec!["a", "d"]);
        assert_eq!(buckets.must, vec!["b"]);
        assert_eq!(buckets.none, vec!["c"]);
    }
}
