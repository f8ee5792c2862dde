use gloo::timers::callback::Timeout;

/// 延迟执行回调的调度器
///
/// 回调一经调度不可取消，也不会被其他操作等待。
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// 基于浏览器 setTimeout 的调度器
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use std::cell::RefCell;

    use super::Scheduler;

    /// 手动推进的调度器，测试中不需要真实时间流逝
    #[derive(Default)]
    pub(crate) struct ManualScheduler {
        pending: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
    }

    impl ManualScheduler {
        pub(crate) fn delays(&self) -> Vec<u32> {
            self.pending.borrow().iter().map(|(delay, _)| *delay).collect()
        }

        /// 执行所有已调度的回调，返回执行数量
        pub(crate) fn run_all(&self) -> usize {
            let tasks: Vec<_> = self.pending.borrow_mut().drain(..).collect();
            let count = tasks.len();
            for (_, task) in tasks {
                task();
            }
            count
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.pending.borrow_mut().push((delay_ms, task));
        }
    }
}
