use std::sync::Once;

static INIT: Once = Once::new();

/// 安装 panic 钩子和 tracing 控制台输出，重复调用无副作用
pub fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = wasm_tracing::set_as_global_default();
    });
}
