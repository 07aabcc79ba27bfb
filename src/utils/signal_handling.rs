use std::sync::atomic::{AtomicBool, Ordering};

static RECEIVED_CTRL_C: AtomicBool = AtomicBool::new(false);

/// Registers the process-wide handler. May be called at most once.
pub fn initialize() {
    ctrlc::set_handler(|| {
        RECEIVED_CTRL_C.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
}

pub fn received_ctrl_c() -> bool {
    RECEIVED_CTRL_C.load(Ordering::SeqCst)
}
