use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Ctrl+C flag polled by the frame loop.
#[derive(Clone, Default)]
pub struct ExitSignal {
    flag: Arc<AtomicBool>,
}

impl ExitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exit_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn request_exit(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn install_ctrlc_handler(&self) -> anyhow::Result<()> {
        let flag = self.flag.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::Relaxed);
        })?;
        Ok(())
    }
}
