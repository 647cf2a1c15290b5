#[derive(Debug, Clone, Default)]
pub struct Time {
    /// Delta time (sec) of the current frame, clamped.
    pub dt_sec: f32,

    /// Seconds since start.
    pub t_sec: f64,

    pub frame_index: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances by one frame. `raw_dt_sec` counts towards `t_sec` unclamped.
    pub fn advance(&mut self, raw_dt_sec: f32, max_dt_sec: f32) {
        self.dt_sec = raw_dt_sec.min(max_dt_sec);
        self.t_sec += raw_dt_sec as f64;
        self.frame_index += 1;
    }
}
