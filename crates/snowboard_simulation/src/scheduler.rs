//! Отложенные задачи, принадлежащие одному экземпляру симуляции
//!
//! Вместо глобального singleton'а с callback'ами: владелец ставит типизированную
//! задачу с задержкой и сам забирает созревшие задачи в `advance` на одном из
//! следующих тиков. Каждая задача отдаётся ровно один раз.

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    elapsed: f32,
    pending: Vec<(f32, T)>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Секунды, прошедшие через `advance`
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Поставить задачу: созреет, когда elapsed достигнет now + delay
    pub fn after(&mut self, delay: f32, task: T) {
        let due = self.elapsed + delay.max(0.0);
        self.pending.push((due, task));
    }

    /// Продвинуть время на `dt` и забрать созревшие задачи (в порядке постановки)
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.elapsed += dt;

        let elapsed = self.elapsed;
        let (due, waiting): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|(at, _)| *at <= elapsed);
        self.pending = waiting;

        due.into_iter().map(|(_, task)| task).collect()
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Отменить все задачи (время не сбрасывается)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
