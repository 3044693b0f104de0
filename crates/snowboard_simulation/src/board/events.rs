//! Contact events - polled channel
//!
//! Контроллер складывает события в очередь в том тике, где обнаружен переход,
//! хост забирает их через `drain` после update. Callback'ов нет: обработчик
//! физически не может вызвать update/fixed_update изнутри события.
//!
//! Очередь ограничена `MAX_PENDING_EVENTS`: хост, который не дренирует события,
//! теряет самые старые (как Bevy `Events` без reader'а).

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::logger::log_warning;

/// Предел очереди событий одной доски
pub const MAX_PENDING_EVENTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    /// Contact: Full/Half → None (в том числе прыжок)
    Lost,
    /// Contact: None → Full/Half; `velocity_delta` = v_after − v_before
    Found { velocity_delta: Vec3 },
}

#[derive(Debug, Clone, Default)]
pub struct ContactEvents {
    pending: VecDeque<ContactEvent>,
    dropped: usize,
}

impl ContactEvents {
    pub fn push(&mut self, event: ContactEvent) {
        if self.pending.len() >= MAX_PENDING_EVENTS {
            self.pending.pop_front();
            self.dropped += 1;
            log_warning(&format!(
                "Contact events are not drained, dropped {} oldest so far",
                self.dropped
            ));
        }

        self.pending.push_back(event);
    }

    /// Забрать все накопленные события (в порядке возникновения)
    pub fn drain(&mut self) -> Vec<ContactEvent> {
        self.pending.drain(..).collect()
    }

    /// Сколько событий потеряно из-за переполнения очереди
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
