//! Concurrent pointer bookkeeping.

use std::time::Instant;

use glissade_model::Vec2;

use super::messages::{PointerId, PointerInput, PointerKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    pub kind: PointerKind,
    pub start: Vec2,
    pub prev: Vec2,
    pub current: Vec2,
    pub pressed_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    PointerStart(PointerId),
    PointerEnd(PointerId),
    /// The pointer count reached `min_pointers`.
    Start,
    /// The pointer count fell below `min_pointers`.
    End,
}

/// Tracks pressed pointers in press order; the first one is primary.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    min_pointers: usize,
    max_pointers: usize,
    buttons: Vec<u8>,
    pointers: Vec<Pointer>,
    started: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(1, 1, vec![0])
    }
}

impl PointerTracker {
    pub fn new(min_pointers: usize, max_pointers: usize, buttons: Vec<u8>) -> Self {
        let min_pointers = min_pointers.max(1);
        Self {
            min_pointers,
            max_pointers: max_pointers.max(min_pointers),
            buttons,
            pointers: Vec::new(),
            started: false,
        }
    }

    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn primary(&self) -> Option<&Pointer> {
        self.pointers.first()
    }

    pub fn get(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    /// Register a press. Disallowed buttons, duplicate ids and presses past
    /// `max_pointers` are ignored.
    pub fn down(&mut self, input: &PointerInput) -> Vec<TrackerEvent> {
        if input.kind == PointerKind::Mouse
            && !self.buttons.is_empty()
            && !self.buttons.contains(&input.button)
        {
            log::trace!("ignoring press of mouse button {}", input.button);
            return Vec::new();
        }
        if self.get(input.id).is_some() {
            log::trace!("pointer {} is already pressed", input.id);
            return Vec::new();
        }
        if self.pointers.len() >= self.max_pointers {
            log::trace!(
                "ignoring pointer {}: {} already pressed",
                input.id,
                self.pointers.len()
            );
            return Vec::new();
        }

        self.pointers.push(Pointer {
            id: input.id,
            kind: input.kind,
            start: input.position,
            prev: input.position,
            current: input.position,
            pressed_at: input.timestamp,
        });

        let mut events = vec![TrackerEvent::PointerStart(input.id)];
        if !self.started && self.pointers.len() >= self.min_pointers {
            self.started = true;
            events.push(TrackerEvent::Start);
        }
        events
    }

    /// Update a pressed pointer. Unknown ids are dropped and reported as
    /// `false`.
    pub fn moved(&mut self, input: &PointerInput) -> bool {
        match self.pointers.iter_mut().find(|p| p.id == input.id) {
            Some(pointer) => {
                pointer.prev = pointer.current;
                pointer.current = input.position;
                true
            }
            None => false,
        }
    }

    pub fn up(&mut self, id: PointerId) -> Vec<TrackerEvent> {
        let Some(index) = self.pointers.iter().position(|p| p.id == id) else {
            return Vec::new();
        };
        self.pointers.remove(index);

        let mut events = vec![TrackerEvent::PointerEnd(id)];
        if self.started && self.pointers.len() < self.min_pointers {
            self.started = false;
            events.push(TrackerEvent::End);
        }
        events
    }

    /// Release every pointer (pointer cancel, disable, teardown).
    pub fn release_all(&mut self) -> Vec<TrackerEvent> {
        let mut events: Vec<TrackerEvent> = self
            .pointers
            .drain(..)
            .map(|p| TrackerEvent::PointerEnd(p.id))
            .collect();
        if self.started {
            self.started = false;
            events.push(TrackerEvent::End);
        }
        events
    }
}
