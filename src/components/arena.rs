//! Generational storage for table elements
//!
//! Timers carry a [`ComponentId`] instead of a reference. A handle whose slot
//! was freed (or reused) no longer resolves, so a late callback is dropped
//! rather than delivered to the wrong element.

use serde::{Deserialize, Serialize};

use super::{Component, Contact};
use crate::sim::{Ball, TableServices, TimerId};

/// Stable handle of an element in a [`ComponentArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId {
    index: u32,
    generation: u32,
}

impl ComponentId {
    pub fn index(&self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    component: Option<Component>,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ComponentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.component.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&mut self, component: Component) -> ComponentId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.component = Some(component);
            return ComponentId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            component: Some(component),
        });
        ComponentId {
            index,
            generation: 0,
        }
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.component.as_ref())
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.component.as_mut())
    }

    /// Live elements in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.component.as_ref().map(|c| {
                (
                    ComponentId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    c,
                )
            })
        })
    }

    /// Destroy an element. Its pending timer is cancelled first.
    pub fn remove(&mut self, id: ComponentId, table: &mut dyn TableServices) -> Option<Component> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)?;
        let mut component = slot.component.take()?;
        component.as_dyn_mut().destroy(table);
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(component)
    }

    /// Route a contact to an element. False if it is gone or disabled.
    pub fn collision(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        ball: &mut Ball,
        contact: &Contact,
    ) -> bool {
        let Some(component) = self.get_mut(id) else {
            log::warn!("Contact for missing element {:?}", id);
            return false;
        };
        if !component.is_active() {
            return false;
        }
        component.as_dyn_mut().collision(id, table, ball, contact);
        true
    }

    pub fn message(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        code: i32,
        value: f32,
    ) -> Option<i32> {
        let component = self.get_mut(id)?;
        Some(component.as_dyn_mut().message(id, table, code, value))
    }

    /// Deliver a due timer to its element.
    ///
    /// Callbacks for destroyed elements, or for timers the element no longer
    /// owns, are dropped. Returns whether the callback ran.
    pub fn fire_timer(
        &mut self,
        timer: TimerId,
        id: ComponentId,
        table: &mut dyn TableServices,
        balls: &mut [Ball],
    ) -> bool {
        let Some(component) = self.get_mut(id) else {
            log::warn!("Dropping {:?} for destroyed element {:?}", timer, id);
            return false;
        };
        let element = component.as_dyn_mut();
        if element.pending_timer() != Some(timer) {
            log::warn!("Dropping stale {:?} for element {:?}", timer, id);
            return false;
        }
        element.timer_expired(id, table, timer, balls);
        true
    }
}
