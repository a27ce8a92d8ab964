//! The room table: a fixed, ordered sequence of stops in the 3D building.
//!
//! Room identity is positional. `RoomTable::new` rejects tables whose ids do
//! not match their index, so the rest of the crate can index by id freely.

use serde::Serialize;
use thiserror::Error;

use crate::math::Vec3;

/// Which passive content panel renders while a room is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoomView {
    Lobby,
    Skills,
    Projects,
    Contact,
    AiLab,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: usize,
    pub name: &'static str,
    /// Camera target. Assigned once, never mutated.
    pub anchor: Vec3,
    /// Neon accent colour (sRGB bytes).
    pub color: [u8; 3],
    pub view: RoomView,
}

impl Room {
    /// Signed depth used to bias camera distance. Derived from the anchor.
    pub fn depth_hint(&self) -> f32 {
        self.anchor.z
    }

    /// 1-based floor number shown in the elevator panel.
    pub fn level(&self) -> usize {
        self.id + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomTableError {
    #[error("room table is empty")]
    Empty,
    #[error("room at position {index} has id {id}")]
    IdMismatch { index: usize, id: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomTable {
    rooms: Vec<Room>,
}

impl RoomTable {
    pub fn new(rooms: Vec<Room>) -> Result<Self, RoomTableError> {
        if rooms.is_empty() {
            return Err(RoomTableError::Empty);
        }
        if let Some((index, room)) = rooms.iter().enumerate().find(|(i, r)| r.id != *i) {
            return Err(RoomTableError::IdMismatch { index, id: room.id });
        }
        Ok(Self { rooms })
    }

    /// The five floors of the portfolio building.
    pub fn portfolio() -> Self {
        Self {
            rooms: vec![
                Room {
                    id: 0,
                    name: "LOBBY",
                    anchor: Vec3::new(0.0, 0.0, 0.0),
                    color: [0x00, 0xff, 0xff],
                    view: RoomView::Lobby,
                },
                Room {
                    id: 1,
                    name: "SKILLS",
                    anchor: Vec3::new(0.0, 20.0, -10.0),
                    color: [0xff, 0x00, 0xff],
                    view: RoomView::Skills,
                },
                Room {
                    id: 2,
                    name: "PROJECTS",
                    anchor: Vec3::new(0.0, 40.0, -20.0),
                    color: [0x00, 0x66, 0xff],
                    view: RoomView::Projects,
                },
                Room {
                    id: 3,
                    name: "CONTACT",
                    anchor: Vec3::new(0.0, 60.0, -30.0),
                    color: [0x00, 0xff, 0x88],
                    view: RoomView::Contact,
                },
                Room {
                    id: 4,
                    name: "AI LAB",
                    anchor: Vec3::new(0.0, -20.0, -40.0),
                    color: [0x8b, 0x5c, 0xf6],
                    view: RoomView::AiLab,
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Range check for signed ids coming from input.
    pub fn resolve(&self, id: i64) -> Option<&Room> {
        usize::try_from(id).ok().and_then(|i| self.rooms.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn last_index(&self) -> usize {
        self.rooms.len() - 1
    }

    /// Whether the builder should run a staircase from `id` up to `id + 1`.
    /// The AI lab sits below the lobby and is reached by elevator instead.
    pub fn has_stairs_after(&self, id: usize) -> bool {
        match (self.get(id), self.get(id + 1)) {
            (Some(_), Some(next)) => next.view != RoomView::AiLab,
            _ => false,
        }
    }
}

impl Default for RoomTable {
    fn default() -> Self {
        Self::portfolio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: usize) -> Room {
        Room {
            id,
            name: "TEST",
            anchor: Vec3::ZERO,
            color: [0, 0, 0],
            view: RoomView::Lobby,
        }
    }

    #[test]
    fn portfolio_ids_match_positions() {
        let table = RoomTable::portfolio();
        assert_eq!(table.len(), 5);
        for (i, r) in table.iter().enumerate() {
            assert_eq!(r.id, i);
        }
        assert!(RoomTable::new(table.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn depth_hint_follows_anchor() {
        let table = RoomTable::portfolio();
        let depths: Vec<f32> = table.iter().map(Room::depth_hint).collect();
        assert_eq!(depths, vec![0.0, -10.0, -20.0, -30.0, -40.0]);
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(RoomTable::new(vec![]).unwrap_err(), RoomTableError::Empty);
    }

    #[test]
    fn rejects_out_of_order_ids() {
        let err = RoomTable::new(vec![room(0), room(2), room(1)]).unwrap_err();
        assert_eq!(err, RoomTableError::IdMismatch { index: 1, id: 2 });
    }

    #[test]
    fn resolve_checks_range() {
        let table = RoomTable::portfolio();
        assert!(table.resolve(-1).is_none());
        assert!(table.resolve(5).is_none());
        assert!(table.resolve(99).is_none());
        assert_eq!(table.resolve(4).map(|r| r.name), Some("AI LAB"));
    }

    #[test]
    fn stairs_skip_the_elevator_floor() {
        let table = RoomTable::portfolio();
        assert!(table.has_stairs_after(0));
        assert!(table.has_stairs_after(1));
        assert!(table.has_stairs_after(2));
        assert!(!table.has_stairs_after(3), "contact → ai lab uses the elevator");
        assert!(!table.has_stairs_after(4), "top of the table");
    }
}
