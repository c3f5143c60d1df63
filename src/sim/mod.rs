//! Deterministic collision simulation
//!
//! Everything here runs on the single simulation thread:
//! - Queries are pure functions over value geometry
//! - Responses mutate only the ball they are handed
//! - Timers fire between ticks, in due order

pub mod ball;
pub mod geometry;
pub mod math;
pub mod query;
pub mod response;
pub mod table;
pub mod timer;

pub use ball::{Ball, EdgeId};
pub use geometry::{
    Circle, LineSegment, RampPlane, Ray, Rect, WallPoint, enclosing_box, find_closest_edge,
    rectangle_clip,
};
pub use query::{
    FlipperEdges, FlipperPart, RayHit, distance_to_flipper, nearest_flipper_part,
    ray_intersect_circle, ray_intersect_line,
};
pub use response::basic_collision;
pub use table::{SoundId, Table, TableContext, TableEvent, TableServices};
pub use timer::{TimerId, TimerQueue};
