// ┌──────────────────────────────────────────────────────────────┐
// │                 Entity ownership per frame                   │
// ├────────────────┬─────────────────────────────────────────────┤
// │ Battle         │ owns Player + Vec<Enemy>                    │
// │ ├── Player     │ owns Vec<Projectile>, moves on held keys    │
// │ │ └── Projectile → moves right, expires at range             │
// │ └── Enemy      │ moves left, expires off the left edge       │
// └────────────────┴─────────────────────────────────────────────┘
// Nothing is removed mid-frame: entities raise `marked_for_deletion`
// and their owner prunes them in one retain() pass.
pub mod enemy;
pub mod player;
pub mod projectile;

pub use enemy::{Enemy, EnemyKind, KindProfile};
pub use player::Player;
pub use projectile::Projectile;

use crate::engine::Rect;

/// Anything with an axis aligned box that takes part in collisions
pub trait Bounded {
    fn bounding_box(&self) -> Rect;
}
