//! Hitbox geometry and the axis-aligned overlap test
//!
//! Boxes are stored as offsets from an actor's sprite origin and placed into
//! world space from the actor's position and facing. Player attack boxes are
//! keyed by action; enemy boxes come from one profile per archetype, selected
//! by the current level.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FINAL_LEVEL, FIRST_LEVEL};

/// Collision box offsets relative to a sprite origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitBox {
    /// Horizontal offset when the actor faces its base direction
    pub offset_left: i32,
    /// Horizontal offset when the actor is flipped
    pub offset_right: i32,
    pub offset_top: i32,
    pub width: i32,
    pub height: i32,
    /// Origin shift of the enemy attack sprite
    pub kick_adjustment: i32,
}

impl HitBox {
    pub const fn new(
        offset_left: i32,
        offset_right: i32,
        offset_top: i32,
        width: i32,
        height: i32,
        kick_adjustment: i32,
    ) -> Self {
        Self {
            offset_left,
            offset_right,
            offset_top,
            width,
            height,
            kick_adjustment,
        }
    }

    /// Place this box in world space for an actor at `origin`
    pub fn place(&self, origin: IVec2, flipped: bool) -> Rect {
        let dx = if flipped {
            self.offset_right
        } else {
            self.offset_left
        };
        Rect::new(
            IVec2::new(origin.x + dx, origin.y + self.offset_top),
            IVec2::new(self.width, self.height),
        )
    }
}

/// World-space axis-aligned rectangle (origin + size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    /// Last covered pixel on each axis
    #[inline]
    pub fn max_inclusive(&self) -> IVec2 {
        self.min + self.size - IVec2::ONE
    }

    /// Boxes overlap unless one lies entirely left, right, above or below the
    /// other. At least one shared pixel is required; touching edges miss.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max_inclusive();
        let b_max = other.max_inclusive();
        !(self.min.x > b_max.x
            || other.min.x > a_max.x
            || self.min.y > b_max.y
            || other.min.y > a_max.y)
    }
}

/// Player body hurtbox
pub const PLAYER_BODY: HitBox = HitBox::new(8, 10, 1, 10, 32, 0);

/// Player attack boxes, one per attacking action
pub const PLAYER_PUNCH_STAND: HitBox = HitBox::new(25, 0, 17, 3, 3, 0);
pub const PLAYER_PUNCH_CROUCH: HitBox = HitBox::new(28, 0, 22, 3, 3, 0);
pub const PLAYER_KICK_STAND: HitBox = HitBox::new(25, 0, 24, 6, 5, 0);
pub const PLAYER_KICK_CROUCH: HitBox = HitBox::new(30, 0, 27, 6, 5, 0);
pub const PLAYER_KICK_HIGH: HitBox = HitBox::new(27, 0, 3, 5, 4, 0);
pub const PLAYER_AIR_ATTACK: HitBox = HitBox::new(31, 0, 24, 4, 5, 0);

/// Enemy archetype, one per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Wang,
    Tao,
    Chen,
    Lang,
    Mu,
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Wang => "wang",
            Archetype::Tao => "tao",
            Archetype::Chen => "chen",
            Archetype::Lang => "lang",
            Archetype::Mu => "mu",
        }
    }
}

/// Hitbox set and animation layout for one enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyProfile {
    pub archetype: Archetype,
    pub body: HitBox,
    pub punch: HitBox,
    pub kick: HitBox,
    /// Frames in the walk/idle cycle
    pub idle_frames: u32,
}

/// Attack animations all use two frames
pub const ENEMY_ATTACK_FRAMES: u32 = 2;

const ENEMY_PROFILES: [EnemyProfile; 5] = [
    EnemyProfile {
        archetype: Archetype::Wang,
        body: HitBox::new(5, 8, 8, 19, 31, 10),
        punch: HitBox::new(0, 47, 31, 4, 2, 0),
        kick: HitBox::new(0, 42, 22, 7, 4, 0),
        idle_frames: 2,
    },
    EnemyProfile {
        archetype: Archetype::Tao,
        body: HitBox::new(6, 3, 3, 4, 31, 11),
        punch: HitBox::new(6, 28, 11, 3, 2, 0),
        kick: HitBox::new(0, 31, 15, 5, 2, 0),
        idle_frames: 2,
    },
    EnemyProfile {
        archetype: Archetype::Chen,
        body: HitBox::new(10, 7, 9, 16, 31, 9),
        punch: HitBox::new(0, 36, 21, 3, 3, 0),
        kick: HitBox::new(0, 34, 15, 4, 1, 0),
        idle_frames: 4,
    },
    EnemyProfile {
        archetype: Archetype::Lang,
        body: HitBox::new(8, 3, 8, 8, 31, 8),
        punch: HitBox::new(0, 22, 35, 5, 3, 0),
        kick: HitBox::new(0, 24, 7, 3, 5, 0),
        idle_frames: 2,
    },
    EnemyProfile {
        archetype: Archetype::Mu,
        body: HitBox::new(11, 2, 7, 16, 31, 6),
        punch: HitBox::new(6, 27, 14, 2, 3, 0),
        kick: HitBox::new(0, 31, 25, 5, 3, 0),
        idle_frames: 2,
    },
];

/// Profile for a 1-based level. Levels outside 1..=5 are a programming error.
pub fn enemy_profile(level: u8) -> &'static EnemyProfile {
    assert!(
        (FIRST_LEVEL..=FINAL_LEVEL).contains(&level),
        "level {level} has no enemy profile"
    );
    &ENEMY_PROFILES[usize::from(level - FIRST_LEVEL)]
}

/// Enemy attack box: attack sprites are drawn shifted left by the body
/// profile's kick adjustment, so their boxes are too.
pub fn enemy_attack_box(profile: &EnemyProfile, attack: &HitBox, origin: IVec2, flipped: bool) -> Rect {
    let shifted = IVec2::new(origin.x - profile.body.kick_adjustment, origin.y);
    attack.place(shifted, flipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(IVec2::new(x, y), IVec2::new(w, h))
    }

    #[test]
    fn test_profiles_indexed_by_level_minus_one() {
        let expected = [
            Archetype::Wang,
            Archetype::Tao,
            Archetype::Chen,
            Archetype::Lang,
            Archetype::Mu,
        ];
        for level in FIRST_LEVEL..=FINAL_LEVEL {
            let profile = enemy_profile(level);
            assert_eq!(profile.archetype, expected[usize::from(level - 1)]);
            assert!(profile.body.width > 0 && profile.body.height > 0);
            assert!(profile.punch.width > 0 && profile.kick.width > 0);
        }
        assert_eq!(enemy_profile(3).idle_frames, 4);
    }

    #[test]
    #[should_panic(expected = "has no enemy profile")]
    fn test_level_zero_panics() {
        enemy_profile(0);
    }

    #[test]
    #[should_panic(expected = "has no enemy profile")]
    fn test_level_six_panics() {
        enemy_profile(6);
    }

    #[test]
    fn test_place_mirrors_by_facing() {
        let origin = IVec2::new(100, 160);
        assert_eq!(PLAYER_BODY.place(origin, false), rect(108, 161, 10, 32));
        assert_eq!(PLAYER_BODY.place(origin, true), rect(110, 161, 10, 32));
        assert_eq!(PLAYER_PUNCH_STAND.place(origin, true).min.x, 100);
    }

    #[test]
    fn test_enemy_attack_box_applies_kick_adjustment() {
        let profile = enemy_profile(1);
        let origin = IVec2::new(145, 152);
        let facing_left = enemy_attack_box(profile, &profile.punch, origin, false);
        assert_eq!(facing_left, rect(135, 183, 4, 2));
        let facing_right = enemy_attack_box(profile, &profile.punch, origin, true);
        assert_eq!(facing_right.min.x, 145 - 10 + 47);
    }

    #[test]
    fn test_one_pixel_overlap_hits() {
        let a = rect(0, 0, 10, 10);
        assert!(a.overlaps(&rect(9, 0, 5, 10)));
        assert!(a.overlaps(&rect(0, 9, 10, 5)));
        assert!(a.overlaps(&rect(-4, -4, 5, 5)));
    }

    #[test]
    fn test_shared_edge_misses() {
        let a = rect(0, 0, 10, 10);
        assert!(!a.overlaps(&rect(10, 0, 5, 10)));
        assert!(!a.overlaps(&rect(0, 10, 10, 5)));
        assert!(!a.overlaps(&rect(-5, 0, 5, 10)));
        assert!(!a.overlaps(&rect(0, -5, 10, 5)));
    }

    #[test]
    fn test_containment_hits() {
        let outer = rect(0, 0, 50, 50);
        let inner = rect(10, 10, 2, 2);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100i32..100, ay in -100i32..100, aw in 1i32..40, ah in 1i32..40,
            bx in -100i32..100, by in -100i32..100, bw in 1i32..40, bh in 1i32..40,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_overlap_matches_shared_area(
            ax in -50i32..50, ay in -50i32..50, aw in 1i32..20, ah in 1i32..20,
            bx in -50i32..50, by in -50i32..50, bw in 1i32..20, bh in 1i32..20,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            let dx = (ax + aw).min(bx + bw) - ax.max(bx);
            let dy = (ay + ah).min(by + bh) - ay.max(by);
            prop_assert_eq!(a.overlaps(&b), dx > 0 && dy > 0);
        }
    }
}
