use missile_run::config::{GameConfig, Playfield};
use missile_run::entities::*;

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(a.overlaps(&Rect::new(2.0, 2.0, 1.0, 1.0))); // contained
    assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0))); // shares right edge
    assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0))); // shares bottom edge
    assert!(!a.overlaps(&Rect::new(-10.0, -10.0, 10.0, 10.0))); // shares a corner
}

#[test]
fn rect_overlap_is_symmetric() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(9.0, -3.0, 4.0, 4.0);
    assert_eq!(a.overlaps(&b), b.overlaps(&a));
}

#[test]
fn bullet_bounds_are_its_bounding_square() {
    let b = Bullet::new(50.0, 60.0, 0);
    assert_eq!(b.bounds(), Rect::new(45.0, 55.0, 10.0, 10.0));
    assert_eq!(b.speed, 8.0);
}

#[test]
fn missile_bounds_and_size() {
    let m = Missile::new(800.0, 100.0, 1);
    assert_eq!(m.bounds(), Rect::new(800.0, 100.0, 20.0, 10.0));
    assert!(!m.hit);
}

#[test]
fn player_starts_centred_on_the_left() {
    let p = Player::new(&Playfield::default());
    assert_eq!((p.x, p.y), (100.0, 280.0));
    assert_eq!((p.width, p.height), (40.0, 40.0));
    assert_eq!(p.speed, 5.0);
    assert_eq!(p.muzzle(), (140.0, 300.0));
    assert!(p.bullets.is_empty());
}

#[test]
fn new_world_is_running_level_one() {
    let w = World::new(Playfield::default(), 1234);
    assert_eq!(w.level, 1);
    assert_eq!(w.status, Status::Running);
    assert!(!w.is_over());
    assert!(w.missiles.is_empty());
    assert_eq!(w.last_missile_spawn, 1234);
    assert_eq!(w.level_start, 1234);
}

#[test]
fn status_outcomes() {
    assert_eq!(Status::Running.outcome(), None);
    assert_eq!(Status::GameOver.outcome(), Some(Outcome::GameOver));
    assert_eq!(Status::Victory.outcome(), Some(Outcome::Victory));
    assert!(Status::GameOver.is_terminal());
    assert!(Status::Victory.is_terminal());
    assert!(!Status::Running.is_terminal());
}

#[test]
fn world_clone_is_independent() {
    let original = World::new(Playfield::default(), 0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.y = 0.0;
    cloned.level = 7;
    cloned.missiles.push(Missile::new(800.0, 5.0, 7));

    assert_eq!(original.player.y, 280.0);
    assert_eq!(original.level, 1);
    assert!(original.missiles.is_empty());
}

#[test]
fn default_config() {
    let c = GameConfig::default();
    assert_eq!(c.playfield, Playfield { width: 800.0, height: 600.0 });
    assert_eq!(c.playfield.bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
    assert_eq!(c.seed, None);
    assert_eq!(c.clone().with_fps(50).frame.as_millis(), 20);
    assert_eq!(c.with_fps(0).frame.as_millis(), 1000);
}
