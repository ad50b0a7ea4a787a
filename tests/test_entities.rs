use alien_invasion::compute::init_state;
use alien_invasion::entities::*;
use alien_invasion::settings::Settings;

#[test]
fn rect_edges() {
    let r = Rect::new(2.0, 3.0, 4.0, 5.0);
    assert_eq!(r.left(), 2.0);
    assert_eq!(r.right(), 6.0);
    assert_eq!(r.top(), 3.0);
    assert_eq!(r.bottom(), 8.0);
    assert_eq!(r.center_x(), 4.0);
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 2.0, 2.0);
    assert!(a.intersects(&Rect::new(1.0, 1.0, 2.0, 2.0)));
    // Sharing an edge is not a collision
    assert!(!a.intersects(&Rect::new(2.0, 0.0, 2.0, 2.0)));
    assert!(!a.intersects(&Rect::new(0.0, 2.0, 2.0, 2.0)));
    // Containment is
    assert!(a.intersects(&Rect::new(0.5, 0.5, 0.5, 0.5)));
}

#[test]
fn rect_contains_point_half_open() {
    let r = Rect::new(34.0, 10.0, 12.0, 3.0);
    assert!(r.contains_point(34.0, 10.0));
    assert!(r.contains_point(45.0, 12.0));
    assert!(!r.contains_point(46.0, 12.0));
    assert!(!r.contains_point(40.0, 13.0));
}

#[test]
fn phase_follows_stats_flags() {
    let mut s = init_state(Settings::default(), 0);
    assert_eq!(s.phase(), Phase::Idle);
    s.stats.game_active = true;
    assert_eq!(s.phase(), Phase::Active);
    s.stats.game_active = false;
    s.stats.game_over = true;
    assert_eq!(s.phase(), Phase::GameOver);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(Settings::default(), 0);
    let mut cloned = original.clone();

    cloned.ship.rect.x = 99.0;
    cloned.stats.score = 999;
    cloned.aliens.clear();

    assert_eq!(original.ship.rect.x, 37.5);
    assert_eq!(original.stats.score, 0);
    assert!(!original.aliens.is_empty());
}
