//! Tests for evaluate_destruction.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::clock::SimClock;
    use crate::destruction::{DestructionCause, DestructionController, EntityDestroyed};
    use crate::explosion::{Explosion, ExplosionConfig, PendingExplosions};
    use crate::create_headless_app;

    fn set_time(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<SimClock>()
            .set(Duration::from_millis(millis));
    }

    fn tick(app: &mut App) {
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn counting_controller(controller: DestructionController, counter: &Arc<AtomicUsize>) -> DestructionController {
        let counter = Arc::clone(counter);
        controller.on_destroyed(move |_destroyed, _commands, _explosions| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_timed_fires_once_at_ttl() {
        let mut app = create_headless_app(42);
        let fired = Arc::new(AtomicUsize::new(0));

        let entity = app
            .world_mut()
            .spawn((
                Transform::from_xyz(1.0, 2.0, 3.0),
                counting_controller(
                    DestructionController::timed(Duration::from_millis(2000), Duration::ZERO),
                    &fired,
                ),
            ))
            .id();

        set_time(&mut app, 1999);
        tick(&mut app);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(app.world().get_entity(entity).is_ok());

        set_time(&mut app, 2000);
        tick(&mut app);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(app.world().get_entity(entity).is_err());

        set_time(&mut app, 5000);
        tick(&mut app);
        tick(&mut app);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_health_fires_on_first_tick_below_one() {
        let mut app = create_headless_app(42);
        let fired = Arc::new(AtomicUsize::new(0));

        let entity = app
            .world_mut()
            .spawn((
                Transform::default(),
                counting_controller(DestructionController::health_based(), &fired),
            ))
            .id();

        tick(&mut app);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        if let Some(mut controller) = app.world_mut().get_mut::<DestructionController>(entity) {
            controller.set_health(1);
        }
        tick(&mut app);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        if let Some(mut controller) = app.world_mut().get_mut::<DestructionController>(entity) {
            controller.apply_damage(5);
        }
        tick(&mut app);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(app.world().get_entity(entity).is_err());

        tick(&mut app);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_restoring_health_averts_destruction() {
        let mut app = create_headless_app(42);
        let fired = Arc::new(AtomicUsize::new(0));

        let entity = app
            .world_mut()
            .spawn((
                Transform::default(),
                counting_controller(DestructionController::health_based(), &fired),
            ))
            .id();

        if let Some(mut controller) = app.world_mut().get_mut::<DestructionController>(entity) {
            controller.set_health(-10);
            controller.set_health(50);
        }
        tick(&mut app);

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(app.world().get_entity(entity).is_ok());
    }

    #[test]
    fn test_callback_receives_last_position_and_can_queue_explosion() {
        let mut app = create_headless_app(42);

        app.world_mut().spawn((
            Transform::from_xyz(7.0, 0.0, -3.0),
            DestructionController::timed(Duration::ZERO, Duration::ZERO).on_destroyed(
                |destroyed, _commands, explosions| {
                    if let Some(position) = destroyed.position {
                        explosions.push(Explosion::new(position, ExplosionConfig::GRENADE));
                    }
                },
            ),
        ));

        tick(&mut app);

        let pending = app.world().resource::<PendingExplosions>();
        assert_eq!(pending.len(), 1);
        assert_eq!(
            pending.iter().next().map(|e| e.origin),
            Some(Vec3::new(7.0, 0.0, -3.0))
        );
    }

    #[test]
    fn test_children_detached_with_parent() {
        let mut app = create_headless_app(42);

        let parent = app
            .world_mut()
            .spawn((Transform::default(), DestructionController::timed(Duration::ZERO, Duration::ZERO)))
            .id();
        let child = app.world_mut().spawn((Transform::default(), ChildOf(parent))).id();

        tick(&mut app);

        assert!(app.world().get_entity(parent).is_err());
        assert!(app.world().get_entity(child).is_err());
    }

    #[test]
    fn test_destroyed_event_emitted() {
        let mut app = create_headless_app(42);

        let entity = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 5.0, 0.0),
                DestructionController::health_based(),
            ))
            .id();
        if let Some(mut controller) = app.world_mut().get_mut::<DestructionController>(entity) {
            controller.set_health(0);
        }

        tick(&mut app);

        let events = app.world().resource::<Events<EntityDestroyed>>();
        let destroyed: Vec<_> = events.iter_current_update_events().copied().collect();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].entity, entity);
        assert_eq!(destroyed[0].position, Some(Vec3::new(0.0, 5.0, 0.0)));
        assert_eq!(destroyed[0].cause, DestructionCause::Depleted);
    }

    #[test]
    fn test_missing_transform_reports_unknown_position() {
        let mut app = create_headless_app(42);
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

        let recorder = Arc::clone(&seen);
        let entity = app
            .world_mut()
            .spawn(DestructionController::health_based().on_destroyed(
                move |destroyed, _commands, _explosions| {
                    if let Ok(mut positions) = recorder.lock() {
                        positions.push(destroyed.position);
                    }
                },
            ))
            .id();
        if let Some(mut controller) = app.world_mut().get_mut::<DestructionController>(entity) {
            controller.set_health(0);
        }

        tick(&mut app);
        tick(&mut app);

        // Уничтожен ровно один раз, позиция не подменена на origin
        assert!(app.world().get_entity(entity).is_err());
        let positions = seen.lock().map(|p| p.clone()).unwrap_or_default();
        assert_eq!(positions, vec![None]);

        let events = app.world().resource::<Events<EntityDestroyed>>();
        let destroyed: Vec<_> = events.iter_current_update_events().copied().collect();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].position, None);
    }
}
