//! Tests for DestructionController.

#[cfg(test)]
mod tests {
    use super::super::components::*;
    use std::time::Duration;

    #[test]
    fn test_timed_never_fires_early() {
        let controller = DestructionController::timed(Duration::from_millis(2000), Duration::ZERO);

        assert_eq!(controller.should_fire(Duration::from_millis(0)), None);
        assert_eq!(controller.should_fire(Duration::from_millis(1999)), None);
        assert_eq!(
            controller.should_fire(Duration::from_millis(2000)),
            Some(DestructionCause::Expired)
        );
        assert_eq!(
            controller.should_fire(Duration::from_millis(5000)),
            Some(DestructionCause::Expired)
        );
    }

    #[test]
    fn test_timed_counts_from_construction() {
        let controller =
            DestructionController::timed(Duration::from_millis(500), Duration::from_millis(1000));

        assert_eq!(controller.expires_at(), Some(Duration::from_millis(1500)));
        assert_eq!(controller.should_fire(Duration::from_millis(1499)), None);
        assert!(controller.should_fire(Duration::from_millis(1500)).is_some());
    }

    #[test]
    fn test_trigger_reports_variant() {
        let timed = DestructionController::timed(Duration::from_millis(500), Duration::from_millis(100));
        assert_eq!(
            timed.trigger(),
            DestructionTrigger::Timed {
                expires_at: Duration::from_millis(600)
            }
        );

        let mut health = DestructionController::health_based();
        health.apply_damage(30);
        assert_eq!(health.trigger(), DestructionTrigger::Health { health: 70 });
    }

    #[test]
    fn test_timed_has_no_health() {
        let mut controller = DestructionController::timed(Duration::from_millis(10), Duration::ZERO);
        assert_eq!(controller.health(), None);

        controller.set_health(-50); // no-op
        assert_eq!(controller.apply_damage(10), None);
        assert!(!controller.is_health_based());
    }

    #[test]
    fn test_health_starts_at_100() {
        let controller = DestructionController::health_based();
        assert_eq!(controller.health(), Some(INITIAL_HEALTH));
        assert_eq!(controller.health(), Some(100));
        assert!(controller.is_health_based());
    }

    #[test]
    fn test_health_threshold_uses_raw_value() {
        let mut controller = DestructionController::health_based();

        controller.set_health(1);
        assert_eq!(controller.should_fire(Duration::ZERO), None);

        controller.set_health(0);
        assert_eq!(controller.should_fire(Duration::ZERO), Some(DestructionCause::Depleted));

        controller.set_health(-25);
        assert_eq!(controller.health(), Some(-25)); // без floor
        assert_eq!(controller.display_health(), Some(0));
        assert_eq!(controller.should_fire(Duration::ZERO), Some(DestructionCause::Depleted));
    }

    #[test]
    fn test_damage_strictly_decreases_health() {
        let mut controller = DestructionController::health_based();
        let mut previous = controller.health().unwrap_or_default();

        for _ in 0..5 {
            let current = controller.apply_damage(30).unwrap_or_default();
            assert!(current < previous);
            previous = current;
        }

        assert_eq!(controller.health(), Some(-50));
    }

    #[test]
    fn test_callback_taken_once() {
        let mut controller = DestructionController::health_based()
            .on_destroyed(|_destroyed, _commands, _explosions| {});
        controller.set_health(0);

        assert!(controller.begin_destruction().is_some());
        assert_eq!(controller.state(), Lifecycle::PendingDestruction);
        assert!(controller.begin_destruction().is_none());

        controller.mark_destroyed();
        assert_eq!(controller.state(), Lifecycle::Destroyed);
        // Не Active → больше не срабатывает
        assert_eq!(controller.should_fire(Duration::ZERO), None);
    }

    #[test]
    fn test_debug_hides_callback() {
        let controller = DestructionController::health_based()
            .on_destroyed(|_destroyed, _commands, _explosions| {});
        let debug = format!("{:?}", controller);
        assert!(debug.contains("has_callback: true"));
    }
}
