//! Wander FSM system.

use bevy::prelude::*;

use crate::ai::{random_walk_direction, AgentBehavior, AgentState};
use crate::clock::SimClock;
use crate::components::{AnimationAction, AnimationState, WalkController};
use crate::DeterministicRng;

/// Система: AgentBehavior transitions
///
/// | From    | Condition       | To      |
/// |---------|-----------------|---------|
/// | Created | первый тик      | Walking |
/// | Walking | >= dwell        | Idle    |
/// | Idle    | >= dwell        | Walking |
///
/// Entry actions пишутся в WalkController (на самом агенте) и AnimationState
/// (на агенте или его прямом child — модель NPC). Нет компонента → пропускаем.
pub fn agent_behavior_transitions(
    clock: Res<SimClock>,
    mut rng: ResMut<DeterministicRng>,
    mut agents: Query<(Entity, &mut AgentBehavior, Option<&mut WalkController>)>,
    mut animations: Query<&mut AnimationState>,
    children: Query<&Children>,
) {
    let now = clock.now();

    for (entity, mut agent, walk_controller) in agents.iter_mut() {
        let Some(next) = agent.next_transition(now) else {
            continue;
        };

        let from = agent.state();

        let action = match next {
            AgentState::Walking => {
                let movement = random_walk_direction(&mut rng.rng, agent.timing().walking_speed());
                agent.enter_walking(now, movement);

                if let Some(mut controller) = walk_controller {
                    controller.set_walk_direction(movement);
                    controller.set_view_direction(movement);
                }

                AnimationAction::Walk
            }
            AgentState::Idle => {
                agent.enter_idle(now);

                if let Some(mut controller) = walk_controller {
                    controller.stand_still();
                }

                AnimationAction::Stand
            }
            // В Created FSM не возвращается
            AgentState::Created => continue,
        };

        play_animation(entity, action, &mut animations, &children);

        crate::logger::log(&format!(
            "🚶 AI: {:?} {:?} → {:?} (movement {:?}, clip \"{}\", t={}ms)",
            entity,
            from,
            next,
            agent.movement(),
            action.clip_name(),
            now.as_millis()
        ));
    }
}

/// AnimationState на самом агенте, иначе на первом child с AnimationState
fn play_animation(
    entity: Entity,
    action: AnimationAction,
    animations: &mut Query<&mut AnimationState>,
    children: &Query<&Children>,
) {
    if let Ok(mut animation) = animations.get_mut(entity) {
        animation.play(action);
        return;
    }

    let Ok(entity_children) = children.get(entity) else {
        return;
    };

    let child_entities: &[Entity] = entity_children;
    for &child in child_entities {
        if let Ok(mut animation) = animations.get_mut(child) {
            animation.play(action);
            return;
        }
    }
}
