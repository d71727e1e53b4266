//! Cosmetic feedback: sparks and floating combat text fade out over time.

use hecs::World;

use voidwars_core::components::{Body, FloatingText, Particle};
use voidwars_core::constants::{PARTICLE_DECAY, TEXT_DECAY};

pub fn run(world: &mut World) {
    for (_entity, (body, particle)) in world.query_mut::<(&mut Body, &mut Particle)>() {
        body.position += body.velocity;
        particle.life -= PARTICLE_DECAY;
        if particle.life <= 0.0 {
            body.marked_for_removal = true;
        }
    }

    for (_entity, (body, text)) in world.query_mut::<(&mut Body, &mut FloatingText)>() {
        body.position += body.velocity;
        text.life -= TEXT_DECAY;
        if text.life <= 0.0 {
            body.marked_for_removal = true;
        }
    }
}
