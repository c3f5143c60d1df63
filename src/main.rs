//! Cadet Collide entry point
//!
//! Loads a table definition (or builds a small demo table) and drives a ball
//! through a scripted sequence of contacts, logging what every element does.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cadet Collide (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match cadet_collide::TableSettings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => demo::demo_settings(),
    };

    demo::run(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on wasm
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use cadet_collide::components::CollisionAttributes;
    use cadet_collide::consts::messages;
    use cadet_collide::settings::{ComponentDef, SinkDef, SinkRelease, TripwireDef};
    use cadet_collide::sim::EdgeId;
    use cadet_collide::{Ball, Component, Contact, Table, TableSettings};
    use glam::{Vec2, Vec3};

    /// Fixed simulation step (seconds)
    const STEP: f32 = 1.0 / 60.0;
    /// An armed kickback keeps re-arming while nothing hits it
    const MAX_STEPS: usize = 600;

    pub fn demo_settings() -> TableSettings {
        TableSettings {
            seed: 1,
            tilt_locked: false,
            components: vec![
                ComponentDef::Tripwire(TripwireDef {
                    attributes: CollisionAttributes {
                        soft_hit_sound: Some(1),
                        ..Default::default()
                    },
                }),
                ComponentDef::Sink(SinkDef {
                    attributes: CollisionAttributes::default(),
                    timer_time: 1.0,
                    release: Some(SinkRelease {
                        position: Vec2::new(300.0, 400.0),
                        acceleration: Vec3::new(0.0, -1.0, 0.0),
                    }),
                    throw_angle_mult: 0.1,
                    throw_speed_mult1: 10.0,
                    throw_speed_mult2: 0.2,
                    capture_sound: Some(2),
                    eject_sound: Some(3),
                }),
            ],
        }
    }

    /// Touch every element once with one ball, then run the clock until all
    /// timers have fired or `MAX_STEPS` elapse.
    pub fn run(settings: &TableSettings) {
        let mut table = Table::from_settings(settings);

        let mut ball = Ball::new(0);
        ball.position = Vec2::new(100.0, 100.0);
        ball.acceleration = Vec3::new(0.6, 0.8, 0.0);
        ball.speed = 5.0;
        ball.ray_max_distance = 20.0;
        let ball_id = table.add_ball(ball);

        let ids: Vec<_> = table.components.iter().map(|(id, _)| id).collect();
        for (edge, id) in ids.into_iter().enumerate() {
            table.begin_tick();
            let kind = table.components.get(id).map(Component::kind_name);
            let Some(position) = table.ball(ball_id).map(|b| b.position) else {
                break;
            };
            let contact = Contact {
                next_position: position + Vec2::new(3.0, 4.0),
                direction: Vec2::new(0.0, -1.0),
                coef: 0.5,
                edge: EdgeId(edge as u32),
            };
            let delivered = table.collide(id, ball_id, &contact);
            log::info!("{:?} {:?}: contact delivered = {}", kind, id, delivered);
            if let Some(b) = table.ball(ball_id) {
                log::info!(
                    "  ball at {:?} speed {:.2} active {}",
                    b.position,
                    b.speed,
                    b.active
                );
            }

            if matches!(table.components.get(id), Some(Component::Sink(_))) {
                table.message(id, messages::SINK_EJECT, -1.0);
            }
        }

        for step in 1..=MAX_STEPS {
            if table.context.timers().is_empty() {
                break;
            }
            let fired = table.advance(STEP);
            if fired > 0 {
                log::info!("{:.3}s: {} timer(s) fired", step as f32 * STEP, fired);
            }
        }

        for sound in table.context.drain_sounds() {
            log::info!("sound {}", sound);
        }
        for event in table.context.drain_events() {
            log::info!("event {} from {:?}", event.code, event.source);
        }
        if let Some(b) = table.ball(ball_id) {
            log::info!(
                "Final ball: position {:?} direction {:?} speed {:.2} active {}",
                b.position,
                b.acceleration,
                b.speed,
                b.active
            );
        }
    }
}
