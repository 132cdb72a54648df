// src/main.rs
use nannou::prelude::*;
use rand::Rng;
use std::time::Instant;

use beltvis::{
    animation::TravelEngine,
    config::Config,
    controllers::{OscCommand, OscController, OscSender},
    draw::{draw_tile, draw_token, BeltDrawParams},
    models::{Direction, Layout, TileAddress},
    services::RelayScheduler,
    views::{RelayOutcome, TileKind, TileRegistry},
};

struct Model {
    // Core components:
    tiles: TileRegistry,
    scheduler: RelayScheduler,
    travel_engine: TravelEngine,

    // Comms components:
    osc_controller: OscController,
    osc_sender: OscSender,

    // Style
    draw_params: BeltDrawParams,
    background: Rgb<f32>,
    colorful_flag: bool, // random-ish tint per spawned token
    random: rand::rngs::ThreadRng,

    // FPS
    last_update: Instant,
    fps: f32,

    debug_flag: bool,
}

fn main() {
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load().expect("Failed to load config file");

    // Load the startup layout
    let layout_path = config.resolve_layout_path();
    let layout = Layout::load(layout_path).expect("Failed to load layout file");

    // Create OSC controller
    let osc_controller =
        OscController::new(config.osc.rx_port).expect("Failed to create OSC Controller");
    let osc_sender = OscSender::new(config.osc.rx_port).expect("Failed to create OSC Sender");

    // Create window
    app.new_window()
        .title("beltvis 0.2.1")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .unwrap();

    // Build the tile registry from the layout. Tiles created here have
    // their autospawn armed; the spawns fire on the first update frame.
    let mut tiles = TileRegistry::new(&config.grid);
    for spec in &layout.tiles {
        let kind = if spec.is_belt() {
            TileKind::Belt
        } else {
            TileKind::Platform
        };
        let direction = Direction::from_attr(&spec.direction);
        if tiles.add_tile(&spec.id, kind, direction, spec.autospawn).is_none() {
            println!("belt: layout tile \"{}\" has no grid address", spec.id);
        }
    }
    println!(
        "belt: loaded layout \"{}\" ({} tiles)",
        layout.name,
        tiles.tile_count()
    );

    let [br, bg, bb] = config.style.background;

    Model {
        tiles,
        scheduler: RelayScheduler::new(),
        travel_engine: TravelEngine::new(&config.travel),

        osc_controller,
        osc_sender,

        draw_params: BeltDrawParams::from_config(&config.style, &config.belt, &config.grid),
        background: rgb(br, bg, bb),
        colorful_flag: false,
        random: rand::thread_rng(),

        // FPS
        last_update: Instant::now(),
        fps: 0.0,

        debug_flag: false,
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        // re-spawn on every autospawn-marked tile
        Key::Space => {
            let ids: Vec<String> = model
                .tiles
                .iter()
                .filter(|tile| tile.autospawn)
                .map(|tile| tile.raw_id.clone())
                .collect();
            for id in ids {
                model.osc_sender.send_belt_spawn(&id);
            }
        }
        // build a closed demo loop when the grid is empty
        Key::G => {
            if model.tiles.is_empty() {
                let demo = [
                    ("c0", "up-right", true),
                    ("b1", "up-right", false),
                    ("a2", "down-right", false),
                    ("b3", "down-right", false),
                    ("c4", "down-left", false),
                    ("d3", "down-left", false),
                    ("e2", "up-left", false),
                    ("d1", "up-left", false),
                ];
                for (id, direction, autospawn) in demo {
                    model.osc_sender.send_belt_create(id, direction, autospawn, "belt");
                }
            }
        }
        // point every belt the same way
        Key::Key1 => broadcast_direction(model, "up-right"),
        Key::Key2 => broadcast_direction(model, "up-left"),
        Key::Key3 => broadcast_direction(model, "down-right"),
        Key::Key4 => broadcast_direction(model, "down-left"),

        Key::C => {
            model.osc_sender.send_clear_grid();
        }
        Key::H => {
            model.colorful_flag = !model.colorful_flag;
        }
        Key::P => {
            model.debug_flag = !model.debug_flag;
        }
        Key::Q => {
            app.quit();
        }
        _ => (),
    }
}

fn broadcast_direction(model: &mut Model, direction: &str) {
    let ids: Vec<String> = model.tiles.iter().map(|tile| tile.raw_id.clone()).collect();
    for id in ids {
        model.osc_sender.send_belt_direction(&id, direction);
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    let duration = now - model.last_update;
    model.last_update = now;
    // FPS calculation
    if model.debug_flag {
        model.fps = 1.0 / duration.as_secs_f32();
    }

    // Process OSC messages
    model.osc_controller.process_messages();
    launch_commands(app, model);

    /*********************  Main update path for the grid  **********************/

    // autospawns armed by tile creation fire on this frame
    let tint = next_token_tint(model);
    let outcomes = model
        .tiles
        .fire_autospawns(&model.travel_engine, app.time, tint);
    for outcome in outcomes {
        handle_outcome(model, outcome);
    }

    // handoffs that have reached their fire time
    for pending in model.scheduler.take_due(app.time) {
        let tint = next_token_tint(model);
        let outcome = model
            .tiles
            .spawn_at(&pending.target, &model.travel_engine, app.time, tint);
        handle_outcome(model, outcome);
    }

    // drop finished tokens
    model.tiles.update(app.time);

    /***************************************************************************/
}

// A Relayed outcome becomes a scheduled one-shot; everything else ends
// the chain right here.
fn handle_outcome(model: &mut Model, outcome: RelayOutcome) {
    if let RelayOutcome::Relayed { next, fire_at } = outcome {
        model.scheduler.schedule(next, fire_at);
    }
    if model.debug_flag {
        println!("belt: {:?}", outcome);
    }
}

fn next_token_tint(model: &mut Model) -> Option<Rgb<f32>> {
    if !model.colorful_flag {
        return None;
    }
    let color_hsl = hsl(
        model.random.gen_range(0.0..=1.0),
        model.random.gen_range(0.2..=1.0),
        0.6,
    );
    Some(Rgb::from(color_hsl))
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(model.background);

    for tile in model.tiles.iter() {
        draw_tile(&draw, tile, &model.draw_params, app.time);
    }

    // tokens sit above every belt surface
    for tile in model.tiles.iter() {
        for token in &tile.tokens {
            draw_token(&draw, token, &model.draw_params, app.time);
        }
    }

    if model.debug_flag {
        draw.text(&format!("FPS: {:.1}", model.fps))
            .x_y(0.0, 300.0)
            .color(RED);
        draw.text(&format!(
            "tokens: {}  pending: {}",
            model.tiles.live_token_count(),
            model.scheduler.pending()
        ))
        .x_y(0.0, 280.0)
        .color(RED);
    }

    draw.to_frame(app, &frame).unwrap();
}

// ******************************* OSC Launcher *******************************

fn launch_commands(app: &App, model: &mut Model) {
    for command in model.osc_controller.take_commands() {
        match command {
            OscCommand::BeltCreate {
                id,
                direction,
                autospawn,
                kind,
            } => {
                let kind = if kind.eq_ignore_ascii_case("platform") {
                    TileKind::Platform
                } else {
                    TileKind::Belt
                };
                let direction = Direction::from_attr(&direction);
                if model.tiles.add_tile(&id, kind, direction, autospawn).is_none() {
                    println!("belt: tile \"{}\" has no grid address", id);
                }
            }
            OscCommand::BeltDirection { id, direction } => {
                if let Some(address) = TileAddress::parse(&id) {
                    if let Some(tile) = model.tiles.get_mut(&address) {
                        tile.set_direction(Direction::from_attr(&direction));
                    }
                }
            }
            OscCommand::BeltSpawn { id } => {
                if let Some(address) = TileAddress::parse(&id) {
                    let tint = next_token_tint(model);
                    let outcome =
                        model
                            .tiles
                            .spawn_at(&address, &model.travel_engine, app.time, tint);
                    handle_outcome(model, outcome);
                }
            }
            OscCommand::BeltRemove { id } => {
                if let Some(address) = TileAddress::parse(&id) {
                    model.tiles.remove(&address);
                }
            }
            OscCommand::ClearGrid => {
                model.tiles.clear();
                model.scheduler.clear();
            }
        }
    }
}
