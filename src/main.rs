//! Headless driver: loads models (or two demo cubes), then replays a short
//! click / drag / path session through the engine and logs what happened.
//!
//! ```text
//! orrery [--options preset.toml] [model.obj ...]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use orrery::input::{InputEvent, MouseButton};
use orrery::mesh::primitives;
use orrery::{Engine, EntityId, Options, OrreryError, Transform};

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

struct Args {
    options: Option<PathBuf>,
    models: Vec<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        options: None,
        models: Vec::new(),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--options" {
            let path = iter
                .next()
                .ok_or_else(|| "--options needs a file".to_owned())?;
            args.options = Some(PathBuf::from(path));
        } else {
            args.models.push(PathBuf::from(arg));
        }
    }
    Ok(args)
}

fn populate(engine: &mut Engine, models: &[PathBuf]) -> Result<Vec<EntityId>, OrreryError> {
    if models.is_empty() {
        let cube = Arc::new(primitives::cube("cube", 1.0)?);
        return Ok(vec![
            engine.add_mesh(Arc::clone(&cube), Transform::default()),
            engine.add_mesh(
                cube,
                Transform::from_translation(Vec3::new(3.0, 0.0, 0.0)),
            ),
        ]);
    }
    let mut ids = Vec::new();
    for path in models {
        ids.extend(engine.load_obj(path)?);
    }
    Ok(ids)
}

fn click(engine: &mut Engine, at: Vec2) {
    engine.handle_input(&InputEvent::PointerDown {
        button: MouseButton::Left,
        x: at.x,
        y: at.y,
    });
    engine.handle_input(&InputEvent::PointerUp {
        button: MouseButton::Left,
    });
}

fn drag(engine: &mut Engine, button: MouseButton, from: Vec2, to: Vec2) {
    engine.handle_input(&InputEvent::PointerDown {
        button,
        x: from.x,
        y: from.y,
    });
    for step in 1..=8 {
        let p = from.lerp(to, step as f32 / 8.0);
        engine.handle_input(&InputEvent::PointerMove { x: p.x, y: p.y });
    }
    engine.handle_input(&InputEvent::PointerUp { button });
}

fn key(engine: &mut Engine, name: &str) {
    engine.handle_input(&InputEvent::KeyDown {
        key: name.to_owned(),
    });
}

fn run(args: &Args) -> Result<(), OrreryError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let mut engine = Engine::new(options, VIEWPORT)?;
    let ids = populate(&mut engine, &args.models)?;
    let _ = engine.advance();
    log::info!("scene holds {} entities", engine.scene().len());

    let Some(&first) = ids.first() else {
        log::warn!("no meshes to interact with");
        return Ok(());
    };
    let Some(target) = engine
        .entity_position(first)
        .and_then(|p| engine.pixel_of(p))
    else {
        log::warn!("first entity is behind the camera");
        return Ok(());
    };

    click(&mut engine, target);
    let report = engine.advance();
    log::info!("click at {target}: selected {:?}", report.selected);

    drag(&mut engine, MouseButton::Left, target, target + Vec2::new(80.0, 30.0));
    let _ = engine.advance();
    if let Some(entity) = engine.scene().get(first) {
        log::info!("trackball rotation: {}", entity.transform.rotation());
    }

    key(&mut engine, "s");
    drag(&mut engine, MouseButton::Left, target, target + Vec2::new(0.0, -40.0));
    let _ = engine.advance();
    if let Some(entity) = engine.scene().get(first) {
        log::info!("scale after drag: {}", entity.transform.scale());
    }

    key(&mut engine, "p");
    log::info!("edit mode: {:?}", engine.edit_mode());
    click(&mut engine, target + Vec2::new(150.0, -60.0));
    click(&mut engine, target + Vec2::new(300.0, 0.0));
    let mut frames = 0_u32;
    loop {
        let report = engine.advance();
        frames += 1;
        if report.finished_motions.contains(&first) || frames > 10_000 {
            break;
        }
    }
    log::info!(
        "path finished after {frames} frames at {:?}",
        engine.entity_position(first)
    );

    drag(&mut engine, MouseButton::Right, target, target + Vec2::new(120.0, 0.0));
    key(&mut engine, "v");
    let _ = engine.advance();
    log::info!(
        "camera {:?} at {}",
        engine.camera().mode(),
        engine.camera().camera.eye
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: orrery [--options preset.toml] [model.obj ...]");
            std::process::exit(2);
        }
    };
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
