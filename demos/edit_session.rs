use clap::Parser;
use colored::Colorize;
use glam::*;

use splat_edit as se;

/// The command line arguments.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "\
    A scripted splat editing session.\n\
    \n\
    Selects, hides, paints, duplicates and moves splats, then undoes everything.\n\
    "
)]
struct Args {
    /// Number of splats in the generated model.
    #[arg(short, long, default_value_t = 1_000_000)]
    count: u32,

    /// Maximum number of operations kept in the history, unbounded if not set.
    #[arg(long)]
    max_history: Option<usize>,
}

fn main() -> Result<(), se::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Generating {} splats", args.count);
    let splats = se::Splats::from_splats((0..args.count).map(|i| {
        let t = i as f32 / args.count.max(1) as f32;
        se::Splat::new(
            vec3(t * 10.0, (t * 37.0).sin(), (t * 53.0).cos()),
            vec3(t, 1.0 - t, 0.5),
        )
    }));

    let mut scene = se::Scene::new();
    let id = scene.create_entity(se::SplatEntity::new("model", splats));

    let mut session = se::EditSession::new_with(se::HistoryConfig {
        max_len: args.max_history,
    });
    session.set_target(&mut scene, Some(id));

    let positions = scene
        .get(id)
        .map(|entity| entity.splats.positions().to_vec())
        .unwrap_or_default();

    step("select x < 5", &mut session, &mut scene, |session, scene| {
        session.add_selection_op(scene, se::SelectOp::Set, |i| positions[i].x < 5.0)
    })?;
    step("remove y > 0.5", &mut session, &mut scene, |session, scene| {
        session.add_selection_op(scene, se::SelectOp::Remove, |i| positions[i].y > 0.5)
    })?;
    step("hide", &mut session, &mut scene, |session, scene| {
        session.add_hide_op(scene)
    })?;
    step("select all", &mut session, &mut scene, |session, scene| {
        session.add_select_all_op(scene)
    })?;
    step("paint red", &mut session, &mut scene, |session, scene| {
        let paint = se::PaintColor {
            color: vec3(1.0, 0.0, 0.0),
            mix_weight: 0.5,
        };
        session.add_paint_op(scene, paint, |i| positions[i].z > 0.0)
    })?;
    step("inverse", &mut session, &mut scene, |session, scene| {
        session.add_select_inverse_op(scene)
    })?;
    step("duplicate", &mut session, &mut scene, |session, scene| {
        session.add_duplicate_selection_op(scene)
    })?;
    step("move", &mut session, &mut scene, |session, scene| {
        let old = scene.pivot.transform;
        let new = se::Transform::from_pos(old.pos + Vec3::Y);
        session.start_transform_op(scene)?;
        session.update_transform_op(scene, &old, &new)?;
        session.end_transform_op(scene, old, new)
    })?;
    step("separate", &mut session, &mut scene, |session, scene| {
        session.add_separate_selection_op(scene)
    })?;

    let mut undone = 0;
    while session.undo(&mut scene) {
        undone += 1;
    }
    println!("{} {undone} operations", "Undone".yellow().bold());
    print_counts(&scene, id);

    Ok(())
}

/// Run one scripted edit and print the counters afterwards.
fn step(
    name: &str,
    session: &mut se::EditSession,
    scene: &mut se::Scene,
    f: impl FnOnce(&mut se::EditSession, &mut se::Scene) -> Result<(), se::Error>,
) -> Result<(), se::Error> {
    let start = std::time::Instant::now();
    f(session, scene)?;
    println!(
        "{} {} in {:.2?}",
        "Applied".green().bold(),
        name.cyan(),
        start.elapsed()
    );

    if let Some(id) = session.target() {
        print_counts(scene, id);
    }
    Ok(())
}

fn print_counts(scene: &se::Scene, id: se::EntityId) {
    for (other, entity) in scene.iter() {
        let counts = entity.splats.counts();
        println!(
            "  {}{} {} splats, {} selected, {} hidden, {} deleted",
            entity.name.bold(),
            if other == id { "*" } else { "" },
            entity.splats.len(),
            counts.selected.to_string().green(),
            counts.hidden.to_string().yellow(),
            counts.deleted.to_string().red(),
        );
    }
}
