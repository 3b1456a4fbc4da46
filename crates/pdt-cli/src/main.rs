use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use glam::DVec3;
use log::info;

use pdt::{
    Action, EdgeId, MemoryScene, ObjectMode, PdtOptions, SelectMode, Session, VertexId,
    WorkingPlane,
};

/// Runs PDT commands against a small in-memory scene
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Commands to run, e.g. `CA1,2,3`. Read from stdin when absent
    commands: Vec<String>,

    /// JSON options file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Working plane (XY, XZ, YZ or LO)
    #[clap(short, long)]
    plane: Option<String>,

    /// Base point for delta and polar cursor/pivot placement
    #[clap(short, long, value_enum)]
    select: Option<Select>,

    /// Mesh vertex `x,y,z`, selected in the order given
    #[clap(short, long = "vertex", value_parser = parse_point)]
    vertices: Vec<DVec3>,

    /// Edge `i,j` between vertex indices, selected in the order given
    #[clap(short, long = "edge", value_parser = parse_edge)]
    edges: Vec<(usize, usize)>,

    /// Object location `x,y,z`; switches to object mode
    #[clap(short, long = "object", value_parser = parse_point)]
    objects: Vec<DVec3>,

    /// Location of the mesh object
    #[clap(long, value_parser = parse_point, default_value = "0,0,0")]
    location: DVec3,

    /// Initial cursor location
    #[clap(long, value_parser = parse_point)]
    cursor: Option<DVec3>,
}

#[derive(ValueEnum, Clone, Copy)]
enum Select {
    /// Relative to the current cursor or pivot
    Current,
    /// Relative to the active vertex or object
    Selected,
}

fn parse_point(s: &str) -> std::result::Result<DVec3, String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("'{v}': {e}")))
        .collect::<std::result::Result<_, _>>()?;
    match values.as_slice() {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got '{s}'")),
    }
}

fn parse_edge(s: &str) -> std::result::Result<(usize, usize), String> {
    let Some((a, b)) = s.split_once(',') else {
        return Err(format!("expected i,j, got '{s}'"));
    };
    let index = |v: &str| v.trim().parse::<usize>().map_err(|e| format!("'{v}': {e}"));
    Ok((index(a)?, index(b)?))
}

fn options(args: &Args) -> Result<PdtOptions> {
    let mut options = match &args.config {
        Some(path) => PdtOptions::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => PdtOptions::default(),
    };
    if let Some(plane) = &args.plane {
        options.plane = plane.parse::<WorkingPlane>()?;
    }
    if let Some(select) = args.select {
        options.select = match select {
            Select::Current => SelectMode::Current,
            Select::Selected => SelectMode::Selected,
        };
    }
    Ok(options)
}

fn scene(args: &Args) -> Result<MemoryScene> {
    let mut scene = MemoryScene::with_mesh("Mesh", args.location);
    let ids: Vec<VertexId> = args.vertices.iter().map(|&v| scene.add_vertex(v)).collect();
    for &id in &ids {
        scene.select_vertex(id)?;
    }
    for &(a, b) in &args.edges {
        let (Some(&a), Some(&b)) = (ids.get(a), ids.get(b)) else {
            bail!("edge {a},{b} refers to a missing vertex");
        };
        let edge: EdgeId = scene.add_edge(a, b)?;
        scene.select_edge(edge)?;
    }

    for (i, &location) in args.objects.iter().enumerate() {
        let id = scene.add_object(format!("Object.{i:03}"), location);
        scene.select_object(id)?;
        scene.set_active(id, ObjectMode::Object);
    }
    if let Some(cursor) = args.cursor {
        scene.set_cursor(cursor);
    }
    Ok(scene)
}

fn report(command: &str, action: &Action) {
    match action {
        Action::Help(text) => println!("{text}"),
        Action::Mutate { mutation, radius } => {
            print!("{command}: {}", mutation.describe());
            match radius {
                Some(r) => println!(" (radius {r})"),
                None => println!(),
            }
        }
        Action::Measure(m) => {
            println!("{command}: distance {}, angle {}", m.distance, m.angle);
        }
        Action::Maths { target, value } => println!("{command}: {target:?} = {value}"),
    }
}

fn print_scene(scene: &MemoryScene) {
    println!("cursor {}", scene.cursor_location());
    println!("pivot  {}", scene.pivot_location());
    for i in 0..scene.vertex_count() {
        if let Some(co) = scene.vertex(VertexId(i)) {
            println!("v{i:<4} {co}");
        }
    }
    for (id, a, b) in scene.edges() {
        println!("e{:<4} v{} v{}", id.0, a.0, b.0);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let options = options(&args)?;
    info!("options: {options:?}");
    let mut scene = scene(&args)?;
    let mut session = Session::new(options);

    let commands: Vec<String> = if args.commands.is_empty() {
        let mut lines = Vec::new();
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            // Skip blank lines.
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        lines
    } else {
        args.commands.clone()
    };

    let mut failed = 0;
    for command in &commands {
        match session.run_on(command, &mut scene) {
            Ok(action) => report(command.trim(), &action),
            Err(e) => {
                eprintln!("{}: {e}", command.trim());
                failed += 1;
            }
        }
    }

    print_scene(&scene);
    if failed > 0 {
        bail!("{failed} of {} command(s) rejected", commands.len());
    }
    Ok(())
}
