//! Faceset CLI - inspect and convert STL meshes.
//!
//! Usage: faceset <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `faceset --help` for available commands.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use faceset::io::{self, StlEncoding};
use faceset::mesh::{NormalBinding, SceneGraph};

#[derive(Parser)]
#[command(name = "faceset")]
#[command(author, version, about = "Corner-table mesh CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// List faces with their corners and vertex positions
    Faces {
        /// Input mesh file
        input: PathBuf,

        /// Maximum number of faces to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Convert a mesh between STL encodings
    Convert {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Output encoding
        #[arg(short, long, value_enum, default_value = "ascii")]
        encoding: Encoding,

        /// Solid name written to the output (default: input name or file stem)
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Encoding {
    /// Text STL
    Ascii,
    /// Binary STL
    Binary,
}

impl From<Encoding> for StlEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Ascii => StlEncoding::Ascii,
            Encoding::Binary => StlEncoding::Binary,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("ERROR | {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,
        Commands::Faces { input, limit } => cmd_faces(&input, limit)?,
        Commands::Convert {
            input,
            output,
            encoding,
            name,
        } => cmd_convert(&input, &output, encoding.into(), name)?,
    }

    Ok(())
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let scene = io::load(input)?;
    let face_set = scene.single_face_set()?;
    let faces = face_set.faces();

    println!("File: {}", input.display());
    if !face_set.name.is_empty() {
        println!("Name: {}", face_set.name);
    }
    println!("Vertices: {}", faces.num_vertices());
    println!("Faces: {}", faces.num_faces());
    println!("Corners: {}", faces.num_corners() - faces.num_faces());

    if faces.is_triangle_mesh() {
        println!("Mesh type: Triangle mesh");
    } else {
        println!("Mesh type: Polygon mesh");
    }

    let binding = match face_set.normal_binding() {
        NormalBinding::None => "none",
        NormalBinding::PerVertex => "per vertex",
        NormalBinding::PerFace => "per face",
    };
    println!("Normals: {}", binding);

    Ok(())
}

fn cmd_faces(input: &PathBuf, limit: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let scene = io::load(input)?;
    let face_set = scene.single_face_set()?;
    let faces = face_set.faces();

    let shown = limit.unwrap_or(usize::MAX).min(faces.num_faces());
    for f in 0..shown as i32 {
        print!("face {}:", f);
        for &v in faces.face_corners(f) {
            match face_set.vertex(v) {
                Some(p) => print!(" {}({:.3}, {:.3}, {:.3})", v, p.x, p.y, p.z),
                None => print!(" {}(?)", v),
            }
        }
        println!();
    }

    if shown < faces.num_faces() {
        println!("... {} more", faces.num_faces() - shown);
    }

    Ok(())
}

fn cmd_convert(
    input: &PathBuf,
    output: &PathBuf,
    encoding: StlEncoding,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut face_set = io::load(input)?.single_face_set()?.clone();

    println!(
        "Loaded: {} vertices, {} faces",
        face_set.num_vertices(),
        face_set.faces().num_faces()
    );

    if let Some(name) = name {
        face_set.name = name;
    } else if face_set.name.is_empty() {
        if let Some(stem) = input.file_stem() {
            face_set.name = stem.to_string_lossy().into_owned();
        }
    }

    io::save(&SceneGraph::from_face_set(face_set), output, encoding)?;
    println!("Saved: {} ({:.2?})", output.display(), start.elapsed());

    Ok(())
}
