use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use maze_cli::{
    default_record_name, generate_batch, generate_maze, load_config, load_record, save_record,
    verify_record, Glyphs, MazeRecord,
};
use maze_core::{difficulty, DifficultyCurve, MazeConfig};

/// Seeded branching-path maze generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one maze and print it
    Generate {
        #[command(flatten)]
        maze: MazeArgs,

        /// Save the maze as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate one maze per seed in parallel
    Batch {
        #[command(flatten)]
        maze: MazeArgs,

        /// Comma-separated list of seeds
        #[arg(long, value_delimiter = ',', conflicts_with = "count")]
        seeds: Vec<u64>,

        /// Number of mazes, seeded from --seed (or a random seed) upwards
        #[arg(long)]
        count: Option<u64>,

        /// Save every maze as <seed>_maze.json in this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Print a saved maze
    Show {
        /// JSON file written by `generate --output`
        file: PathBuf,

        /// Regenerate the maze from its config and check it matches
        #[arg(long)]
        verify: bool,
    },
}

#[derive(Args, Debug)]
struct MazeArgs {
    /// JSON file with a maze config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed (random if neither this nor the config file sets one)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Width in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// easy, medium, hard, extreme or 1-10
    #[arg(short, long, value_parser = difficulty::parse)]
    difficulty: Option<u8>,

    /// linear or truncated
    #[arg(long)]
    curve: Option<DifficultyCurve>,

    /// Keep and draw the solution path
    #[arg(long)]
    solution: bool,

    /// Wall character
    #[arg(long, default_value_t = '#')]
    wall: char,

    /// Solution character
    #[arg(long, default_value_t = '.')]
    path: char,
}

impl MazeArgs {
    fn to_config(&self) -> maze_cli::Result<MazeConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => MazeConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.size_x = width;
        }
        if let Some(height) = self.height {
            config.size_y = height;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(curve) = self.curve {
            config.curve = curve;
        }
        config.save_solution |= self.solution;

        config.validate()?;
        Ok(config)
    }

    fn glyphs(&self) -> Glyphs {
        Glyphs {
            wall: self.wall,
            path: Some(self.path),
        }
    }
}

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let outcome = match &cli.command {
        Command::Generate { maze, output } => generate_command(maze, output.as_deref()),
        Command::Batch {
            maze,
            seeds,
            count,
            output_dir,
        } => batch_command(maze, seeds, *count, output_dir.as_deref()),
        Command::Show { file, verify } => show_command(file, *verify),
    };

    if let Err(e) = outcome {
        eprintln!();
        eprintln!("❌ Error: {}", e);
        eprintln!("{}", "=".repeat(70));
        std::process::exit(1);
    }
}

fn print_summary(record: &MazeRecord) {
    let config = &record.config;
    println!("  Seed: {}", config.seed);
    println!("  Size: {}x{} cells", config.size_x, config.size_y);
    println!("  Difficulty: {} ({} curve)", config.difficulty, config.curve);
    println!(
        "  Bounds: main path >= {} cells, branches <= {} cells",
        record.bounds.min_moves, record.bounds.max_sub_path_moves
    );
    println!("  Paths: {}", record.path_count);
    if let (Some(entrance), Some(exit)) = (record.entrance, record.exit) {
        println!(
            "  Entrance: {} ({:?})  Exit: {} ({:?})",
            entrance.cell, entrance.side, exit.cell, exit.side
        );
    }
    if let Some(solution) = &record.solution {
        println!("  Solution length: {} cells", solution.len());
    }
}

fn generate_command(args: &MazeArgs, output: Option<&Path>) -> maze_cli::Result<()> {
    let config = args.to_config()?;

    println!("📋 Generating maze");
    let start = Instant::now();
    let (_, record) = generate_maze(&config, args.glyphs())?;
    println!("  Generation time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
    print_summary(&record);
    println!();
    println!("{}", record.text());
    println!();

    if let Some(path) = output {
        save_record(&record, path)?;
        println!("💾 Maze saved to: {}", path.display());
    }

    println!("{}", "=".repeat(70));
    Ok(())
}

fn batch_command(
    args: &MazeArgs,
    seeds: &[u64],
    count: Option<u64>,
    output_dir: Option<&Path>,
) -> maze_cli::Result<()> {
    let config = args.to_config()?;

    let seeds: Vec<u64> = match count {
        Some(n) => (0..n).map(|i| config.seed.wrapping_add(i)).collect(),
        None if seeds.is_empty() => vec![config.seed],
        None => seeds.to_vec(),
    };

    println!("📋 Generating {} mazes", seeds.len());
    let start = Instant::now();
    let records = generate_batch(&config, &seeds, args.glyphs())?;
    println!("  Generation time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
    println!();

    for record in &records {
        println!(
            "  seed {:>20}  paths {:>5}  solution {:>5}",
            record.config.seed,
            record.path_count,
            record
                .solution
                .as_ref()
                .map_or_else(|| "-".to_string(), |s| s.len().to_string())
        );

        if let Some(dir) = output_dir {
            let path = dir.join(default_record_name(record.config.seed));
            save_record(record, &path)?;
        }
    }

    if let Some(dir) = output_dir {
        println!();
        println!("💾 Mazes saved to: {}", dir.display());
    }

    println!("{}", "=".repeat(70));
    Ok(())
}

fn show_command(file: &Path, verify: bool) -> maze_cli::Result<()> {
    let record = load_record(file)?;

    println!("📦 Loaded maze from {}", file.display());
    print_summary(&record);
    println!();
    println!("{}", record.text());
    println!();

    if verify {
        println!("🔐 Regenerating maze from its config...");
        verify_record(&record)?;
        println!("✅ Maze matches its config");
    }

    println!("{}", "=".repeat(70));
    Ok(())
}
