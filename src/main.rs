//! cacpack CLI - turns Create-a-Character save records into mod packages.
//!
//! This is the main entry point for the cacpack command-line application.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use cacpack::common::hash;
use cacpack::prelude::*;
use cacpack::x2m::MANIFEST_PATH;

/// cacpack - Create-a-Character to X2M converter
#[derive(Parser)]
#[command(name = "cacpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a character's costume presets and the default selection
    Presets {
        /// Save export (JSON) holding the characters
        #[arg(short, long, env = "CACPACK_SAVE")]
        save: PathBuf,

        /// Extracted game data directory
        #[arg(short, long, env = "CACPACK_GAME_DIR")]
        game: PathBuf,

        /// Character index within the save
        #[arg(short, long, default_value_t = 0)]
        character: usize,
    },

    /// Generate a free entry code
    Code {
        /// Extracted game data directory
        #[arg(short, long, env = "CACPACK_GAME_DIR")]
        game: PathBuf,
    },

    /// Convert a character into an X2M package
    Convert {
        /// Save export (JSON) holding the characters
        #[arg(short, long, env = "CACPACK_SAVE")]
        save: PathBuf,

        /// Extracted game data directory
        #[arg(short, long, env = "CACPACK_GAME_DIR")]
        game: PathBuf,

        /// Character index within the save
        #[arg(short, long, default_value_t = 0)]
        character: usize,

        /// Output package
        #[arg(short, long)]
        output: PathBuf,

        /// Three-character entry code (generated when omitted)
        #[arg(long)]
        code: Option<String>,

        /// How the package identity is derived
        #[arg(long, value_enum, default_value_t = GuidArg::NameRaceAccount)]
        guid: GuidArg,

        /// Use the character-select screen's generic voice lines
        #[arg(long)]
        css_voice: bool,

        /// Preset to include (repeatable; defaults to presets with a named top)
        #[arg(short, long = "preset")]
        presets: Vec<usize>,
    },

    /// Summarize a written package
    Inspect {
        /// Package file
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Package identity derivation, as named on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GuidArg {
    /// No identity; the game assigns one on install
    None,
    /// Hash of the character name
    Name,
    /// Name hash salted with the race code
    NameRace,
    /// Name hash salted with the race code and the save's account id
    NameRaceAccount,
}

impl GuidArg {
    fn mode(self, account: u64) -> GuidMode {
        match self {
            GuidArg::None => GuidMode::None,
            GuidArg::Name => GuidMode::Name,
            GuidArg::NameRace => GuidMode::NameRace,
            GuidArg::NameRaceAccount => GuidMode::NameRaceAccount(account),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Presets { save, game, character } => {
            cmd_presets(&save, &game, character)?;
        }
        Commands::Code { game } => {
            cmd_code(&game)?;
        }
        Commands::Convert {
            save,
            game,
            character,
            output,
            code,
            guid,
            css_voice,
            presets,
        } => {
            cmd_convert(&save, &game, character, &output, code, guid, css_voice, presets)?;
        }
        Commands::Inspect { input } => {
            cmd_inspect(&input)?;
        }
    }

    Ok(())
}

fn load_save(path: &Path) -> Result<SaveExport> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read save export {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to parse save export")
}

fn pick_character(save: &SaveExport, index: usize) -> Result<&CharacterRecord> {
    save.characters.get(index).with_context(|| {
        format!(
            "Character {} not found ({} characters in save)",
            index,
            save.characters.len()
        )
    })
}

fn cmd_presets(save_path: &Path, game_dir: &Path, character: usize) -> Result<()> {
    let game = DirGameData::open(game_dir).context("Failed to open game data")?;
    let save = load_save(save_path)?;
    let record = pick_character(&save, character)?;

    println!("{} ({} presets)", record.name, record.presets.len());

    let selected = default_selection(&game, record);
    for (i, label) in preset_labels(&game, record).iter().enumerate() {
        let mark = if selected.contains(&i) { "*" } else { " " };
        println!("{} {:>2}  {}", mark, i, label);
    }

    println!("\n* = selected by default");

    Ok(())
}

fn cmd_code(game_dir: &Path) -> Result<()> {
    let game = DirGameData::open(game_dir).context("Failed to open game data")?;
    let code = EntryCode::random(&game).context("Failed to generate a code")?;
    println!("{}", code);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    save_path: &Path,
    game_dir: &Path,
    character: usize,
    output: &Path,
    code: Option<String>,
    guid: GuidArg,
    css_voice: bool,
    presets: Vec<usize>,
) -> Result<()> {
    let game = DirGameData::open(game_dir).context("Failed to open game data")?;
    let save = load_save(save_path)?;
    let record = pick_character(&save, character)?;

    let entry_code = match code {
        Some(code) => code,
        None => {
            let code = EntryCode::random(&game).context("Failed to generate a code")?;
            println!("Using generated entry code {}", code);
            code.to_string()
        }
    };

    let presets = if presets.is_empty() {
        default_selection(&game, record)
    } else {
        presets
    };

    let options = ConvertOptions {
        entry_code,
        guid_mode: guid.mode(save.account_id),
        css_voice,
        presets,
    };

    println!(
        "Converting {}: presets {:?} -> {}",
        record.name,
        options.presets,
        output.display()
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Building {}", options.entry_code));
    pb.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let result = Converter::new(&game).convert(record, &options, output);
    pb.finish_and_clear();

    let package = result.context("Conversion failed")?;

    println!(
        "Wrote {} in {:?}: {} costume(s), {} part set(s), {} custom skill(s), {} file(s)",
        output.display(),
        start.elapsed(),
        package.slots().len(),
        package.bcs().part_set_count(),
        package.custom_skills().len(),
        package.file_count()
    );
    if let Some(guid) = package.info().guid {
        println!("GUID: {}", guid);
    }

    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read package")?;
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).context("Failed to open package")?;

    let mut manifest = String::new();
    archive
        .by_name(MANIFEST_PATH)
        .context("Package has no manifest")?
        .read_to_string(&mut manifest)
        .context("Failed to read manifest")?;

    if !manifest.contains(r#"type="NEW_CHARACTER""#) {
        anyhow::bail!("Package is not a new-character mod");
    }

    for (label, tag) in [
        ("Slots", "<Slot "),
        ("Skill sets", "<SkillSet "),
        ("Custom skills", "<CustomSkill "),
        ("Audio entries", "<Audio "),
        ("Stat entries", "<Stats "),
        ("Aura links", "<Aura "),
        ("Clip links", "<Clip "),
    ] {
        println!("{:<14} {}", label, manifest.matches(tag).count());
    }
    if manifest.contains("<ThirdStage ") {
        println!("Third-stage skeleton link present");
    }

    println!();
    let mut total = 0u64;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        println!(
            "{:>10} {:08x} {}",
            content.len(),
            hash::crc32c(&content),
            file.name()
        );
        total += content.len() as u64;
    }

    println!("\nTotal: {} entries, {} bytes", archive.len(), total);

    Ok(())
}
